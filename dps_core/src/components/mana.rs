//! Mana and Spell - Casting resources and ability definition

use serde::{Deserialize, Serialize};

/// Mana pool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mana {
    pub base_max: f64,
    pub base_initial: f64,
    pub bonus_initial: f64,
    pub final_initial: f64,
    pub current: f64,
    /// Mana gain is blocked while a cast that locks mana is in progress
    pub locked: bool,
}

impl Mana {
    pub fn new(max: f64, initial: f64) -> Self {
        Mana {
            base_max: max,
            base_initial: initial,
            bonus_initial: 0.0,
            final_initial: initial,
            current: initial.min(max.max(0.0)),
            locked: false,
        }
    }

    pub fn max(&self) -> f64 {
        self.base_max
    }

    /// Full when current mana reached a positive maximum
    pub fn is_full(&self) -> bool {
        self.base_max > 0.0 && self.current >= self.base_max
    }

    /// Add mana, clamped to max. Returns mana actually gained.
    pub fn gain(&mut self, amount: f64) -> f64 {
        if self.locked || amount <= 0.0 {
            return 0.0;
        }
        let before = self.current;
        self.current = (self.current + amount).min(self.base_max.max(0.0));
        self.current - before
    }

    /// Deduct a spell cost, flooring at 0
    pub fn spend(&mut self, cost: f64) {
        self.current = (self.current - cost).max(0.0);
    }
}

/// One ability variable with a value per star index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpellVariable {
    pub name: String,
    pub values: Vec<f64>,
}

/// Champion ability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spell {
    pub name: String,
    pub icon: String,
    pub base_ap: f64,
    pub mana_cost: f64,
    pub cast_startup: f64,
    pub cast_recovery: f64,
    pub lock_mana_during_cast: bool,
    #[serde(default)]
    pub variables: Vec<SpellVariable>,

    pub bonus_ap: f64,
    pub final_ap: f64,

    /// Remaining recovery of the last cast
    pub current_cooldown: f64,
    pub cast_count: u32,
}

impl Spell {
    pub fn new(name: impl Into<String>, mana_cost: f64) -> Self {
        Spell {
            name: name.into(),
            icon: String::new(),
            base_ap: 100.0,
            mana_cost,
            cast_startup: 0.0,
            cast_recovery: 0.0,
            lock_mana_during_cast: true,
            variables: Vec::new(),
            bonus_ap: 0.0,
            final_ap: 100.0,
            current_cooldown: 0.0,
            cast_count: 0,
        }
    }

    /// Builder: cast timing
    pub fn with_timings(mut self, startup: f64, recovery: f64) -> Self {
        self.cast_startup = startup;
        self.cast_recovery = recovery;
        self
    }

    /// Builder: base ability power
    pub fn with_base_ap(mut self, base_ap: f64) -> Self {
        self.base_ap = base_ap;
        self.final_ap = base_ap + self.bonus_ap;
        self
    }

    /// Builder: add a star-indexed variable
    pub fn with_variable(mut self, name: impl Into<String>, values: Vec<f64>) -> Self {
        self.variables.push(SpellVariable {
            name: name.into(),
            values,
        });
        self
    }

    /// Value of a variable at a star index (star level - 1)
    pub fn var_value_for_star(&self, name: &str, star_index: usize) -> Option<f64> {
        self.variables
            .iter()
            .find(|v| v.name == name)
            .and_then(|v| v.values.get(star_index).copied())
    }
}
