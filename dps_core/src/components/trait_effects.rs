//! Trait effect components

use crate::bonus::{BonusAccumulator, BonusSource};
use serde::{Deserialize, Serialize};

/// Rapidfire: attack speed stacks gained on each attack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RapidfireEffect {
    pub current_stacks: u32,
    pub max_stacks: u32,
    pub as_per_stack: f64,
}

impl RapidfireEffect {
    pub fn new(max_stacks: u32, as_per_stack: f64) -> Self {
        RapidfireEffect {
            current_stacks: 0,
            max_stacks,
            as_per_stack,
        }
    }

    /// Returns true if a stack was added
    pub fn add_stack(&mut self) -> bool {
        if self.current_stacks >= self.max_stacks {
            return false;
        }
        self.current_stacks += 1;
        true
    }
}

impl BonusSource for RapidfireEffect {
    fn id(&self) -> &str {
        "rapidfire"
    }

    fn apply(&self, bonuses: &mut BonusAccumulator) {
        bonuses.percent_as += f64::from(self.current_stacks) * self.as_per_stack;
    }
}

/// Static bonuses granted by active traits, one entry per trait
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TraitBonuses {
    entries: Vec<(String, BonusAccumulator)>,
}

impl TraitBonuses {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add to the entry of a trait
    pub fn grant(&mut self, trait_api_name: &str, bonus: BonusAccumulator) {
        match self.entries.iter_mut().find(|(name, _)| name == trait_api_name) {
            Some((_, existing)) => existing.merge(&bonus),
            None => self.entries.push((trait_api_name.to_string(), bonus)),
        }
    }

    /// Drop everything a trait granted
    pub fn revoke(&mut self, trait_api_name: &str) {
        self.entries.retain(|(name, _)| name != trait_api_name);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl BonusSource for TraitBonuses {
    fn id(&self) -> &str {
        "trait_bonuses"
    }

    fn priority(&self) -> i32 {
        100
    }

    fn apply(&self, bonuses: &mut BonusAccumulator) {
        for (_, bonus) in &self.entries {
            bonuses.merge(bonus);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rapidfire_cap() {
        let mut effect = RapidfireEffect::new(2, 0.05);
        assert!(effect.add_stack());
        assert!(effect.add_stack());
        assert!(!effect.add_stack());

        let mut bonuses = BonusAccumulator::new();
        effect.apply(&mut bonuses);
        assert!((bonuses.percent_as - 0.10).abs() < 1e-9);
    }

    #[test]
    fn test_trait_bonuses_revoke() {
        let mut trait_bonuses = TraitBonuses::new();
        let bonus = BonusAccumulator {
            percent_as: 0.1,
            ..Default::default()
        };
        trait_bonuses.grant("TFT14_Swift", bonus);
        trait_bonuses.grant("TFT14_Swift", bonus);

        let mut total = BonusAccumulator::new();
        trait_bonuses.apply(&mut total);
        assert!((total.percent_as - 0.2).abs() < 1e-9);

        trait_bonuses.revoke("TFT14_Swift");
        assert!(trait_bonuses.is_empty());
    }
}
