//! Attack and Crit - Offensive stats

use serde::{Deserialize, Serialize};

/// Auto-attack stats
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attack {
    // === Base ===
    pub base_ad: f64,
    pub base_as: f64,
    pub base_range: f64,
    pub base_damage_amp: f64,
    /// Wind-up time at base attack speed
    pub base_attack_startup: f64,
    /// Follow-through time at base attack speed
    pub base_attack_recovery: f64,

    // === Bonus ===
    pub bonus_ad: f64,
    pub bonus_percent_ad: f64,
    pub bonus_percent_as: f64,
    pub bonus_range: f64,
    pub bonus_damage_amp: f64,

    // === Final ===
    pub final_ad: f64,
    pub final_as: f64,
    pub final_range: f64,
    pub final_damage_amp: f64,
    pub final_attack_startup: f64,
    pub final_attack_recovery: f64,

    // === Tracking ===
    pub last_attack_time: f64,
    pub attack_count: u32,
}

impl Attack {
    pub fn new(ad: f64, attack_speed: f64, range: f64) -> Self {
        Attack {
            base_ad: ad,
            base_as: attack_speed,
            base_range: range,
            base_damage_amp: 0.0,
            base_attack_startup: 0.0,
            base_attack_recovery: 0.0,
            bonus_ad: 0.0,
            bonus_percent_ad: 0.0,
            bonus_percent_as: 0.0,
            bonus_range: 0.0,
            bonus_damage_amp: 0.0,
            final_ad: ad,
            final_as: attack_speed,
            final_range: range,
            final_damage_amp: 0.0,
            final_attack_startup: 0.0,
            final_attack_recovery: 0.0,
            last_attack_time: 0.0,
            attack_count: 0,
        }
    }

    /// Builder: set wind-up and follow-through at base attack speed
    pub fn with_timings(mut self, startup: f64, recovery: f64) -> Self {
        self.base_attack_startup = startup;
        self.base_attack_recovery = recovery;
        self.final_attack_startup = startup;
        self.final_attack_recovery = recovery;
        self
    }

    /// Time between the end of recovery and the next possible attack
    pub fn cooldown(&self) -> Option<f64> {
        if self.final_as <= 0.0 {
            return None;
        }
        let interval = 1.0 / self.final_as;
        Some((interval - self.final_attack_startup - self.final_attack_recovery).max(0.0))
    }
}

/// Critical strike stats
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Crit {
    pub base_crit_chance: f64,
    pub base_crit_multiplier: f64,

    pub bonus_crit_chance: f64,
    pub bonus_crit_multiplier: f64,
    /// Conditional crit damage granted by Infinity Edge / Jeweled Gauntlet
    pub bonus_crit_damage_to_give: f64,

    pub final_crit_chance: f64,
    pub final_crit_multiplier: f64,
}

impl Crit {
    pub fn new(crit_chance: f64, crit_multiplier: f64) -> Self {
        Crit {
            base_crit_chance: crit_chance,
            base_crit_multiplier: crit_multiplier,
            bonus_crit_chance: 0.0,
            bonus_crit_multiplier: 0.0,
            bonus_crit_damage_to_give: 0.0,
            final_crit_chance: crit_chance.clamp(0.0, 1.0),
            final_crit_multiplier: crit_multiplier,
        }
    }

    /// Expected damage multiplier from crits: `(1 - p) + p * m`
    pub fn expected_multiplier(&self) -> f64 {
        crate::systems::damage::crit_expected_value(self.final_crit_chance, self.final_crit_multiplier)
    }
}

impl Default for Crit {
    /// Standard champion crit: 25% chance, 1.4x multiplier
    fn default() -> Self {
        Crit::new(0.25, 1.4)
    }
}
