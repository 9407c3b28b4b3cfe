//! DamageStats - Per-unit damage accounting

use crate::events::DamageApplied;
use crate::types::DamageKind;
use serde::{Deserialize, Serialize};

/// Damage dealt by one unit over a combat
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DamageStats {
    pub attack_damage: f64,
    pub spell_damage: f64,
    #[serde(default)]
    pub burn_damage: f64,
    pub physical_damage: f64,
    pub magic_damage: f64,
    #[serde(default)]
    pub true_damage: f64,
    /// Damage above what a non-crit hit would have dealt
    pub crit_damage: f64,
    pub attacks_landed: u32,
    pub spells_cast: u32,
    pub kills: u32,
    pub damage_taken: f64,
}

impl DamageStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_damage(&self) -> f64 {
        self.attack_damage + self.spell_damage + self.burn_damage
    }

    /// Damage per second over `elapsed` seconds
    pub fn dps(&self, elapsed: f64) -> f64 {
        if elapsed <= 0.0 {
            0.0
        } else {
            self.total_damage() / elapsed
        }
    }

    /// Add one resolved hit to the origin and damage type buckets
    pub fn record_dealt(&mut self, damage: &DamageApplied) {
        match damage.kind {
            DamageKind::Attack => self.attack_damage += damage.final_total,
            DamageKind::Spell => self.spell_damage += damage.final_total,
            DamageKind::Burn => self.burn_damage += damage.final_total,
        }
        self.physical_damage += damage.final_physical;
        self.magic_damage += damage.final_magic;
        self.true_damage += damage.final_true;
    }
}
