//! Shared constants and small value types

use serde::{Deserialize, Serialize};

/// Tolerance for comparing simulated timestamps and timer thresholds
pub const TIME_EPSILON: f64 = 1e-6;

/// Flat mana gained by the attacker on non-spell damage
pub const MANA_PER_ATTACK: f64 = 10.0;

/// Base-stat multiplier for a star level (1, 2 or 3)
pub fn star_multiplier(star_level: u8) -> f64 {
    match star_level {
        0 | 1 => 1.0,
        2 => 1.8,
        _ => 3.24,
    }
}

/// What dealt a hit. Decides the damage bucket and whether it grants mana.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageKind {
    Attack,
    Spell,
    /// Burn ticks, dealt as true damage
    Burn,
}

impl DamageKind {
    /// Only auto attacks give the attacker mana
    pub fn grants_mana(self) -> bool {
        self == DamageKind::Attack
    }
}

impl std::fmt::Display for DamageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            DamageKind::Attack => "attack",
            DamageKind::Spell => "spell",
            DamageKind::Burn => "burn",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_multiplier() {
        assert_eq!(star_multiplier(1), 1.0);
        assert_eq!(star_multiplier(2), 1.8);
        assert_eq!(star_multiplier(3), 3.24);
    }

    #[test]
    fn test_only_attacks_grant_mana() {
        assert!(DamageKind::Attack.grants_mana());
        assert!(!DamageKind::Spell.grants_mana());
        assert!(!DamageKind::Burn.grants_mana());
    }
}
