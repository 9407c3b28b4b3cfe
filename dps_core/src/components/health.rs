//! Health - Hit points and defensive stats

use serde::{Deserialize, Serialize};

/// Hit points, armor, magic resist and durability.
///
/// Bonus fields are rebuilt from scratch on every stat pass; Final fields are
/// written only by stat calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Health {
    // === Base ===
    pub base_max_hp: f64,
    pub base_armor: f64,
    pub base_mr: f64,

    // === Bonus ===
    pub bonus_max_hp: f64,
    pub bonus_percent_hp: f64,
    pub bonus_armor: f64,
    pub bonus_mr: f64,
    /// Fraction of incoming damage ignored (0.1 = 10%)
    pub bonus_durability: f64,
    /// Fractions of armor / magic resist removed by debuffs
    #[serde(default)]
    pub armor_reduction: f64,
    #[serde(default)]
    pub mr_reduction: f64,

    // === Final ===
    pub final_max_hp: f64,
    pub final_armor: f64,
    pub final_mr: f64,
    pub final_durability: f64,

    pub current_hp: f64,
}

impl Health {
    /// Create with base values; finals mirror the base until the first stat pass
    pub fn new(max_hp: f64, armor: f64, mr: f64) -> Self {
        Health {
            base_max_hp: max_hp,
            base_armor: armor,
            base_mr: mr,
            bonus_max_hp: 0.0,
            bonus_percent_hp: 0.0,
            bonus_armor: 0.0,
            bonus_mr: 0.0,
            bonus_durability: 0.0,
            armor_reduction: 0.0,
            mr_reduction: 0.0,
            final_max_hp: max_hp,
            final_armor: armor,
            final_mr: mr,
            final_durability: 0.0,
            current_hp: max_hp,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.current_hp > 0.0
    }

    /// Subtract damage, flooring current HP at 0. Returns HP actually removed.
    pub fn take_damage(&mut self, amount: f64) -> f64 {
        let before = self.current_hp;
        self.current_hp = (self.current_hp - amount.max(0.0)).max(0.0);
        before - self.current_hp
    }

    /// Restore HP up to the final max. Dead units cannot be healed.
    /// Returns HP actually restored.
    pub fn heal(&mut self, amount: f64) -> f64 {
        if !self.is_alive() || amount <= 0.0 {
            return 0.0;
        }
        let before = self.current_hp;
        self.current_hp = (self.current_hp + amount).min(self.final_max_hp);
        (self.current_hp - before).max(0.0)
    }

    pub fn missing_hp(&self) -> f64 {
        (self.final_max_hp - self.current_hp).max(0.0)
    }

    /// Percentage of max HP remaining (0.0 - 1.0)
    pub fn hp_fraction(&self) -> f64 {
        if self.final_max_hp <= 0.0 {
            0.0
        } else {
            self.current_hp / self.final_max_hp
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_damage_floors_at_zero() {
        let mut health = Health::new(100.0, 0.0, 0.0);
        assert!((health.take_damage(30.0) - 30.0).abs() < f64::EPSILON);
        assert!((health.take_damage(500.0) - 70.0).abs() < f64::EPSILON);
        assert_eq!(health.current_hp, 0.0);
        assert!(!health.is_alive());
    }

    #[test]
    fn test_heal_caps_at_max() {
        let mut health = Health::new(100.0, 0.0, 0.0);
        health.take_damage(30.0);
        assert!((health.missing_hp() - 30.0).abs() < f64::EPSILON);
        assert!((health.heal(50.0) - 30.0).abs() < f64::EPSILON);
        assert_eq!(health.current_hp, 100.0);

        health.take_damage(100.0);
        assert_eq!(health.heal(50.0), 0.0);
    }

    #[test]
    fn test_negative_damage_ignored() {
        let mut health = Health::new(100.0, 0.0, 0.0);
        health.take_damage(-50.0);
        assert_eq!(health.current_hp, 100.0);
        assert!((health.hp_fraction() - 1.0).abs() < f64::EPSILON);
    }
}
