//! BonusAccumulator - Collects bonus stats before they are written to components

use crate::components::{Attack, Crit, Health, Mana, Spell};
use serde::{Deserialize, Serialize};

/// Sum of all bonus contributions for one entity.
///
/// Built fresh every stat pass, so bonus fields never carry over from a
/// previous pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BonusAccumulator {
    // === Health ===
    pub max_hp: f64,
    pub percent_hp: f64,
    pub armor: f64,
    pub mr: f64,
    pub durability: f64,
    /// Fraction of armor removed (sunder); strongest source wins
    pub armor_reduction: f64,
    /// Fraction of magic resist removed (shred); strongest source wins
    pub mr_reduction: f64,

    // === Attack ===
    pub ad: f64,
    pub percent_ad: f64,
    pub percent_as: f64,
    pub range: f64,
    pub damage_amp: f64,

    // === Crit ===
    pub crit_chance: f64,
    pub crit_multiplier: f64,
    pub crit_damage_to_give: f64,

    // === Mana / Spell ===
    pub initial_mana: f64,
    pub ap: f64,
}

impl BonusAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add another accumulator field by field
    pub fn merge(&mut self, other: &BonusAccumulator) {
        self.max_hp += other.max_hp;
        self.percent_hp += other.percent_hp;
        self.armor += other.armor;
        self.mr += other.mr;
        self.durability += other.durability;
        self.armor_reduction = self.armor_reduction.max(other.armor_reduction);
        self.mr_reduction = self.mr_reduction.max(other.mr_reduction);
        self.ad += other.ad;
        self.percent_ad += other.percent_ad;
        self.percent_as += other.percent_as;
        self.range += other.range;
        self.damage_amp += other.damage_amp;
        self.crit_chance += other.crit_chance;
        self.crit_multiplier += other.crit_multiplier;
        self.crit_damage_to_give += other.crit_damage_to_give;
        self.initial_mana += other.initial_mana;
        self.ap += other.ap;
    }

    /// Overwrite every bonus field of the stat components
    pub fn write_to(
        &self,
        health: &mut Health,
        attack: &mut Attack,
        crit: Option<&mut Crit>,
        mana: &mut Mana,
        spell: Option<&mut Spell>,
    ) {
        health.bonus_max_hp = self.max_hp;
        health.bonus_percent_hp = self.percent_hp;
        health.bonus_armor = self.armor;
        health.bonus_mr = self.mr;
        health.bonus_durability = self.durability;
        health.armor_reduction = self.armor_reduction;
        health.mr_reduction = self.mr_reduction;

        attack.bonus_ad = self.ad;
        attack.bonus_percent_ad = self.percent_ad;
        attack.bonus_percent_as = self.percent_as;
        attack.bonus_range = self.range;
        attack.bonus_damage_amp = self.damage_amp;

        if let Some(crit) = crit {
            crit.bonus_crit_chance = self.crit_chance;
            crit.bonus_crit_multiplier = self.crit_multiplier;
            crit.bonus_crit_damage_to_give = self.crit_damage_to_give;
        }

        mana.bonus_initial = self.initial_mana;

        if let Some(spell) = spell {
            spell.bonus_ap = self.ap;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge() {
        let mut a = BonusAccumulator {
            percent_as: 0.1,
            ap: 20.0,
            ..Default::default()
        };
        let b = BonusAccumulator {
            percent_as: 0.3,
            armor: 20.0,
            mr_reduction: 0.3,
            ..Default::default()
        };
        a.merge(&b);
        a.merge(&BonusAccumulator {
            mr_reduction: 0.2,
            ..Default::default()
        });
        assert!((a.percent_as - 0.4).abs() < 1e-9);
        assert!((a.mr_reduction - 0.3).abs() < f64::EPSILON);
        assert!((a.armor - 20.0).abs() < f64::EPSILON);
        assert!((a.ap - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_write_overwrites_previous_bonus() {
        let mut health = Health::new(1000.0, 0.0, 0.0);
        let mut attack = Attack::new(50.0, 0.7, 1.0);
        let mut mana = Mana::new(60.0, 0.0);
        health.bonus_armor = 99.0;
        attack.bonus_percent_as = 5.0;

        let bonuses = BonusAccumulator {
            armor: 20.0,
            ..Default::default()
        };
        bonuses.write_to(&mut health, &mut attack, None, &mut mana, None);

        assert!((health.bonus_armor - 20.0).abs() < f64::EPSILON);
        assert_eq!(attack.bonus_percent_as, 0.0);
    }
}
