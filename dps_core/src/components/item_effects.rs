//! Item effect components
//!
//! `ItemStaticEffect` aggregates the passive stats of all equipped items.
//! The remaining components hold per-entity state for items with dynamic
//! behaviour; each exists exactly while its item is equipped.

use crate::bonus::{BonusAccumulator, BonusSource};
use crate::types::TIME_EPSILON;
use serde::{Deserialize, Serialize};

/// Sum of the passive `effects` entries of every equipped item
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemStaticEffect {
    pub bonus_health: f64,
    pub bonus_percent_hp: f64,
    pub bonus_initial_mana: f64,
    pub bonus_armor: f64,
    pub bonus_mr: f64,
    pub bonus_percent_ad: f64,
    pub bonus_damage_amp: f64,
    pub bonus_ap: f64,
    pub bonus_percent_as: f64,
    pub bonus_crit_chance: f64,
    pub durability: f64,
    pub crit_damage_to_give: f64,
}

impl ItemStaticEffect {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Add one effect entry. Returns false for keys that are not passive stats.
    pub fn add_effect(&mut self, key: &str, value: f64) -> bool {
        match key {
            "Health" => self.bonus_health += value,
            "BonusPercentHP" => self.bonus_percent_hp += value,
            "Mana" => self.bonus_initial_mana += value,
            "Armor" => self.bonus_armor += value,
            "MagicResist" => self.bonus_mr += value,
            "AD" => self.bonus_percent_ad += value,
            "AP" => self.bonus_ap += value,
            // Percent values in the data
            "AS" => self.bonus_percent_as += value / 100.0,
            "CritChance" => self.bonus_crit_chance += value / 100.0,
            "BonusDamage" => self.bonus_damage_amp += value,
            "CritDamageToGive" => self.crit_damage_to_give += value,
            "Durability" => self.durability += value,
            _ => return false,
        }
        true
    }
}

impl BonusSource for ItemStaticEffect {
    fn id(&self) -> &str {
        "item_static"
    }

    fn priority(&self) -> i32 {
        -100
    }

    fn apply(&self, bonuses: &mut BonusAccumulator) {
        bonuses.max_hp += self.bonus_health;
        bonuses.percent_hp += self.bonus_percent_hp;
        bonuses.armor += self.bonus_armor;
        bonuses.mr += self.bonus_mr;
        bonuses.durability += self.durability;
        bonuses.percent_ad += self.bonus_percent_ad;
        bonuses.damage_amp += self.bonus_damage_amp;
        bonuses.percent_as += self.bonus_percent_as;
        bonuses.crit_chance += self.bonus_crit_chance;
        bonuses.crit_damage_to_give += self.crit_damage_to_give;
        bonuses.initial_mana += self.bonus_initial_mana;
        bonuses.ap += self.bonus_ap;
    }
}

/// Archangel's Staff: gains AP every interval of combat time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchangelsStaffEffect {
    pub timer: f64,
    pub stacks: u32,
    pub interval: f64,
    pub ap_per_interval: f64,
    /// Number of staves equipped
    pub item_count: u32,
}

impl ArchangelsStaffEffect {
    pub fn new(interval: f64, ap_per_interval: f64) -> Self {
        ArchangelsStaffEffect {
            timer: 0.0,
            stacks: 0,
            interval,
            ap_per_interval,
            item_count: 1,
        }
    }

    pub fn reset(&mut self) {
        self.timer = 0.0;
        self.stacks = 0;
    }

    /// Advance the timer; returns the number of intervals crossed
    pub fn tick(&mut self, dt: f64) -> u32 {
        if self.interval <= 0.0 {
            return 0;
        }
        self.timer += dt;
        let mut crossed = 0;
        while self.timer + TIME_EPSILON >= self.interval {
            self.timer -= self.interval;
            crossed += 1;
        }
        self.stacks += crossed;
        crossed
    }

    /// AP applied across all equipped staves
    pub fn bonus_ap(&self) -> f64 {
        f64::from(self.item_count) * f64::from(self.stacks) * self.ap_per_interval
    }
}

impl BonusSource for ArchangelsStaffEffect {
    fn id(&self) -> &str {
        "archangels_staff"
    }

    fn apply(&self, bonuses: &mut BonusAccumulator) {
        bonuses.ap += self.bonus_ap();
    }
}

/// Quicksilver: periodic attack speed procs while the spell shield lasts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuicksilverEffect {
    pub spell_shield_duration: f64,
    pub remaining_duration: f64,
    pub is_active: bool,
    pub proc_timer: f64,
    pub proc_interval: f64,
    pub proc_attack_speed: f64,
    pub stacks: u32,
    pub current_bonus_as: f64,
}

impl QuicksilverEffect {
    pub fn new(duration: f64, proc_interval: f64, proc_attack_speed: f64) -> Self {
        QuicksilverEffect {
            spell_shield_duration: duration,
            remaining_duration: duration,
            is_active: duration > 0.0,
            proc_timer: 0.0,
            proc_interval,
            proc_attack_speed,
            stacks: 0,
            current_bonus_as: 0.0,
        }
    }

    /// Restart for a new combat
    pub fn reset(&mut self) {
        self.remaining_duration = self.spell_shield_duration;
        self.is_active = self.spell_shield_duration > 0.0;
        self.proc_timer = 0.0;
        self.stacks = 0;
        self.current_bonus_as = 0.0;
    }

    /// Advance one tick; returns the stacks gained. Procs are counted before
    /// the duration is decremented, so a proc landing on the expiry tick counts.
    pub fn tick(&mut self, dt: f64) -> u32 {
        if !self.is_active {
            return 0;
        }
        let mut gained = 0;
        if self.proc_interval > 0.0 {
            self.proc_timer += dt;
            while self.proc_timer + TIME_EPSILON >= self.proc_interval {
                self.proc_timer -= self.proc_interval;
                gained += 1;
            }
        }
        self.stacks += gained;
        self.current_bonus_as += f64::from(gained) * self.proc_attack_speed;

        self.remaining_duration -= dt;
        if self.remaining_duration <= TIME_EPSILON {
            self.remaining_duration = 0.0;
            self.is_active = false;
        }
        gained
    }
}

impl BonusSource for QuicksilverEffect {
    fn id(&self) -> &str {
        "quicksilver"
    }

    fn apply(&self, bonuses: &mut BonusAccumulator) {
        // Stacks persist after the shield expires
        bonuses.percent_as += self.current_bonus_as;
    }
}

/// Outcome of a Titan's Resolve trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackOutcome {
    pub added: bool,
    pub reached_max: bool,
}

/// Titan's Resolve: stacking AD/AP, bonus resists once at the cap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitansResolveEffect {
    pub current_stacks: u32,
    pub max_stacks: u32,
    pub ad_per_stack: f64,
    pub ap_per_stack: f64,
    pub bonus_armor: f64,
    pub bonus_mr: f64,
    pub is_max: bool,
    pub bonus_resists_applied: bool,
}

impl TitansResolveEffect {
    pub fn new(max_stacks: u32, ad_per_stack: f64, ap_per_stack: f64, bonus_resists: f64) -> Self {
        TitansResolveEffect {
            current_stacks: 0,
            max_stacks,
            ad_per_stack,
            ap_per_stack,
            bonus_armor: bonus_resists,
            bonus_mr: bonus_resists,
            is_max: false,
            bonus_resists_applied: false,
        }
    }

    pub fn reset(&mut self) {
        self.current_stacks = 0;
        self.is_max = false;
        self.bonus_resists_applied = false;
    }

    /// Add a stack if below the cap. Resists are granted on the stack that
    /// reaches the cap and never again.
    pub fn add_stack(&mut self) -> StackOutcome {
        if self.current_stacks >= self.max_stacks {
            return StackOutcome {
                added: false,
                reached_max: false,
            };
        }
        self.current_stacks += 1;
        let reached_max = self.current_stacks == self.max_stacks;
        if reached_max {
            self.is_max = true;
            if !self.bonus_resists_applied {
                self.bonus_resists_applied = true;
            }
        }
        StackOutcome {
            added: true,
            reached_max,
        }
    }
}

impl BonusSource for TitansResolveEffect {
    fn id(&self) -> &str {
        "titans_resolve"
    }

    fn apply(&self, bonuses: &mut BonusAccumulator) {
        let stacks = f64::from(self.current_stacks);
        bonuses.percent_ad += stacks * self.ad_per_stack;
        bonuses.ap += stacks * self.ap_per_stack;
        if self.bonus_resists_applied {
            bonuses.armor += self.bonus_armor;
            bonuses.mr += self.bonus_mr;
        }
    }
}

/// Guinsoo's Rageblade: attack speed per attack, unbounded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuinsoosRagebladeEffect {
    pub stacks: u32,
    pub as_per_stack: f64,
    pub current_bonus_as: f64,
    /// Number of Rageblades equipped
    pub item_count: u32,
}

impl GuinsoosRagebladeEffect {
    pub fn new(as_per_stack: f64) -> Self {
        GuinsoosRagebladeEffect {
            stacks: 0,
            as_per_stack,
            current_bonus_as: 0.0,
            item_count: 1,
        }
    }

    pub fn reset(&mut self) {
        self.stacks = 0;
        self.current_bonus_as = 0.0;
    }

    /// One stack per equipped blade; returns the attack speed delta
    pub fn on_attack(&mut self) -> f64 {
        let old = self.stacks;
        self.stacks += self.item_count;
        let delta = f64::from(self.stacks - old) * self.as_per_stack;
        self.current_bonus_as += delta;
        delta
    }
}

impl BonusSource for GuinsoosRagebladeEffect {
    fn id(&self) -> &str {
        "guinsoos_rageblade"
    }

    fn apply(&self, bonuses: &mut BonusAccumulator) {
        bonuses.percent_as += self.current_bonus_as;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_key_mapping() {
        let mut effect = ItemStaticEffect::new();
        assert!(effect.add_effect("AS", 10.0));
        assert!(effect.add_effect("CritChance", 20.0));
        assert!(effect.add_effect("AD", 0.35));
        assert!(!effect.add_effect("StackCap", 25.0));

        assert!((effect.bonus_percent_as - 0.1).abs() < 1e-9);
        assert!((effect.bonus_crit_chance - 0.2).abs() < 1e-9);
        assert!((effect.bonus_percent_ad - 0.35).abs() < 1e-9);
    }

    #[test]
    fn test_archangel_interval_crossing() {
        let mut effect = ArchangelsStaffEffect::new(5.0, 30.0);
        for _ in 0..110 {
            effect.tick(0.1);
        }
        assert_eq!(effect.stacks, 2);
        effect.item_count = 3;
        assert!((effect.bonus_ap() - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_quicksilver_expires_and_keeps_stacks() {
        let mut effect = QuicksilverEffect::new(18.0, 2.0, 0.03);
        for _ in 0..179 {
            effect.tick(0.1);
        }
        assert!(effect.is_active);
        assert_eq!(effect.stacks, 8);

        effect.tick(0.1);
        assert!(!effect.is_active);
        assert_eq!(effect.stacks, 9);

        for _ in 0..50 {
            effect.tick(0.1);
        }
        assert_eq!(effect.stacks, 9);
        assert!((effect.current_bonus_as - 0.27).abs() < 1e-9);
    }

    #[test]
    fn test_titans_cap() {
        let mut effect = TitansResolveEffect::new(2, 0.02, 10.0, 20.0);
        assert!(!effect.add_stack().reached_max);
        let second = effect.add_stack();
        assert!(second.added && second.reached_max);
        assert!(effect.bonus_resists_applied);

        let third = effect.add_stack();
        assert!(!third.added);
        assert_eq!(effect.current_stacks, 2);
    }

    #[test]
    fn test_guinsoo_scales_with_count() {
        let mut effect = GuinsoosRagebladeEffect::new(0.07);
        effect.item_count = 2;
        let delta = effect.on_attack();
        assert!((delta - 0.14).abs() < 1e-9);
        assert_eq!(effect.stacks, 2);
    }
}
