//! Proc item components - on-hit, on-cast, on-takedown and aura items
//!
//! Timed buffs (Blue Buff, Nashor's Tooth, Evenshroud) carry an activation
//! counter. Each activation schedules its own expiry; an expiry whose
//! counter is behind the current one belongs to a refreshed buff and is
//! ignored.

use crate::bonus::{BonusAccumulator, BonusSource};
use crate::types::TIME_EPSILON;
use serde::{Deserialize, Serialize};

/// On/off buff refreshed by re-activation
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TimedBuff {
    pub is_active: bool,
    pub active_until: f64,
    pub activation: u32,
}

impl TimedBuff {
    /// Start or refresh the buff; returns the activation to expire later
    pub fn activate(&mut self, now: f64, duration: f64) -> u32 {
        self.activation += 1;
        self.is_active = true;
        self.active_until = now + duration;
        self.activation
    }

    /// End the buff if `activation` is the latest one. Returns true if it ended.
    pub fn expire(&mut self, activation: u32) -> bool {
        if !self.is_active || activation != self.activation {
            return false;
        }
        self.is_active = false;
        true
    }

    pub fn reset(&mut self) {
        *self = TimedBuff::default();
    }
}

/// Blue Buff: mana back after each cast, damage amp after a takedown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlueBuffEffect {
    pub mana_refund: f64,
    pub damage_amp: f64,
    pub takedown_duration: f64,
    pub buff: TimedBuff,
}

impl BlueBuffEffect {
    pub fn new(mana_refund: f64, damage_amp: f64, takedown_duration: f64) -> Self {
        BlueBuffEffect {
            mana_refund,
            damage_amp,
            takedown_duration,
            buff: TimedBuff::default(),
        }
    }
}

impl BonusSource for BlueBuffEffect {
    fn id(&self) -> &str {
        "blue_buff"
    }

    fn apply(&self, bonuses: &mut BonusAccumulator) {
        if self.buff.is_active {
            bonuses.damage_amp += self.damage_amp;
        }
    }
}

/// Red Buff: attacks and spells burn and wound the target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedBuffEffect {
    /// Fraction of max HP per burn tick
    pub burn_fraction: f64,
    pub wound_fraction: f64,
    pub duration: f64,
}

/// Spear of Shojin: flat mana per attack, per copy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpearOfShojinEffect {
    pub mana_per_attack: f64,
    pub item_count: u32,
}

impl SpearOfShojinEffect {
    pub fn mana_per_attack_total(&self) -> f64 {
        self.mana_per_attack * f64::from(self.item_count)
    }
}

/// Navori Flickerblade: attack speed every attack, AD and AP every few attacks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlickerbladeEffect {
    pub as_per_stack: f64,
    pub ad_per_bonus: f64,
    pub ap_per_bonus: f64,
    pub stacks_per_bonus: u32,
    pub item_count: u32,
    pub attacks: u32,
    pub bonus_as: f64,
    pub bonus_ad: f64,
    pub bonus_ap: f64,
}

impl FlickerbladeEffect {
    pub fn new(as_per_stack: f64, ad_per_bonus: f64, ap_per_bonus: f64, stacks_per_bonus: u32) -> Self {
        FlickerbladeEffect {
            as_per_stack,
            ad_per_bonus,
            ap_per_bonus,
            stacks_per_bonus: stacks_per_bonus.max(1),
            item_count: 1,
            attacks: 0,
            bonus_as: 0.0,
            bonus_ad: 0.0,
            bonus_ap: 0.0,
        }
    }

    pub fn reset(&mut self) {
        self.attacks = 0;
        self.bonus_as = 0.0;
        self.bonus_ad = 0.0;
        self.bonus_ap = 0.0;
    }

    /// Count one attack; returns true when it completed an AD/AP bonus
    pub fn on_attack(&mut self) -> bool {
        let copies = f64::from(self.item_count);
        self.attacks += 1;
        self.bonus_as += self.as_per_stack * copies;
        if self.attacks % self.stacks_per_bonus != 0 {
            return false;
        }
        self.bonus_ad += self.ad_per_bonus * copies;
        self.bonus_ap += self.ap_per_bonus * copies;
        true
    }
}

impl BonusSource for FlickerbladeEffect {
    fn id(&self) -> &str {
        "flickerblade"
    }

    fn apply(&self, bonuses: &mut BonusAccumulator) {
        bonuses.percent_as += self.bonus_as;
        bonuses.percent_ad += self.bonus_ad;
        bonuses.ap += self.bonus_ap;
    }
}

/// Nashor's Tooth: attack speed for a while after each cast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NashorsToothEffect {
    pub attack_speed: f64,
    pub duration: f64,
    pub item_count: u32,
    pub buff: TimedBuff,
}

impl NashorsToothEffect {
    pub fn new(attack_speed: f64, duration: f64) -> Self {
        NashorsToothEffect {
            attack_speed,
            duration,
            item_count: 1,
            buff: TimedBuff::default(),
        }
    }
}

impl BonusSource for NashorsToothEffect {
    fn id(&self) -> &str {
        "nashors_tooth"
    }

    fn apply(&self, bonuses: &mut BonusAccumulator) {
        if self.buff.is_active {
            bonuses.percent_as += self.attack_speed * f64::from(self.item_count);
        }
    }
}

/// Void Staff: attacks and spells shred the target's magic resist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoidStaffEffect {
    pub shred_fraction: f64,
    pub duration: f64,
}

/// Spirit Visage: periodic heal scaled by missing HP
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpiritVisageEffect {
    pub missing_hp_fraction: f64,
    pub interval: f64,
    /// Smallest heal per tick and copy
    pub min_heal: f64,
    pub timer: f64,
    pub item_count: u32,
}

impl SpiritVisageEffect {
    pub fn new(missing_hp_fraction: f64, interval: f64, min_heal: f64) -> Self {
        SpiritVisageEffect {
            missing_hp_fraction,
            interval,
            min_heal,
            timer: 0.0,
            item_count: 1,
        }
    }

    pub fn reset(&mut self) {
        self.timer = 0.0;
    }

    /// Advance the timer; returns the number of heal ticks due
    pub fn tick(&mut self, dt: f64) -> u32 {
        if self.interval <= 0.0 {
            return 0;
        }
        self.timer += dt;
        let mut due = 0;
        while self.timer + TIME_EPSILON >= self.interval {
            self.timer -= self.interval;
            due += 1;
        }
        due
    }

    /// Heal for one tick at the given missing HP, before wounds
    pub fn heal_amount(&self, missing_hp: f64) -> f64 {
        if missing_hp <= 0.0 {
            return 0.0;
        }
        (missing_hp * self.missing_hp_fraction).max(self.min_heal) * f64::from(self.item_count)
    }
}

/// Kraken's Fury: AD stacks on every attack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KrakensFuryEffect {
    pub ad_per_stack: f64,
    pub stacks: u32,
}

impl KrakensFuryEffect {
    pub fn new(ad_per_stack: f64) -> Self {
        KrakensFuryEffect {
            ad_per_stack,
            stacks: 0,
        }
    }
}

impl BonusSource for KrakensFuryEffect {
    fn id(&self) -> &str {
        "krakens_fury"
    }

    fn apply(&self, bonuses: &mut BonusAccumulator) {
        bonuses.percent_ad += f64::from(self.stacks) * self.ad_per_stack;
    }
}

/// Evenshroud: sunders nearby enemies at combat start and grants resists
/// for the opening seconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvenshroudEffect {
    pub sunder_fraction: f64,
    pub hex_range: f64,
    pub bonus_resists: f64,
    pub resist_duration: f64,
    pub buff: TimedBuff,
}

impl BonusSource for EvenshroudEffect {
    fn id(&self) -> &str {
        "evenshroud"
    }

    fn apply(&self, bonuses: &mut BonusAccumulator) {
        if self.buff.is_active {
            bonuses.armor += self.bonus_resists;
            bonuses.mr += self.bonus_resists;
        }
    }
}
