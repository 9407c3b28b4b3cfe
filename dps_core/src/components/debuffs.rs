//! Debuffs - timed negative effects placed on enemies
//!
//! A unit holds at most one debuff of each kind. Re-applying keeps the
//! stronger value; an equal value only pushes the end time back.

use crate::bonus::{BonusAccumulator, BonusSource};
use crate::ecs::{Component, Entity};
use crate::types::TIME_EPSILON;
use serde::{Deserialize, Serialize};

/// Debuff variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DebuffKind {
    /// Percent max HP as true damage every second
    Burn,
    /// Reduced healing received
    Wound,
    /// Reduced magic resist
    Shred,
    /// Reduced armor
    Sunder,
}

/// Strength, lifetime and origin of one debuff
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebuffTimer {
    pub value: f64,
    pub duration: f64,
    pub end_time: f64,
    pub source: Entity,
    pub origin: String,
}

impl DebuffTimer {
    pub fn new(value: f64, duration: f64, now: f64, source: Entity, origin: &str) -> Self {
        DebuffTimer {
            value,
            duration,
            end_time: now + duration,
            source,
            origin: origin.to_string(),
        }
    }

    pub fn is_active(&self, now: f64) -> bool {
        now + TIME_EPSILON < self.end_time
    }

    /// Merge a new application. Returns true if value or end time changed.
    pub fn merge(&mut self, incoming: DebuffTimer) -> bool {
        if incoming.value > self.value {
            *self = incoming;
            true
        } else if incoming.value == self.value && incoming.end_time > self.end_time {
            self.end_time = incoming.end_time;
            self.duration = incoming.duration;
            true
        } else {
            false
        }
    }
}

/// A debuff component. One store per kind.
pub trait Debuff: Component + Sized {
    const DEBUFF: DebuffKind;

    fn from_timer(timer: DebuffTimer) -> Self;
    fn timer(&self) -> &DebuffTimer;
    fn timer_mut(&mut self) -> &mut DebuffTimer;
}

macro_rules! debuff_component {
    ($(#[$doc:meta])* $name:ident => $kind:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        pub struct $name {
            pub timer: DebuffTimer,
        }

        impl Debuff for $name {
            const DEBUFF: DebuffKind = DebuffKind::$kind;

            fn from_timer(timer: DebuffTimer) -> Self {
                $name { timer }
            }

            fn timer(&self) -> &DebuffTimer {
                &self.timer
            }

            fn timer_mut(&mut self) -> &mut DebuffTimer {
                &mut self.timer
            }
        }
    };
}

debuff_component!(
    /// Burn: `value` is the fraction of max HP dealt per tick
    BurnEffect => Burn
);
debuff_component!(
    /// Wound: `value` is the fraction of healing removed
    WoundEffect => Wound
);
debuff_component!(
    /// Shred: `value` is the fraction of magic resist removed
    ShredEffect => Shred
);
debuff_component!(
    /// Sunder: `value` is the fraction of armor removed
    SunderEffect => Sunder
);

impl BonusSource for ShredEffect {
    fn id(&self) -> &str {
        "shred"
    }

    fn apply(&self, bonuses: &mut BonusAccumulator) {
        bonuses.mr_reduction = bonuses.mr_reduction.max(self.timer.value);
    }
}

impl BonusSource for SunderEffect {
    fn id(&self) -> &str {
        "sunder"
    }

    fn apply(&self, bonuses: &mut BonusAccumulator) {
        bonuses.armor_reduction = bonuses.armor_reduction.max(self.timer.value);
    }
}

impl WoundEffect {
    /// Healing left after the reduction
    pub fn reduce(&self, amount: f64) -> f64 {
        amount * (1.0 - self.timer.value.clamp(0.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::World;

    fn source() -> Entity {
        World::new().create_entity()
    }

    #[test]
    fn test_stronger_replaces() {
        let mut timer = DebuffTimer::new(0.2, 3.0, 0.0, source(), "a");
        assert!(timer.merge(DebuffTimer::new(0.3, 1.0, 1.0, source(), "b")));
        assert!((timer.value - 0.3).abs() < f64::EPSILON);
        assert!((timer.end_time - 2.0).abs() < f64::EPSILON);
        assert_eq!(timer.origin, "b");
    }

    #[test]
    fn test_weaker_ignored_equal_extends() {
        let mut timer = DebuffTimer::new(0.3, 3.0, 0.0, source(), "a");
        assert!(!timer.merge(DebuffTimer::new(0.1, 10.0, 1.0, source(), "b")));
        assert!((timer.end_time - 3.0).abs() < f64::EPSILON);

        assert!(timer.merge(DebuffTimer::new(0.3, 3.0, 2.0, source(), "c")));
        assert!((timer.end_time - 5.0).abs() < f64::EPSILON);
        assert_eq!(timer.origin, "a");

        // Same strength ending sooner changes nothing
        assert!(!timer.merge(DebuffTimer::new(0.3, 1.0, 2.0, source(), "d")));
    }

    #[test]
    fn test_wound_reduces_healing() {
        let wound = WoundEffect::from_timer(DebuffTimer::new(0.33, 5.0, 0.0, source(), "x"));
        assert!((wound.reduce(100.0) - 67.0).abs() < 1e-9);
        assert!(wound.timer().is_active(4.9));
        assert!(!wound.timer().is_active(5.0));
    }
}
