//! Red Buff - attacks and spells burn and wound the target

use super::archangels::positive_or;
use super::ItemHandler;
use crate::components::{DebuffKind, RedBuffEffect};
use crate::data::{item_names, Item};
use crate::ecs::{Entity, World};
use crate::events::{CombatEvent, DebuffApplication, EventSink, ScheduledEvent};

const DEFAULT_BURN_PERCENT: f64 = 1.0;
const DEFAULT_WOUND_PERCENT: f64 = 33.0;
const DEFAULT_DURATION: f64 = 5.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct RedBuffHandler;

impl ItemHandler for RedBuffHandler {
    fn api_name(&self) -> &'static str {
        item_names::RED_BUFF
    }

    fn effect_keys(&self) -> &'static [&'static str] {
        &["BurnPercent", "HealingReductionPct", "Duration"]
    }

    fn on_equip(&self, entity: Entity, item: &Item, _count: usize, world: &mut World) {
        if world.has::<RedBuffEffect>(entity) {
            return;
        }
        // Percent in the data
        let effect = RedBuffEffect {
            burn_fraction: positive_or(item.effect("BurnPercent"), DEFAULT_BURN_PERCENT) / 100.0,
            wound_fraction: positive_or(item.effect("HealingReductionPct"), DEFAULT_WOUND_PERCENT)
                / 100.0,
            duration: positive_or(item.effect("Duration"), DEFAULT_DURATION),
        };
        world.add_component(entity, effect);
    }

    fn on_unequip(&self, entity: Entity, remaining: usize, world: &mut World) {
        if remaining == 0 {
            world.remove::<RedBuffEffect>(entity);
        }
    }

    fn handle_event(
        &self,
        entity: Entity,
        event: &ScheduledEvent,
        world: &mut World,
        sink: &mut EventSink<'_>,
    ) {
        let Some(target) = hit_target(entity, &event.event) else {
            return;
        };
        if !world.is_alive(entity) || !world.is_alive(target) {
            return;
        }
        let Some(effect) = world.get::<RedBuffEffect>(entity) else {
            return;
        };
        for (kind, value) in [
            (DebuffKind::Burn, effect.burn_fraction),
            (DebuffKind::Wound, effect.wound_fraction),
        ] {
            sink.enqueue_now(CombatEvent::ApplyDebuff(DebuffApplication {
                target,
                source: entity,
                kind,
                value,
                duration: effect.duration,
                origin: item_names::RED_BUFF,
            }));
        }
    }

    fn is_event_based(&self) -> bool {
        true
    }
}

/// Target of an attack or spell by `holder`
pub(super) fn hit_target(holder: Entity, event: &CombatEvent) -> Option<Entity> {
    match *event {
        CombatEvent::AttackLanded { source, target, .. } if source == holder => Some(target),
        CombatEvent::SpellCast { source, target } if source == holder => target,
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Health;
    use crate::events::EventQueue;

    #[test]
    fn test_attack_applies_burn_and_wound() {
        let mut world = World::new();
        let holder = world.create_entity();
        let enemy = world.create_entity();
        for e in [holder, enemy] {
            world.add_component(e, Health::new(1000.0, 0.0, 0.0));
        }
        RedBuffHandler.on_equip(holder, &Item::new(item_names::RED_BUFF), 1, &mut world);

        let mut queue = EventQueue::new();
        let mut sink = EventSink::new(&mut queue, 2.0);
        let landed = ScheduledEvent {
            timestamp: 2.0,
            sequence: 0,
            event: CombatEvent::AttackLanded {
                source: holder,
                target: enemy,
                base_damage: 50.0,
            },
        };
        RedBuffHandler.handle_event(holder, &landed, &mut world, &mut sink);
        // Being hit by the holder's enemy does nothing
        RedBuffHandler.handle_event(enemy, &landed, &mut world, &mut sink);

        let mut applied = Vec::new();
        while let Some(scheduled) = queue.pop_due(2.0) {
            if let CombatEvent::ApplyDebuff(debuff) = scheduled.event {
                applied.push(debuff);
            }
        }
        assert_eq!(applied.len(), 2);
        assert_eq!(applied[0].kind, DebuffKind::Burn);
        assert!((applied[0].value - 0.01).abs() < 1e-12);
        assert_eq!(applied[1].kind, DebuffKind::Wound);
        assert!((applied[1].value - 0.33).abs() < 1e-12);
        assert!(applied.iter().all(|d| d.target == enemy && (d.duration - 5.0).abs() < 1e-12));
    }

    #[test]
    fn test_untargeted_spell_ignored() {
        let holder = World::new().create_entity();
        let cast = CombatEvent::SpellCast {
            source: holder,
            target: None,
        };
        assert_eq!(hit_target(holder, &cast), None);
    }
}
