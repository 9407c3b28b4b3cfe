//! Void Staff - attacks and spells shred magic resist

use super::archangels::positive_or;
use super::red_buff::hit_target;
use super::ItemHandler;
use crate::components::{DebuffKind, VoidStaffEffect};
use crate::data::{item_names, Item};
use crate::ecs::{Entity, World};
use crate::events::{CombatEvent, DebuffApplication, EventSink, ScheduledEvent};

const DEFAULT_SHRED_PERCENT: f64 = 30.0;
const DEFAULT_DURATION: f64 = 3.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct VoidStaffHandler;

impl ItemHandler for VoidStaffHandler {
    fn api_name(&self) -> &'static str {
        item_names::VOID_STAFF
    }

    fn effect_keys(&self) -> &'static [&'static str] {
        &["MRShred", "MRShredDuration"]
    }

    fn on_equip(&self, entity: Entity, item: &Item, _count: usize, world: &mut World) {
        if world.has::<VoidStaffEffect>(entity) {
            return;
        }
        let effect = VoidStaffEffect {
            shred_fraction: positive_or(item.effect("MRShred"), DEFAULT_SHRED_PERCENT) / 100.0,
            duration: positive_or(item.effect("MRShredDuration"), DEFAULT_DURATION),
        };
        world.add_component(entity, effect);
    }

    fn on_unequip(&self, entity: Entity, remaining: usize, world: &mut World) {
        if remaining == 0 {
            world.remove::<VoidStaffEffect>(entity);
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
        if !world.is_alive(target) {
            return;
        }
        let Some(effect) = world.get::<VoidStaffEffect>(entity) else {
            return;
        };
        sink.enqueue_now(CombatEvent::ApplyDebuff(DebuffApplication {
            target,
            source: entity,
            kind: DebuffKind::Shred,
            value: effect.shred_fraction,
            duration: effect.duration,
            origin: item_names::VOID_STAFF,
        }));
    }

    fn is_event_based(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Health;
    use crate::events::EventQueue;

    #[test]
    fn test_spell_shreds_target() {
        let mut world = World::new();
        let holder = world.create_entity();
        let enemy = world.create_entity();
        world.add_component(enemy, Health::new(1000.0, 0.0, 50.0));
        let item = Item::new(item_names::VOID_STAFF)
            .with_effect("MRShred", 30.0)
            .with_effect("MRShredDuration", 3.0);
        VoidStaffHandler.on_equip(holder, &item, 1, &mut world);

        let mut queue = EventQueue::new();
        let mut sink = EventSink::new(&mut queue, 1.5);
        let cast = ScheduledEvent {
            timestamp: 1.5,
            sequence: 0,
            event: CombatEvent::SpellCast {
                source: holder,
                target: Some(enemy),
            },
        };
        VoidStaffHandler.handle_event(holder, &cast, &mut world, &mut sink);
        match queue.pop_due(1.5).map(|s| s.event) {
            Some(CombatEvent::ApplyDebuff(debuff)) => {
                assert_eq!(debuff.kind, DebuffKind::Shred);
                assert_eq!(debuff.target, enemy);
                assert!((debuff.value - 0.3).abs() < 1e-12);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
