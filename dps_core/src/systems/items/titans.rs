//! Titan's Resolve - stacks when attacking or taking damage

use super::archangels::positive_or;
use super::ItemHandler;
use crate::components::TitansResolveEffect;
use crate::data::{item_names, Item};
use crate::ecs::{Entity, World};
use crate::events::{CombatEvent, EventSink, ScheduledEvent};
use tracing::{debug, info};

const DEFAULT_STACK_CAP: f64 = 25.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct TitansResolveHandler;

impl TitansResolveHandler {
    fn trigger(&self, entity: Entity, world: &mut World, sink: &mut EventSink<'_>) {
        if !world.is_alive(entity) {
            return;
        }
        let Some(effect) = world.get_mut::<TitansResolveEffect>(entity) else {
            return;
        };
        let outcome = effect.add_stack();
        if !outcome.added {
            return;
        }
        if outcome.reached_max {
            info!("{entity}: Titan's Resolve fully stacked at t={:.2}", sink.now());
        } else {
            debug!("{entity}: Titan's Resolve stack {}", effect.current_stacks);
        }
        sink.enqueue_now(CombatEvent::RecalculateStats { entity });
    }
}

impl ItemHandler for TitansResolveHandler {
    fn api_name(&self) -> &'static str {
        item_names::TITANS_RESOLVE
    }

    fn effect_keys(&self) -> &'static [&'static str] {
        &[
            "StackCap",
            "StackingAD",
            "StackingSP",
            "BonusResistsAtStackCap",
            "BonusResistsAtCap",
        ]
    }

    fn on_equip(&self, entity: Entity, item: &Item, _count: usize, world: &mut World) {
        if world.has::<TitansResolveEffect>(entity) {
            return;
        }
        let resists = item
            .effects
            .get("BonusResistsAtStackCap")
            .or_else(|| item.effects.get("BonusResistsAtCap"))
            .copied()
            .unwrap_or(0.0);
        let effect = TitansResolveEffect::new(
            positive_or(item.effect("StackCap"), DEFAULT_STACK_CAP).round() as u32,
            item.effect("StackingAD"),
            item.effect("StackingSP"),
            resists,
        );
        world.add_component(entity, effect);
    }

    fn on_unequip(&self, entity: Entity, remaining: usize, world: &mut World) {
        if remaining == 0 {
            world.remove::<TitansResolveEffect>(entity);
        }
    }

    fn reset(&self, entity: Entity, world: &mut World) {
        if let Some(effect) = world.get_mut::<TitansResolveEffect>(entity) {
            effect.reset();
        }
    }

    fn handle_event(
        &self,
        entity: Entity,
        event: &ScheduledEvent,
        world: &mut World,
        sink: &mut EventSink<'_>,
    ) {
        let triggered = match &event.event {
            CombatEvent::AttackLanded { source, .. } => *source == entity,
            CombatEvent::DamageApplied(damage) => damage.target == entity,
            _ => false,
        };
        if triggered {
            self.trigger(entity, world, sink);
        }
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
    fn test_stacks_from_attacks_and_hits() {
        let mut world = World::new();
        let e = world.create_entity();
        let other = world.create_entity();
        world.add_component(e, Health::new(1000.0, 0.0, 0.0));
        let item = Item::new(item_names::TITANS_RESOLVE)
            .with_effect("StackCap", 2.0)
            .with_effect("StackingAD", 0.02)
            .with_effect("StackingSP", 10.0)
            .with_effect("BonusResistsAtCap", 20.0);
        TitansResolveHandler.on_equip(e, &item, 1, &mut world);

        let mut queue = EventQueue::new();
        let mut sink = EventSink::new(&mut queue, 1.0);
        let landed = ScheduledEvent {
            timestamp: 1.0,
            sequence: 0,
            event: CombatEvent::AttackLanded {
                source: e,
                target: other,
                base_damage: 50.0,
            },
        };
        TitansResolveHandler.handle_event(e, &landed, &mut world, &mut sink);
        let hit = ScheduledEvent {
            timestamp: 1.0,
            sequence: 1,
            event: CombatEvent::AttackLanded {
                source: other,
                target: e,
                base_damage: 50.0,
            },
        };
        // Being the target of an attack does not count, only damage does
        TitansResolveHandler.handle_event(e, &hit, &mut world, &mut sink);
        assert_eq!(world.get::<TitansResolveEffect>(e).unwrap().current_stacks, 1);

        TitansResolveHandler.handle_event(e, &landed, &mut world, &mut sink);
        TitansResolveHandler.handle_event(e, &landed, &mut world, &mut sink);
        let effect = world.get::<TitansResolveEffect>(e).unwrap();
        assert_eq!(effect.current_stacks, 2);
        assert!(effect.bonus_resists_applied);
        assert!((effect.bonus_armor - 20.0).abs() < 1e-9);
        assert_eq!(queue.len(), 2);
    }
}
