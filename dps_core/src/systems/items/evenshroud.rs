//! Evenshroud - sunders nearby enemies at combat start, bonus resists early

use super::archangels::positive_or;
use super::ItemHandler;
use crate::components::{DebuffKind, EvenshroudEffect, TimedBuff};
use crate::data::{item_names, Item};
use crate::ecs::{Entity, World};
use crate::events::{CombatEvent, DebuffApplication, EventSink, ScheduledEvent};
use crate::systems::targeting::enemies_within;
use tracing::debug;

const DEFAULT_SUNDER_PERCENT: f64 = 30.0;
const DEFAULT_HEX_RANGE: f64 = 2.0;
const DEFAULT_RESIST_DURATION: f64 = 15.0;
/// The aura outlasts any combat
const AURA_DURATION: f64 = 999.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct EvenshroudHandler;

impl ItemHandler for EvenshroudHandler {
    fn api_name(&self) -> &'static str {
        item_names::EVENSHROUD
    }

    fn effect_keys(&self) -> &'static [&'static str] {
        &[
            "ARReductionAmount",
            "HexRange",
            "BonusResists",
            "BonusResistDuration",
        ]
    }

    fn on_equip(&self, entity: Entity, item: &Item, _count: usize, world: &mut World) {
        if world.has::<EvenshroudEffect>(entity) {
            return;
        }
        let effect = EvenshroudEffect {
            sunder_fraction: positive_or(item.effect("ARReductionAmount"), DEFAULT_SUNDER_PERCENT)
                / 100.0,
            hex_range: positive_or(item.effect("HexRange"), DEFAULT_HEX_RANGE),
            bonus_resists: item.effect("BonusResists").max(0.0),
            resist_duration: positive_or(item.effect("BonusResistDuration"), DEFAULT_RESIST_DURATION),
            buff: TimedBuff::default(),
        };
        world.add_component(entity, effect);
    }

    fn on_unequip(&self, entity: Entity, remaining: usize, world: &mut World) {
        if remaining == 0 {
            world.remove::<EvenshroudEffect>(entity);
        }
    }

    fn reset(&self, entity: Entity, world: &mut World) {
        if let Some(effect) = world.get_mut::<EvenshroudEffect>(entity) {
            effect.buff.reset();
        }
    }

    fn on_combat_start(&self, entity: Entity, world: &mut World, sink: &mut EventSink<'_>) {
        if !world.is_alive(entity) {
            return;
        }
        let now = sink.now();
        let Some(effect) = world.get_mut::<EvenshroudEffect>(entity) else {
            return;
        };
        let (sunder, range, duration) = (effect.sunder_fraction, effect.hex_range, effect.resist_duration);
        let activation = effect.buff.activate(now, duration);
        sink.enqueue_now(CombatEvent::RecalculateStats { entity });
        sink.enqueue(
            now + duration,
            CombatEvent::ItemBuffExpired {
                entity,
                item: item_names::EVENSHROUD,
                activation,
            },
        );

        let targets = enemies_within(world, entity, range);
        debug!("{entity}: Evenshroud sunders {} enemies", targets.len());
        for target in targets {
            sink.enqueue_now(CombatEvent::ApplyDebuff(DebuffApplication {
                target,
                source: entity,
                kind: DebuffKind::Sunder,
                value: sunder,
                duration: AURA_DURATION,
                origin: item_names::EVENSHROUD,
            }));
        }
    }

    fn handle_event(
        &self,
        entity: Entity,
        event: &ScheduledEvent,
        world: &mut World,
        sink: &mut EventSink<'_>,
    ) {
        let CombatEvent::ItemBuffExpired {
            entity: holder,
            item,
            activation,
        } = event.event
        else {
            return;
        };
        if holder != entity || item != item_names::EVENSHROUD {
            return;
        }
        let expired = world
            .get_mut::<EvenshroudEffect>(entity)
            .is_some_and(|effect| effect.buff.expire(activation));
        if expired {
            debug!("{entity}: Evenshroud resists end at t={:.2}", sink.now());
            sink.enqueue_now(CombatEvent::RecalculateStats { entity });
        }
    }

    fn is_event_based(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Health, Position, Team};
    use crate::events::{EventKind, EventQueue};

    fn unit(world: &mut World, team: u8, x: f64) -> Entity {
        let e = world.create_entity();
        world.add_component(e, Team::new(team));
        world.add_component(e, Position::new(x, 0.0));
        world.add_component(e, Health::new(1000.0, 40.0, 40.0));
        e
    }

    #[test]
    fn test_combat_start_sunders_nearby_enemies() {
        let mut world = World::new();
        let holder = unit(&mut world, 0, 0.0);
        let near = unit(&mut world, 1, 1.0);
        let _far = unit(&mut world, 1, 4.0);
        let item = Item::new(item_names::EVENSHROUD)
            .with_effect("ARReductionAmount", 30.0)
            .with_effect("HexRange", 2.0)
            .with_effect("BonusResists", 25.0)
            .with_effect("BonusResistDuration", 10.0);
        EvenshroudHandler.on_equip(holder, &item, 1, &mut world);

        let mut queue = EventQueue::new();
        {
            let mut sink = EventSink::new(&mut queue, 0.0);
            EvenshroudHandler.on_combat_start(holder, &mut world, &mut sink);
        }
        assert!(world.get::<EvenshroudEffect>(holder).unwrap().buff.is_active);

        let events: Vec<ScheduledEvent> = std::iter::from_fn(|| queue.pop_due(20.0)).collect();
        let sundered: Vec<Entity> = events
            .iter()
            .filter_map(|s| match s.event {
                CombatEvent::ApplyDebuff(debuff) if debuff.kind == DebuffKind::Sunder => {
                    Some(debuff.target)
                }
                _ => None,
            })
            .collect();
        assert_eq!(sundered, vec![near]);

        let expiry = events
            .iter()
            .find(|s| s.event.kind() == EventKind::ItemBuffExpired)
            .unwrap();
        assert!((expiry.timestamp - 10.0).abs() < 1e-9);
        let mut queue = EventQueue::new();
        let mut sink = EventSink::new(&mut queue, 10.0);
        EvenshroudHandler.handle_event(holder, expiry, &mut world, &mut sink);
        assert!(!world.get::<EvenshroudEffect>(holder).unwrap().buff.is_active);
    }
}
