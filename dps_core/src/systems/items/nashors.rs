//! Nashor's Tooth - attack speed for a few seconds after each cast

use super::archangels::positive_or;
use super::ItemHandler;
use crate::components::NashorsToothEffect;
use crate::data::{item_names, Item};
use crate::ecs::{Entity, World};
use crate::events::{CombatEvent, EventSink, ScheduledEvent};
use tracing::debug;

const DEFAULT_ATTACK_SPEED: f64 = 60.0;
const DEFAULT_DURATION: f64 = 5.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct NashorsToothHandler;

impl ItemHandler for NashorsToothHandler {
    fn api_name(&self) -> &'static str {
        item_names::NASHORS_TOOTH
    }

    fn effect_keys(&self) -> &'static [&'static str] {
        &["AttackSpeedToGive", "ASDuration"]
    }

    fn on_equip(&self, entity: Entity, item: &Item, count: usize, world: &mut World) {
        let count = count as u32;
        if let Some(effect) = world.get_mut::<NashorsToothEffect>(entity) {
            effect.item_count = count;
            return;
        }
        let mut effect = NashorsToothEffect::new(
            positive_or(item.effect("AttackSpeedToGive"), DEFAULT_ATTACK_SPEED) / 100.0,
            positive_or(item.effect("ASDuration"), DEFAULT_DURATION),
        );
        effect.item_count = count;
        world.add_component(entity, effect);
    }

    fn on_unequip(&self, entity: Entity, remaining: usize, world: &mut World) {
        if remaining == 0 {
            world.remove::<NashorsToothEffect>(entity);
        } else if let Some(effect) = world.get_mut::<NashorsToothEffect>(entity) {
            effect.item_count = remaining as u32;
        }
    }

    fn reset(&self, entity: Entity, world: &mut World) {
        if let Some(effect) = world.get_mut::<NashorsToothEffect>(entity) {
            effect.buff.reset();
        }
    }

    fn handle_event(
        &self,
        entity: Entity,
        event: &ScheduledEvent,
        world: &mut World,
        sink: &mut EventSink<'_>,
    ) {
        let now = sink.now();
        match event.event {
            CombatEvent::SpellCast { source, .. } if source == entity => {
                let Some(effect) = world.get_mut::<NashorsToothEffect>(entity) else {
                    return;
                };
                let duration = effect.duration;
                let activation = effect.buff.activate(now, duration);
                debug!("{entity}: Nashor's Tooth active until {:.2}", now + duration);
                sink.enqueue_now(CombatEvent::RecalculateStats { entity });
                sink.enqueue(
                    now + duration,
                    CombatEvent::ItemBuffExpired {
                        entity,
                        item: item_names::NASHORS_TOOTH,
                        activation,
                    },
                );
            }
            CombatEvent::ItemBuffExpired {
                entity: holder,
                item,
                activation,
            } if holder == entity && item == item_names::NASHORS_TOOTH => {
                let expired = world
                    .get_mut::<NashorsToothEffect>(entity)
                    .is_some_and(|effect| effect.buff.expire(activation));
                if expired {
                    sink.enqueue_now(CombatEvent::RecalculateStats { entity });
                }
            }
            _ => {}
        }
    }

    fn is_event_based(&self) -> bool {
        true
    }
}
