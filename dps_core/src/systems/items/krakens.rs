//! Kraken's Fury - attack damage stacks on every attack

use super::ItemHandler;
use crate::components::KrakensFuryEffect;
use crate::data::{item_names, Item};
use crate::ecs::{Entity, World};
use crate::events::{CombatEvent, EventSink, ScheduledEvent};
use tracing::trace;

#[derive(Debug, Clone, Copy, Default)]
pub struct KrakensFuryHandler;

impl ItemHandler for KrakensFuryHandler {
    fn api_name(&self) -> &'static str {
        item_names::KRAKENS_FURY
    }

    fn effect_keys(&self) -> &'static [&'static str] {
        &["ADOnAttack"]
    }

    fn on_equip(&self, entity: Entity, item: &Item, _count: usize, world: &mut World) {
        if !world.has::<KrakensFuryEffect>(entity) {
            world.add_component(entity, KrakensFuryEffect::new(item.effect("ADOnAttack")));
        }
    }

    fn on_unequip(&self, entity: Entity, remaining: usize, world: &mut World) {
        if remaining == 0 {
            world.remove::<KrakensFuryEffect>(entity);
        }
    }

    fn reset(&self, entity: Entity, world: &mut World) {
        if let Some(effect) = world.get_mut::<KrakensFuryEffect>(entity) {
            effect.stacks = 0;
        }
    }

    fn handle_event(
        &self,
        entity: Entity,
        event: &ScheduledEvent,
        world: &mut World,
        sink: &mut EventSink<'_>,
    ) {
        let CombatEvent::AttackLanded { source, .. } = event.event else {
            return;
        };
        if source != entity || !world.is_alive(source) {
            return;
        }
        let Some(effect) = world.get_mut::<KrakensFuryEffect>(source) else {
            return;
        };
        effect.stacks += 1;
        trace!("{source}: Kraken's Fury stack {}", effect.stacks);
        sink.enqueue_now(CombatEvent::RecalculateStats { entity: source });
    }

    fn is_event_based(&self) -> bool {
        true
    }
}
