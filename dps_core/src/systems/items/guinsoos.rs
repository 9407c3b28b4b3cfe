//! Guinsoo's Rageblade - attack speed on every attack

use super::ItemHandler;
use crate::components::GuinsoosRagebladeEffect;
use crate::data::{item_names, Item};
use crate::ecs::{Entity, World};
use crate::events::{CombatEvent, EventSink, ScheduledEvent};
use tracing::trace;

const DEFAULT_AS_PER_STACK: f64 = 5.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct GuinsoosRagebladeHandler;

impl ItemHandler for GuinsoosRagebladeHandler {
    fn api_name(&self) -> &'static str {
        item_names::GUINSOOS_RAGEBLADE
    }

    fn effect_keys(&self) -> &'static [&'static str] {
        &["AttackSpeedPerStack"]
    }

    fn on_equip(&self, entity: Entity, item: &Item, count: usize, world: &mut World) {
        let count = count as u32;
        if let Some(effect) = world.get_mut::<GuinsoosRagebladeEffect>(entity) {
            effect.item_count = count;
            return;
        }
        // Percent in the data
        let per_stack = item
            .effects
            .get("AttackSpeedPerStack")
            .copied()
            .unwrap_or(DEFAULT_AS_PER_STACK)
            / 100.0;
        let mut effect = GuinsoosRagebladeEffect::new(per_stack);
        effect.item_count = count;
        world.add_component(entity, effect);
    }

    fn on_unequip(&self, entity: Entity, remaining: usize, world: &mut World) {
        if remaining == 0 {
            world.remove::<GuinsoosRagebladeEffect>(entity);
        } else if let Some(effect) = world.get_mut::<GuinsoosRagebladeEffect>(entity) {
            effect.item_count = remaining as u32;
        }
    }

    fn reset(&self, entity: Entity, world: &mut World) {
        if let Some(effect) = world.get_mut::<GuinsoosRagebladeEffect>(entity) {
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
        let CombatEvent::AttackLanded { source, .. } = event.event else {
            return;
        };
        if source != entity || !world.is_alive(source) {
            return;
        }
        let Some(effect) = world.get_mut::<GuinsoosRagebladeEffect>(source) else {
            return;
        };
        let delta = effect.on_attack();
        trace!("{source}: Rageblade +{delta:.3} AS ({} stacks)", effect.stacks);
        sink.enqueue_now(CombatEvent::RecalculateStats { entity: source });
    }

    fn is_event_based(&self) -> bool {
        true
    }
}
