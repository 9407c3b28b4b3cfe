//! Navori Flickerblade - attack speed per attack, AD and AP every few attacks

use super::archangels::positive_or;
use super::ItemHandler;
use crate::components::FlickerbladeEffect;
use crate::data::{item_names, Item};
use crate::ecs::{Entity, World};
use crate::events::{CombatEvent, EventSink, ScheduledEvent};
use tracing::{debug, trace};

const DEFAULT_STACKS_PER_BONUS: f64 = 5.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct FlickerbladeHandler;

impl ItemHandler for FlickerbladeHandler {
    fn api_name(&self) -> &'static str {
        item_names::FLICKERBLADE
    }

    fn effect_keys(&self) -> &'static [&'static str] {
        &["ASPerStack", "ADPerBonus", "APPerBonus", "StacksPerBonus"]
    }

    fn on_equip(&self, entity: Entity, item: &Item, count: usize, world: &mut World) {
        let count = count as u32;
        if let Some(effect) = world.get_mut::<FlickerbladeEffect>(entity) {
            effect.item_count = count;
            return;
        }
        // Fractions in the data, unlike Rageblade
        let mut effect = FlickerbladeEffect::new(
            item.effect("ASPerStack"),
            item.effect("ADPerBonus"),
            item.effect("APPerBonus"),
            positive_or(item.effect("StacksPerBonus"), DEFAULT_STACKS_PER_BONUS).round() as u32,
        );
        effect.item_count = count;
        world.add_component(entity, effect);
    }

    fn on_unequip(&self, entity: Entity, remaining: usize, world: &mut World) {
        if remaining == 0 {
            world.remove::<FlickerbladeEffect>(entity);
        } else if let Some(effect) = world.get_mut::<FlickerbladeEffect>(entity) {
            effect.item_count = remaining as u32;
        }
    }

    fn reset(&self, entity: Entity, world: &mut World) {
        if let Some(effect) = world.get_mut::<FlickerbladeEffect>(entity) {
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
        let Some(effect) = world.get_mut::<FlickerbladeEffect>(source) else {
            return;
        };
        if effect.on_attack() {
            debug!(
                "{source}: Flickerblade bonus after {} attacks (+{:.0}% AD, +{:.0} AP)",
                effect.attacks,
                effect.bonus_ad * 100.0,
                effect.bonus_ap
            );
        } else {
            trace!("{source}: Flickerblade +{:.0}% AS", effect.bonus_as * 100.0);
        }
        sink.enqueue_now(CombatEvent::RecalculateStats { entity: source });
    }

    fn is_event_based(&self) -> bool {
        true
    }
}
