//! Archangel's Staff - ability power every interval of combat time

use super::ItemHandler;
use crate::components::ArchangelsStaffEffect;
use crate::data::{item_names, Item};
use crate::ecs::{Entity, World};
use crate::events::{CombatEvent, EventSink};
use tracing::debug;

const DEFAULT_INTERVAL: f64 = 5.0;
const DEFAULT_AP_PER_INTERVAL: f64 = 30.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct ArchangelsStaffHandler;

impl ItemHandler for ArchangelsStaffHandler {
    fn api_name(&self) -> &'static str {
        item_names::ARCHANGELS_STAFF
    }

    fn effect_keys(&self) -> &'static [&'static str] {
        &["IntervalSeconds", "APPerInterval"]
    }

    fn on_equip(&self, entity: Entity, item: &Item, count: usize, world: &mut World) {
        let count = count as u32;
        if let Some(effect) = world.get_mut::<ArchangelsStaffEffect>(entity) {
            effect.item_count = count;
            return;
        }
        let interval = positive_or(item.effect("IntervalSeconds"), DEFAULT_INTERVAL);
        let ap = positive_or(item.effect("APPerInterval"), DEFAULT_AP_PER_INTERVAL);
        let mut effect = ArchangelsStaffEffect::new(interval, ap);
        effect.item_count = count;
        world.add_component(entity, effect);
    }

    fn on_unequip(&self, entity: Entity, remaining: usize, world: &mut World) {
        if remaining == 0 {
            world.remove::<ArchangelsStaffEffect>(entity);
        } else if let Some(effect) = world.get_mut::<ArchangelsStaffEffect>(entity) {
            effect.item_count = remaining as u32;
        }
    }

    fn reset(&self, entity: Entity, world: &mut World) {
        if let Some(effect) = world.get_mut::<ArchangelsStaffEffect>(entity) {
            effect.reset();
        }
    }

    fn tick(&self, entity: Entity, dt: f64, world: &mut World, sink: &mut EventSink<'_>) {
        let Some(effect) = world.get_mut::<ArchangelsStaffEffect>(entity) else {
            return;
        };
        if effect.tick(dt) > 0 {
            debug!(
                "{entity}: Archangel's Staff at {} stacks (+{:.0} AP)",
                effect.stacks,
                effect.bonus_ap()
            );
            sink.enqueue_now(CombatEvent::RecalculateStats { entity });
        }
    }

    fn is_time_based(&self) -> bool {
        true
    }
}

pub(super) fn positive_or(value: f64, fallback: f64) -> f64 {
    if value > 0.0 {
        value
    } else {
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{EventKind, EventQueue};

    #[test]
    fn test_equip_counts_and_unequip() {
        let mut world = World::new();
        let e = world.create_entity();
        let staff = Item::new(item_names::ARCHANGELS_STAFF)
            .with_effect("IntervalSeconds", 5.0)
            .with_effect("APPerInterval", 30.0);
        let handler = ArchangelsStaffHandler;

        handler.on_equip(e, &staff, 1, &mut world);
        handler.on_equip(e, &staff, 2, &mut world);
        assert_eq!(world.get::<ArchangelsStaffEffect>(e).unwrap().item_count, 2);

        handler.on_unequip(e, 1, &mut world);
        assert_eq!(world.get::<ArchangelsStaffEffect>(e).unwrap().item_count, 1);
        handler.on_unequip(e, 0, &mut world);
        assert!(!world.has::<ArchangelsStaffEffect>(e));
    }

    #[test]
    fn test_tick_requests_recalculation() {
        let mut world = World::new();
        let e = world.create_entity();
        let handler = ArchangelsStaffHandler;
        handler.on_equip(e, &Item::new(item_names::ARCHANGELS_STAFF), 1, &mut world);

        let mut queue = EventQueue::new();
        let mut sink = EventSink::new(&mut queue, 5.0);
        handler.tick(e, 4.9, &mut world, &mut sink);
        handler.tick(e, 0.1, &mut world, &mut sink);
        let scheduled = queue.pop_due(5.0).unwrap();
        assert_eq!(scheduled.event.kind(), EventKind::RecalculateStats);
        assert!(queue.is_empty());
    }
}
