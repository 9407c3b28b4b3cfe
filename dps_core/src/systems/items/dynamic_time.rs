//! Time-driven item effects, advanced once per simulation tick

use super::ItemRegistry;
use crate::components::Equipment;
use crate::ecs::World;
use crate::events::EventSink;
use std::sync::Arc;

/// Ticks every time-based item handler for each living holder
#[derive(Debug, Clone)]
pub struct DynamicTimeItemSystem {
    registry: Arc<ItemRegistry>,
}

impl DynamicTimeItemSystem {
    pub fn new(registry: Arc<ItemRegistry>) -> Self {
        DynamicTimeItemSystem { registry }
    }

    pub fn update(&self, world: &mut World, dt: f64, sink: &mut EventSink<'_>) {
        for entity in world.query::<Equipment>() {
            if !world.is_alive(entity) {
                continue;
            }
            for handler in self.registry.equipped_handlers(world, entity) {
                if handler.is_time_based() {
                    handler.tick(entity, dt, world, sink);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{ArchangelsStaffEffect, Health};
    use crate::data::{item_names, Item};
    use crate::events::EventQueue;
    use crate::systems::items::ItemHandler;

    #[test]
    fn test_dead_holders_do_not_tick() {
        let registry = Arc::new(ItemRegistry::with_defaults());
        let mut world = World::new();
        let alive = world.create_entity();
        let dead = world.create_entity();
        let staff = Item::new(item_names::ARCHANGELS_STAFF);
        for (entity, hp) in [(alive, 100.0), (dead, 0.0)] {
            let mut health = Health::new(100.0, 0.0, 0.0);
            health.current_hp = hp;
            world.add_component(entity, health);
            let mut equipment = Equipment::new();
            equipment.add(staff.clone()).unwrap();
            world.add_component(entity, equipment);
            if let Some(handler) = registry.get(item_names::ARCHANGELS_STAFF) {
                handler.on_equip(entity, &staff, 1, &mut world);
            }
        }

        let system = DynamicTimeItemSystem::new(registry);
        let mut queue = EventQueue::new();
        let mut sink = EventSink::new(&mut queue, 0.0);
        for _ in 0..10 {
            system.update(&mut world, 0.6, &mut sink);
        }
        assert_eq!(world.get::<ArchangelsStaffEffect>(alive).unwrap().stacks, 1);
        assert_eq!(world.get::<ArchangelsStaffEffect>(dead).unwrap().stacks, 0);
    }
}
