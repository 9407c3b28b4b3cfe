//! Static item system - rebuilds `ItemStaticEffect` from equipped items

use super::ItemRegistry;
use crate::components::{Equipment, ItemStaticEffect};
use crate::ecs::{Entity, World};
use std::sync::Arc;
use tracing::{debug, warn};

/// Sums the passive effect tables of equipped items
#[derive(Debug, Clone)]
pub struct StaticItemSystem {
    registry: Arc<ItemRegistry>,
}

impl StaticItemSystem {
    pub fn new(registry: Arc<ItemRegistry>) -> Self {
        StaticItemSystem { registry }
    }

    /// Recompute the aggregate of one entity from scratch.
    /// Creates the component when missing; a unit with no items ends up all zeros.
    pub fn recompute(&self, world: &mut World, entity: Entity) {
        let Some(equipment) = world.get::<Equipment>(entity) else {
            return;
        };

        let mut aggregate = ItemStaticEffect::new();
        for item in equipment.items() {
            for (key, &value) in &item.effects {
                if !aggregate.add_effect(key, value) && !self.registry.consumes_key(key) {
                    warn!(
                        "Ignoring unknown effect key '{}' on {} ({})",
                        key, item.api_name, entity
                    );
                }
            }
        }
        debug!("{entity}: static item aggregate rebuilt from {} items", equipment.len());
        world.add_component(entity, aggregate);
    }

    /// Recompute every entity holding Equipment
    pub fn recompute_all(&self, world: &mut World) {
        for entity in world.query::<Equipment>() {
            self.recompute(world, entity);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Item;

    #[test]
    fn test_recompute_sums_items() {
        let mut world = World::new();
        let e = world.create_entity();
        let mut equipment = Equipment::new();
        equipment.add(Item::new("Bow").with_effect("AS", 10.0)).unwrap();
        equipment.add(Item::new("Bow").with_effect("AS", 10.0)).unwrap();
        equipment
            .add(Item::new("TFT_Item_TitansResolve").with_effect("StackCap", 25.0).with_effect("AS", 10.0))
            .unwrap();
        world.add_component(e, equipment);

        let system = StaticItemSystem::new(Arc::new(ItemRegistry::with_defaults()));
        system.recompute(&mut world, e);
        let effect = world.get::<ItemStaticEffect>(e).unwrap();
        assert!((effect.bonus_percent_as - 0.3).abs() < 1e-9);

        world.get_mut::<Equipment>(e).unwrap().remove("Bow");
        system.recompute(&mut world, e);
        let effect = world.get::<ItemStaticEffect>(e).unwrap();
        assert!((effect.bonus_percent_as - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_no_equipment_is_noop() {
        let mut world = World::new();
        let e = world.create_entity();
        StaticItemSystem::new(Arc::new(ItemRegistry::new())).recompute(&mut world, e);
        assert!(!world.has::<ItemStaticEffect>(e));
    }
}
