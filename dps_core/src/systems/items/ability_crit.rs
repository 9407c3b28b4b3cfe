//! Ability crit - marks units whose items let abilities crit

use crate::components::{CanAbilityCritFromItems, Equipment};
use crate::data::item_names;
use crate::ecs::{Entity, World};
use tracing::debug;

/// Keeps `CanAbilityCritFromItems` in sync with Infinity Edge / Jeweled Gauntlet
#[derive(Debug, Clone, Copy, Default)]
pub struct AbilityCritSystem;

impl AbilityCritSystem {
    pub fn new() -> Self {
        AbilityCritSystem
    }

    pub fn update_entity(&self, world: &mut World, entity: Entity) {
        let grants = world.get::<Equipment>(entity).is_some_and(|equipment| {
            equipment.has_item(item_names::INFINITY_EDGE)
                || equipment.has_item(item_names::JEWELED_GAUNTLET)
        });
        let has_marker = world.has::<CanAbilityCritFromItems>(entity);
        if grants && !has_marker {
            debug!("{entity}: abilities can crit (items)");
            world.add_component(entity, CanAbilityCritFromItems);
        } else if !grants && has_marker {
            debug!("{entity}: ability crit from items removed");
            world.remove::<CanAbilityCritFromItems>(entity);
        }
    }

    pub fn update(&self, world: &mut World) {
        for entity in world.query::<Equipment>() {
            self.update_entity(world, entity);
        }
    }
}
