//! Equipment manager - equip and unequip with every dependent update

use crate::components::{EquipRejection, Equipment};
use crate::data::{GameData, Item};
use crate::ecs::{Entity, World};
use crate::error::{LookupKind, SimError, SimResult};
use crate::systems::items::{AbilityCritSystem, ItemRegistry, StaticItemSystem};
use crate::systems::stats::recalculate;
use std::sync::Arc;
use tracing::info;

/// Adds and removes items. Each call updates the inventory, the dynamic item
/// component, the static aggregate, the ability crit marker and the final
/// stats before returning.
#[derive(Debug, Clone)]
pub struct EquipmentManager {
    registry: Arc<ItemRegistry>,
    static_items: StaticItemSystem,
    ability_crit: AbilityCritSystem,
}

impl EquipmentManager {
    pub fn new(registry: Arc<ItemRegistry>) -> Self {
        EquipmentManager {
            static_items: StaticItemSystem::new(Arc::clone(&registry)),
            ability_crit: AbilityCritSystem::new(),
            registry,
        }
    }

    pub fn registry(&self) -> &Arc<ItemRegistry> {
        &self.registry
    }

    /// Equip a catalogue item by api name
    pub fn add_item(
        &self,
        world: &mut World,
        data: &GameData,
        entity: Entity,
        api_name: &str,
    ) -> SimResult<()> {
        let item = data.item(api_name)?.clone();
        self.equip(world, entity, item)
    }

    /// Equip an item record directly
    pub fn equip(&self, world: &mut World, entity: Entity, item: Item) -> SimResult<()> {
        let api_name = item.api_name.clone();
        let equipment = world.require_mut::<Equipment>(entity)?;
        equipment.add(item.clone()).map_err(|rejection| match rejection {
            EquipRejection::Full => SimError::InventoryFull {
                entity,
                item: api_name.clone(),
            },
            EquipRejection::DuplicateUnique => SimError::UniqueViolation {
                entity,
                item: api_name.clone(),
            },
        })?;
        let count = equipment.item_count(&api_name);

        if let Some(handler) = self.registry.get(&api_name) {
            handler.on_equip(entity, &item, count, world);
        }
        self.refresh(world, entity);
        info!("{entity}: equipped {api_name} ({count} held)");
        Ok(())
    }

    /// Unequip one copy of an item
    pub fn remove_item(&self, world: &mut World, entity: Entity, api_name: &str) -> SimResult<Item> {
        let equipment = world.require_mut::<Equipment>(entity)?;
        let removed = equipment
            .remove(api_name)
            .ok_or_else(|| SimError::lookup(LookupKind::EquippedItem, api_name))?;
        let remaining = equipment.item_count(api_name);

        if let Some(handler) = self.registry.get(api_name) {
            handler.on_unequip(entity, remaining, world);
        }
        self.refresh(world, entity);
        info!("{entity}: unequipped {api_name} ({remaining} left)");
        Ok(removed)
    }

    /// Static aggregate, ability crit marker, then final stats
    fn refresh(&self, world: &mut World, entity: Entity) {
        self.static_items.recompute(world, entity);
        self.ability_crit.update_entity(world, entity);
        recalculate(world, entity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{
        Attack, CanAbilityCritFromItems, Crit, GuinsoosRagebladeEffect, Health, ItemStaticEffect,
    };
    use crate::data::item_names;
    use crate::factory::ChampionBuilder;

    fn setup() -> (World, Entity, EquipmentManager) {
        let mut world = World::new();
        let unit = ChampionBuilder::new("Unit")
            .attack(50.0, 0.7, 1.0)
            .crit(0.25, 1.4)
            .build(&mut world);
        recalculate(&mut world, unit);
        (world, unit, EquipmentManager::new(Arc::new(ItemRegistry::with_defaults())))
    }

    fn catalogue() -> GameData {
        GameData::from_parts(
            "TFTSet14",
            Vec::new(),
            vec![
                Item::new("TFT_Item_RecurveBow").with_effect("AS", 10.0),
                Item::new(item_names::INFINITY_EDGE)
                    .with_effect("AD", 0.35)
                    .with_effect("CritChance", 35.0)
                    .with_effect("CritDamageToGive", 0.1),
                Item::new("TFT_Item_Radiant").unique(),
            ],
            Vec::new(),
        )
    }

    #[test]
    fn test_add_then_remove_restores_stats() {
        let (mut world, unit, manager) = setup();
        let data = catalogue();
        let before_attack = world.get::<Attack>(unit).unwrap().clone();
        let before_crit = world.get::<Crit>(unit).unwrap().clone();

        manager.add_item(&mut world, &data, unit, item_names::INFINITY_EDGE).unwrap();
        assert!(world.has::<CanAbilityCritFromItems>(unit));
        assert!((world.get::<Crit>(unit).unwrap().final_crit_chance - 0.6).abs() < 1e-9);

        manager.remove_item(&mut world, unit, item_names::INFINITY_EDGE).unwrap();
        assert!(!world.has::<CanAbilityCritFromItems>(unit));
        let attack = world.get::<Attack>(unit).unwrap();
        let crit = world.get::<Crit>(unit).unwrap();
        assert!((attack.final_ad - before_attack.final_ad).abs() < 1e-9);
        assert!((attack.bonus_percent_ad - before_attack.bonus_percent_ad).abs() < 1e-9);
        assert!((crit.final_crit_chance - before_crit.final_crit_chance).abs() < 1e-9);
        assert!((crit.final_crit_multiplier - before_crit.final_crit_multiplier).abs() < 1e-9);
    }

    #[test]
    fn test_rejections() {
        let (mut world, unit, manager) = setup();
        let data = catalogue();

        manager.add_item(&mut world, &data, unit, "TFT_Item_Radiant").unwrap();
        assert!(matches!(
            manager.add_item(&mut world, &data, unit, "TFT_Item_Radiant"),
            Err(SimError::UniqueViolation { .. })
        ));
        manager.add_item(&mut world, &data, unit, "TFT_Item_RecurveBow").unwrap();
        manager.add_item(&mut world, &data, unit, "TFT_Item_RecurveBow").unwrap();
        assert!(matches!(
            manager.add_item(&mut world, &data, unit, "TFT_Item_RecurveBow"),
            Err(SimError::InventoryFull { .. })
        ));
        assert!(matches!(
            manager.add_item(&mut world, &data, unit, "TFT_Item_Missing"),
            Err(SimError::LookupFailure { kind: LookupKind::Item, .. })
        ));
        assert!(matches!(
            manager.remove_item(&mut world, unit, item_names::INFINITY_EDGE),
            Err(SimError::LookupFailure { kind: LookupKind::EquippedItem, .. })
        ));
        assert_eq!(world.get::<Equipment>(unit).unwrap().len(), 3);
    }

    #[test]
    fn test_dynamic_component_follows_inventory() {
        let (mut world, unit, manager) = setup();
        let blade = Item::new(item_names::GUINSOOS_RAGEBLADE).with_effect("AttackSpeedPerStack", 5.0);
        manager.equip(&mut world, unit, blade.clone()).unwrap();
        manager.equip(&mut world, unit, blade).unwrap();
        assert_eq!(world.get::<GuinsoosRagebladeEffect>(unit).unwrap().item_count, 2);

        manager.remove_item(&mut world, unit, item_names::GUINSOOS_RAGEBLADE).unwrap();
        assert_eq!(world.get::<GuinsoosRagebladeEffect>(unit).unwrap().item_count, 1);
        manager.remove_item(&mut world, unit, item_names::GUINSOOS_RAGEBLADE).unwrap();
        assert!(!world.has::<GuinsoosRagebladeEffect>(unit));
        assert_eq!(world.get::<ItemStaticEffect>(unit).unwrap().bonus_percent_as, 0.0);
    }

    #[test]
    fn test_missing_equipment() {
        let (mut world, _, manager) = setup();
        let bare = world.create_entity();
        world.add_component(bare, Health::new(100.0, 0.0, 0.0));
        assert!(matches!(
            manager.equip(&mut world, bare, Item::new("TFT_Item_RecurveBow")),
            Err(SimError::MissingComponent { component: "Equipment", .. })
        ));
    }
}
