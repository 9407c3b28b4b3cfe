//! Property checks for the stat pass, the static aggregate and mitigation

use dps_core::components::{Crit, Equipment, ItemStaticEffect};
use dps_core::data::Item;
use dps_core::systems::damage::{mitigate, Defense};
use dps_core::systems::{recalculate, ItemRegistry};
use dps_core::{ChampionBuilder, EquipmentManager, World};
use proptest::prelude::*;
use std::sync::Arc;

fn passive_item() -> impl Strategy<Value = Item> {
    (0u8..4, 0.0..50.0f64, 0.0..0.5f64, 0.0..300.0f64).prop_map(|(id, speed, ad, hp)| {
        Item::new(format!("TFT_Item_Passive{id}"))
            .with_effect("AS", speed)
            .with_effect("AD", ad)
            .with_effect("Health", hp)
    })
}

proptest! {
    #[test]
    fn crit_chance_stays_in_unit_range(base in 0.0..1.0f64, bonus in 0.0..300.0f64) {
        let mut world = World::new();
        let unit = ChampionBuilder::new("Unit").crit(base, 1.4).build(&mut world);
        let mut effect = ItemStaticEffect::new();
        effect.add_effect("CritChance", bonus);
        world.add_component(unit, effect);
        recalculate(&mut world, unit);

        let crit = world.get::<Crit>(unit).unwrap();
        prop_assert!((0.0..=1.0).contains(&crit.final_crit_chance));
        prop_assert!(crit.final_crit_multiplier >= 1.4 - 1e-12);
    }

    #[test]
    fn static_aggregate_matches_fresh_recompute(
        items in proptest::collection::vec(passive_item(), 1..=3),
        remove_index in 0usize..3,
    ) {
        let mut world = World::new();
        let unit = ChampionBuilder::new("Unit").build(&mut world);
        let manager = EquipmentManager::new(Arc::new(ItemRegistry::with_defaults()));
        for item in &items {
            manager.equip(&mut world, unit, item.clone()).unwrap();
        }
        let removed = items[remove_index % items.len()].api_name.clone();
        manager.remove_item(&mut world, unit, &removed).unwrap();

        let mut fresh = ItemStaticEffect::new();
        for item in world.get::<Equipment>(unit).unwrap().items() {
            for (key, &value) in &item.effects {
                fresh.add_effect(key, value);
            }
        }
        prop_assert_eq!(world.get::<ItemStaticEffect>(unit).unwrap(), &fresh);
    }

    #[test]
    fn more_armor_never_means_more_damage(
        raw in 0.0..5000.0f64,
        crit_ev in 1.0..3.0f64,
        low in 0.0..500.0f64,
        extra in 0.0..500.0f64,
    ) {
        let defense = |armor| Defense { armor, mr: 0.0, durability: 0.0 };
        let soft = mitigate(raw, 0.0, crit_ev, 0.0, defense(low));
        let hard = mitigate(raw, 0.0, crit_ev, 0.0, defense(low + extra));
        prop_assert!(hard.final_physical <= soft.final_physical + 1e-9);
        prop_assert!(soft.final_physical <= raw * crit_ev + 1e-9);
    }
}
