//! Spirit Visage - heals a share of missing HP on a fixed interval

use super::archangels::positive_or;
use super::ItemHandler;
use crate::components::{Health, SpiritVisageEffect};
use crate::data::{item_names, Item};
use crate::ecs::{Entity, World};
use crate::events::EventSink;
use crate::systems::debuffs::heal;
use tracing::trace;

const DEFAULT_MISSING_HP_HEAL: f64 = 0.05;
const DEFAULT_TICK_RATE: f64 = 2.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct SpiritVisageHandler;

impl ItemHandler for SpiritVisageHandler {
    fn api_name(&self) -> &'static str {
        item_names::SPIRIT_VISAGE
    }

    fn effect_keys(&self) -> &'static [&'static str] {
        &["MissingHealthHeal", "HealTickRate", "MaxHeal"]
    }

    fn on_equip(&self, entity: Entity, item: &Item, count: usize, world: &mut World) {
        let count = count as u32;
        if let Some(effect) = world.get_mut::<SpiritVisageEffect>(entity) {
            effect.item_count = count;
            return;
        }
        let mut effect = SpiritVisageEffect::new(
            positive_or(item.effect("MissingHealthHeal"), DEFAULT_MISSING_HP_HEAL),
            positive_or(item.effect("HealTickRate"), DEFAULT_TICK_RATE),
            item.effect("MaxHeal").max(0.0),
        );
        effect.item_count = count;
        world.add_component(entity, effect);
    }

    fn on_unequip(&self, entity: Entity, remaining: usize, world: &mut World) {
        if remaining == 0 {
            world.remove::<SpiritVisageEffect>(entity);
        } else if let Some(effect) = world.get_mut::<SpiritVisageEffect>(entity) {
            effect.item_count = remaining as u32;
        }
    }

    fn reset(&self, entity: Entity, world: &mut World) {
        if let Some(effect) = world.get_mut::<SpiritVisageEffect>(entity) {
            effect.reset();
        }
    }

    fn tick(&self, entity: Entity, dt: f64, world: &mut World, _sink: &mut EventSink<'_>) {
        let Some(effect) = world.get_mut::<SpiritVisageEffect>(entity) else {
            return;
        };
        let due = effect.tick(dt);
        for _ in 0..due {
            let missing = world.get::<Health>(entity).map_or(0.0, Health::missing_hp);
            let Some(amount) = world
                .get::<SpiritVisageEffect>(entity)
                .map(|effect| effect.heal_amount(missing))
            else {
                return;
            };
            let healed = heal(world, entity, amount);
            trace!("{entity}: Spirit Visage heals {healed:.1}");
        }
    }

    fn is_time_based(&self) -> bool {
        true
    }
}
