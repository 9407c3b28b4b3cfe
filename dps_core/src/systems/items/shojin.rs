//! Spear of Shojin - bonus mana on every attack

use super::archangels::positive_or;
use super::ItemHandler;
use crate::components::{Mana, SpearOfShojinEffect};
use crate::data::{item_names, Item};
use crate::ecs::{Entity, World};
use crate::events::{CombatEvent, EventSink, ScheduledEvent};
use tracing::trace;

const DEFAULT_MANA_PER_ATTACK: f64 = 5.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct SpearOfShojinHandler;

impl ItemHandler for SpearOfShojinHandler {
    fn api_name(&self) -> &'static str {
        item_names::SPEAR_OF_SHOJIN
    }

    fn effect_keys(&self) -> &'static [&'static str] {
        &["FlatManaRestore"]
    }

    fn on_equip(&self, entity: Entity, item: &Item, count: usize, world: &mut World) {
        let count = count as u32;
        if let Some(effect) = world.get_mut::<SpearOfShojinEffect>(entity) {
            effect.item_count = count;
            return;
        }
        let effect = SpearOfShojinEffect {
            mana_per_attack: positive_or(item.effect("FlatManaRestore"), DEFAULT_MANA_PER_ATTACK),
            item_count: count,
        };
        world.add_component(entity, effect);
    }

    fn on_unequip(&self, entity: Entity, remaining: usize, world: &mut World) {
        if remaining == 0 {
            world.remove::<SpearOfShojinEffect>(entity);
        } else if let Some(effect) = world.get_mut::<SpearOfShojinEffect>(entity) {
            effect.item_count = remaining as u32;
        }
    }

    fn handle_event(
        &self,
        entity: Entity,
        event: &ScheduledEvent,
        world: &mut World,
        _sink: &mut EventSink<'_>,
    ) {
        let CombatEvent::AttackLanded { source, .. } = event.event else {
            return;
        };
        if source != entity || !world.is_alive(source) {
            return;
        }
        let Some(amount) = world
            .get::<SpearOfShojinEffect>(source)
            .map(SpearOfShojinEffect::mana_per_attack_total)
        else {
            return;
        };
        if let Some(mana) = world.get_mut::<Mana>(source) {
            let gained = mana.gain(amount);
            trace!("{source}: Shojin +{gained:.0} mana");
        }
    }

    fn is_event_based(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Health;
    use crate::events::EventQueue;

    #[test]
    fn test_mana_per_copy_on_attack() {
        let mut world = World::new();
        let e = world.create_entity();
        let enemy = world.create_entity();
        world.add_component(e, Health::new(500.0, 0.0, 0.0));
        world.add_component(e, Mana::new(100.0, 0.0));
        let spear = Item::new(item_names::SPEAR_OF_SHOJIN).with_effect("FlatManaRestore", 5.0);
        SpearOfShojinHandler.on_equip(e, &spear, 1, &mut world);
        SpearOfShojinHandler.on_equip(e, &spear, 2, &mut world);

        let mut queue = EventQueue::new();
        let mut sink = EventSink::new(&mut queue, 1.0);
        let landed = ScheduledEvent {
            timestamp: 1.0,
            sequence: 0,
            event: CombatEvent::AttackLanded {
                source: e,
                target: enemy,
                base_damage: 40.0,
            },
        };
        SpearOfShojinHandler.handle_event(e, &landed, &mut world, &mut sink);
        assert!((world.get::<Mana>(e).unwrap().current - 10.0).abs() < 1e-9);

        world.get_mut::<Mana>(e).unwrap().locked = true;
        SpearOfShojinHandler.handle_event(e, &landed, &mut world, &mut sink);
        assert!((world.get::<Mana>(e).unwrap().current - 10.0).abs() < 1e-9);
    }
}
