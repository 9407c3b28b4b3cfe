//! Quicksilver - attack speed procs while the spell shield lasts

use super::archangels::positive_or;
use super::ItemHandler;
use crate::components::QuicksilverEffect;
use crate::data::{item_names, Item};
use crate::ecs::{Entity, World};
use crate::events::{CombatEvent, EventSink};
use tracing::debug;

const DEFAULT_DURATION: f64 = 18.0;
const DEFAULT_PROC_INTERVAL: f64 = 2.0;
const DEFAULT_PROC_ATTACK_SPEED: f64 = 0.03;

#[derive(Debug, Clone, Copy, Default)]
pub struct QuicksilverHandler;

impl ItemHandler for QuicksilverHandler {
    fn api_name(&self) -> &'static str {
        item_names::QUICKSILVER
    }

    fn effect_keys(&self) -> &'static [&'static str] {
        &["SpellShieldDuration", "ProcInterval", "ProcAttackSpeed"]
    }

    fn on_equip(&self, entity: Entity, item: &Item, _count: usize, world: &mut World) {
        if world.has::<QuicksilverEffect>(entity) {
            return;
        }
        let effect = QuicksilverEffect::new(
            positive_or(item.effect("SpellShieldDuration"), DEFAULT_DURATION),
            positive_or(item.effect("ProcInterval"), DEFAULT_PROC_INTERVAL),
            positive_or(item.effect("ProcAttackSpeed"), DEFAULT_PROC_ATTACK_SPEED),
        );
        world.add_component(entity, effect);
    }

    fn on_unequip(&self, entity: Entity, remaining: usize, world: &mut World) {
        if remaining == 0 {
            world.remove::<QuicksilverEffect>(entity);
        }
    }

    fn reset(&self, entity: Entity, world: &mut World) {
        if let Some(effect) = world.get_mut::<QuicksilverEffect>(entity) {
            effect.reset();
        }
    }

    fn tick(&self, entity: Entity, dt: f64, world: &mut World, sink: &mut EventSink<'_>) {
        let Some(effect) = world.get_mut::<QuicksilverEffect>(entity) else {
            return;
        };
        let was_active = effect.is_active;
        let gained = effect.tick(dt);
        if was_active && !effect.is_active {
            debug!("{entity}: Quicksilver shield expired with {} stacks", effect.stacks);
        }
        if gained > 0 {
            sink.enqueue_now(CombatEvent::RecalculateStats { entity });
        }
    }

    fn is_time_based(&self) -> bool {
        true
    }
}
