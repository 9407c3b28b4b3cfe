//! Blue Buff - mana refund after each cast, damage amp after a takedown

use super::archangels::positive_or;
use super::ItemHandler;
use crate::components::{BlueBuffEffect, Mana};
use crate::data::{item_names, Item};
use crate::ecs::{Entity, World};
use crate::events::{CombatEvent, EventSink, ScheduledEvent};
use tracing::debug;

const DEFAULT_MANA_REFUND: f64 = 10.0;
const DEFAULT_DAMAGE_AMP: f64 = 0.05;
const DEFAULT_TAKEDOWN_DURATION: f64 = 8.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct BlueBuffHandler;

impl BlueBuffHandler {
    fn refund(&self, entity: Entity, world: &mut World) {
        let Some(refund) = world.get::<BlueBuffEffect>(entity).map(|e| e.mana_refund) else {
            return;
        };
        if let Some(mana) = world.get_mut::<Mana>(entity) {
            let gained = mana.gain(refund);
            debug!("{entity}: Blue Buff refunds {gained:.0} mana");
        }
    }

    fn on_takedown(&self, entity: Entity, world: &mut World, sink: &mut EventSink<'_>) {
        let now = sink.now();
        let Some(effect) = world.get_mut::<BlueBuffEffect>(entity) else {
            return;
        };
        let duration = effect.takedown_duration;
        let activation = effect.buff.activate(now, duration);
        debug!("{entity}: Blue Buff amp active until {:.2}", now + duration);
        sink.enqueue_now(CombatEvent::RecalculateStats { entity });
        sink.enqueue(
            now + duration,
            CombatEvent::ItemBuffExpired {
                entity,
                item: item_names::BLUE_BUFF,
                activation,
            },
        );
    }

    fn on_expired(&self, entity: Entity, activation: u32, world: &mut World, sink: &mut EventSink<'_>) {
        let Some(effect) = world.get_mut::<BlueBuffEffect>(entity) else {
            return;
        };
        if effect.buff.expire(activation) {
            sink.enqueue_now(CombatEvent::RecalculateStats { entity });
        }
    }
}

impl ItemHandler for BlueBuffHandler {
    fn api_name(&self) -> &'static str {
        item_names::BLUE_BUFF
    }

    fn effect_keys(&self) -> &'static [&'static str] {
        &["ManaRefund", "DamageAmp", "TakedownDuration"]
    }

    fn on_equip(&self, entity: Entity, item: &Item, _count: usize, world: &mut World) {
        if world.has::<BlueBuffEffect>(entity) {
            return;
        }
        let effect = BlueBuffEffect::new(
            positive_or(item.effect("ManaRefund"), DEFAULT_MANA_REFUND),
            positive_or(item.effect("DamageAmp"), DEFAULT_DAMAGE_AMP),
            positive_or(item.effect("TakedownDuration"), DEFAULT_TAKEDOWN_DURATION),
        );
        world.add_component(entity, effect);
    }

    fn on_unequip(&self, entity: Entity, remaining: usize, world: &mut World) {
        if remaining == 0 {
            world.remove::<BlueBuffEffect>(entity);
        }
    }

    fn reset(&self, entity: Entity, world: &mut World) {
        if let Some(effect) = world.get_mut::<BlueBuffEffect>(entity) {
            effect.buff.reset();
        }
    }

    fn handle_event(
        &self,
        entity: Entity,
        event: &ScheduledEvent,
        world: &mut World,
        sink: &mut EventSink<'_>,
    ) {
        match event.event {
            // Mana is locked during the cast, so the refund waits for recovery
            CombatEvent::SpellRecoveryEnd { entity: caster } if caster == entity => {
                self.refund(entity, world);
            }
            CombatEvent::Kill { killer, .. } if killer == entity && world.is_alive(entity) => {
                self.on_takedown(entity, world, sink);
            }
            CombatEvent::ItemBuffExpired {
                entity: holder,
                item,
                activation,
            } if holder == entity && item == item_names::BLUE_BUFF => {
                self.on_expired(entity, activation, world, sink);
            }
            _ => {}
        }
    }

    fn is_event_based(&self) -> bool {
        true
    }
}
