//! Debuffs - application, expiry and burn ticks
//!
//! Shred and sunder change resists, so applying or losing one asks for a
//! stat pass. Burn runs its own tick chain: one tick a second after it
//! lands and every second while it lasts. The chain removes the component
//! once no further tick fits before the end time, so burn never gets a
//! `DebuffExpired`.

use crate::components::{
    BurnEffect, Debuff, DebuffKind, DebuffTimer, Health, ShredEffect, SunderEffect, WoundEffect,
};
use crate::ecs::{Entity, World};
use crate::events::{
    CombatEvent, DamageApplied, DebuffApplication, EventHandler, EventKind, EventSink,
    ScheduledEvent,
};
use crate::types::{DamageKind, TIME_EPSILON};
use tracing::{debug, trace};

/// Seconds between burn ticks
pub const BURN_TICK_INTERVAL: f64 = 1.0;

/// Heal `entity` by `amount`, reduced by any wound on it. Returns HP restored.
pub fn heal(world: &mut World, entity: Entity, amount: f64) -> f64 {
    let amount = world
        .get::<WoundEffect>(entity)
        .map_or(amount, |wound| wound.reduce(amount));
    world
        .get_mut::<Health>(entity)
        .map_or(0.0, |health| health.heal(amount))
}

/// Strip every debuff, e.g. before a fresh combat
pub fn clear_debuffs(world: &mut World) {
    for entity in world.entities().to_vec() {
        world.remove::<BurnEffect>(entity);
        world.remove::<WoundEffect>(entity);
        world.remove::<ShredEffect>(entity);
        world.remove::<SunderEffect>(entity);
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DebuffSystem;

impl DebuffSystem {
    pub fn new() -> Self {
        DebuffSystem
    }

    /// Merge the application into the target's `C`. Returns whether this
    /// started a new debuff rather than updating a running one.
    fn apply<C: Debuff>(
        &self,
        application: &DebuffApplication,
        world: &mut World,
        sink: &mut EventSink<'_>,
    ) -> bool {
        let now = sink.now();
        let target = application.target;
        let incoming = DebuffTimer::new(
            application.value,
            application.duration,
            now,
            application.source,
            application.origin,
        );
        let running = world
            .get::<C>(target)
            .is_some_and(|current| current.timer().is_active(now));
        let (changed, fresh) = if running {
            let changed = world
                .get_mut::<C>(target)
                .is_some_and(|current| current.timer_mut().merge(incoming));
            (changed, false)
        } else {
            world.add_component(target, C::from_timer(incoming));
            (true, true)
        };
        if !changed {
            return false;
        }
        let Some(end_time) = world.get::<C>(target).map(|c| c.timer().end_time) else {
            return false;
        };
        debug!(
            "{target}: {:?} {:.2} from {} until t={end_time:.2}",
            C::DEBUFF,
            application.value,
            application.origin
        );
        if C::DEBUFF != DebuffKind::Burn {
            sink.enqueue(
                end_time,
                CombatEvent::DebuffExpired {
                    target,
                    kind: C::DEBUFF,
                },
            );
        }
        fresh
    }

    fn on_apply(
        &self,
        application: &DebuffApplication,
        world: &mut World,
        sink: &mut EventSink<'_>,
    ) {
        let target = application.target;
        if !world.is_alive(target) || application.duration <= 0.0 {
            return;
        }
        match application.kind {
            DebuffKind::Burn => {
                if self.apply::<BurnEffect>(application, world, sink) {
                    let first_tick = sink.now() + BURN_TICK_INTERVAL;
                    sink.enqueue(first_tick, CombatEvent::BurnTick { target });
                }
            }
            DebuffKind::Wound => {
                self.apply::<WoundEffect>(application, world, sink);
            }
            DebuffKind::Shred => {
                self.apply::<ShredEffect>(application, world, sink);
                sink.enqueue_now(CombatEvent::RecalculateStats { entity: target });
            }
            DebuffKind::Sunder => {
                self.apply::<SunderEffect>(application, world, sink);
                sink.enqueue_now(CombatEvent::RecalculateStats { entity: target });
            }
        }
    }

    fn expire<C: Debuff>(&self, target: Entity, world: &mut World, now: f64) -> bool {
        // Extended since this expiry was scheduled
        if world.get::<C>(target).map_or(true, |c| c.timer().is_active(now)) {
            return false;
        }
        world.remove::<C>(target);
        trace!("{target}: {:?} expired at t={now:.2}", C::DEBUFF);
        true
    }

    fn on_expired(
        &self,
        target: Entity,
        kind: DebuffKind,
        world: &mut World,
        sink: &mut EventSink<'_>,
    ) {
        let now = sink.now();
        let resists_changed = match kind {
            DebuffKind::Burn => {
                self.expire::<BurnEffect>(target, world, now);
                false
            }
            DebuffKind::Wound => {
                self.expire::<WoundEffect>(target, world, now);
                false
            }
            DebuffKind::Shred => self.expire::<ShredEffect>(target, world, now),
            DebuffKind::Sunder => self.expire::<SunderEffect>(target, world, now),
        };
        if resists_changed {
            sink.enqueue_now(CombatEvent::RecalculateStats { entity: target });
        }
    }

    fn on_burn_tick(&self, target: Entity, world: &mut World, sink: &mut EventSink<'_>) {
        let now = sink.now();
        if !world.is_alive(target) {
            world.remove::<BurnEffect>(target);
            return;
        }
        let Some(timer) = world.get::<BurnEffect>(target).map(|b| b.timer.clone()) else {
            return;
        };
        if now > timer.end_time + TIME_EPSILON {
            world.remove::<BurnEffect>(target);
            return;
        }
        let max_hp = world.get::<Health>(target).map_or(0.0, |h| h.final_max_hp);
        let amount = max_hp * timer.value;
        trace!("{target}: burn tick {amount:.1} from {}", timer.source);
        sink.enqueue_now(CombatEvent::DamageApplied(DamageApplied::true_damage(
            timer.source,
            target,
            DamageKind::Burn,
            amount,
        )));

        let next = now + BURN_TICK_INTERVAL;
        if next <= timer.end_time + TIME_EPSILON {
            sink.enqueue(next, CombatEvent::BurnTick { target });
        } else {
            world.remove::<BurnEffect>(target);
        }
    }
}

impl EventHandler for DebuffSystem {
    fn name(&self) -> &str {
        "DebuffSystem"
    }

    fn can_handle(&self, kind: EventKind) -> bool {
        matches!(
            kind,
            EventKind::ApplyDebuff | EventKind::DebuffExpired | EventKind::BurnTick
        )
    }

    fn handle(&mut self, event: &ScheduledEvent, world: &mut World, sink: &mut EventSink<'_>) {
        match event.event {
            CombatEvent::ApplyDebuff(application) => self.on_apply(&application, world, sink),
            CombatEvent::DebuffExpired { target, kind } => self.on_expired(target, kind, world, sink),
            CombatEvent::BurnTick { target } => self.on_burn_tick(target, world, sink),
            _ => {}
        }
    }
}
