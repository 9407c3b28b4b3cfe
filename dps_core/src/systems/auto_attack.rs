//! Auto attacks - startup, landing, recovery and cooldown

use crate::components::{ActionState, Attack, DamageStats, State};
use crate::ecs::{Entity, World};
use crate::events::{CombatEvent, EventHandler, EventKind, EventSink, ScheduledEvent};
use crate::systems::targeting::nearest_enemy;
use crate::types::TIME_EPSILON;
use tracing::{debug, trace};

/// Drives the attack half of the action state machine
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoAttackSystem;

impl AutoAttackSystem {
    pub fn new() -> Self {
        AutoAttackSystem
    }

    /// Put every unit that can attack into its first cooldown, ending at
    /// `now + 1 / FinalAS`.
    pub fn start_initial_cooldowns(&self, world: &mut World, sink: &mut EventSink<'_>) {
        let now = sink.now();
        for entity in world.query::<State>() {
            let Some(interval) = world
                .get::<Attack>(entity)
                .filter(|a| a.final_as > 0.0)
                .map(|a| 1.0 / a.final_as)
            else {
                continue;
            };
            let Some(state) = world.get_mut::<State>(entity) else {
                continue;
            };
            state.transition(ActionState::AttackCoolingDown, now, interval);
            state.attack_ready_at = now + interval;
            trace!("{entity}: first attack ready at {:.3}", now + interval);
            sink.enqueue(now + interval, CombatEvent::AttackCooldownEnd { entity });
        }
    }

    fn on_attack_start(&self, entity: Entity, world: &mut World, sink: &mut EventSink<'_>) {
        if !world.is_alive(entity) {
            return;
        }
        let ready = world
            .get::<State>(entity)
            .is_some_and(|s| s.is(ActionState::Idle) && !s.is_stunned);
        if !ready {
            return;
        }
        let Some(target) = nearest_enemy(world, entity) else {
            trace!("{entity}: no target to attack");
            return;
        };
        let Some(attack) = world.get::<Attack>(entity) else {
            return;
        };
        if attack.final_as <= 0.0 {
            return;
        }
        let startup = attack.final_attack_startup;
        let base_damage = attack.final_ad;

        if let Some(state) = world.get_mut::<State>(entity) {
            state.transition(ActionState::AttackStartingUp, sink.now(), startup);
        }
        debug!("{entity}: attack on {target} starts at t={:.2}", sink.now());
        sink.enqueue(
            sink.now() + startup,
            CombatEvent::AttackLanded {
                source: entity,
                target,
                base_damage,
            },
        );
    }

    fn on_attack_landed(&self, entity: Entity, world: &mut World, sink: &mut EventSink<'_>) {
        let starting_up = world
            .get::<State>(entity)
            .is_some_and(|s| s.is(ActionState::AttackStartingUp));
        if !starting_up {
            return;
        }
        let Some(attack) = world.get_mut::<Attack>(entity) else {
            return;
        };
        attack.attack_count += 1;
        let recovery = attack.final_attack_recovery;
        if let Some(stats) = world.get_mut::<DamageStats>(entity) {
            stats.attacks_landed += 1;
        }
        if let Some(state) = world.get_mut::<State>(entity) {
            state.transition(ActionState::AttackRecovering, sink.now(), recovery);
        }
        sink.enqueue(sink.now() + recovery, CombatEvent::AttackRecoveryEnd { entity });
    }

    fn on_recovery_end(&self, entity: Entity, world: &mut World, sink: &mut EventSink<'_>) {
        let recovering = world
            .get::<State>(entity)
            .is_some_and(|s| s.is(ActionState::AttackRecovering));
        if !recovering {
            return;
        }
        let now = sink.now();
        let cooldown = world.get::<Attack>(entity).and_then(Attack::cooldown);
        let Some(state) = world.get_mut::<State>(entity) else {
            return;
        };
        let Some(cooldown) = cooldown else {
            // Attack speed dropped to zero mid-swing
            state.transition(ActionState::Idle, now, 0.0);
            return;
        };
        state.transition(ActionState::AttackCoolingDown, now, cooldown);
        state.attack_ready_at = now + cooldown;
        sink.enqueue(now + cooldown, CombatEvent::AttackCooldownEnd { entity });
        // A cast may interrupt the cooldown if this attack filled the mana bar
        sink.enqueue_now(CombatEvent::ChampionAction { entity });
    }

    fn on_cooldown_end(&self, entity: Entity, world: &mut World, sink: &mut EventSink<'_>) {
        let now = sink.now();
        let Some(state) = world.get_mut::<State>(entity) else {
            return;
        };
        // A cast may have taken over the cooldown; spell recovery resumes it
        if !state.is(ActionState::AttackCoolingDown) || now + TIME_EPSILON < state.attack_ready_at {
            return;
        }
        state.transition(ActionState::Idle, now, 0.0);
        sink.enqueue_now(CombatEvent::ChampionAction { entity });
    }
}

impl EventHandler for AutoAttackSystem {
    fn name(&self) -> &str {
        "AutoAttackSystem"
    }

    fn can_handle(&self, kind: EventKind) -> bool {
        matches!(
            kind,
            EventKind::AttackStart
                | EventKind::AttackLanded
                | EventKind::AttackRecoveryEnd
                | EventKind::AttackCooldownEnd
        )
    }

    fn handle(&mut self, event: &ScheduledEvent, world: &mut World, sink: &mut EventSink<'_>) {
        match event.event {
            CombatEvent::AttackStart { entity } => self.on_attack_start(entity, world, sink),
            CombatEvent::AttackLanded { source, .. } => self.on_attack_landed(source, world, sink),
            CombatEvent::AttackRecoveryEnd { entity } => self.on_recovery_end(entity, world, sink),
            CombatEvent::AttackCooldownEnd { entity } => self.on_cooldown_end(entity, world, sink),
            _ => {}
        }
    }
}
