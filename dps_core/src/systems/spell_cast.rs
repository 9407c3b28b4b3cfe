//! Spell casting - mana spend, cast point and recovery

use crate::components::{ActionState, DamageStats, Mana, Spell, State};
use crate::ecs::{Entity, World};
use crate::events::{CombatEvent, EventHandler, EventKind, EventSink, ScheduledEvent};
use crate::systems::targeting::nearest_enemy;
use crate::types::TIME_EPSILON;
use tracing::{debug, info};

/// Drives the casting half of the action state machine
#[derive(Debug, Clone, Copy, Default)]
pub struct SpellCastSystem;

impl SpellCastSystem {
    pub fn new() -> Self {
        SpellCastSystem
    }

    fn on_cast_start(&self, entity: Entity, world: &mut World, sink: &mut EventSink<'_>) {
        if !world.is_alive(entity) {
            return;
        }
        let can_start = world.get::<State>(entity).is_some_and(|s| {
            !s.is_stunned && !s.is_busy() && !s.is(ActionState::AttackRecovering)
        });
        let mana_full = world.get::<Mana>(entity).is_some_and(Mana::is_full);
        if !can_start || !mana_full {
            return;
        }
        let Some(spell) = world.get::<Spell>(entity) else {
            return;
        };
        let (cost, startup, recovery, lock) = (
            spell.mana_cost,
            spell.cast_startup,
            spell.cast_recovery,
            spell.lock_mana_during_cast,
        );
        let target = nearest_enemy(world, entity);

        if let Some(mana) = world.get_mut::<Mana>(entity) {
            mana.spend(cost);
            mana.locked = lock;
        }
        if let Some(state) = world.get_mut::<State>(entity) {
            state.transition(ActionState::Casting, sink.now(), startup + recovery);
        }
        info!("{entity} begins casting at t={:.2}", sink.now());
        sink.enqueue(
            sink.now() + startup,
            CombatEvent::SpellCast {
                source: entity,
                target,
            },
        );
    }

    fn on_cast(&self, entity: Entity, world: &mut World, sink: &mut EventSink<'_>) {
        let casting = world
            .get::<State>(entity)
            .is_some_and(|s| s.is(ActionState::Casting));
        if !casting {
            return;
        }
        let Some(spell) = world.get_mut::<Spell>(entity) else {
            return;
        };
        spell.cast_count += 1;
        spell.current_cooldown = spell.cast_recovery;
        let recovery = spell.cast_recovery;
        debug!("{entity}: {} resolves (cast #{})", spell.name, spell.cast_count);
        if let Some(stats) = world.get_mut::<DamageStats>(entity) {
            stats.spells_cast += 1;
        }
        sink.enqueue(sink.now() + recovery, CombatEvent::SpellRecoveryEnd { entity });
    }

    fn on_recovery_end(&self, entity: Entity, world: &mut World, sink: &mut EventSink<'_>) {
        let now = sink.now();
        let Some(state) = world.get_mut::<State>(entity) else {
            return;
        };
        if !state.is(ActionState::Casting) {
            return;
        }
        // An attack cooldown interrupted by the cast still runs to its original end
        let resume_cooldown = now + TIME_EPSILON < state.attack_ready_at;
        if resume_cooldown {
            let remaining = state.attack_ready_at - now;
            state.transition(ActionState::AttackCoolingDown, now, remaining);
        } else {
            state.transition(ActionState::Idle, now, 0.0);
        }

        if let Some(mana) = world.get_mut::<Mana>(entity) {
            mana.locked = false;
        }
        if let Some(spell) = world.get_mut::<Spell>(entity) {
            spell.current_cooldown = 0.0;
        }
        if !resume_cooldown {
            sink.enqueue_now(CombatEvent::ChampionAction { entity });
        }
    }
}

impl EventHandler for SpellCastSystem {
    fn name(&self) -> &str {
        "SpellCastSystem"
    }

    fn can_handle(&self, kind: EventKind) -> bool {
        matches!(
            kind,
            EventKind::SpellCastStart | EventKind::SpellCast | EventKind::SpellRecoveryEnd
        )
    }

    fn handle(&mut self, event: &ScheduledEvent, world: &mut World, sink: &mut EventSink<'_>) {
        match event.event {
            CombatEvent::SpellCastStart { entity } => self.on_cast_start(entity, world, sink),
            CombatEvent::SpellCast { source, .. } => self.on_cast(source, world, sink),
            CombatEvent::SpellRecoveryEnd { entity } => self.on_recovery_end(entity, world, sink),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Attack, Health, Team};
    use crate::events::EventQueue;

    fn caster(world: &mut World) -> Entity {
        let e = world.create_entity();
        world.add_component(e, Team::new(0));
        world.add_component(e, Health::new(800.0, 0.0, 0.0));
        world.add_component(e, Attack::new(50.0, 0.5, 1.0));
        world.add_component(e, Mana::new(60.0, 60.0));
        world.add_component(e, Spell::new("Test", 60.0).with_timings(0.5, 0.5));
        world.add_component(e, State::new());
        world.add_component(e, DamageStats::new());
        e
    }

    fn run(system: &mut SpellCastSystem, queue: &mut EventQueue, world: &mut World, until: f64) {
        while let Some(scheduled) = queue.pop_due(until) {
            let mut sink = EventSink::new(queue, scheduled.timestamp);
            if system.can_handle(scheduled.event.kind()) {
                system.handle(&scheduled, world, &mut sink);
            }
        }
    }

    #[test]
    fn test_cast_spends_and_locks_mana() {
        let mut world = World::new();
        let e = caster(&mut world);
        let mut system = SpellCastSystem::new();
        let mut queue = EventQueue::new();
        queue.push(0.0, CombatEvent::SpellCastStart { entity: e });

        run(&mut system, &mut queue, &mut world, 0.2);
        let mana = world.get::<Mana>(e).unwrap();
        assert_eq!(mana.current, 0.0);
        assert!(mana.locked);
        assert!(world.get::<State>(e).unwrap().is(ActionState::Casting));

        run(&mut system, &mut queue, &mut world, 1.0);
        assert!(!world.get::<Mana>(e).unwrap().locked);
        assert!(world.get::<State>(e).unwrap().is(ActionState::Idle));
        assert_eq!(world.get::<Spell>(e).unwrap().cast_count, 1);
        assert_eq!(world.get::<DamageStats>(e).unwrap().spells_cast, 1);
    }

    #[test]
    fn test_interrupted_cooldown_resumes() {
        let mut world = World::new();
        let e = caster(&mut world);
        {
            let state = world.get_mut::<State>(e).unwrap();
            state.transition(ActionState::AttackCoolingDown, 0.0, 2.0);
            state.attack_ready_at = 2.0;
        }
        let mut system = SpellCastSystem::new();
        let mut queue = EventQueue::new();
        queue.push(0.0, CombatEvent::SpellCastStart { entity: e });
        run(&mut system, &mut queue, &mut world, 1.5);

        let state = world.get::<State>(e).unwrap();
        assert!(state.is(ActionState::AttackCoolingDown));
        assert!((state.attack_ready_at - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_cast_without_full_mana() {
        let mut world = World::new();
        let e = caster(&mut world);
        world.get_mut::<Mana>(e).unwrap().current = 30.0;
        let mut system = SpellCastSystem::new();
        let mut queue = EventQueue::new();
        queue.push(0.0, CombatEvent::SpellCastStart { entity: e });
        run(&mut system, &mut queue, &mut world, 5.0);
        assert!(world.get::<State>(e).unwrap().is(ActionState::Idle));
        assert!((world.get::<Mana>(e).unwrap().current - 30.0).abs() < 1e-9);
    }
}
