//! Action decision - what an idle champion does next

use crate::components::{ActionState, Attack, Mana, Spell, State};
use crate::ecs::{Entity, World};
use crate::events::{CombatEvent, EventHandler, EventKind, EventSink, ScheduledEvent};
use tracing::trace;

/// Outcome of one decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    CastSpell,
    StartAttack,
    Wait,
}

/// Decides on every `ChampionAction`. Deciding twice at the same time gives
/// the same answer and the second start request is rejected by the state check
/// in the attack and cast systems.
#[derive(Debug, Clone, Copy)]
pub struct ActionDecisionSystem {
    pub enable_auto_attacks: bool,
    pub enable_spell_casts: bool,
}

impl Default for ActionDecisionSystem {
    fn default() -> Self {
        ActionDecisionSystem {
            enable_auto_attacks: true,
            enable_spell_casts: true,
        }
    }
}

impl ActionDecisionSystem {
    pub fn new(enable_auto_attacks: bool, enable_spell_casts: bool) -> Self {
        ActionDecisionSystem {
            enable_auto_attacks,
            enable_spell_casts,
        }
    }

    pub fn decide(&self, world: &World, entity: Entity) -> Decision {
        if !world.is_alive(entity) {
            return Decision::Wait;
        }
        let (Some(state), Some(attack), Some(mana)) = (
            world.get::<State>(entity),
            world.get::<Attack>(entity),
            world.get::<Mana>(entity),
        ) else {
            return Decision::Wait;
        };
        if state.is_stunned || state.is_busy() {
            return Decision::Wait;
        }

        if self.enable_spell_casts && mana.is_full() && world.has::<Spell>(entity) {
            if state.is(ActionState::AttackRecovering) {
                return Decision::Wait;
            }
            return Decision::CastSpell;
        }

        if state.is(ActionState::AttackCoolingDown) || state.is(ActionState::AttackRecovering) {
            return Decision::Wait;
        }
        if !self.enable_auto_attacks || attack.final_as <= 0.0 {
            return Decision::Wait;
        }
        Decision::StartAttack
    }
}

impl EventHandler for ActionDecisionSystem {
    fn name(&self) -> &str {
        "ActionDecisionSystem"
    }

    fn can_handle(&self, kind: EventKind) -> bool {
        kind == EventKind::ChampionAction
    }

    fn handle(&mut self, event: &ScheduledEvent, world: &mut World, sink: &mut EventSink<'_>) {
        let CombatEvent::ChampionAction { entity } = event.event else {
            return;
        };
        let decision = self.decide(world, entity);
        trace!("{entity}: decision {decision:?} at t={:.2}", sink.now());
        match decision {
            Decision::CastSpell => {
                sink.enqueue_now(CombatEvent::SpellCastStart { entity });
            }
            Decision::StartAttack => {
                sink.enqueue_now(CombatEvent::AttackStart { entity });
            }
            Decision::Wait => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Health;

    fn champion(world: &mut World, max_mana: f64, initial_mana: f64, attack_speed: f64) -> Entity {
        let e = world.create_entity();
        world.add_component(e, Health::new(500.0, 0.0, 0.0));
        world.add_component(e, Attack::new(50.0, attack_speed, 1.0));
        world.add_component(e, Mana::new(max_mana, initial_mana));
        world.add_component(e, Spell::new("Test", max_mana));
        world.add_component(e, State::new());
        e
    }

    #[test]
    fn test_full_mana_casts_first() {
        let mut world = World::new();
        let e = champion(&mut world, 60.0, 60.0, 0.7);
        let system = ActionDecisionSystem::default();
        assert_eq!(system.decide(&world, e), Decision::CastSpell);

        world.get_mut::<State>(e).unwrap().transition(ActionState::AttackRecovering, 0.0, 0.2);
        assert_eq!(system.decide(&world, e), Decision::Wait);
    }

    #[test]
    fn test_zero_max_mana_never_casts() {
        let mut world = World::new();
        let e = champion(&mut world, 0.0, 0.0, 0.7);
        assert_eq!(ActionDecisionSystem::default().decide(&world, e), Decision::StartAttack);
    }

    #[test]
    fn test_waits_when_unable() {
        let mut world = World::new();
        let e = champion(&mut world, 60.0, 0.0, 0.0);
        let system = ActionDecisionSystem::default();
        assert_eq!(system.decide(&world, e), Decision::Wait);

        world.get_mut::<Attack>(e).unwrap().final_as = 0.8;
        world.get_mut::<State>(e).unwrap().start_stun(0.0, 1.0);
        assert_eq!(system.decide(&world, e), Decision::Wait);
        world.get_mut::<State>(e).unwrap().clear_stun();
        assert_eq!(system.decide(&world, e), Decision::StartAttack);

        let flags_off = ActionDecisionSystem::new(false, true);
        assert_eq!(flags_off.decide(&world, e), Decision::Wait);
    }

    #[test]
    fn test_handler_enqueues_start() {
        let mut world = World::new();
        let e = champion(&mut world, 0.0, 0.0, 0.7);
        let mut queue = crate::events::EventQueue::new();
        let mut sink = EventSink::new(&mut queue, 1.5);
        let action = ScheduledEvent {
            timestamp: 1.5,
            sequence: 0,
            event: CombatEvent::ChampionAction { entity: e },
        };
        ActionDecisionSystem::default().handle(&action, &mut world, &mut sink);
        let next = queue.pop_due(1.5).unwrap();
        assert_eq!(next.event, CombatEvent::AttackStart { entity: e });
    }
}
