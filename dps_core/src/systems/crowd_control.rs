//! Crowd control - stuns and their expiry

use crate::components::State;
use crate::ecs::{Entity, World};
use crate::error::SimResult;
use crate::events::{CombatEvent, EventHandler, EventKind, EventSink, ScheduledEvent};
use crate::types::TIME_EPSILON;
use tracing::debug;

/// Stun `entity` for `duration` seconds from the sink's current time.
///
/// A stunned unit keeps its current action but takes no new decisions until
/// `CrowdControlEnd` fires. A longer stun replaces a shorter one.
pub fn apply_stun(
    world: &mut World,
    sink: &mut EventSink<'_>,
    entity: Entity,
    duration: f64,
) -> SimResult<()> {
    let now = sink.now();
    let state = world.require_mut::<State>(entity)?;
    if state.is_stunned && state.cc_end_time() >= now + duration {
        return Ok(());
    }
    state.start_stun(now, duration.max(0.0));
    debug!("{entity} stunned until t={:.2}", state.cc_end_time());
    sink.enqueue(now + duration.max(0.0), CombatEvent::CrowdControlEnd { entity });
    Ok(())
}

/// Clears expired stuns and lets the unit decide again
#[derive(Debug, Clone, Copy, Default)]
pub struct CrowdControlSystem;

impl CrowdControlSystem {
    pub fn new() -> Self {
        CrowdControlSystem
    }
}

impl EventHandler for CrowdControlSystem {
    fn name(&self) -> &str {
        "CrowdControlSystem"
    }

    fn can_handle(&self, kind: EventKind) -> bool {
        kind == EventKind::CrowdControlEnd
    }

    fn handle(&mut self, event: &ScheduledEvent, world: &mut World, sink: &mut EventSink<'_>) {
        let CombatEvent::CrowdControlEnd { entity } = event.event else {
            return;
        };
        let Some(state) = world.get_mut::<State>(entity) else {
            return;
        };
        // A stun refreshed after this event was scheduled ends later
        if !state.is_stunned || sink.now() + TIME_EPSILON < state.cc_end_time() {
            return;
        }
        state.clear_stun();
        debug!("{entity} recovers from stun at t={:.2}", sink.now());
        if world.is_alive(entity) {
            sink.enqueue_now(CombatEvent::ChampionAction { entity });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimError;
    use crate::events::EventQueue;

    #[test]
    fn test_stun_lifecycle() {
        let mut world = World::new();
        let e = world.create_entity();
        world.add_component(e, State::new());
        let mut queue = EventQueue::new();
        {
            let mut sink = EventSink::new(&mut queue, 1.0);
            apply_stun(&mut world, &mut sink, e, 1.5).unwrap();
        }
        assert!(world.get::<State>(e).unwrap().is_stunned);
        assert_eq!(queue.peek_time(), Some(2.5));

        let mut system = CrowdControlSystem::new();
        let scheduled = queue.pop_due(2.5).unwrap();
        let mut sink = EventSink::new(&mut queue, scheduled.timestamp);
        system.handle(&scheduled, &mut world, &mut sink);
        assert!(!world.get::<State>(e).unwrap().is_stunned);
    }

    #[test]
    fn test_refreshed_stun_ignores_early_end() {
        let mut world = World::new();
        let e = world.create_entity();
        world.add_component(e, State::new());
        let mut queue = EventQueue::new();
        {
            let mut sink = EventSink::new(&mut queue, 0.0);
            apply_stun(&mut world, &mut sink, e, 1.0).unwrap();
        }
        {
            let mut sink = EventSink::new(&mut queue, 0.5);
            apply_stun(&mut world, &mut sink, e, 2.0).unwrap();
        }

        let mut system = CrowdControlSystem::new();
        let first = queue.pop_due(1.0).unwrap();
        let mut sink = EventSink::new(&mut queue, first.timestamp);
        system.handle(&first, &mut world, &mut sink);
        assert!(world.get::<State>(e).unwrap().is_stunned);
    }

    #[test]
    fn test_stun_requires_state() {
        let mut world = World::new();
        let e = world.create_entity();
        let mut queue = EventQueue::new();
        let mut sink = EventSink::new(&mut queue, 0.0);
        assert!(matches!(
            apply_stun(&mut world, &mut sink, e, 1.0),
            Err(SimError::MissingComponent { .. })
        ));
    }
}
