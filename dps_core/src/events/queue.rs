//! EventQueue - Min-heap of events keyed by (timestamp, insertion order)

use super::CombatEvent;
use crate::ecs::Entity;
use crate::types::TIME_EPSILON;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

/// An event with its delivery time
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduledEvent {
    pub timestamp: f64,
    /// Insertion counter, breaks timestamp ties FIFO
    pub sequence: u64,
    pub event: CombatEvent,
}

impl Eq for ScheduledEvent {}

impl Ord for ScheduledEvent {
    // Reversed so BinaryHeap pops the earliest event first
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .timestamp
            .total_cmp(&self.timestamp)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for ScheduledEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Pending events.
///
/// At most one `ChampionAction` may be outstanding per entity; further
/// requests are dropped until the pending one is delivered.
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    heap: BinaryHeap<ScheduledEvent>,
    next_sequence: u64,
    pending_actions: HashSet<Entity>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an event. Returns false if it was dropped.
    pub fn push(&mut self, timestamp: f64, event: CombatEvent) -> bool {
        if timestamp.is_nan() {
            tracing::warn!("Dropping {event} with NaN timestamp");
            return false;
        }
        if let CombatEvent::ChampionAction { entity } = event {
            if !self.pending_actions.insert(entity) {
                return false;
            }
        }
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.heap.push(ScheduledEvent {
            timestamp,
            sequence,
            event,
        });
        true
    }

    /// Pop the earliest event if it is due at `now`
    pub fn pop_due(&mut self, now: f64) -> Option<ScheduledEvent> {
        if self.heap.peek()?.timestamp > now + TIME_EPSILON {
            return None;
        }
        let scheduled = self.heap.pop()?;
        if let CombatEvent::ChampionAction { entity } = scheduled.event {
            self.pending_actions.remove(&entity);
        }
        Some(scheduled)
    }

    pub fn peek_time(&self) -> Option<f64> {
        self.heap.peek().map(|e| e.timestamp)
    }

    pub fn has_pending_action(&self, entity: Entity) -> bool {
        self.pending_actions.contains(&entity)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
        self.pending_actions.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn e(id: u32) -> Entity {
        Entity::from_raw(id)
    }

    #[test]
    fn test_time_then_fifo_order() {
        let mut queue = EventQueue::new();
        queue.push(2.0, CombatEvent::AttackStart { entity: e(1) });
        queue.push(1.0, CombatEvent::AttackStart { entity: e(2) });
        queue.push(1.0, CombatEvent::AttackStart { entity: e(3) });

        let order: Vec<Entity> = std::iter::from_fn(|| queue.pop_due(10.0))
            .map(|s| s.event.source())
            .collect();
        assert_eq!(order, vec![e(2), e(3), e(1)]);
    }

    #[test]
    fn test_pop_due_respects_now() {
        let mut queue = EventQueue::new();
        queue.push(0.5, CombatEvent::AttackStart { entity: e(1) });
        assert!(queue.pop_due(0.4).is_none());
        assert!(queue.pop_due(0.5).is_some());
        assert!(queue.is_empty());
    }

    #[test]
    fn test_champion_action_deduplicated() {
        let mut queue = EventQueue::new();
        assert!(queue.push(0.0, CombatEvent::ChampionAction { entity: e(1) }));
        assert!(!queue.push(0.0, CombatEvent::ChampionAction { entity: e(1) }));
        assert!(queue.push(0.0, CombatEvent::ChampionAction { entity: e(2) }));
        assert_eq!(queue.len(), 2);

        queue.pop_due(0.0);
        assert!(!queue.has_pending_action(e(1)));
        assert!(queue.push(0.0, CombatEvent::ChampionAction { entity: e(1) }));
    }

    #[test]
    fn test_nan_rejected() {
        let mut queue = EventQueue::new();
        assert!(!queue.push(f64::NAN, CombatEvent::Death { entity: e(1) }));
        assert!(queue.is_empty());
    }
}
