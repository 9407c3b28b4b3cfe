//! EventBus - Time-ordered delivery of combat events to handlers

use super::{CombatEvent, EventKind, EventQueue, ScheduledEvent};
use crate::ecs::World;
use tracing::{trace, warn};

/// Enqueue-only access to the queue, handed to handlers during delivery
pub struct EventSink<'a> {
    queue: &'a mut EventQueue,
    now: f64,
}

impl<'a> EventSink<'a> {
    pub fn new(queue: &'a mut EventQueue, now: f64) -> Self {
        EventSink { queue, now }
    }

    /// Current simulated time
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Schedule an event. Timestamps in the past are clamped to now.
    pub fn enqueue(&mut self, timestamp: f64, event: CombatEvent) -> bool {
        let timestamp = if timestamp < self.now {
            warn!("{event} scheduled at {timestamp:.3} before now {:.3}; clamping", self.now);
            self.now
        } else {
            timestamp
        };
        self.queue.push(timestamp, event)
    }

    /// Schedule an event at the current time
    pub fn enqueue_now(&mut self, event: CombatEvent) -> bool {
        self.queue.push(self.now, event)
    }
}

/// Anything that reacts to delivered events
pub trait EventHandler {
    /// Name used in logs
    fn name(&self) -> &str;

    /// Whether this handler wants events of the given kind
    fn can_handle(&self, _kind: EventKind) -> bool {
        true
    }

    fn handle(&mut self, event: &ScheduledEvent, world: &mut World, sink: &mut EventSink<'_>);
}

/// Event queue plus registered handlers.
///
/// Handlers are called in registration order for each event.
#[derive(Default)]
pub struct EventBus {
    queue: EventQueue,
    handlers: Vec<Box<dyn EventHandler>>,
    archive: Vec<ScheduledEvent>,
    processed: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_handler(&mut self, handler: Box<dyn EventHandler>) {
        trace!("Registered event handler {}", handler.name());
        self.handlers.push(handler);
    }

    pub fn handler_names(&self) -> Vec<&str> {
        self.handlers.iter().map(|h| h.name()).collect()
    }

    pub fn enqueue(&mut self, timestamp: f64, event: CombatEvent) -> bool {
        self.queue.push(timestamp, event)
    }

    /// Enqueue-only view for systems running outside delivery
    pub fn sink(&mut self, now: f64) -> EventSink<'_> {
        EventSink::new(&mut self.queue, now)
    }

    /// Deliver every event due at or before `now`, including events enqueued
    /// by handlers while draining. Returns the number of events delivered.
    pub fn process_due_up_to(&mut self, now: f64, world: &mut World) -> usize {
        let mut delivered = 0;
        while let Some(scheduled) = self.queue.pop_due(now) {
            trace!("t={:.3} {}", scheduled.timestamp, scheduled.event);
            let kind = scheduled.event.kind();
            for handler in self.handlers.iter_mut() {
                if handler.can_handle(kind) {
                    let mut sink = EventSink::new(&mut self.queue, scheduled.timestamp);
                    handler.handle(&scheduled, world, &mut sink);
                }
            }
            self.archive.push(scheduled);
            self.processed += 1;
            delivered += 1;
        }
        delivered
    }

    /// Every delivered event in delivery order
    pub fn archive(&self) -> &[ScheduledEvent] {
        &self.archive
    }

    /// Delivered events of one kind
    pub fn archived_of_kind(&self, kind: EventKind) -> impl Iterator<Item = &ScheduledEvent> {
        self.archive.iter().filter(move |e| e.event.kind() == kind)
    }

    pub fn processed_count(&self) -> u64 {
        self.processed
    }

    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }

    pub fn next_event_time(&self) -> Option<f64> {
        self.queue.peek_time()
    }

    /// Drop pending events and the archive. Handlers stay registered.
    pub fn clear(&mut self) {
        self.queue.clear();
        self.archive.clear();
        self.processed = 0;
    }
}
