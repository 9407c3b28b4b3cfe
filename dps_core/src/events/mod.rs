//! Event bus - scheduled combat events and their delivery

mod bus;
mod queue;
mod types;

pub use bus::{EventBus, EventHandler, EventSink};
pub use queue::{EventQueue, ScheduledEvent};
pub use types::{CombatEvent, DamageApplied, DebuffApplication, EventKind};
