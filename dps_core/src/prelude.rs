//! Prelude module for convenient imports
//!
//! ```rust
//! use dps_core::prelude::*;
//! ```

// ECS and events
pub use crate::ecs::{Entity, World};
pub use crate::events::{CombatEvent, EventBus, EventKind};

// Components
pub use crate::components::{
    ActionState, Attack, ChampionInfo, Crit, DamageStats, Equipment, Health, Mana, Position,
    Spell, State, Team, Traits,
};

// Data and setup
pub use crate::data::{load_set_data, GameData, Item};
pub use crate::factory::{ChampionBuilder, ChampionFactory};
pub use crate::managers::EquipmentManager;

// Running
pub use crate::config::SimulationConfig;
pub use crate::simulation::{run_simulation, Simulation, SimulationSummary, TerminationReason};

// Errors
pub use crate::error::{SimError, SimResult};
