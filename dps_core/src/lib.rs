//! dps_core - Deterministic combat engine for auto-battler DPS simulation
//!
//! This library provides:
//! - World: entities and typed component stores with intersection queries
//! - EventBus: time-ordered combat events delivered to registered systems
//! - Stat calculation: Base + Bonus -> Final, rebuilt from bonus sources each pass
//! - Systems: action decisions, auto attacks, spell casts, damage, items and traits
//! - Simulation: fixed-step combat loop producing a [`SimulationSummary`]

pub mod bonus;
pub mod components;
pub mod config;
pub mod data;
pub mod ecs;
pub mod error;
pub mod events;
pub mod factory;
pub mod managers;
pub mod prelude;
pub mod simulation;
pub mod systems;
pub mod types;

// Re-export core types for convenience
pub use config::SimulationConfig;
pub use data::{load_set_data, GameData};
pub use ecs::{Entity, World};
pub use error::{LookupKind, SimError, SimResult};
pub use factory::{ChampionBuilder, ChampionFactory};
pub use managers::EquipmentManager;
pub use simulation::{run_simulation, Simulation, SimulationSummary, TerminationReason};
