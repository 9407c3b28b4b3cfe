//! Systems - stat derivation, item and trait effects, the action state machine and damage

pub mod action;
pub mod auto_attack;
pub mod crowd_control;
pub mod damage;
pub mod debuffs;
pub mod items;
pub mod spell_cast;
pub mod stats;
pub mod targeting;
pub mod traits;

pub use action::{ActionDecisionSystem, Decision};
pub use auto_attack::AutoAttackSystem;
pub use crowd_control::{apply_stun, CrowdControlSystem};
pub use damage::DamageSystem;
pub use debuffs::{clear_debuffs, heal, DebuffSystem};
pub use items::{
    AbilityCritSystem, DynamicEventItemSystem, DynamicTimeItemSystem, ItemHandler, ItemRegistry,
    StaticItemSystem,
};
pub use spell_cast::SpellCastSystem;
pub use stats::{recalculate, StatCalculationSystem};
pub use targeting::{enemies_within, living_units_by_team, nearest_enemy};
pub use traits::{DynamicTraitSystem, TraitEventRouter, TraitHandler, TraitRegistry};
