//! Error taxonomy for the combat engine

use crate::config::ConfigError;
use crate::ecs::Entity;
use thiserror::Error;

/// What kind of catalogue lookup failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    Champion,
    Item,
    Trait,
    Mutator,
    EquippedItem,
}

impl std::fmt::Display for LookupKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            LookupKind::Champion => "champion",
            LookupKind::Item => "item",
            LookupKind::Trait => "trait",
            LookupKind::Mutator => "mutator",
            LookupKind::EquippedItem => "equipped item",
        };
        f.write_str(label)
    }
}

/// Errors surfaced by engine entry points
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Unknown {kind} '{name}'{hint}")]
    LookupFailure {
        kind: LookupKind,
        name: String,
        /// Extra diagnostic, e.g. the list of available mutators
        hint: String,
    },
    #[error("Cannot equip '{item}' on {entity}: inventory is full")]
    InventoryFull { entity: Entity, item: String },
    #[error("Cannot equip '{item}' on {entity}: unique item already equipped")]
    UniqueViolation { entity: Entity, item: String },
    #[error("{entity} is missing required component {component}")]
    MissingComponent {
        entity: Entity,
        component: &'static str,
    },
    #[error("Invalid simulation config: {field} {reason}")]
    InvalidConfig { field: &'static str, reason: String },
    #[error("Invalid data value for {field}: {value}")]
    DataInvariantViolation { field: String, value: f64 },
    #[error("Failed to read data file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse set data: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl SimError {
    /// Lookup failure without an extra hint
    pub fn lookup(kind: LookupKind, name: impl Into<String>) -> Self {
        SimError::LookupFailure {
            kind,
            name: name.into(),
            hint: String::new(),
        }
    }
}

/// Result alias used across the crate
pub type SimResult<T> = Result<T, SimError>;

/// Replace NaN or negative stat values with 0, logging the violation
pub fn sanitize_stat(field: &str, value: f64) -> f64 {
    if !value.is_nan() && value >= 0.0 {
        return value;
    }
    let violation = SimError::DataInvariantViolation {
        field: field.to_string(),
        value,
    };
    tracing::warn!("{violation}; using 0");
    0.0
}
