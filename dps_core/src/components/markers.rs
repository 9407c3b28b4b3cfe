//! Marker components (no payload)

use serde::{Deserialize, Serialize};

/// Abilities can crit because of Infinity Edge or Jeweled Gauntlet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CanAbilityCritFromItems;

/// Abilities can crit because an active trait grants it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CanAbilityCritFromTraits;
