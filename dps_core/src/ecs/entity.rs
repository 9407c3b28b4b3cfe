//! Entity - Opaque identity naming a bundle of components

use serde::{Deserialize, Serialize};
use std::fmt;

/// An entity id. Carries no data of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Entity(u32);

impl Entity {
    /// Raw numeric id
    pub fn id(self) -> u32 {
        self.0
    }

    pub(crate) fn from_raw(id: u32) -> Self {
        Entity(id)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity {}", self.0)
    }
}
