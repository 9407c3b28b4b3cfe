//! Managers - multi-system operations on a single entity

mod equipment;

pub use equipment::EquipmentManager;
