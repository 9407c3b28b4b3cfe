//! ECS substrate - entities, component stores and queries

mod entity;
mod store;
mod world;

pub use entity::Entity;
pub use store::ComponentStore;
pub use world::{Component, ComponentKind, StatComponentsMut, World};
