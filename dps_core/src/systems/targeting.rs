//! Targeting - nearest living enemy

use crate::components::{Health, Position, Team};
use crate::ecs::{ComponentKind, Entity, World};
use std::collections::BTreeMap;

/// Nearest living unit on another team, by 2-D distance.
/// Ties go to the lowest entity id. Units without a Position stand at the origin.
pub fn nearest_enemy(world: &World, entity: Entity) -> Option<Entity> {
    let team = world.get::<Team>(entity)?.id;
    let origin = world.get::<Position>(entity).copied().unwrap_or_default();

    let mut best: Option<(f64, Entity)> = None;
    for candidate in world.entities_with(&[ComponentKind::Team, ComponentKind::Health]) {
        if candidate == entity || world.team_of(candidate) == Some(team) {
            continue;
        }
        if !world.get::<Health>(candidate).is_some_and(Health::is_alive) {
            continue;
        }
        let position = world.get::<Position>(candidate).copied().unwrap_or_default();
        let distance = origin.distance_squared(&position);
        match best {
            Some((best_distance, _)) if distance >= best_distance => {}
            _ => best = Some((distance, candidate)),
        }
    }
    best.map(|(_, e)| e)
}

/// Living enemies within `range` of the entity, in id order
pub fn enemies_within(world: &World, entity: Entity, range: f64) -> Vec<Entity> {
    let Some(team) = world.team_of(entity) else {
        return Vec::new();
    };
    let origin = world.get::<Position>(entity).copied().unwrap_or_default();
    world
        .entities_with(&[ComponentKind::Team, ComponentKind::Health])
        .into_iter()
        .filter(|&candidate| world.team_of(candidate) != Some(team) && world.is_alive(candidate))
        .filter(|&candidate| {
            let position = world.get::<Position>(candidate).copied().unwrap_or_default();
            origin.distance(&position) <= range
        })
        .collect()
}

/// Living units per team. Teams with no living units are still listed with 0.
pub fn living_units_by_team(world: &World) -> BTreeMap<u8, usize> {
    let mut counts = BTreeMap::new();
    for entity in world.entities_with(&[ComponentKind::Team, ComponentKind::Health]) {
        let Some(team) = world.team_of(entity) else {
            continue;
        };
        let alive = usize::from(world.is_alive(entity));
        *counts.entry(team).or_insert(0) += alive;
    }
    counts
}
