//! Rapidfire - team attack speed plus per-attack stacks for its members

use super::TraitHandler;
use crate::bonus::BonusAccumulator;
use crate::components::{RapidfireEffect, Team, TraitBonuses, Traits};
use crate::data::{trait_names, TraitEffect};
use crate::ecs::{Entity, World};
use crate::events::{CombatEvent, EventKind, EventSink, ScheduledEvent};
use tracing::{debug, info, warn};

/// Team-wide attack speed variable of the Rapidfire tier rows
const TEAM_ATTACK_SPEED_KEY: &str = "{b6739a03}";

#[derive(Debug, Clone, Copy, Default)]
pub struct RapidfireHandler;

fn team_members(world: &World, team: u8) -> Vec<Entity> {
    world
        .query::<Team>()
        .into_iter()
        .filter(|&e| world.team_of(e) == Some(team))
        .collect()
}

impl TraitHandler for RapidfireHandler {
    fn api_name(&self) -> &'static str {
        trait_names::RAPIDFIRE
    }

    fn handles(&self, kind: EventKind) -> bool {
        kind == EventKind::AttackLanded
    }

    fn on_activate(&self, team: u8, effect: &TraitEffect, world: &mut World) {
        let (Some(team_as), Some(as_per_stack), Some(max_stacks)) = (
            effect.variable(TEAM_ATTACK_SPEED_KEY),
            effect.variable("AttackSpeed"),
            effect.variable("MaxStacks"),
        ) else {
            warn!("Rapidfire tier for team {team} is missing variables; not activated");
            return;
        };
        let max_stacks = max_stacks.round().max(0.0) as u32;
        info!("Team {team}: Rapidfire active (+{:.0}% AS team-wide)", team_as * 100.0);

        for entity in team_members(world, team) {
            if team_as != 0.0 {
                let bonus = BonusAccumulator {
                    percent_as: team_as,
                    ..Default::default()
                };
                match world.get_mut::<TraitBonuses>(entity) {
                    Some(bonuses) => bonuses.grant(trait_names::RAPIDFIRE, bonus),
                    None => {
                        let mut bonuses = TraitBonuses::new();
                        bonuses.grant(trait_names::RAPIDFIRE, bonus);
                        world.add_component(entity, bonuses);
                    }
                }
            }

            let has_trait = world
                .get::<Traits>(entity)
                .is_some_and(|t| t.has_trait(trait_names::RAPIDFIRE));
            if has_trait && !world.has::<RapidfireEffect>(entity) {
                debug!("{entity}: Rapidfire stacks enabled ({max_stacks} max)");
                world.add_component(entity, RapidfireEffect::new(max_stacks, as_per_stack));
            }
        }
    }

    fn handle(
        &self,
        event: &ScheduledEvent,
        entity: Entity,
        world: &mut World,
        sink: &mut EventSink<'_>,
    ) {
        let CombatEvent::AttackLanded { source, .. } = event.event else {
            return;
        };
        if source != entity {
            return;
        }
        let Some(effect) = world.get_mut::<RapidfireEffect>(entity) else {
            return;
        };
        if effect.add_stack() {
            debug!(
                "{entity}: Rapidfire {}/{}",
                effect.current_stacks, effect.max_stacks
            );
            sink.enqueue_now(CombatEvent::RecalculateStats { entity });
        }
    }

    fn on_deactivate(&self, team: u8, _effect: &TraitEffect, world: &mut World) {
        for entity in team_members(world, team) {
            if let Some(bonuses) = world.get_mut::<TraitBonuses>(entity) {
                bonuses.revoke(trait_names::RAPIDFIRE);
            }
            world.remove::<RapidfireEffect>(entity);
        }
    }

    fn reset(&self, world: &mut World) {
        for entity in world.query::<RapidfireEffect>() {
            world.remove::<RapidfireEffect>(entity);
        }
        for entity in world.query::<TraitBonuses>() {
            if let Some(bonuses) = world.get_mut::<TraitBonuses>(entity) {
                bonuses.revoke(trait_names::RAPIDFIRE);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bonus::BonusSource;
    use crate::components::Health;
    use crate::events::EventQueue;

    fn rapidfire_tier() -> TraitEffect {
        let mut effect = TraitEffect {
            min_units: 2,
            ..Default::default()
        };
        effect.variables.insert(TEAM_ATTACK_SPEED_KEY.to_string(), 0.1);
        effect.variables.insert("AttackSpeed".to_string(), 0.04);
        effect.variables.insert("MaxStacks".to_string(), 10.0);
        effect
    }

    fn unit(world: &mut World, team: u8, traits: &[&str]) -> Entity {
        let e = world.create_entity();
        world.add_component(e, Team::new(team));
        world.add_component(e, Health::new(500.0, 0.0, 0.0));
        world.add_component(
            e,
            Traits::new(traits.iter().map(|t| t.to_string()).collect()),
        );
        e
    }

    #[test]
    fn test_activation_scopes() {
        let mut world = World::new();
        let member = unit(&mut world, 0, &[trait_names::RAPIDFIRE]);
        let teammate = unit(&mut world, 0, &[]);
        let enemy = unit(&mut world, 1, &[trait_names::RAPIDFIRE]);

        RapidfireHandler.on_activate(0, &rapidfire_tier(), &mut world);

        assert!(world.has::<RapidfireEffect>(member));
        assert!(!world.has::<RapidfireEffect>(teammate));
        assert!(world.has::<TraitBonuses>(teammate));
        assert!(!world.has::<TraitBonuses>(enemy));
        assert!(!world.has::<RapidfireEffect>(enemy));

        let mut total = BonusAccumulator::new();
        world.get::<TraitBonuses>(teammate).unwrap().apply(&mut total);
        assert!((total.percent_as - 0.1).abs() < 1e-9);

        RapidfireHandler.on_deactivate(0, &rapidfire_tier(), &mut world);
        assert!(!world.has::<RapidfireEffect>(member));
        assert!(world.get::<TraitBonuses>(teammate).unwrap().is_empty());
    }

    #[test]
    fn test_stacks_on_own_attacks() {
        let mut world = World::new();
        let member = unit(&mut world, 0, &[trait_names::RAPIDFIRE]);
        let enemy = unit(&mut world, 1, &[]);
        RapidfireHandler.on_activate(0, &rapidfire_tier(), &mut world);

        let mut queue = EventQueue::new();
        let mut sink = EventSink::new(&mut queue, 1.0);
        let landed = ScheduledEvent {
            timestamp: 1.0,
            sequence: 0,
            event: CombatEvent::AttackLanded {
                source: member,
                target: enemy,
                base_damage: 50.0,
            },
        };
        for _ in 0..12 {
            RapidfireHandler.handle(&landed, member, &mut world, &mut sink);
        }
        // Not the attacker
        RapidfireHandler.handle(&landed, enemy, &mut world, &mut sink);

        assert_eq!(world.get::<RapidfireEffect>(member).unwrap().current_stacks, 10);
        assert_eq!(queue.len(), 10);
    }

    #[test]
    fn test_missing_variables_skip_activation() {
        let mut world = World::new();
        let member = unit(&mut world, 0, &[trait_names::RAPIDFIRE]);
        RapidfireHandler.on_activate(0, &TraitEffect::default(), &mut world);
        assert!(!world.has::<RapidfireEffect>(member));
    }
}
