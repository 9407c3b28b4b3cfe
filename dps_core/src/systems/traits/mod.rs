//! Dynamic traits - tier resolution, activation and event routing
//!
//! Trait handlers live in a [`TraitRegistry`] keyed by trait api name.
//! [`DynamicTraitSystem`] activates them once per combat from the counted
//! tiers; [`TraitEventRouter`] sits on the event bus and forwards events to
//! the handlers of the units involved.

mod counter;
mod rapidfire;

pub use counter::{active_tier, count_traits, TeamTraitState};
pub use rapidfire::RapidfireHandler;

use crate::components::Traits;
use crate::data::{GameData, TraitEffect};
use crate::ecs::{Entity, World};
use crate::events::{CombatEvent, EventHandler, EventKind, EventSink, ScheduledEvent};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, trace, warn};

/// Behaviour of one trait with dynamic effects
pub trait TraitHandler: Send + Sync {
    fn api_name(&self) -> &'static str;

    /// Event kinds this trait reacts to
    fn handles(&self, _kind: EventKind) -> bool {
        false
    }

    /// Apply the tier to a team. Called once per combat after tiers are known.
    fn on_activate(&self, team: u8, effect: &TraitEffect, world: &mut World);

    /// React to an event involving `entity`
    fn handle(
        &self,
        _event: &ScheduledEvent,
        _entity: Entity,
        _world: &mut World,
        _sink: &mut EventSink<'_>,
    ) {
    }

    /// Reverse what `on_activate` granted
    fn on_deactivate(&self, team: u8, effect: &TraitEffect, world: &mut World);

    /// Drop per-entity trait state
    fn reset(&self, world: &mut World);
}

/// Trait handlers by api name
#[derive(Default)]
pub struct TraitRegistry {
    handlers: BTreeMap<&'static str, Box<dyn TraitHandler>>,
}

impl TraitRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, handler: Box<dyn TraitHandler>) {
        let name = handler.api_name();
        if self.handlers.insert(name, handler).is_some() {
            warn!("Replaced trait handler for {name}");
        }
    }

    pub fn get(&self, api_name: &str) -> Option<&dyn TraitHandler> {
        self.handlers.get(api_name).map(|h| h.as_ref())
    }

    pub fn contains(&self, api_name: &str) -> bool {
        self.handlers.contains_key(api_name)
    }

    pub fn handlers(&self) -> impl Iterator<Item = &dyn TraitHandler> {
        self.handlers.values().map(|h| h.as_ref())
    }

    /// Registry with every built-in trait
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(RapidfireHandler));
        registry
    }
}

impl std::fmt::Debug for TraitRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TraitRegistry")
            .field("handlers", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Resolves trait tiers at combat start and drives handler activation
#[derive(Debug)]
pub struct DynamicTraitSystem {
    registry: Arc<TraitRegistry>,
    state: TeamTraitState,
}

impl DynamicTraitSystem {
    pub fn new(registry: Arc<TraitRegistry>) -> Self {
        DynamicTraitSystem {
            registry,
            state: TeamTraitState::default(),
        }
    }

    pub fn state(&self) -> &TeamTraitState {
        &self.state
    }

    /// Event-bus handler sharing this system's registry
    pub fn router(&self) -> TraitEventRouter {
        TraitEventRouter::new(Arc::clone(&self.registry))
    }

    /// Count traits, then activate every active trait that has a handler.
    /// Tiers stay fixed for the rest of the combat.
    pub fn activate(&mut self, world: &mut World, data: &GameData) {
        self.state = count_traits(world, data);
        for (team, name, effect) in self.state.active_traits() {
            match self.registry.get(name) {
                Some(handler) => {
                    info!("Team {team}: activating {name}");
                    handler.on_activate(team, effect, world);
                }
                None => debug!("Team {team}: {name} active with no dynamic handler"),
            }
        }
    }

    /// Reverse every activation and forget the resolved tiers
    pub fn deactivate_all(&mut self, world: &mut World) {
        for (team, name, effect) in self.state.active_traits() {
            if let Some(handler) = self.registry.get(name) {
                handler.on_deactivate(team, effect, world);
            }
        }
        self.state.clear();
    }

    /// Reset every registered handler
    pub fn reset(&self, world: &mut World) {
        for handler in self.registry.handlers() {
            trace!("Resetting trait {}", handler.api_name());
            handler.reset(world);
        }
    }
}

/// Forwards attack and damage events to the trait handlers of the units involved
#[derive(Debug, Clone)]
pub struct TraitEventRouter {
    registry: Arc<TraitRegistry>,
}

impl TraitEventRouter {
    pub fn new(registry: Arc<TraitRegistry>) -> Self {
        TraitEventRouter { registry }
    }
}

impl EventHandler for TraitEventRouter {
    fn name(&self) -> &str {
        "TraitEventRouter"
    }

    fn can_handle(&self, kind: EventKind) -> bool {
        self.registry.handlers().any(|h| h.handles(kind))
    }

    fn handle(&mut self, event: &ScheduledEvent, world: &mut World, sink: &mut EventSink<'_>) {
        let mut involved = match &event.event {
            CombatEvent::AttackLanded { source, target, .. } => vec![*source, *target],
            CombatEvent::DamageApplied(damage) => vec![damage.source, damage.target],
            _ => return,
        };
        involved.dedup();
        let kind = event.event.kind();

        for entity in involved {
            let names: Vec<String> = match world.get::<Traits>(entity) {
                Some(traits) => traits.names().to_vec(),
                None => continue,
            };
            for name in &names {
                if let Some(handler) = self.registry.get(name) {
                    if handler.handles(kind) {
                        handler.handle(event, entity, world, sink);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{ChampionInfo, Health, RapidfireEffect, Team};
    use crate::data::{trait_names, TraitData};
    use crate::events::EventQueue;

    fn rapidfire_data() -> GameData {
        let mut tier = TraitEffect {
            min_units: 2,
            max_units: 25000,
            ..Default::default()
        };
        tier.variables.insert("{b6739a03}".to_string(), 0.1);
        tier.variables.insert("AttackSpeed".to_string(), 0.04);
        tier.variables.insert("MaxStacks".to_string(), 10.0);
        GameData::from_parts(
            "TFTSet14",
            Vec::new(),
            Vec::new(),
            vec![TraitData {
                api_name: trait_names::RAPIDFIRE.to_string(),
                name: "Rapidfire".to_string(),
                effects: vec![tier],
            }],
        )
    }

    fn unit(world: &mut World, api: &str) -> Entity {
        let e = world.create_entity();
        world.add_component(e, Team::new(0));
        world.add_component(e, Health::new(500.0, 0.0, 0.0));
        world.add_component(e, ChampionInfo::new(api, api, 1, 1));
        world.add_component(e, Traits::new(vec![trait_names::RAPIDFIRE.to_string()]));
        e
    }

    #[test]
    fn test_activate_and_reset() {
        let mut world = World::new();
        let a = unit(&mut world, "TFT14_Jinx");
        let b = unit(&mut world, "TFT14_Kindred");

        let mut system = DynamicTraitSystem::new(Arc::new(TraitRegistry::with_defaults()));
        system.activate(&mut world, &rapidfire_data());
        assert!(system.state().active_effect(0, trait_names::RAPIDFIRE).is_some());
        assert!(world.has::<RapidfireEffect>(a) && world.has::<RapidfireEffect>(b));

        system.reset(&mut world);
        assert!(!world.has::<RapidfireEffect>(a));
    }

    #[test]
    fn test_router_forwards_attacks() {
        let mut world = World::new();
        let a = unit(&mut world, "TFT14_Jinx");
        let b = unit(&mut world, "TFT14_Kindred");
        let mut system = DynamicTraitSystem::new(Arc::new(TraitRegistry::with_defaults()));
        system.activate(&mut world, &rapidfire_data());

        let mut router = system.router();
        assert!(router.can_handle(EventKind::AttackLanded));
        assert!(!router.can_handle(EventKind::Death));

        let mut queue = EventQueue::new();
        let mut sink = EventSink::new(&mut queue, 1.0);
        let landed = ScheduledEvent {
            timestamp: 1.0,
            sequence: 0,
            event: CombatEvent::AttackLanded {
                source: a,
                target: b,
                base_damage: 10.0,
            },
        };
        router.handle(&landed, &mut world, &mut sink);
        assert_eq!(world.get::<RapidfireEffect>(a).unwrap().current_stacks, 1);
        assert_eq!(world.get::<RapidfireEffect>(b).unwrap().current_stacks, 0);
    }
}
