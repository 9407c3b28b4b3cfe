//! Item systems - static aggregation, ability crit markers and dynamic item handlers
//!
//! Dynamic items implement [`ItemHandler`] and live in an [`ItemRegistry`]
//! keyed by api name. The registry is built once and shared read-only by the
//! time-driven and event-driven item systems.

mod ability_crit;
mod archangels;
mod blue_buff;
mod dynamic_event;
mod dynamic_time;
mod evenshroud;
mod flickerblade;
mod guinsoos;
mod krakens;
mod nashors;
mod quicksilver;
mod red_buff;
mod shojin;
mod spirit_visage;
mod static_items;
mod titans;
mod void_staff;

pub use ability_crit::AbilityCritSystem;
pub use archangels::ArchangelsStaffHandler;
pub use blue_buff::BlueBuffHandler;
pub use dynamic_event::DynamicEventItemSystem;
pub use dynamic_time::DynamicTimeItemSystem;
pub use evenshroud::EvenshroudHandler;
pub use flickerblade::FlickerbladeHandler;
pub use guinsoos::GuinsoosRagebladeHandler;
pub use krakens::KrakensFuryHandler;
pub use nashors::NashorsToothHandler;
pub use quicksilver::QuicksilverHandler;
pub use red_buff::RedBuffHandler;
pub use shojin::SpearOfShojinHandler;
pub use spirit_visage::SpiritVisageHandler;
pub use static_items::StaticItemSystem;
pub use titans::TitansResolveHandler;
pub use void_staff::VoidStaffHandler;

use crate::components::Equipment;
use crate::data::Item;
use crate::ecs::{Entity, World};
use crate::events::{EventSink, ScheduledEvent};
use std::collections::BTreeMap;
use tracing::{trace, warn};

/// Behaviour of one item with dynamic state
pub trait ItemHandler: Send + Sync {
    fn api_name(&self) -> &'static str;

    /// Effect-table keys this item consumes besides passive stats
    fn effect_keys(&self) -> &'static [&'static str] {
        &[]
    }

    /// A copy was equipped; `count` copies are now held. Adds or refreshes
    /// the effect component.
    fn on_equip(&self, entity: Entity, item: &Item, count: usize, world: &mut World);

    /// A copy was removed; `remaining` copies are still held. Removes the
    /// effect component when none remain.
    fn on_unequip(&self, entity: Entity, remaining: usize, world: &mut World);

    /// Restore per-combat state before combat starts
    fn reset(&self, _entity: Entity, _world: &mut World) {}

    /// Combat begins; runs after every reset and the first stat pass
    fn on_combat_start(&self, _entity: Entity, _world: &mut World, _sink: &mut EventSink<'_>) {}

    /// Advance time-based state by `dt`
    fn tick(&self, _entity: Entity, _dt: f64, _world: &mut World, _sink: &mut EventSink<'_>) {}

    /// React to a delivered event involving `entity`, which holds this item
    fn handle_event(
        &self,
        _entity: Entity,
        _event: &ScheduledEvent,
        _world: &mut World,
        _sink: &mut EventSink<'_>,
    ) {
    }

    fn is_time_based(&self) -> bool {
        false
    }

    fn is_event_based(&self) -> bool {
        false
    }
}

/// Dynamic item handlers by api name
#[derive(Default)]
pub struct ItemRegistry {
    handlers: BTreeMap<&'static str, Box<dyn ItemHandler>>,
}

impl ItemRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler, replacing any previous one for the same item
    pub fn register(&mut self, handler: Box<dyn ItemHandler>) {
        let name = handler.api_name();
        if self.handlers.insert(name, handler).is_some() {
            warn!("Replaced item handler for {name}");
        } else {
            trace!("Registered item handler for {name}");
        }
    }

    pub fn get(&self, api_name: &str) -> Option<&dyn ItemHandler> {
        self.handlers.get(api_name).map(|h| h.as_ref())
    }

    pub fn contains(&self, api_name: &str) -> bool {
        self.handlers.contains_key(api_name)
    }

    pub fn handlers(&self) -> impl Iterator<Item = &dyn ItemHandler> {
        self.handlers.values().map(|h| h.as_ref())
    }

    /// Whether any handler reads this effect key
    pub fn consumes_key(&self, key: &str) -> bool {
        self.handlers().any(|h| h.effect_keys().contains(&key))
    }

    /// Handlers for the items equipped on an entity, one per distinct name
    pub fn equipped_handlers(&self, world: &World, entity: Entity) -> Vec<&dyn ItemHandler> {
        world
            .get::<Equipment>(entity)
            .map(|equipment| {
                equipment
                    .distinct_names()
                    .iter()
                    .filter_map(|name| self.get(name))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Reset the per-combat state of every equipped dynamic item
    pub fn reset_all(&self, world: &mut World) {
        for entity in world.query::<Equipment>() {
            for handler in self.equipped_handlers(world, entity) {
                handler.reset(entity, world);
            }
        }
    }

    /// Fire the combat-start hook of every equipped dynamic item
    pub fn start_combat(&self, world: &mut World, sink: &mut EventSink<'_>) {
        for entity in world.query::<Equipment>() {
            for handler in self.equipped_handlers(world, entity) {
                handler.on_combat_start(entity, world, sink);
            }
        }
    }

    /// Registry with every built-in dynamic item
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(ArchangelsStaffHandler));
        registry.register(Box::new(QuicksilverHandler));
        registry.register(Box::new(TitansResolveHandler));
        registry.register(Box::new(GuinsoosRagebladeHandler));
        registry.register(Box::new(BlueBuffHandler));
        registry.register(Box::new(RedBuffHandler));
        registry.register(Box::new(SpearOfShojinHandler));
        registry.register(Box::new(FlickerbladeHandler));
        registry.register(Box::new(NashorsToothHandler));
        registry.register(Box::new(VoidStaffHandler));
        registry.register(Box::new(SpiritVisageHandler));
        registry.register(Box::new(KrakensFuryHandler));
        registry.register(Box::new(EvenshroudHandler));
        registry
    }
}

impl std::fmt::Debug for ItemRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemRegistry")
            .field("handlers", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::item_names;

    #[test]
    fn test_defaults_registered() {
        let registry = ItemRegistry::with_defaults();
        for name in [
            item_names::ARCHANGELS_STAFF,
            item_names::QUICKSILVER,
            item_names::TITANS_RESOLVE,
            item_names::GUINSOOS_RAGEBLADE,
            item_names::BLUE_BUFF,
            item_names::RED_BUFF,
            item_names::SPEAR_OF_SHOJIN,
            item_names::FLICKERBLADE,
            item_names::NASHORS_TOOTH,
            item_names::VOID_STAFF,
            item_names::SPIRIT_VISAGE,
            item_names::KRAKENS_FURY,
            item_names::EVENSHROUD,
        ] {
            assert!(registry.contains(name), "{name} missing");
        }
        assert!(registry.get(item_names::INFINITY_EDGE).is_none());
        assert!(registry.consumes_key("StackCap"));
        assert!(registry.consumes_key("MRShred"));
        assert!(!registry.consumes_key("AD"));
    }

    #[test]
    fn test_time_and_event_split() {
        let registry = ItemRegistry::with_defaults();
        let time: Vec<&str> = registry
            .handlers()
            .filter(|h| h.is_time_based())
            .map(|h| h.api_name())
            .collect();
        assert_eq!(
            time,
            vec![
                item_names::ARCHANGELS_STAFF,
                item_names::QUICKSILVER,
                item_names::SPIRIT_VISAGE,
            ]
        );
        assert_eq!(registry.handlers().filter(|h| h.is_event_based()).count(), 10);
    }
}
