//! Simulation runner - combat setup, fixed-step tick loop and teardown
//!
//! Each tick advances the clock by `TimeStep`, runs the time-driven item
//! system, drains every due event, re-derives stats and finally queues a
//! `ChampionAction` for every unit that is free to act. Combat ends when
//! `MaxTime` is reached or one team has no living unit left.

mod summary;

pub use summary::{ChampionReport, SimulationSummary, TerminationReason};

use crate::components::{ActionState, DamageStats, Health, Mana, State};
use crate::config::SimulationConfig;
use crate::data::GameData;
use crate::ecs::{Entity, World};
use crate::error::SimResult;
use crate::events::{CombatEvent, EventBus};
use crate::managers::EquipmentManager;
use crate::systems::{
    apply_stun, clear_debuffs, living_units_by_team, AbilityCritSystem, ActionDecisionSystem,
    AutoAttackSystem, CrowdControlSystem, DamageSystem, DebuffSystem, DynamicEventItemSystem,
    DynamicTimeItemSystem, DynamicTraitSystem, ItemRegistry, SpellCastSystem,
    StatCalculationSystem, StaticItemSystem, TraitRegistry,
};
use crate::types::TIME_EPSILON;
use std::sync::Arc;
use tracing::{debug, info};

/// Owns the world, the event bus and every system for one board
pub struct Simulation {
    world: World,
    config: SimulationConfig,
    bus: EventBus,
    items: Arc<ItemRegistry>,
    traits: DynamicTraitSystem,
    trait_data: Option<GameData>,
    time_items: DynamicTimeItemSystem,
    stats: StatCalculationSystem,
    current_time: f64,
    steps: u64,
    next_report: f64,
    in_combat: bool,
}

impl Simulation {
    /// Wrap a populated world. Fails if the config does not validate.
    pub fn new(world: World, config: SimulationConfig) -> SimResult<Self> {
        Self::with_registries(
            world,
            config,
            Arc::new(ItemRegistry::with_defaults()),
            Arc::new(TraitRegistry::with_defaults()),
        )
    }

    /// Same as [`Simulation::new`] with custom item and trait handlers
    pub fn with_registries(
        world: World,
        config: SimulationConfig,
        items: Arc<ItemRegistry>,
        traits: Arc<TraitRegistry>,
    ) -> SimResult<Self> {
        config.validate()?;
        let mut simulation = Simulation {
            world,
            stats: StatCalculationSystem::new(config.enable_item_effects, config.enable_trait_effects),
            bus: EventBus::new(),
            time_items: DynamicTimeItemSystem::new(Arc::clone(&items)),
            traits: DynamicTraitSystem::new(traits),
            trait_data: None,
            items,
            config,
            current_time: 0.0,
            steps: 0,
            next_report: 0.0,
            in_combat: false,
        };
        simulation.bus = simulation.build_bus();
        Ok(simulation)
    }

    /// Catalogue used to resolve trait tiers at combat start.
    /// Without it no trait activates.
    pub fn with_trait_data(mut self, data: GameData) -> Self {
        self.trait_data = Some(data);
        self
    }

    /// Replace the config. The current one is kept if the new one is invalid.
    /// Takes effect at the next combat setup.
    pub fn set_config(&mut self, config: SimulationConfig) -> SimResult<()> {
        config.validate()?;
        self.stats = StatCalculationSystem::new(config.enable_item_effects, config.enable_trait_effects);
        self.config = config;
        Ok(())
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn into_world(self) -> World {
        self.world
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Equipment manager sharing this simulation's item handlers
    pub fn equipment_manager(&self) -> EquipmentManager {
        EquipmentManager::new(Arc::clone(&self.items))
    }

    /// Dynamic trait state resolved at the last setup
    pub fn traits(&self) -> &DynamicTraitSystem {
        &self.traits
    }

    fn build_bus(&self) -> EventBus {
        let mut bus = EventBus::new();
        bus.register_handler(Box::new(self.stats));
        bus.register_handler(Box::new(ActionDecisionSystem::new(
            self.config.enable_auto_attacks,
            self.config.enable_spell_casts,
        )));
        bus.register_handler(Box::new(AutoAttackSystem::new()));
        bus.register_handler(Box::new(SpellCastSystem::new()));
        bus.register_handler(Box::new(DamageSystem::new()));
        bus.register_handler(Box::new(DebuffSystem::new()));
        if self.config.enable_item_effects {
            bus.register_handler(Box::new(DynamicEventItemSystem::new(Arc::clone(&self.items))));
        }
        if self.config.enable_trait_effects {
            bus.register_handler(Box::new(self.traits.router()));
        }
        bus.register_handler(Box::new(CrowdControlSystem::new()));
        bus
    }

    /// Prepare every unit for a fresh combat at t = 0
    pub fn setup_combat(&mut self) {
        self.bus = self.build_bus();
        self.current_time = 0.0;
        self.steps = 0;
        self.next_report = self.config.reporting_interval;

        clear_debuffs(&mut self.world);
        // Undo the previous combat's trait activation before resolving again
        self.traits.deactivate_all(&mut self.world);
        self.traits.reset(&mut self.world);
        if self.config.enable_trait_effects {
            if let Some(data) = &self.trait_data {
                self.traits.activate(&mut self.world, data);
            }
        }

        if self.config.enable_item_effects {
            AbilityCritSystem::new().update(&mut self.world);
            StaticItemSystem::new(Arc::clone(&self.items)).recompute_all(&mut self.world);
            self.items.reset_all(&mut self.world);
        }

        self.stats.update(&mut self.world);
        for entity in self.world.query::<Health>() {
            if let Some(health) = self.world.get_mut::<Health>(entity) {
                health.current_hp = health.final_max_hp;
            }
            if let Some(mana) = self.world.get_mut::<Mana>(entity) {
                mana.current = mana.final_initial.clamp(0.0, mana.max());
                mana.locked = false;
            }
            if let Some(state) = self.world.get_mut::<State>(entity) {
                *state = State::new();
            }
            if let Some(stats) = self.world.get_mut::<DamageStats>(entity) {
                *stats = DamageStats::new();
            }
        }

        if self.config.enable_auto_attacks {
            let mut sink = self.bus.sink(0.0);
            AutoAttackSystem::new().start_initial_cooldowns(&mut self.world, &mut sink);
        }
        if self.config.enable_item_effects {
            let mut sink = self.bus.sink(0.0);
            self.items.start_combat(&mut self.world, &mut sink);
        }
        for entity in self.world.query::<State>() {
            self.bus.enqueue(0.0, CombatEvent::ChampionAction { entity });
        }

        self.in_combat = true;
        info!(
            "Combat set up: {} entities, max time {:.1}s, step {:.3}s",
            self.world.entity_count(),
            self.config.max_time,
            self.config.time_step
        );
    }

    /// Advance one tick. Returns the termination reason once combat is over.
    pub fn step(&mut self) -> Option<TerminationReason> {
        if !self.in_combat {
            self.setup_combat();
        }
        self.steps += 1;
        let now = (self.steps as f64 * self.config.time_step).min(self.config.max_time);
        let dt = now - self.current_time;
        self.current_time = now;

        if self.config.enable_item_effects {
            let mut sink = self.bus.sink(now);
            self.time_items.update(&mut self.world, dt, &mut sink);
        }
        let delivered = self.bus.process_due_up_to(now, &mut self.world);
        self.stats.update(&mut self.world);
        self.queue_idle_actions(now);
        if delivered > 0 {
            debug!("t={now:.2}: delivered {delivered} events");
        }
        self.report_status(now);
        self.check_termination(now)
    }

    /// Run ticks until combat ends
    pub fn run(&mut self) -> SimulationSummary {
        if !self.in_combat {
            self.setup_combat();
        }
        let termination = loop {
            if let Some(reason) = self.step() {
                break reason;
            }
        };
        self.end_combat(termination)
    }

    /// Stun a unit from the current time
    pub fn apply_stun(&mut self, entity: Entity, duration: f64) -> SimResult<()> {
        let mut sink = self.bus.sink(self.current_time);
        apply_stun(&mut self.world, &mut sink, entity, duration)
    }

    /// Close the combat and snapshot the results. Effect state stays on
    /// the units until the next setup.
    pub fn end_combat(&mut self, termination: TerminationReason) -> SimulationSummary {
        self.in_combat = false;
        let summary = SimulationSummary::collect(
            &self.world,
            self.current_time,
            self.bus.processed_count(),
            termination,
        );
        info!(
            "Combat over at {:.2}s: {termination} ({} events)",
            self.current_time, summary.events_processed
        );
        summary
    }

    fn queue_idle_actions(&mut self, now: f64) {
        for entity in self.world.query::<State>() {
            let free = self.world.is_alive(entity)
                && self
                    .world
                    .get::<State>(entity)
                    .is_some_and(|s| s.is(ActionState::Idle) && !s.is_stunned);
            if free {
                self.bus.enqueue(now, CombatEvent::ChampionAction { entity });
            }
        }
    }

    fn report_status(&mut self, now: f64) {
        if !self.config.debug_mode || now + TIME_EPSILON < self.next_report {
            return;
        }
        while self.next_report <= now + TIME_EPSILON {
            self.next_report += self.config.reporting_interval;
        }
        let alive = living_units_by_team(&self.world);
        info!("t={now:.1}s alive per team: {alive:?}");
        for entity in self.world.query::<Health>() {
            if let Some(health) = self.world.get::<Health>(entity) {
                info!(
                    "  {entity}: {:.0}/{:.0} HP",
                    health.current_hp.max(0.0),
                    health.final_max_hp
                );
            }
        }
    }

    fn check_termination(&self, now: f64) -> Option<TerminationReason> {
        let alive = living_units_by_team(&self.world);
        if let Some((&team, _)) = alive.iter().find(|&(_, &count)| count == 0) {
            return Some(TerminationReason::TeamEliminated(team));
        }
        if now + TIME_EPSILON >= self.config.max_time {
            return Some(TerminationReason::TimeLimit);
        }
        None
    }
}

/// Run one combat on a populated world
pub fn run_simulation(world: World, config: SimulationConfig) -> SimResult<SimulationSummary> {
    let mut simulation = Simulation::new(world, config)?;
    Ok(simulation.run())
}
