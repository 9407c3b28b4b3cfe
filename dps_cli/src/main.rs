//! Headless entry point: load a set, build a board, run one combat

mod cli;

use anyhow::{Context, Result};
use dps_core::components::Position;
use dps_core::systems::{ItemRegistry, TraitRegistry};
use dps_core::{
    load_set_data, ChampionBuilder, ChampionFactory, EquipmentManager, Simulation,
    SimulationConfig, World,
};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Team of the simulated champions; the dummy stands on team 1
const PLAYER_TEAM: u8 = 0;

fn main() -> Result<()> {
    let args = cli::parse_args();

    let mut config = match &args.config {
        Some(path) => SimulationConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SimulationConfig::default(),
    };
    if let Some(max_time) = args.max_time {
        config = config.with_max_time(max_time);
    }
    if args.debug {
        config = config.with_debug_mode(true);
    }
    setup_logging(config.debug_mode);

    let data = load_set_data(&args.data, &args.mutator)
        .with_context(|| format!("loading set data from {}", args.data.display()))?;
    tracing::info!(
        "Loaded {}: {} champions, {} items, {} traits",
        data.mutator(),
        data.champion_count(),
        data.item_count(),
        data.trait_count()
    );

    let items = Arc::new(ItemRegistry::with_defaults());
    let equipment = EquipmentManager::new(Arc::clone(&items));
    let factory = ChampionFactory::new(&data);
    let mut world = World::with_capacity(config.max_entities);

    for (slot, spec) in args.champions.iter().enumerate() {
        let entity = factory
            .create_champion(&mut world, &spec.api_name, spec.star_level, PLAYER_TEAM)
            .with_context(|| format!("creating {}", spec.api_name))?;
        world.add_component(entity, Position::new(slot as f64, 0.0));
        for item in &spec.items {
            equipment
                .add_item(&mut world, &data, entity, item)
                .with_context(|| format!("equipping {item} on {}", spec.api_name))?;
        }
    }
    ChampionBuilder::training_dummy(args.dummy_hp, args.dummy_armor, args.dummy_mr)
        .at(0.0, 4.0)
        .build(&mut world);

    let mut simulation =
        Simulation::with_registries(world, config, items, Arc::new(TraitRegistry::with_defaults()))?
            .with_trait_data(data);
    let summary = simulation.run();
    println!("{summary}");
    Ok(())
}

/// Logs go to stderr; RUST_LOG overrides the default level
fn setup_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
