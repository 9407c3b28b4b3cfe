//! Factory - turns catalogue champions into entities

mod builder;

pub use builder::ChampionBuilder;

use crate::components::{
    Attack, ChampionInfo, Crit, DamageStats, Equipment, Health, Mana, Position, Spell, State, Team,
    Traits,
};
use crate::data::{Champion, GameData};
use crate::ecs::{Entity, World};
use crate::error::{sanitize_stat, SimError, SimResult};
use crate::types::star_multiplier;
use tracing::debug;

/// Cast timings are not part of the set data
pub const DEFAULT_CAST_STARTUP: f64 = 1.0;
pub const DEFAULT_CAST_RECOVERY: f64 = 1.0;

/// Creates champions from a catalogue
#[derive(Debug, Clone, Copy)]
pub struct ChampionFactory<'a> {
    data: &'a GameData,
}

impl<'a> ChampionFactory<'a> {
    pub fn new(data: &'a GameData) -> Self {
        ChampionFactory { data }
    }

    /// Look up a champion by api name and spawn it on a team
    pub fn create_champion(
        &self,
        world: &mut World,
        api_name: &str,
        star_level: u8,
        team: u8,
    ) -> SimResult<Entity> {
        let champion = self.data.champion(api_name)?;
        spawn_champion(world, champion, star_level, team)
    }
}

/// Spawn a champion record. HP and AD scale with the star level; invalid
/// base stats are logged and replaced with 0. Star levels outside 1..=3 are
/// rejected before anything is created.
pub fn spawn_champion(
    world: &mut World,
    champion: &Champion,
    star_level: u8,
    team: u8,
) -> SimResult<Entity> {
    if !(1..=3).contains(&star_level) {
        return Err(SimError::InvalidConfig {
            field: "star_level",
            reason: format!("must be 1, 2 or 3 for {} (got {star_level})", champion.api_name),
        });
    }
    let multiplier = star_multiplier(star_level);
    let stats = &champion.stats;
    let stat = |field: &str, value: f64| sanitize_stat(&format!("{}.{field}", champion.api_name), value);

    let entity = world.create_entity();
    world.add_component(
        entity,
        Health::new(
            stat("hp", stats.hp) * multiplier,
            stat("armor", stats.armor),
            stat("magicResist", stats.magic_resist),
        ),
    );
    world.add_component(
        entity,
        Attack::new(
            stat("damage", stats.damage) * multiplier,
            stat("attackSpeed", stats.attack_speed),
            stat("range", stats.range),
        ),
    );

    let default_crit = Crit::default();
    let crit_chance = if stats.crit_chance.is_nan() {
        default_crit.base_crit_chance
    } else {
        stat("critChance", stats.crit_chance)
    };
    let crit_multiplier = if stats.crit_multiplier.is_nan() {
        default_crit.base_crit_multiplier
    } else {
        stat("critMultiplier", stats.crit_multiplier)
    };
    world.add_component(entity, Crit::new(crit_chance, crit_multiplier));

    let max_mana = stat("mana", stats.mana);
    world.add_component(entity, Mana::new(max_mana, stat("initialMana", stats.initial_mana)));
    let mut spell = Spell::new(champion.ability.name.clone(), max_mana)
        .with_timings(DEFAULT_CAST_STARTUP, DEFAULT_CAST_RECOVERY);
    spell.icon = champion.ability.icon.clone();
    for variable in &champion.ability.variables {
        spell = spell.with_variable(variable.name.clone(), variable.value.clone());
    }
    world.add_component(entity, spell);

    world.add_component(
        entity,
        ChampionInfo::new(
            champion.api_name.clone(),
            champion.name.clone(),
            champion.cost,
            star_level,
        ),
    );
    world.add_component(entity, Traits::new(champion.traits.clone()));
    world.add_component(entity, Equipment::new());
    world.add_component(entity, Position::default());
    world.add_component(entity, Team::new(team));
    world.add_component(entity, State::new());
    world.add_component(entity, DamageStats::new());

    debug!(
        "Spawned {} ({star_level}*) as {entity} on team {team}",
        champion.api_name
    );
    Ok(entity)
}
