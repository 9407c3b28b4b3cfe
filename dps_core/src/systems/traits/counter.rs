//! Trait counting - unit counts and active tiers per team

use crate::components::{ChampionInfo, Team, Traits};
use crate::data::{GameData, TraitEffect};
use crate::ecs::{ComponentKind, World};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

/// Unit counts and the resolved tier of every trait, per team
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamTraitState {
    unit_counts: BTreeMap<u8, BTreeMap<String, u32>>,
    active: BTreeMap<u8, BTreeMap<String, TraitEffect>>,
}

impl TeamTraitState {
    pub fn unit_count(&self, team: u8, trait_api_name: &str) -> u32 {
        self.unit_counts
            .get(&team)
            .and_then(|counts| counts.get(trait_api_name))
            .copied()
            .unwrap_or(0)
    }

    /// The tier row in effect, if the trait is active for the team
    pub fn active_effect(&self, team: u8, trait_api_name: &str) -> Option<&TraitEffect> {
        self.active.get(&team)?.get(trait_api_name)
    }

    /// Every active (team, trait, tier) in team then name order
    pub fn active_traits(&self) -> impl Iterator<Item = (u8, &str, &TraitEffect)> {
        self.active.iter().flat_map(|(&team, traits)| {
            traits
                .iter()
                .map(move |(name, effect)| (team, name.as_str(), effect))
        })
    }

    pub fn is_empty(&self) -> bool {
        self.active.values().all(BTreeMap::is_empty)
    }

    pub fn clear(&mut self) {
        self.unit_counts.clear();
        self.active.clear();
    }
}

/// Highest tier whose minimum unit count is met, with tiers ordered by minimum
pub fn active_tier(effects: &[TraitEffect], count: u32) -> Option<&TraitEffect> {
    let mut tiers: Vec<&TraitEffect> = effects.iter().collect();
    tiers.sort_by_key(|e| e.min_units);
    tiers.into_iter().take_while(|e| count >= e.min_units).last()
}

/// Count traits over the board. Each champion api name counts once per team;
/// traits missing from the catalogue are skipped.
pub fn count_traits(world: &World, data: &GameData) -> TeamTraitState {
    let mut champions: BTreeMap<u8, BTreeMap<&str, &Traits>> = BTreeMap::new();
    for entity in world.entities_with(&[
        ComponentKind::Team,
        ComponentKind::Traits,
        ComponentKind::ChampionInfo,
    ]) {
        let (Some(team), Some(traits), Some(info)) = (
            world.get::<Team>(entity),
            world.get::<Traits>(entity),
            world.get::<ChampionInfo>(entity),
        ) else {
            continue;
        };
        champions
            .entry(team.id)
            .or_default()
            .insert(info.api_name.as_str(), traits);
    }

    let mut state = TeamTraitState::default();
    let mut unknown: BTreeSet<&str> = BTreeSet::new();
    for (team, roster) in champions {
        let counts = state.unit_counts.entry(team).or_default();
        for traits in roster.values() {
            for name in traits.names() {
                if data.traits().contains_key(name) {
                    *counts.entry(name.clone()).or_insert(0) += 1;
                } else if unknown.insert(name.as_str()) {
                    warn!("Trait '{name}' is not in the catalogue; not counted");
                }
            }
        }

        for (name, &count) in counts.iter() {
            let Some(trait_data) = data.traits().get(name) else {
                continue;
            };
            if let Some(effect) = active_tier(&trait_data.effects, count) {
                debug!(
                    "Team {team}: {name} active ({count} units, tier min {})",
                    effect.min_units
                );
                state
                    .active
                    .entry(team)
                    .or_default()
                    .insert(name.clone(), effect.clone());
            }
        }
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::TraitData;

    fn tier(min_units: u32, value: f64) -> TraitEffect {
        let mut effect = TraitEffect {
            min_units,
            max_units: 25000,
            ..Default::default()
        };
        effect.variables.insert("Value".to_string(), value);
        effect
    }

    fn unit(world: &mut World, api: &str, team: u8, traits: &[&str]) {
        let e = world.create_entity();
        world.add_component(e, Team::new(team));
        world.add_component(e, ChampionInfo::new(api, api, 1, 1));
        world.add_component(
            e,
            Traits::new(traits.iter().map(|t| t.to_string()).collect()),
        );
    }

    #[test]
    fn test_active_tier_picks_highest_met() {
        let effects = vec![tier(4, 2.0), tier(2, 1.0), tier(6, 3.0)];
        assert_eq!(active_tier(&effects, 1), None);
        assert_eq!(active_tier(&effects, 3).map(|e| e.min_units), Some(2));
        assert_eq!(active_tier(&effects, 5).map(|e| e.min_units), Some(4));
        assert_eq!(active_tier(&effects, 9).map(|e| e.min_units), Some(6));
    }

    #[test]
    fn test_duplicates_count_once_per_team() {
        let data = GameData::from_parts(
            "TFTSet14",
            Vec::new(),
            Vec::new(),
            vec![TraitData {
                api_name: "TFT14_Swift".to_string(),
                name: "Rapidfire".to_string(),
                effects: vec![tier(2, 1.0)],
            }],
        );
        let mut world = World::new();
        unit(&mut world, "TFT14_Jinx", 0, &["TFT14_Swift", "TFT14_Unknown"]);
        unit(&mut world, "TFT14_Jinx", 0, &["TFT14_Swift"]);
        unit(&mut world, "TFT14_Kindred", 1, &["TFT14_Swift"]);
        unit(&mut world, "TFT14_Zeri", 1, &["TFT14_Swift"]);

        let state = count_traits(&world, &data);
        assert_eq!(state.unit_count(0, "TFT14_Swift"), 1);
        assert_eq!(state.unit_count(0, "TFT14_Unknown"), 0);
        assert!(state.active_effect(0, "TFT14_Swift").is_none());
        assert_eq!(state.unit_count(1, "TFT14_Swift"), 2);
        assert!(state.active_effect(1, "TFT14_Swift").is_some());
        assert_eq!(state.active_traits().count(), 1);
    }
}
