//! Static game data - set-descriptor models, loading and the lookup catalogue

mod loader;
mod models;

pub use loader::{load_set_data, parse_set_data};
pub use models::{
    Ability, AbilityVariable, Champion, ChampionStats, Item, SetData, SetDataFile, TraitData,
    TraitEffect,
};

use crate::error::{LookupKind, SimError, SimResult};
use std::collections::BTreeMap;

/// Api names of items with engine behaviour
pub mod item_names {
    pub const INFINITY_EDGE: &str = "TFT_Item_InfinityEdge";
    pub const JEWELED_GAUNTLET: &str = "TFT_Item_JeweledGauntlet";
    pub const ARCHANGELS_STAFF: &str = "TFT_Item_ArchangelsStaff";
    pub const QUICKSILVER: &str = "TFT_Item_Quicksilver";
    pub const TITANS_RESOLVE: &str = "TFT_Item_TitansResolve";
    pub const GUINSOOS_RAGEBLADE: &str = "TFT_Item_GuinsoosRageblade";
    pub const BLUE_BUFF: &str = "TFT_Item_BlueBuff";
    pub const RED_BUFF: &str = "TFT_Item_RapidFireCannon";
    pub const SPEAR_OF_SHOJIN: &str = "TFT_Item_SpearOfShojin";
    pub const FLICKERBLADE: &str = "TFT_Item_Artifact_NavoriFlickerblades";
    pub const NASHORS_TOOTH: &str = "TFT_Item_Leviathan";
    pub const VOID_STAFF: &str = "TFT_Item_StatikkShiv";
    pub const SPIRIT_VISAGE: &str = "TFT_Item_Redemption";
    pub const KRAKENS_FURY: &str = "TFT_Item_RunaansHurricane";
    pub const EVENSHROUD: &str = "TFT_Item_Evenshroud";
}

/// Api names of traits with engine behaviour
pub mod trait_names {
    pub const RAPIDFIRE: &str = "TFT14_Swift";
}

/// Immutable catalogue of one set, indexed by api name
#[derive(Debug, Clone, Default)]
pub struct GameData {
    mutator: String,
    champions: BTreeMap<String, Champion>,
    items: BTreeMap<String, Item>,
    traits: BTreeMap<String, TraitData>,
}

impl GameData {
    pub fn from_parts(
        mutator: impl Into<String>,
        champions: Vec<Champion>,
        items: Vec<Item>,
        traits: Vec<TraitData>,
    ) -> Self {
        GameData {
            mutator: mutator.into(),
            champions: champions
                .into_iter()
                .map(|c| (c.api_name.clone(), c))
                .collect(),
            items: items.into_iter().map(|i| (i.api_name.clone(), i)).collect(),
            traits: traits.into_iter().map(|t| (t.api_name.clone(), t)).collect(),
        }
    }

    pub fn mutator(&self) -> &str {
        &self.mutator
    }

    pub fn champion(&self, api_name: &str) -> SimResult<&Champion> {
        self.champions
            .get(api_name)
            .ok_or_else(|| SimError::lookup(LookupKind::Champion, api_name))
    }

    pub fn item(&self, api_name: &str) -> SimResult<&Item> {
        self.items
            .get(api_name)
            .ok_or_else(|| SimError::lookup(LookupKind::Item, api_name))
    }

    pub fn trait_data(&self, api_name: &str) -> SimResult<&TraitData> {
        self.traits
            .get(api_name)
            .ok_or_else(|| SimError::lookup(LookupKind::Trait, api_name))
    }

    /// Lookup by display name, e.g. "Infinity Edge"
    pub fn item_by_name(&self, name: &str) -> Option<&Item> {
        self.items.values().find(|i| i.name == name)
    }

    pub fn champions(&self) -> impl Iterator<Item = &Champion> {
        self.champions.values()
    }

    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    /// Trait table keyed by api name
    pub fn traits(&self) -> &BTreeMap<String, TraitData> {
        &self.traits
    }

    pub fn champion_count(&self) -> usize {
        self.champions.len()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn trait_count(&self) -> usize {
        self.traits.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_failure_kind() {
        let data = GameData::from_parts("TFTSet14", vec![], vec![Item::new("A")], vec![]);
        assert!(data.item("A").is_ok());
        match data.champion("TFT14_Nobody") {
            Err(SimError::LookupFailure { kind, name, .. }) => {
                assert_eq!(kind, LookupKind::Champion);
                assert_eq!(name, "TFT14_Nobody");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
