//! Serde models for the set-descriptor JSON file

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Top-level document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetDataFile {
    #[serde(default)]
    pub set_data: Vec<SetData>,
    /// Every item and augment across all sets
    #[serde(default)]
    pub items: Vec<Item>,
}

/// One set, selected by its mutator key
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetData {
    pub mutator: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub number: i32,
    #[serde(default)]
    pub champions: Vec<Champion>,
    #[serde(default)]
    pub traits: Vec<TraitData>,
    /// Api names of items active in this set
    #[serde(default)]
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Champion {
    pub api_name: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub cost: u32,
    #[serde(default)]
    pub stats: ChampionStats,
    #[serde(default)]
    pub traits: Vec<String>,
    #[serde(default)]
    pub ability: Ability,
}

/// Base stats. Missing or null values read as NaN so the factory can flag them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChampionStats {
    #[serde(default = "missing", deserialize_with = "lenient_f64")]
    pub hp: f64,
    #[serde(default = "missing", deserialize_with = "lenient_f64")]
    pub armor: f64,
    #[serde(default = "missing", deserialize_with = "lenient_f64")]
    pub magic_resist: f64,
    #[serde(default = "missing", deserialize_with = "lenient_f64")]
    pub mana: f64,
    #[serde(default = "missing", deserialize_with = "lenient_f64")]
    pub initial_mana: f64,
    #[serde(default = "missing", deserialize_with = "lenient_f64")]
    pub attack_speed: f64,
    #[serde(default = "missing", deserialize_with = "lenient_f64")]
    pub damage: f64,
    #[serde(default = "missing", deserialize_with = "lenient_f64")]
    pub crit_chance: f64,
    #[serde(default = "missing", deserialize_with = "lenient_f64")]
    pub crit_multiplier: f64,
    #[serde(default = "missing", deserialize_with = "lenient_f64")]
    pub range: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ability {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub icon: String,
    #[serde(default)]
    pub variables: Vec<AbilityVariable>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AbilityVariable {
    pub name: String,
    #[serde(default, deserialize_with = "lenient_values")]
    pub value: Vec<f64>,
}

/// Item definition with its passive and dynamic effect table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub api_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_effects")]
    pub effects: BTreeMap<String, f64>,
    #[serde(default)]
    pub unique: bool,
    #[serde(default)]
    pub composition: Vec<String>,
    #[serde(default)]
    pub associated_traits: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Item {
    pub fn new(api_name: impl Into<String>) -> Self {
        let api_name = api_name.into();
        Item {
            name: api_name.clone(),
            api_name,
            ..Default::default()
        }
    }

    /// Builder: add an effect entry
    pub fn with_effect(mut self, key: impl Into<String>, value: f64) -> Self {
        self.effects.insert(key.into(), value);
        self
    }

    /// Builder: mark unique
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Effect value, 0 when absent
    pub fn effect(&self, key: &str) -> f64 {
        self.effects.get(key).copied().unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraitData {
    pub api_name: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub effects: Vec<TraitEffect>,
}

/// One tier row of a trait
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraitEffect {
    #[serde(default)]
    pub min_units: u32,
    #[serde(default)]
    pub max_units: u32,
    #[serde(default)]
    pub style: i32,
    #[serde(default, deserialize_with = "lenient_effects")]
    pub variables: BTreeMap<String, f64>,
}

impl TraitEffect {
    pub fn variable(&self, key: &str) -> Option<f64> {
        self.variables.get(key).copied()
    }
}

fn missing() -> f64 {
    f64::NAN
}

fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = Option::<f64>::deserialize(deserializer)?;
    Ok(value.unwrap_or(f64::NAN))
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

fn lenient_values<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<f64>, D::Error> {
    let values = Option::<Vec<Option<f64>>>::deserialize(deserializer)?;
    Ok(values
        .unwrap_or_default()
        .into_iter()
        .map(|v| v.unwrap_or(0.0))
        .collect())
}

/// Effect tables sometimes carry strings or nulls; keep numeric entries only
fn lenient_effects<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<BTreeMap<String, f64>, D::Error> {
    let raw = Option::<BTreeMap<String, serde_json::Value>>::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(key, value)| value.as_f64().map(|v| (key, v)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_effects_skip_non_numeric() {
        let json = r#"{
            "apiName": "TFT_Item_Test",
            "name": "Test",
            "effects": {"AD": 0.15, "Label": "text", "Empty": null},
            "unique": true
        }"#;
        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.effects.len(), 1);
        assert!((item.effect("AD") - 0.15).abs() < f64::EPSILON);
        assert_eq!(item.effect("Label"), 0.0);
        assert!(item.unique);
    }

    #[test]
    fn test_missing_stat_reads_as_nan() {
        let json = r#"{"hp": 650, "armor": null}"#;
        let stats: ChampionStats = serde_json::from_str(json).unwrap();
        assert!((stats.hp - 650.0).abs() < f64::EPSILON);
        assert!(stats.armor.is_nan());
        assert!(stats.range.is_nan());
    }

    #[test]
    fn test_ability_null_values() {
        let json = r#"{"name": "Damage", "value": [0, 100, null, 300]}"#;
        let var: AbilityVariable = serde_json::from_str(json).unwrap();
        assert_eq!(var.value, vec![0.0, 100.0, 0.0, 300.0]);
    }
}
