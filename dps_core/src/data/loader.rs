//! Set-descriptor loading and mutator filtering

use super::{GameData, SetDataFile};
use crate::error::{LookupKind, SimError, SimResult};
use std::fs;
use std::path::Path;
use tracing::info;

/// Read a set-descriptor file and build the catalogue for one mutator
pub fn load_set_data(path: &Path, mutator: &str) -> SimResult<GameData> {
    let content = fs::read_to_string(path)?;
    let data = parse_set_data(&content, mutator)?;
    info!(
        "Loaded {} from {}: {} champions, {} items, {} traits",
        mutator,
        path.display(),
        data.champion_count(),
        data.item_count(),
        data.trait_count()
    );
    Ok(data)
}

/// Parse set-descriptor JSON and build the catalogue for one mutator
pub fn parse_set_data(json: &str, mutator: &str) -> SimResult<GameData> {
    let file: SetDataFile = serde_json::from_str(json)?;
    let SetDataFile { set_data, items } = file;

    let available: Vec<String> = set_data.iter().map(|s| s.mutator.clone()).collect();
    let set = set_data
        .into_iter()
        .find(|s| s.mutator == mutator)
        .ok_or_else(|| SimError::LookupFailure {
            kind: LookupKind::Mutator,
            name: mutator.to_string(),
            hint: if available.is_empty() {
                String::new()
            } else {
                format!(". Available mutators: {}", available.join(", "))
            },
        })?;

    let active_items = if set.items.is_empty() {
        items
    } else {
        items
            .into_iter()
            .filter(|item| set.items.contains(&item.api_name))
            .collect()
    };

    Ok(GameData::from_parts(
        set.mutator,
        set.champions,
        active_items,
        set.traits,
    ))
}
