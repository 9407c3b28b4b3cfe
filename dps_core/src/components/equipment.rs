//! Equipment - Items held by a champion

use crate::data::Item;
use serde::{Deserialize, Serialize};

/// Maximum items a champion can hold
pub const MAX_ITEMS: usize = 3;

/// Why an item cannot be equipped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquipRejection {
    Full,
    DuplicateUnique,
}

/// Equipped items in equip order. The same api name may appear more than once
/// unless the item is unique.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Equipment {
    items: Vec<Item>,
}

impl Equipment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= MAX_ITEMS
    }

    pub fn has_item(&self, api_name: &str) -> bool {
        self.items.iter().any(|i| i.api_name == api_name)
    }

    /// Multiplicity of an item
    pub fn item_count(&self, api_name: &str) -> usize {
        self.items.iter().filter(|i| i.api_name == api_name).count()
    }

    /// Distinct equipped api names in equip order
    pub fn distinct_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for item in &self.items {
            if !names.contains(&item.api_name) {
                names.push(item.api_name.clone());
            }
        }
        names
    }

    /// Check slot count and uniqueness
    pub fn can_add(&self, item: &Item) -> Result<(), EquipRejection> {
        if self.is_full() {
            return Err(EquipRejection::Full);
        }
        if item.unique && self.has_item(&item.api_name) {
            return Err(EquipRejection::DuplicateUnique);
        }
        Ok(())
    }

    pub fn add(&mut self, item: Item) -> Result<(), EquipRejection> {
        self.can_add(&item)?;
        self.items.push(item);
        Ok(())
    }

    /// Remove one copy of an item, returning it
    pub fn remove(&mut self, api_name: &str) -> Option<Item> {
        let index = self.items.iter().position(|i| i.api_name == api_name)?;
        Some(self.items.remove(index))
    }
}
