//! ComponentStore - Per-variant mapping from entity to component value

use super::Entity;
use std::collections::HashMap;

/// Storage for one component variant
#[derive(Debug, Clone)]
pub struct ComponentStore<T> {
    items: HashMap<Entity, T>,
}

impl<T> Default for ComponentStore<T> {
    fn default() -> Self {
        ComponentStore {
            items: HashMap::new(),
        }
    }
}

impl<T> ComponentStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace, returning the previous value
    pub fn insert(&mut self, entity: Entity, value: T) -> Option<T> {
        self.items.insert(entity, value)
    }

    pub fn get(&self, entity: Entity) -> Option<&T> {
        self.items.get(&entity)
    }

    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        self.items.get_mut(&entity)
    }

    /// Remove the component. Removing an absent component is a no-op.
    pub fn remove(&mut self, entity: Entity) -> Option<T> {
        self.items.remove(&entity)
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.items.contains_key(&entity)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Entities holding this component, sorted by id
    pub fn entities(&self) -> Vec<Entity> {
        let mut entities: Vec<Entity> = self.items.keys().copied().collect();
        entities.sort();
        entities
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_replace_remove() {
        let mut store = ComponentStore::new();
        let e = Entity::from_raw(1);

        assert!(store.insert(e, 10).is_none());
        assert_eq!(store.insert(e, 20), Some(10));
        assert_eq!(store.get(e), Some(&20));

        assert_eq!(store.remove(e), Some(20));
        assert_eq!(store.remove(e), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_entities_sorted() {
        let mut store = ComponentStore::new();
        for id in [5, 1, 3] {
            store.insert(Entity::from_raw(id), ());
        }
        let ids: Vec<u32> = store.entities().into_iter().map(Entity::id).collect();
        assert_eq!(ids, vec![1, 3, 5]);
    }
}
