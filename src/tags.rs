//! Host-owned per-entity data
//!
//! The engine knows nothing about selection flags, colors or scores. Hosts
//! keep that beside the engine, keyed by [`EntityId`], and prune it after
//! bodies leave the world.

use std::collections::HashMap;

use crate::sim::{Engine, EntityId};

/// Side table of host data keyed by entity
#[derive(Debug, Clone)]
pub struct Tags<T> {
    entries: HashMap<EntityId, T>,
}

impl<T> Default for Tags<T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<T> Tags<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tag for `id`, returning the previous one
    pub fn insert(&mut self, id: EntityId, value: T) -> Option<T> {
        self.entries.insert(id, value)
    }

    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.entries.get(&id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut T> {
        self.entries.get_mut(&id)
    }

    pub fn remove(&mut self, id: EntityId) -> Option<T> {
        self.entries.remove(&id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &T)> {
        self.entries.iter().map(|(id, value)| (*id, value))
    }

    /// Tagged ids in ascending order
    pub fn ids(&self) -> Vec<EntityId> {
        let mut ids: Vec<_> = self.entries.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Drop tags whose entity is no longer in the engine
    ///
    /// Returns how many were dropped.
    pub fn prune(&mut self, engine: &Engine) -> usize {
        let before = self.entries.len();
        self.entries.retain(|id, _| engine.contains(*id));
        before - self.entries.len()
    }

    /// Remove every tag, returning them sorted by id
    pub fn take_all(&mut self) -> Vec<(EntityId, T)> {
        let mut taken: Vec<_> = self.entries.drain().collect();
        taken.sort_unstable_by_key(|(id, _)| *id);
        taken
    }
}
