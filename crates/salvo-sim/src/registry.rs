//! Live set of targetable hostiles.
//!
//! Entities are registered and unregistered explicitly by whoever owns their
//! lifecycle. Handles are generation-checked hecs entities, so a handle whose
//! entity was despawned is detected by a failed world lookup.

use hecs::{Entity, World};

/// Ordered collection of registered hostile handles.
#[derive(Debug, Clone, Default)]
pub struct EntityRegistry {
    entities: Vec<Entity>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a hostile. Returns `false` if it was already registered.
    pub fn register(&mut self, entity: Entity) -> bool {
        if self.entities.contains(&entity) {
            return false;
        }
        self.entities.push(entity);
        true
    }

    /// Unregister a hostile. Returns `false` if it was not registered.
    pub fn unregister(&mut self, entity: Entity) -> bool {
        match self.entities.iter().position(|e| *e == entity) {
            Some(idx) => {
                self.entities.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.entities.contains(&entity)
    }

    /// Registered handles in registration order.
    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entities.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Drop handles whose entities no longer exist. Returns how many were dropped.
    pub fn retain_live(&mut self, world: &World) -> usize {
        let before = self.entities.len();
        self.entities.retain(|e| world.contains(*e));
        before - self.entities.len()
    }
}
