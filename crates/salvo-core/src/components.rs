//! ECS components for hecs entities.
//!
//! Components are plain data structs. Game logic lives in systems.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Marks an entity as a lockable hostile.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Hostile;

/// Marks an entity as a fired projectile.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projectile;

/// Point used for projection and scoring, relative to the entity position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LockAnchor {
    pub offset: Vec3,
}

/// Lock flag. Only the lock-on system toggles it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockState {
    pub locked: bool,
}

/// Whether the hostile takes part in selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Active(pub bool);

impl Default for Active {
    fn default() -> Self {
        Active(true)
    }
}

/// Hit-reaction gate: while `reacting`, new reaction triggers are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HitReaction {
    pub reacting: bool,
    /// Seconds left in the current reaction.
    pub remaining_secs: f32,
}
