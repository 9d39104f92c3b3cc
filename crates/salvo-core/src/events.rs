//! Feedback events emitted by the simulation for the presentation layer.

use serde::{Deserialize, Serialize};

/// State transitions the visual-feedback collaborator reacts to.
///
/// Entity ids are the bit representation of the simulation's entity handles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FeedbackEvent {
    /// Hostile entered the lock set.
    Locked { entity_id: u64 },
    /// Hostile left the lock set.
    Unlocked { entity_id: u64 },
    /// A burst was fired at the current lock set.
    BurstFired { shots: u32, targets: u32 },
    /// A projectile reached its target.
    ProjectileHit { projectile_id: u64, target_id: u64 },
    /// A projectile ran out of lifetime.
    ProjectileExpired { projectile_id: u64 },
    /// A hostile started its hit reaction.
    HitReaction { entity_id: u64 },
}
