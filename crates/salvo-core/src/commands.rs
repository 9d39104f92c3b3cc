//! Player commands sent from the input layer to the simulation.
//!
//! Commands are queued and processed in order at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::types::Viewer;

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Viewer ---
    /// Update the player/camera pose used for selection and firing.
    SetViewer { viewer: Viewer },
    /// Drop the viewer. Selection and firing become no-ops.
    ClearViewer,

    // --- Lock-on ---
    /// Run target selection this tick (sent every tick while the lock key is held).
    AcquireLocks,
    /// Fire a burst at the current lock set, then release all locks.
    CommitFire,
    /// Release all locks without firing.
    ClearLocks,

    // --- Tuning ---
    /// Change the lock cap. Negative values lock nothing.
    SetMaxLocks { max_locks: i32 },
    /// Change the burst pattern. Shots clamp to at least 1, radius to at least 0.
    SetPattern {
        shots: i32,
        muzzle_radius: f32,
        forward_offset: f32,
    },
    /// Change the parameters of projectiles fired from now on.
    SetProjectileParams {
        speed: f32,
        turn_rate_deg_per_sec: f32,
        lifetime_secs: f32,
    },
}
