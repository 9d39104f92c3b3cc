//! Simulation snapshot: the visible state handed to presentation after each tick.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::ProjectilePhase;
use crate::events::FeedbackEvent;
use crate::types::{SimTime, Viewer};

/// Complete simulation state after one tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimSnapshot {
    pub time: SimTime,
    pub viewer: Option<Viewer>,
    /// Current lock set, in priority order.
    pub locks: Vec<u64>,
    pub hostiles: Vec<HostileView>,
    pub projectiles: Vec<ProjectileView>,
    pub events: Vec<FeedbackEvent>,
    pub stats: FireStatsView,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostileView {
    pub entity_id: u64,
    pub position: Vec3,
    pub locked: bool,
    pub reacting: bool,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub entity_id: u64,
    pub position: Vec3,
    pub heading: Vec3,
    pub target_id: Option<u64>,
    pub remaining_life_secs: f32,
    pub phase: ProjectilePhase,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FireStatsView {
    pub bursts_fired: u32,
    pub projectiles_fired: u32,
    pub hits: u32,
    pub expired: u32,
}
