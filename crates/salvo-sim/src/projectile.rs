//! Projectile bookkeeping that depends on ECS handles.
//!
//! The kinematic state machine itself is `salvo_guidance::homing::HomingController`;
//! the target handle is stored next to it as its own component.

use hecs::Entity;

use salvo_core::state::FireStatsView;

/// Target assigned at burst time. Cleared once the target entity is gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HomingTarget(pub Option<Entity>);

/// Running fire statistics tracked by the engine.
#[derive(Debug, Clone, Default)]
pub struct FireStats {
    pub bursts_fired: u32,
    pub projectiles_fired: u32,
    pub hits: u32,
    pub expired: u32,
}

impl FireStats {
    pub fn view(&self) -> FireStatsView {
        FireStatsView {
            bursts_fired: self.bursts_fired,
            projectiles_fired: self.projectiles_fired,
            hits: self.hits,
            expired: self.expired,
        }
    }
}

/// Stable id used in events and snapshots.
pub fn entity_id(entity: Entity) -> u64 {
    entity.to_bits().get()
}
