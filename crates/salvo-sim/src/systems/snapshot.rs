//! Snapshot system: reads the world and builds a `SimSnapshot`.
//!
//! This system is read-only.

use hecs::{Entity, World};

use salvo_core::components::*;
use salvo_core::events::FeedbackEvent;
use salvo_core::state::*;
use salvo_core::types::{Position, SimTime, Viewer};
use salvo_guidance::homing::HomingController;

use crate::projectile::{entity_id, FireStats, HomingTarget};

/// Build a complete snapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    viewer: Option<&Viewer>,
    lock_set: &[Entity],
    events: Vec<FeedbackEvent>,
    stats: &FireStats,
) -> SimSnapshot {
    SimSnapshot {
        time: *time,
        viewer: viewer.copied(),
        locks: lock_set.iter().map(|e| entity_id(*e)).collect(),
        hostiles: build_hostiles(world),
        projectiles: build_projectiles(world),
        events,
        stats: stats.view(),
    }
}

fn build_hostiles(world: &World) -> Vec<HostileView> {
    let mut query = world.query::<(&Hostile, &Position, &LockState, &HitReaction, &Active)>();
    let mut hostiles: Vec<HostileView> = query
        .iter()
        .map(|(entity, (_h, pos, lock, reaction, active))| HostileView {
            entity_id: entity_id(entity),
            position: pos.0,
            locked: lock.locked,
            reacting: reaction.reacting,
            active: active.0,
        })
        .collect();
    hostiles.sort_by_key(|h| h.entity_id);
    hostiles
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    let mut query = world.query::<(&Projectile, &HomingController, &HomingTarget)>();
    let mut projectiles: Vec<ProjectileView> = query
        .iter()
        .map(|(entity, (_p, homing, target))| ProjectileView {
            entity_id: entity_id(entity),
            position: homing.position,
            heading: homing.heading,
            target_id: target.0.map(entity_id),
            remaining_life_secs: homing.remaining_life_secs,
            phase: homing.phase(),
        })
        .collect();
    projectiles.sort_by_key(|p| p.entity_id);
    projectiles
}
