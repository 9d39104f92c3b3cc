//! Fire control system: turns the lock set into a burst of homing projectiles.

use hecs::{Entity, World};

use salvo_core::config::{PatternConfig, ProjectileConfig};
use salvo_core::events::FeedbackEvent;
use salvo_core::types::Viewer;
use salvo_guidance::burst;

use crate::projectile::FireStats;
use crate::world_setup::spawn_projectile;

/// Fire one burst from the viewer at `lock_set`. Returns the number of
/// projectiles spawned.
///
/// An empty lock set or a missing viewer fires nothing. The whole pattern is
/// computed from the lock set before the first projectile is spawned.
pub fn fire(
    world: &mut World,
    viewer: Option<&Viewer>,
    lock_set: &[Entity],
    pattern: &PatternConfig,
    params: &ProjectileConfig,
    events: &mut Vec<FeedbackEvent>,
    stats: &mut FireStats,
) -> usize {
    let Some(viewer) = viewer else {
        log::debug!("fire skipped: no viewer");
        return 0;
    };
    if lock_set.is_empty() {
        log::debug!("fire skipped: no locks");
        return 0;
    }

    let spawns = burst::generate(viewer.position, &viewer.basis(), pattern, lock_set);
    for spawn in &spawns {
        spawn_projectile(world, spawn, params);
    }

    let shots = spawns.len() as u32;
    stats.bursts_fired += 1;
    stats.projectiles_fired += shots;
    events.push(FeedbackEvent::BurstFired {
        shots,
        targets: lock_set.len() as u32,
    });
    log::info!("burst fired: {shots} shots over {} targets", lock_set.len());

    spawns.len()
}
