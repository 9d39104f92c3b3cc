//! Entity spawn factories.
//!
//! Creates hostiles (registered on spawn) and projectiles with their
//! component bundles.

use glam::Vec3;
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use salvo_core::components::*;
use salvo_core::config::ProjectileConfig;
use salvo_core::types::Position;
use salvo_guidance::burst::ShotSpawn;
use salvo_guidance::homing::HomingController;

use crate::projectile::HomingTarget;
use crate::registry::EntityRegistry;

/// Spawn a lockable hostile and register it.
pub fn spawn_hostile(
    world: &mut World,
    registry: &mut EntityRegistry,
    position: Vec3,
    anchor_offset: Vec3,
) -> Entity {
    let entity = world.spawn((
        Hostile,
        Position(position),
        LockAnchor {
            offset: anchor_offset,
        },
        LockState::default(),
        HitReaction::default(),
        Active(true),
    ));
    registry.register(entity);
    entity
}

/// Spawn `count` hostiles uniformly inside a box of half-extent `half_extent`
/// around `center`.
pub fn spawn_hostile_field(
    world: &mut World,
    registry: &mut EntityRegistry,
    rng: &mut ChaCha8Rng,
    count: usize,
    center: Vec3,
    half_extent: Vec3,
) -> Vec<Entity> {
    let half = half_extent.abs();
    (0..count)
        .map(|_| {
            let offset = Vec3::new(
                sample_axis(rng, half.x),
                sample_axis(rng, half.y),
                sample_axis(rng, half.z),
            );
            spawn_hostile(world, registry, center + offset, Vec3::ZERO)
        })
        .collect()
}

fn sample_axis(rng: &mut ChaCha8Rng, half: f32) -> f32 {
    if half > 0.0 {
        rng.gen_range(-half..=half)
    } else {
        0.0
    }
}

/// Spawn one projectile at a burst spawn pose.
pub fn spawn_projectile(
    world: &mut World,
    spawn: &ShotSpawn<Entity>,
    params: &ProjectileConfig,
) -> Entity {
    world.spawn((
        Projectile,
        HomingController::new(spawn.position, spawn.direction, params),
        HomingTarget(spawn.target),
    ))
}

/// Lock point of a hostile, or `None` if the handle is stale.
pub fn lock_point(world: &World, entity: Entity) -> Option<Vec3> {
    let pos = world.get::<&Position>(entity).ok()?.0;
    let offset = world
        .get::<&LockAnchor>(entity)
        .map(|a| a.offset)
        .unwrap_or_default();
    Some(pos + offset)
}
