//! Cleanup system: despawns projectiles that reached a terminal phase.

use hecs::{Entity, World};

use salvo_core::components::Projectile;
use salvo_guidance::homing::HomingController;

/// Remove expired and hit projectiles.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, (_projectile, homing)) in world.query_mut::<(&Projectile, &HomingController)>() {
        if homing.is_terminal() {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
