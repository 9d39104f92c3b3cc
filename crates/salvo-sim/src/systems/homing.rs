//! Homing system: steps every live projectile's controller.

use glam::Vec3;
use hecs::{Entity, World};

use salvo_core::components::Projectile;
use salvo_core::enums::ProjectilePhase;
use salvo_core::events::FeedbackEvent;
use salvo_core::types::Position;
use salvo_guidance::homing::HomingController;

use crate::projectile::{entity_id, FireStats, HomingTarget};
use crate::systems::reaction;

/// Per-tick buffers for the homing pass, owned by the engine and reused.
#[derive(Debug, Default)]
pub struct HomingScratch {
    /// (projectile, assigned target, resolved target position)
    targets: Vec<(Entity, Option<Entity>, Option<Vec3>)>,
    hits: Vec<Entity>,
}

impl HomingScratch {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Advance all active projectiles by `dt` seconds.
pub fn run(
    world: &mut World,
    dt: f32,
    reaction_duration_secs: f32,
    scratch: &mut HomingScratch,
    events: &mut Vec<FeedbackEvent>,
    stats: &mut FireStats,
) {
    let HomingScratch { targets, hits } = scratch;
    targets.clear();
    hits.clear();

    // Resolve target positions first (avoid borrow conflicts with hecs).
    {
        let mut query = world.query::<(&Projectile, &HomingController, &HomingTarget)>();
        for (entity, (_projectile, homing, target)) in query.iter() {
            if homing.is_terminal() {
                continue;
            }
            let target_pos = target
                .0
                .and_then(|t| world.get::<&Position>(t).ok().map(|p| p.0));
            targets.push((entity, target.0, target_pos));
        }
    }

    for &(entity, target, target_pos) in targets.iter() {
        if target.is_some() && target_pos.is_none() {
            log::debug!("projectile {entity:?} lost its target");
            if let Ok(mut t) = world.get::<&mut HomingTarget>(entity) {
                t.0 = None;
            }
        }

        let phase = match world.get::<&mut HomingController>(entity) {
            Ok(mut homing) => homing.step(dt, target_pos),
            Err(_) => continue,
        };

        match phase {
            ProjectilePhase::Active => {}
            ProjectilePhase::Expired => {
                log::trace!("projectile {entity:?} expired");
                stats.expired += 1;
                events.push(FeedbackEvent::ProjectileExpired {
                    projectile_id: entity_id(entity),
                });
            }
            ProjectilePhase::Hit => {
                // Hit requires a resolved target position, so the handle is live.
                if let Some(target) = target {
                    log::trace!("projectile {entity:?} hit {target:?}");
                    stats.hits += 1;
                    events.push(FeedbackEvent::ProjectileHit {
                        projectile_id: entity_id(entity),
                        target_id: entity_id(target),
                    });
                    hits.push(target);
                }
            }
        }
    }

    for &target in hits.iter() {
        reaction::trigger(world, target, reaction_duration_secs, events);
    }
}
