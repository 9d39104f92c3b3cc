//! Lock-on system: runs target selection and applies lock transitions.
//!
//! Every change to a hostile's `LockState` goes through
//! [`apply_transitions`], so each entity sees exactly one transition per
//! actual change.

use hecs::{Entity, World};

use salvo_core::components::{Active, LockState};
use salvo_core::config::SelectionConfig;
use salvo_core::events::FeedbackEvent;
use salvo_core::types::Viewer;
use salvo_guidance::camera::PerspectiveView;
use salvo_guidance::selector::{self, SelectionScratch};

use crate::projectile::entity_id;
use crate::registry::EntityRegistry;
use crate::world_setup::lock_point;

/// Run one selection pass and replace `lock_set` with the result.
pub fn run(
    world: &mut World,
    registry: &EntityRegistry,
    viewer: Option<&Viewer>,
    config: &SelectionConfig,
    lock_set: &mut Vec<Entity>,
    scratch: &mut SelectionScratch<Entity>,
    events: &mut Vec<FeedbackEvent>,
) {
    let Some(viewer) = viewer else {
        log::debug!("lock acquisition skipped: no viewer");
        return;
    };
    let view = PerspectiveView::new(viewer);

    let selection = {
        let world: &World = world;
        let candidates = registry.iter().filter_map(|entity| {
            let active = world.get::<&Active>(entity).map(|a| a.0).unwrap_or(false);
            if !active {
                return None;
            }
            lock_point(world, entity).map(|p| (entity, p))
        });
        selector::select(candidates, &view, config, lock_set.as_slice(), scratch)
    };

    apply_transitions(world, &selection.entered, &selection.exited, events);
    *lock_set = selection.locks;
}

/// Release every lock in `lock_set`.
pub fn release_all(world: &mut World, lock_set: &mut Vec<Entity>, events: &mut Vec<FeedbackEvent>) {
    let (entered, exited) = selector::diff_locks(lock_set.as_slice(), &[]);
    apply_transitions(world, &entered, &exited, events);
    lock_set.clear();
}

/// Release a single hostile's lock, if it holds one.
pub fn release(
    world: &mut World,
    lock_set: &mut Vec<Entity>,
    entity: Entity,
    events: &mut Vec<FeedbackEvent>,
) {
    if let Some(idx) = lock_set.iter().position(|e| *e == entity) {
        lock_set.remove(idx);
        apply_transitions(world, &[], &[entity], events);
    }
}

/// Set `locked` on entered/exited hostiles and emit one event per change.
pub fn apply_transitions(
    world: &mut World,
    entered: &[Entity],
    exited: &[Entity],
    events: &mut Vec<FeedbackEvent>,
) {
    for &entity in exited {
        if set_locked(world, entity, false) {
            log::debug!("unlocked {entity:?}");
            events.push(FeedbackEvent::Unlocked {
                entity_id: entity_id(entity),
            });
        }
    }
    for &entity in entered {
        if set_locked(world, entity, true) {
            log::debug!("locked {entity:?}");
            events.push(FeedbackEvent::Locked {
                entity_id: entity_id(entity),
            });
        }
    }
}

/// Returns `true` if the flag actually changed.
fn set_locked(world: &mut World, entity: Entity, locked: bool) -> bool {
    match world.get::<&mut LockState>(entity) {
        Ok(mut state) if state.locked != locked => {
            state.locked = locked;
            true
        }
        _ => false,
    }
}
