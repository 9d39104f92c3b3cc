//! Hit-reaction gate for hostiles.
//!
//! The visual shake itself belongs to the presentation layer; the simulation
//! only tracks whether a reaction is running so repeated hits within the
//! reaction window do not restart it.

use hecs::{Entity, World};

use salvo_core::components::HitReaction;
use salvo_core::events::FeedbackEvent;

use crate::projectile::entity_id;

/// Start a hit reaction on `entity` unless one is already running.
/// Returns `true` if a reaction started.
pub fn trigger(
    world: &mut World,
    entity: Entity,
    duration_secs: f32,
    events: &mut Vec<FeedbackEvent>,
) -> bool {
    let Ok(mut reaction) = world.get::<&mut HitReaction>(entity) else {
        return false;
    };
    if reaction.reacting {
        return false;
    }

    reaction.reacting = true;
    reaction.remaining_secs = duration_secs;
    events.push(FeedbackEvent::HitReaction {
        entity_id: entity_id(entity),
    });
    true
}

/// Count down running reactions.
pub fn run(world: &mut World, dt: f32) {
    for (_entity, reaction) in world.query_mut::<&mut HitReaction>() {
        if !reaction.reacting {
            continue;
        }
        reaction.remaining_secs -= dt;
        if reaction.remaining_secs <= 0.0 {
            reaction.reacting = false;
            reaction.remaining_secs = 0.0;
        }
    }
}
