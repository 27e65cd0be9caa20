//! ECS systems that operate on the arena world each tick.
//!
//! Systems are plain functions over `&mut World` (or `&World` for read-only).
//! Per-tick outputs go through a `DamageSink`; longer-lived state that is not
//! attached to an actor (chain sessions, score) is owned by the engine.

pub mod attack;
pub mod chain;
pub mod cleanup;
pub mod damage;
pub mod damage_text;
pub mod enemy_ai;
pub mod knockback;
pub mod player;
pub mod projectile;
pub mod snapshot;

use hecs::{Entity, World};

use geneforge_core::components::Actor;
use geneforge_core::types::ActorId;

use crate::error::{SimError, SimResult};

/// Resolve an actor id to its entity.
pub fn actor_entity(world: &World, id: ActorId) -> SimResult<Entity> {
    world
        .query::<&Actor>()
        .iter()
        .find(|(_, actor)| actor.id == id)
        .map(|(entity, _)| entity)
        .ok_or(SimError::UnknownActor(id))
}
