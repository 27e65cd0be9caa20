//! Cleanup system: removes dead enemies once their death animation is over
//! and projectiles that left the arena.

use hecs::{Entity, World};

use geneforge_core::components::{DeathTimer, Enemy, Projectile};
use geneforge_core::constants::ARENA_RADIUS;
use geneforge_core::types::Position;

/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(world: &mut World, dt: f64, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, (timer, _enemy)) in world.query_mut::<(&mut DeathTimer, &Enemy)>() {
        timer.remaining_secs -= dt;
        if timer.remaining_secs <= 0.0 {
            despawn_buffer.push(entity);
        }
    }

    // Hidden projectiles belong to a chain session and leave with it.
    let radius_sq = ARENA_RADIUS * ARENA_RADIUS;
    for (entity, (pos, projectile)) in world.query_mut::<(&Position, &Projectile)>() {
        if !projectile.hidden && pos.x * pos.x + pos.y * pos.y > radius_sq {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
