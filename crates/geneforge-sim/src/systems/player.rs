//! Player system: movement and fire commands, invulnerability and weapon
//! cooldown timers.

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use geneforge_combat::weapon::{roll_shot, WeaponStats};
use geneforge_core::components::*;
use geneforge_core::events::SimEvent;
use geneforge_core::types::{ActorId, Position};

use crate::error::{SimError, SimResult};
use crate::score::ScoreState;
use crate::world_setup;

/// The player entity and id, dead or alive.
pub fn find_player(world: &World) -> SimResult<(Entity, ActorId)> {
    world
        .query::<(&Player, &Actor)>()
        .iter()
        .next()
        .map(|(entity, (_, actor))| (entity, actor.id))
        .ok_or(SimError::NoPlayer)
}

/// True once the player has run out of lives.
pub fn is_defeated(world: &World) -> bool {
    world.query::<(&Player, &Dead)>().iter().next().is_some()
}

/// Teleport the player horizontally; height stays with the controller.
pub fn move_player(world: &mut World, position: Position) -> SimResult<()> {
    let (player, _) = find_player(world)?;
    if world.get::<&Dead>(player).is_ok() {
        return Ok(());
    }
    if let Ok(mut pos) = world.get::<&mut Position>(player) {
        pos.x = position.x;
        pos.y = position.y;
    }
    Ok(())
}

/// Fire the player's weapon along `heading` if the cooldown allows.
/// Returns the new projectile's id, or None when the shot was gated.
#[allow(clippy::too_many_arguments)]
pub fn fire(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    next_actor_id: &mut u32,
    heading: f64,
    stats: &WeaponStats,
    chains: bool,
    score: &mut ScoreState,
    events: &mut Vec<SimEvent>,
) -> SimResult<Option<ActorId>> {
    let (player, player_id) = find_player(world)?;
    if world.get::<&Dead>(player).is_ok() {
        return Ok(None);
    }

    {
        let mut cooldown = world
            .get::<&mut FireCooldown>(player)
            .map_err(|_| SimError::Despawned(player_id))?;
        if cooldown.remaining_secs > 0.0 {
            return Ok(None);
        }
        cooldown.remaining_secs = stats.fire_rate;
    }
    if let Ok(mut facing) = world.get::<&mut Facing>(player) {
        facing.heading = heading.rem_euclid(std::f64::consts::TAU);
    }

    let origin = *world
        .get::<&Position>(player)
        .map_err(|_| SimError::Despawned(player_id))?;
    let shot = roll_shot(stats, rng);
    let (_, projectile) = world_setup::spawn_projectile(
        world,
        next_actor_id,
        player_id,
        origin,
        heading,
        shot,
        stats,
        chains,
    );

    score.shots_fired += 1;
    events.push(SimEvent::ProjectileFired {
        projectile,
        heading,
        damage: shot.damage,
        critical: shot.critical,
    });
    Ok(Some(projectile))
}

/// Count down invulnerability and weapon cooldown.
pub fn run(world: &mut World, dt: f64) {
    for (_entity, (_player, inv, cooldown)) in
        world.query_mut::<(&Player, &mut Invulnerability, &mut FireCooldown)>()
    {
        inv.remaining_secs = (inv.remaining_secs - dt).max(0.0);
        cooldown.remaining_secs = (cooldown.remaining_secs - dt).max(0.0);
    }
}
