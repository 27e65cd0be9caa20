//! Attack hit resolution.
//!
//! A hit arrives either from the animation layer (`SimCommand::AttackHit`)
//! or from an archetype's auto-hit delay counting down. Either way the
//! attacker's damage goes to the player, followed by knockback.

use hecs::{Entity, World};

use geneforge_combat::knockback::melee_impulse;
use geneforge_core::components::*;
use geneforge_core::types::{ActorId, Position};
use geneforge_enemy_ai::profiles::get_profile;

use crate::error::{SimError, SimResult};
use crate::systems::damage::{apply_damage, DamageSink};
use crate::systems::knockback::apply_melee_knockback;
use crate::systems::player::find_player;

/// Count down scheduled hits and resolve the ones that are due.
pub fn run(world: &mut World, dt: f64, sink: &mut DamageSink) {
    let mut due: Vec<(Entity, ActorId)> = Vec::new();
    for (entity, (actor, agent)) in world
        .query_mut::<(&Actor, &mut AiAgent)>()
        .without::<&Dead>()
    {
        if let Some(remaining) = agent.pending_hit_secs {
            let remaining = remaining - dt;
            if remaining <= 1e-9 {
                agent.pending_hit_secs = None;
                due.push((entity, actor.id));
            } else {
                agent.pending_hit_secs = Some(remaining);
            }
        }
    }

    for (attacker, attacker_id) in due {
        if let Err(e) = resolve_attack_hit(world, attacker, attacker_id, sink) {
            log::warn!("attack hit from {attacker_id} dropped: {e}");
        }
    }
}

/// Resolve one attack hit from `attacker` against the player.
/// Dead attackers and a dead player are silently skipped.
pub fn resolve_attack_hit(
    world: &mut World,
    attacker: Entity,
    attacker_id: ActorId,
    sink: &mut DamageSink,
) -> SimResult<()> {
    let archetype = world
        .get::<&AiAgent>(attacker)
        .map(|agent| agent.archetype)
        .map_err(|_| SimError::NotAnEnemy(attacker_id))?;
    if world.get::<&Dead>(attacker).is_ok() {
        log::debug!("ignoring attack hit from dead {attacker_id}");
        return Ok(());
    }

    let (player, player_id) = find_player(world)?;
    if world.get::<&Dead>(player).is_ok() {
        return Ok(());
    }

    let profile = get_profile(archetype);
    apply_damage(world, player, player_id, profile.damage_per_hit, false, sink)?;

    // The hit may have ended the run
    if !profile.knockback_enabled || world.get::<&Dead>(player).is_ok() {
        return Ok(());
    }

    let attacker_pos = *world
        .get::<&Position>(attacker)
        .map_err(|_| SimError::Despawned(attacker_id))?;
    let heading = world
        .get::<&Facing>(attacker)
        .map(|f| f.heading)
        .unwrap_or_default();
    let target_pos = *world
        .get::<&Position>(player)
        .map_err(|_| SimError::Despawned(player_id))?;

    let impulse = melee_impulse(
        attacker_pos,
        heading,
        target_pos,
        profile.knockback_force,
        profile.knockback_upward,
    );
    apply_melee_knockback(
        world,
        attacker,
        player,
        player_id,
        impulse,
        &profile,
        sink.events,
    );
    Ok(())
}
