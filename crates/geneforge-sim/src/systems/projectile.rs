//! Projectile system: flight, lifetime, and enemy strikes.
//!
//! A strike deals the projectile's damage, slides the enemy along the
//! projectile's flight direction, then either starts a chain session (the
//! projectile hides until the session ends) or despawns the projectile.

use hecs::{Entity, World};

use geneforge_combat::chain::ChainSession;
use geneforge_combat::knockback::SlideKnockback;
use geneforge_core::components::*;
use geneforge_core::events::SimEvent;
use geneforge_core::types::{ActorId, Position, Velocity};
use glam::{DVec2, DVec3};

use crate::systems::chain::{end_session, step_session};
use crate::systems::damage::{apply_damage, DamageSink};

/// A projectile that can strike this tick.
struct InFlight {
    entity: Entity,
    id: ActorId,
    /// Flight segment covered this tick.
    from: Position,
    to: Position,
    velocity: Velocity,
    radius: f64,
    damage: f64,
    critical: bool,
    knockback_force: f64,
    chains: bool,
}

/// Move projectiles, expire old ones, and resolve strikes.
/// Chain sessions started this tick are pushed to `new_sessions`.
pub fn run(
    world: &mut World,
    dt: f64,
    new_sessions: &mut Vec<ChainSession>,
    next_session_id: &mut u32,
    sink: &mut DamageSink,
) {
    let mut expired = Vec::new();
    let mut in_flight = Vec::new();

    for (entity, (actor, projectile, pos, vel)) in
        world.query_mut::<(&Actor, &mut Projectile, &mut Position, &Velocity)>()
    {
        if projectile.hidden {
            continue;
        }
        projectile.age_secs += dt;
        let from = *pos;
        *pos = pos.offset(DVec3::from(*vel) * dt);
        if projectile.age_secs >= projectile.lifetime_secs {
            expired.push(entity);
            continue;
        }
        in_flight.push(InFlight {
            entity,
            id: actor.id,
            from,
            to: *pos,
            velocity: *vel,
            radius: projectile.radius,
            damage: projectile.damage,
            critical: projectile.critical,
            knockback_force: projectile.knockback_force,
            chains: projectile.chains,
        });
    }

    for entity in expired {
        let _ = world.despawn(entity);
    }

    for shot in in_flight {
        let Some((enemy, enemy_id, enemy_pos)) = strike_target(world, &shot) else {
            continue;
        };
        if let Err(e) = apply_damage(world, enemy, enemy_id, shot.damage, shot.critical, sink) {
            log::warn!("projectile {} strike dropped: {e}", shot.id);
        }

        let flight = DVec3::from(shot.velocity);
        if let Some(slide) = SlideKnockback::new(enemy_pos, flight, shot.knockback_force) {
            // A new slide replaces any active one
            let _ = world.insert_one(enemy, slide);
        }

        let chain = &sink.tuning.chain;
        if !(shot.chains && chain.enabled) {
            let _ = world.despawn(shot.entity);
            continue;
        }

        *next_session_id += 1;
        let mut session = ChainSession::start(*next_session_id, shot.id, enemy_id, enemy_pos, chain);
        sink.events.push(SimEvent::ChainStarted {
            session: session.id,
            origin: enemy_id,
        });
        log::debug!("chain {} started on {enemy_id}", session.id);

        // The first hop resolves on the strike itself
        if step_session(world, &mut session, 0.0, sink) {
            end_session(world, &session, sink.events);
        } else {
            if let Ok(mut projectile) = world.get::<&mut Projectile>(shot.entity) {
                projectile.hidden = true;
            }
            new_sessions.push(session);
        }
    }
}

/// First living enemy whose hit radius the projectile's flight segment
/// enters this tick (horizontal plane), ties to the lowest id.
fn strike_target(world: &World, shot: &InFlight) -> Option<(Entity, ActorId, Position)> {
    world
        .query::<(&Actor, &Enemy, &Position, &HitRadius)>()
        .without::<&Dead>()
        .iter()
        .filter_map(|(entity, (actor, _, pos, hit))| {
            let t = segment_entry(shot.from, shot.to, *pos, hit.0 + shot.radius)?;
            Some((entity, actor.id, *pos, t))
        })
        .min_by(|a, b| a.3.total_cmp(&b.3).then(a.1.cmp(&b.1)))
        .map(|(entity, id, pos, _)| (entity, id, pos))
}

/// Fraction along `from -> to` at which the horizontal distance to `center`
/// first drops to `reach`, or `None` if the segment stays outside.
fn segment_entry(from: Position, to: Position, center: Position, reach: f64) -> Option<f64> {
    let start = DVec2::new(from.x - center.x, from.y - center.y);
    let travel = DVec2::new(to.x - from.x, to.y - from.y);
    let c = start.length_squared() - reach * reach;
    if c <= 0.0 {
        return Some(0.0);
    }

    let a = travel.length_squared();
    let b = 2.0 * start.dot(travel);
    if a == 0.0 || b >= 0.0 {
        return None;
    }
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }
    let t = (-b - discriminant.sqrt()) / (2.0 * a);
    (t <= 1.0).then_some(t)
}
