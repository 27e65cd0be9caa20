//! Chain lightning system: advances chain sessions and applies hop damage.
//!
//! Sessions are stored in `SimulationEngine`'s chain map, NOT as ECS entities.
//! The originating projectile stays in the world, hidden, until its session ends.

use std::collections::BTreeMap;

use hecs::World;

use geneforge_combat::chain::{ChainCandidate, ChainSession, HopDamage, HopOutcome, SpatialQuery};
use geneforge_combat::health::Health;
use geneforge_core::components::*;
use geneforge_core::events::SimEvent;
use geneforge_core::types::Position;

use crate::systems::actor_entity;
use crate::systems::damage::{apply_damage, DamageSink};

/// Sphere overlap over the arena's enemies.
pub struct ArenaQuery<'w> {
    pub world: &'w World,
}

impl SpatialQuery for ArenaQuery<'_> {
    fn overlap_sphere(&self, center: Position, radius: f64) -> Vec<ChainCandidate> {
        self.world
            .query::<(&Actor, &Enemy, &Position, Option<&Dead>)>()
            .iter()
            .filter(|(_, (_, _, pos, _))| pos.distance_to(&center) <= radius)
            .map(|(_, (actor, _, pos, dead))| ChainCandidate {
                id: actor.id,
                position: *pos,
                alive: dead.is_none(),
            })
            .collect()
    }
}

/// Advance every session by `dt`, ending the ones that are done.
pub fn run(
    world: &mut World,
    sessions: &mut BTreeMap<u32, ChainSession>,
    dt: f64,
    sink: &mut DamageSink,
) {
    let mut ended = Vec::new();
    for (id, session) in sessions.iter_mut() {
        if step_session(world, session, dt, sink) {
            ended.push(*id);
        }
    }
    for id in ended {
        if let Some(session) = sessions.remove(&id) {
            end_session(world, &session, sink.events);
        }
    }
}

/// Resolve at most one hop. Returns true when the session is over.
pub fn step_session(
    world: &mut World,
    session: &mut ChainSession,
    dt: f64,
    sink: &mut DamageSink,
) -> bool {
    let outcome = session.next_hop(dt, &ArenaQuery { world: &*world });
    let hop = match outcome {
        HopOutcome::Waiting => return false,
        HopOutcome::Finished => return true,
        HopOutcome::Hop(hop) => hop,
    };

    sink.events.push(SimEvent::ChainHop {
        session: session.id,
        target: hop.target,
        from: hop.from,
        to: hop.to,
        hop: hop.hop,
    });
    sink.score.chain_hops += 1;

    match actor_entity(world, hop.target) {
        Ok(target) => {
            let amount = match session.hop_damage {
                HopDamage::Fixed(amount) => amount,
                HopDamage::Lethal => world
                    .get::<&Health>(target)
                    .map(|h| h.maximum())
                    .unwrap_or_default(),
            };
            if let Err(e) = apply_damage(world, target, hop.target, amount, false, sink) {
                log::warn!("chain {} hop damage dropped: {e}", session.id);
            }
        }
        Err(e) => log::warn!("chain {} hop target lost: {e}", session.id),
    }

    session.is_finished()
}

/// Emit the end event and despawn the hidden originating projectile.
pub fn end_session(world: &mut World, session: &ChainSession, events: &mut Vec<SimEvent>) {
    events.push(SimEvent::ChainEnded {
        session: session.id,
        hops: session.hops,
    });
    if let Ok(projectile) = actor_entity(world, session.projectile) {
        let _ = world.despawn(projectile);
    }
    log::debug!("chain {} ended after {} hops", session.id, session.hops);
}
