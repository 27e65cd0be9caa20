//! Enemy AI system: runs the enemy FSM for every living enemy each tick.
//!
//! Calls the FSM from geneforge-enemy-ai, then writes the resulting state,
//! movement, facing and animator speed back into the ECS.

use hecs::World;
use rand_chacha::ChaCha8Rng;

use geneforge_core::components::*;
use geneforge_core::enums::AnimSignal;
use geneforge_core::events::SimEvent;
use geneforge_core::types::Position;
use geneforge_enemy_ai::fsm::{evaluate, AgentContext};

/// Position of the player if they are in the arena and alive.
pub fn player_target(world: &World) -> Option<Position> {
    world
        .query::<(&Player, &Position)>()
        .without::<&Dead>()
        .iter()
        .next()
        .map(|(_, (_, pos))| *pos)
}

/// Run the enemy AI for all living enemies.
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    now_secs: f64,
    dt: f64,
    events: &mut Vec<SimEvent>,
) {
    let target = player_target(world);
    if target.is_none() {
        log::debug!("no living player to track; enemies hold their mode");
    }

    for (_entity, (actor, agent, pos, facing, animator)) in world
        .query_mut::<(&Actor, &mut AiAgent, &mut Position, &mut Facing, &mut Animator)>()
        .without::<&Dead>()
    {
        let ctx = AgentContext {
            state: &*agent,
            position: *pos,
            heading: facing.heading,
            target,
            now_secs,
            dt,
        };
        let update = evaluate(&ctx, rng);

        if update.mode_changed {
            log::debug!(
                "enemy {} {:?} -> {:?}",
                actor.id,
                agent.mode,
                update.state.mode
            );
        }

        // Grounded movement only; height stays with the controller
        pos.x += update.displacement.x;
        pos.y += update.displacement.y;
        facing.heading = update.heading;
        if let Some(speed) = update.anim_speed {
            animator.speed = speed;
        }
        if let Some(variant) = update.attack {
            events.push(SimEvent::AttackStarted {
                actor: actor.id,
                variant,
            });
            events.push(SimEvent::Animation {
                actor: actor.id,
                signal: AnimSignal::Attack(variant),
            });
        }
        *agent = update.state;
    }
}
