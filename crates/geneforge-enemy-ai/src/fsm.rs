//! Enemy behavior finite state machine.
//!
//! Pure functions that compute mode transitions, movement, facing and attack
//! timing for one enemy per tick. No ECS dependency; operates on plain data.

use geneforge_core::components::AiAgent;
use geneforge_core::constants::*;
use geneforge_core::enums::{AiMode, AttackTable, AttackVariant, EnemyArchetype};
use geneforge_core::types::Position;
use glam::DVec3;
use rand::Rng;

use crate::profiles::{get_profile, AgentProfile};

/// Input to the FSM for a single agent.
pub struct AgentContext<'a> {
    pub state: &'a AiAgent,
    pub position: Position,
    /// Current facing (radians, 0 = North).
    pub heading: f64,
    /// Tracked target position, if any.
    pub target: Option<Position>,
    /// Simulation time at the start of this tick.
    pub now_secs: f64,
    pub dt: f64,
}

/// Output from the FSM.
#[derive(Debug, Clone)]
pub struct AgentUpdate {
    pub state: AiAgent,
    /// Horizontal displacement to apply this tick.
    pub displacement: DVec3,
    pub heading: f64,
    /// New animator speed; None leaves the animator untouched.
    pub anim_speed: Option<f64>,
    /// Attack triggered this tick.
    pub attack: Option<AttackVariant>,
    pub mode_changed: bool,
}

/// Initial AI state for a freshly spawned agent, with a first wander target.
pub fn spawn_state<R: Rng + ?Sized>(
    archetype: EnemyArchetype,
    anchor: Position,
    rng: &mut R,
) -> AiAgent {
    let profile = get_profile(archetype);
    AiAgent {
        archetype,
        mode: AiMode::Wandering,
        spawn_anchor: anchor,
        wander_target: pick_wander_target(anchor, profile.wander_radius, rng),
        wander_timer: 0.0,
        idle_waiting: false,
        idle_timer: 0.0,
        last_attack_secs: None,
        damage_paused: false,
        damage_pause_timer: 0.0,
        pending_hit_secs: None,
    }
}

/// Evaluate the FSM for one agent using its archetype profile.
pub fn evaluate<R: Rng + ?Sized>(ctx: &AgentContext, rng: &mut R) -> AgentUpdate {
    let profile = get_profile(ctx.state.archetype);
    evaluate_with_profile(ctx, &profile, rng)
}

/// Evaluate the FSM for one agent with an explicit profile.
pub fn evaluate_with_profile<R: Rng + ?Sized>(
    ctx: &AgentContext,
    profile: &AgentProfile,
    rng: &mut R,
) -> AgentUpdate {
    let mut update = AgentUpdate {
        state: ctx.state.clone(),
        displacement: DVec3::ZERO,
        heading: ctx.heading,
        anim_speed: None,
        attack: None,
        mode_changed: false,
    };

    // A damage pause preempts all mode logic
    if update.state.damage_paused {
        update.state.damage_pause_timer += ctx.dt;
        update.anim_speed = Some(0.0);
        if update.state.damage_pause_timer >= profile.damage_pause_secs {
            update.state.damage_paused = false;
            update.state.damage_pause_timer = 0.0;
        }
        return update;
    }

    let Some(target) = ctx.target else {
        return update;
    };

    let mode = select_mode(ctx.position.distance_to(&target), profile);
    update.mode_changed = mode != ctx.state.mode;
    update.state.mode = mode;

    let (goal, speed) = match mode {
        AiMode::Attacking => (ctx.position, 0.0),
        AiMode::Chasing if profile.stay_stationary => (ctx.position, 0.0),
        AiMode::Chasing => (target, profile.chase_speed),
        AiMode::Wandering if profile.stay_stationary || update.state.idle_waiting => {
            (update.state.wander_target, 0.0)
        }
        AiMode::Wandering => (update.state.wander_target, profile.wander_speed),
    };

    let to_goal = horizontal_offset(ctx.position, goal);
    if speed > 0.0 && to_goal.length_squared() > MOVE_EPSILON_SQ {
        let step = (speed * ctx.dt).min(to_goal.length());
        update.displacement = to_goal.normalize() * step;
        update.heading = heading_of(to_goal);
    }

    if mode == AiMode::Attacking && profile.rotate_in_place {
        let to_target = horizontal_offset(ctx.position, target);
        if to_target.length_squared() > FACE_EPSILON_SQ {
            update.heading = heading_of(to_target);
        }
    }

    update.anim_speed = Some(if profile.chase_speed > 0.0 {
        (speed / profile.chase_speed).clamp(0.0, 1.0)
    } else {
        0.0
    });

    if mode == AiMode::Attacking && attack_ready(&update.state, ctx.now_secs, profile) {
        update.state.last_attack_secs = Some(ctx.now_secs);
        update.attack = Some(roll_variant(profile.attack_table, rng));
        if let Some(delay) = profile.auto_hit_delay_secs {
            update.state.pending_hit_secs = Some(delay);
        }
    }

    if mode == AiMode::Wandering && !profile.stay_stationary {
        let moved = ctx.position.offset(update.displacement);
        advance_wander(&mut update.state, moved, profile, ctx.dt, rng);
    }

    update
}

/// Register a hit on the agent: starts a damage pause unless one is running.
pub fn on_damaged(state: &mut AiAgent) {
    if state.damage_paused {
        return;
    }
    state.damage_paused = true;
    state.damage_pause_timer = 0.0;
}

fn select_mode(distance: f64, profile: &AgentProfile) -> AiMode {
    if distance <= profile.attack_range {
        AiMode::Attacking
    } else if !profile.stay_stationary && distance <= profile.detection_radius {
        AiMode::Chasing
    } else {
        AiMode::Wandering
    }
}

fn attack_ready(state: &AiAgent, now_secs: f64, profile: &AgentProfile) -> bool {
    match state.last_attack_secs {
        None => true,
        Some(last) => now_secs - last >= profile.attack_rate_secs,
    }
}

fn roll_variant<R: Rng + ?Sized>(table: AttackTable, rng: &mut R) -> AttackVariant {
    match table {
        AttackTable::Single => AttackVariant::Attack,
        AttackTable::Weighted => {
            let roll: f64 = rng.gen();
            if roll < ATTACK_A_WEIGHT {
                AttackVariant::Attack
            } else if roll < ATTACK_A_WEIGHT + ATTACK_B_WEIGHT {
                AttackVariant::AttackB
            } else {
                AttackVariant::AttackC
            }
        }
    }
}

/// Walk/idle alternation while wandering.
fn advance_wander<R: Rng + ?Sized>(
    state: &mut AiAgent,
    position: Position,
    profile: &AgentProfile,
    dt: f64,
    rng: &mut R,
) {
    if !state.idle_waiting {
        state.wander_timer += dt;
        let arrived =
            position.horizontal_distance_to(&state.wander_target) <= WANDER_ARRIVE_DISTANCE;
        if state.wander_timer >= profile.wander_interval_secs || arrived {
            state.idle_waiting = true;
            state.idle_timer = 0.0;
        }
    } else {
        state.idle_timer += dt;
        if state.idle_timer >= profile.idle_wait_secs {
            state.idle_waiting = false;
            state.wander_timer = 0.0;
            state.wander_target = pick_wander_target(state.spawn_anchor, profile.wander_radius, rng);
        }
    }
}

/// Uniform random point in the horizontal disk of `radius` around `anchor`.
pub fn pick_wander_target<R: Rng + ?Sized>(anchor: Position, radius: f64, rng: &mut R) -> Position {
    let r = radius * rng.gen::<f64>().sqrt();
    let theta = rng.gen_range(0.0..std::f64::consts::TAU);
    Position::new(anchor.x + r * theta.sin(), anchor.y + r * theta.cos(), anchor.z)
}

fn horizontal_offset(from: Position, to: Position) -> DVec3 {
    DVec3::new(to.x - from.x, to.y - from.y, 0.0)
}

fn heading_of(offset: DVec3) -> f64 {
    offset.x.atan2(offset.y).rem_euclid(std::f64::consts::TAU)
}
