//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems and in the model crates, not components.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{ActorId, Position};

/// Stable identity of a spawned actor (player, enemy, projectile).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
}

/// Marks the player-controlled actor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Player;

/// Marks an enemy actor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Enemy;

/// Marks an actor whose health reached zero. Dead actors are skipped by AI,
/// attack resolution, and collision.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Dead;

/// Horizontal facing in radians (0 = North, clockwise).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Facing {
    pub heading: f64,
}

/// Continuous animation parameters. Triggers go out as events instead.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Animator {
    /// Normalized locomotion speed (0..1).
    pub speed: f64,
}

/// Collision radius used by projectile hits.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HitRadius(pub f64);

/// Enemy AI state, mutated once per tick by the enemy AI system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiAgent {
    pub archetype: EnemyArchetype,
    pub mode: AiMode,
    /// Where the agent spawned; wander targets are picked around it.
    pub spawn_anchor: Position,
    pub wander_target: Position,
    /// Seconds spent walking toward the current wander target.
    pub wander_timer: f64,
    pub idle_waiting: bool,
    pub idle_timer: f64,
    /// Simulation time of the last attack trigger (None = never attacked).
    pub last_attack_secs: Option<f64>,
    pub damage_paused: bool,
    pub damage_pause_timer: f64,
    /// Countdown to a self-scheduled attack hit (for archetypes with an auto-hit delay).
    pub pending_hit_secs: Option<f64>,
}

/// Character controller capability (grounded movement).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CharacterController {
    pub enabled: bool,
    /// Height of the floor the controller is grounded on.
    pub grounded_z: f64,
    /// Vertical speed under gravity (units/s, negative = falling).
    pub vertical_speed: f64,
}

/// Simple physics body: integrated each tick with linear drag.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RigidBody {
    pub velocity: crate::types::Velocity,
    pub mass: f64,
    /// Fraction of velocity lost per second.
    pub drag: f64,
}

/// In-flight projectile state. Motion uses the entity's `Velocity`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub owner: ActorId,
    pub damage: f64,
    pub critical: bool,
    pub knockback_force: f64,
    pub radius: f64,
    pub age_secs: f64,
    pub lifetime_secs: f64,
    /// Whether a strike starts a chain session.
    pub chains: bool,
    /// Hidden projectiles have already struck and only wait on their chain session.
    pub hidden: bool,
}

/// Floating damage number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DamageText {
    pub value: u32,
    pub critical: bool,
    pub origin: Position,
    pub age_secs: f64,
    pub fade_secs: f64,
    pub rise: f64,
}

/// Health bar, hidden until the owner is first hit.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct HealthBar {
    pub visible: bool,
}

/// Countdown from death to despawn (death animation length).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DeathTimer {
    pub remaining_secs: f64,
}

/// Temporary immunity to damage.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Invulnerability {
    pub remaining_secs: f64,
}

/// Remaining player lives.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Lives {
    pub remaining: u32,
    pub max: u32,
}

/// Where the player reappears after losing a life.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RespawnPoint(pub Position);

/// Seconds until the player's weapon may fire again.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct FireCooldown {
    pub remaining_secs: f64,
}
