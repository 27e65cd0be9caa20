//! Game state snapshot: the complete visible state sent to the frontend each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::SimEvent;
use crate::types::{ActorId, Position, SimTime};

/// Complete game state broadcast after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub time_scale: f64,
    pub scenario: Option<ScenarioId>,
    pub player: Option<PlayerView>,
    pub enemies: Vec<EnemyView>,
    pub projectiles: Vec<ProjectileView>,
    pub chains: Vec<ChainView>,
    pub damage_texts: Vec<DamageTextView>,
    /// Events emitted during the tick that produced this snapshot.
    pub events: Vec<SimEvent>,
    pub score: ScoreView,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: ActorId,
    pub position: Position,
    pub hp: f64,
    pub max_hp: f64,
    pub lives: u32,
    pub invulnerable: bool,
    pub alive: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: ActorId,
    pub archetype: EnemyArchetype,
    pub position: Position,
    /// Facing (radians, 0 = North).
    pub heading: f64,
    pub mode: AiMode,
    /// Whether a damage pause is suspending the AI.
    pub paused: bool,
    /// Animator locomotion speed (0..1).
    pub anim_speed: f64,
    pub alive: bool,
    pub health_bar: Option<HealthBarView>,
}

/// Revealed health bar.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HealthBarView {
    pub fraction: f64,
    pub band: HealthBand,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub id: ActorId,
    pub position: Position,
    pub heading: f64,
    pub radius: f64,
    pub critical: bool,
}

/// An in-progress chain lightning session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainView {
    pub session: u32,
    pub anchor: Position,
    pub hops: u32,
    pub max_hops: u32,
    pub visited: Vec<ActorId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DamageTextView {
    pub value: u32,
    pub critical: bool,
    /// Current position (origin plus rise so far).
    pub position: Position,
    /// Opacity (1.0 = fresh, 0.0 = about to vanish).
    pub alpha: f64,
}

/// Running score for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreView {
    pub enemies_killed: u32,
    pub enemies_total: u32,
    pub shots_fired: u32,
    pub chain_hops: u32,
    pub damage_dealt: f64,
    pub damage_taken: f64,
    pub run_time_secs: f64,
}
