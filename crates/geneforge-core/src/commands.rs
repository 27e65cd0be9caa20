//! Commands sent from the frontend (or a harness) to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{ActorId, Position};

/// All possible external inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimCommand {
    // --- Player ---
    /// Move the player to a position (input polling lives outside the sim).
    MovePlayer { position: Position },
    /// Fire the player's weapon along a heading (radians, 0 = North).
    Fire { heading: f64 },
    /// Apply a weapon stat upgrade.
    UpgradeWeapon { upgrade: WeaponUpgrade },

    // --- Animation signals ---
    /// The attack animation of `actor` reached its hit frame.
    AttackHit { actor: ActorId },

    // --- Simulation control ---
    /// Spawn the player and the scenario's enemies and start the run.
    StartArena { scenario: ScenarioId },
    /// Set time scale (1.0 = normal, 2.0 = double, 0.0 = frozen).
    SetTimeScale { scale: f64 },
    /// Return to the main menu, clearing the arena.
    ReturnToMenu,
    Pause,
    Resume,
}
