//! Events emitted by the simulation for animation, audio and UI feedback.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{ActorId, Position};

/// Everything observable that happened during a tick, in the order it happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// An actor accepted damage for the first time.
    FirstHit { actor: ActorId },
    /// An actor accepted damage.
    Damaged {
        actor: ActorId,
        amount: f64,
        critical: bool,
        remaining: f64,
    },
    /// An actor's health reached zero.
    Died { actor: ActorId },
    /// Fire-and-forget animation trigger.
    Animation { actor: ActorId, signal: AnimSignal },
    /// An enemy started an attack swing.
    AttackStarted {
        actor: ActorId,
        variant: AttackVariant,
    },
    /// A knockback impulse was absorbed by a target.
    KnockbackApplied {
        target: ActorId,
        method: KnockbackMethod,
    },
    ProjectileFired {
        projectile: ActorId,
        heading: f64,
        damage: f64,
        critical: bool,
    },
    ChainStarted {
        session: u32,
        origin: ActorId,
    },
    ChainHop {
        session: u32,
        target: ActorId,
        from: Position,
        to: Position,
        hop: u32,
    },
    ChainEnded { session: u32, hops: u32 },
    /// The player lost a life and came back.
    PlayerRevived { lives_remaining: u32 },
    /// The player ran out of lives.
    GameOver,
}
