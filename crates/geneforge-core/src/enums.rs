//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Enemy AI decision mode. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AiMode {
    /// Roaming around the spawn anchor, alternating moves and idle waits.
    #[default]
    Wandering,
    /// Moving toward the tracked target.
    Chasing,
    /// Holding position in attack range, swinging on the attack clock.
    Attacking,
}

/// Named attack animation variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackVariant {
    #[default]
    Attack,
    AttackB,
    AttackC,
}

/// How an enemy picks its attack variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackTable {
    /// Always the basic `Attack`.
    #[default]
    Single,
    /// Weighted roll: 60% Attack, 25% AttackB, 15% AttackC.
    Weighted,
}

/// Enemy archetype category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyArchetype {
    /// Baseline melee enemy: wanders, chases, single attack.
    Grunt,
    /// Slow heavy hitter with a three-variant attack table.
    Brute,
    /// Never moves; swings at anything that walks into range.
    Sentry,
}

/// Fire-and-forget animation trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimSignal {
    Attack(AttackVariant),
    Damaged,
    Death,
    /// Player death with no lives left.
    FinalDeath,
}

/// Which capability absorbed a knockback impulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KnockbackMethod {
    /// Dedicated knockback velocity buffer.
    Receiver,
    /// Physics body impulse with horizontal speed clamp.
    Body,
    /// Decaying displacement routine on a character controller.
    Controller,
}

/// Health bar color band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthBand {
    #[default]
    Healthy,
    Wounded,
    Critical,
}

/// Weapon stat upgrade, applied by `SimCommand::UpgradeWeapon`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "stat", content = "delta")]
pub enum WeaponUpgrade {
    /// Reduces the seconds between shots by `delta`.
    FireRate(f64),
    ProjectileSpeed(f64),
    Damage(f64),
    ProjectileSize(f64),
    Knockback(f64),
    CritChance(f64),
    CritMultiplier(f64),
}

/// Built-in arena layouts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScenarioId {
    #[default]
    Easy,
    Medium,
    Hard,
}

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    MainMenu,
    Active,
    Paused,
    /// Player ran out of lives.
    GameOver,
}
