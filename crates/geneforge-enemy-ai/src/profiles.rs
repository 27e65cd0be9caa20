//! Archetype-specific behavioral profiles.
//!
//! Consolidates per-archetype parameters for the enemy FSM, the attack
//! resolution in the sim, and spawn-time stats.

use geneforge_core::enums::{AttackTable, EnemyArchetype};

/// Behavioral profile for an enemy archetype.
#[derive(Debug, Clone)]
pub struct AgentProfile {
    /// Never moves (no chasing, no wandering).
    pub stay_stationary: bool,
    /// Turns to face the target while attacking.
    pub rotate_in_place: bool,

    // --- Wander ---
    pub wander_radius: f64,
    /// Max seconds spent walking toward one wander target before idling.
    pub wander_interval_secs: f64,
    pub wander_speed: f64,
    pub idle_wait_secs: f64,

    // --- Engagement ---
    pub detection_radius: f64,
    pub chase_speed: f64,
    pub attack_range: f64,
    /// Minimum seconds between attack triggers.
    pub attack_rate_secs: f64,
    pub damage_per_hit: f64,
    pub attack_table: AttackTable,
    /// Seconds from attack trigger to hit when no animation drives the hit frame.
    /// None = hits only arrive through `SimCommand::AttackHit`.
    pub auto_hit_delay_secs: Option<f64>,

    // --- Knockback dealt ---
    pub knockback_enabled: bool,
    pub knockback_force: f64,
    pub knockback_upward: f64,
    /// Horizontal speed clamp for body impulses (0 = no clamp).
    pub knockback_max_speed: f64,
    pub controller_knockback_secs: f64,
    pub controller_knockback_decay: f64,

    // --- Received damage ---
    /// AI suspension after taking a hit.
    pub damage_pause_secs: f64,
    pub max_health: f64,
    pub death_anim_secs: f64,
    pub hit_radius: f64,
}

impl Default for AgentProfile {
    fn default() -> Self {
        Self {
            stay_stationary: false,
            rotate_in_place: true,
            wander_radius: 5.0,
            wander_interval_secs: 3.0,
            wander_speed: 2.0,
            idle_wait_secs: 1.0,
            detection_radius: 20.0,
            chase_speed: 4.0,
            attack_range: 1.5,
            attack_rate_secs: 1.0,
            damage_per_hit: 10.0,
            attack_table: AttackTable::Single,
            auto_hit_delay_secs: None,
            knockback_enabled: true,
            knockback_force: 6.0,
            knockback_upward: 0.5,
            knockback_max_speed: 12.0,
            controller_knockback_secs: 0.25,
            controller_knockback_decay: 8.0,
            damage_pause_secs: 0.5,
            max_health: 5.0,
            death_anim_secs: 1.0,
            hit_radius: 0.5,
        }
    }
}

/// Get the behavioral profile for a given archetype.
pub fn get_profile(archetype: EnemyArchetype) -> AgentProfile {
    match archetype {
        EnemyArchetype::Grunt => AgentProfile {
            auto_hit_delay_secs: Some(0.4),
            ..AgentProfile::default()
        },
        EnemyArchetype::Brute => AgentProfile {
            wander_radius: 4.0,
            wander_speed: 1.5,
            idle_wait_secs: 1.5,
            detection_radius: 16.0,
            chase_speed: 3.0,
            attack_range: 2.0,
            attack_rate_secs: 1.6,
            damage_per_hit: 20.0,
            attack_table: AttackTable::Weighted,
            auto_hit_delay_secs: Some(0.6),
            knockback_force: 9.0,
            knockback_upward: 1.0,
            damage_pause_secs: 0.3,
            max_health: 15.0,
            death_anim_secs: 1.5,
            hit_radius: 0.8,
            ..AgentProfile::default()
        },
        EnemyArchetype::Sentry => AgentProfile {
            stay_stationary: true,
            wander_radius: 0.0,
            wander_speed: 0.0,
            detection_radius: 12.0,
            attack_range: 2.5,
            attack_rate_secs: 1.2,
            damage_per_hit: 8.0,
            auto_hit_delay_secs: Some(0.3),
            knockback_force: 4.0,
            knockback_upward: 0.0,
            damage_pause_secs: 0.25,
            max_health: 8.0,
            ..AgentProfile::default()
        },
    }
}
