//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 30;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

/// Maximum time scale accepted by `SetTimeScale`.
pub const MAX_TIME_SCALE: f64 = 4.0;

// --- Enemy AI ---

/// Distance at which a wandering agent counts as having reached its wander target.
pub const WANDER_ARRIVE_DISTANCE: f64 = 0.2;

/// Minimum squared horizontal offset before an agent bothers moving.
pub const MOVE_EPSILON_SQ: f64 = 0.01;

/// Minimum squared horizontal offset before an attacking agent turns to face.
pub const FACE_EPSILON_SQ: f64 = 0.001;

/// Attack variant weights for the three-variant attack table.
pub const ATTACK_A_WEIGHT: f64 = 0.60;
pub const ATTACK_B_WEIGHT: f64 = 0.25;
pub const ATTACK_C_WEIGHT: f64 = 0.15;

// --- Knockback ---

/// Squared length below which a melee knockback direction is degenerate.
pub const KNOCKBACK_DIR_EPSILON_SQ: f64 = 1e-4;

/// Squared speed below which a knockback velocity buffer is at rest.
pub const KNOCKBACK_REST_EPSILON_SQ: f64 = 1e-6;

/// Default decay rate of a knockback receiver's velocity buffer (per second).
pub const RECEIVER_DECAY_RATE: f64 = 6.0;

/// Default max horizontal speed a knockback receiver accepts.
pub const RECEIVER_MAX_HORIZONTAL_SPEED: f64 = 10.0;

/// Slide knockback displacement per unit of force.
pub const SLIDE_DISPLACEMENT_PER_FORCE: f64 = 0.1;

/// Slide knockback duration (seconds).
pub const SLIDE_DURATION_SECS: f64 = 0.1;

/// Gravity applied to airborne character controllers (units/s²).
pub const CONTROLLER_GRAVITY: f64 = -35.0;

/// Small downward speed that keeps a grounded controller in floor contact.
pub const CONTROLLER_GROUNDED_SPEED: f64 = -2.0;

/// Gravity applied to rigid bodies (units/s²).
pub const BODY_GRAVITY: f64 = -9.81;

// --- Player ---

pub const PLAYER_MAX_HP: f64 = 100.0;
pub const PLAYER_LIVES: u32 = 3;
pub const PLAYER_INVULNERABLE_SECS: f64 = 2.0;
pub const PLAYER_POST_REVIVE_FRACTION: f64 = 1.0;
pub const PLAYER_MOVE_SPEED: f64 = 6.0;
pub const PLAYER_HIT_RADIUS: f64 = 0.5;

/// HP restored when a revive fraction would otherwise leave the player at zero.
pub const MIN_REVIVE_HP: f64 = 1.0;

// --- Weapon ---

pub const WEAPON_FIRE_RATE: f64 = 0.25;
pub const WEAPON_PROJECTILE_SPEED: f64 = 20.0;
pub const WEAPON_DAMAGE: f64 = 1.0;
pub const WEAPON_PROJECTILE_SIZE: f64 = 1.0;
pub const WEAPON_KNOCKBACK_FORCE: f64 = 5.0;
pub const WEAPON_CRIT_CHANCE: f64 = 0.0;
pub const WEAPON_CRIT_MULTIPLIER: f64 = 2.0;

/// Lowest fire interval reachable through upgrades (seconds).
pub const MIN_FIRE_RATE: f64 = 0.05;

/// Smallest projectile size reachable through upgrades.
pub const MIN_PROJECTILE_SIZE: f64 = 0.1;

/// Projectile collision radius per unit of projectile size.
pub const PROJECTILE_RADIUS_PER_SIZE: f64 = 0.25;

/// Projectile lifetime (seconds).
pub const PROJECTILE_LIFETIME_SECS: f64 = 3.0;

/// Height above the player's feet at which projectiles spawn.
pub const MUZZLE_HEIGHT: f64 = 1.0;

// --- Chain lightning ---

pub const CHAIN_RADIUS: f64 = 6.0;
pub const CHAIN_HOP_DAMAGE: f64 = 10.0;
pub const CHAIN_MAX_HOPS: u32 = 3;
pub const CHAIN_HOP_DELAY_SECS: f64 = 0.1;

// --- Presentation ---

/// Height above an actor at which damage numbers spawn.
pub const DAMAGE_TEXT_HEIGHT: f64 = 2.5;
pub const DAMAGE_TEXT_FADE_SECS: f64 = 1.0;
pub const DAMAGE_TEXT_RISE: f64 = 1.0;

/// Health bar fraction thresholds.
pub const HEALTH_BAR_CRITICAL: f64 = 0.15;
pub const HEALTH_BAR_WOUNDED: f64 = 0.45;

// --- Arena ---

/// Radius of the arena; entities beyond it are despawned.
pub const ARENA_RADIUS: f64 = 200.0;
