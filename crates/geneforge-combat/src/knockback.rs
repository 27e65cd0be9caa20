//! Knockback application.
//!
//! Three ways a target can absorb an impulse, tried in a fixed order:
//! a dedicated velocity buffer, a physics body, or a timed displacement
//! routine on a character controller. Projectile hits on enemies use a
//! short positional slide instead.

use geneforge_core::components::RigidBody;
use geneforge_core::constants::*;
use geneforge_core::enums::KnockbackMethod;
use geneforge_core::types::{heading_vector, Position};
use glam::DVec3;

/// Velocity buffer that turns impulses into decaying displacement.
#[derive(Debug, Clone)]
pub struct KnockbackReceiver {
    pub velocity: DVec3,
    /// Per-second decay toward rest.
    pub decay_rate: f64,
    pub max_horizontal_speed: f64,
    /// Route displacement through the owner's character controller when it has one.
    pub use_controller: bool,
}

impl Default for KnockbackReceiver {
    fn default() -> Self {
        Self {
            velocity: DVec3::ZERO,
            decay_rate: RECEIVER_DECAY_RATE,
            max_horizontal_speed: RECEIVER_MAX_HORIZONTAL_SPEED,
            use_controller: true,
        }
    }
}

impl KnockbackReceiver {
    pub fn apply_impulse(&mut self, impulse: DVec3) {
        self.velocity += impulse;
        self.clamp_horizontal();
    }

    /// Displacement for this tick; decays the buffer afterwards.
    pub fn step(&mut self, dt: f64) -> DVec3 {
        self.clamp_horizontal();
        if self.is_at_rest() {
            self.velocity = DVec3::ZERO;
            return DVec3::ZERO;
        }
        let displacement = self.velocity * dt;
        self.velocity = decay(self.velocity, self.decay_rate, dt);
        displacement
    }

    pub fn is_at_rest(&self) -> bool {
        self.velocity.length_squared() < KNOCKBACK_REST_EPSILON_SQ
    }

    fn clamp_horizontal(&mut self) {
        let (x, y) = clamp_planar(self.velocity.x, self.velocity.y, self.max_horizontal_speed);
        self.velocity.x = x;
        self.velocity.y = y;
    }
}

/// Impulse on a physics body, with an optional horizontal speed clamp (0 = none).
pub fn apply_body_impulse(body: &mut RigidBody, impulse: DVec3, max_speed: f64) {
    let inv_mass = if body.mass > 0.0 { 1.0 / body.mass } else { 1.0 };
    let mut velocity = DVec3::from(body.velocity) + impulse * inv_mass;
    if max_speed > 0.0 {
        let (x, y) = clamp_planar(velocity.x, velocity.y, max_speed);
        velocity.x = x;
        velocity.y = y;
    }
    body.velocity = velocity.into();
}

/// Timed, decaying displacement applied through a character controller.
#[derive(Debug, Clone)]
pub struct ControllerKnockback {
    pub velocity: DVec3,
    pub elapsed: f64,
    pub duration: f64,
    pub decay_rate: f64,
}

impl ControllerKnockback {
    pub fn new(impulse: DVec3, duration: f64, decay_rate: f64) -> Self {
        Self {
            velocity: impulse,
            elapsed: 0.0,
            duration,
            decay_rate,
        }
    }

    /// Displacement for this tick. Call only while not finished.
    pub fn step(&mut self, dt: f64) -> DVec3 {
        let displacement = self.velocity * dt;
        self.velocity = decay(self.velocity, self.decay_rate, dt);
        self.elapsed += dt;
        displacement
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// Short positional slide along a horizontal direction.
#[derive(Debug, Clone)]
pub struct SlideKnockback {
    pub from: Position,
    pub to: Position,
    pub elapsed: f64,
    pub duration: f64,
}

impl SlideKnockback {
    /// Slide `0.1 * force` units along the horizontal part of `direction`.
    /// None when the direction has no horizontal extent or force is not positive.
    pub fn new(from: Position, direction: DVec3, force: f64) -> Option<Self> {
        let planar = DVec3::new(direction.x, direction.y, 0.0);
        if force <= 0.0 || planar.length_squared() < KNOCKBACK_DIR_EPSILON_SQ {
            return None;
        }
        let offset = planar.normalize() * (SLIDE_DISPLACEMENT_PER_FORCE * force);
        Some(Self {
            from,
            to: from.offset(offset),
            elapsed: 0.0,
            duration: SLIDE_DURATION_SECS,
        })
    }

    /// Displacement covered during this tick.
    pub fn step(&mut self, dt: f64) -> DVec3 {
        let before = self.progress();
        self.elapsed += dt;
        let after = self.progress();
        (DVec3::from(self.to) - DVec3::from(self.from)) * (after - before)
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn progress(&self) -> f64 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }
}

/// Which knockback capabilities the knockback root carries.
#[derive(Debug, Clone, Copy, Default)]
pub struct KnockbackCapabilities {
    pub receiver: bool,
    pub body: bool,
    pub controller_enabled: bool,
}

/// First present capability wins: receiver, then body, then enabled controller.
pub fn resolve_method(caps: KnockbackCapabilities) -> Option<KnockbackMethod> {
    if caps.receiver {
        Some(KnockbackMethod::Receiver)
    } else if caps.body {
        Some(KnockbackMethod::Body)
    } else if caps.controller_enabled {
        Some(KnockbackMethod::Controller)
    } else {
        None
    }
}

/// Melee impulse from attacker to target: horizontal push plus an upward kick.
/// Falls back to the attacker's facing when the two are stacked.
pub fn melee_impulse(
    attacker: Position,
    attacker_heading: f64,
    target: Position,
    force: f64,
    upward: f64,
) -> DVec3 {
    let offset = DVec3::new(target.x - attacker.x, target.y - attacker.y, 0.0);
    let dir = if offset.length_squared() < KNOCKBACK_DIR_EPSILON_SQ {
        heading_vector(attacker_heading)
    } else {
        offset.normalize()
    };
    dir * force + DVec3::Z * upward
}

fn decay(velocity: DVec3, rate: f64, dt: f64) -> DVec3 {
    let k = (rate * dt).clamp(0.0, 1.0);
    velocity.lerp(DVec3::ZERO, k)
}

fn clamp_planar(x: f64, y: f64, max: f64) -> (f64, f64) {
    let speed = (x * x + y * y).sqrt();
    if speed > max && speed > 0.0 {
        let scale = max / speed;
        (x * scale, y * scale)
    } else {
        (x, y)
    }
}
