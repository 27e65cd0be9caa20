//! Fundamental geometric and simulation types.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// 3D position in arena space (world units, Cartesian).
/// x = East, y = North, z = Up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// 3D velocity in arena space (units/s).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

/// Stable actor identity, assigned at spawn in increasing order.
///
/// Ordering on `ActorId` is the deterministic tie-break used by spatial
/// selections.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ActorId(pub u32);

impl std::fmt::Display for ActorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Straight-line distance to another position.
    pub fn distance_to(&self, other: &Position) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Horizontal distance (ignoring height).
    pub fn horizontal_distance_to(&self, other: &Position) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Heading to another position in radians (0 = North, clockwise).
    pub fn heading_to(&self, other: &Position) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx.atan2(dy).rem_euclid(std::f64::consts::TAU)
    }

    /// Offset by a displacement vector.
    pub fn offset(&self, delta: DVec3) -> Position {
        Position::new(self.x + delta.x, self.y + delta.y, self.z + delta.z)
    }
}

impl Velocity {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Speed magnitude.
    pub fn speed(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Horizontal speed (ignoring vertical component).
    pub fn horizontal_speed(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Heading in radians (0 = North, clockwise).
    pub fn heading(&self) -> f64 {
        self.x.atan2(self.y).rem_euclid(std::f64::consts::TAU)
    }

    /// Horizontal velocity of the given speed along a heading.
    pub fn from_heading(heading: f64, speed: f64) -> Self {
        Self::new(speed * heading.sin(), speed * heading.cos(), 0.0)
    }
}

/// Unit horizontal vector for a heading (0 = North, clockwise).
pub fn heading_vector(heading: f64) -> DVec3 {
    DVec3::new(heading.sin(), heading.cos(), 0.0)
}

impl From<Position> for DVec3 {
    fn from(p: Position) -> Self {
        DVec3::new(p.x, p.y, p.z)
    }
}

impl From<DVec3> for Position {
    fn from(v: DVec3) -> Self {
        Position::new(v.x, v.y, v.z)
    }
}

impl From<Velocity> for DVec3 {
    fn from(v: Velocity) -> Self {
        DVec3::new(v.x, v.y, v.z)
    }
}

impl From<DVec3> for Velocity {
    fn from(v: DVec3) -> Self {
        Velocity::new(v.x, v.y, v.z)
    }
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}
