//! Simulation engine for the GeneForge arena.
//!
//! Owns the hecs ECS world, runs systems at a fixed tick rate,
//! and produces GameStateSnapshots for a frontend or harness.

pub mod config;
pub mod engine;
pub mod error;
pub mod scenario;
pub mod score;
pub mod systems;
pub mod world_setup;

pub use config::TuningConfig;
pub use engine::{SimConfig, SimulationEngine};
pub use error::{ConfigError, SimError};
pub use geneforge_core as core;
