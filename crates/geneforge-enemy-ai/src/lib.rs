//! Enemy AI for the Geneforge arena.
//!
//! Implements the wander / chase / attack state machine with damage-pause
//! preemption, and archetype-driven behavior profiles.

pub mod fsm;
pub mod profiles;

pub use geneforge_core as core;

#[cfg(test)]
mod tests;
