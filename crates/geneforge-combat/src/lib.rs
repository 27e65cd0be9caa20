//! Combat model for the Geneforge arena.
//!
//! Health and damage notifications, knockback application, chain lightning
//! resolution, and weapon stats. Plain data and pure functions; the sim
//! crate wires them into the ECS.

pub mod chain;
pub mod health;
pub mod knockback;
pub mod weapon;

#[cfg(test)]
mod tests;
