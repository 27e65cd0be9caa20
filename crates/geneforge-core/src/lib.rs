//! Core types and definitions for the Geneforge arena simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! ids, components, commands, state snapshots, events, and constants.
//! It has no dependency on any engine or runtime framework.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
