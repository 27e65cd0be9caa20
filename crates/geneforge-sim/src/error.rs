//! Error types for configuration loading and actor lookups.

use std::path::PathBuf;

use thiserror::Error;

use geneforge_core::types::ActorId;

/// Errors that can occur when loading tuning configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read.
    #[error("failed to read config '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON parsing failed.
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value is out of its accepted range.
    #[error("invalid config value for '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Lookup failures inside a tick. Systems log these and carry on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    #[error("no actor with id {0}")]
    UnknownActor(ActorId),

    #[error("actor {0} is not an enemy")]
    NotAnEnemy(ActorId),

    #[error("no player in the arena")]
    NoPlayer,

    #[error("actor {0} was despawned mid-tick")]
    Despawned(ActorId),
}

pub type SimResult<T> = Result<T, SimError>;
