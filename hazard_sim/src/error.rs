//! Error types for the simulation harness.

use hazard_core::EngineError;
use hazard_env::StoreError;
use thiserror::Error;

/// Errors surfaced by harness commands.
#[derive(Debug, Error)]
pub enum SimError {
    /// Loading the simulation source failed
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A scripted choice was not on screen
    #[error("Replay stopped at entry {position}: {source}")]
    Replay {
        position: usize,
        #[source]
        source: EngineError,
    },

    /// The engine rejected a choice during play
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// The source resolved to nothing playable
    #[error("No playable simulation in {0}")]
    NotPlayable(String),

    /// Command-line input could not be understood
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Terminal or export I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Export serialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SimError {
    /// Creates an invalid-input error.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
