//! Error types for lecture documents and the simulation engine.

use thiserror::Error;

/// Errors raised by the engine's control surface.
///
/// Content shape never produces these: dangling targets and empty choice
/// lists degrade to the End state. Only selecting a choice that is not on
/// screen is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The choice id is not offered by the current state
    #[error("Choice '{choice_id}' is not offered at {state}")]
    ChoiceNotOffered { choice_id: String, state: String },
}

impl EngineError {
    /// Creates a choice-not-offered error.
    pub fn not_offered(choice_id: impl Into<String>, state: impl std::fmt::Display) -> Self {
        Self::ChoiceNotOffered {
            choice_id: choice_id.into(),
            state: state.to_string(),
        }
    }
}

/// Errors decoding or encoding lecture documents.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// JSON was malformed or did not match the document shape
    #[error("Document error: {0}")]
    Json(#[from] serde_json::Error),
}
