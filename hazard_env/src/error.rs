//! Error types for the content store.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while fetching or decoding lecture documents.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading the backing storage failed
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A document did not match the lecture shape
    #[error("Failed to decode {location}: {message}")]
    Decode { location: String, message: String },

    /// The store itself is unusable (poisoned lock, closed backend, etc.)
    #[error("Store error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Creates an I/O error for a path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates a decode error.
    pub fn decode(location: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Decode {
            location: location.into(),
            message: err.to_string(),
        }
    }

    /// Creates a backend error.
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}
