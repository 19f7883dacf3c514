//! Domain error types.

use thiserror::Error;

/// Errors that can occur while decoding domain values.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
