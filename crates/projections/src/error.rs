//! Projection error types.

use thiserror::Error;

/// Errors that can occur during projection processing.
#[derive(Debug, Error)]
pub enum ProjectionError {
    /// A recognized event that cannot be applied, e.g. one without a user id.
    #[error("Invalid {event_type} event: {reason}")]
    InvalidEvent {
        event_type: &'static str,
        reason: String,
    },

    /// The queue has no consumers left.
    #[error("Event queue is closed")]
    QueueClosed,

    /// Pool or queue settings that cannot work.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A worker task ended abnormally.
    #[error("Worker failed: {0}")]
    Worker(String),
}

/// Result type for projection operations.
pub type Result<T> = std::result::Result<T, ProjectionError>;
