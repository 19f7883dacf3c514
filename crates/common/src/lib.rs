//! Shared identifier types for the badge projection service.

pub mod types;

pub use types::UserId;
