//! Domain layer for the badge projection service.
//!
//! This crate provides the core domain types:
//! - [`UserEvent`], the closed set of account and badge events
//! - [`User`] and [`BadgeCount`], the per-user projection record
//! - [`BadgeStatus`], the badge tier derived from a user's badge counts

pub mod error;
pub mod user;

pub use error::DomainError;
pub use user::{
    AccountCreatedData, AccountUpdatedData, BadgeChangedData, BadgeColour, BadgeCount,
    BadgeStatus, User, UserEvent, fixture,
};
