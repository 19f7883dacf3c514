//! User accounts, their badge events, and badge tiers.

mod badge;
mod events;
pub mod fixture;
mod record;

pub use badge::{BadgeColour, BadgeStatus};
pub use events::{AccountCreatedData, AccountUpdatedData, BadgeChangedData, UserEvent};
pub use record::{BadgeCount, User};
