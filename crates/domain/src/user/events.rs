//! User account and badge events.

use common::UserId;
use serde::{Deserialize, Serialize};

use super::badge::BadgeColour;
use crate::DomainError;

/// Events describing what happened to a user account or its badges.
///
/// Events carry no timestamp or sequence number; their effect depends only
/// on the order in which the projection applies them.
///
/// Kinds this version does not know about decode to
/// [`UserEvent::Unrecognized`] instead of failing, so a newer producer can
/// share a feed with an older projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum UserEvent {
    /// A user account was opened.
    AccountCreated(AccountCreatedData),

    /// A user's name and/or email changed.
    AccountUpdated(AccountUpdatedData),

    /// A user was awarded a badge.
    BadgeGained(BadgeChangedData),

    /// A user had a badge taken away.
    BadgeLost(BadgeChangedData),

    /// An event kind this version does not recognize.
    #[serde(other)]
    Unrecognized,
}

impl UserEvent {
    /// Returns the event type name.
    pub fn event_type(&self) -> &'static str {
        match self {
            UserEvent::AccountCreated(_) => "AccountCreated",
            UserEvent::AccountUpdated(_) => "AccountUpdated",
            UserEvent::BadgeGained(_) => "BadgeGained",
            UserEvent::BadgeLost(_) => "BadgeLost",
            UserEvent::Unrecognized => "Unrecognized",
        }
    }

    /// Returns the user the event refers to, if the kind is recognized.
    pub fn user_id(&self) -> Option<&UserId> {
        match self {
            UserEvent::AccountCreated(data) => Some(&data.user_id),
            UserEvent::AccountUpdated(data) => Some(&data.user_id),
            UserEvent::BadgeGained(data) | UserEvent::BadgeLost(data) => Some(&data.user_id),
            UserEvent::Unrecognized => None,
        }
    }

    /// Decodes an event from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, DomainError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Data for AccountCreated event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountCreatedData {
    pub user_id: UserId,
}

/// Data for AccountUpdated event.
///
/// Both fields are optional; `None` (or an empty string on the wire) means
/// "leave unchanged".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountUpdatedData {
    pub user_id: UserId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl AccountUpdatedData {
    /// The new full name, if the event changes it.
    pub fn full_name(&self) -> Option<&str> {
        self.full_name.as_deref().filter(|n| !n.is_empty())
    }

    /// The new email, if the event changes it.
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref().filter(|e| !e.is_empty())
    }
}

/// Data for BadgeGained and BadgeLost events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeChangedData {
    pub user_id: UserId,
    pub colour: BadgeColour,
}

// Convenience constructors for events
impl UserEvent {
    /// Creates an AccountCreated event.
    pub fn account_created(user_id: impl Into<UserId>) -> Self {
        UserEvent::AccountCreated(AccountCreatedData {
            user_id: user_id.into(),
        })
    }

    /// Creates an AccountUpdated event. Empty strings are treated as absent.
    pub fn account_updated(
        user_id: impl Into<UserId>,
        full_name: Option<&str>,
        email: Option<&str>,
    ) -> Self {
        UserEvent::AccountUpdated(AccountUpdatedData {
            user_id: user_id.into(),
            full_name: full_name.filter(|n| !n.is_empty()).map(str::to_string),
            email: email.filter(|e| !e.is_empty()).map(str::to_string),
        })
    }

    /// Creates a BadgeGained event.
    pub fn badge_gained(user_id: impl Into<UserId>, colour: BadgeColour) -> Self {
        UserEvent::BadgeGained(BadgeChangedData {
            user_id: user_id.into(),
            colour,
        })
    }

    /// Creates a BadgeLost event.
    pub fn badge_lost(user_id: impl Into<UserId>, colour: BadgeColour) -> Self {
        UserEvent::BadgeLost(BadgeChangedData {
            user_id: user_id.into(),
            colour,
        })
    }
}
