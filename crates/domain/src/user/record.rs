//! The per-user record held by the projection.

use std::collections::BTreeMap;

use common::UserId;
use serde::{Deserialize, Serialize};

use super::badge::{BadgeColour, BadgeStatus};

/// Badge counts per colour.
///
/// Colours that were never touched are absent and read as zero. Counts are
/// signed: losing a badge that was never gained leaves a negative count, and
/// nothing clamps it back to zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BadgeCount(BTreeMap<BadgeColour, i64>);

impl BadgeCount {
    /// Creates an empty set of counts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates counts holding a single colour.
    pub fn single(colour: BadgeColour, count: i64) -> Self {
        Self(BTreeMap::from([(colour, count)]))
    }

    /// Returns the count for a colour, zero if absent.
    pub fn get(&self, colour: BadgeColour) -> i64 {
        self.0.get(&colour).copied().unwrap_or(0)
    }

    /// Returns true if the colour has a recorded count (even a zero one).
    pub fn contains(&self, colour: BadgeColour) -> bool {
        self.0.contains_key(&colour)
    }

    /// Adds one to a colour's count.
    pub fn increment(&mut self, colour: BadgeColour) {
        *self.0.entry(colour).or_insert(0) += 1;
    }

    /// Subtracts one from a colour's count.
    pub fn decrement(&mut self, colour: BadgeColour) {
        *self.0.entry(colour).or_insert(0) -= 1;
    }

    /// Returns the number of recorded colours.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no colour has a recorded count.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(BadgeColour, i64)> for BadgeCount {
    fn from_iter<T: IntoIterator<Item = (BadgeColour, i64)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Current state of one user, built up from that user's events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub full_name: String,
    pub email: String,
    pub badge_count: BadgeCount,
}

impl User {
    /// Creates a user with no name, email or badges.
    pub fn new(id: UserId) -> Self {
        Self {
            id,
            full_name: String::new(),
            email: String::new(),
            badge_count: BadgeCount::new(),
        }
    }

    /// Creates a user with the given profile and no badges.
    pub fn with_profile(id: UserId, full_name: Option<&str>, email: Option<&str>) -> Self {
        Self {
            full_name: full_name.unwrap_or_default().to_string(),
            email: email.unwrap_or_default().to_string(),
            ..Self::new(id)
        }
    }

    /// Creates a user known only through a badge event.
    pub fn with_badge(id: UserId, colour: BadgeColour, count: i64) -> Self {
        Self {
            badge_count: BadgeCount::single(colour, count),
            ..Self::new(id)
        }
    }

    /// Applies a partial profile update. Absent or empty values leave the
    /// current value in place; an update can never clear a field.
    pub fn update_profile(&mut self, full_name: Option<&str>, email: Option<&str>) {
        if let Some(name) = full_name.filter(|n| !n.is_empty()) {
            self.full_name = name.to_string();
        }
        if let Some(email) = email.filter(|e| !e.is_empty()) {
            self.email = email.to_string();
        }
    }

    /// Returns the user's current badge tier.
    pub fn badge_status(&self) -> BadgeStatus {
        BadgeStatus::from_counts(&self.badge_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_colour_reads_zero() {
        let counts = BadgeCount::new();
        assert_eq!(counts.get(BadgeColour::Red), 0);
        assert!(!counts.contains(BadgeColour::Red));
    }

    #[test]
    fn test_decrement_from_absent_goes_negative() {
        let mut counts = BadgeCount::new();
        counts.decrement(BadgeColour::Green);
        counts.decrement(BadgeColour::Green);
        assert_eq!(counts.get(BadgeColour::Green), -2);
    }

    #[test]
    fn test_increment_and_decrement_cancel() {
        let mut counts = BadgeCount::new();
        counts.increment(BadgeColour::Blue);
        counts.decrement(BadgeColour::Blue);
        assert_eq!(counts.get(BadgeColour::Blue), 0);
        assert!(counts.contains(BadgeColour::Blue));
    }

    #[test]
    fn test_partial_update_keeps_existing_email() {
        let mut user = User::with_profile(UserId::new("u1"), Some("Orig"), Some("orig@test.com"));
        user.update_profile(Some("X"), Some(""));
        assert_eq!(user.full_name, "X");
        assert_eq!(user.email, "orig@test.com");
    }

    #[test]
    fn test_update_with_nothing_is_noop() {
        let mut user = User::with_profile(UserId::new("u1"), Some("A"), Some("a@test.com"));
        let before = user.clone();
        user.update_profile(None, None);
        assert_eq!(user, before);
    }

    #[test]
    fn test_with_badge_sets_single_colour() {
        let user = User::with_badge(UserId::new("u1"), BadgeColour::Red, -1);
        assert_eq!(user.badge_count.get(BadgeColour::Red), -1);
        assert_eq!(user.badge_count.len(), 1);
        assert!(user.full_name.is_empty());
        assert!(user.email.is_empty());
    }

    #[test]
    fn test_badge_count_serializes_as_colour_map() {
        let counts = BadgeCount::from_iter([(BadgeColour::Blue, 3), (BadgeColour::Red, -1)]);
        let json = serde_json::to_value(&counts).unwrap();
        assert_eq!(json, serde_json::json!({"blue": 3, "red": -1}));
    }
}
