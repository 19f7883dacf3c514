//! The fixed event sequence the service ingests at startup.
//!
//! Three users, 42 events. Applied in order on a single worker the result is:
//!
//! | user      | name                | email                   | blue | red | green | tier     |
//! |-----------|---------------------|-------------------------|------|-----|-------|----------|
//! | `ANTHONY` | Anthony Swiss-Jones | anthony.swiss@test.com  | 3    | 1   | 2     | amazing  |
//! | `ROSETTA` | Rosetta Brandon     | rbrandon@test.com       | 6    | 4   | -     | ultimate |
//! | `NEVES`   | Neves Firmino       | neves.firmino@test.com  | 8    | 5   | 1     | ultimate |

use super::badge::BadgeColour::{Blue, Green, Red};
use super::events::UserEvent;

pub const ANTHONY: &str = "0af3a961-5146-46b5-93f8-95c0ab687007";
pub const ROSETTA: &str = "d60f3e10-b707-4c76-b165-da38b95aa4b9";
pub const NEVES: &str = "6c5031e7-ff1c-4986-ac27-05a2737cd2f4";

/// Returns the fixed event sequence in emission order.
pub fn event_sequence() -> Vec<UserEvent> {
    vec![
        UserEvent::account_created(ANTHONY),
        UserEvent::account_created(ROSETTA),
        UserEvent::account_created(NEVES),
        UserEvent::badge_gained(ANTHONY, Blue),
        UserEvent::badge_gained(ANTHONY, Blue),
        UserEvent::badge_gained(ANTHONY, Blue),
        UserEvent::badge_gained(ROSETTA, Blue),
        UserEvent::account_updated(ROSETTA, Some("Rosetta Brandon"), Some("rbrandon@test.com")),
        UserEvent::badge_gained(ROSETTA, Blue),
        UserEvent::badge_gained(ROSETTA, Red),
        UserEvent::badge_gained(ANTHONY, Blue),
        UserEvent::account_updated(ANTHONY, Some("Anthony Swiss"), Some("anthony.swiss@test.com")),
        UserEvent::badge_gained(ANTHONY, Green),
        UserEvent::badge_lost(ANTHONY, Blue),
        UserEvent::badge_gained(ROSETTA, Blue),
        UserEvent::badge_gained(ROSETTA, Blue),
        UserEvent::badge_gained(ANTHONY, Red),
        UserEvent::badge_gained(ANTHONY, Green),
        UserEvent::badge_gained(ROSETTA, Blue),
        UserEvent::badge_gained(ROSETTA, Blue),
        UserEvent::badge_gained(ROSETTA, Red),
        UserEvent::badge_gained(ROSETTA, Red),
        UserEvent::badge_lost(ROSETTA, Red),
        UserEvent::badge_gained(ROSETTA, Red),
        UserEvent::badge_gained(ROSETTA, Red),
        UserEvent::badge_gained(NEVES, Blue),
        UserEvent::badge_gained(NEVES, Blue),
        UserEvent::badge_gained(NEVES, Blue),
        UserEvent::badge_gained(NEVES, Blue),
        UserEvent::badge_gained(NEVES, Blue),
        UserEvent::badge_gained(NEVES, Blue),
        UserEvent::account_updated(NEVES, Some("Neves Firmino"), Some("neves88@test.com")),
        UserEvent::badge_gained(NEVES, Blue),
        UserEvent::badge_gained(NEVES, Blue),
        UserEvent::account_updated(NEVES, None, Some("neves.firmino@test.com")),
        UserEvent::badge_gained(NEVES, Red),
        UserEvent::badge_gained(NEVES, Red),
        UserEvent::badge_gained(NEVES, Red),
        UserEvent::badge_gained(NEVES, Red),
        UserEvent::badge_gained(NEVES, Red),
        UserEvent::badge_gained(NEVES, Green),
        UserEvent::account_updated(ANTHONY, Some("Anthony Swiss-Jones"), None),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_shape() {
        let events = event_sequence();
        assert_eq!(events.len(), 42);
        assert_eq!(events[0], UserEvent::account_created(ANTHONY));
        assert_eq!(
            events.last(),
            Some(&UserEvent::account_updated(ANTHONY, Some("Anthony Swiss-Jones"), None))
        );
    }

    #[test]
    fn test_sequence_only_mentions_known_users() {
        for event in event_sequence() {
            let id = event.user_id().map(|id| id.as_str());
            assert!(matches!(id, Some(ANTHONY | ROSETTA | NEVES)), "{event:?}");
        }
    }
}
