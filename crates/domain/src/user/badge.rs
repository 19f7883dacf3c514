//! Badge colours and the derived badge tier.

use serde::{Deserialize, Serialize};

use super::record::BadgeCount;

/// The colour of a badge a user can gain or lose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeColour {
    Blue,
    Red,
    Green,
}

impl BadgeColour {
    /// All known colours.
    pub const ALL: [BadgeColour; 3] = [BadgeColour::Blue, BadgeColour::Red, BadgeColour::Green];

    /// Returns the colour name as used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            BadgeColour::Blue => "blue",
            BadgeColour::Red => "red",
            BadgeColour::Green => "green",
        }
    }
}

impl std::fmt::Display for BadgeColour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A user's badge tier, derived from their badge counts.
///
/// Tiers are checked from the highest down and the first match wins:
///
/// | tier       | requirement                          |
/// |------------|--------------------------------------|
/// | `champion` | blue >= 10, red >= 5, green >= 1     |
/// | `ultimate` | blue >= 6, red >= 3                  |
/// | `amazing`  | blue >= 3                            |
/// | `great`    | anything else                        |
///
/// The tier is never stored; it is recomputed from the counts on every read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeStatus {
    Great,
    Amazing,
    Ultimate,
    Champion,
}

impl BadgeStatus {
    /// Classifies a set of badge counts. Absent colours count as zero and
    /// negative counts are compared as-is.
    pub fn from_counts(counts: &BadgeCount) -> Self {
        let blue = counts.get(BadgeColour::Blue);
        let red = counts.get(BadgeColour::Red);
        let green = counts.get(BadgeColour::Green);

        if blue >= 10 && red >= 5 && green >= 1 {
            BadgeStatus::Champion
        } else if blue >= 6 && red >= 3 {
            BadgeStatus::Ultimate
        } else if blue >= 3 {
            BadgeStatus::Amazing
        } else {
            BadgeStatus::Great
        }
    }

    /// Returns the tier name as used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            BadgeStatus::Great => "great",
            BadgeStatus::Amazing => "amazing",
            BadgeStatus::Ultimate => "ultimate",
            BadgeStatus::Champion => "champion",
        }
    }
}

impl std::fmt::Display for BadgeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn counts(blue: i64, red: i64, green: i64) -> BadgeCount {
        BadgeCount::from_iter([
            (BadgeColour::Blue, blue),
            (BadgeColour::Red, red),
            (BadgeColour::Green, green),
        ])
    }

    #[test]
    fn test_champion_boundary() {
        assert_eq!(BadgeStatus::from_counts(&counts(10, 5, 1)), BadgeStatus::Champion);
    }

    #[test]
    fn test_champion_requires_green() {
        assert_eq!(BadgeStatus::from_counts(&counts(10, 5, 0)), BadgeStatus::Ultimate);
    }

    #[test]
    fn test_ultimate_boundary() {
        assert_eq!(BadgeStatus::from_counts(&counts(6, 3, 0)), BadgeStatus::Ultimate);
        assert_eq!(BadgeStatus::from_counts(&counts(6, 2, 0)), BadgeStatus::Amazing);
    }

    #[test]
    fn test_amazing_boundary() {
        assert_eq!(BadgeStatus::from_counts(&counts(3, 0, 0)), BadgeStatus::Amazing);
    }

    #[test]
    fn test_low_blue_dominates_high_others() {
        assert_eq!(BadgeStatus::from_counts(&counts(2, 100, 100)), BadgeStatus::Great);
    }

    #[test]
    fn test_empty_counts_are_great() {
        assert_eq!(BadgeStatus::from_counts(&BadgeCount::new()), BadgeStatus::Great);
    }

    #[test]
    fn test_negative_counts_do_not_clamp() {
        assert_eq!(BadgeStatus::from_counts(&counts(-4, -1, -7)), BadgeStatus::Great);
        assert_eq!(BadgeStatus::from_counts(&counts(3, -10, -10)), BadgeStatus::Amazing);
    }

    #[test]
    fn test_colour_display_matches_wire_name() {
        for colour in BadgeColour::ALL {
            let wire = serde_json::to_value(colour).unwrap();
            assert_eq!(wire, serde_json::Value::String(colour.to_string()));
        }
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&BadgeStatus::Champion).unwrap(),
            "\"champion\""
        );
        assert_eq!(serde_json::to_string(&BadgeColour::Green).unwrap(), "\"green\"");
    }

    proptest! {
        #[test]
        fn classification_is_pure(blue in -20i64..20, red in -20i64..20, green in -20i64..20) {
            let c = counts(blue, red, green);
            let first = BadgeStatus::from_counts(&c);
            for _ in 0..3 {
                prop_assert_eq!(BadgeStatus::from_counts(&c), first);
            }
        }
    }
}
