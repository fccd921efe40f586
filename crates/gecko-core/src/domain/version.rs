//! Two-part driver and OS versions.
//!
//! NVIDIA publishes driver versions as `major.minor` (e.g. `591.44`) and the
//! OS catalog keys Windows releases the same way (e.g. `10.0`). Ordering is
//! tuple order on `(major, minor)`, which `derive(Ord)` gives us for free
//! because of field declaration order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced while parsing a [`Version`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VersionError {
    /// The string did not consist of exactly two dot-separated integers.
    #[error("Malformed version '{value}': {reason}")]
    Malformed {
        /// The input that failed to parse.
        value: String,
        /// What was wrong with it.
        reason: String,
    },
}

impl VersionError {
    fn malformed(value: &str, reason: impl Into<String>) -> Self {
        Self::Malformed {
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// A `major.minor` version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Version {
    /// The major component.
    pub major: u32,
    /// The minor component.
    pub minor: u32,
}

impl Version {
    /// Create a version from its components.
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// Parse a `major.minor` string.
    ///
    /// Exactly two non-negative integer components are required; `"1"`,
    /// `"1.2.3"`, and `"a.b"` are all rejected.
    pub fn parse(value: &str) -> Result<Self, VersionError> {
        let parts: Vec<&str> = value.trim().split('.').collect();
        let [major, minor] = parts.as_slice() else {
            return Err(VersionError::malformed(
                value,
                format!("expected 2 components, got {}", parts.len()),
            ));
        };

        let component = |part: &str| {
            part.parse::<u32>()
                .map_err(|e| VersionError::malformed(value, format!("'{part}': {e}")))
        };

        Ok(Self::new(component(major)?, component(minor)?))
    }

    /// Whether `self` is strictly newer than `other`.
    ///
    /// Equal versions are not an update.
    pub fn is_newer_than(&self, other: &Self) -> bool {
        self > other
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cmp::Ordering;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    #[test]
    fn parse_then_display_round_trips() {
        for input in ["0.0", "1.5", "10.0", "591.44", "4294967295.1"] {
            assert_eq!(v(input).to_string(), input);
        }
    }

    #[test]
    fn rejects_wrong_component_counts() {
        for input in ["1", "1.2.3", "", "1.", ".1"] {
            assert!(Version::parse(input).is_err(), "{input} should be rejected");
        }
    }

    #[test]
    fn rejects_non_numeric_components() {
        let err = Version::parse("a.b").unwrap_err();
        assert!(matches!(err, VersionError::Malformed { ref value, .. } if value == "a.b"));
        assert!(Version::parse("1.-2").is_err());
        assert!(Version::parse("1.2b").is_err());
    }

    #[test]
    fn compares_by_major_then_minor() {
        assert_eq!(v("1.5").cmp(&v("1.6")), Ordering::Less);
        assert_eq!(v("2.0").cmp(&v("1.99")), Ordering::Greater);
        assert_eq!(v("1.1").cmp(&v("1.1")), Ordering::Equal);
    }

    #[test]
    fn minor_compares_numerically_not_lexically() {
        // "44" vs "5" would sort the other way as strings
        assert!(v("591.44") > v("591.5"));
    }

    #[test]
    fn newer_requires_strictly_greater() {
        assert!(v("592.0").is_newer_than(&v("591.44")));
        assert!(!v("591.44").is_newer_than(&v("591.44")));
        assert!(!v("591.44").is_newer_than(&v("592.0")));
    }

    #[test]
    fn from_str_matches_parse() {
        let parsed: Version = "10.0".parse().unwrap();
        assert_eq!(parsed, Version::new(10, 0));
    }
}
