//! Local, pre-network validation of user input.
//!
//! Two contracts coexist for `top_n`:
//!
//! - Values typed into a numeric control are *clamped* into `[1, 20]`
//!   ([`TopN::clamped`], [`TopN::from_control`]).
//! - Values passed programmatically are *rejected* when out of range
//!   ([`TopN::new`]).

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Smallest result count the API accepts.
pub const TOP_N_MIN: u8 = 1;
/// Largest result count the API accepts.
pub const TOP_N_MAX: u8 = 20;
/// Result count a fresh form starts with.
pub const TOP_N_DEFAULT: u8 = 5;

/// Input rejected before any network call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("empty requirement")]
    EmptyRequirement,

    #[error("invalid file type")]
    InvalidFileType { media_type: String },

    #[error("no file selected")]
    NoFileSelected,

    #[error("top_n out of range")]
    TopNOutOfRange(i64),
}

/// A requirement with surrounding whitespace removed. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RequirementText(String);

impl RequirementText {
    /// Trim `raw` and reject it if nothing is left.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyRequirement);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequirementText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Requested maximum number of search/analysis results, always in `[1, 20]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct TopN(u8);

impl TopN {
    /// Strict constructor for explicit values: out of range is an error.
    pub fn new(n: i64) -> Result<Self, ValidationError> {
        if (TOP_N_MIN as i64..=TOP_N_MAX as i64).contains(&n) {
            Ok(Self(n as u8))
        } else {
            Err(ValidationError::TopNOutOfRange(n))
        }
    }

    /// Lenient constructor for numeric controls: out of range is clamped.
    pub fn clamped(n: i64) -> Self {
        Self(n.clamp(TOP_N_MIN as i64, TOP_N_MAX as i64) as u8)
    }

    /// Parse the raw text of a numeric control.
    ///
    /// Returns `None` when the text holds no integer, in which case the
    /// control keeps its previous value. Integers too large for `i64` still
    /// clamp to the matching bound.
    pub fn from_control(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        match raw.parse::<i64>() {
            Ok(n) => Some(Self::clamped(n)),
            Err(_) => {
                let (negative, digits) = match raw.strip_prefix('-') {
                    Some(rest) => (true, rest),
                    None => (false, raw.strip_prefix('+').unwrap_or(raw)),
                };
                if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                Some(if negative { Self(TOP_N_MIN) } else { Self(TOP_N_MAX) })
            }
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for TopN {
    fn default() -> Self {
        Self(TOP_N_DEFAULT)
    }
}

impl TryFrom<i64> for TopN {
    type Error = ValidationError;

    fn try_from(n: i64) -> Result<Self, Self::Error> {
        Self::new(n)
    }
}

impl From<TopN> for u8 {
    fn from(n: TopN) -> Self {
        n.0
    }
}

impl fmt::Display for TopN {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requirement_is_trimmed() {
        let text = RequirementText::parse("  The system shall log in users \n").unwrap();
        assert_eq!(text.as_str(), "The system shall log in users");
    }

    #[test]
    fn blank_requirements_rejected() {
        for raw in ["", " ", "\t\n", "   \r\n  "] {
            assert_eq!(
                RequirementText::parse(raw),
                Err(ValidationError::EmptyRequirement),
                "{raw:?}"
            );
        }
    }

    #[test]
    fn top_n_accepts_inclusive_bounds() {
        for n in 1..=20 {
            assert_eq!(TopN::new(n).unwrap().get() as i64, n);
        }
    }

    #[test]
    fn top_n_rejects_explicit_out_of_range() {
        for n in [i64::MIN, -1, 0, 21, 100, i64::MAX] {
            assert_eq!(TopN::new(n), Err(ValidationError::TopNOutOfRange(n)));
        }
    }

    // Same inputs as above, different contract: a numeric control clamps.
    #[test]
    fn top_n_control_clamps_instead_of_rejecting() {
        assert_eq!(TopN::clamped(0).get(), 1);
        assert_eq!(TopN::clamped(-7).get(), 1);
        assert_eq!(TopN::clamped(21).get(), 20);
        assert_eq!(TopN::clamped(i64::MAX).get(), 20);
        assert_eq!(TopN::clamped(7).get(), 7);
    }

    #[test]
    fn top_n_control_parses_text() {
        assert_eq!(TopN::from_control("12"), Some(TopN::clamped(12)));
        assert_eq!(TopN::from_control(" 0 "), Some(TopN::clamped(1)));
        assert_eq!(TopN::from_control("50"), Some(TopN::clamped(20)));
        assert_eq!(
            TopN::from_control("99999999999999999999999"),
            Some(TopN::clamped(20))
        );
        assert_eq!(
            TopN::from_control("-99999999999999999999999"),
            Some(TopN::clamped(1))
        );
        assert_eq!(TopN::from_control(""), None);
        assert_eq!(TopN::from_control("five"), None);
        assert_eq!(TopN::from_control("-"), None);
    }

    #[test]
    fn top_n_default_is_five() {
        assert_eq!(TopN::default().get(), 5);
    }

    #[test]
    fn top_n_serializes_as_integer() {
        let json = serde_json::to_string(&TopN::clamped(8)).unwrap();
        assert_eq!(json, "8");
        let err = serde_json::from_str::<TopN>("42");
        assert!(err.is_err());
    }

    #[test]
    fn validation_messages() {
        assert_eq!(ValidationError::EmptyRequirement.to_string(), "empty requirement");
        assert_eq!(
            ValidationError::InvalidFileType {
                media_type: "image/png".into()
            }
            .to_string(),
            "invalid file type"
        );
        assert_eq!(
            ValidationError::TopNOutOfRange(0).to_string(),
            "top_n out of range"
        );
    }
}
