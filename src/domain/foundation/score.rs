//! Score value object (0-10 scale).
//!
//! Used for preference importance as well as the excitement and anxiety
//! intensities captured in reactions.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// An integer intensity between 0 and 10 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Score(u8);

impl Score {
    /// Lowest value on the scale.
    pub const MIN: Self = Self(0);

    /// Highest value on the scale.
    pub const MAX: Self = Self(10);

    /// Threshold at which a score counts as "high" (importance or intensity).
    pub const HIGH_THRESHOLD: u8 = 7;

    /// Creates a Score, clamping to the valid range.
    pub fn new(value: u8) -> Self {
        Self(value.min(10))
    }

    /// Creates a Score, returning error if out of range.
    pub fn try_new(value: i64) -> Result<Self, ValidationError> {
        if !(0..=10).contains(&value) {
            return Err(ValidationError::out_of_range("score", 0, 10, value));
        }
        Ok(Self(value as u8))
    }

    /// Returns the value as u8.
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Returns the value as f64 for averaging.
    pub fn as_f64(&self) -> f64 {
        f64::from(self.0)
    }

    /// True when the score is at or above [`Score::HIGH_THRESHOLD`].
    pub fn is_high(&self) -> bool {
        self.0 >= Self::HIGH_THRESHOLD
    }

    /// True when the score is 3 or lower.
    pub fn is_low(&self) -> bool {
        self.0 <= 3
    }
}

impl Default for Score {
    fn default() -> Self {
        Self::MIN
    }
}

impl TryFrom<i64> for Score {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<Score> for u8 {
    fn from(score: Score) -> Self {
        score.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/10", self.0)
    }
}
