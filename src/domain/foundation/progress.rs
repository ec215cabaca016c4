//! Progress value object (fraction between 0 and 1).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Progress through an assistance process, as a fraction in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Progress(f64);

impl Progress {
    /// Nothing done yet.
    pub const ZERO: Self = Self(0.0);

    /// Process finished.
    pub const COMPLETE: Self = Self(1.0);

    /// Creates a Progress, clamping to the valid range.
    ///
    /// Non-finite values are treated as zero.
    pub fn new(value: f64) -> Self {
        if value.is_finite() {
            Self(value.clamp(0.0, 1.0))
        } else {
            Self::ZERO
        }
    }

    /// Creates a Progress, returning error if out of range.
    pub fn try_new(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(ValidationError::out_of_range("progress", 0.0, 1.0, value));
        }
        Ok(Self(value))
    }

    /// Returns the fraction.
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0}%", self.0 * 100.0)
    }
}
