//! Rating value object
//!
//! Likelihood and impact are both integer ratings on a 1..=5 scale. A
//! `Rating` can only be built through validation, so anything holding one has
//! already passed the range check.

use crate::{RiskError, RiskResult};
use std::fmt;

/// Likelihood or impact rating
///
/// # Invariants
/// - `MIN <= value <= MAX`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rating(u8);

impl Rating {
    /// Lowest rating
    pub const MIN: u8 = 1;
    /// Highest rating
    pub const MAX: u8 = 5;

    /// Create a rating, rejecting anything outside `MIN..=MAX`
    pub fn new(value: i64) -> RiskResult<Self> {
        if value < i64::from(Self::MIN) || value > i64::from(Self::MAX) {
            return Err(RiskError::Validation { value });
        }
        Ok(Self(value as u8))
    }

    /// Get inner value
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Rating> for i32 {
    fn from(rating: Rating) -> Self {
        i32::from(rating.0)
    }
}

impl From<Rating> for i64 {
    fn from(rating: Rating) -> Self {
        i64::from(rating.0)
    }
}

/// Validate a likelihood/impact pair before any domain logic runs.
pub fn validate_ratings(likelihood: i64, impact: i64) -> RiskResult<(Rating, Rating)> {
    Ok((Rating::new(likelihood)?, Rating::new(impact)?))
}
