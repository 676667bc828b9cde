//! Fixed-point proportion types
//!
//! Every trait, skill and visibility magnitude in a generated agent is an
//! integer on a 0..=1000 scale. Floating point only appears inside formulas;
//! values are rounded and clamped before they are stored.
//!
//! # Example
//!
//! ```
//! use agent_model::{Band5, Fixed01k};
//!
//! let v = Fixed01k::clamped(1234.6);
//! assert_eq!(v.get(), 1000);
//! assert!(Fixed01k::new(350) < 400);
//! assert_eq!(Fixed01k::new(650).band5(), Band5::High);
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A proportion stored as an integer in `[0, 1000]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fixed01k(i32);

impl Fixed01k {
    pub const MIN: i32 = 0;
    pub const MAX: i32 = 1000;

    /// Neutral value used when a lookup misses.
    pub const NEUTRAL: Fixed01k = Fixed01k(500);

    /// Creates a value, clamping into range.
    pub fn new(value: i32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    /// Rounds a formula result and clamps it into range.
    pub fn clamped(value: f64) -> Self {
        // NaN casts to 0
        Self(value.round().clamp(Self::MIN as f64, Self::MAX as f64) as i32)
    }

    pub fn get(self) -> i32 {
        self.0
    }

    /// The value as a unit fraction in `[0.0, 1.0]`.
    pub fn unit(self) -> f64 {
        f64::from(self.0) / 1000.0
    }

    /// The value as `f64` on the 0..=1000 scale.
    pub fn as_f64(self) -> f64 {
        f64::from(self.0)
    }

    /// Returns `1000 - self`.
    pub fn inverted(self) -> Self {
        Self(Self::MAX - self.0)
    }

    /// Adds a signed delta and clamps.
    pub fn offset(self, delta: i32) -> Self {
        Self::new(self.0.saturating_add(delta))
    }

    /// Lowers the value to `limit` if it is above it.
    pub fn capped_at(self, limit: i32) -> Self {
        Self::new(self.0.min(limit))
    }

    /// Raises the value to `limit` if it is below it.
    pub fn floored_at(self, limit: i32) -> Self {
        Self::new(self.0.max(limit))
    }

    pub fn band5(self) -> Band5 {
        Band5::from(self)
    }
}

impl Default for Fixed01k {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

impl PartialEq<i32> for Fixed01k {
    fn eq(&self, other: &i32) -> bool {
        self.0 == *other
    }
}

impl PartialOrd<i32> for Fixed01k {
    fn partial_cmp(&self, other: &i32) -> Option<Ordering> {
        self.0.partial_cmp(other)
    }
}

impl From<Fixed01k> for i32 {
    fn from(value: Fixed01k) -> Self {
        value.0
    }
}

impl fmt::Display for Fixed01k {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A signed proportion stored as an integer in `[-1000, 1000]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignedFixed01k(i32);

impl SignedFixed01k {
    pub const MIN: i32 = -1000;
    pub const MAX: i32 = 1000;

    pub fn new(value: i32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

/// Coarse five-step banding of a [`Fixed01k`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Band5 {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl From<Fixed01k> for Band5 {
    fn from(value: Fixed01k) -> Self {
        match value.get() {
            v if v < 200 => Band5::VeryLow,
            v if v < 400 => Band5::Low,
            v if v < 600 => Band5::Medium,
            v if v < 800 => Band5::High,
            _ => Band5::VeryHigh,
        }
    }
}

impl fmt::Display for Band5 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Band5::VeryLow => write!(f, "very_low"),
            Band5::Low => write!(f, "low"),
            Band5::Medium => write!(f, "medium"),
            Band5::High => write!(f, "high"),
            Band5::VeryHigh => write!(f, "very_high"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamped_rounds_and_bounds() {
        assert_eq!(Fixed01k::clamped(499.5).get(), 500);
        assert_eq!(Fixed01k::clamped(-12.0).get(), 0);
        assert_eq!(Fixed01k::clamped(1000.4).get(), 1000);
        assert_eq!(Fixed01k::clamped(f64::NAN).get(), 0);
    }

    #[test]
    fn test_cap_and_floor() {
        let v = Fixed01k::new(720);
        assert_eq!(v.capped_at(600).get(), 600);
        assert_eq!(v.capped_at(800).get(), 720);
        assert_eq!(v.floored_at(750).get(), 750);
        assert_eq!(v.offset(500).get(), 1000);
        assert_eq!(v.inverted().get(), 280);
    }

    #[test]
    fn test_default_is_neutral() {
        assert_eq!(Fixed01k::default(), Fixed01k::NEUTRAL);
        assert_eq!(Fixed01k::default().get(), 500);
    }

    #[test]
    fn test_compare_with_int() {
        let v = Fixed01k::new(701);
        assert!(v > 700);
        assert!(v <= 701);
        assert_eq!(v, 701);
    }

    #[test]
    fn test_band5_thresholds() {
        assert_eq!(Fixed01k::new(199).band5(), Band5::VeryLow);
        assert_eq!(Fixed01k::new(200).band5(), Band5::Low);
        assert_eq!(Fixed01k::new(599).band5(), Band5::Medium);
        assert_eq!(Fixed01k::new(600).band5(), Band5::High);
        assert_eq!(Fixed01k::new(800).band5(), Band5::VeryHigh);
    }

    #[test]
    fn test_serializes_as_plain_integer() {
        let json = serde_json::to_string(&Fixed01k::new(42)).unwrap();
        assert_eq!(json, "42");
        let signed = serde_json::to_string(&SignedFixed01k::new(-1500)).unwrap();
        assert_eq!(signed, "-1000");
        assert_eq!(serde_json::to_string(&Band5::VeryHigh).unwrap(), "\"very_high\"");
    }
}
