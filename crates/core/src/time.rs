//! Time codes and intervals for sampled attribute values.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A point at which an attribute can be evaluated.
///
/// `Default` resolves only the authored default value, ignoring time
/// samples. Numeric times resolve with held interpolation: the value at
/// time `t` is the nearest authored sample at or before `t`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TimeCode {
    Default,
    Numeric(f64),
}

impl TimeCode {
    /// The earliest representable numeric time.
    pub const EARLIEST: TimeCode = TimeCode::Numeric(f64::MIN);

    pub fn is_default(&self) -> bool {
        matches!(self, TimeCode::Default)
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            TimeCode::Default => None,
            TimeCode::Numeric(t) => Some(*t),
        }
    }
}

impl Default for TimeCode {
    fn default() -> Self {
        TimeCode::Default
    }
}

impl From<f64> for TimeCode {
    fn from(t: f64) -> Self {
        TimeCode::Numeric(t)
    }
}

/// A possibly open-ended interval on the time axis.
///
/// Note that for held-interpolated values a finite open minimum produces the
/// same result as a closed one: there is no "last value strictly before"
/// distinct from the value at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    min: f64,
    max: f64,
    min_closed: bool,
    max_closed: bool,
}

impl Interval {
    pub fn new(min: f64, max: f64, min_closed: bool, max_closed: bool) -> Self {
        Interval {
            min,
            max,
            min_closed,
            max_closed,
        }
    }

    /// The closed interval `[min, max]`.
    pub fn closed(min: f64, max: f64) -> Self {
        Self::new(min, max, true, true)
    }

    /// The canonical empty interval.
    pub fn empty() -> Self {
        Self::new(f64::INFINITY, f64::NEG_INFINITY, false, false)
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn is_min_closed(&self) -> bool {
        self.min_closed
    }

    pub fn is_max_closed(&self) -> bool {
        self.max_closed
    }

    pub fn is_min_finite(&self) -> bool {
        self.min.is_finite()
    }

    pub fn is_max_finite(&self) -> bool {
        self.max.is_finite()
    }

    pub fn is_empty(&self) -> bool {
        if self.min > self.max {
            return true;
        }
        self.min == self.max && !(self.min_closed && self.max_closed)
    }

    pub fn contains(&self, t: f64) -> bool {
        if self.is_empty() {
            return false;
        }
        let above_min = if self.min_closed {
            t >= self.min
        } else {
            t > self.min
        };
        let below_max = if self.max_closed {
            t <= self.max
        } else {
            t < self.max
        };
        above_min && below_max
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}, {}{}",
            if self.min_closed { '[' } else { '(' },
            self.min,
            self.max,
            if self.max_closed { ']' } else { ')' },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emptiness() {
        assert!(Interval::empty().is_empty());
        assert!(Interval::closed(1.0, 0.0).is_empty());
        assert!(!Interval::closed(0.0, 0.0).is_empty());
        assert!(Interval::new(0.0, 0.0, true, false).is_empty());
        assert!(!Interval::closed(0.0, 100.0).is_empty());
    }

    #[test]
    fn containment_respects_open_ends() {
        let half_open = Interval::new(0.0, 10.0, true, false);
        assert!(half_open.contains(0.0));
        assert!(half_open.contains(9.9));
        assert!(!half_open.contains(10.0));
        assert!(!half_open.contains(-0.1));
        assert!(!Interval::empty().contains(0.0));
    }

    #[test]
    fn time_code_accessors() {
        assert!(TimeCode::Default.is_default());
        assert_eq!(TimeCode::Default.value(), None);
        assert_eq!(TimeCode::from(5.0).value(), Some(5.0));
        assert!(TimeCode::EARLIEST.value().unwrap() < -1.0e300);
    }

    #[test]
    fn display_shows_closedness() {
        assert_eq!(Interval::closed(0.0, 100.0).to_string(), "[0, 100]");
        assert_eq!(Interval::new(0.0, 1.0, false, false).to_string(), "(0, 1)");
    }
}
