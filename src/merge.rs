//! Merge policies for folding repeated observations of one field
//!
//! Two rules cover every numeric field of a summary:
//! - `agree`: the value is a constant of the test configuration and every
//!   run must report the same one (run count, data size, memory stats)
//! - `min_positive`: the value is a noisy measurement and the smallest
//!   positive reading wins (timings, working set)

use std::fmt::Display;

/// A numeric value that can be folded across runs
pub trait Measure: Copy + PartialEq + PartialOrd + Display {
    /// Zero counts as "never observed" for agreement checks
    fn is_zero(&self) -> bool;

    fn is_positive(&self) -> bool;
}

impl Measure for u64 {
    fn is_zero(&self) -> bool {
        *self == 0
    }

    fn is_positive(&self) -> bool {
        *self > 0
    }
}

impl Measure for i64 {
    fn is_zero(&self) -> bool {
        *self == 0
    }

    fn is_positive(&self) -> bool {
        *self > 0
    }
}

impl Measure for f64 {
    fn is_zero(&self) -> bool {
        *self == 0.0
    }

    fn is_positive(&self) -> bool {
        *self > 0.0
    }
}

/// Two observations of a run constant that differ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Disagreement {
    pub old: String,
    pub new: String,
}

/// Agreement merge: adopt `new` unless a non-zero `old` differs from it
pub fn agree<T: Measure>(old: Option<T>, new: T) -> Result<Option<T>, Disagreement> {
    match old {
        Some(old) if !old.is_zero() && old != new => Err(Disagreement {
            old: old.to_string(),
            new: new.to_string(),
        }),
        _ => Ok(Some(new)),
    }
}

/// Min-positive merge: keep the smallest positive reading seen so far
///
/// Zero and negative readings are sentinels and never replace a stored value.
pub fn min_positive<T: Measure>(old: Option<T>, new: T) -> Option<T> {
    if !new.is_positive() {
        return old;
    }
    match old {
        Some(old) if old <= new => Some(old),
        _ => Some(new),
    }
}
