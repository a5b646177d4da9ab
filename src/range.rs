//! # BoundedRange — validated integer intervals
//!
//! Every sieve and prime-array query is guarded by an inclusive interval
//! `[min,max]` with `min <= max` enforced at construction. The checks run
//! before any expensive sieving or multiplication starts, so a bad request
//! fails in constant time with a typed error instead of deep inside a
//! recursion.

use crate::{Error, Result};
use std::fmt;

/// An immutable inclusive interval `[min,max]` of unsigned integers.
///
/// Compared and hashed by value; constructing one with `min > max` is
/// rejected with [`Error::InvalidRange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundedRange {
    min: u64,
    max: u64,
}

impl BoundedRange {
    /// Build the interval `[min,max]`, failing if the bounds are out of order.
    pub fn new(min: u64, max: u64) -> Result<Self> {
        if min > max {
            return Err(Error::InvalidRange { min, max });
        }
        Ok(BoundedRange { min, max })
    }

    /// Lower bound (inclusive).
    #[inline]
    pub fn min(&self) -> u64 {
        self.min
    }

    /// Upper bound (inclusive).
    #[inline]
    pub fn max(&self) -> u64 {
        self.max
    }

    /// Number of integers in the interval, `max - min + 1`.
    #[inline]
    pub fn size(&self) -> u64 {
        self.max - self.min + 1
    }

    /// Inclusive membership test.
    #[inline]
    pub fn contains(&self, value: u64) -> bool {
        self.min <= value && value <= self.max
    }

    /// True if `other` lies entirely within this interval.
    #[inline]
    pub fn contains_range(&self, other: &BoundedRange) -> bool {
        self.min <= other.min && other.max <= self.max
    }

    /// Membership test that raises [`Error::OutOfRange`] on failure.
    pub fn contains_or_fail(&self, value: u64) -> Result<()> {
        if self.contains(value) {
            Ok(())
        } else {
            Err(Error::OutOfRange {
                min: self.min,
                max: self.max,
                what: value.to_string(),
            })
        }
    }

    /// Subrange test that raises [`Error::OutOfRange`] on failure.
    pub fn contains_range_or_fail(&self, other: &BoundedRange) -> Result<()> {
        if self.contains_range(other) {
            Ok(())
        } else {
            Err(Error::OutOfRange {
                min: self.min,
                max: self.max,
                what: other.to_string(),
            })
        }
    }
}

impl fmt::Display for BoundedRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.min, self.max)
    }
}
