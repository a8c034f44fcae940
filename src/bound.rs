// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Interval endpoints that may be infinite.

use std::cmp::Ordering;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One end of an [`Interval`](crate::Interval).
///
/// Ordered `NegInfinite < Finite(_) < PosInfinite`; finite values compare
/// with the element's own ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Bound<T> {
    NegInfinite,
    Finite(T),
    PosInfinite,
}

impl<T> Bound<T> {
    #[inline]
    pub const fn is_infinite(&self) -> bool {
        !matches!(self, Bound::Finite(_))
    }

    /// The finite value, if any.
    #[inline]
    pub const fn finite(&self) -> Option<&T> {
        match self {
            Bound::Finite(value) => Some(value),
            _ => None,
        }
    }

    #[inline]
    pub fn into_finite(self) -> Option<T> {
        match self {
            Bound::Finite(value) => Some(value),
            _ => None,
        }
    }

    #[inline]
    pub fn as_ref(&self) -> Bound<&T> {
        match self {
            Bound::NegInfinite => Bound::NegInfinite,
            Bound::Finite(value) => Bound::Finite(value),
            Bound::PosInfinite => Bound::PosInfinite,
        }
    }

    /// Apply `f` to a finite value; infinities pass through.
    #[inline]
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Bound<U> {
        match self {
            Bound::NegInfinite => Bound::NegInfinite,
            Bound::Finite(value) => Bound::Finite(f(value)),
            Bound::PosInfinite => Bound::PosInfinite,
        }
    }

    /// Swap the sign of an infinite bound.
    #[inline]
    pub fn negate_infinity(self) -> Self {
        match self {
            Bound::NegInfinite => Bound::PosInfinite,
            Bound::PosInfinite => Bound::NegInfinite,
            finite => finite,
        }
    }

    const fn rank(&self) -> u8 {
        match self {
            Bound::NegInfinite => 0,
            Bound::Finite(_) => 1,
            Bound::PosInfinite => 2,
        }
    }
}

impl<T> From<T> for Bound<T> {
    #[inline]
    fn from(value: T) -> Self {
        Bound::Finite(value)
    }
}

impl<T: PartialOrd> PartialOrd for Bound<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Bound::Finite(a), Bound::Finite(b)) => a.partial_cmp(b),
            _ => Some(self.rank().cmp(&other.rank())),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Bound<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::NegInfinite => f.write_str("-Inf"),
            Bound::Finite(value) => fmt::Display::fmt(value, f),
            Bound::PosInfinite => f.write_str("Inf"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infinities_order_around_finite_values() {
        assert!(Bound::NegInfinite < Bound::Finite(i64::MIN));
        assert!(Bound::Finite(i64::MAX) < Bound::PosInfinite);
        assert!(Bound::<i64>::NegInfinite < Bound::PosInfinite);
        assert_eq!(
            Bound::<i64>::PosInfinite.partial_cmp(&Bound::PosInfinite),
            Some(Ordering::Equal)
        );
        assert!(Bound::Finite(1) < Bound::Finite(2));
    }

    #[test]
    fn map_and_negate() {
        assert_eq!(Bound::Finite(2).map(|v| v * 3), Bound::Finite(6));
        assert_eq!(Bound::<i32>::PosInfinite.map(|v| v * 3), Bound::PosInfinite);
        assert_eq!(Bound::<i32>::PosInfinite.negate_infinity(), Bound::NegInfinite);
        assert_eq!(Bound::Finite(4).negate_infinity(), Bound::Finite(4));
    }

    #[test]
    fn display() {
        assert_eq!(Bound::Finite(3).to_string(), "3");
        assert_eq!(Bound::<i32>::PosInfinite.to_string(), "Inf");
        assert_eq!(Bound::<i32>::NegInfinite.to_string(), "-Inf");
    }
}
