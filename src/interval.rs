// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Ordered intervals with open, closed and infinite bounds.
//!
//! This module provides:
//! - [`Interval<T>`]: an immutable interval over any [`Element`]
//! - membership, overlap and intersection for every element type
//! - counting, indexing and lazy enumeration when `T: Discrete`
//! - shift/scale arithmetic and lexicographic comparison

use crate::bound::Bound;
use crate::element::{Discrete, Element, Scalar, ScalarOrd};
use crate::error::{IntervalError, IntervalResult};
use crate::sequence::{Reversed, Sequence};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Range, RangeFrom, RangeFull, RangeInclusive, RangeTo, RangeToInclusive, Sub};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An interval between two bounds, each of which may be excluded.
///
/// If `start > end` the interval is empty whatever its exclusion flags.
/// Infinite bounds are always satisfied; their exclusion flag is kept for
/// rendering only.
///
/// # Examples
///
/// ```
/// use tempora::Interval;
///
/// let closed = Interval::new(1, 5);
/// assert!(closed.contains(&5));
/// assert_eq!(closed.element_count(), Ok(5));
///
/// let open = closed.excluding_start().excluding_end();
/// assert!(!open.contains(&1));
/// assert_eq!(open.element_count(), Ok(3));
/// assert_eq!(open.to_string(), "1^..^5");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Interval<T> {
    start: Bound<T>,
    end: Bound<T>,
    excludes_start: bool,
    excludes_end: bool,
}

/// `lo` lies at or before `hi`, strictly when either side is excluded.
fn lower_reaches_upper<T: PartialOrd>(
    lo: &Bound<T>,
    lo_excluded: bool,
    hi: &Bound<T>,
    hi_excluded: bool,
) -> bool {
    match (lo, hi) {
        (Bound::NegInfinite, _) | (_, Bound::PosInfinite) => true,
        (Bound::PosInfinite, _) | (_, Bound::NegInfinite) => false,
        (Bound::Finite(a), Bound::Finite(b)) => {
            if lo_excluded || hi_excluded {
                a < b
            } else {
                a <= b
            }
        }
    }
}

impl<T> Interval<T> {
    /// Closed interval `[start, end]`.
    pub fn new(start: T, end: T) -> Self {
        Self::from_bounds(Bound::Finite(start), Bound::Finite(end), false, false)
    }

    /// Interval from explicit bounds and exclusion flags.
    pub const fn from_bounds(
        start: Bound<T>,
        end: Bound<T>,
        excludes_start: bool,
        excludes_end: bool,
    ) -> Self {
        Self {
            start,
            end,
            excludes_start,
            excludes_end,
        }
    }

    /// `[start, Inf)`.
    pub fn at_least(start: T) -> Self {
        Self::from_bounds(Bound::Finite(start), Bound::PosInfinite, false, false)
    }

    /// `(-Inf, end]`.
    pub fn at_most(end: T) -> Self {
        Self::from_bounds(Bound::NegInfinite, Bound::Finite(end), false, false)
    }

    /// `(-Inf, Inf)`.
    pub const fn unbounded() -> Self {
        Self::from_bounds(Bound::NegInfinite, Bound::PosInfinite, false, false)
    }

    /// Same interval with the start excluded.
    pub fn excluding_start(self) -> Self {
        Self {
            excludes_start: true,
            ..self
        }
    }

    /// Same interval with the end excluded.
    pub fn excluding_end(self) -> Self {
        Self {
            excludes_end: true,
            ..self
        }
    }

    #[inline]
    pub fn bounds(&self) -> (&Bound<T>, &Bound<T>) {
        (&self.start, &self.end)
    }

    #[inline]
    pub fn min(&self) -> &Bound<T> {
        &self.start
    }

    #[inline]
    pub fn max(&self) -> &Bound<T> {
        &self.end
    }

    #[inline]
    pub fn excludes_min(&self) -> bool {
        self.excludes_start
    }

    #[inline]
    pub fn excludes_max(&self) -> bool {
        self.excludes_end
    }

    /// Whether either bound is infinite.
    #[inline]
    pub fn is_infinite(&self) -> bool {
        self.start.is_infinite() || self.end.is_infinite()
    }

    /// Apply `f` to both finite bounds, keeping flags.
    pub fn map<U, F: FnMut(T) -> U>(self, mut f: F) -> Interval<U> {
        Interval {
            start: self.start.map(&mut f),
            end: self.end.map(&mut f),
            excludes_start: self.excludes_start,
            excludes_end: self.excludes_end,
        }
    }
}

impl<T: Element> Interval<T> {
    /// Whether the element type supports counting and enumeration.
    #[inline]
    pub const fn is_discrete(&self) -> bool {
        T::DISCRETE
    }

    /// Whether no value of `T` can satisfy both bounds.
    ///
    /// This looks at the bounds alone: `1^..^2` over integers is not empty
    /// here even though it holds no integer (its
    /// [`element_count`](Interval::element_count) is 0).
    pub fn is_empty(&self) -> bool {
        !lower_reaches_upper(&self.start, self.excludes_start, &self.end, self.excludes_end)
    }

    /// Whether `point` satisfies the start bound.
    fn admits_start(&self, point: &T) -> bool {
        match &self.start {
            Bound::NegInfinite => true,
            Bound::PosInfinite => false,
            Bound::Finite(start) if self.excludes_start => start < point,
            Bound::Finite(start) => start <= point,
        }
    }

    /// Whether `point` satisfies the end bound.
    pub(crate) fn admits_end(&self, point: &T) -> bool {
        match &self.end {
            Bound::PosInfinite => true,
            Bound::NegInfinite => false,
            Bound::Finite(end) if self.excludes_end => point < end,
            Bound::Finite(end) => point <= end,
        }
    }

    /// Membership test.
    pub fn contains(&self, point: &T) -> bool {
        self.admits_start(point) && self.admits_end(point)
    }

    /// Whether the two intervals share at least one point.
    ///
    /// Works on the bounds alone; empty intervals overlap nothing.
    pub fn overlaps(&self, other: &Self) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && lower_reaches_upper(&self.start, self.excludes_start, &other.end, other.excludes_end)
            && lower_reaches_upper(&other.start, other.excludes_start, &self.end, self.excludes_end)
    }

    /// The overlapping sub-interval, or `None` if the two do not overlap.
    ///
    /// On equal bounds the excluded side wins.
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        if !self.overlaps(other) {
            return None;
        }
        let (start, excludes_start) = match self.start.partial_cmp(&other.start)? {
            Ordering::Greater => (self.start.clone(), self.excludes_start),
            Ordering::Less => (other.start.clone(), other.excludes_start),
            Ordering::Equal => (
                self.start.clone(),
                self.excludes_start || other.excludes_start,
            ),
        };
        let (end, excludes_end) = match self.end.partial_cmp(&other.end)? {
            Ordering::Less => (self.end.clone(), self.excludes_end),
            Ordering::Greater => (other.end.clone(), other.excludes_end),
            Ordering::Equal => (self.end.clone(), self.excludes_end || other.excludes_end),
        };
        Some(Self::from_bounds(start, end, excludes_start, excludes_end))
    }

    /// Three-way comparison of `(start, end)` against another interval.
    pub fn cmp_interval(&self, other: &Self) -> Option<Ordering> {
        self.cmp_bounds(&other.start, &other.end)
    }

    /// Compare against a bare value, taken as `[value, value]`.
    pub fn cmp_scalar(&self, value: &T) -> Option<Ordering> {
        let bound = Bound::Finite(value.clone());
        self.cmp_bounds(&bound, &bound)
    }

    /// Compare against a pair, taken as `[pair.0, pair.1]`.
    pub fn cmp_pair(&self, pair: &(T, T)) -> Option<Ordering> {
        self.cmp_bounds(&Bound::Finite(pair.0.clone()), &Bound::Finite(pair.1.clone()))
    }

    fn cmp_bounds(&self, start: &Bound<T>, end: &Bound<T>) -> Option<Ordering> {
        match self.start.partial_cmp(start)? {
            Ordering::Equal => self.end.partial_cmp(end),
            ord => Some(ord),
        }
    }
}

impl<T: ScalarOrd> Interval<T> {
    /// Membership of a scalar of a different kind.
    ///
    /// Each finite bound is asked how it orders against `scalar`; an
    /// unordered answer (NaN) means the scalar is outside.
    ///
    /// ```
    /// use tempora::{Interval, Scalar};
    ///
    /// let range = Interval::new(1, 5);
    /// assert_eq!(range.contains_scalar(&Scalar::from(2.5)), Ok(true));
    /// assert!(range.contains_scalar(&Scalar::from("three")).is_err());
    /// ```
    pub fn contains_scalar(&self, scalar: &Scalar) -> IntervalResult<bool> {
        let after_start = match &self.start {
            Bound::NegInfinite => true,
            Bound::PosInfinite => false,
            Bound::Finite(start) => match start.cmp_scalar(scalar)? {
                Some(Ordering::Less) => true,
                Some(Ordering::Equal) => !self.excludes_start,
                Some(Ordering::Greater) | None => false,
            },
        };
        if !after_start {
            return Ok(false);
        }
        Ok(match &self.end {
            Bound::PosInfinite => true,
            Bound::NegInfinite => false,
            Bound::Finite(end) => match end.cmp_scalar(scalar)? {
                Some(Ordering::Greater) => true,
                Some(Ordering::Equal) => !self.excludes_end,
                Some(Ordering::Less) | None => false,
            },
        })
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Discrete operations
// ═══════════════════════════════════════════════════════════════════════════

impl<T: Discrete> Interval<T> {
    /// First element admitted by the start bound, ignoring the end bound.
    fn first_candidate(&self, operation: &'static str) -> IntervalResult<Option<T>> {
        match &self.start {
            Bound::Finite(start) => {
                start.check_enumerable()?;
                Ok(if self.excludes_start {
                    start.successor()
                } else {
                    Some(start.clone())
                })
            }
            Bound::PosInfinite => Ok(None),
            Bound::NegInfinite => Err(IntervalError::NotIntegerInterval { operation }),
        }
    }

    /// Last element admitted by a finite end bound.
    fn last_candidate(&self, operation: &'static str) -> IntervalResult<Option<T>> {
        match &self.end {
            Bound::Finite(end) => {
                end.check_enumerable()?;
                Ok(if self.excludes_end {
                    end.predecessor()
                } else {
                    Some(end.clone())
                })
            }
            Bound::NegInfinite => Ok(None),
            Bound::PosInfinite => Err(IntervalError::NotIntegerInterval { operation }),
        }
    }

    /// First and last elements actually included, or `None` when no element
    /// is.
    ///
    /// Fails with [`IntervalError::NotIntegerInterval`] when a bound is
    /// infinite.
    pub fn effective_bounds(&self) -> IntervalResult<Option<(T, T)>> {
        const OPERATION: &str = "resolve effective bounds";
        let first = self.first_candidate(OPERATION)?;
        let last = self.last_candidate(OPERATION)?;
        Ok(match (first, last) {
            (Some(first), Some(last)) if first <= last => Some((first, last)),
            _ => None,
        })
    }

    /// Number of included elements.
    pub fn element_count(&self) -> IntervalResult<u128> {
        let count = match self.effective_bounds()? {
            Some((first, last)) => first.distance(&last) as u128 + 1,
            None => 0,
        };
        Ok(count)
    }

    /// Element at a 0-based position, or `None` past the end.
    ///
    /// Intervals open towards `+Inf` resolve any position by successor
    /// stepping from the effective start.
    pub fn at(&self, position: u64) -> IntervalResult<Option<T>> {
        if let Bound::Finite(end) = &self.end {
            end.check_enumerable()?;
        }
        let Some(first) = self.first_candidate("index")? else {
            return Ok(None);
        };
        Ok(first
            .advance(position)
            .filter(|element| self.admits_end(element)))
    }

    /// Lazy, restartable ascending sequence of the included elements.
    ///
    /// ```
    /// use tempora::Interval;
    ///
    /// let letters = Interval::new('a', 'e').excluding_end().to_sequence().unwrap();
    /// assert_eq!(letters.iter().collect::<String>(), "abcd");
    /// assert_eq!(letters.iter().count(), 4);
    /// ```
    pub fn to_sequence(&self) -> IntervalResult<Sequence<T>> {
        const OPERATION: &str = "enumerate";
        let first = self.first_candidate(OPERATION)?;
        let last = match &self.end {
            Bound::PosInfinite => Bound::PosInfinite,
            _ => match self.last_candidate(OPERATION)? {
                Some(last) => Bound::Finite(last),
                None => Bound::NegInfinite,
            },
        };
        Ok(Sequence::new(first, last))
    }

    /// Lazy descending sequence.
    ///
    /// For an interval open towards `+Inf` every produced item is
    /// [`Bound::PosInfinite`].
    pub fn reverse(&self) -> IntervalResult<Reversed<T>> {
        const OPERATION: &str = "reverse";
        if matches!(self.end, Bound::PosInfinite) {
            if let Bound::Finite(start) = &self.start {
                start.check_enumerable()?;
            }
            return Ok(Reversed::infinite());
        }
        let first = match &self.start {
            Bound::NegInfinite => Bound::NegInfinite,
            _ => match self.first_candidate(OPERATION)? {
                Some(first) => Bound::Finite(first),
                None => Bound::PosInfinite,
            },
        };
        let last = self.last_candidate(OPERATION)?;
        Ok(Reversed::new(last, first))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Arithmetic
// ═══════════════════════════════════════════════════════════════════════════

impl<T, K> Add<K> for Interval<T>
where
    T: Add<K, Output = T>,
    K: Clone,
{
    type Output = Interval<T>;

    fn add(self, rhs: K) -> Self::Output {
        self.map(|value| value + rhs.clone())
    }
}

impl<T, K> Sub<K> for Interval<T>
where
    T: Sub<K, Output = T>,
    K: Clone,
{
    type Output = Interval<T>;

    fn sub(self, rhs: K) -> Self::Output {
        self.map(|value| value - rhs.clone())
    }
}

/// Scaling by a negative factor sends `+Inf` to `-Inf` and back; bounds are
/// not reordered.
fn rescale<T, K: PartialOrd + Default>(interval: Interval<T>, factor: &K) -> Interval<T> {
    if *factor < K::default() {
        Interval {
            start: interval.start.negate_infinity(),
            end: interval.end.negate_infinity(),
            ..interval
        }
    } else {
        interval
    }
}

impl<T, K> Mul<K> for Interval<T>
where
    T: Mul<K, Output = T>,
    K: Clone + PartialOrd + Default,
{
    type Output = Interval<T>;

    fn mul(self, rhs: K) -> Self::Output {
        let scaled = self.map(|value| value * rhs.clone());
        rescale(scaled, &rhs)
    }
}

impl<T, K> Div<K> for Interval<T>
where
    T: Div<K, Output = T>,
    K: Clone + PartialOrd + Default,
{
    type Output = Interval<T>;

    fn div(self, rhs: K) -> Self::Output {
        let scaled = self.map(|value| value / rhs.clone());
        rescale(scaled, &rhs)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Conversions
// ═══════════════════════════════════════════════════════════════════════════

impl<T> From<RangeInclusive<T>> for Interval<T> {
    fn from(range: RangeInclusive<T>) -> Self {
        let (start, end) = range.into_inner();
        Self::new(start, end)
    }
}

impl<T> From<Range<T>> for Interval<T> {
    fn from(range: Range<T>) -> Self {
        Self::new(range.start, range.end).excluding_end()
    }
}

impl<T> From<RangeFrom<T>> for Interval<T> {
    fn from(range: RangeFrom<T>) -> Self {
        Self::at_least(range.start)
    }
}

impl<T> From<RangeTo<T>> for Interval<T> {
    fn from(range: RangeTo<T>) -> Self {
        Self::at_most(range.end).excluding_end()
    }
}

impl<T> From<RangeToInclusive<T>> for Interval<T> {
    fn from(range: RangeToInclusive<T>) -> Self {
        Self::at_most(range.end)
    }
}

impl<T> From<RangeFull> for Interval<T> {
    fn from(_: RangeFull) -> Self {
        Self::unbounded()
    }
}

// Display implementation
impl<T: fmt::Display> fmt::Display for Interval<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let open_start = if self.excludes_start { "^" } else { "" };
        let open_end = if self.excludes_end { "^" } else { "" };
        write!(f, "{}{open_start}..{open_end}{}", self.start, self.end)
    }
}
