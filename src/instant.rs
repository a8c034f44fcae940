// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Absolute, offset-free points in time.
//!
//! [`Instant`] counts SI seconds on the TAI axis, so the difference between
//! two instants includes any leap seconds inserted between them. The origin
//! is 1970-01-01T00:00:00 UTC expressed in TAI, i.e. `Instant::from_posix(0)`
//! reads 10 s.
//!
//! The count is stored as whole seconds plus a fraction in `[0, 1)`. Keeping
//! the fraction apart from the (large) whole part lets civil fractions such as
//! `30.123456` survive a civil → absolute → civil round trip bit for bit.

use crate::element::Element;
use crate::leap::{self, TaiSecond};
use qtty::Seconds;
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A point on the TAI time axis, independent of any UTC offset.
#[derive(Debug, Copy, Clone)]
pub struct Instant {
    whole: i64,
    frac: f64,
}

/// Split a finite second count into `(floor, fraction in [0, 1))`.
#[inline]
pub(crate) fn split_seconds(value: f64) -> (i64, f64) {
    let whole = value.floor();
    let mut frac = value - whole;
    let mut whole = whole as i64;
    if frac >= 1.0 {
        whole += 1;
        frac = 0.0;
    }
    (whole, frac)
}

impl Instant {
    /// Build from whole TAI seconds and a fractional part.
    ///
    /// The fraction is normalised into `[0, 1)`, carrying into `whole`.
    pub fn new(whole: i64, frac: f64) -> Self {
        let (carry, frac) = split_seconds(frac);
        Self {
            whole: whole.saturating_add(carry),
            frac,
        }
    }

    /// Build from a (possibly fractional) TAI second count.
    pub fn from_seconds(seconds: Seconds) -> Self {
        let (whole, frac) = split_seconds(seconds.value());
        Self { whole, frac }
    }

    /// Instant of a POSIX timestamp.
    ///
    /// POSIX time has no leap seconds; the TAI−UTC offset in effect at the
    /// timestamp is added. Values beyond the `i64` range saturate.
    pub fn from_posix(posix: Seconds) -> Self {
        let (whole, frac) = split_seconds(posix.value());
        Self {
            whole: whole.saturating_add(leap::tai_minus_utc(whole)),
            frac,
        }
    }

    /// The POSIX timestamp of this instant.
    ///
    /// During an inserted leap second the POSIX count of the following
    /// midnight is returned, plus the fraction elapsed.
    pub fn to_posix(&self) -> Seconds {
        let whole = match leap::classify_tai(self.whole) {
            TaiSecond::Posix(posix) => posix,
            TaiSecond::Leap { next_midnight } => next_midnight,
        };
        Seconds::new(whole as f64 + self.frac)
    }

    /// Whole TAI seconds (floor).
    #[inline]
    pub const fn whole_seconds(&self) -> i64 {
        self.whole
    }

    /// Fractional part in `[0, 1)`.
    #[inline]
    pub const fn fraction(&self) -> f64 {
        self.frac
    }

    /// TAI seconds as a single quantity.
    ///
    /// Precision is limited by `f64`; prefer the split accessors when the
    /// fraction matters.
    #[inline]
    pub fn seconds(&self) -> Seconds {
        Seconds::new(self.whole as f64 + self.frac)
    }

    /// Whether this instant falls inside an inserted leap second.
    pub fn is_leap_second(&self) -> bool {
        matches!(leap::classify_tai(self.whole), TaiSecond::Leap { .. })
    }

    /// Earlier of two instants.
    #[inline]
    pub fn min(self, other: Self) -> Self {
        if other < self {
            other
        } else {
            self
        }
    }

    /// Later of two instants.
    #[inline]
    pub fn max(self, other: Self) -> Self {
        if other > self {
            other
        } else {
            self
        }
    }

    /// Midpoint between two instants.
    pub fn mean(self, other: Self) -> Self {
        self + (other - self).value() / 2.0
    }
}

impl PartialEq for Instant {
    fn eq(&self, other: &Self) -> bool {
        self.whole == other.whole && self.frac == other.frac
    }
}

impl PartialOrd for Instant {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.whole.cmp(&other.whole) {
            Ordering::Equal => self.frac.partial_cmp(&other.frac),
            ord => Some(ord),
        }
    }
}

impl Element for Instant {
    const KIND: &'static str = "instant";
}

// ── Display ───────────────────────────────────────────────────────────────

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.frac == 0.0 {
            return write!(f, "Instant:{}", self.whole);
        }
        // The whole part is floored; negative values count back from the
        // next whole second instead.
        let (sign, whole, frac) = if self.whole < 0 {
            ("-", (self.whole + 1).unsigned_abs(), 1.0 - self.frac)
        } else {
            ("", self.whole.unsigned_abs(), self.frac)
        };
        // The fraction renders as "0.xxx"; drop the leading zero.
        let frac = frac.to_string();
        write!(f, "Instant:{sign}{whole}{}", frac.get(1..).unwrap_or_default())
    }
}

// ── Serde ─────────────────────────────────────────────────────────────────

#[cfg(feature = "serde")]
impl Serialize for Instant {
    fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: Serializer,
    {
        serializer.serialize_f64(self.seconds().value())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Instant {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let v = f64::deserialize(deserializer)?;
        Ok(Self::from_seconds(Seconds::new(v)))
    }
}

// ── Arithmetic ────────────────────────────────────────────────────────────

impl Add<Seconds> for Instant {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Seconds) -> Self::Output {
        self + rhs.value()
    }
}

impl Add<f64> for Instant {
    type Output = Self;
    fn add(self, rhs: f64) -> Self::Output {
        let (whole, frac) = split_seconds(rhs);
        Self::new(self.whole.saturating_add(whole), self.frac + frac)
    }
}

impl AddAssign<Seconds> for Instant {
    #[inline]
    fn add_assign(&mut self, rhs: Seconds) {
        *self = *self + rhs;
    }
}

impl Sub<Seconds> for Instant {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Seconds) -> Self::Output {
        self + -rhs.value()
    }
}

impl SubAssign<Seconds> for Instant {
    #[inline]
    fn sub_assign(&mut self, rhs: Seconds) {
        *self = *self - rhs;
    }
}

impl Sub for Instant {
    type Output = Seconds;
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Seconds::new(self.whole.saturating_sub(rhs.whole) as f64 + (self.frac - rhs.frac))
    }
}

impl From<Instant> for Seconds {
    #[inline]
    fn from(instant: Instant) -> Self {
        instant.seconds()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
