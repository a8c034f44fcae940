// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Civil date-times and lazy intervals
//!
//! This crate provides calendar-aware points in time with fixed UTC offsets,
//! and generic intervals that enumerate their elements on demand.
//!
//! # Core types
//!
//! - [`CivilInstant`] — year/month/day/hour/minute/second plus a UTC offset,
//!   backed by an absolute [`Instant`].
//! - [`Instant`] — leap-second aware point on the TAI axis.
//! - [`Date`] — a proleptic Gregorian date without a time of day.
//! - [`Interval<T>`] — a range over any [`Element`], with open or closed
//!   ends and optionally infinite [`Bound`]s.
//! - [`Sequence<T>`] / [`Reversed<T>`] — restartable lazy traversals of a
//!   [`Discrete`] interval.
//!
//! # Leap seconds
//!
//! Differences between instants count SI seconds, so the leap second at the
//! end of 2016 is visible:
//!
//! ```
//! use tempora::CivilInstant;
//! use qtty::Seconds;
//!
//! let before: CivilInstant = "2016-12-31T23:59:59Z".parse().unwrap();
//! let after: CivilInstant = "2017-01-01T00:00:00Z".parse().unwrap();
//! assert_eq!(after - before, Seconds::new(2.0));
//! ```
//!
//! # Intervals
//!
//! ```
//! use tempora::Interval;
//!
//! let digits = Interval::new(1, 5).excluding_start();
//! assert_eq!(digits.element_count(), Ok(4));
//! assert_eq!(digits.to_sequence().unwrap().iter().collect::<Vec<_>>(), vec![2, 3, 4, 5]);
//! ```
//!
//! # Features
//!
//! - `serde` — `Serialize`/`Deserialize` for the value types. Civil values
//!   use their canonical string form.

mod bound;
mod calendar;
mod civil;
mod element;
mod error;
mod instant;
mod interval;
mod leap;
mod parse;
mod random;
mod sequence;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use bound::Bound;
pub use calendar::{days_in_month, is_leap_year, Date};
pub use civil::{Builder, CivilInstant, Overrides, Unit, MAX_YEAR};
pub use element::{is_combining, Discrete, Element, Grapheme, Scalar, ScalarOrd};
pub use error::{CivilError, CivilResult, IntervalError, IntervalResult};
pub use instant::Instant;
pub use interval::Interval;
pub use leap::{ends_with_leap_second, tai_minus_utc};
pub use sequence::{Iter, Reversed, Sequence};
