// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error types returned by civil date-time and interval operations.

use thiserror::Error;

/// Failures raised while building or parsing a [`CivilInstant`](crate::CivilInstant).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CivilError {
    /// The civil fields do not name a real calendar date and time of day.
    #[error("invalid date: {0}")]
    InvalidDate(String),

    /// The input string does not match the accepted ISO-8601 grammar.
    #[error("invalid format: {0:?} is not an ISO-8601 date-time")]
    InvalidFormat(String),

    /// The string carries an offset and an explicit offset was also given.
    #[error("timezone clash: {input:?} carries an offset and {offset} s was also supplied")]
    TimezoneClash { input: String, offset: i32 },
}

/// Failures raised by counting, indexing and enumerating intervals.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntervalError {
    /// The operation needs finite integer-like bounds.
    #[error("cannot {operation} on an interval without finite discrete bounds")]
    NotIntegerInterval { operation: &'static str },

    /// An endpoint is built from combining (synthetic) codepoints.
    #[error("cannot enumerate from synthetic codepoint {0:?}")]
    SyntheticCodepoint(String),

    /// The scalar kind cannot be ordered against the interval's elements.
    #[error("a {scalar} scalar cannot be compared with {element} elements")]
    Incomparable {
        scalar: &'static str,
        element: &'static str,
    },
}

pub type CivilResult<T> = std::result::Result<T, CivilError>;

pub type IntervalResult<T> = std::result::Result<T, IntervalError>;
