// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Civil date-times with a fixed UTC offset.
//!
//! A [`CivilInstant`] is the pair (local calendar fields, offset) together
//! with the absolute [`Instant`] they denote. The instant is computed once at
//! construction; equality and ordering only look at it, so the same moment
//! written in two offsets compares equal.
//!
//! # Leap seconds
//!
//! A second value in `[60, 61)` is accepted only when the minute, moved to
//! UTC, is 23:59 of a day that ends with an inserted leap second. Moving to
//! UTC for this check uses the offset's whole minutes, so in `+05:30` the
//! leap second reads `05:29:60` on the following local day.
//!
//! ```
//! use tempora::CivilInstant;
//!
//! let leap: CivilInstant = "2016-12-31T23:59:60Z".parse().unwrap();
//! assert!(leap.is_leap_second());
//! assert_eq!(leap.in_timezone(19_800).unwrap().to_string(), "2017-01-01T05:29:60+0530");
//! ```

use crate::calendar::{self, Date};
use crate::element::{Element, Scalar, ScalarOrd};
use crate::error::{CivilError, CivilResult, IntervalResult};
use crate::instant::{split_seconds, Instant};
use crate::leap::{self, TaiSecond, SECONDS_PER_DAY};
use chrono::{DateTime, Datelike, FixedOffset, NaiveTime, TimeZone, Timelike};
use qtty::Seconds;
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;
use tracing::{debug, trace};

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Largest supported absolute year.
pub const MAX_YEAR: i64 = 999_999_999;

const MINUTES_PER_DAY: i64 = 1_440;

/// Instants further than this from the epoch are rejected before any field
/// arithmetic; it covers [`MAX_YEAR`] with room to spare.
const MAX_ABS_SECONDS: u64 = 31_600_000_000_000_000;

/// Calendar granularity used by truncation and calendrical arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Unit {
    Second,
    Minute,
    Hour,
    Day,
    /// ISO week, starting on Monday.
    Week,
    Month,
    Year,
}

impl Unit {
    /// Exact length in seconds, for the units that have one.
    const fn seconds(self) -> Option<i64> {
        match self {
            Unit::Second => Some(1),
            Unit::Minute => Some(60),
            Unit::Hour => Some(3_600),
            Unit::Day => Some(SECONDS_PER_DAY),
            Unit::Week => Some(7 * SECONDS_PER_DAY),
            Unit::Month | Unit::Year => None,
        }
    }
}

/// A calendar date and time of day at a fixed UTC offset.
#[derive(Debug, Clone, Copy)]
pub struct CivilInstant {
    date: Date,
    hour: u8,
    minute: u8,
    second: f64,
    /// Seconds east of UTC.
    offset: i32,
    instant: Instant,
}

/// Field-by-field constructor returned by [`CivilInstant::builder`].
#[derive(Debug, Clone, Copy)]
pub struct Builder {
    year: i64,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: f64,
    offset: i32,
}

impl Builder {
    pub fn month(mut self, month: u8) -> Self {
        self.month = month;
        self
    }

    pub fn day(mut self, day: u8) -> Self {
        self.day = day;
        self
    }

    pub fn hour(mut self, hour: u8) -> Self {
        self.hour = hour;
        self
    }

    pub fn minute(mut self, minute: u8) -> Self {
        self.minute = minute;
        self
    }

    pub fn second(mut self, second: f64) -> Self {
        self.second = second;
        self
    }

    /// Offset in seconds east of UTC.
    pub fn offset(mut self, offset: i32) -> Self {
        self.offset = offset;
        self
    }

    /// Validate the fields and compute the instant.
    pub fn build(self) -> CivilResult<CivilInstant> {
        check_year(self.year)?;
        let date = Date::new(self.year, self.month, self.day).map_err(|err| {
            debug!(%err, "rejected civil date");
            err
        })?;
        CivilInstant::from_date(date, self.hour, self.minute, self.second, self.offset)
    }
}

/// Replacement fields for [`CivilInstant::with`]; unset fields keep their
/// current value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Overrides {
    year: Option<i64>,
    month: Option<u8>,
    day: Option<u8>,
    hour: Option<u8>,
    minute: Option<u8>,
    second: Option<f64>,
    offset: Option<i32>,
}

impl Overrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn year(mut self, year: i64) -> Self {
        self.year = Some(year);
        self
    }

    pub fn month(mut self, month: u8) -> Self {
        self.month = Some(month);
        self
    }

    pub fn day(mut self, day: u8) -> Self {
        self.day = Some(day);
        self
    }

    pub fn hour(mut self, hour: u8) -> Self {
        self.hour = Some(hour);
        self
    }

    pub fn minute(mut self, minute: u8) -> Self {
        self.minute = Some(minute);
        self
    }

    pub fn second(mut self, second: f64) -> Self {
        self.second = Some(second);
        self
    }

    /// Replace the offset while keeping the local fields, which moves the
    /// instant. Use [`CivilInstant::in_timezone`] to keep the instant.
    pub fn offset(mut self, offset: i32) -> Self {
        self.offset = Some(offset);
        self
    }
}

// ── Validation and conversions ────────────────────────────────────────────

fn invalid(message: String) -> CivilError {
    debug!(%message, "rejected civil fields");
    CivilError::InvalidDate(message)
}

fn check_year(year: i64) -> CivilResult<()> {
    if year.unsigned_abs() > MAX_YEAR as u64 {
        return Err(invalid(format!("year {year} is outside ±{MAX_YEAR}")));
    }
    Ok(())
}

fn check_offset(offset: i32) -> CivilResult<()> {
    if offset.unsigned_abs() >= SECONDS_PER_DAY as u32 {
        return Err(invalid(format!("offset {offset} s is not within one day")));
    }
    Ok(())
}

/// UTC minute (minutes since the epoch) that a local minute maps to on the
/// leap-second path, where only the offset's whole minutes apply.
fn leap_utc_minute(date: Date, hour: u8, minute: u8, offset: i32) -> i64 {
    let local = date.unix_days() * MINUTES_PER_DAY + i64::from(hour) * 60 + i64::from(minute);
    local - i64::from(offset / 60)
}

fn leap_minute_is_valid(date: Date, hour: u8, minute: u8, offset: i32) -> bool {
    let utc_minute = leap_utc_minute(date, hour, minute, offset);
    utc_minute.rem_euclid(MINUTES_PER_DAY) == MINUTES_PER_DAY - 1
        && leap::ends_with_leap_second(utc_minute.div_euclid(MINUTES_PER_DAY))
}

/// The largest `f64` strictly below `limit`.
fn just_below(limit: f64) -> f64 {
    f64::from_bits(limit.to_bits() - 1)
}

/// Absolute instant of already validated civil fields.
fn civil_to_instant(date: Date, hour: u8, minute: u8, second: f64, offset: i32) -> Instant {
    if second >= 60.0 {
        let minute_start = leap_utc_minute(date, hour, minute, offset) * 60;
        // The inserted second follows 23:59:59, which still carries the old
        // TAI−UTC value.
        let tai = minute_start + 60 + leap::tai_minus_utc(minute_start);
        trace!(tai, "resolved leap second");
        return Instant::new(tai, second - 60.0);
    }
    let local = date.unix_days() * SECONDS_PER_DAY
        + i64::from(hour) * 3_600
        + i64::from(minute) * 60;
    let (whole, frac) = split_seconds(second);
    let posix = local - i64::from(offset) + whole;
    Instant::new(posix + leap::tai_minus_utc(posix), frac)
}

/// Local civil fields of an instant seen at `offset`.
fn decompose(instant: Instant, offset: i32) -> (Date, u8, u8, f64) {
    let frac = instant.fraction();
    match leap::classify_tai(instant.whole_seconds()) {
        TaiSecond::Posix(posix) => {
            let local = posix + i64::from(offset);
            let days = local.div_euclid(SECONDS_PER_DAY);
            let in_day = local.rem_euclid(SECONDS_PER_DAY);
            let second = ((in_day % 60) as f64 + frac).min(just_below(60.0));
            (
                Date::from_unix_days(days),
                (in_day / 3_600) as u8,
                (in_day % 3_600 / 60) as u8,
                second,
            )
        }
        TaiSecond::Leap { next_midnight } => {
            trace!(next_midnight, "instant falls on a leap second");
            let local_minute = next_midnight / 60 - 1 + i64::from(offset / 60);
            let in_day = local_minute.rem_euclid(MINUTES_PER_DAY);
            (
                Date::from_unix_days(local_minute.div_euclid(MINUTES_PER_DAY)),
                (in_day / 60) as u8,
                (in_day % 60) as u8,
                (60.0 + frac).min(just_below(61.0)),
            )
        }
    }
}

impl CivilInstant {
    /// Start building from a year; the remaining fields default to
    /// January 1st, midnight, UTC.
    ///
    /// ```
    /// use tempora::CivilInstant;
    ///
    /// let t = CivilInstant::builder(2015).month(11).day(21).hour(16).minute(1).build().unwrap();
    /// assert_eq!(t.to_string(), "2015-11-21T16:01:00Z");
    /// ```
    pub const fn builder(year: i64) -> Builder {
        Builder {
            year,
            month: 1,
            day: 1,
            hour: 0,
            minute: 0,
            second: 0.0,
            offset: 0,
        }
    }

    /// Attach a time of day and offset to a date.
    pub fn from_date(
        date: Date,
        hour: u8,
        minute: u8,
        second: f64,
        offset: i32,
    ) -> CivilResult<Self> {
        check_year(date.year())?;
        check_offset(offset)?;
        if hour > 23 {
            return Err(invalid(format!("hour {hour} is outside 0..=23")));
        }
        if minute > 59 {
            return Err(invalid(format!("minute {minute} is outside 0..=59")));
        }
        if !(0.0..61.0).contains(&second) {
            return Err(invalid(format!("second {second} is outside 0..61")));
        }
        if second >= 60.0 && !leap_minute_is_valid(date, hour, minute, offset) {
            return Err(invalid(format!(
                "{date} {hour:02}:{minute:02} at offset {offset} s is not followed by a leap second"
            )));
        }
        Ok(Self::assemble(date, hour, minute, second, offset))
    }

    fn assemble(date: Date, hour: u8, minute: u8, second: f64, offset: i32) -> Self {
        Self {
            date,
            hour,
            minute,
            second,
            offset,
            instant: civil_to_instant(date, hour, minute, second, offset),
        }
    }

    /// Civil reading of `instant` at `offset`.
    pub fn from_instant(instant: Instant, offset: i32) -> CivilResult<Self> {
        check_offset(offset)?;
        if instant.whole_seconds().unsigned_abs() > MAX_ABS_SECONDS {
            return Err(invalid(format!("{instant} is outside the supported range")));
        }
        let (date, hour, minute, second) = decompose(instant, offset);
        check_year(date.year())?;
        Ok(Self {
            date,
            hour,
            minute,
            second,
            offset,
            instant,
        })
    }

    /// Civil reading of a POSIX timestamp at `offset`.
    pub fn from_posix(posix: Seconds, offset: i32) -> CivilResult<Self> {
        let value = posix.value();
        if !value.is_finite() || value.abs() > MAX_ABS_SECONDS as f64 {
            return Err(invalid(format!("posix time {value} is out of range")));
        }
        Self::from_instant(Instant::from_posix(posix), offset)
    }

    /// Parse an ISO-8601 date-time.
    ///
    /// `offset` is used when the text has none; giving both is a
    /// [`TimezoneClash`](CivilError::TimezoneClash).
    ///
    /// ```
    /// use tempora::CivilInstant;
    ///
    /// let t = CivilInstant::parse("2015-01-01T03:17:30+0500", None).unwrap();
    /// assert_eq!(t.offset(), 18_000);
    /// ```
    pub fn parse(input: &str, offset: Option<i32>) -> CivilResult<Self> {
        crate::parse::parse_civil(input, offset)
    }

    /// Copy with some fields replaced, validated like a fresh construction.
    pub fn with(&self, overrides: Overrides) -> CivilResult<Self> {
        CivilInstant::builder(overrides.year.unwrap_or(self.year()))
            .month(overrides.month.unwrap_or(self.month()))
            .day(overrides.day.unwrap_or(self.day()))
            .hour(overrides.hour.unwrap_or(self.hour))
            .minute(overrides.minute.unwrap_or(self.minute))
            .second(overrides.second.unwrap_or(self.second))
            .offset(overrides.offset.unwrap_or(self.offset))
            .build()
    }

    /// Zero every field below `unit`, keeping the offset.
    ///
    /// A leap second truncated to [`Unit::Second`] stays `:60`.
    pub fn truncated_to(&self, unit: Unit) -> Self {
        let (date, hour, minute, second) = match unit {
            Unit::Second => (self.date, self.hour, self.minute, self.second.floor()),
            Unit::Minute => (self.date, self.hour, self.minute, 0.0),
            Unit::Hour => (self.date, self.hour, 0, 0.0),
            Unit::Day => (self.date, 0, 0, 0.0),
            Unit::Week => {
                let monday = self.date.unix_days() - i64::from(self.date.day_of_week() - 1);
                (Date::from_unix_days(monday), 0, 0, 0.0)
            }
            Unit::Month => (self.first_of(self.month()), 0, 0, 0.0),
            Unit::Year => (self.first_of(1), 0, 0, 0.0),
        };
        Self::assemble(date, hour, minute, second, self.offset)
    }

    fn first_of(&self, month: u8) -> Date {
        Date::from_unix_days(calendar::days_from_civil(self.year(), month, 1))
    }

    /// The same instant in UTC.
    pub fn to_utc(&self) -> Self {
        self.at_offset(0)
    }

    /// The same instant read at another offset.
    pub fn in_timezone(&self, offset: i32) -> CivilResult<Self> {
        check_offset(offset)?;
        Ok(self.at_offset(offset))
    }

    fn at_offset(&self, offset: i32) -> Self {
        let (date, hour, minute, second) = decompose(self.instant, offset);
        Self {
            date,
            hour,
            minute,
            second,
            offset,
            instant: self.instant,
        }
    }

    #[inline]
    pub const fn to_instant(&self) -> Instant {
        self.instant
    }

    /// POSIX timestamp.
    ///
    /// With `ignore_offset` the local fields are read as if they were UTC;
    /// the value itself is unchanged.
    pub fn to_posix(&self, ignore_offset: bool) -> Seconds {
        if !ignore_offset {
            return self.instant.to_posix();
        }
        let local = self.date.unix_days() * SECONDS_PER_DAY
            + i64::from(self.hour) * 3_600
            + i64::from(self.minute) * 60;
        Seconds::new(local as f64 + self.second)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub const fn year(&self) -> i64 {
        self.date.year()
    }

    #[inline]
    pub const fn month(&self) -> u8 {
        self.date.month()
    }

    #[inline]
    pub const fn day(&self) -> u8 {
        self.date.day()
    }

    #[inline]
    pub const fn hour(&self) -> u8 {
        self.hour
    }

    #[inline]
    pub const fn minute(&self) -> u8 {
        self.minute
    }

    /// Seconds including the fraction, in `[0, 61)`.
    #[inline]
    pub const fn second(&self) -> f64 {
        self.second
    }

    #[inline]
    pub fn whole_second(&self) -> u8 {
        self.second as u8
    }

    /// Seconds east of UTC.
    #[inline]
    pub const fn offset(&self) -> i32 {
        self.offset
    }

    pub fn offset_in_minutes(&self) -> f64 {
        f64::from(self.offset) / 60.0
    }

    pub fn offset_in_hours(&self) -> f64 {
        f64::from(self.offset) / 3_600.0
    }

    #[inline]
    pub const fn to_date(&self) -> Date {
        self.date
    }

    /// ISO weekday, 1 = Monday … 7 = Sunday.
    pub const fn day_of_week(&self) -> u8 {
        self.date.day_of_week()
    }

    pub const fn day_of_year(&self) -> u16 {
        self.date.day_of_year()
    }

    pub const fn days_in_month(&self) -> u8 {
        self.date.days_in_month()
    }

    pub const fn is_leap_year(&self) -> bool {
        self.date.is_leap_year()
    }

    pub fn is_leap_second(&self) -> bool {
        self.second >= 60.0
    }

    // ── Arithmetic ────────────────────────────────────────────────────────

    /// Move `amount` units forward.
    ///
    /// Units up to a week are exact durations, so crossing a leap second
    /// shifts the wall-clock reading. Months and years move the calendar
    /// fields and clamp the day to the target month:
    ///
    /// ```
    /// use tempora::{CivilInstant, Unit};
    ///
    /// let jan31 = CivilInstant::builder(2015).day(31).build().unwrap();
    /// assert_eq!(jan31.later(Unit::Month, 1).unwrap().day(), 28);
    /// ```
    pub fn later(&self, unit: Unit, amount: i64) -> CivilResult<Self> {
        let overflow = || invalid(format!("moving {amount} {unit:?} overflows"));
        if let Some(length) = unit.seconds() {
            let shift = amount.checked_mul(length).ok_or_else(overflow)?;
            let whole = self
                .instant
                .whole_seconds()
                .checked_add(shift)
                .ok_or_else(overflow)?;
            return Self::from_instant(Instant::new(whole, self.instant.fraction()), self.offset);
        }
        let months = match unit {
            Unit::Year => amount.checked_mul(12).ok_or_else(overflow)?,
            _ => amount,
        };
        let index = self
            .year()
            .checked_mul(12)
            .and_then(|m| m.checked_add(i64::from(self.month()) - 1))
            .and_then(|m| m.checked_add(months))
            .ok_or_else(overflow)?;
        let year = index.div_euclid(12);
        let month = (index.rem_euclid(12) + 1) as u8;
        check_year(year)?;
        let day = self.day().min(calendar::days_in_month(year, month));
        CivilInstant::builder(year)
            .month(month)
            .day(day)
            .hour(self.hour)
            .minute(self.minute)
            .second(self.second)
            .offset(self.offset)
            .build()
    }

    /// Move `amount` units backward; see [`later`](Self::later).
    pub fn earlier(&self, unit: Unit, amount: i64) -> CivilResult<Self> {
        let negated = amount
            .checked_neg()
            .ok_or_else(|| invalid(format!("moving {amount} {unit:?} back overflows")))?;
        self.later(unit, negated)
    }

    /// Add an exact duration, keeping the offset.
    pub fn checked_add(&self, duration: Seconds) -> CivilResult<Self> {
        let value = duration.value();
        if !value.is_finite() || value.abs() > MAX_ABS_SECONDS as f64 * 2.0 {
            return Err(invalid(format!("duration {value} s is out of range")));
        }
        Self::from_instant(self.instant + value, self.offset)
    }

    pub fn checked_sub(&self, duration: Seconds) -> CivilResult<Self> {
        self.checked_add(Seconds::new(-duration.value()))
    }

    // ── chrono interop ────────────────────────────────────────────────────

    /// Convert to a chrono date-time, or `None` outside chrono's range.
    ///
    /// Leap seconds use chrono's convention of second 59 with a nanosecond
    /// count of one billion or more.
    pub fn to_chrono(&self) -> Option<DateTime<FixedOffset>> {
        let offset = FixedOffset::east_opt(self.offset)?;
        let date = self.date.to_naive()?;
        let whole = self.whole_second();
        let nanos = ((self.second - f64::from(whole)) * 1e9).round().min(999_999_999.0) as u32;
        let (second, nanos) = if whole >= 60 {
            (59, nanos + 1_000_000_000)
        } else {
            (u32::from(whole), nanos)
        };
        let time = NaiveTime::from_hms_nano_opt(self.hour.into(), self.minute.into(), second, nanos)?;
        offset.from_local_datetime(&date.and_time(time)).single()
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for CivilInstant {
    /// Leap seconds that chrono accepts but the leap table does not know
    /// are folded into the following second.
    fn from(value: DateTime<Tz>) -> Self {
        let value = value.fixed_offset();
        let offset = value.offset().local_minus_utc();
        let local = value.naive_local();
        let second = f64::from(local.second()) + f64::from(local.nanosecond()) / 1e9;
        let built = CivilInstant::builder(local.year().into())
            .month(local.month() as u8)
            .day(local.day() as u8)
            .hour(local.hour() as u8)
            .minute(local.minute() as u8)
            .second(second)
            .offset(offset)
            .build();
        match built {
            Ok(civil) => civil,
            Err(err) => {
                trace!(%err, "folding unknown leap second");
                let nanos = local.nanosecond().min(1_999_999_999);
                let posix = value.timestamp() as f64 + f64::from(nanos) / 1e9;
                let (date, hour, minute, second) = decompose(Instant::from_posix(Seconds::new(posix)), offset);
                Self::assemble(date, hour, minute, second, offset)
            }
        }
    }
}

// ── Comparison ────────────────────────────────────────────────────────────

impl PartialEq for CivilInstant {
    fn eq(&self, other: &Self) -> bool {
        self.instant == other.instant
    }
}

impl PartialOrd for CivilInstant {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.instant.partial_cmp(&other.instant)
    }
}

impl Element for CivilInstant {
    const KIND: &'static str = "civil instant";
}

impl ScalarOrd for CivilInstant {
    /// Numbers are POSIX timestamps; text is parsed as a date-time.
    fn cmp_scalar(&self, scalar: &Scalar) -> IntervalResult<Option<Ordering>> {
        match scalar {
            Scalar::Integer(posix) => Ok(self.to_posix(false).value().partial_cmp(&(*posix as f64))),
            Scalar::Float(posix) => Ok(self.to_posix(false).value().partial_cmp(posix)),
            Scalar::Text(text) => {
                let other = CivilInstant::parse(text, None).map_err(|_| scalar.incomparable::<Self>())?;
                Ok(self.partial_cmp(&other))
            }
        }
    }
}

// ── Display / parsing ─────────────────────────────────────────────────────

impl fmt::Display for CivilInstant {
    /// `YYYY-MM-DDThh:mm:ss[.f](Z|±hhmm)`; `{:#}` writes `±hh:mm`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        calendar::write_year(f, self.year())?;
        write!(
            f,
            "-{:02}-{:02}T{:02}:{:02}:",
            self.month(),
            self.day(),
            self.hour,
            self.minute
        )?;
        if self.second < 10.0 {
            f.write_str("0")?;
        }
        write!(f, "{}", self.second)?;

        if self.offset == 0 {
            return f.write_str("Z");
        }
        let sign = if self.offset < 0 { '-' } else { '+' };
        let magnitude = self.offset.unsigned_abs();
        let (hours, minutes, seconds) = (magnitude / 3_600, magnitude % 3_600 / 60, magnitude % 60);
        let sep = if f.alternate() { ":" } else { "" };
        write!(f, "{sign}{hours:02}{sep}{minutes:02}")?;
        if seconds != 0 {
            write!(f, "{sep}{seconds:02}")?;
        }
        Ok(())
    }
}

impl FromStr for CivilInstant {
    type Err = CivilError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, None)
    }
}

#[cfg(feature = "serde")]
impl Serialize for CivilInstant {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for CivilInstant {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw, None).map_err(serde::de::Error::custom)
    }
}

// ── Operators ─────────────────────────────────────────────────────────────

impl Add<Seconds> for CivilInstant {
    type Output = Self;

    /// # Panics
    ///
    /// If the result leaves the supported year range; see
    /// [`checked_add`](CivilInstant::checked_add).
    fn add(self, rhs: Seconds) -> Self::Output {
        self.checked_add(rhs)
            .expect("`CivilInstant + Seconds` overflowed")
    }
}

impl Sub<Seconds> for CivilInstant {
    type Output = Self;

    /// # Panics
    ///
    /// If the result leaves the supported year range.
    fn sub(self, rhs: Seconds) -> Self::Output {
        self.checked_sub(rhs)
            .expect("`CivilInstant - Seconds` overflowed")
    }
}

impl Sub for CivilInstant {
    type Output = Seconds;

    /// Elapsed SI seconds, leap seconds included.
    fn sub(self, rhs: Self) -> Seconds {
        self.instant - rhs.instant
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn civil(text: &str) -> CivilInstant {
        text.parse().unwrap()
    }

    #[test]
    fn builder_defaults_and_rendering() {
        let t = CivilInstant::builder(2015)
            .month(11)
            .day(21)
            .hour(16)
            .minute(1)
            .build()
            .unwrap();
        assert_eq!(t.to_string(), "2015-11-21T16:01:00Z");
        assert_eq!(CivilInstant::builder(1970).build().unwrap().to_posix(false), Seconds::new(0.0));
    }

    #[test]
    fn builder_rejects_bad_fields() {
        for built in [
            CivilInstant::builder(2015).month(13).build(),
            CivilInstant::builder(2015).month(4).day(31).build(),
            CivilInstant::builder(2015).hour(24).build(),
            CivilInstant::builder(2015).minute(60).build(),
            CivilInstant::builder(2015).second(-0.5).build(),
            CivilInstant::builder(2015).second(f64::NAN).build(),
            CivilInstant::builder(2015).offset(86_400).build(),
            CivilInstant::builder(MAX_YEAR + 1).build(),
        ] {
            assert!(matches!(built, Err(CivilError::InvalidDate(_))), "{built:?}");
        }
    }

    #[test]
    fn with_revalidates() {
        let feb29 = CivilInstant::builder(2012).month(2).day(29).build().unwrap();
        assert!(matches!(
            feb29.with(Overrides::new().year(2015)),
            Err(CivilError::InvalidDate(_))
        ));
        let moved = feb29.with(Overrides::new().year(2016).hour(8)).unwrap();
        assert_eq!(moved.to_string(), "2016-02-29T08:00:00Z");
    }

    #[test]
    fn offset_override_keeps_local_fields() {
        let t = civil("2015-01-01T12:00:00Z");
        let shifted = t.with(Overrides::new().offset(3_600)).unwrap();
        assert_eq!(shifted.hour(), 12);
        assert_eq!(t - shifted, Seconds::new(3_600.0));
    }

    #[test]
    fn equality_ignores_offset() {
        let utc = civil("2015-01-01T00:00:00Z");
        let east = civil("2015-01-01T05:30:00+05:30");
        assert_eq!(utc, east);
        assert!(civil("2015-01-01T00:00:01Z") > east);
    }

    #[test]
    fn timezone_conversion_keeps_instant() {
        let t = civil("2015-01-01T03:17:30.5+0500");
        let utc = t.to_utc();
        assert_eq!(utc.to_string(), "2014-12-31T22:17:30.5Z");
        assert_eq!(utc.to_instant(), t.to_instant());
        let west = t.in_timezone(-9 * 3_600).unwrap();
        assert_eq!(west.to_string(), "2014-12-31T13:17:30.5-0900");
        assert!(t.in_timezone(100_000).is_err());
    }

    #[test]
    fn posix_conversions() {
        let t = civil("2015-11-21T16:01:00+0100");
        assert_eq!(t.to_posix(false), Seconds::new(1_448_118_060.0));
        assert_eq!(t.to_posix(true), Seconds::new(1_448_121_660.0));
        assert_eq!(t.offset(), 3_600);

        let back = CivilInstant::from_posix(Seconds::new(1_448_118_060.25), 3_600).unwrap();
        assert_eq!(back.to_string(), "2015-11-21T16:01:00.25+0100");
        assert!(CivilInstant::from_posix(Seconds::new(f64::INFINITY), 0).is_err());
    }

    #[test]
    fn out_of_range_posix_is_rejected() {
        for posix in [1e19, -1e19, 4e16] {
            assert!(matches!(
                CivilInstant::from_posix(Seconds::new(posix), 0),
                Err(CivilError::InvalidDate(_))
            ));
        }
        let far = Instant::from_posix(Seconds::new(1e19));
        assert!(matches!(
            CivilInstant::from_instant(far, 0),
            Err(CivilError::InvalidDate(_))
        ));
    }

    #[test]
    fn truncation() {
        let t = civil("2015-11-21T16:01:42.75+0100");
        assert_eq!(t.truncated_to(Unit::Second).to_string(), "2015-11-21T16:01:42+0100");
        assert_eq!(t.truncated_to(Unit::Minute).to_string(), "2015-11-21T16:01:00+0100");
        assert_eq!(t.truncated_to(Unit::Hour).to_string(), "2015-11-21T16:00:00+0100");
        assert_eq!(t.truncated_to(Unit::Day).to_string(), "2015-11-21T00:00:00+0100");
        assert_eq!(t.truncated_to(Unit::Week).to_string(), "2015-11-16T00:00:00+0100");
        assert_eq!(t.truncated_to(Unit::Month).to_string(), "2015-11-01T00:00:00+0100");
        assert_eq!(t.truncated_to(Unit::Year).to_string(), "2015-01-01T00:00:00+0100");
    }

    #[test]
    fn calendar_accessors() {
        let t = civil("2016-02-29T10:30:15.5-0330");
        assert_eq!(t.day_of_week(), 1);
        assert_eq!(t.day_of_year(), 60);
        assert_eq!(t.days_in_month(), 29);
        assert!(t.is_leap_year());
        assert_eq!(t.whole_second(), 15);
        assert_eq!(t.offset_in_minutes(), -210.0);
        assert_eq!(t.offset_in_hours(), -3.5);
        assert_eq!(t.to_date(), Date::new(2016, 2, 29).unwrap());
    }

    #[test]
    fn display_forms() {
        let t = civil("2015-01-01T03:07:09.125+05:30");
        assert_eq!(t.to_string(), "2015-01-01T03:07:09.125+0530");
        assert_eq!(format!("{t:#}"), "2015-01-01T03:07:09.125+05:30");
        assert_eq!(civil("2015-01-01T00:00:00-00:00:30").to_string(), "2015-01-01T00:00:00-000030");
        assert_eq!(civil("-0044-03-15T12:00:00Z").to_string(), "-0044-03-15T12:00:00Z");
    }

    #[test]
    fn leap_second_accepted_only_on_leap_days() {
        let leap = civil("2016-12-31T23:59:60Z");
        assert!(leap.is_leap_second());
        assert!(leap.to_instant().is_leap_second());
        assert!(matches!(
            CivilInstant::parse("2015-12-31T23:59:60Z", None),
            Err(CivilError::InvalidDate(_))
        ));
        assert!(CivilInstant::parse("2016-12-31T23:58:60Z", None).is_err());
    }

    #[test]
    fn leap_second_is_anchored_to_utc() {
        let local = civil("2017-01-01T00:59:60.5+0100");
        assert_eq!(local, civil("2016-12-31T23:59:60.5Z"));
        assert_eq!(local.to_utc().to_string(), "2016-12-31T23:59:60.5Z");
        assert!(CivilInstant::parse("2016-12-31T23:59:60+0100", None).is_err());
    }

    #[test]
    fn leap_second_counts_in_differences() {
        let before = civil("2016-12-31T23:59:59Z");
        let after = civil("2017-01-01T00:00:00Z");
        assert_eq!(after - before, Seconds::new(2.0));
        assert_eq!((before + Seconds::new(1.0)).to_string(), "2016-12-31T23:59:60Z");
        assert_eq!(civil("2016-12-31T23:59:60Z").to_posix(false), Seconds::new(1_483_228_800.0));
    }

    #[test]
    fn truncating_a_leap_second_keeps_it() {
        let leap = civil("2016-12-31T23:59:60.9Z");
        assert_eq!(leap.truncated_to(Unit::Second).to_string(), "2016-12-31T23:59:60Z");
        assert_eq!(leap.truncated_to(Unit::Minute).to_string(), "2016-12-31T23:59:00Z");
    }

    #[test]
    fn arithmetic_keeps_offset() {
        let t = civil("2015-01-01T23:59:30+0200");
        let later = t + Seconds::new(45.0);
        assert_eq!(later.to_string(), "2015-01-02T00:00:15+0200");
        assert_eq!(later - Seconds::new(45.0), t);
        assert!(t.checked_add(Seconds::new(f64::NAN)).is_err());
    }

    #[test]
    fn later_and_earlier() {
        let t = civil("2015-01-31T10:00:00Z");
        assert_eq!(t.later(Unit::Month, 1).unwrap().to_string(), "2015-02-28T10:00:00Z");
        assert_eq!(t.later(Unit::Year, 1).unwrap().to_string(), "2016-01-31T10:00:00Z");
        assert_eq!(t.earlier(Unit::Month, 2).unwrap().to_string(), "2014-11-30T10:00:00Z");
        assert_eq!(t.later(Unit::Week, 1).unwrap().to_string(), "2015-02-07T10:00:00Z");
        assert_eq!(t.earlier(Unit::Hour, 11).unwrap().to_string(), "2015-01-30T23:00:00Z");
        assert!(t.later(Unit::Year, i64::MAX).is_err());
        assert!(t.earlier(Unit::Second, i64::MIN).is_err());
    }

    #[test]
    fn day_steps_are_exact_across_leap_seconds() {
        let t = civil("2016-12-31T12:00:00Z");
        assert_eq!(t.later(Unit::Day, 1).unwrap().to_string(), "2017-01-01T11:59:59Z");
    }

    #[test]
    fn chrono_roundtrip() {
        let t = civil("2015-11-21T16:01:00.5+0100");
        let chrono = t.to_chrono().unwrap();
        assert_eq!(chrono.to_rfc3339(), "2015-11-21T16:01:00.500+01:00");
        assert_eq!(CivilInstant::from(chrono), t);

        let utc = Utc.with_ymd_and_hms(2020, 5, 17, 8, 30, 0).unwrap();
        assert_eq!(CivilInstant::from(utc).to_string(), "2020-05-17T08:30:00Z");
    }

    #[test]
    fn chrono_leap_seconds() {
        let leap = civil("2016-12-31T23:59:60Z");
        let chrono = leap.to_chrono().unwrap();
        assert_eq!(chrono.second(), 59);
        assert_eq!(chrono.nanosecond(), 1_000_000_000);
        assert_eq!(CivilInstant::from(chrono), leap);
    }

    #[test]
    fn compares_against_scalars() {
        let t = civil("1970-01-01T00:00:10Z");
        assert_eq!(t.cmp_scalar(&Scalar::from(10)), Ok(Some(Ordering::Equal)));
        assert_eq!(t.cmp_scalar(&Scalar::from(9.5)), Ok(Some(Ordering::Greater)));
        assert_eq!(
            t.cmp_scalar(&Scalar::from("1970-01-01T01:00:10+0100")),
            Ok(Some(Ordering::Equal))
        );
        assert!(t.cmp_scalar(&Scalar::from("yesterday")).is_err());
    }
}
