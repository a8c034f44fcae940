// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Proleptic Gregorian calendar arithmetic and the date-only [`Date`] value.
//!
//! Day counts are expressed as *Unix days*: days since 1970-01-01, negative
//! before it. The conversions use Howard Hinnant's era-based algorithms, which
//! are exact over the whole `i64` year range used here.

use crate::error::{CivilError, CivilResult};
use chrono::{Datelike, NaiveDate};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const DAYS_IN_MONTH: [[u8; 13]; 2] = [
    // common year
    [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31],
    // leap year
    [0, 31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31],
];

const DAYS_BEFORE_MONTH: [[u16; 13]; 2] = [
    [0, 0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334],
    [0, 0, 31, 60, 91, 121, 152, 182, 213, 244, 274, 305, 335],
];

/// Gregorian leap-year rule.
#[inline]
pub const fn is_leap_year(year: i64) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Number of days in `month` of `year`, or 0 for a month outside 1..=12.
#[inline]
pub const fn days_in_month(year: i64, month: u8) -> u8 {
    if month == 0 || month > 12 {
        return 0;
    }
    DAYS_IN_MONTH[is_leap_year(year) as usize][month as usize]
}

/// 1-based ordinal day within the year.
#[inline]
pub(crate) const fn day_of_year(year: i64, month: u8, day: u8) -> u16 {
    DAYS_BEFORE_MONTH[is_leap_year(year) as usize][month as usize] + day as u16
}

/// Days since 1970-01-01 for a valid civil date.
pub(crate) const fn days_from_civil(year: i64, month: u8, day: u8) -> i64 {
    let y = if month <= 2 { year - 1 } else { year };
    let m = month as i64;
    let era = y.div_euclid(400);
    let yoe = y - era * 400;
    let mp = (m + 9) % 12;
    let doy = (153 * mp + 2) / 5 + day as i64 - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

/// Inverse of [`days_from_civil`].
pub(crate) const fn civil_from_days(days: i64) -> (i64, u8, u8) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u8;
    let month = if mp < 10 { mp + 3 } else { mp - 9 } as u8;
    let year = yoe + era * 400 + if month <= 2 { 1 } else { 0 };
    (year, month, day)
}

/// ISO weekday for a Unix day: 1 = Monday … 7 = Sunday.
#[inline]
pub(crate) const fn weekday_from_days(days: i64) -> u8 {
    // 1970-01-01 was a Thursday.
    ((days + 3).rem_euclid(7) + 1) as u8
}

/// A date on the proleptic Gregorian calendar, without a time of day.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date {
    year: i64,
    month: u8,
    day: u8,
}

impl Date {
    /// Build a date, failing when the day is outside the month.
    ///
    /// ```
    /// use tempora::Date;
    ///
    /// assert!(Date::new(2012, 2, 29).is_ok());
    /// assert!(Date::new(2015, 2, 29).is_err());
    /// ```
    pub fn new(year: i64, month: u8, day: u8) -> CivilResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(CivilError::InvalidDate(format!(
                "month {month} is outside 1..=12"
            )));
        }
        let limit = days_in_month(year, month);
        if day == 0 || day > limit {
            return Err(CivilError::InvalidDate(format!(
                "day {day} is outside 1..={limit} for {year:04}-{month:02}"
            )));
        }
        Ok(Self { year, month, day })
    }

    /// Date at `days` days after 1970-01-01.
    pub const fn from_unix_days(days: i64) -> Self {
        let (year, month, day) = civil_from_days(days);
        Self { year, month, day }
    }

    #[inline]
    pub const fn year(&self) -> i64 {
        self.year
    }

    #[inline]
    pub const fn month(&self) -> u8 {
        self.month
    }

    #[inline]
    pub const fn day(&self) -> u8 {
        self.day
    }

    /// Days since 1970-01-01.
    #[inline]
    pub const fn unix_days(&self) -> i64 {
        days_from_civil(self.year, self.month, self.day)
    }

    /// ISO weekday, 1 = Monday … 7 = Sunday.
    #[inline]
    pub const fn day_of_week(&self) -> u8 {
        weekday_from_days(self.unix_days())
    }

    #[inline]
    pub const fn day_of_year(&self) -> u16 {
        day_of_year(self.year, self.month, self.day)
    }

    #[inline]
    pub const fn is_leap_year(&self) -> bool {
        is_leap_year(self.year)
    }

    #[inline]
    pub const fn days_in_month(&self) -> u8 {
        days_in_month(self.year, self.month)
    }

    /// Convert to `chrono::NaiveDate`, or `None` outside chrono's range.
    pub fn to_naive(&self) -> Option<NaiveDate> {
        let year = i32::try_from(self.year).ok()?;
        NaiveDate::from_ymd_opt(year, self.month.into(), self.day.into())
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Self {
            year: date.year().into(),
            month: date.month() as u8,
            day: date.day() as u8,
        }
    }
}

/// Writes a year as at least four digits, signed outside `0..=9999`.
pub(crate) fn write_year(f: &mut fmt::Formatter<'_>, year: i64) -> fmt::Result {
    if (0..=9999).contains(&year) {
        write!(f, "{year:04}")
    } else if year < 0 {
        write!(f, "-{:04}", year.unsigned_abs())
    } else {
        write!(f, "+{year:04}")
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_year(f, self.year)?;
        write!(f, "-{:02}-{:02}", self.month, self.day)
    }
}

#[cfg(feature = "serde")]
impl Serialize for Date {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Date {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        crate::parse::parse_date(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leap_year_rule() {
        assert!(is_leap_year(2012));
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2015));
        assert!(is_leap_year(-4));
        assert!(is_leap_year(0));
    }

    #[test]
    fn month_lengths() {
        assert_eq!(days_in_month(2012, 2), 29);
        assert_eq!(days_in_month(2015, 2), 28);
        assert_eq!(days_in_month(2015, 4), 30);
        assert_eq!(days_in_month(2015, 12), 31);
        assert_eq!(days_in_month(2015, 13), 0);
    }

    #[test]
    fn unix_epoch_is_day_zero() {
        assert_eq!(days_from_civil(1970, 1, 1), 0);
        assert_eq!(civil_from_days(0), (1970, 1, 1));
        assert_eq!(days_from_civil(1969, 12, 31), -1);
        assert_eq!(days_from_civil(2000, 3, 1), 11_017);
    }

    #[test]
    fn civil_days_roundtrip_across_eras() {
        for days in (-800_000..800_000).step_by(997) {
            let (y, m, d) = civil_from_days(days);
            assert_eq!(days_from_civil(y, m, d), days, "{y}-{m}-{d}");
        }
    }

    #[test]
    fn weekday_and_ordinal() {
        // 2015-11-21 was a Saturday.
        let date = Date::new(2015, 11, 21).unwrap();
        assert_eq!(date.day_of_week(), 6);
        assert_eq!(date.day_of_year(), 325);
        assert_eq!(Date::new(2012, 12, 31).unwrap().day_of_year(), 366);
    }

    #[test]
    fn invalid_dates_are_rejected() {
        assert!(matches!(
            Date::new(2015, 2, 29),
            Err(CivilError::InvalidDate(_))
        ));
        assert!(Date::new(2015, 0, 1).is_err());
        assert!(Date::new(2015, 4, 31).is_err());
        assert!(Date::new(2015, 1, 0).is_err());
    }

    #[test]
    fn naive_date_interop() {
        let naive = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let date = Date::from(naive);
        assert_eq!(date, Date::new(2024, 2, 29).unwrap());
        assert_eq!(date.to_naive(), Some(naive));
    }

    #[test]
    fn display_pads_and_signs_years() {
        assert_eq!(Date::new(2015, 1, 2).unwrap().to_string(), "2015-01-02");
        assert_eq!(Date::new(33, 1, 2).unwrap().to_string(), "0033-01-02");
        assert_eq!(Date::new(-44, 3, 15).unwrap().to_string(), "-0044-03-15");
        assert_eq!(Date::new(12_345, 3, 15).unwrap().to_string(), "+12345-03-15");
    }
}
