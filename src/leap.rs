// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Leap-second table and the TAI−UTC lookups built on it.
//!
//! Entries are keyed by the Unix day (days since 1970-01-01 on the UTC axis)
//! on which a new TAI−UTC value takes effect. A leap second is inserted at
//! the end of the previous day whenever the value increases.
//!
//! Source: IERS Bulletin C. Before 1972 the offset is held at the initial
//! 10 s adopted on 1972-01-01.

/// Seconds in a civil day without a leap second.
pub(crate) const SECONDS_PER_DAY: i64 = 86_400;

/// (Unix day the value takes effect, cumulative TAI−UTC in seconds).
const LEAP_SECONDS: [(i64, i64); 28] = [
    (730, 10),   // 1972-01-01
    (912, 11),   // 1972-07-01
    (1_096, 12), // 1973-01-01
    (1_461, 13), // 1974-01-01
    (1_826, 14), // 1975-01-01
    (2_191, 15), // 1976-01-01
    (2_557, 16), // 1977-01-01
    (2_922, 17), // 1978-01-01
    (3_287, 18), // 1979-01-01
    (3_652, 19), // 1980-01-01
    (4_199, 20), // 1981-07-01
    (4_564, 21), // 1982-07-01
    (4_929, 22), // 1983-07-01
    (5_660, 23), // 1985-07-01
    (6_574, 24), // 1988-01-01
    (7_305, 25), // 1990-01-01
    (7_670, 26), // 1991-01-01
    (8_217, 27), // 1992-07-01
    (8_582, 28), // 1993-07-01
    (8_947, 29), // 1994-07-01
    (9_496, 30), // 1996-01-01
    (10_043, 31), // 1997-07-01
    (10_592, 32), // 1999-01-01
    (13_149, 33), // 2006-01-01
    (14_245, 34), // 2009-01-01
    (15_522, 35), // 2012-07-01
    (16_617, 36), // 2015-07-01
    (17_167, 37), // 2017-01-01
];

/// TAI−UTC before the first table entry.
const INITIAL_TAI_MINUS_UTC: i64 = 10;

/// Cumulative TAI−UTC (seconds) in effect at a POSIX second.
pub fn tai_minus_utc(posix_seconds: i64) -> i64 {
    let day = posix_seconds.div_euclid(SECONDS_PER_DAY);
    // Binary search for the last entry <= day
    let mut lo = 0usize;
    let mut hi = LEAP_SECONDS.len();
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if LEAP_SECONDS[mid].0 <= day {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    if lo == 0 {
        INITIAL_TAI_MINUS_UTC
    } else {
        LEAP_SECONDS[lo - 1].1
    }
}

/// Iterator over `(unix_day, tai_minus_utc)` for every entry that inserts a
/// leap second at the end of `unix_day - 1`.
fn insertions() -> impl Iterator<Item = (i64, i64)> {
    let mut previous = INITIAL_TAI_MINUS_UTC;
    LEAP_SECONDS.iter().filter_map(move |&(day, value)| {
        let inserted = value > previous;
        previous = value;
        inserted.then_some((day, value))
    })
}

/// Whether the UTC day `unix_day` ends with an inserted leap second.
pub fn ends_with_leap_second(unix_day: i64) -> bool {
    insertions().any(|(day, _)| day == unix_day + 1)
}

/// Classification of a whole TAI second against the leap-second table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TaiSecond {
    /// An ordinary UTC second, carrying its POSIX value.
    Posix(i64),
    /// The inserted second at the end of the UTC day whose following
    /// midnight has the given POSIX value.
    Leap { next_midnight: i64 },
}

/// Map a whole TAI second (counted as in [`Instant`](crate::Instant)) to UTC.
pub(crate) fn classify_tai(tai: i64) -> TaiSecond {
    for (day, value) in insertions() {
        let midnight = day * SECONDS_PER_DAY;
        // The inserted second occupies TAI [midnight + value − 1, midnight + value).
        if tai == midnight + value - 1 {
            return TaiSecond::Leap {
                next_midnight: midnight,
            };
        }
    }
    // Largest offset whose midnight is already reached on the TAI axis.
    let offset = LEAP_SECONDS
        .iter()
        .rev()
        .find(|&&(day, value)| tai >= day * SECONDS_PER_DAY + value)
        .map(|&(_, value)| value)
        .unwrap_or(INITIAL_TAI_MINUS_UTC);
    TaiSecond::Posix(tai - offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY_2017_01_01: i64 = 17_167;

    #[test]
    fn offset_before_table_is_initial() {
        assert_eq!(tai_minus_utc(0), 10);
        assert_eq!(tai_minus_utc(-1_000_000), 10);
    }

    #[test]
    fn offset_after_2017_is_37() {
        // 2020-01-01
        assert_eq!(tai_minus_utc(18_262 * SECONDS_PER_DAY), 37);
        assert_eq!(tai_minus_utc(DAY_2017_01_01 * SECONDS_PER_DAY - 1), 36);
        assert_eq!(tai_minus_utc(DAY_2017_01_01 * SECONDS_PER_DAY), 37);
    }

    #[test]
    fn leap_days_are_detected() {
        assert!(ends_with_leap_second(DAY_2017_01_01 - 1)); // 2016-12-31
        assert!(ends_with_leap_second(16_616)); // 2015-06-30
        assert!(!ends_with_leap_second(729)); // 1971-12-31, offset unchanged
        assert!(!ends_with_leap_second(DAY_2017_01_01));
    }

    #[test]
    fn classify_inverts_offset_around_2016_leap() {
        let midnight = DAY_2017_01_01 * SECONDS_PER_DAY;
        // 23:59:59 on 2016-12-31 still carries 36 s.
        assert_eq!(
            classify_tai(midnight - 1 + 36),
            TaiSecond::Posix(midnight - 1)
        );
        assert_eq!(
            classify_tai(midnight + 36),
            TaiSecond::Leap {
                next_midnight: midnight
            }
        );
        assert_eq!(classify_tai(midnight + 37), TaiSecond::Posix(midnight));
    }

    #[test]
    fn classify_before_table() {
        assert_eq!(classify_tai(10), TaiSecond::Posix(0));
    }
}
