// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! ISO-8601 / RFC-3339 parsing.
//!
//! Accepted grammar (case-insensitive `T`/`Z`, `.` or `,` before the
//! fraction, basic or extended forms for date, time and offset):
//!
//! ```text
//! [+-]YYYY[-]MM[-]DD(T| )hh[:]mm[:]ss[(.|,)f+][Z | (+|-)hh[:]mm[[:]ss]]
//! ```
//!
//! Field values are only checked for shape here; calendar validity is
//! enforced by the constructors, so `2015-02-30T00:00:00Z` is an
//! [`InvalidDate`](CivilError::InvalidDate), not an
//! [`InvalidFormat`](CivilError::InvalidFormat).

use crate::calendar::Date;
use crate::civil::CivilInstant;
use crate::error::{CivilError, CivilResult};
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use tracing::debug;

lazy_static! {
    static ref DATE_TIME: Regex = Regex::new(
        r"(?x)^
        (?P<year>[+-]?[0-9]{4,}) -? (?P<month>[0-9]{2}) -? (?P<day>[0-9]{2})
        [Tt\x20]
        (?P<hour>[0-9]{2}) :? (?P<minute>[0-9]{2}) :? (?P<second>[0-9]{2}(?:[.,][0-9]+)?)
        (?P<offset>
            [Zz]
            | (?P<sign>[+-]) (?P<oh>[0-9]{2}) :? (?P<om>[0-9]{2}) (?: :? (?P<os>[0-9]{2}) )?
        )?
        $"
    )
    .expect("date-time pattern is valid");
    static ref DATE: Regex =
        Regex::new(r"^(?P<year>[+-]?[0-9]{4,})-?(?P<month>[0-9]{2})-?(?P<day>[0-9]{2})$")
            .expect("date pattern is valid");
}

fn invalid(input: &str) -> CivilError {
    debug!(input, "rejected malformed date-time");
    CivilError::InvalidFormat(input.to_owned())
}

fn field<T: std::str::FromStr>(caps: &Captures<'_>, name: &str, input: &str) -> CivilResult<T> {
    caps.name(name)
        .and_then(|m| m.as_str().parse().ok())
        .ok_or_else(|| invalid(input))
}

/// Offset in seconds from the captured `(+|-)hh[:]mm[[:]ss]` groups.
fn offset_seconds(caps: &Captures<'_>, input: &str) -> CivilResult<Option<i32>> {
    let Some(offset) = caps.name("offset") else {
        return Ok(None);
    };
    if offset.as_str().eq_ignore_ascii_case("z") {
        return Ok(Some(0));
    }
    let hours: i32 = field(caps, "oh", input)?;
    let minutes: i32 = field(caps, "om", input)?;
    let seconds: i32 = match caps.name("os") {
        Some(_) => field(caps, "os", input)?,
        None => 0,
    };
    if hours > 23 || minutes > 59 || seconds > 59 {
        return Err(invalid(input));
    }
    let magnitude = hours * 3_600 + minutes * 60 + seconds;
    Ok(Some(match caps.name("sign").map(|m| m.as_str()) {
        Some("-") => -magnitude,
        _ => magnitude,
    }))
}

/// Parse a date-time string.
///
/// `offset` supplies the offset when the string carries none; supplying it
/// for a string that does carry one is a
/// [`TimezoneClash`](CivilError::TimezoneClash). With neither, UTC is used.
pub fn parse_civil(input: &str, offset: Option<i32>) -> CivilResult<CivilInstant> {
    let caps = DATE_TIME.captures(input).ok_or_else(|| invalid(input))?;
    let parsed_offset = offset_seconds(&caps, input)?;
    let offset = match (parsed_offset, offset) {
        (Some(_), Some(explicit)) => {
            debug!(input, explicit, "offset given twice");
            return Err(CivilError::TimezoneClash {
                input: input.to_owned(),
                offset: explicit,
            });
        }
        (Some(parsed), None) => parsed,
        (None, explicit) => explicit.unwrap_or(0),
    };

    let second = caps
        .name("second")
        .map(|m| m.as_str().replace(',', "."))
        .and_then(|s| s.parse::<f64>().ok())
        .ok_or_else(|| invalid(input))?;

    CivilInstant::builder(field(&caps, "year", input)?)
        .month(field(&caps, "month", input)?)
        .day(field(&caps, "day", input)?)
        .hour(field(&caps, "hour", input)?)
        .minute(field(&caps, "minute", input)?)
        .second(second)
        .offset(offset)
        .build()
}

/// Parse a date-only `YYYY-MM-DD` string.
pub fn parse_date(input: &str) -> CivilResult<Date> {
    let caps = DATE.captures(input).ok_or_else(|| invalid(input))?;
    Date::new(
        field(&caps, "year", input)?,
        field(&caps, "month", input)?,
        field(&caps, "day", input)?,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_condensed_offset() {
        let t = parse_civil("2015-01-01T03:17:30+0500", None).unwrap();
        assert_eq!(t.offset(), 18_000);
        assert_eq!(t.hour(), 3);
        assert_eq!(t.minute(), 17);
        assert_eq!(t.second(), 30.0);
    }

    #[test]
    fn parses_extended_and_negative_offsets() {
        assert_eq!(parse_civil("2015-01-01T03:17:30-05:30", None).unwrap().offset(), -19_800);
        assert_eq!(parse_civil("2015-01-01T03:17:30+01:00:30", None).unwrap().offset(), 3_630);
        assert_eq!(parse_civil("2015-01-01t03:17:30z", None).unwrap().offset(), 0);
    }

    #[test]
    fn parses_fraction_with_either_separator() {
        let dot = parse_civil("2015-01-01T03:17:30.25Z", None).unwrap();
        let comma = parse_civil("2015-01-01T03:17:30,25Z", None).unwrap();
        assert_eq!(dot.second(), 30.25);
        assert_eq!(dot, comma);
    }

    #[test]
    fn parses_basic_forms_and_space_separator() {
        let basic = parse_civil("20150101T031730Z", None).unwrap();
        let extended = parse_civil("2015-01-01 03:17:30Z", None).unwrap();
        assert_eq!(basic, extended);
        assert_eq!(basic.year(), 2015);
    }

    #[test]
    fn missing_offset_uses_argument_or_utc() {
        assert_eq!(parse_civil("2015-01-01T00:00:00", None).unwrap().offset(), 0);
        assert_eq!(parse_civil("2015-01-01T00:00:00", Some(-3_600)).unwrap().offset(), -3_600);
    }

    #[test]
    fn offset_clash_is_rejected() {
        assert!(matches!(
            parse_civil("2015-01-01T00:00:00+0100", Some(3_600)),
            Err(CivilError::TimezoneClash { offset: 3_600, .. })
        ));
        assert!(matches!(
            parse_civil("2015-01-01T00:00:00Z", Some(0)),
            Err(CivilError::TimezoneClash { .. })
        ));
    }

    #[test]
    fn malformed_inputs() {
        for input in [
            "",
            "2015-01-01",
            "2015-1-01T00:00:00Z",
            "2015-01-01T00:00Z",
            "2015-01-01T00:00:00+2400",
            "2015-01-01T00:00:00+0160",
            "2015-01-01T00:00:00.Z",
            "2015-01-01X00:00:00Z",
            "2015-01-01T00:00:00Z trailing",
        ] {
            assert!(
                matches!(parse_civil(input, None), Err(CivilError::InvalidFormat(_))),
                "{input:?} should be malformed"
            );
        }
    }

    #[test]
    fn well_formed_but_impossible_dates() {
        assert!(matches!(
            parse_civil("2015-02-29T00:00:00Z", None),
            Err(CivilError::InvalidDate(_))
        ));
        assert!(matches!(
            parse_civil("2015-01-01T24:00:00Z", None),
            Err(CivilError::InvalidDate(_))
        ));
    }

    #[test]
    fn extended_years() {
        assert_eq!(parse_civil("-0044-03-15T12:00:00Z", None).unwrap().year(), -44);
        assert_eq!(parse_civil("+12345-01-01T00:00:00Z", None).unwrap().year(), 12_345);
    }

    #[test]
    fn date_only() {
        assert_eq!(parse_date("2012-02-29").unwrap(), Date::new(2012, 2, 29).unwrap());
        assert!(parse_date("2013-02-29").is_err());
        assert!(parse_date("2013-02").is_err());
    }
}
