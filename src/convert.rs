// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Flexible time normalisation.
//!
//! Boundary data sets stamp their records in several incompatible ways:
//! calendar date plus time of day, year plus seconds of year, or the compact
//! `YYDDD` day code plus either a time of day or seconds of day. A
//! [`TimeSpec`] carries whichever fields a record provides;
//! [`TimeSpec::resolve`] picks exactly one [`TimeInput`] group, and
//! [`convert_time`] turns it into a canonical [`Timestamp`].
//!
//! # Resolution order
//!
//! | Priority | Fields | Variant |
//! |----------|--------|---------|
//! | 1 | `yyddd` + `tod` | [`TimeInput::YydddTod`] |
//! | 2 | `yyddd` + `sod` | [`TimeInput::YydddSod`] |
//! | 3 | `date` + `tod` | [`TimeInput::DateTod`] |
//! | 4 | `date` + `sod` | [`TimeInput::DateSod`] |
//! | 5 | `year` + `soy` | [`TimeInput::YearSoy`] |
//!
//! ```
//! use ocb_utils::{convert_time, TimeSpec};
//!
//! let a = convert_time(&TimeSpec::date_tod("2001-01-01", "06:00:00")).unwrap();
//! let b = convert_time(&TimeSpec::year_soy(2001, 21_600.0)).unwrap();
//! let c = convert_time(&TimeSpec::yyddd_sod("101001", 21_600.0)).unwrap();
//! assert_eq!(a, b);
//! assert_eq!(b, c);
//! ```

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use qtty::{Days, Second, Seconds};
use tracing::debug;

use crate::error::{OcbError, OcbResult};

/// Canonical timestamp produced by every conversion entry point.
///
/// Naive (zone-less) calendar date and time of day with nanosecond
/// resolution.
pub type Timestamp = NaiveDateTime;

/// Combined date/time format used when none is supplied.
pub const DEFAULT_DATETIME_FMT: &str = "%Y-%m-%d %H:%M:%S";

/// Date portion of [`DEFAULT_DATETIME_FMT`].
pub const DEFAULT_DATE_FMT: &str = "%Y-%m-%d";

/// Time portion of [`DEFAULT_DATETIME_FMT`].
pub const DEFAULT_TIME_FMT: &str = "%H:%M:%S";

/// Literal token that stands in for the day code in a datetime format
/// (`"YYDDD %H %M %S"`).
const YYDDD_PLACEHOLDER: &str = "YYDDD";

/// Directive characters that open the time-of-day portion of a format.
const TIME_DIRECTIVES: &[char] = &[
    'H', 'I', 'k', 'l', 'M', 'S', 'T', 'X', 'R', 'r', 'p', 'P', 'f',
];

const UNRESOLVED: &str = "time specification does not match format: expected one of \
     yyddd+tod, yyddd+sod, date+tod, date+sod, or year+soy";

// ═══════════════════════════════════════════════════════════════════════════
// TimeSpec
// ═══════════════════════════════════════════════════════════════════════════

/// Raw, possibly partial, description of an instant.
///
/// Fields are public so a record reader can fill in whatever it finds; the
/// named constructors cover the common single-group cases.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeSpec {
    /// Calendar date text, parsed with the date portion of the format.
    pub date: Option<String>,
    /// Time-of-day text, parsed with the time portion of the format.
    pub tod: Option<String>,
    /// Combined date/time format; [`DEFAULT_DATETIME_FMT`] when absent.
    pub datetime_fmt: Option<String>,
    pub year: Option<i32>,
    /// Seconds of year.
    pub soy: Option<f64>,
    /// Day code `[C]YYDDD`, see [`yyddd_to_date`].
    pub yyddd: Option<String>,
    /// Seconds of day.
    pub sod: Option<f64>,
}

impl TimeSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn date_tod(date: impl Into<String>, tod: impl Into<String>) -> Self {
        Self {
            date: Some(date.into()),
            tod: Some(tod.into()),
            ..Self::default()
        }
    }

    pub fn date_sod(date: impl Into<String>, sod: f64) -> Self {
        Self {
            date: Some(date.into()),
            sod: Some(sod),
            ..Self::default()
        }
    }

    pub fn year_soy(year: i32, soy: f64) -> Self {
        Self {
            year: Some(year),
            soy: Some(soy),
            ..Self::default()
        }
    }

    pub fn yyddd_tod(yyddd: impl Into<String>, tod: impl Into<String>) -> Self {
        Self {
            yyddd: Some(yyddd.into()),
            tod: Some(tod.into()),
            ..Self::default()
        }
    }

    pub fn yyddd_sod(yyddd: impl Into<String>, sod: f64) -> Self {
        Self {
            yyddd: Some(yyddd.into()),
            sod: Some(sod),
            ..Self::default()
        }
    }

    /// Replace the datetime format.
    pub fn with_format(mut self, datetime_fmt: impl Into<String>) -> Self {
        self.datetime_fmt = Some(datetime_fmt.into());
        self
    }

    /// The effective datetime format.
    pub fn format(&self) -> &str {
        self.datetime_fmt.as_deref().unwrap_or(DEFAULT_DATETIME_FMT)
    }

    /// Decide which field group describes the instant.
    ///
    /// The first satisfied group in the module-level priority table wins;
    /// fields belonging to lower-priority groups are ignored.
    pub fn resolve(&self) -> OcbResult<TimeInput<'_>> {
        let tod = self.tod.as_deref();

        if let Some(yyddd) = self.yyddd.as_deref() {
            return match (tod, self.sod) {
                (Some(tod), _) => Ok(TimeInput::YydddTod { yyddd, tod }),
                (None, Some(sod)) => Ok(TimeInput::YydddSod { yyddd, sod }),
                (None, None) => Err(OcbError::invalid_input(UNRESOLVED)),
            };
        }

        if let Some(date) = self.date.as_deref() {
            match (tod, self.sod) {
                (Some(tod), _) => return Ok(TimeInput::DateTod { date, tod }),
                (None, Some(sod)) => return Ok(TimeInput::DateSod { date, sod }),
                (None, None) => {}
            }
        }

        match (self.year, self.soy) {
            (Some(year), Some(soy)) => Ok(TimeInput::YearSoy { year, soy }),
            _ => Err(OcbError::invalid_input(UNRESOLVED)),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// TimeInput
// ═══════════════════════════════════════════════════════════════════════════

/// A single, fully determined input group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimeInput<'a> {
    YydddTod { yyddd: &'a str, tod: &'a str },
    YydddSod { yyddd: &'a str, sod: f64 },
    DateTod { date: &'a str, tod: &'a str },
    DateSod { date: &'a str, sod: f64 },
    YearSoy { year: i32, soy: f64 },
}

impl TimeInput<'_> {
    /// Short label for diagnostics.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::YydddTod { .. } => "yyddd+tod",
            Self::YydddSod { .. } => "yyddd+sod",
            Self::DateTod { .. } => "date+tod",
            Self::DateSod { .. } => "date+sod",
            Self::YearSoy { .. } => "year+soy",
        }
    }

    /// Build the timestamp, reading text fields with `datetime_fmt`.
    pub fn to_timestamp(&self, datetime_fmt: &str) -> OcbResult<Timestamp> {
        let (date_fmt, time_fmt) = split_datetime_fmt(datetime_fmt);
        match *self {
            Self::YydddTod { yyddd, tod } => {
                let midnight = yyddd_to_date(yyddd)?;
                Ok(midnight.date().and_time(parse_time_of_day(tod, time_fmt)?))
            }
            Self::YydddSod { yyddd, sod } => add_seconds_of_day(yyddd_to_date(yyddd)?, sod),
            Self::DateTod { date, tod } => {
                let day = parse_date(date, date_fmt)?;
                Ok(day.and_time(parse_time_of_day(tod, time_fmt)?))
            }
            Self::DateSod { date, sod } => {
                add_seconds_of_day(parse_date(date, date_fmt)?.and_time(NaiveTime::MIN), sod)
            }
            Self::YearSoy { year, soy } => year_soy_to_datetime(year, soy),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Entry points
// ═══════════════════════════════════════════════════════════════════════════

/// Normalise any supported time description to a [`Timestamp`].
///
/// Equivalent descriptions of one instant through different groups produce
/// identical timestamps.
pub fn convert_time(spec: &TimeSpec) -> OcbResult<Timestamp> {
    let input = spec.resolve()?;
    debug!(
        kind = input.kind(),
        datetime_fmt = spec.format(),
        "resolved time input"
    );
    input.to_timestamp(spec.format())
}

/// Midnight of the day encoded by a `[C]YYDDD` day code.
///
/// All digits before the final three count years since 1900, so a leading
/// century digit selects the 2000s: `"01001"` is 1901-01-01 while
/// `"101001"` is 2001-01-01. The final three digits are the ordinal day.
pub fn yyddd_to_date(yyddd: &str) -> OcbResult<Timestamp> {
    if !(5..=6).contains(&yyddd.len()) || !yyddd.bytes().all(|b| b.is_ascii_digit()) {
        return Err(OcbError::invalid_input(format!(
            "YYDDD '{yyddd}' must be 5 or 6 digits"
        )));
    }

    let (yy, ddd) = yyddd.split_at(yyddd.len() - 3);
    let years_since_1900: i32 = yy
        .parse()
        .map_err(|err| OcbError::invalid_input(format!("YYDDD '{yyddd}': {err}")))?;
    let ordinal: u32 = ddd
        .parse()
        .map_err(|err| OcbError::invalid_input(format!("YYDDD '{yyddd}': {err}")))?;

    let year = 1900 + years_since_1900;
    NaiveDate::from_yo_opt(year, ordinal)
        .map(|date| date.and_time(NaiveTime::MIN))
        .ok_or_else(|| {
            OcbError::invalid_input(format!("day {ordinal} does not exist in year {year}"))
        })
}

/// January 1st 00:00 of `year` advanced by `soy` seconds.
///
/// `soy` must be finite and shorter than the year.
pub fn year_soy_to_datetime(year: i32, soy: f64) -> OcbResult<Timestamp> {
    let jan1 = NaiveDate::from_ymd_opt(year, 1, 1)
        .ok_or_else(|| OcbError::invalid_input(format!("year {year} is out of range")))?;
    let days_in_year = if NaiveDate::from_yo_opt(year, 366).is_some() {
        366.0
    } else {
        365.0
    };
    let year_length = Days::new(days_in_year).to::<Second>();

    if !within_span(soy, year_length) {
        return Err(OcbError::invalid_input(format!(
            "seconds of year {soy} does not match format for {year}: \
             expected 0 <= soy < {}",
            year_length.value()
        )));
    }
    offset_by_seconds(jan1.and_time(NaiveTime::MIN), soy)
}

/// Split a combined datetime format into `(date_fmt, time_fmt)`.
///
/// The split happens at the first time-of-day directive. A leading `YYDDD`
/// placeholder is dropped from the date portion, and an empty portion falls
/// back to [`DEFAULT_DATE_FMT`] / [`DEFAULT_TIME_FMT`].
///
/// ```
/// use ocb_utils::split_datetime_fmt;
///
/// assert_eq!(split_datetime_fmt("%Y-%m-%d %H:%M:%S"), ("%Y-%m-%d", "%H:%M:%S"));
/// assert_eq!(split_datetime_fmt("YYDDD %H %M %S"), ("%Y-%m-%d", "%H %M %S"));
/// assert_eq!(split_datetime_fmt("%H%M%S"), ("%Y-%m-%d", "%H%M%S"));
/// ```
pub fn split_datetime_fmt(datetime_fmt: &str) -> (&str, &str) {
    let split = time_directive_offset(datetime_fmt).unwrap_or(datetime_fmt.len());
    let (head, tail) = datetime_fmt.split_at(split);

    let head = head.trim();
    let head = head.strip_prefix(YYDDD_PLACEHOLDER).unwrap_or(head).trim();
    let tail = tail.trim();

    (
        if head.is_empty() {
            DEFAULT_DATE_FMT
        } else {
            head
        },
        if tail.is_empty() {
            DEFAULT_TIME_FMT
        } else {
            tail
        },
    )
}

// ═══════════════════════════════════════════════════════════════════════════
// Helpers
// ═══════════════════════════════════════════════════════════════════════════

/// Byte offset of the first `%` directive that belongs to the time of day.
fn time_directive_offset(fmt: &str) -> Option<usize> {
    let mut chars = fmt.char_indices().peekable();
    while let Some((idx, c)) = chars.next() {
        if c != '%' {
            continue;
        }
        let mut spec = chars.next().map(|(_, c)| c);
        // padding flags and the `%.f` family prefix the directive character
        while let Some('-' | '_' | '0' | '.' | '3' | '6' | '9') = spec {
            spec = chars.next().map(|(_, c)| c);
        }
        match spec {
            Some(c) if TIME_DIRECTIVES.contains(&c) => return Some(idx),
            _ => {}
        }
    }
    None
}

fn parse_date(date: &str, date_fmt: &str) -> OcbResult<NaiveDate> {
    NaiveDate::parse_from_str(date, date_fmt)
        .map_err(|err| OcbError::format_mismatch(date, date_fmt, err))
}

/// Parse a time of day, discarding a trailing `.ddd` fraction the format
/// does not consume.
fn parse_time_of_day(tod: &str, time_fmt: &str) -> OcbResult<NaiveTime> {
    match NaiveTime::parse_from_str(tod, time_fmt) {
        Ok(time) => Ok(time),
        Err(err) => match strip_fractional_seconds(tod) {
            Some(whole) => NaiveTime::parse_from_str(whole, time_fmt)
                .map_err(|_| OcbError::format_mismatch(tod, time_fmt, err)),
            None => Err(OcbError::format_mismatch(tod, time_fmt, err)),
        },
    }
}

fn strip_fractional_seconds(tod: &str) -> Option<&str> {
    let (whole, frac) = tod.rsplit_once('.')?;
    (!frac.is_empty() && frac.bytes().all(|b| b.is_ascii_digit())).then_some(whole)
}

fn add_seconds_of_day(midnight: Timestamp, sod: f64) -> OcbResult<Timestamp> {
    let day_length = Days::new(1.0).to::<Second>();
    if !within_span(sod, day_length) {
        return Err(OcbError::invalid_input(format!(
            "seconds of day {sod} does not match format: expected 0 <= sod < {}",
            day_length.value()
        )));
    }
    offset_by_seconds(midnight, sod)
}

fn within_span(seconds: f64, span: Seconds) -> bool {
    seconds.is_finite() && seconds >= 0.0 && Seconds::new(seconds) < span
}

/// Advance `start` by a non-negative, finite number of seconds, keeping the
/// fraction to the nearest nanosecond.
fn offset_by_seconds(start: Timestamp, seconds: f64) -> OcbResult<Timestamp> {
    let whole = seconds.trunc();
    let nanos = ((seconds - whole) * 1e9).round() as i64;
    let delta = TimeDelta::seconds(whole as i64) + TimeDelta::nanoseconds(nanos);
    start
        .checked_add_signed(delta)
        .ok_or_else(|| OcbError::invalid_input(format!("{start} + {seconds} s is out of range")))
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
