// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! OCB utilities
//!
//! Numeric building blocks for open-closed field-line boundary (OCB)
//! processing in magnetic coordinates.
//!
//! # Time normalisation
//!
//! - [`convert_time`] — canonicalise a [`TimeSpec`] (date + time of day,
//!   year + seconds of year, or `YYDDD` + time/seconds of day) into a
//!   [`Timestamp`].
//! - [`yyddd_to_date`], [`year_soy_to_datetime`] — the calendar arithmetic
//!   behind the dispatcher.
//! - [`get_datetime_fmt_len`] — widest string a datetime format can render.
//!
//! # Local time and angles
//!
//! | Function | Conversion |
//! |----------|------------|
//! | [`deg2hr`] / [`hr2deg`] | degrees ⇄ hours |
//! | [`hr2rad`] / [`rad2hr`] | hours ⇄ radians |
//! | [`datetime2hr`] | timestamp → fractional hour of day |
//! | [`glon2slt`] | geographic longitude → solar local time, `[0, 24)` |
//! | [`slt2glon`] | solar local time → geographic longitude, `(-180, 180]` |
//!
//! # Boundary corrections
//!
//! [`circular`], [`elliptical`] and [`harmonic`] give the radius offset at a
//! magnetic local time; [`CorrectionModel`] selects one by name.
//!
//! Every numeric function accepts a scalar or a sequence through
//! [`Elementwise`] and returns a result of the same shape.
//!
//! # Features
//!
//! - `serde` (default): serde derives on the correction types plus
//!   key/value inputs ([`TimeSpec::from_map`], [`timestamp_from_value`]).

mod convert;
mod correction;
mod elementwise;
mod error;
mod format_len;
#[cfg(feature = "serde")]
mod loose;
mod units;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use convert::{
    convert_time, split_datetime_fmt, year_soy_to_datetime, yyddd_to_date, TimeInput, TimeSpec,
    Timestamp, DEFAULT_DATETIME_FMT, DEFAULT_DATE_FMT, DEFAULT_TIME_FMT,
};
pub use correction::{
    circular, elliptical, elliptical_with, harmonic, harmonic_with, CorrectionConfig,
    CorrectionModel, Instrument, Method,
};
pub use elementwise::Elementwise;
pub use error::{OcbError, OcbResult};
pub use format_len::{get_datetime_fmt_len, MAX_TZ_NAME_LEN};
#[cfg(feature = "serde")]
pub use loose::{datetime2hr_value, timestamp_from_value};
pub use units::{
    datetime2hr, deg2hr, glon2slt, hr2deg, hr2rad, rad2hr, slt2glon, DEGREES_PER_HOUR,
    HOURS_PER_DAY,
};
