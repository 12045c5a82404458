// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Key/value time inputs.
//!
//! Record readers often hand over untyped fields (a JSON object, a parsed
//! header). This module validates such values into the typed API:
//! [`TimeSpec::from_map`] for the conversion dispatcher and
//! [`timestamp_from_value`] wherever a timestamp is required.
//!
//! ```
//! use ocb_utils::{convert_time, TimeSpec};
//! use serde_json::json;
//!
//! let fields = json!({"yyddd": "101001", "sod": 0.0, "date": null});
//! let spec = TimeSpec::from_map(fields.as_object().unwrap()).unwrap();
//! assert_eq!(convert_time(&spec).unwrap().to_string(), "2001-01-01 00:00:00");
//!
//! let bad = json!({"yyddd": 101001});
//! assert!(TimeSpec::from_map(bad.as_object().unwrap()).is_err());
//! ```

use serde_json::{Map, Value};

use crate::convert::{TimeSpec, Timestamp};
use crate::error::{OcbError, OcbResult};
use crate::units::datetime2hr;

impl TimeSpec {
    /// Build a [`TimeSpec`] from loosely typed fields.
    ///
    /// Recognised keys: `date`, `tod`, `datetime_fmt`, `year`, `soy`,
    /// `yyddd`, `sod`. `null` is treated as absent. Mistyped values and
    /// unknown keys fail with [`OcbError::InvalidInput`].
    pub fn from_map(fields: &Map<String, Value>) -> OcbResult<Self> {
        let mut spec = Self::default();
        for (key, value) in fields {
            if value.is_null() {
                continue;
            }
            match key.as_str() {
                "yyddd" => {
                    let yyddd = value
                        .as_str()
                        .ok_or_else(|| OcbError::invalid_input("YYDDD must be a string"))?;
                    spec.yyddd = Some(yyddd.to_owned());
                }
                "date" => spec.date = Some(string_field(key, value)?),
                "tod" => spec.tod = Some(string_field(key, value)?),
                "datetime_fmt" => spec.datetime_fmt = Some(string_field(key, value)?),
                "year" => {
                    let year = value
                        .as_i64()
                        .and_then(|y| i32::try_from(y).ok())
                        .ok_or_else(|| mistyped(key, "an integer year", value))?;
                    spec.year = Some(year);
                }
                "soy" => spec.soy = Some(number_field(key, value)?),
                "sod" => spec.sod = Some(number_field(key, value)?),
                _ => {
                    return Err(OcbError::invalid_input(format!(
                        "unexpected time field '{key}'"
                    )));
                }
            }
        }
        Ok(spec)
    }
}

impl TryFrom<&Value> for TimeSpec {
    type Error = OcbError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        let fields = value
            .as_object()
            .ok_or_else(|| mistyped("time specification", "an object", value))?;
        Self::from_map(fields)
    }
}

/// Interpret a loosely typed value as a timestamp.
///
/// Only ISO-8601 text (`2001-01-01T01:01:01.000001` or with a space
/// separator) carries calendar components; any other value fails with
/// [`OcbError::TypeAttribute`].
pub fn timestamp_from_value(value: &Value) -> OcbResult<Timestamp> {
    let text = value.as_str().ok_or_else(|| {
        OcbError::type_attribute(format!(
            "{} value {value} has no attribute 'hour'",
            value_kind(value)
        ))
    })?;
    text.parse::<Timestamp>()
        .or_else(|_| Timestamp::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f"))
        .map_err(|err| OcbError::format_mismatch(text, "%Y-%m-%dT%H:%M:%S%.f", err))
}

/// [`datetime2hr`] over a loosely typed value.
pub fn datetime2hr_value(value: &Value) -> OcbResult<f64> {
    timestamp_from_value(value).map(|dtime| datetime2hr(&dtime))
}

fn string_field(key: &str, value: &Value) -> OcbResult<String> {
    value
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| mistyped(key, "a string", value))
}

fn number_field(key: &str, value: &Value) -> OcbResult<f64> {
    value
        .as_f64()
        .ok_or_else(|| mistyped(key, "a number", value))
}

fn mistyped(key: &str, expected: &str, value: &Value) -> OcbError {
    OcbError::invalid_input(format!(
        "{key} must be {expected}, got {} {value}",
        value_kind(value)
    ))
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "str",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
