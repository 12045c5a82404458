// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Angle / time-of-day unit conversions.
//!
//! The three angular representations share the fixed ratio
//! **24 h = 360° = 2π rad**. The linear conversions ([`deg2hr`], [`hr2deg`],
//! [`hr2rad`], [`rad2hr`]) never normalise their input; only the local-time
//! helpers ([`glon2slt`], [`slt2glon`]) wrap into a canonical interval.
//!
//! All functions accept any [`Elementwise`] input and return a value of the
//! same shape.

use chrono::Timelike;
use std::f64::consts::PI;

use crate::elementwise::Elementwise;

/// Degrees of rotation per hour of local time.
pub const DEGREES_PER_HOUR: f64 = 15.0;

/// Hours in one day; the period of local time.
pub const HOURS_PER_DAY: f64 = 24.0;

const SECONDS_PER_HOUR: f64 = 3_600.0;
const NANOS_PER_HOUR: f64 = 3.6e12;

// ═══════════════════════════════════════════════════════════════════════════
// Linear conversions
// ═══════════════════════════════════════════════════════════════════════════

/// Degrees → hours.
#[inline]
pub fn deg2hr<V: Elementwise>(degrees: V) -> V::Output {
    degrees.map_elements(|deg| deg / DEGREES_PER_HOUR)
}

/// Hours → degrees.
#[inline]
pub fn hr2deg<V: Elementwise>(hours: V) -> V::Output {
    hours.map_elements(|hr| hr * DEGREES_PER_HOUR)
}

/// Hours → radians.
#[inline]
pub fn hr2rad<V: Elementwise>(hours: V) -> V::Output {
    hours.map_elements(|hr| hr * PI / 12.0)
}

/// Radians → hours.
#[inline]
pub fn rad2hr<V: Elementwise>(radians: V) -> V::Output {
    radians.map_elements(|rad| rad * 12.0 / PI)
}

// ═══════════════════════════════════════════════════════════════════════════
// Time of day
// ═══════════════════════════════════════════════════════════════════════════

/// Fractional hour of the day carried by any chrono value with clock
/// components (`NaiveDateTime`, `NaiveTime`, `DateTime<Tz>`).
///
/// Computed as `hour + minute/60 + second/3600 + fraction/3600`, where the
/// sub-second fraction keeps chrono's nanosecond resolution. A leap second
/// (nanosecond ≥ 1e9) is folded into the last second of the minute.
pub fn datetime2hr<T: Timelike + ?Sized>(dtime: &T) -> f64 {
    let nanos = dtime.nanosecond() % 1_000_000_000;
    f64::from(dtime.hour())
        + f64::from(dtime.minute()) / 60.0
        + f64::from(dtime.second()) / SECONDS_PER_HOUR
        + f64::from(nanos) / NANOS_PER_HOUR
}

/// Geographic longitude (degrees) → solar local time (hours) at `dtime`.
///
/// The result lies in `[0, 24)` regardless of how many turns the longitude
/// spans.
pub fn glon2slt<V, T>(glon: V, dtime: &T) -> V::Output
where
    V: Elementwise,
    T: Timelike + ?Sized,
{
    let uth = datetime2hr(dtime);
    glon.map_elements(|lon| wrap_local_time(uth + lon / DEGREES_PER_HOUR))
}

/// Solar local time (hours) → geographic longitude (degrees) at `dtime`.
///
/// The result lies in `(-180, 180]`.
pub fn slt2glon<V, T>(slt: V, dtime: &T) -> V::Output
where
    V: Elementwise,
    T: Timelike + ?Sized,
{
    let uth = datetime2hr(dtime);
    slt.map_elements(|lt| wrap_longitude((lt - uth) * DEGREES_PER_HOUR))
}

/// Wrap hours into `[0, 24)`.
fn wrap_local_time(hours: f64) -> f64 {
    let wrapped = hours.rem_euclid(HOURS_PER_DAY);
    // rem_euclid rounds tiny negative inputs up to exactly 24.0
    if wrapped >= HOURS_PER_DAY {
        wrapped - HOURS_PER_DAY
    } else {
        wrapped
    }
}

/// Wrap degrees into `(-180, 180]`.
fn wrap_longitude(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

    const EPS: f64 = 1e-7;

    fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
        let step = (end - start) / (n - 1) as f64;
        (0..n).map(|i| start + step * i as f64).collect()
    }

    fn dtime(h: u32, m: u32, s: u32, micro: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2001, 1, 1)
            .unwrap()
            .and_hms_micro_opt(h, m, s, micro)
            .unwrap()
    }

    #[test]
    fn deg2hr_array_and_value() {
        let lon = linspace(0.0, 360.0, 37);
        let lt = linspace(0.0, 24.0, 37);
        let out = deg2hr(&lon);
        assert_eq!(out.len(), lt.len());
        for (o, e) in out.iter().zip(&lt) {
            assert!((o - e).abs() < EPS);
        }
        assert_eq!(deg2hr(0.0), 0.0);
        assert_eq!(deg2hr(360.0), 24.0);
    }

    #[test]
    fn hr2deg_array_and_value() {
        let lon = linspace(0.0, 360.0, 37);
        let lt = linspace(0.0, 24.0, 37);
        let out = hr2deg(lt.as_slice());
        for (o, e) in out.iter().zip(&lon) {
            assert!((o - e).abs() < EPS);
        }
        assert_eq!(hr2deg(0.0), 0.0);
    }

    #[test]
    fn hr2rad_and_rad2hr_match_radians() {
        let lon = linspace(0.0, 360.0, 37);
        let lt = linspace(0.0, 24.0, 37);
        let rad = hr2rad(&lt);
        for (r, deg) in rad.iter().zip(&lon) {
            assert!((r - deg.to_radians()).abs() < EPS);
        }
        let back = rad2hr(rad);
        for (b, e) in back.iter().zip(&lt) {
            assert!((b - e).abs() < 1e-12);
        }
        assert_eq!(hr2rad(0.0), 0.0);
        assert_eq!(rad2hr(0.0), 0.0);
    }

    #[test]
    fn deg_hr_round_trip() {
        // inverse up to rounding, not bit-for-bit
        for x in linspace(0.0, 359.9, 200) {
            assert!((hr2deg(deg2hr(x)) - x).abs() < 1e-12);
        }
        for x in linspace(0.0, 24.0, 241) {
            assert!((rad2hr(hr2rad(x)) - x).abs() < 1e-12);
        }
    }

    #[test]
    fn linear_conversions_do_not_normalise() {
        assert_eq!(deg2hr(-90.0), -6.0);
        assert_eq!(hr2deg(36.0), 540.0);
    }

    #[test]
    fn datetime2hr_midnight_is_zero() {
        assert_eq!(datetime2hr(&dtime(0, 0, 0, 0)), 0.0);
    }

    #[test]
    fn datetime2hr_all_fractions() {
        let hr = datetime2hr(&dtime(1, 1, 1, 1));
        assert!((hr - 1.01694444472).abs() < EPS);
    }

    #[test]
    fn datetime2hr_accepts_naive_time() {
        let t = NaiveTime::from_hms_opt(18, 30, 0).unwrap();
        assert_eq!(datetime2hr(&t), 18.5);
    }

    const LON: [f64; 5] = [390.0, 359.0, 90.0, -15.0, -30.0];
    const LT: [f64; 5] = [27.0, 0.933_333_333_333_333_6, 7.0, 0.0, -1.0];

    #[test]
    fn glon2slt_wraps_into_day() {
        let t = dtime(1, 0, 0, 0);
        let expected = LT.map(|lt| {
            if lt >= 24.0 {
                lt - 24.0
            } else if lt < 0.0 {
                lt + 24.0
            } else {
                lt
            }
        });
        for (lon, e) in LON.iter().zip(&expected) {
            assert!((glon2slt(*lon, &t) - e).abs() < EPS, "lon {lon}");
        }
        let out = glon2slt(LON, &t);
        for (o, e) in out.iter().zip(&expected) {
            assert!((o - e).abs() < EPS);
        }
        let out = glon2slt(LON.to_vec(), &t);
        assert_eq!(out.len(), LON.len());
    }

    #[test]
    fn glon2slt_handles_multiple_turns() {
        let t = dtime(1, 0, 0, 0);
        assert!((glon2slt(390.0, &t) - glon2slt(30.0, &t)).abs() < 1e-12);
        assert!((glon2slt(30.0 + 360.0 * 5.0, &t) - glon2slt(30.0, &t)).abs() < 1e-9);
        assert!((glon2slt(30.0 - 360.0 * 3.0, &t) - glon2slt(30.0, &t)).abs() < 1e-9);
        for lon in linspace(-1000.0, 1000.0, 101) {
            let slt = glon2slt(lon, &t);
            assert!((0.0..24.0).contains(&slt), "{lon} -> {slt}");
        }
    }

    #[test]
    fn slt2glon_wraps_into_half_open_range() {
        let t = dtime(1, 0, 0, 0);
        let expected = LON.map(|lon| {
            if lon > 180.0 {
                lon - 360.0
            } else if lon <= -180.0 {
                lon + 360.0
            } else {
                lon
            }
        });
        for (lt, e) in LT.iter().zip(&expected) {
            assert!((slt2glon(*lt, &t) - e).abs() < EPS, "lt {lt}");
        }
        let out = slt2glon(LT.to_vec(), &t);
        for (o, e) in out.iter().zip(&expected) {
            assert!((o - e).abs() < EPS);
        }
        for lt in linspace(-50.0, 50.0, 101) {
            let lon = slt2glon(lt, &t);
            assert!(lon > -180.0 && lon <= 180.0, "{lt} -> {lon}");
        }
    }

    #[test]
    fn slt2glon_boundary_maps_to_positive_180() {
        let t = dtime(0, 0, 0, 0);
        assert_eq!(slt2glon(12.0, &t), 180.0);
        assert_eq!(slt2glon(-12.0, &t), 180.0);
    }

    #[test]
    fn wrap_local_time_never_returns_24() {
        assert_eq!(wrap_local_time(-1e-17), 0.0);
        assert_eq!(wrap_local_time(24.0), 0.0);
        assert_eq!(wrap_local_time(48.5), 0.5);
    }
}
