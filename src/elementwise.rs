// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Uniform scalar / sequence evaluation.
//!
//! Every conversion and correction function in this crate is written once as
//! a scalar `f64 -> f64` map and lifted over [`Elementwise`] inputs, so a
//! scalar argument yields a scalar and a sequence yields a sequence of the
//! same length.
//!
//! ```
//! use ocb_utils::deg2hr;
//!
//! assert_eq!(deg2hr(90.0), 6.0);
//! assert_eq!(deg2hr([0.0, 180.0]), [0.0, 12.0]);
//! assert_eq!(deg2hr(vec![360.0]), vec![24.0]);
//! ```

/// A value, or a collection of values, that can be mapped element by element.
pub trait Elementwise {
    /// Shape-preserving result type.
    type Output;

    /// Apply `f` to each element.
    fn map_elements<F: Fn(f64) -> f64>(self, f: F) -> Self::Output;
}

impl Elementwise for f64 {
    type Output = f64;

    #[inline]
    fn map_elements<F: Fn(f64) -> f64>(self, f: F) -> f64 {
        f(self)
    }
}

impl<const N: usize> Elementwise for [f64; N] {
    type Output = [f64; N];

    #[inline]
    fn map_elements<F: Fn(f64) -> f64>(self, f: F) -> [f64; N] {
        self.map(f)
    }
}

impl Elementwise for Vec<f64> {
    type Output = Vec<f64>;

    fn map_elements<F: Fn(f64) -> f64>(mut self, f: F) -> Vec<f64> {
        for value in &mut self {
            *value = f(*value);
        }
        self
    }
}

impl Elementwise for &[f64] {
    type Output = Vec<f64>;

    fn map_elements<F: Fn(f64) -> f64>(self, f: F) -> Vec<f64> {
        self.iter().copied().map(f).collect()
    }
}

impl Elementwise for &Vec<f64> {
    type Output = Vec<f64>;

    fn map_elements<F: Fn(f64) -> f64>(self, f: F) -> Vec<f64> {
        self.as_slice().map_elements(f)
    }
}
