// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Open-closed boundary radius corrections.
//!
//! A boundary measured by a given instrument is systematically displaced from
//! the true OCB by an amount that depends on magnetic local time. Each model
//! returns that displacement in degrees of latitude; adding it to the
//! measured radius gives the corrected radius.
//!
//! | Model | Shape | Coefficients |
//! |-------|-------|--------------|
//! | [`circular`] | constant `r_add` | none |
//! | [`elliptical`] | conic section `a(1 − e²) / (1 − e·cos(θ − t))` | per [`Instrument`] × [`Method`] |
//! | [`harmonic`] | third-order phase-shifted Fourier series | per [`Instrument`] × [`Method`] |
//!
//! Both fitted models are poleward shifts, so their results are negative.
//!
//! ```
//! use ocb_utils::{elliptical, harmonic};
//!
//! let e = elliptical(0.0, "ampere", "default").unwrap();
//! let h = harmonic([0.0, 12.0], "ampere", "gaussian").unwrap();
//! assert!(e < 0.0);
//! assert_eq!(h.len(), 2);
//! ```

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::elementwise::Elementwise;
use crate::error::{OcbError, OcbResult};
use crate::units::hr2rad;

// ═══════════════════════════════════════════════════════════════════════════
// Closed sets
// ═══════════════════════════════════════════════════════════════════════════

/// Data set whose boundary is being corrected.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Instrument {
    /// AMPERE field-aligned current boundaries.
    #[default]
    Ampere,
}

impl Instrument {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ampere => "ampere",
        }
    }
}

impl FromStr for Instrument {
    type Err = OcbError;

    /// Case-insensitive; `"default"` selects [`Instrument::default`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ampere" | "default" => Ok(Self::Ampere),
            _ => Err(OcbError::invalid_input(format!(
                "no correction available for instrument '{s}'"
            ))),
        }
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Statistic used to derive a coefficient table.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Method {
    /// Median offsets between the instrument boundary and the OCB.
    #[default]
    Default,
    /// Gaussian-fitted offsets.
    Gaussian,
}

impl Method {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Gaussian => "gaussian",
        }
    }
}

impl FromStr for Method {
    type Err = OcbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "default" => Ok(Self::Default),
            "gaussian" => Ok(Self::Gaussian),
            _ => Err(OcbError::invalid_input(format!(
                "unknown coefficient computation method '{s}'"
            ))),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Coefficient tables
// ═══════════════════════════════════════════════════════════════════════════

/// Conic-section fit: semi-major axis `a` (degrees), eccentricity `e` and
/// orientation `t` (radians).
#[derive(Debug, Copy, Clone, PartialEq)]
struct EllipseFit {
    a: f64,
    e: f64,
    t: f64,
}

impl EllipseFit {
    const fn lookup(instrument: Instrument, method: Method) -> Self {
        match (instrument, method) {
            (Instrument::Ampere, Method::Default) => Self {
                a: 4.01,
                e: 0.55,
                t: -0.92,
            },
            (Instrument::Ampere, Method::Gaussian) => Self {
                a: 4.41,
                e: 0.51,
                t: -0.95,
            },
        }
    }

    #[inline]
    fn eval(&self, theta: f64) -> f64 {
        -self.a * (1.0 - self.e * self.e) / (1.0 - self.e * (theta - self.t).cos())
    }
}

/// Third-order series `c0 + Σₙ [Aₙ cos n(θ + φₙ) + Bₙ sin n(θ + ψₙ)]`.
#[derive(Debug, Copy, Clone, PartialEq)]
struct HarmonicFit {
    offset: f64,
    /// `(Aₙ, φₙ, Bₙ, ψₙ)` for n = 1, 2, 3.
    terms: [(f64, f64, f64, f64); 3],
}

impl HarmonicFit {
    const fn lookup(instrument: Instrument, method: Method) -> Self {
        match (instrument, method) {
            (Instrument::Ampere, Method::Default) => Self {
                offset: 3.31000535,
                terms: [
                    (-0.5452934, -1.24389141, 2.42619653, -0.66677988),
                    (-1.03467488, -0.30763009, 0.52426756, 0.04359299),
                    (0.60201848, 0.50618522, 1.04360529, 0.25186405),
                ],
            },
            (Instrument::Ampere, Method::Gaussian) => Self {
                offset: 3.80100827,
                terms: [
                    (0.98555723, -3.43760943, 1.85084271, -0.36730751),
                    (-0.81975654, -1.02823832, 1.30637288, -0.53599218),
                    (0.40380183, -1.22462708, -1.2733629, -0.62743381),
                ],
            },
        }
    }

    #[inline]
    fn eval(&self, theta: f64) -> f64 {
        let mut r = self.offset;
        for (n, &(cos_amp, cos_phase, sin_amp, sin_phase)) in self.terms.iter().enumerate() {
            let order = (n + 1) as f64;
            r += cos_amp * (order * (theta + cos_phase)).cos()
                + sin_amp * (order * (theta + sin_phase)).sin();
        }
        -r
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Correction functions
// ═══════════════════════════════════════════════════════════════════════════

/// No location-dependent correction: every local time maps to `r_add`.
pub fn circular<V: Elementwise>(mlt: V, r_add: f64) -> V::Output {
    mlt.map_elements(|_| r_add)
}

/// Elliptical correction for the named instrument and method.
///
/// Fails with [`OcbError::InvalidInput`] if either name is unknown.
pub fn elliptical<V: Elementwise>(mlt: V, instrument: &str, method: &str) -> OcbResult<V::Output> {
    Ok(elliptical_with(mlt, instrument.parse()?, method.parse()?))
}

/// Elliptical correction with an already validated selection.
pub fn elliptical_with<V: Elementwise>(
    mlt: V,
    instrument: Instrument,
    method: Method,
) -> V::Output {
    let fit = EllipseFit::lookup(instrument, method);
    mlt.map_elements(|lt| fit.eval(hr2rad(lt)))
}

/// Harmonic correction for the named instrument and method.
///
/// Fails with [`OcbError::InvalidInput`] if either name is unknown.
pub fn harmonic<V: Elementwise>(mlt: V, instrument: &str, method: &str) -> OcbResult<V::Output> {
    Ok(harmonic_with(mlt, instrument.parse()?, method.parse()?))
}

/// Harmonic correction with an already validated selection.
pub fn harmonic_with<V: Elementwise>(mlt: V, instrument: Instrument, method: Method) -> V::Output {
    let fit = HarmonicFit::lookup(instrument, method);
    mlt.map_elements(|lt| fit.eval(hr2rad(lt)))
}

// ═══════════════════════════════════════════════════════════════════════════
// Model selection
// ═══════════════════════════════════════════════════════════════════════════

/// A fully validated correction model.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum CorrectionModel {
    Circular { r_add: f64 },
    Elliptical {
        instrument: Instrument,
        method: Method,
    },
    Harmonic {
        instrument: Instrument,
        method: Method,
    },
}

impl Default for CorrectionModel {
    fn default() -> Self {
        Self::Circular { r_add: 0.0 }
    }
}

impl CorrectionModel {
    /// Select a model by name (`circular`, `elliptical`, `harmonic`).
    ///
    /// `instrument` and `method` are validated only for the fitted models;
    /// `r_add` is used only by `circular`.
    pub fn from_name(name: &str, instrument: &str, method: &str, r_add: f64) -> OcbResult<Self> {
        let model = match name.to_ascii_lowercase().as_str() {
            "circular" => Self::Circular { r_add },
            "elliptical" => Self::Elliptical {
                instrument: instrument.parse()?,
                method: method.parse()?,
            },
            "harmonic" => Self::Harmonic {
                instrument: instrument.parse()?,
                method: method.parse()?,
            },
            _ => {
                return Err(OcbError::invalid_input(format!(
                    "unknown boundary correction model '{name}'"
                )));
            }
        };
        trace!(?model, "selected boundary correction");
        Ok(model)
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Circular { .. } => "circular",
            Self::Elliptical { .. } => "elliptical",
            Self::Harmonic { .. } => "harmonic",
        }
    }

    /// Radius offset at each magnetic local time.
    pub fn correction<V: Elementwise>(&self, mlt: V) -> V::Output {
        match *self {
            Self::Circular { r_add } => circular(mlt, r_add),
            Self::Elliptical { instrument, method } => elliptical_with(mlt, instrument, method),
            Self::Harmonic { instrument, method } => harmonic_with(mlt, instrument, method),
        }
    }

    /// Measured boundary radius adjusted to the OCB at each magnetic local
    /// time.
    pub fn corrected_radius<V: Elementwise>(&self, radius: f64, mlt: V) -> V::Output {
        mlt.map_elements(|lt| radius + self.correction(lt))
    }
}

impl fmt::Display for CorrectionModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Circular { r_add } => write!(f, "circular (r_add = {r_add})"),
            Self::Elliptical { instrument, method } | Self::Harmonic { instrument, method } => {
                write!(f, "{} ({instrument}, {method})", self.name())
            }
        }
    }
}

/// Loosely typed model description, e.g. from a configuration file.
///
/// Every field is optional when deserialising; defaults describe the
/// uncorrected circular boundary.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CorrectionConfig {
    pub model: String,
    pub instrument: String,
    pub method: String,
    pub r_add: f64,
}

impl Default for CorrectionConfig {
    fn default() -> Self {
        Self {
            model: "circular".to_owned(),
            instrument: Instrument::default().name().to_owned(),
            method: Method::default().name().to_owned(),
            r_add: 0.0,
        }
    }
}

impl TryFrom<&CorrectionConfig> for CorrectionModel {
    type Error = OcbError;

    fn try_from(config: &CorrectionConfig) -> Result<Self, Self::Error> {
        Self::from_name(
            &config.model,
            &config.instrument,
            &config.method,
            config.r_add,
        )
    }
}

impl TryFrom<CorrectionConfig> for CorrectionModel {
    type Error = OcbError;

    fn try_from(config: CorrectionConfig) -> Result<Self, Self::Error> {
        Self::try_from(&config)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    const MLT: [f64; 2] = [0.0, 12.0];
    const ELLIPTICAL_DEFAULT: [f64; 2] = [-4.194630407939705, -2.0979393349197415];
    const HARMONIC_DEFAULT: [f64; 2] = [-1.5821694271422921, -3.4392638193624325];
    const ELLIPTICAL_GAUSSIAN: f64 = -4.639223510917398;
    const HARMONIC_GAUSSIAN: f64 = -2.293294645880221;

    #[test]
    fn unknown_instrument_fails() {
        for result in [
            elliptical(12.0, "bad_kwarg", "default"),
            harmonic(12.0, "bad_kwarg", "default"),
        ] {
            let err = result.unwrap_err();
            assert!(matches!(err, OcbError::InvalidInput { .. }));
            assert!(err.message().contains("bad_kwarg"));
        }
    }

    #[test]
    fn unknown_method_fails() {
        assert!(elliptical(12.0, "ampere", "bad_kwarg").is_err());
        assert!(harmonic(12.0, "ampere", "bad").is_err());
        assert!("median".parse::<Method>().is_err());
    }

    #[test]
    fn names_are_case_insensitive() {
        assert_eq!("AMPERE".parse::<Instrument>().unwrap(), Instrument::Ampere);
        assert_eq!("default".parse::<Instrument>().unwrap(), Instrument::Ampere);
        assert_eq!("Gaussian".parse::<Method>().unwrap(), Method::Gaussian);
    }

    #[test]
    fn default_scalar_values() {
        assert_eq!(circular(MLT[0], 0.0), 0.0);
        let e = elliptical(MLT[0], "default", "default").unwrap();
        let h = harmonic(MLT[0], "default", "default").unwrap();
        assert!((e - ELLIPTICAL_DEFAULT[0]).abs() < 1e-12, "{e}");
        assert!((h - HARMONIC_DEFAULT[0]).abs() < 1e-12, "{h}");
    }

    #[test]
    fn default_array_values() {
        assert_eq!(circular(MLT, 0.0), [0.0, 0.0]);
        let e = elliptical(MLT, "ampere", "default").unwrap();
        let h = harmonic(MLT.to_vec(), "ampere", "default").unwrap();
        for i in 0..MLT.len() {
            assert!((e[i] - ELLIPTICAL_DEFAULT[i]).abs() < 1e-7);
            assert!((h[i] - HARMONIC_DEFAULT[i]).abs() < 1e-7);
        }
    }

    #[test]
    fn scalar_and_array_agree_exactly() {
        let e = elliptical_with(MLT, Instrument::Ampere, Method::Gaussian);
        let h = harmonic_with(MLT, Instrument::Ampere, Method::Gaussian);
        for i in 0..MLT.len() {
            let e_scalar = elliptical_with(MLT[i], Instrument::Ampere, Method::Gaussian);
            let h_scalar = harmonic_with(MLT[i], Instrument::Ampere, Method::Gaussian);
            assert_eq!(e[i], e_scalar);
            assert_eq!(h[i], h_scalar);
        }
    }

    #[test]
    fn gaussian_method_values() {
        let e = elliptical(0.0, "ampere", "gaussian").unwrap();
        let h = harmonic(0.0, "ampere", "gaussian").unwrap();
        assert!((e - ELLIPTICAL_GAUSSIAN).abs() < 1e-7);
        assert!((h - HARMONIC_GAUSSIAN).abs() < 1e-7);
    }

    #[test]
    fn circular_offset() {
        assert_eq!(circular(0.0, 1.0), 1.0);
        assert_eq!(circular(vec![3.0, 7.5, 23.0], 1.0), vec![1.0, 1.0, 1.0]);
    }

    #[test]
    fn fitted_models_are_periodic_in_local_time() {
        for lt in [0.0, 3.5, 11.0, 18.25] {
            let e = elliptical_with(lt, Instrument::Ampere, Method::Default);
            let h = harmonic_with(lt, Instrument::Ampere, Method::Default);
            let e_next = elliptical_with(lt + 24.0, Instrument::Ampere, Method::Default);
            let h_next = harmonic_with(lt + 24.0, Instrument::Ampere, Method::Default);
            assert!((e - e_next).abs() < 1e-9);
            assert!((h - h_next).abs() < 1e-9);
        }
    }

    #[test]
    fn model_from_name_dispatches() {
        let model = CorrectionModel::from_name("Harmonic", "ampere", "default", 0.0).unwrap();
        assert_eq!(model.name(), "harmonic");
        assert!((model.correction(0.0) - HARMONIC_DEFAULT[0]).abs() < 1e-12);
        assert!((model.corrected_radius(74.0, 0.0) - (74.0 + HARMONIC_DEFAULT[0])).abs() < 1e-12);

        let circ = CorrectionModel::from_name("circular", "ignored", "ignored", 2.5).unwrap();
        assert_eq!(circ.correction([1.0, 2.0]), [2.5, 2.5]);
        assert_eq!(circ.corrected_radius(74.0, 6.0), 76.5);
        assert_eq!(
            circ.corrected_radius(74.0, vec![0.0, 6.0]),
            vec![76.5, 76.5]
        );

        assert!(CorrectionModel::from_name("oval", "ampere", "default", 0.0).is_err());
        assert!(CorrectionModel::from_name("elliptical", "image", "default", 0.0).is_err());
    }

    #[test]
    fn corrected_radius_follows_input_shape() {
        let model = CorrectionModel::Elliptical {
            instrument: Instrument::Ampere,
            method: Method::Default,
        };
        let radii = model.corrected_radius(74.0, MLT);
        for (r, expected) in radii.iter().zip(ELLIPTICAL_DEFAULT) {
            assert!((r - (74.0 + expected)).abs() < 1e-12, "{r}");
        }
        assert_eq!(radii[0], model.corrected_radius(74.0, MLT[0]));
        assert!(model.corrected_radius(74.0, Vec::<f64>::new()).is_empty());
    }

    #[test]
    fn config_defaults_to_uncorrected_circle() {
        let model = CorrectionModel::try_from(CorrectionConfig::default()).unwrap();
        assert_eq!(model, CorrectionModel::default());
        assert_eq!(model.to_string(), "circular (r_add = 0)");
    }

    #[test]
    fn display_names_selection() {
        let model = CorrectionModel::Elliptical {
            instrument: Instrument::Ampere,
            method: Method::Gaussian,
        };
        assert_eq!(model.to_string(), "elliptical (ampere, gaussian)");
    }
}
