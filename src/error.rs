// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error types shared by the time-conversion and boundary-correction layers.
//!
//! Only two failure modes exist:
//!
//! | Variant | Raised when |
//! |---------|-------------|
//! | [`InvalidInput`](OcbError::InvalidInput) | an input cannot be resolved, parsed, or falls outside a closed set |
//! | [`TypeAttribute`](OcbError::TypeAttribute) | a value without calendar components is used as a timestamp |
//!
//! Errors are returned at the point of detection and never recovered
//! internally.

use thiserror::Error;

pub type OcbResult<T> = Result<T, OcbError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OcbError {
    /// Unresolvable field combination, format mismatch, or an unknown
    /// instrument/method name.
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    /// A value lacking `hour`/`minute`/`second` accessors was supplied where a
    /// timestamp is required.
    #[error("type attribute error: {message}")]
    TypeAttribute { message: String },
}

impl OcbError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn type_attribute(message: impl Into<String>) -> Self {
        Self::TypeAttribute {
            message: message.into(),
        }
    }

    /// Human-readable detail without the variant prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::InvalidInput { message } | Self::TypeAttribute { message } => message,
        }
    }

    /// Parse failure of `text` against a chrono format string.
    pub(crate) fn format_mismatch(text: &str, fmt: &str, reason: impl std::fmt::Display) -> Self {
        Self::invalid_input(format!("time data '{text}' does not match format '{fmt}': {reason}"))
    }
}
