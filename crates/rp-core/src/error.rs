//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`.

use thiserror::Error;

/// The error type for `rp-core` and a common base for sub-crates.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoreError {
    #[error("speed multiplier must be finite and at least f64::EPSILON, got {0}")]
    InvalidSpeedMultiplier(f64),

    #[error("invalid coordinate ({lat}, {lng})")]
    InvalidCoordinate { lat: f64, lng: f64 },

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `rp-core`.
pub type CoreResult<T> = Result<T, CoreError>;
