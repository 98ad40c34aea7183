//! Playback time scaling.
//!
//! Route times are real seconds from route start.  Playback compresses them
//! by a `SpeedMultiplier`:
//!
//!   playback_secs = real_secs / multiplier
//!
//! A multiplier of 60 plays one hour of route in one minute.

use std::fmt;

use crate::{CoreError, CoreResult};

/// A validated, strictly positive, finite time-compression factor.
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "f64", into = "f64"))]
pub struct SpeedMultiplier(f64);

impl SpeedMultiplier {
    /// Real time (no compression).
    pub const REAL_TIME: SpeedMultiplier = SpeedMultiplier(1.0);

    /// Smallest accepted multiplier.  Below this, scaled route times
    /// overflow to infinity.
    pub const MIN: f64 = f64::EPSILON;

    pub fn new(n: f64) -> CoreResult<Self> {
        if n.is_finite() && n >= Self::MIN {
            Ok(Self(n))
        } else {
            Err(CoreError::InvalidSpeedMultiplier(n))
        }
    }

    #[inline]
    pub fn get(self) -> f64 {
        self.0
    }

    /// Real route seconds → playback seconds.
    #[inline]
    pub fn to_playback(self, real_secs: f64) -> f64 {
        real_secs / self.0
    }

    /// Playback seconds → real route seconds.
    #[inline]
    pub fn to_real(self, playback_secs: f64) -> f64 {
        playback_secs * self.0
    }
}

impl Default for SpeedMultiplier {
    fn default() -> Self {
        Self::REAL_TIME
    }
}

impl TryFrom<f64> for SpeedMultiplier {
    type Error = CoreError;
    fn try_from(n: f64) -> CoreResult<Self> {
        Self::new(n)
    }
}

impl From<SpeedMultiplier> for f64 {
    fn from(m: SpeedMultiplier) -> f64 {
        m.0
    }
}

impl fmt::Display for SpeedMultiplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x", self.0)
    }
}

/// Format a second count as `H:MM:SS` for labels and logs.
///
/// Negative and non-finite inputs render as `0:00:00`.
pub fn format_clock(secs: f64) -> String {
    let total = if secs.is_finite() && secs > 0.0 { secs.floor() as u64 } else { 0 };
    let hours = total / 3_600;
    let minutes = (total % 3_600) / 60;
    let seconds = total % 60;
    format!("{hours}:{minutes:02}:{seconds:02}")
}
