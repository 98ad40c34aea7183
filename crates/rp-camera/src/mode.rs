//! Camera behaviour modes.

use std::f64::consts::TAU;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::{CameraConfig, CameraInput};

/// Target values a mode wants the camera to reach.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct CameraTargets {
    pub heading: f64,
    pub tilt:    f64,
    pub zoom:    f64,
}

/// How the camera frames the vehicle.  Any mode may follow any other.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CameraMode {
    /// North-up, flat, wide.  The camera only pans with the vehicle.
    #[default]
    Overview,
    /// Behind the vehicle, tilted, closer while the vehicle is stopped.
    Chase,
    /// Chase framing plus a slow wall-clock-driven orbiting sway.
    Cinematic,
}

impl CameraMode {
    pub const ALL: [CameraMode; 3] = [CameraMode::Overview, CameraMode::Chase, CameraMode::Cinematic];

    /// Target heading, tilt, and zoom for this frame.
    pub fn targets(self, input: &CameraInput, cfg: &CameraConfig) -> CameraTargets {
        match self {
            CameraMode::Overview => CameraTargets {
                heading: 0.0,
                tilt:    0.0,
                zoom:    cfg.overview_zoom,
            },
            CameraMode::Chase => CameraTargets {
                heading: input.vehicle_heading,
                tilt:    cfg.chase_tilt,
                zoom:    if input.is_stationary {
                    cfg.chase_zoom_stationary
                } else {
                    cfg.chase_zoom_moving
                },
            },
            CameraMode::Cinematic => {
                let t = input.wall_secs;
                CameraTargets {
                    heading: input.vehicle_heading
                        + cfg.sway_heading_deg * sway(t, cfg.sway_heading_period_secs),
                    tilt:    cfg.cinematic_tilt
                        + cfg.sway_tilt_deg * sway(t, cfg.sway_tilt_period_secs),
                    zoom:    cfg.cinematic_zoom
                        + cfg.sway_zoom * sway(t, cfg.sway_zoom_period_secs),
                }
            }
        }
    }

    /// Whether heading and tilt ease toward their targets.  Overview holds a
    /// fixed north-up flat view, so it sets them directly.
    #[inline]
    pub fn smooths_orientation(self) -> bool {
        !matches!(self, CameraMode::Overview)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CameraMode::Overview  => "overview",
            CameraMode::Chase     => "chase",
            CameraMode::Cinematic => "cinematic",
        }
    }
}

/// `sin(2π t / period)`; zero for a non-positive period.
fn sway(t: f64, period: f64) -> f64 {
    if period > 0.0 { (TAU * t / period).sin() } else { 0.0 }
}

impl fmt::Display for CameraMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing an unrecognised camera mode name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown camera mode {0:?}: expected overview, chase, or cinematic")]
pub struct UnknownCameraMode(pub String);

impl FromStr for CameraMode {
    type Err = UnknownCameraMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "overview"  => Ok(CameraMode::Overview),
            "chase"     => Ok(CameraMode::Chase),
            "cinematic" => Ok(CameraMode::Cinematic),
            _ => Err(UnknownCameraMode(s.to_owned())),
        }
    }
}
