//! What the rendering surface receives every tick.

use rp_camera::CameraState;
use rp_core::GeoPoint;
use rp_motion::{Phase, VehicleState};

use crate::PlaybackStatus;

/// One rendered tick.  Read-only for the renderer.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Frame {
    /// Playback seconds.
    pub elapsed:             f64,
    /// `elapsed / effective_total_duration`, in `[0, 1]`.
    pub progress:            f64,
    pub status:              PlaybackStatus,
    pub waypoint_index:      usize,
    pub next_waypoint_index: Option<usize>,
    pub segment_progress:    f64,
    pub vehicle:             VehicleState,
    pub camera:              CameraState,
    /// Oldest first.
    pub trail:               Vec<GeoPoint>,
    /// Street label while in transit: geocoded if known, else
    /// `En route to <next stop>`.
    pub label:               Option<String>,
    /// `true` on the frame at which playback reached the end and stopped.
    pub finished:            bool,
}

impl Frame {
    #[inline]
    pub fn phase(&self) -> Phase {
        self.vehicle.phase
    }
}
