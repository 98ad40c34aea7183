//! Plain data row types written by output backends.

use rp_motion::Phase;
use rp_playback::{Frame, PlaybackStatus};

/// One rendered frame, flattened.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameRow {
    /// Running frame counter within the recording.
    pub frame:                 u64,
    pub elapsed:               f64,
    pub progress:              f64,
    pub status:                PlaybackStatus,
    pub phase:                 Phase,
    pub waypoint:              usize,
    pub next_waypoint:         Option<usize>,
    pub lat:                   f64,
    pub lng:                   f64,
    pub heading:               f64,
    pub speed_kmh:             f64,
    pub distance_remaining_km: Option<f64>,
    pub eta_secs:              Option<f64>,
    pub camera_heading:        f64,
    pub camera_tilt:           f64,
    pub camera_zoom:           f64,
    pub trail_len:             usize,
    pub label:                 Option<String>,
}

impl FrameRow {
    pub fn from_frame(frame_no: u64, f: &Frame) -> Self {
        Self {
            frame:                 frame_no,
            elapsed:               f.elapsed,
            progress:              f.progress,
            status:                f.status,
            phase:                 f.phase(),
            waypoint:              f.waypoint_index,
            next_waypoint:         f.next_waypoint_index,
            lat:                   f.vehicle.position.lat,
            lng:                   f.vehicle.position.lng,
            heading:               f.vehicle.heading,
            speed_kmh:             f.vehicle.speed_kmh,
            distance_remaining_km: f.vehicle.distance_remaining_km,
            eta_secs:              f.vehicle.eta_secs,
            camera_heading:        f.camera.heading,
            camera_tilt:           f.camera.tilt,
            camera_zoom:           f.camera.zoom,
            trail_len:             f.trail.len(),
            label:                 f.label.clone(),
        }
    }
}

/// A phase transition.  `from` is `None` for the first frame after a load
/// or reset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseEventRow {
    pub elapsed:  f64,
    pub from:     Option<Phase>,
    pub to:       Phase,
    pub waypoint: usize,
}
