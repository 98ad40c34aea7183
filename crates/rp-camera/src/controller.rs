//! The smoothing camera controller.

use rp_core::GeoPoint;

use crate::{CameraConfig, CameraMode, CameraTargets};

// ── Heading helpers ───────────────────────────────────────────────────────────

/// Map any angle into `(-180, 180]`.
pub fn normalize_heading(deg: f64) -> f64 {
    let h = deg % 360.0;
    if h <= -180.0 {
        h + 360.0
    } else if h > 180.0 {
        h - 360.0
    } else {
        h
    }
}

/// Signed difference `target - current`, folded into `[-180, 180]` so it
/// always points the short way around.
pub fn shortest_heading_delta(current: f64, target: f64) -> f64 {
    let diff = normalize_heading(target) - normalize_heading(current);
    if diff > 180.0 {
        diff - 360.0
    } else if diff < -180.0 {
        diff + 360.0
    } else {
        diff
    }
}

/// Move `current` a fraction `alpha` of the short way toward `target`.
pub fn approach_heading(current: f64, target: f64, alpha: f64) -> f64 {
    normalize_heading(normalize_heading(current) + shortest_heading_delta(current, target) * alpha)
}

#[inline]
fn approach(current: f64, target: f64, alpha: f64) -> f64 {
    current + (target - current) * alpha
}

// ── Input / state ─────────────────────────────────────────────────────────────

/// What the controller needs to know about the vehicle each frame.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct CameraInput {
    pub position:        GeoPoint,
    /// Degrees clockwise from north.
    pub vehicle_heading: f64,
    pub is_stationary:   bool,
    /// Wall-clock seconds since the view opened.  Drives the cinematic sway
    /// so it is unaffected by pausing or the playback multiplier.
    pub wall_secs:       f64,
}

/// Camera parameters handed to the rendering surface.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CameraState {
    pub center:  GeoPoint,
    /// Degrees, `(-180, 180]`.
    pub heading: f64,
    pub tilt:    f64,
    pub zoom:    f64,
}

// ── CameraController ──────────────────────────────────────────────────────────

/// Maintains the current camera and eases it toward the active mode's
/// targets.
///
/// The smoothing loop knows nothing about individual modes beyond the
/// targets they return and whether they ease orientation.
#[derive(Clone, Debug)]
pub struct CameraController {
    mode:         CameraMode,
    config:       CameraConfig,
    state:        CameraState,
    /// Set on construction and on mode switch; the next update jumps
    /// straight to the targets.
    pending_snap: bool,
}

impl CameraController {
    pub fn new(mode: CameraMode, config: CameraConfig) -> Self {
        Self {
            mode,
            config,
            state: CameraState::default(),
            pending_snap: true,
        }
    }

    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    pub fn state(&self) -> CameraState {
        self.state
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    /// Switch modes.  The next [`update`](Self::update) snaps to the new
    /// mode's targets instead of drifting there.
    pub fn set_mode(&mut self, mode: CameraMode) {
        if mode != self.mode {
            self.mode = mode;
            self.pending_snap = true;
        }
    }

    /// Jump directly to the current mode's targets for `input`.
    pub fn snap(&mut self, input: &CameraInput) -> CameraState {
        let t = self.mode.targets(input, &self.config);
        self.state = CameraState {
            center:  input.position,
            heading: normalize_heading(t.heading),
            tilt:    t.tilt,
            zoom:    t.zoom,
        };
        self.pending_snap = false;
        self.state
    }

    /// Advance one frame.  `dt_secs` is the wall-clock frame delta; it only
    /// matters when `reference_fps` is configured.
    pub fn update(&mut self, input: &CameraInput, dt_secs: f64) -> CameraState {
        if self.pending_snap {
            return self.snap(input);
        }

        let CameraTargets { heading, tilt, zoom } = self.mode.targets(input, &self.config);
        let cfg = &self.config;

        let (heading, tilt) = if self.mode.smooths_orientation() {
            (
                approach_heading(self.state.heading, heading, self.alpha(cfg.heading_smoothing, dt_secs)),
                approach(self.state.tilt, tilt, self.alpha(cfg.tilt_smoothing, dt_secs)),
            )
        } else {
            (normalize_heading(heading), tilt)
        };
        let zoom = approach(self.state.zoom, zoom, self.alpha(cfg.zoom_smoothing, dt_secs));

        self.state = CameraState { center: input.position, heading, tilt, zoom };
        self.state
    }

    /// Effective smoothing fraction for this frame.
    fn alpha(&self, base: f64, dt_secs: f64) -> f64 {
        let base = base.clamp(0.0, 1.0);
        match self.config.reference_fps {
            Some(fps) if fps > 0.0 && dt_secs.is_finite() && dt_secs >= 0.0 => {
                1.0 - (1.0 - base).powf(dt_secs * fps)
            }
            _ => base,
        }
    }
}
