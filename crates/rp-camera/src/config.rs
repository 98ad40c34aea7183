//! Camera tunables.
//!
//! Angles are in degrees, zoom in web-map zoom levels (larger = closer).

/// Per-parameter smoothing and per-mode target values.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CameraConfig {
    // ── Smoothing fractions (per frame) ───────────────────────────────────
    pub heading_smoothing: f64,
    pub tilt_smoothing:    f64,
    pub zoom_smoothing:    f64,

    /// When set, smoothing fractions are defined at this frame rate and
    /// rescaled by the measured frame delta, so convergence time does not
    /// depend on the host's frame rate.  `None` applies them per update.
    pub reference_fps: Option<f64>,

    // ── Overview ──────────────────────────────────────────────────────────
    pub overview_zoom: f64,

    // ── Chase ─────────────────────────────────────────────────────────────
    pub chase_tilt:            f64,
    pub chase_zoom_moving:     f64,
    /// Closer framing while the vehicle services a stop.
    pub chase_zoom_stationary: f64,

    // ── Cinematic ─────────────────────────────────────────────────────────
    pub cinematic_tilt:           f64,
    pub cinematic_zoom:           f64,
    pub sway_heading_deg:         f64,
    pub sway_heading_period_secs: f64,
    pub sway_tilt_deg:            f64,
    pub sway_tilt_period_secs:    f64,
    pub sway_zoom:                f64,
    pub sway_zoom_period_secs:    f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            heading_smoothing: 0.08,
            tilt_smoothing:    0.05,
            zoom_smoothing:    0.1,
            reference_fps:     None,

            overview_zoom: 12.0,

            chase_tilt:            60.0,
            chase_zoom_moving:     16.0,
            chase_zoom_stationary: 18.0,

            cinematic_tilt:           50.0,
            cinematic_zoom:           16.5,
            sway_heading_deg:         25.0,
            sway_heading_period_secs: 24.0,
            sway_tilt_deg:            8.0,
            sway_tilt_period_secs:    17.0,
            sway_zoom:                0.5,
            sway_zoom_period_secs:    31.0,
        }
    }
}
