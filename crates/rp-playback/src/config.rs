//! Playback configuration.

use rp_camera::CameraConfig;
use rp_core::CoreError;
use rp_motion::MotionConfig;

/// Tunables for the driver plus the nested motion and camera configs.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlaybackConfig {
    /// Maximum breadcrumb points kept; the oldest are evicted first.
    pub trail_capacity:         usize,
    /// A new breadcrumb is recorded only this far from the previous one.
    pub trail_min_step_m:       f64,
    /// Path samples per geocode lookup.
    pub geocode_bucket_size:    usize,
    pub geocode_cache_capacity: usize,

    pub motion: MotionConfig,
    pub camera: CameraConfig,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            trail_capacity:         200,
            trail_min_step_m:       5.0,
            geocode_bucket_size:    50,
            geocode_cache_capacity: 256,
            motion:                 MotionConfig::default(),
            camera:                 CameraConfig::default(),
        }
    }
}

impl PlaybackConfig {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.trail_capacity == 0 {
            return Err(CoreError::Config("trail_capacity must be > 0".into()));
        }
        if !(self.trail_min_step_m.is_finite() && self.trail_min_step_m >= 0.0) {
            return Err(CoreError::Config(format!(
                "trail_min_step_m must be finite and >= 0, got {}",
                self.trail_min_step_m
            )));
        }
        if self.geocode_bucket_size == 0 {
            return Err(CoreError::Config("geocode_bucket_size must be > 0".into()));
        }
        if !(self.motion.default_speed_kmh.is_finite() && self.motion.default_speed_kmh >= 0.0) {
            return Err(CoreError::Config(format!(
                "default_speed_kmh must be finite and >= 0, got {}",
                self.motion.default_speed_kmh
            )));
        }
        Ok(())
    }
}
