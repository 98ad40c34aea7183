//! Motion configuration.

/// Tunables for the kinematics calculator.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MotionConfig {
    /// Speed shown in transit when the next waypoint has no reported
    /// segment values and the route has no usable average (zero distance or
    /// zero travel time).  Not derived from any route property.
    pub default_speed_kmh: f64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self { default_speed_kmh: 85.0 }
    }
}
