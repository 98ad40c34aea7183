//! A single scheduled stop (or the route's start/end point).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use rp_core::{GeoPoint, WaypointId};

use crate::RouteError;

/// What role a waypoint plays in the route.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaypointCategory {
    /// The depot the vehicle starts from.
    Origin,
    /// A customer stop.
    DeliveryStop,
    /// The final return to the depot.  Always mapped to the end of the path.
    DestinationReturn,
}

impl WaypointCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            WaypointCategory::Origin            => "origin",
            WaypointCategory::DeliveryStop      => "delivery_stop",
            WaypointCategory::DestinationReturn => "destination_return",
        }
    }
}

impl fmt::Display for WaypointCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WaypointCategory {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "origin"             => Ok(WaypointCategory::Origin),
            "delivery_stop"      => Ok(WaypointCategory::DeliveryStop),
            "destination_return" => Ok(WaypointCategory::DestinationReturn),
            other => Err(RouteError::Parse(format!(
                "invalid category {other:?}: expected \"origin\", \"delivery_stop\", or \"destination_return\""
            ))),
        }
    }
}

/// One stop on the route.
///
/// All times are real (unscaled) seconds from route start.  Scaling into
/// playback time happens in `rp-motion`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    /// 0-based position in route order.
    pub sequence: WaypointId,

    /// Display name, e.g. the customer or depot name.
    #[serde(default)]
    pub name: Option<String>,

    pub position: GeoPoint,

    pub category: WaypointCategory,

    pub arrival_time_seconds: f64,

    /// `>= arrival_time_seconds`.  The difference is the dwell (servicing) time.
    pub departure_time_seconds: f64,

    /// Distance travelled along the route up to this waypoint.
    pub cumulative_distance_km: f64,

    /// Distance of the leg ending at this waypoint, as reported by the
    /// routing service.
    #[serde(default)]
    pub segment_distance_km: Option<f64>,

    /// Driving time of the leg ending at this waypoint, as reported by the
    /// routing service.
    #[serde(default)]
    pub segment_duration_seconds: Option<f64>,

    /// Payload to unload.  Display only.
    #[serde(default)]
    pub delivery_quantity: Option<f64>,
}

impl Waypoint {
    /// Seconds spent servicing this stop.
    #[inline]
    pub fn dwell_secs(&self) -> f64 {
        self.departure_time_seconds - self.arrival_time_seconds
    }

    /// Name for labels: the configured name, or `Stop <sequence>`.
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(n) if !n.trim().is_empty() => n.clone(),
            _ => format!("Stop {}", self.sequence.0),
        }
    }
}
