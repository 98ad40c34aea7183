//! Vehicle kinematics: position, heading, and real-world speed.

use rp_core::{GeoPoint, SpeedMultiplier};
use rp_route::{PathIndexMap, Route};

use crate::{MotionConfig, Phase, Resolution, Timeline};

// ── VehicleState ──────────────────────────────────────────────────────────────

/// The vehicle at one playback instant.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleState {
    pub phase:                 Phase,
    pub position:              GeoPoint,
    /// Degrees clockwise from north, `[0, 360)`.
    pub heading:               f64,
    /// Real-world speed.  Independent of the playback multiplier.
    pub speed_kmh:             f64,
    /// `None` once there is no next waypoint.
    pub distance_remaining_km: Option<f64>,
    /// Playback seconds until arrival at the next waypoint.
    pub eta_secs:              Option<f64>,
    /// Path sample the position was taken from; `None` for static display.
    pub path_index:            Option<usize>,
}

impl VehicleState {
    #[inline]
    pub fn is_stationary(&self) -> bool {
        self.phase.is_stationary()
    }
}

// ── MotionEngine ──────────────────────────────────────────────────────────────

/// Everything derived from one loaded route at one speed multiplier.
///
/// Built once per load (or per multiplier change) and then queried every
/// frame.  When the path has fewer than two samples the index map is
/// absent and every state is a static marker position.
#[derive(Clone, Debug)]
pub struct MotionEngine {
    route:         Route,
    timeline:      Timeline,
    index:         Option<PathIndexMap>,
    average_speed: Option<f64>,
    config:        MotionConfig,
}

impl MotionEngine {
    pub fn new(route: Route, multiplier: SpeedMultiplier, config: MotionConfig) -> Self {
        let timeline = Timeline::new(&route, multiplier);
        let index = if route.path().is_animatable() {
            PathIndexMap::build(route.waypoints(), route.path()).ok()
        } else {
            None
        };
        let average_speed = route.average_speed_kmh();
        Self { route, timeline, index, average_speed, config }
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn index_map(&self) -> Option<&PathIndexMap> {
        self.index.as_ref()
    }

    /// `false` when the path cannot be interpolated along (< 2 samples).
    pub fn is_animatable(&self) -> bool {
        self.index.is_some()
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    /// Shorthand for `timeline().resolve(elapsed)`.
    #[inline]
    pub fn resolve(&self, elapsed: f64) -> Resolution {
        self.timeline.resolve(elapsed)
    }

    /// Heading the vehicle starts the route with: bearing from the first
    /// waypoint's sample to the next distinct sample.  `0.0` if undefined.
    pub fn initial_heading(&self) -> f64 {
        let Some(index) = &self.index else { return 0.0 };
        let samples = self.route.path().samples();
        let start = index.at(0);
        samples[start..]
            .iter()
            .skip(1)
            .find_map(|&p| samples[start].bearing_deg(p))
            .unwrap_or(0.0)
    }

    /// Speed while driving the leg that ends at waypoint `next`.
    ///
    /// Reported segment values first, then the route average, then the
    /// configured default.
    pub fn transit_speed_kmh(&self, next: usize) -> f64 {
        let w = self.route.waypoint(next);
        if let (Some(km), Some(secs)) = (w.segment_distance_km, w.segment_duration_seconds) {
            if secs > 0.0 && km.is_finite() {
                return km / (secs / 3_600.0);
            }
        }
        self.average_speed.unwrap_or(self.config.default_speed_kmh)
    }

    /// Compute the vehicle state for a resolved instant.
    ///
    /// `last_heading` is carried over whenever the heading is undefined
    /// (stationary phases, the final sample, duplicate samples).
    pub fn compute_state(&self, res: &Resolution, last_heading: f64) -> VehicleState {
        let (distance_remaining_km, eta_secs) = self.remaining(res);
        let current = res.waypoint_index;

        let Some(index) = &self.index else {
            return VehicleState {
                phase: res.phase,
                position: self.route.waypoint(current).position,
                heading: last_heading,
                speed_kmh: 0.0,
                distance_remaining_km,
                eta_secs,
                path_index: None,
            };
        };

        let path = self.route.path();
        let last_sample = path.len() - 1;

        match (res.phase, res.next_waypoint_index) {
            (Phase::Transit, Some(next)) => {
                let start = index.at(current);
                let end   = index.at(next);
                let span  = end.saturating_sub(start);
                let target = (start + (res.segment_progress * span as f64).floor() as usize)
                    .min(last_sample);

                let position = path[target];
                let heading = path
                    .get(target + 1)
                    .and_then(|ahead| position.bearing_deg(ahead))
                    .unwrap_or(last_heading);

                VehicleState {
                    phase: Phase::Transit,
                    position,
                    heading,
                    speed_kmh: self.transit_speed_kmh(next),
                    distance_remaining_km,
                    eta_secs,
                    path_index: Some(target),
                }
            }
            _ => {
                let sample = index.at(current).min(last_sample);
                VehicleState {
                    phase: res.phase,
                    position: path[sample],
                    heading: last_heading,
                    speed_kmh: 0.0,
                    distance_remaining_km,
                    eta_secs,
                    path_index: Some(sample),
                }
            }
        }
    }

    /// Resolve and compute in one step.
    pub fn state_at(&self, elapsed: f64, last_heading: f64) -> (Resolution, VehicleState) {
        let res = self.resolve(elapsed);
        let state = self.compute_state(&res, last_heading);
        (res, state)
    }

    fn remaining(&self, res: &Resolution) -> (Option<f64>, Option<f64>) {
        let Some(next) = res.next_waypoint_index else {
            return (None, None);
        };
        let cur = self.route.waypoint(res.waypoint_index);
        let nxt = self.route.waypoint(next);

        let travelled = match res.phase {
            Phase::Transit => {
                cur.cumulative_distance_km
                    + res.segment_progress * (nxt.cumulative_distance_km - cur.cumulative_distance_km)
            }
            _ => cur.cumulative_distance_km,
        };
        let distance = (nxt.cumulative_distance_km - travelled).max(0.0);
        let eta = (self.timeline.scaled_arrival(next) - res.elapsed).max(0.0);
        (Some(distance), Some(eta))
    }
}
