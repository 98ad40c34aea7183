//! The validated, immutable route.

use serde::{Deserialize, Serialize};

use rp_core::{GeoPoint, RouteId};

use crate::{Path, RouteError, RouteResult, Waypoint, WaypointCategory};

// ── RouteDocument ─────────────────────────────────────────────────────────────

/// The route as delivered by the routing collaborator, before validation.
///
/// ```json
/// {
///   "route_id": 7,
///   "animation_duration_secs": 45.0,
///   "waypoints": [ { "sequence": 0, "position": { "lat": 30.69, "lng": -88.04 },
///                    "category": "origin", "arrival_time_seconds": 0,
///                    "departure_time_seconds": 0, "cumulative_distance_km": 0 } ],
///   "path": [[30.69, -88.04], [30.70, -88.03]]
/// }
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RouteDocument {
    pub route_id: RouteId,

    /// Configured playback length in playback seconds, if the service sets one.
    #[serde(default)]
    pub animation_duration_secs: Option<f64>,

    pub waypoints: Vec<Waypoint>,

    /// `[lat, lng]` pairs.
    #[serde(default)]
    pub path: Vec<[f64; 2]>,
}

// ── Leg ───────────────────────────────────────────────────────────────────────

/// Distance and driving time of the leg ending at a waypoint.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Leg {
    pub distance_km:   f64,
    pub duration_secs: f64,
    /// `true` if both values came from the routing service rather than from
    /// cumulative-distance and schedule deltas.
    pub reported:      bool,
}

// ── Route ─────────────────────────────────────────────────────────────────────

/// A validated delivery route: ordered waypoints plus the dense path.
///
/// Invariants established by [`Route::new`]:
///
/// - at least one waypoint, `sequence` equal to position in the list;
/// - arrivals non-decreasing, `departure >= arrival` for every waypoint;
/// - cumulative distance non-decreasing;
/// - all times, distances, and coordinates finite (and non-negative where
///   that is meaningful).
///
/// The path may be empty.  Such a route can be shown statically but not
/// animated.
#[derive(Clone, Debug)]
pub struct Route {
    route_id:                RouteId,
    waypoints:               Vec<Waypoint>,
    path:                    Path,
    animation_duration_secs: Option<f64>,
}

impl Route {
    pub fn new(
        route_id:                RouteId,
        waypoints:               Vec<Waypoint>,
        path:                    Path,
        animation_duration_secs: Option<f64>,
    ) -> RouteResult<Self> {
        validate_waypoints(&waypoints)?;
        for (index, p) in path.samples().iter().enumerate() {
            rp_core::GeoPoint::checked(p.lat, p.lng)
                .map_err(|source| RouteError::InvalidPathSample { index, source })?;
        }
        let animation_duration_secs = animation_duration_secs
            .filter(|d| d.is_finite() && *d > 0.0);

        Ok(Self { route_id, waypoints, path, animation_duration_secs })
    }

    /// Validate a [`RouteDocument`].
    pub fn from_document(doc: RouteDocument) -> RouteResult<Self> {
        let path = doc.path.into_iter().map(GeoPoint::from).collect();
        Self::new(doc.route_id, doc.waypoints, path, doc.animation_duration_secs)
    }

    /// Inverse of [`from_document`](Self::from_document).
    pub fn to_document(&self) -> RouteDocument {
        RouteDocument {
            route_id:                self.route_id,
            animation_duration_secs: self.animation_duration_secs,
            waypoints:               self.waypoints.clone(),
            path:                    self.path.samples().iter().map(|p| [p.lat, p.lng]).collect(),
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn route_id(&self) -> RouteId {
        self.route_id
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    /// # Panics
    /// Panics if `i` is out of range.
    pub fn waypoint(&self, i: usize) -> &Waypoint {
        &self.waypoints[i]
    }

    pub fn waypoint_count(&self) -> usize {
        self.waypoints.len()
    }

    pub fn last_index(&self) -> usize {
        self.waypoints.len() - 1
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn animation_duration_secs(&self) -> Option<f64> {
        self.animation_duration_secs
    }

    // ── Derived quantities ────────────────────────────────────────────────

    /// First waypoint after `i` that is not an origin, scanning forward.
    pub fn next_stop_after(&self, i: usize) -> Option<usize> {
        self.waypoints
            .iter()
            .enumerate()
            .skip(i + 1)
            .find(|(_, w)| w.category != WaypointCategory::Origin)
            .map(|(j, _)| j)
    }

    /// The leg ending at waypoint `i`.
    ///
    /// Uses the routing service's `segment_*` values when both are present,
    /// otherwise derives them from the cumulative distance delta and the
    /// previous departure → this arrival delta.  `None` for `i == 0` or out
    /// of range.
    pub fn leg(&self, i: usize) -> Option<Leg> {
        if i == 0 || i >= self.waypoints.len() {
            return None;
        }
        let prev = &self.waypoints[i - 1];
        let cur  = &self.waypoints[i];
        match (cur.segment_distance_km, cur.segment_duration_seconds) {
            (Some(distance_km), Some(duration_secs)) => Some(Leg {
                distance_km,
                duration_secs,
                reported: true,
            }),
            (distance, duration) => Some(Leg {
                distance_km:   distance
                    .unwrap_or(cur.cumulative_distance_km - prev.cumulative_distance_km),
                duration_secs: duration
                    .unwrap_or((cur.arrival_time_seconds - prev.departure_time_seconds).max(0.0)),
                reported:      false,
            }),
        }
    }

    /// Distance from origin to the final waypoint.
    pub fn total_distance_km(&self) -> f64 {
        self.waypoints.last().map_or(0.0, |w| w.cumulative_distance_km)
    }

    /// Time spent moving between stops, excluding dwell time.
    pub fn total_travel_secs(&self) -> f64 {
        self.waypoints
            .windows(2)
            .map(|w| (w[1].arrival_time_seconds - w[0].departure_time_seconds).max(0.0))
            .sum()
    }

    /// Time spent servicing stops.
    pub fn total_dwell_secs(&self) -> f64 {
        self.waypoints.iter().map(Waypoint::dwell_secs).sum()
    }

    /// Real route duration: the final waypoint's departure time.
    pub fn total_duration_secs(&self) -> f64 {
        self.waypoints.last().map_or(0.0, |w| w.departure_time_seconds)
    }

    /// Route-average moving speed, or `None` if there is no distance or no
    /// travel time to average over.
    pub fn average_speed_kmh(&self) -> Option<f64> {
        let distance = self.total_distance_km();
        let travel   = self.total_travel_secs();
        if distance > 0.0 && travel > 0.0 {
            Some(distance / travel * 3_600.0)
        } else {
            None
        }
    }

    pub fn summary(&self) -> RouteSummary {
        RouteSummary {
            route_id:          self.route_id,
            delivery_stops:    self
                .waypoints
                .iter()
                .filter(|w| w.category == WaypointCategory::DeliveryStop)
                .count(),
            total_distance_km: self.total_distance_km(),
            travel_secs:       self.total_travel_secs(),
            dwell_secs:        self.total_dwell_secs(),
            average_speed_kmh: self.average_speed_kmh(),
            path_samples:      self.path.len(),
            path_length_km:    self.path.length_m() / 1_000.0,
            total_quantity:    self.waypoints.iter().filter_map(|w| w.delivery_quantity).sum(),
            legs:              (1..self.waypoints.len()).filter_map(|i| self.leg(i)).collect(),
        }
    }
}

/// Headline numbers for a route, for dashboard widgets and logs.
#[derive(Clone, Debug, PartialEq)]
pub struct RouteSummary {
    pub route_id:          RouteId,
    pub delivery_stops:    usize,
    pub total_distance_km: f64,
    pub travel_secs:       f64,
    pub dwell_secs:        f64,
    pub average_speed_kmh: Option<f64>,
    pub path_samples:      usize,
    /// Length of the drawn polyline, which may differ from the scheduled
    /// distance.
    pub path_length_km:    f64,
    pub total_quantity:    f64,
    /// `legs[k]` ends at waypoint `k + 1`.
    pub legs:              Vec<Leg>,
}

// ── Validation ────────────────────────────────────────────────────────────────

fn validate_waypoints(waypoints: &[Waypoint]) -> RouteResult<()> {
    if waypoints.is_empty() {
        return Err(RouteError::NoWaypoints);
    }

    for (index, w) in waypoints.iter().enumerate() {
        if w.sequence.index() != index {
            return Err(RouteError::NonContiguousSequence { index, got: w.sequence.0 });
        }
        GeoPoint::checked(w.position.lat, w.position.lng)
            .map_err(|source| RouteError::InvalidPosition { index, source })?;

        check_non_negative(index, "arrival_time_seconds", w.arrival_time_seconds)?;
        check_non_negative(index, "departure_time_seconds", w.departure_time_seconds)?;
        check_non_negative(index, "cumulative_distance_km", w.cumulative_distance_km)?;
        if let Some(d) = w.segment_distance_km {
            check_non_negative(index, "segment_distance_km", d)?;
        }
        if let Some(d) = w.segment_duration_seconds {
            check_non_negative(index, "segment_duration_seconds", d)?;
        }
        if let Some(q) = w.delivery_quantity {
            check_non_negative(index, "delivery_quantity", q)?;
        }

        if w.departure_time_seconds < w.arrival_time_seconds {
            return Err(RouteError::DepartureBeforeArrival { index });
        }
        if index > 0 {
            let prev = &waypoints[index - 1];
            if w.arrival_time_seconds < prev.arrival_time_seconds {
                return Err(RouteError::ArrivalsNotSorted { index });
            }
            if w.cumulative_distance_km < prev.cumulative_distance_km {
                return Err(RouteError::CumulativeDistanceDecreasing { index });
            }
        }
    }
    Ok(())
}

fn check_non_negative(index: usize, field: &'static str, v: f64) -> RouteResult<()> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(RouteError::InvalidNumber { index, field })
    }
}
