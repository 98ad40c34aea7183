//! Seeded synthetic delivery routes.
//!
//! Produces an out-and-back route: origin → N delivery stops → return to
//! origin, where the return leg retraces the outbound polyline in reverse.
//! That overlap is exactly the case forward-only index mapping exists for,
//! so the generator doubles as a stress fixture.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use rp_core::{GeoPoint, RouteId, WaypointId};

use crate::{Path, Route, RouteError, RouteResult, Waypoint, WaypointCategory};

/// Knobs for [`synthetic_route`].
#[derive(Clone, Debug)]
pub struct SynthParams {
    pub route_id:         RouteId,
    /// Depot position.
    pub origin:           GeoPoint,
    /// Number of delivery stops (excluding origin and return).
    pub stops:            usize,
    /// Maximum stop offset from the origin, in degrees.
    pub spread_deg:       f64,
    /// Intermediate path samples per leg (inclusive range).
    pub samples_per_leg:  (usize, usize),
    /// Moving speed range in km/h.
    pub speed_kmh:        (f64, f64),
    /// Dwell time range at each stop, in seconds.
    pub dwell_secs:       (f64, f64),
}

impl SynthParams {
    /// Reject ranges that cannot be sampled.
    pub fn validate(&self) -> RouteResult<()> {
        let invalid = |field, reason| Err(RouteError::InvalidSynthParams { field, reason });
        if !self.origin.is_valid() {
            return invalid("origin", "not a valid coordinate");
        }
        if !(self.spread_deg.is_finite() && self.spread_deg >= 0.0) {
            return invalid("spread_deg", "must be finite and >= 0");
        }
        if self.samples_per_leg.0 > self.samples_per_leg.1 {
            return invalid("samples_per_leg", "lower bound exceeds upper bound");
        }
        let (lo, hi) = self.speed_kmh;
        if !(lo.is_finite() && hi.is_finite() && lo > 0.0 && lo <= hi) {
            return invalid("speed_kmh", "must be a finite range with 0 < low <= high");
        }
        let (lo, hi) = self.dwell_secs;
        if !(lo.is_finite() && hi.is_finite() && lo >= 0.0 && lo <= hi) {
            return invalid("dwell_secs", "must be a finite range with 0 <= low <= high");
        }
        Ok(())
    }
}

impl Default for SynthParams {
    fn default() -> Self {
        Self {
            route_id:        RouteId(1),
            origin:          GeoPoint::new(30.694, -88.043),
            stops:           5,
            spread_deg:      0.05,
            samples_per_leg: (4, 16),
            speed_kmh:       (30.0, 70.0),
            dwell_secs:      (120.0, 600.0),
        }
    }
}

/// Generate a valid out-and-back route with `params.stops` deliveries.
///
/// Returns [`RouteError::InvalidSynthParams`] for an inverted or
/// non-finite range in `params`.
///
/// The same `seed` always yields the same route.  Every other leg carries
/// routing-service `segment_*` values so both speed sources get exercised.
pub fn synthetic_route(seed: u64, params: &SynthParams) -> RouteResult<Route> {
    params.validate()?;
    let mut rng = SmallRng::seed_from_u64(seed);

    let mut samples: Vec<GeoPoint> = vec![params.origin];
    let mut waypoints = vec![Waypoint {
        sequence:                 WaypointId(0),
        name:                     Some("Depot".to_owned()),
        position:                 params.origin,
        category:                 WaypointCategory::Origin,
        arrival_time_seconds:     0.0,
        departure_time_seconds:   0.0,
        cumulative_distance_km:   0.0,
        segment_distance_km:      None,
        segment_duration_seconds: None,
        delivery_quantity:        None,
    }];

    let mut clock = 0.0;
    let mut cumulative_km = 0.0;

    // ── Outbound legs ─────────────────────────────────────────────────────
    for k in 0..params.stops {
        let target = GeoPoint::new(
            params.origin.lat + rng.gen_range(-params.spread_deg..=params.spread_deg),
            params.origin.lng + rng.gen_range(-params.spread_deg..=params.spread_deg),
        );
        let from = *samples.last().unwrap_or(&params.origin);
        let n_mid = rng.gen_range(params.samples_per_leg.0..=params.samples_per_leg.1);

        let leg_start = samples.len() - 1;
        for m in 1..=n_mid {
            let f = m as f64 / (n_mid + 1) as f64;
            samples.push(GeoPoint::new(
                from.lat + (target.lat - from.lat) * f + rng.gen_range(-0.0003..=0.0003),
                from.lng + (target.lng - from.lng) * f + rng.gen_range(-0.0003..=0.0003),
            ));
        }
        samples.push(target);

        let leg_km = polyline_km(&samples[leg_start..]);
        let speed  = rng.gen_range(params.speed_kmh.0..=params.speed_kmh.1);
        let drive  = leg_km / speed * 3_600.0;
        let dwell  = rng.gen_range(params.dwell_secs.0..=params.dwell_secs.1);

        clock += drive;
        cumulative_km += leg_km;
        let reported = k % 2 == 0;
        waypoints.push(Waypoint {
            sequence:                 WaypointId(k as u32 + 1),
            name:                     Some(format!("Customer {}", k + 1)),
            position:                 target,
            category:                 WaypointCategory::DeliveryStop,
            arrival_time_seconds:     clock,
            departure_time_seconds:   clock + dwell,
            cumulative_distance_km:   cumulative_km,
            segment_distance_km:      reported.then_some(leg_km),
            segment_duration_seconds: reported.then_some(drive),
            delivery_quantity:        Some(rng.gen_range(1..=40) as f64),
        });
        clock += dwell;
    }

    // ── Return leg: retrace the outbound polyline ─────────────────────────
    let outbound_len = samples.len();
    let return_start = outbound_len - 1;
    for i in (0..outbound_len - 1).rev() {
        samples.push(samples[i]);
    }
    let return_km = polyline_km(&samples[return_start..]);
    let speed     = rng.gen_range(params.speed_kmh.0..=params.speed_kmh.1);
    let drive     = return_km / speed * 3_600.0;
    clock += drive;
    cumulative_km += return_km;

    waypoints.push(Waypoint {
        sequence:                 WaypointId(params.stops as u32 + 1),
        name:                     Some("Depot".to_owned()),
        position:                 params.origin,
        category:                 WaypointCategory::DestinationReturn,
        arrival_time_seconds:     clock,
        departure_time_seconds:   clock,
        cumulative_distance_km:   cumulative_km,
        segment_distance_km:      None,
        segment_duration_seconds: None,
        delivery_quantity:        None,
    });

    Route::new(params.route_id, waypoints, Path::new(samples), None)
}

fn polyline_km(samples: &[GeoPoint]) -> f64 {
    samples.windows(2).map(|w| w[0].distance_m(w[1])).sum::<f64>() / 1_000.0
}
