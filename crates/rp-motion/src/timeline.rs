//! Timeline resolution: which phase is the vehicle in at a playback instant?

use std::fmt;

use rp_core::SpeedMultiplier;
use rp_route::Route;

// ── Phase ─────────────────────────────────────────────────────────────────────

/// Classification of a playback instant.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Phase {
    /// Before the first waypoint's arrival.
    BeforeStart,
    /// Dwelling at a waypoint.
    Servicing,
    /// Driving between two consecutive waypoints.
    Transit,
    /// Past the final waypoint's departure.
    Complete,
}

impl Phase {
    /// `true` for every phase in which the vehicle is not moving.
    #[inline]
    pub fn is_stationary(self) -> bool {
        !matches!(self, Phase::Transit)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::BeforeStart => "before_start",
            Phase::Servicing   => "servicing",
            Phase::Transit     => "transit",
            Phase::Complete    => "complete",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Resolution ────────────────────────────────────────────────────────────────

/// Output of [`Timeline::resolve`].
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Resolution {
    pub phase: Phase,

    /// Playback seconds this resolution was computed for.
    pub elapsed: f64,

    /// The waypoint being serviced, departed from, or (before start) the
    /// first waypoint; the last waypoint once complete.
    pub waypoint_index: usize,

    /// Transit: `waypoint_index + 1`.  Servicing / before start: the next
    /// non-origin waypoint.  Complete: `None`.
    pub next_waypoint_index: Option<usize>,

    /// Fraction of the current transit leg covered, in `[0, 1]`.  `0.0`
    /// outside transit, except `1.0` once complete.
    pub segment_progress: f64,
}

// ── Timeline ──────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug)]
struct ScaledStop {
    arrival:   f64,
    departure: f64,
}

/// Waypoint schedule pre-scaled into playback seconds for one multiplier.
///
/// Rebuilt whenever the route or the multiplier changes.
#[derive(Clone, Debug)]
pub struct Timeline {
    multiplier:     SpeedMultiplier,
    stops:          Vec<ScaledStop>,
    /// `next_stop[i]` = first non-origin waypoint after `i`.
    next_stop:      Vec<Option<usize>>,
    total_duration: f64,
}

impl Timeline {
    pub fn new(route: &Route, multiplier: SpeedMultiplier) -> Self {
        let stops: Vec<ScaledStop> = route
            .waypoints()
            .iter()
            .map(|w| ScaledStop {
                arrival:   multiplier.to_playback(w.arrival_time_seconds),
                departure: multiplier.to_playback(w.departure_time_seconds),
            })
            .collect();

        let next_stop = (0..stops.len()).map(|i| route.next_stop_after(i)).collect();

        // A configured duration shorter than the schedule would cut the
        // replay off before the last stop.
        let scheduled = stops.last().map_or(0.0, |s| s.departure);
        let total_duration = route
            .animation_duration_secs()
            .map_or(scheduled, |configured| configured.max(scheduled));

        Self { multiplier, stops, next_stop, total_duration }
    }

    pub fn multiplier(&self) -> SpeedMultiplier {
        self.multiplier
    }

    /// `max(configured duration, last departure / multiplier)`.
    pub fn effective_total_duration(&self) -> f64 {
        self.total_duration
    }

    /// # Panics
    /// Panics if `i` is out of range.
    pub fn scaled_arrival(&self, i: usize) -> f64 {
        self.stops[i].arrival
    }

    /// # Panics
    /// Panics if `i` is out of range.
    pub fn scaled_departure(&self, i: usize) -> f64 {
        self.stops[i].departure
    }

    /// Overall replay progress in `[0, 1]`.
    pub fn progress_fraction(&self, elapsed: f64) -> f64 {
        if self.total_duration <= 0.0 {
            return 1.0;
        }
        (elapsed / self.total_duration).clamp(0.0, 1.0)
    }

    /// Classify `elapsed` (playback seconds).
    ///
    /// Every finite `elapsed` maps to exactly one phase; `NaN` is treated
    /// as `0`.
    pub fn resolve(&self, elapsed: f64) -> Resolution {
        let elapsed = if elapsed.is_nan() { 0.0 } else { elapsed };
        let n = self.stops.len();

        if n == 0 || elapsed < self.stops[0].arrival {
            return Resolution {
                phase:               Phase::BeforeStart,
                elapsed,
                waypoint_index:      0,
                next_waypoint_index: self.next_stop.first().copied().flatten(),
                segment_progress:    0.0,
            };
        }

        for (i, stop) in self.stops.iter().enumerate() {
            if elapsed >= stop.arrival && elapsed < stop.departure {
                return Resolution {
                    phase:               Phase::Servicing,
                    elapsed,
                    waypoint_index:      i,
                    next_waypoint_index: self.next_stop[i],
                    segment_progress:    0.0,
                };
            }

            if elapsed >= stop.departure && i + 1 < n && elapsed < self.stops[i + 1].arrival {
                let leg = self.stops[i + 1].arrival - stop.departure;
                let segment_progress = if leg > 0.0 {
                    ((elapsed - stop.departure) / leg).clamp(0.0, 1.0)
                } else {
                    1.0
                };
                return Resolution {
                    phase:               Phase::Transit,
                    elapsed,
                    waypoint_index:      i,
                    next_waypoint_index: Some(i + 1),
                    segment_progress,
                };
            }
        }

        Resolution {
            phase:               Phase::Complete,
            elapsed,
            waypoint_index:      n - 1,
            next_waypoint_index: None,
            segment_progress:    1.0,
        }
    }
}

/// One-shot resolution without keeping a [`Timeline`] around.
///
/// Rescales the whole schedule on every call; the playback driver keeps a
/// `Timeline` instead.
pub fn resolve(elapsed: f64, route: &Route, multiplier: SpeedMultiplier) -> Resolution {
    Timeline::new(route, multiplier).resolve(elapsed)
}
