//! Waypoint → path sample mapping.
//!
//! # Forward-only search
//!
//! Delivery paths routinely double back: the return-to-depot leg often runs
//! along the same streets as the outbound leg.  A global nearest-sample
//! search would sometimes match a later waypoint to an *earlier* sample,
//! and the rendered vehicle would jump backwards.
//!
//! Instead, waypoints are mapped in sequence order and each search starts
//! at the index the previous waypoint matched:
//!
//! ```text
//! last = 0
//! for w in waypoints:
//!     idx  = argmin_{i >= last} |path[i] - w.position|²
//!     last = idx
//! ```
//!
//! A `destination_return` waypoint always maps to the final sample, because
//! its position usually coincides with the origin (and therefore with a
//! sample near the start of the path).
//!
//! The resulting indices are non-decreasing in waypoint order.  Every
//! interpolation in `rp-motion` relies on this.

use rp_core::{GeoPoint, WaypointId};

use crate::{Path, RouteError, RouteResult, Waypoint, WaypointCategory};

/// One path index per waypoint, indexed by `WaypointId`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathIndexMap {
    indices: Vec<usize>,
}

impl PathIndexMap {
    /// Map every waypoint onto `path`.
    ///
    /// `waypoints` must be in sequence order (as held by a validated
    /// [`Route`](crate::Route)).  Cost is O(W × P) in the worst case; in
    /// practice each search is bounded by the remaining path.
    ///
    /// # Errors
    ///
    /// [`RouteError::EmptyPath`] if `path` has no samples.  Callers should
    /// fall back to a static (marker-only) display.
    pub fn build(waypoints: &[Waypoint], path: &Path) -> RouteResult<Self> {
        let last_sample = path.last_index().ok_or(RouteError::EmptyPath)?;

        let mut indices = Vec::with_capacity(waypoints.len());
        let mut last_index = 0usize;

        for w in waypoints {
            let idx = match w.category {
                WaypointCategory::DestinationReturn => last_sample,
                _ => nearest_from(path.samples(), w.position, last_index),
            };
            indices.push(idx);
            last_index = idx;
        }

        debug_assert!(indices.windows(2).all(|p| p[0] <= p[1]));
        Ok(Self { indices })
    }

    /// Path index for `waypoint`.
    ///
    /// # Panics
    /// Panics if `waypoint` is not part of the route this map was built for.
    #[inline]
    pub fn get(&self, waypoint: WaypointId) -> usize {
        self.indices[waypoint.index()]
    }

    /// Path index for the waypoint at list position `i`.
    #[inline]
    pub fn at(&self, i: usize) -> usize {
        self.indices[i]
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.indices
    }

    /// `true` if indices never decrease in waypoint order.
    pub fn is_monotonic(&self) -> bool {
        self.indices.windows(2).all(|p| p[0] <= p[1])
    }
}

/// Index of the sample in `samples[start..]` closest to `target`.
///
/// Ties resolve to the earliest sample.
fn nearest_from(samples: &[GeoPoint], target: GeoPoint, start: usize) -> usize {
    let mut best_index = start;
    let mut best_dist  = f64::INFINITY;
    for (offset, sample) in samples[start..].iter().enumerate() {
        let d = sample.coord_distance_sq(target);
        if d < best_dist {
            best_dist  = d;
            best_index = start + offset;
        }
    }
    best_index
}
