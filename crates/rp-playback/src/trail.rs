//! The breadcrumb trail behind the vehicle.

use std::collections::VecDeque;

use rp_core::GeoPoint;

/// Bounded FIFO of recently visited positions.
#[derive(Clone, Debug)]
pub struct Trail {
    points:     VecDeque<GeoPoint>,
    capacity:   usize,
    min_step_m: f64,
}

impl Trail {
    pub fn new(capacity: usize, min_step_m: f64) -> Self {
        let capacity = capacity.max(1);
        Self { points: VecDeque::with_capacity(capacity), capacity, min_step_m }
    }

    /// Record `p` if it is more than `min_step_m` from the last point.
    /// Returns `true` if it was recorded.
    pub fn push(&mut self, p: GeoPoint) -> bool {
        if let Some(&last) = self.points.back() {
            if last.distance_m(p) <= self.min_step_m {
                return false;
            }
        }
        if self.points.len() == self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(p);
        true
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn last(&self) -> Option<GeoPoint> {
        self.points.back().copied()
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &GeoPoint> {
        self.points.iter()
    }

    pub fn to_vec(&self) -> Vec<GeoPoint> {
        self.points.iter().copied().collect()
    }
}
