//! The dense road polyline a vehicle follows.

use std::ops::Index;

use rp_core::GeoPoint;

/// Ordered path samples from the origin through every waypoint to the final
/// destination.
///
/// Sample density is irregular and bears no relation to the waypoint count.
/// The polyline may self-intersect or retrace itself (a return leg that
/// runs back along the outbound street).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    samples: Vec<GeoPoint>,
}

impl Path {
    pub fn new(samples: Vec<GeoPoint>) -> Self {
        Self { samples }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// `true` if the path has enough samples to interpolate along (≥ 2).
    #[inline]
    pub fn is_animatable(&self) -> bool {
        self.samples.len() >= 2
    }

    /// Index of the final sample, or `None` for an empty path.
    #[inline]
    pub fn last_index(&self) -> Option<usize> {
        self.samples.len().checked_sub(1)
    }

    #[inline]
    pub fn get(&self, i: usize) -> Option<GeoPoint> {
        self.samples.get(i).copied()
    }

    pub fn samples(&self) -> &[GeoPoint] {
        &self.samples
    }

    /// Total polyline length in metres.
    pub fn length_m(&self) -> f64 {
        self.samples
            .windows(2)
            .map(|w| w[0].distance_m(w[1]))
            .sum()
    }
}

impl Index<usize> for Path {
    type Output = GeoPoint;
    fn index(&self, i: usize) -> &GeoPoint {
        &self.samples[i]
    }
}

impl From<Vec<GeoPoint>> for Path {
    fn from(samples: Vec<GeoPoint>) -> Self {
        Self::new(samples)
    }
}

impl FromIterator<GeoPoint> for Path {
    fn from_iter<I: IntoIterator<Item = GeoPoint>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
