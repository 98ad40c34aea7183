//! Geographic coordinate type and spatial utilities.
//!
//! `GeoPoint` uses `f64` latitude/longitude.  Path samples from routing
//! services are typically 5–6 decimal places, and the trail threshold is a
//! few metres, so single precision is not enough here.

use std::fmt;

use crate::{CoreError, CoreResult};

/// Mean Earth radius in metres.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A WGS-84 geographic coordinate.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    #[inline]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Construct a point, rejecting NaN/infinite or out-of-range values.
    pub fn checked(lat: f64, lng: f64) -> CoreResult<Self> {
        let p = Self { lat, lng };
        if p.is_valid() {
            Ok(p)
        } else {
            Err(CoreError::InvalidCoordinate { lat, lng })
        }
    }

    /// `true` if both components are finite and within WGS-84 bounds.
    pub fn is_valid(self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }

    /// Haversine great-circle distance in metres.
    pub fn distance_m(self, other: GeoPoint) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lng = (other.lng - self.lng).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lng * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_M * c
    }

    /// Squared Euclidean distance in raw coordinate space (degrees²).
    ///
    /// Not a physical distance.  Used for nearest-sample matching where only
    /// the ordering matters.
    #[inline]
    pub fn coord_distance_sq(self, other: GeoPoint) -> f64 {
        let dlat = self.lat - other.lat;
        let dlng = self.lng - other.lng;
        dlat * dlat + dlng * dlng
    }

    /// Initial great-circle bearing from `self` to `other`, in degrees
    /// clockwise from north, normalised to `[0, 360)`.
    ///
    /// Returns `None` when the two points coincide (bearing is undefined).
    pub fn bearing_deg(self, other: GeoPoint) -> Option<f64> {
        if self == other {
            return None;
        }
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let d_lng = (other.lng - self.lng).to_radians();

        let y = d_lng.sin() * lat2.cos();
        let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lng.cos();
        let deg = y.atan2(x).to_degrees();
        Some((deg + 360.0) % 360.0)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lng)
    }
}

impl From<[f64; 2]> for GeoPoint {
    /// `[lat, lng]` pair, the order routing services emit polylines in.
    fn from(pair: [f64; 2]) -> Self {
        GeoPoint::new(pair[0], pair[1])
    }
}
