//! The reverse-geocoding collaborator.

use async_trait::async_trait;

use rp_core::GeoPoint;

use crate::GeocodeResult;

/// A reverse-geocoded address.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Address {
    pub street_name:       Option<String>,
    pub locality:          Option<String>,
    pub formatted_address: String,
}

impl Address {
    /// Short label for an on-map badge: `"Street, Locality"`, or whichever
    /// of the two is present, else the formatted address.
    pub fn label(&self) -> String {
        let street   = self.street_name.as_deref().filter(|s| !s.trim().is_empty());
        let locality = self.locality.as_deref().filter(|s| !s.trim().is_empty());
        match (street, locality) {
            (Some(s), Some(l)) => format!("{s}, {l}"),
            (Some(s), None)    => s.to_owned(),
            (None, Some(l))    => l.to_owned(),
            (None, None)       => self.formatted_address.clone(),
        }
    }
}

/// Turns a coordinate into an address.
///
/// # Implementations
///
/// - **Production**: an HTTP client for a geocoding service
/// - **Offline / demo**: [`CoordinateGeocoder`]
/// - **Tests**: canned or failing mocks
#[async_trait]
pub trait Geocoder: Send + Sync + 'static {
    async fn reverse(&self, point: GeoPoint) -> GeocodeResult<Address>;
}

/// Offline geocoder that labels a point with its rounded coordinates.
#[derive(Copy, Clone, Debug, Default)]
pub struct CoordinateGeocoder;

#[async_trait]
impl Geocoder for CoordinateGeocoder {
    async fn reverse(&self, point: GeoPoint) -> GeocodeResult<Address> {
        Ok(Address {
            street_name:       None,
            locality:          None,
            formatted_address: format!("{:.3}, {:.3}", point.lat, point.lng),
        })
    }
}
