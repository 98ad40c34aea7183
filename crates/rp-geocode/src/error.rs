use rp_core::GeoPoint;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeocodeError {
    #[error("no address found near {0}")]
    NotFound(GeoPoint),

    #[error("geocoding service error: {0}")]
    Service(String),
}

pub type GeocodeResult<T> = Result<T, GeocodeError>;
