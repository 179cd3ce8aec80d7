mod nominatim;

pub use nominatim::NominatimGeocoder;

use crate::domain::Coordinates;

/// Outcome of a lookup that reached the service and got an answer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geocoded {
    Found(Coordinates),
    /// The service answered but knows no such address. The user has to fix it.
    NotFound,
}

/// The lookup itself failed. The address may be fine.
#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    /// Timeouts, connection errors, rate limiting, 5xx. Trying later may work.
    #[error("Geocoding service unavailable: {0}")]
    Transient(String),

    /// Unexpected status or response body.
    #[error("Geocoding failed: {0}")]
    Fatal(String),
}

pub trait Geocoder: Send + Sync {
    fn geocode(&self, address: &str) -> Result<Geocoded, GeocodeError>;
}
