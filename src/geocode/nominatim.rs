// src/geocode/nominatim.rs
use crate::config::GeocoderConfig;
use crate::domain::Coordinates;
use crate::geocode::{Geocoded, GeocodeError, Geocoder};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::StatusCode;
use serde::Deserialize;

pub struct NominatimGeocoder {
    client: Client,
    endpoint: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Degrees {
    // Nominatim sends coordinates as strings: "lat": "-23.5505"
    Text(String),
    Number(f64),
}

impl Degrees {
    fn value(&self) -> Option<f64> {
        match self {
            Degrees::Text(s) => s.trim().parse().ok(),
            Degrees::Number(n) => Some(*n),
        }
    }
}

#[derive(Debug, Deserialize)]
struct Place {
    lat: Degrees,
    lon: Degrees,
}

/// Parse a Nominatim search response.
/// `Ok(None)` is an empty match list; anything that is not a match list is an error.
pub fn parse_first_match(body: &str) -> Result<Option<Coordinates>, String> {
    let places: Vec<Place> =
        serde_json::from_str(body).map_err(|e| format!("Unexpected response body: {e}"))?;

    let Some(place) = places.first() else {
        return Ok(None);
    };

    let latitude = place
        .lat
        .value()
        .filter(|v| (-90.0..=90.0).contains(v))
        .ok_or_else(|| "Invalid latitude in response".to_string())?;
    let longitude = place
        .lon
        .value()
        .filter(|v| (-180.0..=180.0).contains(v))
        .ok_or_else(|| "Invalid longitude in response".to_string())?;

    Ok(Some(Coordinates {
        latitude,
        longitude,
    }))
}

impl NominatimGeocoder {
    pub fn new(config: &GeocoderConfig) -> Result<Self, GeocodeError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static("pt-BR,pt;q=0.9,en;q=0.8"),
        );

        // The service rejects requests without a descriptive User-Agent.
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| GeocodeError::Fatal(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.url.clone(),
        })
    }
}

impl Geocoder for NominatimGeocoder {
    fn geocode(&self, address: &str) -> Result<Geocoded, GeocodeError> {
        let resp = self
            .client
            .get(&self.endpoint)
            .query(&[("q", address), ("format", "json"), ("limit", "1")])
            .send()
            .map_err(|e| {
                tracing::warn!(address, error = %e, "Geocoding request failed");
                if e.is_builder() {
                    GeocodeError::Fatal(e.to_string())
                } else {
                    GeocodeError::Transient(e.to_string())
                }
            })?;

        let status = resp.status();
        let body = resp
            .text()
            .map_err(|e| GeocodeError::Transient(e.to_string()))?;

        if status.is_success() {
            return match parse_first_match(&body).map_err(GeocodeError::Fatal)? {
                Some(coords) => Ok(Geocoded::Found(coords)),
                None => {
                    tracing::info!(address, "Address not found");
                    Ok(Geocoded::NotFound)
                }
            };
        }

        // A blocked request sometimes still carries the match list.
        if status == StatusCode::FORBIDDEN && !body.trim().is_empty() {
            if let Ok(Some(coords)) = parse_first_match(&body) {
                tracing::warn!(address, "Using coordinates from a 403 response");
                return Ok(Geocoded::Found(coords));
            }
        }

        tracing::warn!(address, status = status.as_u16(), "Geocoding service rejected request");

        if status == StatusCode::FORBIDDEN
            || status == StatusCode::TOO_MANY_REQUESTS
            || status.is_server_error()
        {
            Err(GeocodeError::Transient(format!("HTTP {status}")))
        } else {
            Err(GeocodeError::Fatal(format!("HTTP {status}")))
        }
    }
}
