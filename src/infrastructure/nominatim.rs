// SPDX-License-Identifier: MPL-2.0
//! Geocoding over a Nominatim-compatible search endpoint.
//!
//! Issues `GET {endpoint}?format=json&q=<query>` and takes the first entry of
//! the returned list. Nominatim encodes coordinates as strings, so parsing and
//! range validation happen here rather than in serde.

use async_trait::async_trait;
use serde::Deserialize;

use crate::application::port::GeocodeResolver;
use crate::config::GeocodingConfig;
use crate::domain::error::GeocodeError;
use crate::domain::geo::{Coordinate, LocationQuery};
use crate::error::{Error, Result};

/// One entry of a Nominatim search response. Other fields are ignored.
#[derive(Debug, Deserialize)]
struct Place {
    lat: String,
    lon: String,
}

/// [`GeocodeResolver`] backed by a Nominatim search endpoint.
#[derive(Debug, Clone)]
pub struct NominatimResolver {
    client: reqwest::Client,
    endpoint: String,
}

impl NominatimResolver {
    /// Builds a resolver from the `[geocoding]` section.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the HTTP client cannot be built.
    pub fn from_config(config: &GeocodingConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout())
            .build()
            .map_err(|e| Error::Http(format!("Failed to create geocoding client: {e}")))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl GeocodeResolver for NominatimResolver {
    async fn resolve(&self, query: &LocationQuery) -> std::result::Result<Coordinate, GeocodeError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("format", "json"), ("q", query.as_str())])
            .send()
            .await
            .map_err(|e| GeocodeError::TransportFailure(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(GeocodeError::TransportFailure(format!(
                "HTTP status: {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| GeocodeError::TransportFailure(format!("reading body failed: {e}")))?;

        let coordinate = first_match(&body)?;
        tracing::debug!(query = %query, %coordinate, "geocoded");
        Ok(coordinate)
    }
}

/// Extracts the first coordinate of a Nominatim JSON response body.
///
/// # Errors
///
/// [`GeocodeError::NotFound`] for an empty list,
/// [`GeocodeError::TransportFailure`] for anything unparseable or out of range.
pub fn first_match(body: &str) -> std::result::Result<Coordinate, GeocodeError> {
    let places: Vec<Place> = serde_json::from_str(body)
        .map_err(|e| GeocodeError::TransportFailure(format!("malformed response: {e}")))?;

    let Some(place) = places.into_iter().next() else {
        return Err(GeocodeError::NotFound);
    };

    let latitude = parse_degrees(&place.lat, "lat")?;
    let longitude = parse_degrees(&place.lon, "lon")?;

    Coordinate::new(latitude, longitude)
        .map_err(|e| GeocodeError::TransportFailure(format!("malformed response: {e}")))
}

fn parse_degrees(value: &str, field: &str) -> std::result::Result<f64, GeocodeError> {
    value.trim().parse::<f64>().map_err(|_| {
        GeocodeError::TransportFailure(format!("malformed response: {field} is {value:?}"))
    })
}
