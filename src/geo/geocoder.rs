// SPDX-License-Identifier: GPL-3.0-only

//! Reverse geocoding against a Nominatim-style service
//!
//! Geocoding is best-effort throughout the pipeline: a stamped photo with a
//! coordinate string is still a valid artifact, so this helper never returns
//! an error. Any network, HTTP or parse failure resolves to the formatted
//! coordinate pair instead.

use std::time::Duration;

use futures::future::BoxFuture;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::constants::geocoding;
use crate::geo::format_coords;

/// Resolves a coordinate pair to a human-readable address.
///
/// Implementations must always produce *some* address string; callers rely on
/// the infallibility to keep geocoding failures out of the error path.
pub trait AddressResolver: Send + Sync {
    /// Resolve coordinates to an address, falling back to a formatted
    /// coordinate string on failure.
    fn resolve_address(&self, latitude: f64, longitude: f64) -> BoxFuture<'_, String>;
}

/// Relevant subset of a Nominatim reverse-geocoding response
#[derive(Debug, Deserialize)]
struct ReverseResponse {
    display_name: Option<String>,
}

/// Reverse geocoder backed by the OpenStreetMap Nominatim API
pub struct NominatimGeocoder {
    client: reqwest::Client,
    endpoint: String,
}

impl NominatimGeocoder {
    /// Create a geocoder against the default public Nominatim endpoint
    pub fn new() -> Self {
        Self::with_endpoint(geocoding::DEFAULT_ENDPOINT)
    }

    /// Create a geocoder against a custom endpoint (self-hosted Nominatim,
    /// or a stub server in tests)
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self::with_endpoint_and_timeout(endpoint, geocoding::REQUEST_TIMEOUT)
    }

    /// Create a geocoder with an explicit request timeout
    pub fn with_endpoint_and_timeout(endpoint: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(geocoding::USER_AGENT)
            .timeout(timeout)
            .build()
            // Builder only fails on malformed TLS/proxy setup; fall back to
            // the default client rather than making construction fallible.
            .unwrap_or_default();

        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    /// Resolve coordinates to an address string.
    ///
    /// Never fails: any transport or parse error yields the coordinate pair
    /// formatted to six decimal places.
    pub async fn resolve(&self, latitude: f64, longitude: f64) -> String {
        match self.reverse_lookup(latitude, longitude).await {
            Ok(Some(address)) if !address.is_empty() => {
                debug!(%latitude, %longitude, address = %address, "Reverse geocode succeeded");
                address
            }
            Ok(_) => {
                warn!(%latitude, %longitude, "Reverse geocode returned no display name");
                format_coords(latitude, longitude)
            }
            Err(e) => {
                warn!(%latitude, %longitude, error = %e, "Reverse geocode failed, using coordinates");
                format_coords(latitude, longitude)
            }
        }
    }

    async fn reverse_lookup(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Option<String>, reqwest::Error> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("format", "json".to_string()),
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json::<ReverseResponse>()
            .await?;

        Ok(response.display_name)
    }
}

impl Default for NominatimGeocoder {
    fn default() -> Self {
        Self::new()
    }
}

impl AddressResolver for NominatimGeocoder {
    fn resolve_address(&self, latitude: f64, longitude: f64) -> BoxFuture<'_, String> {
        Box::pin(self.resolve(latitude, longitude))
    }
}
