// SPDX-License-Identifier: GPL-3.0-only

//! Coordinate types and formatting
//!
//! A [`GeoFix`] is a single reading from the device's location provider. It is
//! immutable once obtained; a capture session replaces it wholesale when a
//! fresh request completes, it is never mutated in place.

pub mod geocoder;

use serde::{Deserialize, Serialize};

use crate::constants::watermark::COORD_DECIMALS;

/// A single latitude/longitude reading from the location provider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoFix {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Horizontal accuracy in meters, when the provider reports it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
}

impl GeoFix {
    /// Create a fix without accuracy information
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            accuracy: None,
        }
    }
}

impl std::fmt::Display for GeoFix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", format_coords(self.latitude, self.longitude))
    }
}

/// Format a coordinate pair to the fixed precision used throughout the
/// pipeline (stamp text, geocoder fallback, submission payload).
pub fn format_coords(latitude: f64, longitude: f64) -> String {
    format!(
        "{:.prec$}, {:.prec$}",
        latitude,
        longitude,
        prec = COORD_DECIMALS
    )
}
