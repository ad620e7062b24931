// SPDX-License-Identifier: GPL-3.0-only

//! Smart Camera - geotagged photo capture for the civic complaint portal
//!
//! This library implements the capture side of the complaint reporting flow:
//! a citizen photographs an issue, the photo is stamped with its coordinates,
//! a reverse-geocoded address and a timestamp, and the finalized artifact is
//! submitted together with the complaint record.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`capture`]: Capture session state machine (open → capture → review → confirm)
//! - [`stamp`]: Geo-stamp engine that burns the watermark into the pixels
//! - [`geo`]: Coordinate types and the reverse-geocoding helper
//! - [`backends`]: Camera and geolocation provider abstraction
//! - [`submit`]: Complaint submission client
//! - [`config`]: User configuration handling

pub mod backends;
pub mod capture;
pub mod config;
pub mod constants;
pub mod errors;
pub mod geo;
pub mod stamp;
pub mod submit;

// Re-export commonly used types
pub use capture::{CaptureController, CaptureOutcome, CaptureState, CapturedArtifact};
pub use config::Config;
pub use geo::{GeoFix, geocoder::NominatimGeocoder};
pub use stamp::GeoStampEngine;
