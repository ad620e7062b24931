// SPDX-License-Identifier: GPL-3.0-only

//! Geolocation provider abstraction
//!
//! The capture session issues exactly one fix request per `open()`/retake
//! cycle. Providers expose a one-shot asynchronous "get current fix" contract;
//! failure is non-fatal to the session (capture stays blocked until a fix
//! arrives from a later request).

use futures::future::BoxFuture;

use crate::errors::LocationError;
use crate::geo::GeoFix;

/// One-shot geolocation source
pub trait LocationProvider: Send + Sync {
    /// Request the current position.
    ///
    /// May take arbitrarily long (permission prompt, satellite acquisition)
    /// and may fail with denied/unavailable.
    fn current_fix(&self) -> BoxFuture<'_, Result<GeoFix, LocationError>>;
}

/// Provider that always reports a fixed position.
///
/// Used by the CLI, where coordinates come from the command line instead of a
/// GNSS receiver, and handy as a deterministic provider in tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation {
    fix: GeoFix,
}

impl FixedLocation {
    /// Create a provider reporting the given coordinates
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            fix: GeoFix::new(latitude, longitude),
        }
    }
}

impl LocationProvider for FixedLocation {
    fn current_fix(&self) -> BoxFuture<'_, Result<GeoFix, LocationError>> {
        let fix = self.fix;
        Box::pin(async move { Ok(fix) })
    }
}
