// SPDX-License-Identifier: GPL-3.0-only

//! Capture controller
//!
//! Owns the camera session and the GPS fix and walks the capture state
//! machine. Collaborators are injected: a [`CameraSessionManager`] for the
//! stream, a [`LocationProvider`] for the one-shot fix, an
//! [`AddressResolver`] for reverse geocoding and a [`GeoStampEngine`] for the
//! watermark.
//!
//! # Cancellation
//!
//! `open()`, retake and `close()` bump a generation counter. Every
//! asynchronous completion (location fix, geocode + stamp) re-checks the
//! counter before applying its result, so an operation from a superseded
//! cycle is discarded on arrival instead of resurrecting a stale artifact.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Local;
use tracing::{debug, error, info, warn};

use crate::backends::camera::{
    BackendError, CameraConstraints, CameraSessionManager,
};
use crate::backends::location::LocationProvider;
use crate::capture::CapturedArtifact;
use crate::errors::{AppError, CameraError, CaptureError};
use crate::geo::GeoFix;
use crate::geo::geocoder::AddressResolver;
use crate::stamp::GeoStampEngine;

/// Capture session states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    /// Session not yet opened
    Idle,
    /// Camera and location requested
    Acquiring,
    /// Live feed running; location may still be pending
    Streaming,
    /// Still frame taken, stamping in progress
    Captured,
    /// Stamped artifact ready for confirmation
    Review,
    /// Artifact handed to the caller (terminal)
    Confirmed,
    /// Session closed, resources released
    Closed,
}

impl std::fmt::Display for CaptureState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CaptureState::Idle => "idle",
            CaptureState::Acquiring => "acquiring",
            CaptureState::Streaming => "streaming",
            CaptureState::Captured => "captured",
            CaptureState::Review => "review",
            CaptureState::Confirmed => "confirmed",
            CaptureState::Closed => "closed",
        };
        write!(f, "{}", name)
    }
}

/// What a `capture()` call produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// Artifact stamped and ready for review
    Review,
    /// No GPS fix yet; capture was a no-op
    WaitingForFix,
    /// The session was closed or retaken while processing; the result was
    /// discarded
    Superseded,
}

/// Internal controller state, shared with the location callback task
struct ControllerState {
    state: CaptureState,
    fix: Option<GeoFix>,
    artifact: Option<CapturedArtifact>,
    /// Bumped on open/retake/close; async completions from older generations
    /// are discarded
    generation: u64,
}

/// Capture controller
///
/// Clone-able handle over shared state; all clones drive the same session.
#[derive(Clone)]
pub struct CaptureController {
    session: CameraSessionManager,
    location: Arc<dyn LocationProvider>,
    resolver: Arc<dyn AddressResolver>,
    engine: Arc<GeoStampEngine>,
    constraints: CameraConstraints,
    inner: Arc<Mutex<ControllerState>>,
}

impl CaptureController {
    /// Create a controller with default camera constraints (rear-facing,
    /// best-effort HD)
    pub fn new(
        session: CameraSessionManager,
        location: Arc<dyn LocationProvider>,
        resolver: Arc<dyn AddressResolver>,
        engine: Arc<GeoStampEngine>,
    ) -> Self {
        Self {
            session,
            location,
            resolver,
            engine,
            constraints: CameraConstraints::default(),
            inner: Arc::new(Mutex::new(ControllerState {
                state: CaptureState::Idle,
                fix: None,
                artifact: None,
                generation: 0,
            })),
        }
    }

    /// Override the camera constraints
    pub fn with_constraints(mut self, constraints: CameraConstraints) -> Self {
        self.constraints = constraints;
        self
    }

    /// Current session state
    pub fn state(&self) -> CaptureState {
        self.inner.lock().unwrap().state
    }

    /// The current GPS fix, if one has arrived
    pub fn current_fix(&self) -> Option<GeoFix> {
        self.inner.lock().unwrap().fix
    }

    /// Open the session: request the rear-facing camera and, concurrently, a
    /// one-shot geolocation fix.
    ///
    /// Camera failure is fatal: the session transitions to `Closed` and the
    /// error is returned. Location failure is non-fatal and only logged;
    /// capture stays blocked until a fix arrives.
    pub fn open(&self) -> Result<(), CameraError> {
        let generation = {
            let mut state = self.inner.lock().unwrap();
            if !matches!(state.state, CaptureState::Idle | CaptureState::Closed) {
                warn!(state = %state.state, "open() ignored in current state");
                return Ok(());
            }
            state.state = CaptureState::Acquiring;
            state.generation += 1;
            state.generation
        };

        self.start_stream_cycle(generation)
    }

    /// Start the camera for the given generation and, on success, spawn the
    /// location request for the same generation.
    fn start_stream_cycle(&self, generation: u64) -> Result<(), CameraError> {
        if let Err(e) = self.session.start_stream(&self.constraints) {
            error!(error = %e, "Camera access failed, closing session");
            let mut state = self.inner.lock().unwrap();
            state.state = CaptureState::Closed;
            return Err(map_backend_error(e));
        }

        {
            let mut state = self.inner.lock().unwrap();
            if state.generation != generation {
                // close() raced the camera start; release the device again
                drop(state);
                self.session.stop_stream();
                return Ok(());
            }
            state.state = CaptureState::Streaming;
        }

        info!("Camera stream running, requesting location fix");
        self.spawn_location_request(generation);
        Ok(())
    }

    /// Issue the one-shot geolocation request in the background.
    ///
    /// The completion locks the shared state and applies the fix only if the
    /// session is still in the same generation.
    fn spawn_location_request(&self, generation: u64) {
        let location = Arc::clone(&self.location);
        let inner = Arc::clone(&self.inner);

        tokio::spawn(async move {
            match location.current_fix().await {
                Ok(fix) => {
                    let mut state = inner.lock().unwrap();
                    if state.generation != generation {
                        debug!(%fix, "Discarding stale location fix");
                        return;
                    }
                    if matches!(state.state, CaptureState::Confirmed | CaptureState::Closed) {
                        return;
                    }
                    info!(%fix, "Location fix acquired");
                    state.fix = Some(fix);
                }
                Err(e) => {
                    // Non-fatal: the shutter stays disabled until a fix from
                    // a later request arrives
                    warn!(error = %e, "Could not fetch location for geotag");
                }
            }
        });
    }

    /// Wait until a fix is available or the timeout elapses.
    ///
    /// Convenience for non-interactive callers (CLI, tests); interactive
    /// front ends poll [`Self::current_fix`] instead.
    pub async fn wait_for_fix(&self, timeout: Duration) -> bool {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            if self.current_fix().is_some() {
                return true;
            }
            if tokio::time::Instant::now() >= deadline {
                return false;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }

    /// Capture the current frame, reverse-geocode the fix, stamp the photo
    /// and move to review.
    ///
    /// Valid only while streaming with a fix; without a fix this is a no-op
    /// that reports [`CaptureOutcome::WaitingForFix`] and issues no network
    /// calls. Processing failures leave the session streaming so the user can
    /// retry.
    pub async fn capture(&self) -> Result<CaptureOutcome, CaptureError> {
        let (fix, frame, generation) = {
            let mut state = self.inner.lock().unwrap();
            if state.state != CaptureState::Streaming {
                return Err(CaptureError::InvalidState("capture"));
            }
            let Some(fix) = state.fix else {
                warn!("Waiting for GPS location, capture ignored");
                return Ok(CaptureOutcome::WaitingForFix);
            };

            let frame = self
                .session
                .capture_photo()
                .map_err(|e| CaptureError::ProcessingFailed(e.to_string()))?;

            state.state = CaptureState::Captured;
            (fix, frame, state.generation)
        };

        debug!(width = frame.width, height = frame.height, "Frame captured, processing geotag");

        // Geocode first, then stamp; the stamp always carries an address
        // string, possibly the coordinate fallback.
        let address = self
            .resolver
            .resolve_address(fix.latitude, fix.longitude)
            .await;

        let captured_at = Local::now();
        let engine = Arc::clone(&self.engine);
        let stamp_address = address.clone();

        let stamped = tokio::task::spawn_blocking(move || {
            let rgb = frame
                .to_rgb_image()
                .ok_or_else(|| "Frame buffer does not match its dimensions".to_string())?;
            let raw = crate::stamp::encode_jpeg(&rgb, crate::constants::watermark::JPEG_QUALITY)?;
            Ok::<_, String>(engine.stamp_at(
                &raw,
                fix.latitude,
                fix.longitude,
                &stamp_address,
                captured_at,
            ))
        })
        .await
        .map_err(|e| CaptureError::ProcessingFailed(format!("Stamp task error: {}", e)))?;

        let stamped = match stamped {
            Ok(stamped) => stamped,
            Err(e) => {
                error!(error = %e, "Failed to process image");
                let mut state = self.inner.lock().unwrap();
                if state.generation == generation && state.state == CaptureState::Captured {
                    // Stream is still running; let the user retry
                    state.state = CaptureState::Streaming;
                }
                return Err(CaptureError::ProcessingFailed(e));
            }
        };

        let mut state = self.inner.lock().unwrap();
        if state.generation != generation || state.state != CaptureState::Captured {
            debug!("Capture superseded while processing, discarding artifact");
            return Ok(CaptureOutcome::Superseded);
        }

        state.artifact = Some(CapturedArtifact {
            image: stamped,
            location: fix,
            address,
            captured_at,
        });
        state.state = CaptureState::Review;
        drop(state);

        // The still is taken; the live stream is no longer needed
        self.session.stop_stream();
        info!("Artifact stamped and ready for review");

        Ok(CaptureOutcome::Review)
    }

    /// Discard the reviewed artifact and reopen the camera for another shot
    pub async fn retake(&self) -> Result<(), AppError> {
        let generation = {
            let mut state = self.inner.lock().unwrap();
            if state.state != CaptureState::Review {
                return Err(CaptureError::InvalidState("retake").into());
            }
            state.artifact = None;
            state.generation += 1;
            state.state = CaptureState::Acquiring;
            state.generation
        };

        info!("Retake: reopening camera");
        self.start_stream_cycle(generation)?;
        Ok(())
    }

    /// Hand the finalized artifact to the caller and end the session
    pub fn confirm(&self) -> Result<CapturedArtifact, CaptureError> {
        let artifact = {
            let mut state = self.inner.lock().unwrap();
            if state.state != CaptureState::Review {
                return Err(CaptureError::InvalidState("confirm"));
            }
            let artifact = state
                .artifact
                .take()
                .ok_or_else(|| CaptureError::ProcessingFailed("Artifact missing in review".into()))?;
            state.state = CaptureState::Confirmed;
            artifact
        };

        self.session.stop_stream();
        info!(size = artifact.image.len(), address = %artifact.address, "Capture confirmed");
        Ok(artifact)
    }

    /// Close the session from any state: stop the stream, clear the fix and
    /// discard any pending artifact. Idempotent.
    pub fn close(&self) {
        {
            let mut state = self.inner.lock().unwrap();
            state.generation += 1;
            state.fix = None;
            state.artifact = None;
            if state.state != CaptureState::Confirmed {
                state.state = CaptureState::Closed;
            }
        }
        self.session.stop_stream();
        debug!("Capture session closed");
    }
}

fn map_backend_error(e: BackendError) -> CameraError {
    match e {
        BackendError::PermissionDenied(_) => CameraError::PermissionDenied,
        BackendError::DeviceNotFound(_) | BackendError::NotAvailable(_) => {
            CameraError::NoCameraFound
        }
        other => CameraError::InitializationFailed(other.to_string()),
    }
}
