// SPDX-License-Identifier: GPL-3.0-only

//! Camera session lifecycle manager
//!
//! The manager provides:
//! - Stream lifecycle management (start, stop)
//! - The single-stream invariant: at most one open media stream at any time
//! - Thread-safe backend access

use std::sync::{Arc, Mutex};

use tracing::info;

use super::CameraBackend;
use super::types::{BackendResult, CameraConstraints, CameraFrame};

/// Internal manager state
struct SessionState {
    /// The active backend instance
    backend: Box<dyn CameraBackend>,
}

/// Camera session manager
///
/// Owns the backend and guarantees at most one open stream: starting a new
/// stream stops any previous one first (retake relies on this).
/// Thread-safe and can be shared across tasks.
#[derive(Clone)]
pub struct CameraSessionManager {
    state: Arc<Mutex<SessionState>>,
}

impl CameraSessionManager {
    /// Create a manager around a backend
    pub fn new(backend: Box<dyn CameraBackend>) -> Self {
        Self {
            state: Arc::new(Mutex::new(SessionState { backend })),
        }
    }

    /// Start the live stream, stopping any previous stream first
    pub fn start_stream(&self, constraints: &CameraConstraints) -> BackendResult<()> {
        let mut state = self.state.lock().unwrap();

        if state.backend.is_streaming() {
            info!("Stopping previous stream before restart");
            state.backend.stop_stream();
        }

        state.backend.start_stream(constraints)
    }

    /// Stop the live stream and release the device. Idempotent.
    pub fn stop_stream(&self) {
        let mut state = self.state.lock().unwrap();
        state.backend.stop_stream();
    }

    /// Whether a stream is currently open
    pub fn is_streaming(&self) -> bool {
        self.state.lock().unwrap().backend.is_streaming()
    }

    /// Capture a still frame from the running stream
    pub fn capture_photo(&self) -> BackendResult<CameraFrame> {
        let state = self.state.lock().unwrap();
        state.backend.capture_photo()
    }
}

impl std::fmt::Debug for CameraSessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock().unwrap();
        f.debug_struct("CameraSessionManager")
            .field("streaming", &state.backend.is_streaming())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::camera::types::{BackendError, PixelFormat};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts start/stop calls so tests can check the single-stream invariant
    struct CountingCamera {
        streaming: bool,
        starts: Arc<AtomicUsize>,
        stops: Arc<AtomicUsize>,
    }

    impl CameraBackend for CountingCamera {
        fn start_stream(&mut self, _constraints: &CameraConstraints) -> BackendResult<()> {
            self.starts.fetch_add(1, Ordering::SeqCst);
            self.streaming = true;
            Ok(())
        }

        fn stop_stream(&mut self) {
            if self.streaming {
                self.stops.fetch_add(1, Ordering::SeqCst);
                self.streaming = false;
            }
        }

        fn is_streaming(&self) -> bool {
            self.streaming
        }

        fn capture_photo(&self) -> BackendResult<CameraFrame> {
            if !self.streaming {
                return Err(BackendError::NotStreaming);
            }
            Ok(CameraFrame {
                width: 2,
                height: 2,
                data: Arc::from(vec![0u8; 12]),
                format: PixelFormat::Rgb8,
                captured_at: std::time::Instant::now(),
            })
        }
    }

    #[test]
    fn test_restart_stops_previous_stream() {
        let starts = Arc::new(AtomicUsize::new(0));
        let stops = Arc::new(AtomicUsize::new(0));
        let manager = CameraSessionManager::new(Box::new(CountingCamera {
            streaming: false,
            starts: Arc::clone(&starts),
            stops: Arc::clone(&stops),
        }));

        manager.start_stream(&CameraConstraints::default()).unwrap();
        manager.start_stream(&CameraConstraints::default()).unwrap();

        assert_eq!(starts.load(Ordering::SeqCst), 2);
        assert_eq!(stops.load(Ordering::SeqCst), 1, "old stream stopped before restart");
        assert!(manager.is_streaming());
    }

    #[test]
    fn test_stop_is_idempotent() {
        let manager = CameraSessionManager::new(Box::new(CountingCamera {
            streaming: false,
            starts: Arc::new(AtomicUsize::new(0)),
            stops: Arc::new(AtomicUsize::new(0)),
        }));

        manager.stop_stream();
        manager.stop_stream();
        assert!(!manager.is_streaming());
    }
}
