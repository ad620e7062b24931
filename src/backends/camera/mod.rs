// SPDX-License-Identifier: GPL-3.0-only

//! Camera backend abstraction
//!
//! ```text
//! ┌──────────────────────┐
//! │  CaptureController   │
//! └──────────┬───────────┘
//!            │
//!            ▼
//! ┌──────────────────────┐
//! │ CameraSessionManager │  ← Single-stream invariant, thread-safe access
//! └──────────┬───────────┘
//!            │
//!            ▼
//! ┌──────────────────────┐
//! │  CameraBackend trait │  ← Common interface
//! └──────────┬───────────┘
//!            │
//!            ▼
//!      ┌───────────┐
//!      │FileCamera │  ← File-backed virtual camera (also: test fakes)
//!      └───────────┘
//! ```

pub mod file_source;
pub mod manager;
pub mod types;

pub use file_source::FileCamera;
pub use manager::CameraSessionManager;
pub use types::*;

/// Camera backend trait
///
/// A backend owns exactly one (potential) media stream. Starting a stream
/// acquires the device; stopping it releases the hardware. `stop_stream` must
/// be idempotent.
pub trait CameraBackend: Send + Sync {
    /// Start the live stream with the given constraints.
    ///
    /// Resolution in the constraints is a best-effort hint. A denied device
    /// maps to [`BackendError::PermissionDenied`], a missing one to
    /// [`BackendError::DeviceNotFound`]; both are fatal to the session.
    fn start_stream(&mut self, constraints: &CameraConstraints) -> BackendResult<()>;

    /// Stop the live stream and release the device. Idempotent.
    fn stop_stream(&mut self);

    /// Whether a stream is currently running
    fn is_streaming(&self) -> bool;

    /// Capture a still frame from the running stream.
    ///
    /// The frame data is copied immediately so the preview is not blocked.
    fn capture_photo(&self) -> BackendResult<CameraFrame>;
}
