// SPDX-License-Identifier: GPL-3.0-only

//! Error types for the capture pipeline
//!
//! The taxonomy mirrors how failures are surfaced to the user:
//!
//! - [`CameraError`] is fatal to the session (the session closes),
//! - [`LocationError`] blocks capture but keeps the session alive,
//! - [`CaptureError`] covers processing failures that leave the live stream
//!   running so the user can retry.
//!
//! Geocoding and stamp-decode failures are deliberately *not* error types:
//! those paths degrade to a safe default inside the operation that failed.

use std::fmt;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Main application error type
#[derive(Debug, Clone)]
pub enum AppError {
    /// Camera-related errors (fatal to the capture session)
    Camera(CameraError),
    /// Geolocation errors (capture blocked, session alive)
    Location(LocationError),
    /// Capture pipeline errors (retryable)
    Capture(CaptureError),
    /// Complaint submission errors
    Submit(String),
    /// Configuration errors
    Config(String),
    /// Storage/filesystem errors
    Storage(String),
    /// Generic error with message
    Other(String),
}

/// Camera-specific errors
#[derive(Debug, Clone)]
pub enum CameraError {
    /// Camera access denied by the user or platform
    PermissionDenied,
    /// No camera devices found
    NoCameraFound,
    /// Camera initialization failed
    InitializationFailed(String),
    /// Camera disconnected during operation
    Disconnected,
    /// Camera is busy or in use
    Busy,
}

/// Geolocation errors
#[derive(Debug, Clone)]
pub enum LocationError {
    /// Location access denied by the user or platform
    PermissionDenied,
    /// No position could be determined
    Unavailable(String),
    /// The fix did not arrive in time
    Timeout,
}

/// Capture pipeline errors
#[derive(Debug, Clone)]
pub enum CaptureError {
    /// Operation called in a state that does not allow it
    InvalidState(&'static str),
    /// No frame available for capture
    NoFrameAvailable,
    /// Frame processing failed
    ProcessingFailed(String),
    /// Encoding failed
    EncodingFailed(String),
    /// Save failed
    SaveFailed(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Camera(e) => write!(f, "Camera error: {}", e),
            AppError::Location(e) => write!(f, "Location error: {}", e),
            AppError::Capture(e) => write!(f, "Capture error: {}", e),
            AppError::Submit(msg) => write!(f, "Submission error: {}", msg),
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
            AppError::Storage(msg) => write!(f, "Storage error: {}", msg),
            AppError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraError::PermissionDenied => write!(f, "Camera access denied or not available"),
            CameraError::NoCameraFound => write!(f, "No camera devices found"),
            CameraError::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            CameraError::Disconnected => write!(f, "Camera disconnected"),
            CameraError::Busy => write!(f, "Camera is busy"),
        }
    }
}

impl fmt::Display for LocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationError::PermissionDenied => write!(f, "Location access denied"),
            LocationError::Unavailable(msg) => write!(f, "Position unavailable: {}", msg),
            LocationError::Timeout => write!(f, "Timed out waiting for a GPS fix"),
        }
    }
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::InvalidState(op) => write!(f, "{} is not valid in the current state", op),
            CaptureError::NoFrameAvailable => write!(f, "No frame available for capture"),
            CaptureError::ProcessingFailed(msg) => write!(f, "Processing failed: {}", msg),
            CaptureError::EncodingFailed(msg) => write!(f, "Encoding failed: {}", msg),
            CaptureError::SaveFailed(msg) => write!(f, "Save failed: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}
impl std::error::Error for CameraError {}
impl std::error::Error for LocationError {}
impl std::error::Error for CaptureError {}

// Conversions from sub-errors to AppError
impl From<CameraError> for AppError {
    fn from(err: CameraError) -> Self {
        AppError::Camera(err)
    }
}

impl From<LocationError> for AppError {
    fn from(err: LocationError) -> Self {
        AppError::Location(err)
    }
}

impl From<CaptureError> for AppError {
    fn from(err: CaptureError) -> Self {
        AppError::Capture(err)
    }
}

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError::Other(msg)
    }
}

impl From<&str> for AppError {
    fn from(msg: &str) -> Self {
        AppError::Other(msg.to_string())
    }
}

// Conversions for I/O errors
impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<std::io::Error> for CaptureError {
    fn from(err: std::io::Error) -> Self {
        CaptureError::SaveFailed(err.to_string())
    }
}
