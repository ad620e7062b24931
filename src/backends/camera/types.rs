// SPDX-License-Identifier: GPL-3.0-only

//! Shared types for camera backends

use std::sync::Arc;
use std::time::Instant;

use image::RgbImage;

/// Which way the requested camera should face.
///
/// Complaint photos document street-level issues, so the pipeline asks for
/// the rear (environment-facing) camera by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FacingMode {
    /// User-facing camera
    Front,
    /// Environment-facing camera
    #[default]
    Rear,
}

impl std::fmt::Display for FacingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FacingMode::Front => write!(f, "front"),
            FacingMode::Rear => write!(f, "rear"),
        }
    }
}

/// Stream constraints handed to a backend at start.
///
/// Resolution is a best-effort hint; backends negotiate the closest mode they
/// can provide and report actual dimensions per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraConstraints {
    pub facing: FacingMode,
    pub ideal_width: u32,
    pub ideal_height: u32,
}

impl Default for CameraConstraints {
    fn default() -> Self {
        Self {
            facing: FacingMode::default(),
            ideal_width: crate::constants::capture::IDEAL_WIDTH,
            ideal_height: crate::constants::capture::IDEAL_HEIGHT,
        }
    }
}

/// Pixel format for camera frames
///
/// RGB is the canonical format used throughout the pipeline; backends that
/// produce anything else convert before handing frames out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// RGB - 24-bit, 3 bytes per pixel
    Rgb8,
    /// RGBA - 32-bit with alpha, 4 bytes per pixel
    Rgba8,
}

impl PixelFormat {
    /// Bytes per pixel for this format
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            PixelFormat::Rgb8 => 3,
            PixelFormat::Rgba8 => 4,
        }
    }
}

/// A single frame from the camera
#[derive(Debug, Clone)]
pub struct CameraFrame {
    pub width: u32,
    pub height: u32,
    /// Pixel data, tightly packed rows (zero-copy via Arc)
    pub data: Arc<[u8]>,
    /// Pixel format of the data
    pub format: PixelFormat,
    /// Timestamp when the frame was captured (for latency diagnostics)
    pub captured_at: Instant,
}

impl CameraFrame {
    /// Create a frame from an already-decoded RGB image
    pub fn from_rgb_image(image: RgbImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            width,
            height,
            data: Arc::from(image.into_raw()),
            format: PixelFormat::Rgb8,
            captured_at: Instant::now(),
        }
    }

    /// Convert the frame to an [`RgbImage`] for processing.
    ///
    /// Returns `None` when the buffer does not match the declared dimensions.
    pub fn to_rgb_image(&self) -> Option<RgbImage> {
        let expected = self.width as usize * self.height as usize * self.format.bytes_per_pixel();
        if self.data.len() < expected {
            return None;
        }

        match self.format {
            PixelFormat::Rgb8 => RgbImage::from_raw(self.width, self.height, self.data.to_vec()),
            PixelFormat::Rgba8 => {
                let rgb: Vec<u8> = self
                    .data
                    .chunks_exact(4)
                    .flat_map(|px| [px[0], px[1], px[2]])
                    .collect();
                RgbImage::from_raw(self.width, self.height, rgb)
            }
        }
    }
}

/// Result type for backend operations
pub type BackendResult<T> = Result<T, BackendError>;

/// Error types for backend operations
#[derive(Debug, Clone)]
pub enum BackendError {
    /// Backend is not available on this system
    NotAvailable(String),
    /// Access to the device was denied
    PermissionDenied(String),
    /// Camera device not found
    DeviceNotFound(String),
    /// Stream is not running
    NotStreaming,
    /// General I/O error
    IoError(String),
    /// Other errors
    Other(String),
}

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendError::NotAvailable(msg) => write!(f, "Backend not available: {}", msg),
            BackendError::PermissionDenied(msg) => write!(f, "Permission denied: {}", msg),
            BackendError::DeviceNotFound(msg) => write!(f, "Device not found: {}", msg),
            BackendError::NotStreaming => write!(f, "Stream is not running"),
            BackendError::IoError(msg) => write!(f, "I/O error: {}", msg),
            BackendError::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for BackendError {}
