// SPDX-License-Identifier: GPL-3.0-only

//! File-backed virtual camera
//!
//! Streams a still image from disk as if it were a live camera feed. This
//! keeps the full capture pipeline runnable on machines without camera
//! hardware (CI, the CLI, demos): `start_stream` loads and decodes the file,
//! `capture_photo` hands out the decoded frame.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::CameraBackend;
use super::types::{BackendError, BackendResult, CameraConstraints, CameraFrame};

/// Virtual camera backed by an image file
pub struct FileCamera {
    path: PathBuf,
    frame: Option<CameraFrame>,
}

impl FileCamera {
    /// Create a file camera for the given image path.
    ///
    /// The file is not touched until [`CameraBackend::start_stream`].
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            frame: None,
        }
    }

    fn load_frame(path: &Path) -> BackendResult<CameraFrame> {
        let image = image::open(path).map_err(|e| {
            BackendError::DeviceNotFound(format!("{}: {}", path.display(), e))
        })?;

        let frame = CameraFrame::from_rgb_image(image.to_rgb8());
        debug!(
            path = %path.display(),
            width = frame.width,
            height = frame.height,
            "Loaded file source frame"
        );
        Ok(frame)
    }
}

impl CameraBackend for FileCamera {
    fn start_stream(&mut self, constraints: &CameraConstraints) -> BackendResult<()> {
        info!(
            path = %self.path.display(),
            facing = %constraints.facing,
            "Starting file camera stream"
        );

        // A file has a fixed resolution; the ideal width/height hint from the
        // constraints cannot be negotiated here.
        self.frame = Some(Self::load_frame(&self.path)?);
        Ok(())
    }

    fn stop_stream(&mut self) {
        if self.frame.take().is_some() {
            debug!(path = %self.path.display(), "File camera stream stopped");
        }
    }

    fn is_streaming(&self) -> bool {
        self.frame.is_some()
    }

    fn capture_photo(&self) -> BackendResult<CameraFrame> {
        self.frame.clone().ok_or(BackendError::NotStreaming)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    fn write_test_image(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("smart-camera-{}-{}.png", name, std::process::id()));
        RgbImage::from_pixel(8, 6, image::Rgb([120, 60, 30]))
            .save(&path)
            .unwrap();
        path
    }

    #[test]
    fn test_stream_lifecycle() {
        let path = write_test_image("lifecycle");
        let mut camera = FileCamera::new(&path);

        assert!(!camera.is_streaming());
        assert!(matches!(
            camera.capture_photo(),
            Err(BackendError::NotStreaming)
        ));

        camera.start_stream(&CameraConstraints::default()).unwrap();
        assert!(camera.is_streaming());

        let frame = camera.capture_photo().unwrap();
        assert_eq!((frame.width, frame.height), (8, 6));

        camera.stop_stream();
        camera.stop_stream(); // idempotent
        assert!(!camera.is_streaming());

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_missing_file_is_device_not_found() {
        let mut camera = FileCamera::new("/nonexistent/frame.jpg");
        assert!(matches!(
            camera.start_stream(&CameraConstraints::default()),
            Err(BackendError::DeviceNotFound(_))
        ));
    }
}
