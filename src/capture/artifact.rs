// SPDX-License-Identifier: GPL-3.0-only

//! Finalized capture artifact

use chrono::{DateTime, Local};

use crate::geo::GeoFix;

/// A finalized, watermarked photo ready for submission.
///
/// Produced exactly once per capture cycle and discarded on retake. An
/// artifact is only ever exposed with both its fix and an address string
/// already resolved; stamping completes before the review step sees it.
#[derive(Debug, Clone)]
pub struct CapturedArtifact {
    /// Stamped JPEG bytes
    pub image: Vec<u8>,
    /// The fix the photo was stamped with
    pub location: GeoFix,
    /// Resolved address, or the coordinate fallback when geocoding failed
    pub address: String,
    /// Capture time, as burned into the stamp
    pub captured_at: DateTime<Local>,
}

impl CapturedArtifact {
    /// Timestamped filename for saving or upload
    pub fn suggested_filename(&self) -> String {
        format!("capture_{}.jpg", self.captured_at.format("%Y%m%d_%H%M%S"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggested_filename_shape() {
        let artifact = CapturedArtifact {
            image: Vec::new(),
            location: GeoFix::new(13.0827, 80.2707),
            address: "Chennai".to_string(),
            captured_at: Local::now(),
        };

        let name = artifact.suggested_filename();
        assert!(name.starts_with("capture_"));
        assert!(name.ends_with(".jpg"));
    }
}
