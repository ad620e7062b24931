// SPDX-License-Identifier: GPL-3.0-only

//! Complaint submission client
//!
//! Posts a complaint record together with its finalized artifact to the
//! portal API as a multipart form. The auth token is passed per call rather
//! than held in module state; the caller owns the session.

use reqwest::multipart;
use tracing::{info, warn};

use crate::capture::CapturedArtifact;
use crate::errors::{AppError, AppResult};

/// A complaint record to lodge
#[derive(Debug, Clone)]
pub struct NewComplaint {
    pub title: String,
    pub description: String,
    pub category: String,
}

/// Client for the complaint portal REST API
pub struct ComplaintClient {
    client: reqwest::Client,
    base_url: String,
}

impl ComplaintClient {
    /// Create a client against the given API base URL (e.g.
    /// `http://localhost:8080/api`)
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Lodge a complaint with its stamped photo.
    ///
    /// The artifact's coordinates and address ride along as form fields so
    /// the backend can index the complaint without re-reading EXIF data.
    pub async fn create_complaint(
        &self,
        token: &str,
        complaint: &NewComplaint,
        artifact: &CapturedArtifact,
    ) -> AppResult<()> {
        let image_part = multipart::Part::bytes(artifact.image.clone())
            .file_name(artifact.suggested_filename())
            .mime_str("image/jpeg")
            .map_err(|e| AppError::Submit(e.to_string()))?;

        let form = multipart::Form::new()
            .text("title", complaint.title.clone())
            .text("description", complaint.description.clone())
            .text("category", complaint.category.clone())
            .text("latitude", artifact.location.latitude.to_string())
            .text("longitude", artifact.location.longitude.to_string())
            .text("address", artifact.address.clone())
            .part("image", image_part);

        let url = format!("{}/complaints", self.base_url);
        info!(url = %url, title = %complaint.title, "Submitting complaint");

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::Submit(e.to_string()))?;

        if let Err(e) = response.error_for_status_ref() {
            warn!(status = ?response.status(), "Complaint submission rejected");
            return Err(AppError::Submit(e.to_string()));
        }

        info!("Complaint submitted successfully");
        Ok(())
    }
}
