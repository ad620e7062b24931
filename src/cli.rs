// SPDX-License-Identifier: GPL-3.0-only

//! CLI command handlers

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use tracing::info;

use smart_camera::backends::camera::{CameraConstraints, CameraSessionManager, FileCamera};
use smart_camera::backends::location::FixedLocation;
use smart_camera::capture::{CaptureController, CaptureOutcome, CapturedArtifact};
use smart_camera::geo::GeoFix;
use smart_camera::geo::geocoder::NominatimGeocoder;
use smart_camera::stamp::GeoStampEngine;
use smart_camera::submit::{ComplaintClient, NewComplaint};
use smart_camera::Config;

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn geocoder(config: &Config) -> NominatimGeocoder {
    NominatimGeocoder::with_endpoint_and_timeout(
        &config.geocoder_endpoint,
        Duration::from_secs(config.geocoder_timeout_secs),
    )
}

/// Reverse-geocode a coordinate pair and print the address
pub async fn resolve(lat: f64, lng: f64) -> CliResult {
    let config = Config::load();
    let address = geocoder(&config).resolve(lat, lng).await;
    println!("{}", address);
    Ok(())
}

/// Stamp an existing image file with a geotag watermark
pub async fn stamp(
    input: PathBuf,
    lat: f64,
    lng: f64,
    address: Option<String>,
    output: Option<PathBuf>,
) -> CliResult {
    let config = Config::load();
    let bytes = tokio::fs::read(&input).await?;

    let address = match address {
        Some(address) => address,
        None => geocoder(&config).resolve(lat, lng).await,
    };

    let engine = GeoStampEngine::with_quality(config.jpeg_quality);
    let stamped =
        tokio::task::spawn_blocking(move || engine.stamp(&bytes, lat, lng, &address)).await?;

    let output = output.unwrap_or_else(|| {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "photo".to_string());
        input.with_file_name(format!("{}_stamped.jpg", stem))
    });

    tokio::fs::write(&output, stamped).await?;
    println!("{}", output.display());
    Ok(())
}

/// Run the full capture pipeline: file-backed camera, fixed location,
/// reverse geocode, stamp, confirm, save
pub async fn capture(source: PathBuf, lat: f64, lng: f64, output: Option<PathBuf>) -> CliResult {
    let config = Config::load();

    let session = CameraSessionManager::new(Box::new(FileCamera::new(&source)));
    let controller = CaptureController::new(
        session,
        Arc::new(FixedLocation::new(lat, lng)),
        Arc::new(geocoder(&config)),
        Arc::new(GeoStampEngine::with_quality(config.jpeg_quality)),
    )
    .with_constraints(CameraConstraints {
        ideal_width: config.ideal_width,
        ideal_height: config.ideal_height,
        ..CameraConstraints::default()
    });

    controller.open()?;
    if !controller.wait_for_fix(Duration::from_secs(5)).await {
        controller.close();
        return Err("Timed out waiting for a GPS fix".into());
    }

    match controller.capture().await? {
        CaptureOutcome::Review => {}
        other => {
            controller.close();
            return Err(format!("Capture did not reach review: {:?}", other).into());
        }
    }

    let artifact = controller.confirm()?;
    let path = save_artifact(&artifact, output).await?;
    println!("{}", path.display());
    Ok(())
}

/// Submit an already-stamped photo as a complaint
#[allow(clippy::too_many_arguments)]
pub async fn submit(
    image: PathBuf,
    lat: f64,
    lng: f64,
    address: Option<String>,
    title: String,
    description: String,
    category: String,
    token: String,
) -> CliResult {
    let config = Config::load();
    let bytes = tokio::fs::read(&image).await?;

    let address = match address {
        Some(address) => address,
        None => geocoder(&config).resolve(lat, lng).await,
    };

    let artifact = CapturedArtifact {
        image: bytes,
        location: GeoFix::new(lat, lng),
        address,
        captured_at: Local::now(),
    };

    let complaint = NewComplaint {
        title,
        description,
        category,
    };

    ComplaintClient::new(&config.api_base_url)
        .create_complaint(&token, &complaint, &artifact)
        .await?;

    println!("Complaint submitted");
    Ok(())
}

/// Write an artifact to the given path, or to the default pictures directory
async fn save_artifact(
    artifact: &CapturedArtifact,
    output: Option<PathBuf>,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let path = match output {
        Some(path) => path,
        None => {
            let dir = dirs::picture_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join("smart-camera");
            tokio::fs::create_dir_all(&dir).await?;
            dir.join(artifact.suggested_filename())
        }
    };

    tokio::fs::write(&path, &artifact.image).await?;
    info!(path = %path.display(), "Artifact saved");
    Ok(path)
}
