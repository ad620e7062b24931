// SPDX-License-Identifier: GPL-3.0-only

//! User configuration handling

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::constants::{capture, geocoding, watermark};
use crate::errors::{AppError, AppResult};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Reverse-geocoding endpoint (Nominatim-compatible `/reverse`)
    pub geocoder_endpoint: String,
    /// Timeout for a reverse-geocode round trip, in seconds
    pub geocoder_timeout_secs: u64,
    /// JPEG quality of stamped artifacts (1-100)
    pub jpeg_quality: u8,
    /// Ideal capture resolution width (best-effort hint to the camera)
    pub ideal_width: u32,
    /// Ideal capture resolution height (best-effort hint to the camera)
    pub ideal_height: u32,
    /// Base URL of the complaint portal API
    pub api_base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            geocoder_endpoint: geocoding::DEFAULT_ENDPOINT.to_string(),
            geocoder_timeout_secs: geocoding::REQUEST_TIMEOUT.as_secs(),
            jpeg_quality: watermark::JPEG_QUALITY,
            ideal_width: capture::IDEAL_WIDTH,
            ideal_height: capture::IDEAL_HEIGHT,
            api_base_url: "http://localhost:8080/api".to_string(),
        }
    }
}

impl Config {
    /// Path of the persisted configuration file
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("smart-camera").join("config.json"))
    }

    /// Load the configuration, falling back to defaults when the file is
    /// missing or unreadable
    pub fn load() -> Self {
        let Some(path) = Self::path() else {
            return Self::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    debug!(path = %path.display(), "Loaded configuration");
                    config
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Invalid configuration, using defaults");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Persist the configuration as pretty-printed JSON
    pub fn save(&self) -> AppResult<()> {
        let path = Self::path()
            .ok_or_else(|| AppError::Config("No configuration directory available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| AppError::Config(e.to_string()))?;
        std::fs::write(&path, contents)?;

        debug!(path = %path.display(), "Configuration saved");
        Ok(())
    }
}
