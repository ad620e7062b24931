// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

use std::time::Duration;

/// Watermark layout policy
///
/// All watermark dimensions are derived from the source image width so the
/// stamp scales with resolution. The values here are the tuning knobs; the
/// per-image pixel values are computed by `stamp::WatermarkSpec::for_width`.
pub mod watermark {
    /// Font size as a fraction of the source image width
    pub const FONT_SCALE: f32 = 0.035;

    /// Minimum font size in pixels (readability floor for small images)
    pub const MIN_FONT_SIZE: f32 = 24.0;

    /// Line height as a multiple of the font size
    pub const LINE_HEIGHT_FACTOR: f32 = 1.4;

    /// Padding (overlay inset) as a multiple of the font size
    pub const PADDING_FACTOR: f32 = 0.8;

    /// Opacity of the black overlay band behind the text (0.0 - 1.0)
    pub const OVERLAY_OPACITY: f32 = 0.6;

    /// JPEG quality for the re-encoded stamped image (0-100)
    pub const JPEG_QUALITY: u8 = 92;

    /// Timestamp format burned into the stamp.
    /// Fixed rather than locale-dependent so stamps are comparable.
    pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    /// Decimal places used when formatting coordinates into the stamp
    pub const COORD_DECIMALS: usize = 6;

    /// Average glyph width as a fraction of the font size.
    /// Fallback character budget when exact text measurement is unavailable.
    pub const AVG_CHAR_WIDTH_FACTOR: f32 = 0.6;
}

/// Camera capture defaults
pub mod capture {
    /// Ideal capture width requested from the camera (best-effort)
    pub const IDEAL_WIDTH: u32 = 1280;

    /// Ideal capture height requested from the camera (best-effort)
    pub const IDEAL_HEIGHT: u32 = 720;
}

/// Reverse geocoding service defaults
pub mod geocoding {
    use super::Duration;

    /// Default Nominatim reverse-geocoding endpoint
    pub const DEFAULT_ENDPOINT: &str = "https://nominatim.openstreetmap.org/reverse";

    /// Nominatim requires an identifying user agent
    pub const USER_AGENT: &str = concat!("smart-camera/", env!("CARGO_PKG_VERSION"));

    /// Timeout for a single reverse-geocode round trip
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
}
