// SPDX-License-Identifier: GPL-3.0-only

//! Geo-stamp engine
//!
//! Burns a geotag watermark into the pixels of a captured photo: a
//! semi-transparent band across the bottom edge carrying the resolved address
//! and a `timestamp | coordinates` line. The output canvas always matches the
//! source dimensions; only the bottom band is touched.
//!
//! Stamping is best-effort and never blocks submission: if the source bytes
//! cannot be decoded (or the overlay cannot be rendered), the engine returns
//! the original bytes unchanged.

pub mod text;

use chrono::{DateTime, Local};
use image::RgbImage;
use tracing::{debug, warn};

use crate::constants::watermark;
use crate::geo::format_coords;

/// Per-image watermark layout, derived from the source pixel width.
///
/// All values scale with resolution so the stamp occupies the same visual
/// fraction of a 640px preview and a 4000px camera still.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WatermarkSpec {
    /// Text size in pixels
    pub font_size: f32,
    /// Vertical distance between line slots
    pub line_height: f32,
    /// Inset from the canvas edges and around the text block
    pub padding: f32,
}

impl WatermarkSpec {
    /// Compute the layout for a source image of the given pixel width
    pub fn for_width(width: u32) -> Self {
        let font_size = (width as f32 * watermark::FONT_SCALE).max(watermark::MIN_FONT_SIZE);
        Self {
            font_size,
            line_height: font_size * watermark::LINE_HEIGHT_FACTOR,
            padding: font_size * watermark::PADDING_FACTOR,
        }
    }

    /// Height of the overlay band for the given number of text lines
    pub fn overlay_height(&self, lines: u32) -> u32 {
        (self.line_height * lines as f32 + self.padding * 2.0).round() as u32
    }
}

/// Geo-stamp engine
///
/// Pure transformation: `stamp` consumes encoded image bytes and produces a
/// new JPEG artifact. Re-stamping an already stamped image double-stamps; the
/// engine is only ever called once per raw capture in the intended flow.
pub struct GeoStampEngine {
    jpeg_quality: u8,
}

impl GeoStampEngine {
    /// Create an engine with the default output quality
    pub fn new() -> Self {
        Self {
            jpeg_quality: watermark::JPEG_QUALITY,
        }
    }

    /// Create an engine with an explicit JPEG quality (1-100)
    pub fn with_quality(jpeg_quality: u8) -> Self {
        Self { jpeg_quality }
    }

    /// Stamp an image with the current local time
    pub fn stamp(&self, image: &[u8], latitude: f64, longitude: f64, address: &str) -> Vec<u8> {
        self.stamp_at(image, latitude, longitude, address, Local::now())
    }

    /// Stamp an image with an explicit timestamp.
    ///
    /// The timestamp is the capture time, formatted with a fixed pattern
    /// rather than the client locale.
    pub fn stamp_at(
        &self,
        image: &[u8],
        latitude: f64,
        longitude: f64,
        address: &str,
        timestamp: DateTime<Local>,
    ) -> Vec<u8> {
        let decoded = match image::load_from_memory(image) {
            Ok(decoded) => decoded,
            Err(e) => {
                warn!(error = %e, "Stamp source failed to decode, passing original through");
                return image.to_vec();
            }
        };

        let Some(font) = text::stamp_font() else {
            warn!("Stamp font unavailable, passing original through");
            return image.to_vec();
        };

        let mut canvas = decoded.to_rgb8();
        let (width, height) = canvas.dimensions();
        let spec = WatermarkSpec::for_width(width);

        let coords = format_coords(latitude, longitude);
        let timestamp_line = format!(
            "{} | {}",
            timestamp.format(watermark::TIMESTAMP_FORMAT),
            coords
        );
        let max_text_width = width.saturating_sub((spec.padding * 2.0).round() as u32);
        let address_line = text::truncate_to_width(font, spec.font_size, max_text_width, address);

        // Lines bottom-up: timestamp + coordinates always at the very bottom,
        // the address in the slot above.
        let lines = [timestamp_line.as_str(), address_line.as_str()];

        darken_bottom_band(&mut canvas, spec.overlay_height(lines.len() as u32));

        let x = spec.padding.round() as i32;
        for (slot, line) in lines.iter().enumerate() {
            let slot_top = height as f32
                - spec.padding
                - spec.line_height * (slot as f32 + 1.0)
                + (spec.line_height - spec.font_size) / 2.0;
            text::draw_line_with_shadow(
                &mut canvas,
                font,
                spec.font_size,
                x,
                slot_top.round() as i32,
                line,
            );
        }

        debug!(width, height, quality = self.jpeg_quality, "Watermark rendered");

        match encode_jpeg(&canvas, self.jpeg_quality) {
            Ok(stamped) => stamped,
            Err(e) => {
                warn!(error = %e, "Stamped image failed to encode, passing original through");
                image.to_vec()
            }
        }
    }
}

impl Default for GeoStampEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Composite a semi-transparent black band over the bottom `band_height`
/// rows of the canvas.
fn darken_bottom_band(canvas: &mut RgbImage, band_height: u32) {
    let (width, height) = canvas.dimensions();
    let band_height = band_height.min(height);
    let keep = 1.0 - watermark::OVERLAY_OPACITY;

    for y in height - band_height..height {
        for x in 0..width {
            let pixel = canvas.get_pixel_mut(x, y);
            for channel in pixel.0.iter_mut() {
                *channel = (*channel as f32 * keep).round() as u8;
            }
        }
    }
}

/// Encode an RGB image as JPEG at the given quality
pub fn encode_jpeg(image: &RgbImage, quality: u8) -> Result<Vec<u8>, String> {
    let mut buffer = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut buffer);

    let mut encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, quality);
    encoder
        .encode(
            image.as_raw(),
            image.width(),
            image.height(),
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| format!("JPEG encoding failed: {}", e))?;

    Ok(buffer)
}
