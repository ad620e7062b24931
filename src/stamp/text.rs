// SPDX-License-Identifier: GPL-3.0-only

//! Text measurement and rendering for the watermark overlay
//!
//! Uses a bundled DejaVu Sans Bold face so stamps render identically on every
//! device; complaint photos from different phones must carry comparable
//! overlays.

use std::sync::OnceLock;

use ab_glyph::{FontRef, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_text_mut, text_size};
use tracing::error;

use crate::constants::watermark::AVG_CHAR_WIDTH_FACTOR;

const FONT_BYTES: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans-Bold.ttf");

const ELLIPSIS: &str = "...";

const TEXT_COLOR: Rgb<u8> = Rgb([255, 255, 255]);
const SHADOW_COLOR: Rgb<u8> = Rgb([0, 0, 0]);

/// The bundled stamp font.
///
/// Returns `None` if the embedded face fails to parse, which the engine
/// treats as a degrade-and-continue condition rather than a panic.
pub fn stamp_font() -> Option<&'static FontRef<'static>> {
    static FONT: OnceLock<Option<FontRef<'static>>> = OnceLock::new();
    FONT.get_or_init(|| match FontRef::try_from_slice(FONT_BYTES) {
        Ok(font) => Some(font),
        Err(e) => {
            error!(error = %e, "Bundled stamp font failed to parse");
            None
        }
    })
    .as_ref()
}

/// Measure the rendered pixel width of `text` at the given font size
pub fn measure_width(font: &FontRef<'_>, font_size: f32, text: &str) -> u32 {
    let scale = PxScale::from(font_size);
    text_size(scale, font, text).0
}

/// Truncate `text` so its rendered width fits within `max_width` pixels,
/// appending an ellipsis when anything was cut.
///
/// Truncation is measured in rendered pixels, not characters. When
/// measurement degenerates (zero-width glyphs), an approximate character
/// budget derived from the font size is used instead.
pub fn truncate_to_width(font: &FontRef<'_>, font_size: f32, max_width: u32, text: &str) -> String {
    if measure_width(font, font_size, text) <= max_width {
        return text.to_string();
    }

    let chars: Vec<char> = text.chars().collect();

    // Largest prefix whose width (plus ellipsis) still fits; the width is
    // monotone in the prefix length so binary search applies.
    let fits = |n: usize| -> bool {
        let candidate: String = chars[..n].iter().copied().chain(ELLIPSIS.chars()).collect();
        measure_width(font, font_size, &candidate) <= max_width
    };

    let mut lo = 0usize;
    let mut hi = chars.len();
    while lo < hi {
        let mid = (lo + hi + 1) / 2;
        if fits(mid) {
            lo = mid;
        } else {
            hi = mid - 1;
        }
    }

    if lo == 0 {
        // Measurement gave nothing usable; fall back to a character budget.
        let avg = font_size * AVG_CHAR_WIDTH_FACTOR;
        let budget = ((max_width as f32 / avg) as usize).saturating_sub(ELLIPSIS.len());
        lo = budget.min(chars.len());
    }

    let mut truncated: String = chars[..lo].iter().collect();
    truncated.push_str(ELLIPSIS);
    truncated
}

/// Draw a text line in white with a subtle drop shadow for legibility over
/// arbitrary backgrounds.
pub fn draw_line_with_shadow(
    canvas: &mut RgbImage,
    font: &FontRef<'_>,
    font_size: f32,
    x: i32,
    y: i32,
    text: &str,
) {
    let scale = PxScale::from(font_size);
    let shadow_offset = (font_size / 24.0).round().max(1.0) as i32;

    draw_text_mut(
        canvas,
        SHADOW_COLOR,
        x + shadow_offset,
        y + shadow_offset,
        scale,
        font,
        text,
    );
    draw_text_mut(canvas, TEXT_COLOR, x, y, scale, font, text);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_loads() {
        assert!(stamp_font().is_some());
    }

    #[test]
    fn test_measure_monotone_in_length() {
        let font = stamp_font().unwrap();
        let short = measure_width(font, 24.0, "abc");
        let long = measure_width(font, 24.0, "abcdef");
        assert!(long > short);
    }

    #[test]
    fn test_truncate_keeps_short_text() {
        let font = stamp_font().unwrap();
        assert_eq!(truncate_to_width(font, 24.0, 10_000, "Anna Salai"), "Anna Salai");
    }

    #[test]
    fn test_truncate_appends_ellipsis_and_fits() {
        let font = stamp_font().unwrap();
        let address = "123, Anna Salai, Thousand Lights, Chennai, Tamil Nadu, 600002, India";
        let max_width = 300;

        let truncated = truncate_to_width(font, 24.0, max_width, address);
        assert!(truncated.ends_with(ELLIPSIS));
        assert!(truncated.len() < address.len());
        assert!(measure_width(font, 24.0, &truncated) <= max_width);
    }

    #[test]
    fn test_truncate_is_char_safe() {
        let font = stamp_font().unwrap();
        // Multi-byte characters must not be split mid-codepoint
        let address = "சென்னை மாநகராட்சி தெற்கு மண்டலம் தெரு எண் நாற்பத்தைந்து";
        let truncated = truncate_to_width(font, 24.0, 200, address);
        assert!(truncated.ends_with(ELLIPSIS));
    }
}
