// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for the geo-stamp engine

use chrono::Local;
use image::{GenericImageView, Rgb, RgbImage};
use smart_camera::GeoStampEngine;
use smart_camera::stamp::encode_jpeg;

fn sample_jpeg(width: u32, height: u32, color: Rgb<u8>) -> Vec<u8> {
    let image = RgbImage::from_pixel(width, height, color);
    encode_jpeg(&image, 92).unwrap()
}

#[test]
fn test_output_dimensions_match_input() {
    let engine = GeoStampEngine::new();
    let source = sample_jpeg(640, 480, Rgb([180, 180, 180]));

    let stamped = engine.stamp(&source, 13.0827, 80.2707, "Anna Salai, Chennai");
    let decoded = image::load_from_memory(&stamped).unwrap();

    assert_eq!(decoded.dimensions(), (640, 480));
}

#[test]
fn test_output_is_jpeg() {
    let engine = GeoStampEngine::new();
    let source = sample_jpeg(320, 240, Rgb([90, 120, 150]));

    let stamped = engine.stamp(&source, 13.0827, 80.2707, "Anna Salai");
    assert_eq!(&stamped[..2], &[0xff, 0xd8], "JPEG magic bytes");
    assert_ne!(stamped, source);
}

#[test]
fn test_decode_failure_passes_original_through() {
    let engine = GeoStampEngine::new();
    let garbage = b"definitely not an image".to_vec();

    let result = engine.stamp(&garbage, 13.0827, 80.2707, "Anna Salai");
    assert_eq!(result, garbage, "stamping is best-effort, never blocks");
}

#[test]
fn test_bottom_band_darkened_top_untouched() {
    let engine = GeoStampEngine::new();
    let source = sample_jpeg(800, 600, Rgb([200, 200, 200]));

    let stamped = engine.stamp_at(&source, 13.0827, 80.2707, "Anna Salai", Local::now());
    let decoded = image::load_from_memory(&stamped).unwrap().to_rgb8();

    let mean_row = |y: u32| -> f64 {
        let sum: u64 = (0..decoded.width())
            .map(|x| decoded.get_pixel(x, y).0[0] as u64)
            .sum();
        sum as f64 / decoded.width() as f64
    };

    // Bottom rows carry the 60% black overlay; the top of the image is only
    // subject to JPEG loss.
    assert!(mean_row(599) < 120.0, "overlay band should darken the bottom");
    assert!((mean_row(0) - 200.0).abs() < 10.0, "top rows unchanged");
}

#[test]
fn test_small_image_still_stamps() {
    let engine = GeoStampEngine::new();
    // Narrower than the minimum font size would suggest
    let source = sample_jpeg(120, 90, Rgb([50, 50, 50]));

    let stamped = engine.stamp(&source, 0.0, 0.0, "Somewhere");
    let decoded = image::load_from_memory(&stamped).unwrap();
    assert_eq!(decoded.dimensions(), (120, 90));
}

#[test]
fn test_very_long_address_does_not_overflow() {
    let engine = GeoStampEngine::new();
    let source = sample_jpeg(400, 300, Rgb([128, 128, 128]));
    let address = "Door No. 42, Second Cross Street, Behind the Old Market, \
                   Ward 113, Thousand Lights, Chennai, Tamil Nadu, 600002, India, Earth"
        .repeat(3);

    let stamped = engine.stamp(&source, 13.0827, 80.2707, &address);
    let decoded = image::load_from_memory(&stamped).unwrap();
    assert_eq!(decoded.dimensions(), (400, 300));
}
