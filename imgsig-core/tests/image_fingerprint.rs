//! End-to-end fingerprinting of real encoded images.
//!
//! Each supported format is produced with the `image` encoders and pushed
//! through `Fingerprinter::with_image_backend`, then through the text codec.

#![cfg(feature = "image-backend")]

use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb, RgbImage};
use imgsig_core::{
    ContentType, Fingerprinter, ImageBackend, ImgsigError, Pattern, Precision, Signature,
    SOLID_COLOR_REASON,
};
use std::io::Cursor;

/// Gradient with a coarse grid so every wavelet band carries energy.
fn create_test_image(width: u32, height: u32) -> RgbImage {
    let mut img = ImageBuffer::new(width, height);

    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let r = ((x as f32 / width as f32) * 255.0) as u8;
        let g = ((y as f32 / height as f32) * 255.0) as u8;
        let b = (((x + y) as f32 / (width + height) as f32) * 200.0) as u8;

        let grid = if (x / 20 + y / 20) % 2 == 0 { 30 } else { 0 };
        *pixel = Rgb([r.saturating_add(grid), g, b]);
    }

    img
}

/// Concentric rings, unrelated to the gradient above.
fn create_rings_image(width: u32, height: u32) -> RgbImage {
    let (cx, cy) = (width as f32 / 2.0, height as f32 / 2.0);
    ImageBuffer::from_fn(width, height, |x, y| {
        let d = ((x as f32 - cx).powi(2) + (y as f32 - cy).powi(2)).sqrt();
        if (d / 12.0) as u32 % 2 == 0 {
            Rgb([250, 250, 250])
        } else {
            Rgb([5, 5, 5])
        }
    })
}

fn encode(img: DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    img.write_to(&mut buffer, format).expect("encoding failed");
    buffer.into_inner()
}

fn encode_jpeg(img: &RgbImage, quality: u8) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buffer, quality);
    DynamicImage::ImageRgb8(img.clone())
        .write_with_encoder(encoder)
        .expect("JPEG encoding failed");
    buffer.into_inner()
}

fn distance(a: &Signature, b: &Signature) -> f32 {
    a.values()
        .iter()
        .zip(b.values())
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f32>()
        .sqrt()
}

// ============================================================================
// Format coverage
// ============================================================================

#[test]
fn test_every_supported_format_fingerprints() {
    let fingerprinter = Fingerprinter::with_image_backend();
    let img = create_test_image(160, 120);

    let cases = [
        (encode_jpeg(&img, 90), ContentType::Jpeg),
        (encode(DynamicImage::ImageRgb8(img.clone()), ImageFormat::Png), ContentType::Png),
        (
            encode(DynamicImage::ImageRgba8(DynamicImage::ImageRgb8(img.clone()).to_rgba8()), ImageFormat::Gif),
            ContentType::Gif,
        ),
        (encode(DynamicImage::ImageRgb8(img.clone()), ImageFormat::WebP), ContentType::Webp),
    ];

    for (bytes, expected) in cases {
        assert_eq!(Fingerprinter::<ImageBackend>::classify(&bytes), expected);

        let fingerprint = fingerprinter
            .fingerprint(&bytes)
            .unwrap_or_else(|e| panic!("{expected} failed: {e}"));
        assert_eq!(fingerprint.content_type, expected);
        assert!(fingerprint.signature.values().iter().all(|v| v.is_finite()));
        assert!(fingerprint.pattern.rows().iter().flatten().all(|v| v.is_finite()));
    }
}

#[test]
fn test_lossless_formats_agree() {
    let fingerprinter = Fingerprinter::with_image_backend();
    let img = create_test_image(128, 128);

    let png = fingerprinter
        .signature(&encode(DynamicImage::ImageRgb8(img.clone()), ImageFormat::Png))
        .unwrap();
    let webp = fingerprinter
        .signature(&encode(DynamicImage::ImageRgb8(img), ImageFormat::WebP))
        .unwrap();

    assert_eq!(png, webp);
}

#[test]
fn test_similar_images_are_closer_than_different_ones() {
    let fingerprinter = Fingerprinter::with_image_backend();
    let gradient = create_test_image(200, 200);

    let original = fingerprinter
        .signature(&encode(DynamicImage::ImageRgb8(gradient.clone()), ImageFormat::Png))
        .unwrap();
    let compressed = fingerprinter.signature(&encode_jpeg(&gradient, 70)).unwrap();
    let rings = fingerprinter
        .signature(&encode(DynamicImage::ImageRgb8(create_rings_image(200, 200)), ImageFormat::Png))
        .unwrap();

    let near = distance(&original, &compressed);
    let far = distance(&original, &rings);
    assert!(near < far, "jpeg distance {near} should be below {far}");
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn test_fingerprint_is_deterministic() {
    let fingerprinter = Fingerprinter::with_image_backend();
    let bytes = encode(DynamicImage::ImageRgb8(create_test_image(90, 70)), ImageFormat::Png);

    let a = fingerprinter.fingerprint(&bytes).unwrap();
    let b = fingerprinter.fingerprint(&bytes).unwrap();
    assert_eq!(a, b);
    assert_eq!(
        a.signature.encode(Precision::DEFAULT),
        b.signature.encode(Precision::DEFAULT)
    );
}

#[test]
fn test_shuffle_is_stable_and_pure() {
    let fingerprinter = Fingerprinter::with_image_backend();
    let bytes = encode(DynamicImage::ImageRgb8(create_rings_image(64, 64)), ImageFormat::Png);
    let pattern = fingerprinter.decode(&bytes).unwrap();
    let before = pattern.clone();

    let shuffled = fingerprinter.shuffle(&pattern);
    assert_eq!(pattern, before);
    assert_eq!(shuffled, fingerprinter.shuffle(&before));
    assert_ne!(shuffled, pattern);
}

// ============================================================================
// Stored text
// ============================================================================

#[test]
fn test_stored_text_round_trips() {
    let fingerprinter = Fingerprinter::with_image_backend();
    let bytes = encode_jpeg(&create_test_image(120, 120), 85);
    let fingerprint = fingerprinter.fingerprint(&bytes).unwrap();

    let precision = Precision::DEFAULT;
    let tolerance = precision.resolution() as f32;

    let pattern = Pattern::decode(&fingerprint.pattern.encode(precision)).unwrap();
    for (a, b) in pattern
        .rows()
        .iter()
        .flatten()
        .zip(fingerprint.pattern.rows().iter().flatten())
    {
        assert!((a - b).abs() <= tolerance + f32::EPSILON * b.abs());
    }

    let signature: Signature = fingerprint.signature.to_string().parse().unwrap();
    assert!(distance(&signature, &fingerprint.signature) <= tolerance * 4.0 + 1e-6);
}

#[test]
fn test_json_serialization() {
    let fingerprinter = Fingerprinter::with_image_backend();
    let bytes = encode(DynamicImage::ImageRgb8(create_test_image(64, 48)), ImageFormat::Png);
    let fingerprint = fingerprinter.fingerprint(&bytes).unwrap();

    let json = serde_json::to_string(&fingerprint).unwrap();
    assert!(json.contains("\"content_type\":\"png\""));

    let restored: imgsig_core::Fingerprint = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, fingerprint);
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_unsupported_inputs() {
    let fingerprinter = Fingerprinter::with_image_backend();

    let cases: [(&[u8], &str); 4] = [
        (b"", "unknown"),
        (b"BM\x36\x00\x00\x00\x00\x00", "image/bmp"),
        (b"%PDF-1.7\n", "application/pdf"),
        (b"hello, world", "text/plain"),
    ];

    for (bytes, label) in cases {
        assert_eq!(
            fingerprinter.fingerprint(bytes).unwrap_err(),
            ImgsigError::UnsupportedFormat(label.to_string())
        );
    }
}

#[test]
fn test_corrupt_images_fail_cleanly() {
    let fingerprinter = Fingerprinter::with_image_backend();

    let png = encode(DynamicImage::ImageRgb8(create_test_image(64, 64)), ImageFormat::Png);
    let err = fingerprinter.fingerprint(&png[..png.len() / 2]).unwrap_err();
    assert!(matches!(
        err,
        ImgsigError::NativeDecodeError { content_type: ContentType::Png, .. }
    ));

    // Valid JPEG magic, garbage afterwards
    let err = fingerprinter
        .decode(&[0xFF, 0xD8, 0xFF, 0xE0, 0x13, 0x37, 0x00, 0x00])
        .unwrap_err();
    assert!(matches!(
        err,
        ImgsigError::NativeDecodeError { content_type: ContentType::Jpeg, .. }
    ));
}

#[test]
fn test_solid_colour_image_rejected() {
    let fingerprinter = Fingerprinter::with_image_backend();
    let solid = ImageBuffer::from_pixel(50, 50, Rgb([90u8, 160, 30]));
    let bytes = encode(DynamicImage::ImageRgb8(solid), ImageFormat::Png);

    assert_eq!(
        fingerprinter.fingerprint(&bytes).unwrap_err(),
        ImgsigError::NativeDecodeError {
            content_type: ContentType::Png,
            reason: SOLID_COLOR_REASON.to_string(),
        }
    );
}
