//! Pattern extraction with the `image` crate.
//!
//! Decodes JPEG, PNG, GIF (first frame) and WebP, resamples to
//! `PATTERN_SIZE` × `PATTERN_SIZE`, and runs the imgsmlr wavelet algorithm
//! from [`super::wavelet`].
//!
//! # Usage
//!
//! ```no_run
//! use imgsig_core::backend::{ImageBackend, PatternBackend};
//!
//! let image_data = std::fs::read("image.jpg").unwrap();
//! let backend = ImageBackend::default();
//! let pattern = backend.decode_jpeg(&image_data).unwrap();
//! let signature = backend.pattern_to_signature(&pattern);
//! ```

use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat};
use tracing::trace;

use super::{wavelet, PatternBackend};
use crate::error::{ImgsigError, Result};
use crate::format::ContentType;
use crate::pattern::{Pattern, PATTERN_SIZE};
use crate::signature::Signature;

/// Backend decoding images in pure Rust.
#[derive(Debug, Clone, Copy)]
pub struct ImageBackend {
    filter: FilterType,
}

impl Default for ImageBackend {
    fn default() -> Self {
        Self::new(FilterType::Triangle)
    }
}

impl ImageBackend {
    /// Create a backend resampling with the given filter.
    pub fn new(filter: FilterType) -> Self {
        Self { filter }
    }

    pub fn filter(&self) -> FilterType {
        self.filter
    }

    /// Compute the (unshuffled) pattern of an already decoded image.
    pub fn pattern_from_image(&self, image: &DynamicImage) -> Pattern {
        let size = PATTERN_SIZE as u32;
        let thumb = imageops::resize(&image.to_rgb8(), size, size, self.filter);

        let mut source = wavelet::grey_pattern(|i, j| thumb.get_pixel(i as u32, j as u32).0);
        wavelet::normalize(&mut source);
        wavelet::wavelet_transform(source)
    }

    fn decode_as(&self, bytes: &[u8], content_type: ContentType, format: ImageFormat) -> Result<Pattern> {
        let image = image::load_from_memory_with_format(bytes, format).map_err(|e| {
            ImgsigError::NativeDecodeError {
                content_type,
                reason: e.to_string(),
            }
        })?;

        if image.width() == 0 || image.height() == 0 {
            return Err(ImgsigError::NativeDecodeError {
                content_type,
                reason: "image has no pixels".into(),
            });
        }

        trace!(
            content_type = %content_type,
            width = image.width(),
            height = image.height(),
            "Decoded image"
        );

        Ok(self.pattern_from_image(&image))
    }
}

impl PatternBackend for ImageBackend {
    fn decode_jpeg(&self, bytes: &[u8]) -> Result<Pattern> {
        self.decode_as(bytes, ContentType::Jpeg, ImageFormat::Jpeg)
    }

    fn decode_png(&self, bytes: &[u8]) -> Result<Pattern> {
        self.decode_as(bytes, ContentType::Png, ImageFormat::Png)
    }

    fn decode_gif(&self, bytes: &[u8]) -> Result<Pattern> {
        self.decode_as(bytes, ContentType::Gif, ImageFormat::Gif)
    }

    fn decode_webp(&self, bytes: &[u8]) -> Result<Pattern> {
        self.decode_as(bytes, ContentType::Webp, ImageFormat::WebP)
    }

    fn shuffle_pattern(&self, pattern: &Pattern) -> Pattern {
        wavelet::shuffle(pattern)
    }

    fn pattern_to_signature(&self, pattern: &Pattern) -> Signature {
        wavelet::signature(pattern)
    }

    fn name(&self) -> &'static str {
        "image"
    }
}
