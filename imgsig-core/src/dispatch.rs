//! Routing image bytes to a backend and running the pattern transforms.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::backend::PatternBackend;
#[cfg(feature = "image-backend")]
use crate::backend::ImageBackend;
use crate::error::{ImgsigError, Result};
use crate::format::{sniff_label, ContentType};
use crate::pattern::Pattern;
use crate::signature::Signature;

/// Reason attached to patterns carrying no information.
pub const SOLID_COLOR_REASON: &str = "not supported solid color image";

/// Everything stored for one image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fingerprint {
    /// Format the bytes were decoded as
    pub content_type: ContentType,
    /// Shuffled pattern, as stored in a `pattern` column
    pub pattern: Pattern,
    /// Signature of the shuffled pattern, as stored in a `signature` column
    pub signature: Signature,
}

/// Classifies image bytes and drives a [`PatternBackend`].
///
/// Holds no mutable state; share it freely across threads when the backend
/// allows.
#[derive(Debug, Clone, Default)]
pub struct Fingerprinter<B> {
    backend: B,
}

#[cfg(feature = "image-backend")]
impl Fingerprinter<ImageBackend> {
    /// Fingerprinter over the default `image` crate backend.
    pub fn with_image_backend() -> Self {
        Self::new(ImageBackend::default())
    }
}

impl<B: PatternBackend> Fingerprinter<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Sniff the content type of `bytes`.
    pub fn classify(bytes: &[u8]) -> ContentType {
        ContentType::classify(bytes)
    }

    /// Decode image bytes into an owned pattern.
    ///
    /// # Errors
    ///
    /// - [`ImgsigError::UnsupportedFormat`] for empty input or bytes that are
    ///   not JPEG, PNG, GIF or WebP
    /// - [`ImgsigError::NativeDecodeError`] when the backend cannot decode the
    ///   bytes, or the image is a single solid colour
    pub fn decode(&self, bytes: &[u8]) -> Result<Pattern> {
        self.decode_classified(bytes).map(|(_, pattern)| pattern)
    }

    /// Like [`decode`](Self::decode), also returning the content type the
    /// bytes were routed by.
    pub fn decode_classified(&self, bytes: &[u8]) -> Result<(ContentType, Pattern)> {
        let content_type = ContentType::classify(bytes);
        let pattern = match content_type {
            ContentType::Jpeg => self.backend.decode_jpeg(bytes)?,
            ContentType::Png => self.backend.decode_png(bytes)?,
            ContentType::Gif => self.backend.decode_gif(bytes)?,
            ContentType::Webp => self.backend.decode_webp(bytes)?,
            ContentType::Unknown => {
                let label = sniff_label(bytes);
                debug!(bytes = bytes.len(), detected = label, "Unsupported content type");
                return Err(ImgsigError::UnsupportedFormat(label.to_string()));
            }
        };

        if pattern.is_degenerate() {
            return Err(ImgsigError::NativeDecodeError {
                content_type,
                reason: SOLID_COLOR_REASON.into(),
            });
        }

        debug!(
            content_type = %content_type,
            bytes = bytes.len(),
            backend = self.backend.name(),
            "Decoded pattern"
        );

        Ok((content_type, pattern))
    }

    /// Canonicalize a pattern. The input is left untouched.
    pub fn shuffle(&self, pattern: &Pattern) -> Pattern {
        self.backend.shuffle_pattern(pattern)
    }

    pub fn to_signature(&self, pattern: &Pattern) -> Signature {
        self.backend.pattern_to_signature(pattern)
    }

    /// Decode once and derive both stored values.
    ///
    /// The pattern is shuffled first and the signature is taken from the
    /// shuffled pattern, as imgsmlr does with
    /// `pattern2signature(shuffle_pattern(...))`.
    pub fn fingerprint(&self, bytes: &[u8]) -> Result<Fingerprint> {
        let (content_type, pattern) = self.decode_classified(bytes)?;
        let shuffled = self.shuffle(&pattern);
        Ok(Fingerprint {
            content_type,
            signature: self.to_signature(&shuffled),
            pattern: shuffled,
        })
    }

    /// Decode, shuffle and return only the signature.
    pub fn signature(&self, bytes: &[u8]) -> Result<Signature> {
        self.decode(bytes)
            .map(|pattern| self.to_signature(&self.shuffle(&pattern)))
    }
}
