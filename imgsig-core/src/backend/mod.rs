//! Pattern extraction backends.
//!
//! The dispatcher never touches pixels itself: it sniffs the content type
//! and hands the bytes to a [`PatternBackend`], which owns decoding, the
//! canonicalizing shuffle and signature extraction.
//!
//! - [`ImageBackend`] - pure Rust decoding with the `image` crate and the
//!   imgsmlr wavelet algorithm (default)
//! - [`MockBackend`] - deterministic patterns for tests
//!
//! Implementations return owned values; nothing a backend allocates is
//! borrowed past the call.

#[cfg(feature = "image-backend")]
mod raster;
mod mock;
pub mod wavelet;

#[cfg(feature = "image-backend")]
pub use raster::ImageBackend;
pub use mock::MockBackend;

use crate::error::Result;
use crate::pattern::Pattern;
use crate::signature::Signature;

/// Trait for pattern extraction libraries.
///
/// Implementations must be thread-safe (`Send + Sync`) and deterministic:
/// the same input always yields bit-identical output.
///
/// ## Example
///
/// ```
/// use imgsig_core::backend::{MockBackend, PatternBackend};
///
/// let backend = MockBackend::default();
/// let pattern = backend.decode_png(b"\x89PNG\r\n\x1a\n...").unwrap();
/// let signature = backend.pattern_to_signature(&backend.shuffle_pattern(&pattern));
/// assert_eq!(signature, backend.pattern_to_signature(&backend.shuffle_pattern(&pattern)));
/// ```
pub trait PatternBackend: Send + Sync {
    /// Decode JPEG bytes into a pattern.
    fn decode_jpeg(&self, bytes: &[u8]) -> Result<Pattern>;

    /// Decode PNG bytes into a pattern.
    fn decode_png(&self, bytes: &[u8]) -> Result<Pattern>;

    /// Decode GIF bytes (first frame) into a pattern.
    fn decode_gif(&self, bytes: &[u8]) -> Result<Pattern>;

    /// Decode WebP bytes into a pattern.
    fn decode_webp(&self, bytes: &[u8]) -> Result<Pattern>;

    /// Apply the fixed canonicalizing transform. Must not modify `pattern`.
    fn shuffle_pattern(&self, pattern: &Pattern) -> Pattern;

    /// Reduce a pattern to its signature.
    fn pattern_to_signature(&self, pattern: &Pattern) -> Signature;

    /// Short identifier for logs.
    fn name(&self) -> &'static str;
}
