//! Mock backend for testing.

use std::sync::Mutex;

use sha3::{Digest, Sha3_256};

use super::{wavelet, PatternBackend};
use crate::error::{ImgsigError, Result};
use crate::format::ContentType;
use crate::pattern::Pattern;
use crate::signature::Signature;

#[derive(Debug, Clone)]
enum Behavior {
    Deterministic,
    Solid,
    Fail(String),
}

/// Mock backend for testing.
/// WARNING: patterns are derived from a hash of the bytes, not the pixels!
///
/// Every decode call is recorded so tests can check which decoder the
/// dispatcher picked.
#[derive(Debug)]
pub struct MockBackend {
    seed: u64,
    behavior: Behavior,
    calls: Mutex<Vec<ContentType>>,
}

impl MockBackend {
    pub fn new(seed: u64) -> Self {
        Self::with_behavior(seed, Behavior::Deterministic)
    }

    /// Create a mock with default seed for simple tests.
    pub fn default_test() -> Self {
        Self::new(0xDEADBEEF_CAFEBABE)
    }

    /// A mock whose decoders always fail with `reason`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self::with_behavior(0, Behavior::Fail(reason.into()))
    }

    /// A mock that decodes everything to a solid-colour (all NaN) pattern.
    pub fn solid() -> Self {
        Self::with_behavior(0, Behavior::Solid)
    }

    fn with_behavior(seed: u64, behavior: Behavior) -> Self {
        Self {
            seed,
            behavior,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Content types passed to the decoders so far, in call order.
    pub fn calls(&self) -> Vec<ContentType> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Generate a deterministic pattern from seed and bytes using SHA3.
    pub fn pattern_for(&self, bytes: &[u8]) -> Pattern {
        let mut hasher = Sha3_256::new();
        hasher.update(self.seed.to_le_bytes());
        hasher.update(b"imgsig-mock-pattern");
        hasher.update(bytes);
        let digest = hasher.finalize();

        let mut state_bytes = [0u8; 8];
        state_bytes.copy_from_slice(&digest[..8]);
        // xorshift must not start at zero
        let mut state = u64::from_le_bytes(state_bytes) | 1;

        Pattern::from_fn(|_, _| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            (state >> 40) as f32 / (1u64 << 24) as f32
        })
    }

    fn decode_as(&self, bytes: &[u8], content_type: ContentType) -> Result<Pattern> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(content_type);
        }
        match &self.behavior {
            Behavior::Deterministic => Ok(self.pattern_for(bytes)),
            Behavior::Solid => Ok(Pattern::from_fn(|_, _| f32::NAN)),
            Behavior::Fail(reason) => Err(ImgsigError::NativeDecodeError {
                content_type,
                reason: reason.clone(),
            }),
        }
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::default_test()
    }
}

impl PatternBackend for MockBackend {
    fn decode_jpeg(&self, bytes: &[u8]) -> Result<Pattern> {
        self.decode_as(bytes, ContentType::Jpeg)
    }

    fn decode_png(&self, bytes: &[u8]) -> Result<Pattern> {
        self.decode_as(bytes, ContentType::Png)
    }

    fn decode_gif(&self, bytes: &[u8]) -> Result<Pattern> {
        self.decode_as(bytes, ContentType::Gif)
    }

    fn decode_webp(&self, bytes: &[u8]) -> Result<Pattern> {
        self.decode_as(bytes, ContentType::Webp)
    }

    fn shuffle_pattern(&self, pattern: &Pattern) -> Pattern {
        wavelet::shuffle(pattern)
    }

    fn pattern_to_signature(&self, pattern: &Pattern) -> Signature {
        wavelet::signature(pattern)
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
