//! imgsig Core - image patterns and signatures for similarity search
//!
//! This crate turns raw image bytes into the fixed-size `pattern` and
//! `signature` values used by the PostgreSQL imgsmlr extension, and encodes
//! them in the exact text form the database reads back.
//!
//! # Features
//!
//! - Magic-byte content sniffing for JPEG, PNG, GIF and WebP
//! - Pluggable pattern extraction through [`PatternBackend`]
//! - Canonical text encoding with an explicit decimal [`Precision`]
//! - Strict decoding that never pads or truncates
//! - Optional `sqlx` binding (`postgres` feature)
//!
//! # Example
//!
//! ```no_run
//! use imgsig_core::{Fingerprinter, Precision, Signature};
//!
//! # fn example() -> imgsig_core::Result<()> {
//! let fingerprinter = Fingerprinter::with_image_backend();
//!
//! let bytes = std::fs::read("photo.jpg").expect("readable file");
//! let fingerprint = fingerprinter.fingerprint(&bytes)?;
//!
//! // Text for `INSERT ... VALUES ($1::text::signature)`
//! let text = fingerprint.signature.encode(Precision::new(6));
//!
//! // And back again
//! let restored = Signature::decode(&text)?;
//! assert_eq!(restored.values().len(), imgsig_core::SIGNATURE_SIZE);
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod codec;
pub mod dispatch;
pub mod error;
pub mod format;
pub mod pattern;
#[cfg(feature = "postgres")]
pub mod postgres;
pub mod precision;
pub mod signature;

// Re-export main types for convenience
pub use backend::{MockBackend, PatternBackend};
pub use dispatch::{Fingerprint, Fingerprinter, SOLID_COLOR_REASON};
pub use error::{ImgsigError, Result};
pub use format::{sniff_label, ContentType};
pub use pattern::{Pattern, PATTERN_SIZE};
pub use precision::{format_value, Precision};
pub use signature::{Signature, SIGNATURE_SIZE};

#[cfg(feature = "image-backend")]
pub use backend::ImageBackend;
