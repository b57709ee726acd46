#![no_main]

//! Fuzz target for content-type sniffing
//!
//! Classification and labelling must never panic, and the mock-backed
//! dispatcher must only fail with the documented error kinds.
//!
//! Run with: cargo +nightly fuzz run fuzz_classify

use imgsig_core::{sniff_label, ContentType, Fingerprinter, ImgsigError, MockBackend};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let content_type = ContentType::classify(data);
    let label = sniff_label(data);
    assert!(!label.is_empty());

    let fingerprinter = Fingerprinter::new(MockBackend::default());
    match fingerprinter.fingerprint(data) {
        Ok(fingerprint) => assert_eq!(fingerprint.content_type, content_type),
        Err(ImgsigError::UnsupportedFormat(_)) => assert!(!content_type.is_supported()),
        Err(e) => panic!("unexpected error: {e}"),
    }
});
