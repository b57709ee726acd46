#![no_main]

//! Fuzz target for the text decoders
//!
//! Arbitrary UTF-8 is fed to both decoders. Anything accepted must encode
//! again and decode to the same shape.
//!
//! Run with: cargo +nightly fuzz run fuzz_decode_text

use imgsig_core::{Pattern, Precision, Signature};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(signature) = Signature::decode(text) {
        let again = signature.encode(Precision::DEFAULT);
        assert!(Signature::decode(&again).is_ok());
    }

    if let Ok(pattern) = Pattern::decode(text) {
        let again = pattern.encode(Precision::DEFAULT);
        assert!(Pattern::decode(&again).is_ok());
    }
});
