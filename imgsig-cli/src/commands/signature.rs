//! Signature command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use imgsig_core::Fingerprinter;
use serde_json::json;

use crate::config::Config;
use crate::utils::{print_field, print_header, print_json, read_image};
use crate::OutputFormat;

/// Execute the signature command.
pub fn execute(file: PathBuf, config: &Config, quiet: bool) -> Result<()> {
    let bytes = read_image(&file)?;

    let fingerprint = Fingerprinter::with_image_backend()
        .fingerprint(&bytes)
        .with_context(|| format!("Failed to compute signature of {}", file.display()))?;
    let text = fingerprint.signature.encode(config.precision);

    match config.output {
        OutputFormat::Json => print_json(&json!({
            "file": file.display().to_string(),
            "content_type": fingerprint.content_type,
            "precision": config.precision,
            "signature": text,
        })),
        OutputFormat::Text => {
            print_header(
                "Signature",
                &format!("precision {}", config.precision),
                quiet,
            );
            print_field("Signature", &text, quiet);
            Ok(())
        }
    }
}
