//! Fingerprint command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use imgsig_core::Fingerprinter;
use serde_json::json;
use tracing::info;

use crate::config::Config;
use crate::utils::{print_field, print_header, print_json, read_image};
use crate::OutputFormat;

/// Execute the fingerprint command.
///
/// Emits the values stored next to each other in an imgsmlr table: the
/// shuffled pattern and the signature.
pub fn execute(file: PathBuf, config: &Config, quiet: bool) -> Result<()> {
    let bytes = read_image(&file)?;

    let fingerprint = Fingerprinter::with_image_backend()
        .fingerprint(&bytes)
        .with_context(|| format!("Failed to fingerprint {}", file.display()))?;
    info!(
        path = %file.display(),
        content_type = %fingerprint.content_type,
        "Fingerprinted image"
    );

    let pattern = fingerprint.pattern.encode(config.precision);
    let signature = fingerprint.signature.encode(config.precision);

    match config.output {
        OutputFormat::Json => print_json(&json!({
            "file": file.display().to_string(),
            "content_type": fingerprint.content_type,
            "precision": config.precision,
            "pattern": pattern,
            "signature": signature,
        })),
        OutputFormat::Text => {
            print_header(
                "Fingerprint",
                &format!("{}, precision {}", fingerprint.content_type, config.precision),
                quiet,
            );
            print_field("Signature", &signature, quiet);
            print_field("Pattern", &pattern, quiet);
            Ok(())
        }
    }
}
