//! Pattern command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use imgsig_core::Fingerprinter;
use serde_json::json;
use tracing::debug;

use crate::config::Config;
use crate::utils::{print_field, print_header, print_json, read_image};
use crate::OutputFormat;

/// Execute the pattern command.
///
/// Prints the shuffled pattern, or the decoded one as-is with `raw`.
pub fn execute(file: PathBuf, raw: bool, config: &Config, quiet: bool) -> Result<()> {
    let bytes = read_image(&file)?;

    let fingerprinter = Fingerprinter::with_image_backend();
    let (content_type, decoded) = fingerprinter
        .decode_classified(&bytes)
        .with_context(|| format!("Failed to compute pattern of {}", file.display()))?;
    let pattern = if raw {
        decoded
    } else {
        fingerprinter.shuffle(&decoded)
    };
    debug!(raw, precision = %config.precision, "Computed pattern");

    let text = pattern.encode(config.precision);

    match config.output {
        OutputFormat::Json => print_json(&json!({
            "file": file.display().to_string(),
            "content_type": content_type,
            "shuffled": !raw,
            "precision": config.precision,
            "pattern": text,
        })),
        OutputFormat::Text => {
            let kind = if raw { "raw" } else { "shuffled" };
            print_header(
                "Pattern",
                &format!("{kind}, {content_type}, precision {}", config.precision),
                quiet,
            );
            print_field("Pattern", &text, quiet);
            Ok(())
        }
    }
}
