//! Classify command implementation.

use std::path::PathBuf;

use anyhow::Result;
use colored::Colorize;
use imgsig_core::{sniff_label, ContentType};
use serde_json::json;
use tracing::debug;

use crate::config::Config;
use crate::utils::{print_field, print_header, print_json, read_image};
use crate::OutputFormat;

/// Execute the classify command.
///
/// Unsupported content is reported, not treated as a failure.
pub fn execute(file: PathBuf, config: &Config, quiet: bool) -> Result<()> {
    let bytes = read_image(&file)?;

    let content_type = ContentType::classify(&bytes);
    let label = sniff_label(&bytes);
    debug!(content_type = %content_type, label, "Classified file");

    match config.output {
        OutputFormat::Json => print_json(&json!({
            "file": file.display().to_string(),
            "content_type": content_type,
            "mime_type": label,
            "supported": content_type.is_supported(),
        })),
        OutputFormat::Text => {
            print_header("Content type", &file.display().to_string(), quiet);
            let shown = if content_type.is_supported() {
                content_type.name().to_string()
            } else if quiet {
                format!("{content_type} ({label})")
            } else {
                format!("{} ({label})", content_type.to_string().yellow())
            };
            print_field("Type", &shown, quiet);
            if !quiet {
                print_field("MIME", label, quiet);
            }
            Ok(())
        }
    }
}
