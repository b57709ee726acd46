//! Common utility functions shared across CLI commands.

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use serde_json::Value;
use tracing::info;

/// Read an input file completely.
pub fn read_image(path: &Path) -> Result<Vec<u8>> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;
    info!(path = %path.display(), bytes = bytes.len(), "Read file");
    Ok(bytes)
}

/// Print the decorative header line unless suppressed.
pub fn print_header(title: &str, detail: &str, quiet: bool) {
    if !quiet {
        println!("{} {}", title.cyan().bold(), detail.dimmed());
    }
}

/// Print a labelled value on its own line.
pub fn print_field(label: &str, value: &str, quiet: bool) {
    if quiet {
        println!("{value}");
    } else {
        println!("   {} {}", format!("{label}:").dimmed(), value);
    }
}

pub fn print_json(value: &Value) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{text}");
    Ok(())
}
