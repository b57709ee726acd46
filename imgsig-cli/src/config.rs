//! CLI configuration
//!
//! Defaults come from environment variables; command-line flags override
//! them per invocation.

use imgsig_core::Precision;
use tracing::warn;

use crate::OutputFormat;

/// Configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Digits after the decimal point (IMGSIG_PRECISION, default: 8)
    pub precision: Precision,
    /// Output format (IMGSIG_OUTPUT, `text` or `json`, default: text)
    pub output: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            precision: Precision::DEFAULT,
            output: OutputFormat::Text,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from any key lookup. Invalid values fall back to
    /// the defaults with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let precision = lookup("IMGSIG_PRECISION")
            .and_then(|v| match v.parse::<Precision>() {
                Ok(p) => Some(p),
                Err(e) => {
                    warn!(value = %v, error = %e, "Ignoring IMGSIG_PRECISION");
                    None
                }
            })
            .unwrap_or(defaults.precision);

        let output = lookup("IMGSIG_OUTPUT")
            .and_then(|v| match v.trim().to_lowercase().as_str() {
                "text" => Some(OutputFormat::Text),
                "json" => Some(OutputFormat::Json),
                _ => {
                    warn!(value = %v, "Ignoring IMGSIG_OUTPUT (expected text or json)");
                    None
                }
            })
            .unwrap_or(defaults.output);

        Self { precision, output }
    }

    /// Apply per-command overrides.
    pub fn with_overrides(&self, precision: Option<Precision>, output: Option<OutputFormat>) -> Self {
        Self {
            precision: precision.unwrap_or(self.precision),
            output: output.unwrap_or(self.output),
        }
    }
}
