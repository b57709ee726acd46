//! Exit codes following sysexits.h conventions.
//!
//! Scripts can tell a bad image apart from a missing file without parsing
//! stderr.

use std::io;

use imgsig_core::ImgsigError;

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// General error (catch-all).
pub const GENERAL_ERROR: i32 = 1;

/// Command line usage error (invalid arguments).
/// Maps to EX_USAGE from sysexits.h.
pub const USAGE_ERROR: i32 = 64;

/// Data format error (unsupported or corrupt image, malformed text).
/// Maps to EX_DATAERR from sysexits.h.
pub const DATA_ERROR: i32 = 65;

/// Cannot open input file.
/// Maps to EX_NOINPUT from sysexits.h.
pub const INPUT_ERROR: i32 = 66;

/// Represents an exit code with optional error context.
#[derive(Debug)]
pub struct ExitCode {
    pub code: i32,
    pub message: Option<String>,
}

impl ExitCode {
    pub const fn success() -> Self {
        Self {
            code: SUCCESS,
            message: None,
        }
    }

    pub fn error(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: Some(message.into()),
        }
    }

    /// Classify an error by the first typed cause found in its chain.
    pub fn from_anyhow(err: &anyhow::Error) -> Self {
        let code = err
            .chain()
            .find_map(|cause| {
                if cause.downcast_ref::<ImgsigError>().is_some() {
                    Some(DATA_ERROR)
                } else if cause.downcast_ref::<io::Error>().is_some() {
                    Some(INPUT_ERROR)
                } else {
                    None
                }
            })
            .unwrap_or(GENERAL_ERROR);

        Self::error(code, format!("{err:#}"))
    }

    /// Process exit status; codes outside `u8` collapse to a general error.
    pub fn status(&self) -> std::process::ExitCode {
        u8::try_from(self.code)
            .map(std::process::ExitCode::from)
            .unwrap_or(std::process::ExitCode::FAILURE)
    }
}
