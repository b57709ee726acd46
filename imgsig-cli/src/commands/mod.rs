//! Subcommand implementations.

pub mod classify;
pub mod fingerprint;
pub mod pattern;
pub mod signature;
