//! Compact fingerprint derived from a [`Pattern`](crate::Pattern).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::codec;
use crate::error::{ImgsigError, Result};
use crate::precision::Precision;

/// Number of cells in a signature.
pub const SIGNATURE_SIZE: usize = 16;

/// Fixed-length vector compared by the database's distance operator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f32>", into = "Vec<f32>")]
pub struct Signature {
    values: [f32; SIGNATURE_SIZE],
}

impl Signature {
    pub fn zeroed() -> Self {
        Self::from_values([0.0; SIGNATURE_SIZE])
    }

    pub fn from_values(values: [f32; SIGNATURE_SIZE]) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[f32; SIGNATURE_SIZE] {
        &self.values
    }

    pub fn get(&self, i: usize) -> Option<f32> {
        self.values.get(i).copied()
    }

    pub fn to_vec(&self) -> Vec<f32> {
        self.values.to_vec()
    }

    /// Canonical text form, e.g. `(0.1,0.2,...)`.
    pub fn encode(&self, precision: Precision) -> String {
        codec::encode_vector(&self.values, precision)
    }

    /// Parse the canonical text form, enforcing exactly `SIGNATURE_SIZE` cells.
    pub fn decode(text: &str) -> Result<Self> {
        codec::decode_vector(text).map(Self::from_values)
    }
}

impl Default for Signature {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f
            .precision()
            .map_or(Precision::DEFAULT, |p| Precision::new(p.min(u8::MAX as usize) as u8));
        codec::write_vector(f, &self.values, precision)
    }
}

impl FromStr for Signature {
    type Err = ImgsigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::decode(s)
    }
}

impl TryFrom<Vec<f32>> for Signature {
    type Error = ImgsigError;

    fn try_from(values: Vec<f32>) -> Result<Self> {
        let values: [f32; SIGNATURE_SIZE] = values.try_into().map_err(|v: Vec<f32>| {
            ImgsigError::FormatError(format!(
                "expected {SIGNATURE_SIZE} cells, found {}",
                v.len()
            ))
        })?;
        Ok(Self { values })
    }
}

impl From<Signature> for Vec<f32> {
    fn from(signature: Signature) -> Self {
        signature.to_vec()
    }
}
