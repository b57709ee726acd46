//! The fixed-size greyscale pattern extracted from an image.

use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::codec;
use crate::error::{ImgsigError, Result};
use crate::precision::Precision;

/// Side length of a pattern (pattern is `PATTERN_SIZE` × `PATTERN_SIZE`).
pub const PATTERN_SIZE: usize = 64;

/// Square matrix of normalized greyscale samples, after the wavelet transform.
///
/// `values[i][j]` holds the sample for image column `i`, row `j`.
#[derive(Debug, Clone, PartialEq)]
pub struct Pattern {
    values: [[f32; PATTERN_SIZE]; PATTERN_SIZE],
}

impl Pattern {
    pub fn zeroed() -> Self {
        Self::from_rows([[0.0; PATTERN_SIZE]; PATTERN_SIZE])
    }

    pub fn from_rows(values: [[f32; PATTERN_SIZE]; PATTERN_SIZE]) -> Self {
        Self { values }
    }

    /// Build a pattern cell by cell.
    pub fn from_fn(mut f: impl FnMut(usize, usize) -> f32) -> Self {
        let mut values = [[0.0; PATTERN_SIZE]; PATTERN_SIZE];
        for (i, row) in values.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = f(i, j);
            }
        }
        Self { values }
    }

    pub fn rows(&self) -> &[[f32; PATTERN_SIZE]; PATTERN_SIZE] {
        &self.values
    }

    pub(crate) fn rows_mut(&mut self) -> &mut [[f32; PATTERN_SIZE]; PATTERN_SIZE] {
        &mut self.values
    }

    pub fn get(&self, i: usize, j: usize) -> Option<f32> {
        self.values.get(i).and_then(|row| row.get(j)).copied()
    }

    pub fn to_vec(&self) -> Vec<Vec<f32>> {
        self.values.iter().map(|row| row.to_vec()).collect()
    }

    /// True when no cell holds a number.
    ///
    /// Normalizing a solid-colour image divides zero by zero, so every cell
    /// ends up NaN; such a pattern carries no information.
    pub fn is_degenerate(&self) -> bool {
        self.values.iter().flatten().all(|v| v.is_nan())
    }

    /// Canonical text form, e.g. `((0.1,0.2,...), (0.3,0.4,...), ...)`.
    pub fn encode(&self, precision: Precision) -> String {
        codec::encode_matrix(&self.values, precision)
    }

    /// Parse the canonical text form, enforcing `PATTERN_SIZE` rows and cells.
    pub fn decode(text: &str) -> Result<Self> {
        codec::decode_matrix(text).map(Self::from_rows)
    }
}

impl Default for Pattern {
    fn default() -> Self {
        Self::zeroed()
    }
}

/// Renders the canonical text. `{:.3}` selects the precision; plain `{}`
/// uses [`Precision::DEFAULT`].
impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f
            .precision()
            .map_or(Precision::DEFAULT, |p| Precision::new(p.min(u8::MAX as usize) as u8));
        codec::write_matrix(f, &self.values, precision)
    }
}

impl FromStr for Pattern {
    type Err = ImgsigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::decode(s)
    }
}

impl TryFrom<Vec<Vec<f32>>> for Pattern {
    type Error = ImgsigError;

    fn try_from(rows: Vec<Vec<f32>>) -> Result<Self> {
        if rows.len() != PATTERN_SIZE {
            return Err(ImgsigError::FormatError(format!(
                "expected {PATTERN_SIZE} rows, found {}",
                rows.len()
            )));
        }
        let mut values = [[0.0; PATTERN_SIZE]; PATTERN_SIZE];
        for (i, (src, dst)) in rows.iter().zip(values.iter_mut()).enumerate() {
            if src.len() != PATTERN_SIZE {
                return Err(ImgsigError::FormatError(format!(
                    "row {i}: expected {PATTERN_SIZE} cells, found {}",
                    src.len()
                )));
            }
            dst.copy_from_slice(src);
        }
        Ok(Self { values })
    }
}

impl Serialize for Pattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.values.iter().map(|row| row.as_slice()))
    }
}

impl<'de> Deserialize<'de> for Pattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let rows = Vec::<Vec<f32>>::deserialize(deserializer)?;
        Self::try_from(rows).map_err(D::Error::custom)
    }
}
