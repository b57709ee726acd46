//! Decimal precision for rendered similarity values.
//!
//! Every textual encoding of a [`Pattern`](crate::Pattern) or
//! [`Signature`](crate::Signature) goes through [`format_value`], and the
//! number of fractional digits is always an explicit [`Precision`] argument.
//! Precision only shapes the text; stored `f32` cells are never rounded.
//!
//! # Rounding
//!
//! Values are rendered from their exact binary representation and ties are
//! rounded half-to-even, so `-2.25` at one digit renders as `-2.2` while
//! `-2.35` (stored as `-2.3499999...`) renders as `-2.3`.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Number of digits rendered after the decimal point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Precision(u8);

impl Precision {
    /// Precision used when none is given (matches the imgsmlr bindings).
    pub const DEFAULT: Self = Self(8);

    pub const fn new(digits: u8) -> Self {
        Self(digits)
    }

    pub const fn digits(self) -> usize {
        self.0 as usize
    }

    /// Smallest difference between two values that still renders differently.
    pub fn resolution(self) -> f64 {
        10f64.powi(-i32::from(self.0))
    }
}

impl Default for Precision {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<u8> for Precision {
    fn from(digits: u8) -> Self {
        Self(digits)
    }
}

impl FromStr for Precision {
    type Err = ParseIntError;

    /// Digit count as decimal text, e.g. `"6"`. Not a stored-value error.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u8>().map(Self)
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Render a single cell as fixed-point decimal text.
pub fn format_value(value: f32, precision: Precision) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_value(&mut out, value, precision);
    out
}

/// Allocation-free variant of [`format_value`] used by the codecs.
pub(crate) fn write_value<W: fmt::Write>(out: &mut W, value: f32, precision: Precision) -> fmt::Result {
    write!(out, "{:.*}", precision.digits(), value)
}
