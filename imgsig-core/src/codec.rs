//! Canonical text codecs for fixed-size cell containers.
//!
//! These mirror the text form of the imgsmlr `pattern` and `signature`
//! types:
//!
//! - matrix: `((c,c,...,c), (c,c,...,c), ...)` with `", "` between rows
//!   and `","` between cells;
//! - vector: `(c,c,...,c)`.
//!
//! Sizes are const generics so the same code serves the real 64×64 pattern
//! and 16-cell signature as well as small fixtures.

use std::fmt::{self, Write};

use crate::error::{ImgsigError, Result};
use crate::precision::{write_value, Precision};

const ROW_SEPARATOR: &str = ", ";
const CELL_SEPARATOR: &str = ",";
/// Boundary between two rows once the outer parentheses are stripped.
const ROW_BOUNDARY: &str = "), (";

/// Encode an N×N matrix.
pub fn encode_matrix<const N: usize>(rows: &[[f32; N]; N], precision: Precision) -> String {
    let mut out = String::with_capacity(N * N * (precision.digits() + 4) + 2);
    // Writing into a String cannot fail.
    let _ = write_matrix(&mut out, rows, precision);
    out
}

pub(crate) fn write_matrix<W: Write, const N: usize>(
    out: &mut W,
    rows: &[[f32; N]; N],
    precision: Precision,
) -> fmt::Result {
    out.write_char('(')?;
    for (i, row) in rows.iter().enumerate() {
        if i > 0 {
            out.write_str(ROW_SEPARATOR)?;
        }
        write_vector(out, row, precision)?;
    }
    out.write_char(')')
}

/// Encode an M-cell vector.
pub fn encode_vector<const M: usize>(cells: &[f32; M], precision: Precision) -> String {
    let mut out = String::with_capacity(M * (precision.digits() + 4) + 2);
    let _ = write_vector(&mut out, cells, precision);
    out
}

pub(crate) fn write_vector<W: Write, const M: usize>(
    out: &mut W,
    cells: &[f32; M],
    precision: Precision,
) -> fmt::Result {
    out.write_char('(')?;
    for (i, &cell) in cells.iter().enumerate() {
        if i > 0 {
            out.write_str(CELL_SEPARATOR)?;
        }
        write_value(out, cell, precision)?;
    }
    out.write_char(')')
}

/// Decode an N×N matrix, rejecting any other row or cell count.
pub fn decode_matrix<const N: usize>(text: &str) -> Result<[[f32; N]; N]> {
    // Outer pair, then the opening of the first row and closing of the last.
    let inner = strip_parens(strip_parens(text)?)?;
    let segments: Vec<&str> = inner.split(ROW_BOUNDARY).collect();
    if segments.len() != N {
        return Err(ImgsigError::FormatError(format!(
            "expected {N} rows, found {}",
            segments.len()
        )));
    }

    let mut rows = [[0.0f32; N]; N];
    for (i, (segment, row)) in segments.iter().zip(rows.iter_mut()).enumerate() {
        parse_cells(segment, row).map_err(|reason| {
            ImgsigError::FormatError(format!("row {i}: {reason}"))
        })?;
    }
    Ok(rows)
}

/// Decode an M-cell vector, rejecting any other cell count.
pub fn decode_vector<const M: usize>(text: &str) -> Result<[f32; M]> {
    let inner = strip_parens(text)?;
    let mut cells = [0.0f32; M];
    parse_cells(inner, &mut cells).map_err(ImgsigError::FormatError)?;
    Ok(cells)
}

/// Remove exactly one leading `(` and one trailing `)`.
fn strip_parens(text: &str) -> Result<&str> {
    let trimmed = text.trim();
    trimmed
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .ok_or_else(|| {
            ImgsigError::FormatError(format!(
                "expected text wrapped in parentheses, got '{}'",
                preview(trimmed)
            ))
        })
}

/// Fill `cells` from a comma-separated segment. Errors carry no row context.
fn parse_cells(segment: &str, cells: &mut [f32]) -> std::result::Result<(), String> {
    let parts: Vec<&str> = segment.split(CELL_SEPARATOR).collect();
    if parts.len() != cells.len() {
        return Err(format!(
            "expected {} cells, found {}",
            cells.len(),
            parts.len()
        ));
    }
    for (j, (part, cell)) in parts.iter().zip(cells.iter_mut()).enumerate() {
        *cell = parse_cell(part).ok_or_else(|| {
            format!("cell {j}: cannot parse '{}' as a number", preview(part))
        })?;
    }
    Ok(())
}

/// A cell is exactly one floating-point token, optionally space-padded.
fn parse_cell(part: &str) -> Option<f32> {
    let token = part.trim();
    if token.is_empty() || token.contains(char::is_whitespace) {
        return None;
    }
    token.parse::<f32>().ok()
}

fn preview(s: &str) -> String {
    const MAX: usize = 32;
    if s.chars().count() <= MAX {
        s.to_string()
    } else {
        let head: String = s.chars().take(MAX).collect();
        format!("{head}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(digits: u8) -> Precision {
        Precision::new(digits)
    }

    #[test]
    fn test_matrix_separator_fidelity() {
        let rows = [[1.0, 2.0], [3.0, 4.0]];
        assert_eq!(encode_matrix(&rows, p(2)), "((1.00,2.00), (3.00,4.00))");
    }

    #[test]
    fn test_vector_encoding_pins_half_even() {
        assert_eq!(encode_vector(&[1.5, -2.25], p(1)), "(1.5,-2.2)");
    }

    #[test]
    fn test_matrix_decode() {
        let rows: [[f32; 2]; 2] = decode_matrix("((1.00,2.00), (3.00,4.00))").unwrap();
        assert_eq!(rows, [[1.0, 2.0], [3.0, 4.0]]);
    }

    #[test]
    fn test_matrix_decode_tolerates_cell_padding() {
        let rows: [[f32; 2]; 2] = decode_matrix(" ((1, 2), (3,  4)) ").unwrap();
        assert_eq!(rows, [[1.0, 2.0], [3.0, 4.0]]);
    }

    #[test]
    fn test_matrix_wrong_row_count() {
        let err = decode_matrix::<2>("((1,2), (3,4), (5,6))").unwrap_err();
        assert!(matches!(err, ImgsigError::FormatError(ref m) if m.contains("expected 2 rows, found 3")));

        let err = decode_matrix::<2>("((1,2))").unwrap_err();
        assert!(matches!(err, ImgsigError::FormatError(ref m) if m.contains("found 1")));
    }

    #[test]
    fn test_matrix_ragged_row() {
        let err = decode_matrix::<2>("((1,2), (3))").unwrap_err();
        assert!(matches!(err, ImgsigError::FormatError(ref m) if m.contains("row 1") && m.contains("expected 2 cells, found 1")));

        let err = decode_matrix::<2>("((1,2,9), (3,4))").unwrap_err();
        assert!(matches!(err, ImgsigError::FormatError(ref m) if m.contains("row 0")));
    }

    #[test]
    fn test_matrix_row_boundary_without_space_is_rejected() {
        // "),(" is not a row boundary, so the whole text reads as one row.
        assert!(decode_matrix::<2>("((1,2),(3,4))").is_err());
    }

    #[test]
    fn test_missing_parentheses() {
        assert!(decode_vector::<2>("1,2").is_err());
        assert!(decode_vector::<2>("(1,2").is_err());
        assert!(decode_vector::<2>("1,2)").is_err());
        assert!(decode_vector::<2>("").is_err());
    }

    #[test]
    fn test_vector_decode() {
        assert_eq!(decode_vector::<3>("(0.5,-1,2e3)").unwrap(), [0.5, -1.0, 2000.0]);
        assert_eq!(decode_vector::<2>("( 1.5 , -2.2 )").unwrap(), [1.5, -2.2]);
    }

    #[test]
    fn test_vector_wrong_length() {
        let err = decode_vector::<3>("(1,2)").unwrap_err();
        assert_eq!(
            err,
            ImgsigError::FormatError("expected 3 cells, found 2".into())
        );
        assert!(decode_vector::<1>("(1,2)").is_err());
    }

    #[test]
    fn test_cell_must_be_exactly_one_token() {
        assert!(decode_vector::<2>("(1 2,3)").is_err());
        assert!(decode_vector::<2>("(1,)").is_err());
        assert!(decode_vector::<2>("(abc,3)").is_err());
        assert!(decode_vector::<2>("(1.0.0,3)").is_err());
        assert!(decode_vector::<2>("(1x,3)").is_err());
    }

    #[test]
    fn test_non_finite_round_trip() {
        let text = encode_vector(&[f32::INFINITY, f32::NEG_INFINITY], p(3));
        assert_eq!(text, "(inf,-inf)");
        assert_eq!(
            decode_vector::<2>(&text).unwrap(),
            [f32::INFINITY, f32::NEG_INFINITY]
        );

        let nan = decode_vector::<1>(&encode_vector(&[f32::NAN], p(3))).unwrap();
        assert!(nan[0].is_nan());
    }

    #[test]
    fn test_zero_precision_round_trip() {
        let text = encode_vector(&[3.0, -7.0], p(0));
        assert_eq!(text, "(3,-7)");
        assert_eq!(decode_vector::<2>(&text).unwrap(), [3.0, -7.0]);
    }

    #[test]
    fn test_long_garbage_is_previewed() {
        let garbage = "x".repeat(100);
        let err = decode_vector::<1>(&format!("({garbage})")).unwrap_err();
        let ImgsigError::FormatError(msg) = err else {
            panic!("expected FormatError");
        };
        assert!(msg.contains("..."));
        assert!(msg.len() < 100);
    }
}
