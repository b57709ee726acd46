//! The imgsmlr pattern algorithm.
//!
//! A 64×64 greyscale sample is normalized to `[0, 1]`, run through a
//! recursive Haar wavelet transform, and either blurred band by band
//! ([`shuffle`]) or reduced to per-band energies ([`signature`]).
//!
//! All functions are pure and operate on owned or borrowed patterns only.

use crate::pattern::{Pattern, PATTERN_SIZE};
use crate::signature::{Signature, SIGNATURE_SIZE};

/// Build a greyscale pattern from an RGB sampler.
///
/// `pixel(i, j)` must return the colour at column `i`, row `j` of an image
/// already resampled to `PATTERN_SIZE` × `PATTERN_SIZE`. Intensity is the
/// quadratic mean of the channels.
pub fn grey_pattern(mut pixel: impl FnMut(usize, usize) -> [u8; 3]) -> Pattern {
    Pattern::from_fn(|i, j| {
        let [r, g, b] = pixel(i, j).map(|c| f32::from(c) / 255.0);
        ((r * r + g * g + b * b) / 3.0).sqrt()
    })
}

/// Stretch values so the minimum becomes 0 and the maximum 1.
///
/// A flat pattern has no range; every cell becomes NaN, which callers
/// detect with [`Pattern::is_degenerate`].
pub fn normalize(pattern: &mut Pattern) {
    let (min, max) = pattern
        .rows()
        .iter()
        .flatten()
        .fold((1.0f32, 0.0f32), |(min, max), &v| (min.min(v), max.max(v)));
    let range = max - min;
    for cell in pattern.rows_mut().iter_mut().flatten() {
        *cell = (*cell - min) / range;
    }
}

/// Recursive 2D Haar transform.
///
/// At each level the three detail bands of the current `size` × `size`
/// block are written to the output and the block is replaced in `source`
/// by its 2×2 averages; the final average lands in `[0][0]`.
pub fn wavelet_transform(mut source: Pattern) -> Pattern {
    let mut output = Pattern::zeroed();
    let src = source.rows_mut();
    let dst = output.rows_mut();

    let mut size = PATTERN_SIZE;
    while size > 1 {
        size /= 2;
        for i in 0..size {
            for j in 0..size {
                let a = src[2 * i][2 * j];
                let b = src[2 * i + 1][2 * j];
                let c = src[2 * i][2 * j + 1];
                let d = src[2 * i + 1][2 * j + 1];
                dst[i + size][j] = (-a + b - c + d) / 4.0;
                dst[i][j + size] = (-a - b + c + d) / 4.0;
                dst[i + size][j + size] = (a - b - c + d) / 4.0;
            }
        }
        // In place: cell (i, j) is written only after every read of it.
        for i in 0..size {
            for j in 0..size {
                src[i][j] = (src[2 * i][2 * j]
                    + src[2 * i + 1][2 * j]
                    + src[2 * i][2 * j + 1]
                    + src[2 * i + 1][2 * j + 1])
                    / 4.0;
            }
        }
    }
    dst[0][0] = src[0][0];
    output
}

/// Blur each detail band with a radial kernel so small shifts of the image
/// move values less.
///
/// Bands keep their position; only values inside a band are mixed. The
/// kernel radius is a quarter of the band size, so the smallest bands are
/// reduced to absolute values.
pub fn shuffle(source: &Pattern) -> Pattern {
    let mut output = source.clone();
    let mut size = PATTERN_SIZE;
    while size > 4 {
        size /= 2;
        let radius = size / 4;
        blur_band(&mut output, source, (size, 0), size, radius);
        blur_band(&mut output, source, (0, size), size, radius);
        blur_band(&mut output, source, (size, size), size, radius);
    }
    output
}

fn blur_band(
    dst: &mut Pattern,
    src: &Pattern,
    (x, y): (usize, usize),
    size: usize,
    radius: usize,
) {
    let src = src.rows();
    let dst = dst.rows_mut();
    let w = radius as f32;

    for i in x..x + size {
        for j in y..y + size {
            let ii_range = i.saturating_sub(radius).max(x)..(i + radius + 1).min(x + size);
            let jj_range = j.saturating_sub(radius).max(y)..(j + radius + 1).min(y + size);

            let mut sum = 0.0f32;
            let mut sum_r = 0.0f32;
            for ii in ii_range {
                for jj in jj_range.clone() {
                    let di = i.abs_diff(ii) as f32;
                    let dj = j.abs_diff(jj) as f32;
                    let r = 1.0 - (di * di + dj * dj).sqrt() / w;
                    if r <= 0.0 {
                        continue;
                    }
                    let v = src[ii][jj];
                    sum += v * v * r;
                    sum_r += r;
                }
            }
            dst[i][j] = (sum / sum_r).sqrt();
        }
    }
}

/// Per-band energy, weighted up by a factor of two per finer level, with
/// the overall average as the last cell.
pub fn signature(pattern: &Pattern) -> Signature {
    let mut values = [0.0f32; SIGNATURE_SIZE];
    let mut size = PATTERN_SIZE / 2;
    let mut mult = 1.0f32;
    let mut idx = 0;

    while size > 1 {
        size /= 2;
        values[idx] = mult * band_energy(pattern, (size, 0), size);
        values[idx + 1] = mult * band_energy(pattern, (0, size), size);
        values[idx + 2] = mult * band_energy(pattern, (size, size), size);
        idx += 3;
        mult *= 2.0;
    }
    values[SIGNATURE_SIZE - 1] = pattern.rows()[0][0];

    Signature::from_values(values)
}

fn band_energy(pattern: &Pattern, (x, y): (usize, usize), size: usize) -> f32 {
    pattern.rows()[x..x + size]
        .iter()
        .flat_map(|row| &row[y..y + size])
        .map(|v| v * v)
        .sum::<f32>()
        .sqrt()
}
