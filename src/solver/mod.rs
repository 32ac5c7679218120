// src/solver/mod.rs

//! Null-space recovery over GF(2).
//!
//! Given `k` sampled bit-strings of length `r`, finds the vectors `v` with
//! `v · y = 0 (mod 2)` for every sample `y`. This is how Simon's algorithm
//! recovers its hidden period from measurement outcomes.
//!
//! The samples become the columns of an `r × k` matrix, augmented on the
//! right by the `r × r` identity. Row reduction over the sample columns
//! records, in the identity block, which bit positions were combined into
//! each row; a row whose sample columns cancel to zero therefore names a
//! combination of bit positions orthogonal to every sample.

use crate::core::{QsimError, Result};
use tracing::debug;

/// A row or column of 0/1 entries.
pub type BitVector = Vec<u8>;
/// Dense row-major 0/1 matrix.
pub type BitMatrix = Vec<BitVector>;

/// Candidate null-space vectors for `samples`.
///
/// Every returned vector has length `r` (the common sample length). When the
/// samples have full row rank the only candidate is the all-zero vector.
/// Samples may be any string-like type, typically the output of
/// [`SimulationResult::bits`](crate::simulation::SimulationResult::bits).
///
/// # Errors
/// * `DimensionMismatch` if the samples do not all have the same length.
/// * `InvalidState` if a sample contains a character other than `0`/`1`.
pub fn solve<S: AsRef<str>>(samples: &[S]) -> Result<Vec<BitVector>> {
    let Some(first) = samples.first() else {
        return Ok(Vec::new());
    };
    let rows = first.as_ref().len();
    for sample in samples {
        crate::core::error::check_dims("solve", rows, sample.as_ref().len())?;
        if let Some(c) = sample.as_ref().chars().find(|c| *c != '0' && *c != '1') {
            return Err(QsimError::invalid_state("solve", format!("'{}' is not a bit", c)));
        }
    }

    let cols = samples.len();
    let mut mat = augmented_matrix(samples, rows, cols);
    row_echelon(&mut mat, cols);
    let candidates = extract(&mat, cols);
    debug!(samples = cols, bits = rows, candidates = candidates.len(), "GF(2) null space");
    Ok(candidates)
}

/// `rows × (cols + rows)` matrix: sample `j` as column `j`, then the identity.
pub fn augmented_matrix<S: AsRef<str>>(samples: &[S], rows: usize, cols: usize) -> BitMatrix {
    let mut mat = vec![vec![0u8; cols + rows]; rows];
    for (j, sample) in samples.iter().take(cols).enumerate() {
        for (i, c) in sample.as_ref().bytes().take(rows).enumerate() {
            mat[i][j] = u8::from(c == b'1');
        }
    }
    for (i, row) in mat.iter_mut().enumerate() {
        row[cols + i] = 1;
    }
    mat
}

/// Reduces the first `cols` columns of `mat` to row echelon form in place.
///
/// For each column left to right, the first row at or below the current
/// pivot row with a 1 there is swapped into place and XORed into every row
/// below that also has a 1 in the column. XOR is subtraction mod 2, so every
/// entry stays in `{0, 1}`.
pub fn row_echelon(mat: &mut BitMatrix, cols: usize) {
    let rows = mat.len();
    let mut h = 0;
    for k in 0..cols {
        if h >= rows {
            break;
        }
        let Some(pivot) = (h..rows).find(|&i| mat[i][k] == 1) else {
            continue;
        };
        mat.swap(h, pivot);

        let (upper, lower) = mat.split_at_mut(h + 1);
        let pivot_row = &upper[h];
        for row in lower.iter_mut().filter(|row| row[k] == 1) {
            for (entry, p) in row.iter_mut().zip(pivot_row) {
                *entry ^= p;
            }
        }
        h += 1;
    }
}

/// Trailing identity-block entries of every row whose first `cols` entries
/// are zero, or the single all-zero vector if there is no such row.
pub fn extract(mat: &BitMatrix, cols: usize) -> Vec<BitVector> {
    let rows = mat.len();
    let mut candidates: Vec<BitVector> = mat
        .iter()
        .filter(|row| row[..cols].iter().all(|&b| b == 0))
        .map(|row| row[cols..].to_vec())
        .collect();
    if candidates.is_empty() {
        candidates.push(vec![0; rows]);
    }
    candidates
}

/// Renders a bit vector as a `0`/`1` string.
pub fn to_bit_string(bits: &[u8]) -> String {
    bits.iter().map(|b| if *b == 1 { '1' } else { '0' }).collect()
}
