// src/core/linalg.rs

//! Dense complex linear algebra over vectors and square matrices.
//!
//! All functions are pure: they borrow their operands and return a new value.
//! Binary operations check operand dimensions first, including that every
//! matrix row has the matrix's length, and fail with
//! `QsimError::DimensionMismatch` rather than truncating.

use super::error::{check_dims, Result};
pub use num_complex::Complex64;
use num_traits::{One, Zero};

/// Ordered, fixed-length sequence of complex amplitudes.
pub type CVector = Vec<Complex64>;
/// Square grid of complex entries, stored row-major.
pub type CMatrix = Vec<Vec<Complex64>>;

/// Shorthand for a purely real complex scalar.
pub fn real(re: f64) -> Complex64 {
    Complex64::new(re, 0.0)
}

// --- Vectors ---

pub fn vec_add(a: &[Complex64], b: &[Complex64]) -> Result<CVector> {
    check_dims("vec_add", a.len(), b.len())?;
    Ok(a.iter().zip(b).map(|(x, y)| x + y).collect())
}

pub fn vec_sub(a: &[Complex64], b: &[Complex64]) -> Result<CVector> {
    check_dims("vec_sub", a.len(), b.len())?;
    Ok(a.iter().zip(b).map(|(x, y)| x - y).collect())
}

pub fn vec_scale(c: Complex64, a: &[Complex64]) -> CVector {
    a.iter().map(|x| c * x).collect()
}

/// Elementwise complex conjugate.
pub fn vec_conjugate(a: &[Complex64]) -> CVector {
    a.iter().map(|x| x.conj()).collect()
}

/// Unconjugated inner product `Σ a[i]·b[i]`.
///
/// Callers wanting the Hermitian product pass an already conjugated left operand.
pub fn inner(a: &[Complex64], b: &[Complex64]) -> Result<Complex64> {
    check_dims("inner", a.len(), b.len())?;
    Ok(a.iter().zip(b).map(|(x, y)| x * y).sum())
}

/// Outer product `a·bᵀ`, no conjugation applied.
pub fn outer(a: &[Complex64], b: &[Complex64]) -> Result<CMatrix> {
    check_dims("outer", a.len(), b.len())?;
    Ok(a.iter().map(|x| b.iter().map(|y| x * y).collect()).collect())
}

/// Kronecker product of two vectors; `a` is the more significant factor,
/// so `result[i·q + j] = a[i]·b[j]`.
pub fn vec_tensor(a: &[Complex64], b: &[Complex64]) -> CVector {
    let mut result = Vec::with_capacity(a.len() * b.len());
    for x in a {
        for y in b {
            result.push(x * y);
        }
    }
    result
}

// --- Matrices ---

/// Fails with `DimensionMismatch` unless every row of `m` has `m.len()` entries.
pub fn check_square(context: &'static str, m: &CMatrix) -> Result<()> {
    let dim = m.len();
    for row in m {
        check_dims(context, dim, row.len())?;
    }
    Ok(())
}

/// `dim × dim` identity matrix.
pub fn identity_matrix(dim: usize) -> CMatrix {
    (0..dim)
        .map(|r| (0..dim).map(|c| if r == c { Complex64::one() } else { Complex64::zero() }).collect())
        .collect()
}

pub fn mat_add(a: &CMatrix, b: &CMatrix) -> Result<CMatrix> {
    check_square("mat_add", a)?;
    check_square("mat_add", b)?;
    check_dims("mat_add", a.len(), b.len())?;
    Ok(a.iter().zip(b).map(|(ra, rb)| ra.iter().zip(rb).map(|(x, y)| x + y).collect()).collect())
}

pub fn mat_sub(a: &CMatrix, b: &CMatrix) -> Result<CMatrix> {
    check_square("mat_sub", a)?;
    check_square("mat_sub", b)?;
    check_dims("mat_sub", a.len(), b.len())?;
    Ok(a.iter().zip(b).map(|(ra, rb)| ra.iter().zip(rb).map(|(x, y)| x - y).collect()).collect())
}

pub fn mat_scale(c: Complex64, a: &CMatrix) -> CMatrix {
    a.iter().map(|row| vec_scale(c, row)).collect()
}

/// Conjugate transpose. `a` must be square, which [`Operator`](crate::operations::Operator)
/// guarantees.
pub(crate) fn dagger(a: &CMatrix) -> CMatrix {
    let dim = a.len();
    (0..dim).map(|r| (0..dim).map(|c| a[c][r].conj()).collect()).collect()
}

/// Matrix × column vector.
pub fn mat_vec(m: &CMatrix, x: &[Complex64]) -> Result<CVector> {
    check_square("mat_vec", m)?;
    check_dims("mat_vec", m.len(), x.len())?;
    m.iter().map(|row| inner(row, x)).collect()
}

/// Row vector × matrix.
pub fn vec_mat(x: &[Complex64], m: &CMatrix) -> Result<CVector> {
    check_square("vec_mat", m)?;
    check_dims("vec_mat", m.len(), x.len())?;
    let dim = m.len();
    Ok((0..dim)
        .map(|c| x.iter().zip(m).map(|(xi, row)| xi * row[c]).sum())
        .collect())
}

/// Matrix product `a·b`.
pub fn mat_mul(a: &CMatrix, b: &CMatrix) -> Result<CMatrix> {
    check_square("mat_mul", a)?;
    check_square("mat_mul", b)?;
    check_dims("mat_mul", a.len(), b.len())?;
    let dim = a.len();
    let mut result = vec![vec![Complex64::zero(); dim]; dim];
    for (r, row) in a.iter().enumerate() {
        for (k, a_rk) in row.iter().enumerate() {
            if a_rk.is_zero() {
                continue;
            }
            for c in 0..dim {
                result[r][c] += a_rk * b[k][c];
            }
        }
    }
    Ok(result)
}

/// Block-Kronecker product:
/// `result[r1·q + r2][c1·q + c2] = a[r1][c1]·b[r2][c2]`. Both operands must
/// be square.
pub(crate) fn mat_tensor(a: &CMatrix, b: &CMatrix) -> CMatrix {
    let p = a.len();
    let q = b.len();
    let mut result = vec![vec![Complex64::zero(); p * q]; p * q];
    for r1 in 0..p {
        for c1 in 0..p {
            let factor = a[r1][c1];
            if factor.is_zero() {
                continue;
            }
            for r2 in 0..q {
                for c2 in 0..q {
                    result[r1 * q + r2][c1 * q + c2] = factor * b[r2][c2];
                }
            }
        }
    }
    result
}

/// Entrywise comparison within `tolerance` (on the magnitude of the difference).
pub fn mat_approx_eq(a: &CMatrix, b: &CMatrix, tolerance: f64) -> bool {
    a.len() == b.len()
        && a.iter().zip(b).all(|(ra, rb)| {
            ra.len() == rb.len() && ra.iter().zip(rb).all(|(x, y)| (x - y).norm() <= tolerance)
        })
}
