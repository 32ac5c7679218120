// src/validation/mod.rs

//! Numerical sanity checks for states, operators and run results.
//!
//! None of these are enforced by construction: kets may be unnormalized and
//! operators need not be unitary (measurement projectors are not). Callers
//! that need the guarantees check them explicitly.

use crate::core::linalg;
use crate::core::{Ket, QsimError, Result, TOLERANCE};
use crate::operations::Operator;
use crate::simulation::SimulationResult;

/// Checks that `Σ|c_i|² ≈ 1`.
///
/// # Arguments
/// * `state` - The ket to check.
/// * `tolerance` - Allowed deviation from 1.0, defaults to `TOLERANCE`.
///
/// # Returns
/// * `Ok(())` if normalized within tolerance.
/// * `Err(QsimError::InvalidState)` otherwise.
pub fn check_normalization(state: &Ket, tolerance: Option<f64>) -> Result<()> {
    let effective_tolerance = tolerance.unwrap_or(TOLERANCE);
    let norm_sq = state.norm_sqr();
    if (norm_sq - 1.0).abs() > effective_tolerance {
        return Err(QsimError::invalid_state(
            "check_normalization",
            format!("Sum(|c_i|^2) = {} (deviation > {})", norm_sq, effective_tolerance),
        ));
    }
    Ok(())
}

/// Checks that `U†·U ≈ I`.
pub fn check_unitary(op: &Operator, tolerance: Option<f64>) -> Result<()> {
    let effective_tolerance = tolerance.unwrap_or(TOLERANCE);
    let product = op.dagger().compose(op)?;
    if !linalg::mat_approx_eq(product.matrix(), &linalg::identity_matrix(op.dim()), effective_tolerance) {
        return Err(QsimError::invalid_state("check_unitary", format!("{} is not unitary", op.label())));
    }
    Ok(())
}

/// Checks that `A† ≈ A`.
pub fn check_hermitian(op: &Operator, tolerance: Option<f64>) -> Result<()> {
    let effective_tolerance = tolerance.unwrap_or(TOLERANCE);
    if !op.dagger().approx_eq(op, effective_tolerance) {
        return Err(QsimError::invalid_state("check_hermitian", format!("{} is not Hermitian", op.label())));
    }
    Ok(())
}

/// Checks that the outcome probabilities of a run sum to 1.
pub fn check_probability_conservation(result: &SimulationResult, tolerance: Option<f64>) -> Result<()> {
    let effective_tolerance = tolerance.unwrap_or(TOLERANCE);
    let total = result.total_probability();
    if (total - 1.0).abs() > effective_tolerance {
        return Err(QsimError::invalid_state(
            "check_probability_conservation",
            format!("outcome probabilities sum to {} (deviation > {})", total, effective_tolerance),
        ));
    }
    Ok(())
}
