//! Error handling logic

use thiserror::Error;

/// Errors raised by the simulator.
///
/// Every variant names the operation that detected the violation in
/// `context`, so a caller driving many circuits can report and skip a bad
/// configuration instead of losing the whole batch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QsimError {
    /// Operands of a vector/matrix operation (or a gate and its register)
    /// do not have matching dimensions.
    #[error("Dimension Mismatch ({context}): expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Operation that detected the mismatch
        context: &'static str,
        /// Dimension required by the operation
        expected: usize,
        /// Dimension actually supplied
        actual: usize,
    },

    /// A qubit or classical-bit index lies outside its declared bound.
    #[error("Index Out Of Range ({context}): {index} is not in [0, {bound})")]
    IndexOutOfRange {
        /// Operation that detected the bad index
        context: &'static str,
        /// Offending index
        index: usize,
        /// Exclusive upper bound
        bound: usize,
    },

    /// The operation is not valid in the current circuit state, e.g. running
    /// before compiling or measuring a qubit twice.
    #[error("Invalid State ({context}): {message}")]
    InvalidState {
        /// Operation that was rejected
        context: &'static str,
        /// InvalidState failure message
        message: String,
    },
}

impl QsimError {
    pub(crate) fn invalid_state(context: &'static str, message: impl Into<String>) -> Self {
        QsimError::InvalidState { context, message: message.into() }
    }
}

/// Result type used across the crate.
pub type Result<T> = std::result::Result<T, QsimError>;

/// Fails with `DimensionMismatch` unless `actual == expected`.
pub(crate) fn check_dims(context: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(QsimError::DimensionMismatch { context, expected, actual });
    }
    Ok(())
}

/// Fails with `IndexOutOfRange` unless `index < bound`.
pub(crate) fn check_range(context: &'static str, index: usize, bound: usize) -> Result<()> {
    if index >= bound {
        return Err(QsimError::IndexOutOfRange { context, index, bound });
    }
    Ok(())
}
