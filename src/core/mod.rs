// src/core/mod.rs

//! Core data structures and types

pub mod error;
pub mod linalg;
pub mod state;

// Re-export public types for convenient access via `qsim::core::TypeName`
pub use error::{QsimError, Result};
pub use linalg::{CMatrix, CVector, Complex64};
pub use state::{tensor_reduce_kets, Basis, Bra, Ket};

pub mod constants;
pub use constants::qsim_constants::{PROBABILITY_EPSILON, TOLERANCE, UNMEASURED}; // Re-export
