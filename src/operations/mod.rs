// src/operations/mod.rs

//! Square linear operators acting on kets, and the fixed set of named
//! single-qubit operators used to build circuits.
//!
//! A single value type covers gates and measurement projectors alike: every
//! operator shares the same algebra and differs only in its matrix and label.
//! Unitarity is the caller's responsibility, see
//! [`check_unitary`](crate::validation::check_unitary).

use crate::core::linalg::{self, CMatrix, Complex64};
use crate::core::{Basis, Bra, Ket, QsimError, Result};
use std::f64::consts::FRAC_1_SQRT_2;
use std::fmt;

/// A square complex matrix with a display label.
///
/// A zero-dimension operator is the barrier sentinel used by circuits; it
/// never takes part in arithmetic.
#[derive(Debug, Clone, PartialEq)]
pub struct Operator {
    dim: usize,
    matrix: CMatrix,
    label: String,
}

impl Operator {
    /// Creates an operator, checking that `matrix` is square.
    pub fn new(matrix: CMatrix, label: impl Into<String>) -> Result<Self> {
        linalg::check_square("Operator::new", &matrix)?;
        Ok(Self { dim: matrix.len(), matrix, label: label.into() })
    }

    /// The barrier sentinel.
    pub fn barrier() -> Self {
        Self { dim: 0, matrix: Vec::new(), label: "barrier".to_string() }
    }

    pub fn is_barrier(&self) -> bool {
        self.dim == 0
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn matrix(&self) -> &CMatrix {
        &self.matrix
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the operator with a new label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Applies this operator to a ket (matrix × vector).
    pub fn apply(&self, ket: &Ket) -> Result<Ket> {
        let vector = linalg::mat_vec(&self.matrix, ket.vector())?;
        Ok(Ket::new(vector, format!("{}{}", self.label, ket.label())))
    }

    /// Matrix product `self · other`: applied to a ket, `other` acts first.
    pub fn compose(&self, other: &Operator) -> Result<Operator> {
        let matrix = linalg::mat_mul(&self.matrix, &other.matrix)?;
        Ok(Operator { dim: self.dim, matrix, label: format!("{}·{}", self.label, other.label) })
    }

    /// Kronecker product `self ⊗ other`; `self` acts on the more significant qubits.
    pub fn tensor(&self, other: &Operator) -> Operator {
        Operator {
            dim: self.dim * other.dim,
            matrix: linalg::mat_tensor(&self.matrix, &other.matrix),
            label: format!("{}{}", self.label, other.label),
        }
    }

    pub fn add(&self, other: &Operator) -> Result<Operator> {
        let matrix = linalg::mat_add(&self.matrix, &other.matrix)?;
        Ok(Operator { dim: self.dim, matrix, label: format!("{}+{}", self.label, other.label) })
    }

    pub fn sub(&self, other: &Operator) -> Result<Operator> {
        let matrix = linalg::mat_sub(&self.matrix, &other.matrix)?;
        Ok(Operator { dim: self.dim, matrix, label: format!("{}-{}", self.label, other.label) })
    }

    pub fn scale(&self, c: Complex64) -> Operator {
        Operator { dim: self.dim, matrix: linalg::mat_scale(c, &self.matrix), label: self.label.clone() }
    }

    /// Conjugate transpose.
    pub fn dagger(&self) -> Operator {
        Operator { dim: self.dim, matrix: linalg::dagger(&self.matrix), label: format!("({})^+", self.label) }
    }

    /// Entrywise comparison within `tolerance`, ignoring labels.
    pub fn approx_eq(&self, other: &Operator, tolerance: f64) -> bool {
        linalg::mat_approx_eq(&self.matrix, &other.matrix, tolerance)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_barrier() {
            return write!(f, "--- barrier ---");
        }
        writeln!(f, "{} =", self.label)?;
        for row in &self.matrix {
            write!(f, "  [")?;
            for (i, c) in row.iter().enumerate() {
                write!(f, "{}{:.4}", if i > 0 { ", " } else { "" }, c)?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}

fn single_qubit(entries: [[Complex64; 2]; 2], label: &str) -> Operator {
    Operator { dim: 2, matrix: entries.iter().map(|row| row.to_vec()).collect(), label: label.to_string() }
}

fn c(re: f64, im: f64) -> Complex64 {
    Complex64::new(re, im)
}

/// `I`
pub fn identity() -> Operator {
    single_qubit([[c(1.0, 0.0), c(0.0, 0.0)], [c(0.0, 0.0), c(1.0, 0.0)]], "I")
}

/// Identity on an `n`-qubit register (dimension `2^n`).
///
/// Fails with `InvalidState` if `2^n` does not fit in a `usize`.
pub fn identity_n(num_qubits: usize) -> Result<Operator> {
    if num_qubits >= usize::BITS as usize {
        return Err(QsimError::invalid_state("identity_n", format!("{} qubits overflow the state dimension", num_qubits)));
    }
    let dim = 1usize << num_qubits;
    Ok(Operator { dim, matrix: linalg::identity_matrix(dim), label: "I".repeat(num_qubits) })
}

/// Pauli `X` (bit flip).
pub fn pauli_x() -> Operator {
    single_qubit([[c(0.0, 0.0), c(1.0, 0.0)], [c(1.0, 0.0), c(0.0, 0.0)]], "X")
}

/// Pauli `Y`.
pub fn pauli_y() -> Operator {
    single_qubit([[c(0.0, 0.0), c(0.0, -1.0)], [c(0.0, 1.0), c(0.0, 0.0)]], "Y")
}

/// Pauli `Z` (phase flip).
pub fn pauli_z() -> Operator {
    single_qubit([[c(1.0, 0.0), c(0.0, 0.0)], [c(0.0, 0.0), c(-1.0, 0.0)]], "Z")
}

/// Hadamard: `1/√2` times the `[[1, 1], [1, -1]]` pattern.
pub fn hadamard() -> Operator {
    single_qubit([[c(1.0, 0.0), c(1.0, 0.0)], [c(1.0, 0.0), c(-1.0, 0.0)]], "H").scale(c(FRAC_1_SQRT_2, 0.0))
}

/// Single-qubit projector `|b><b|`.
pub fn projector(basis: Basis) -> Operator {
    let entries = basis.amplitudes();
    let matrix = entries.iter().map(|x| entries.iter().map(|y| x * y.conj()).collect()).collect();
    Operator { dim: 2, matrix, label: format!("P{}", basis.symbol()) }
}

/// Multi-qubit projector `|b1 b2 …><b1 b2 …|`, the tensor product of the
/// single-qubit projectors.
pub fn projector_string(bases: &[Basis]) -> Result<Operator> {
    let parts: Vec<Operator> = bases.iter().map(|b| projector(*b)).collect();
    let proj = tensor_reduce(&parts)?;
    let symbols: String = bases.iter().map(|b| b.symbol()).collect();
    Ok(proj.with_label(format!("P{}", symbols)))
}

/// Left-to-right tensor product of `ops`, e.g. `[H, I, I]` -> `H ⊗ I ⊗ I`.
pub fn tensor_reduce(ops: &[Operator]) -> Result<Operator> {
    let (first, rest) = ops
        .split_first()
        .ok_or_else(|| QsimError::invalid_state("tensor_reduce", "no operators to combine"))?;
    Ok(rest.iter().fold(first.clone(), |acc, op| acc.tensor(op)))
}

/// Builds `|ket><bra|` for one of the named basis states.
pub fn basis_outer(ket: Basis, bra: Basis) -> Result<Operator> {
    Ket::basis(ket).outer(&Bra::basis(bra))
}
