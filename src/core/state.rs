// src/core/state.rs

use super::error::{QsimError, Result};
use super::linalg::{self, CVector, Complex64};
use crate::operations::Operator;
use num_traits::{One, Zero};
use std::f64::consts::FRAC_1_SQRT_2;
use std::fmt;

/// Elementary single-qubit states: the computational basis and the
/// Hadamard basis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Basis {
    /// `|0>`
    Zero,
    /// `|1>`
    One,
    /// `(|0> + |1>)/√2`
    Plus,
    /// `(|0> - |1>)/√2`
    Minus,
}

impl Basis {
    /// Character used in labels and measured bit-strings.
    pub fn symbol(self) -> char {
        match self {
            Basis::Zero => '0',
            Basis::One => '1',
            Basis::Plus => '+',
            Basis::Minus => '-',
        }
    }

    /// Amplitudes of this state in the computational basis.
    pub fn amplitudes(self) -> CVector {
        match self {
            Basis::Zero => vec![Complex64::one(), Complex64::zero()],
            Basis::One => vec![Complex64::zero(), Complex64::one()],
            Basis::Plus => vec![linalg::real(FRAC_1_SQRT_2), linalg::real(FRAC_1_SQRT_2)],
            Basis::Minus => vec![linalg::real(FRAC_1_SQRT_2), linalg::real(-FRAC_1_SQRT_2)],
        }
    }
}

impl TryFrom<char> for Basis {
    type Error = QsimError;

    fn try_from(symbol: char) -> Result<Self> {
        match symbol {
            '0' => Ok(Basis::Zero),
            '1' => Ok(Basis::One),
            '+' => Ok(Basis::Plus),
            '-' => Ok(Basis::Minus),
            _ => Err(QsimError::invalid_state("Basis::try_from", format!("'{}' is not a basis symbol", symbol))),
        }
    }
}

impl fmt::Display for Basis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Column-vector quantum state.
///
/// Normalization is expected but not enforced; see
/// [`check_normalization`](crate::validation::check_normalization).
/// The label is for diagnostics only.
#[derive(Debug, Clone, PartialEq)]
pub struct Ket {
    dim: usize,
    vector: CVector,
    label: String,
}

impl Ket {
    /// Creates a ket from raw amplitudes.
    pub fn new(vector: CVector, label: impl Into<String>) -> Self {
        Self { dim: vector.len(), vector, label: label.into() }
    }

    /// Single-qubit basis state, labelled by its symbol.
    pub fn basis(basis: Basis) -> Self {
        Self::new(basis.amplitudes(), basis.symbol().to_string())
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Read-only access to the amplitudes.
    pub fn vector(&self) -> &[Complex64] {
        &self.vector
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Tensor product `self ⊗ other`; `self` is the more significant factor.
    pub fn tensor(&self, other: &Ket) -> Ket {
        Ket::new(linalg::vec_tensor(&self.vector, &other.vector), format!("{}{}", self.label, other.label))
    }

    /// The dual bra, with every amplitude conjugated.
    pub fn conjugate(&self) -> Bra {
        Bra::new(linalg::vec_conjugate(&self.vector), self.label.clone())
    }

    /// Outer product `|self><bra|`.
    pub fn outer(&self, bra: &Bra) -> Result<Operator> {
        let matrix = linalg::outer(&self.vector, bra.vector())?;
        Operator::new(matrix, format!("|{}><{}|", self.label, bra.label()))
    }

    pub fn add(&self, other: &Ket) -> Result<Ket> {
        Ok(Ket::new(linalg::vec_add(&self.vector, &other.vector)?, format!("{}+{}", self.label, other.label)))
    }

    pub fn sub(&self, other: &Ket) -> Result<Ket> {
        Ok(Ket::new(linalg::vec_sub(&self.vector, &other.vector)?, format!("{}-{}", self.label, other.label)))
    }

    pub fn scale(&self, c: Complex64) -> Ket {
        Ket::new(linalg::vec_scale(c, &self.vector), self.label.clone())
    }

    /// Squared Euclidean norm, 1 for a normalized state.
    pub fn norm_sqr(&self) -> f64 {
        self.vector.iter().map(|c| c.norm_sqr()).sum()
    }

    /// Entrywise comparison within `tolerance`, ignoring labels.
    pub fn approx_eq(&self, other: &Ket, tolerance: f64) -> bool {
        self.dim == other.dim && self.vector.iter().zip(&other.vector).all(|(a, b)| (a - b).norm() <= tolerance)
    }
}

impl Default for Ket {
    fn default() -> Self {
        Ket::basis(Basis::Zero)
    }
}

impl From<Basis> for Ket {
    fn from(basis: Basis) -> Self {
        Ket::basis(basis)
    }
}

impl fmt::Display for Ket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "|{}> = [", self.label)?;
        for (i, c) in self.vector.iter().enumerate() {
            write!(f, "{}{:.4}", if i > 0 { ", " } else { "" }, c)?;
        }
        write!(f, "]^T")
    }
}

/// Row-vector dual of a [`Ket`].
#[derive(Debug, Clone, PartialEq)]
pub struct Bra {
    dim: usize,
    vector: CVector,
    label: String,
}

impl Bra {
    pub fn new(vector: CVector, label: impl Into<String>) -> Self {
        Self { dim: vector.len(), vector, label: label.into() }
    }

    /// Single-qubit basis bra `<b|`. Basis amplitudes are real, so no conjugation is needed.
    pub fn basis(basis: Basis) -> Self {
        Self::new(basis.amplitudes(), basis.symbol().to_string())
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn vector(&self) -> &[Complex64] {
        &self.vector
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn tensor(&self, other: &Bra) -> Bra {
        Bra::new(linalg::vec_tensor(&self.vector, &other.vector), format!("{}{}", self.label, other.label))
    }

    /// Back to the ket this bra is dual to.
    pub fn conjugate(&self) -> Ket {
        Ket::new(linalg::vec_conjugate(&self.vector), self.label.clone())
    }

    /// Row-vector × matrix, `<self| op`.
    pub fn apply(&self, op: &Operator) -> Result<Bra> {
        let vector = linalg::vec_mat(&self.vector, op.matrix())?;
        Ok(Bra::new(vector, format!("{}{}", self.label, op.label())))
    }

    /// `<self|ket>`. The bra is already conjugated, so this is a plain
    /// elementwise sum of products.
    pub fn dot(&self, ket: &Ket) -> Result<Complex64> {
        linalg::inner(&self.vector, ket.vector())
    }
}

impl fmt::Display for Bra {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}| = [", self.label)?;
        for (i, c) in self.vector.iter().enumerate() {
            write!(f, "{}{:.4}", if i > 0 { ", " } else { "" }, c)?;
        }
        write!(f, "]")
    }
}

/// Left-to-right tensor product of `kets`, e.g. `[|0>, |1>, |+>]` -> `|01+>`.
pub fn tensor_reduce_kets(kets: &[Ket]) -> Result<Ket> {
    let (first, rest) = kets
        .split_first()
        .ok_or_else(|| QsimError::invalid_state("tensor_reduce_kets", "no kets to combine"))?;
    Ok(rest.iter().fold(first.clone(), |acc, ket| acc.tensor(ket)))
}
