// src/lib.rs

//! `qsim` - A classical simulator of small quantum circuits
//!
//! States are dense complex amplitude vectors, gates are dense complex
//! matrices, and measurement probabilities are computed exactly by projecting
//! onto every computational basis string before shots are sampled. A GF(2)
//! null-space solver recovers hidden bit-strings from sampled outcomes (the
//! classical half of Simon's algorithm).
//!
//! Cost is exponential in the qubit count: a register of `n` qubits carries
//! `2^n` amplitudes and `2^n × 2^n` operators.

pub mod core;
pub mod operations;
pub mod circuits;
pub mod simulation;
pub mod validation;
pub mod solver;

// Re-export the most common types for easier top-level use
pub use crate::core::{Basis, Bra, Ket, QsimError};
pub use operations::{hadamard, identity, pauli_x, pauli_y, pauli_z, projector, Operator};
pub use circuits::{Circuit, CircuitConfig, InitialQubits};
pub use simulation::{Outcome, SimulationResult, Simulator};
pub use solver::solve;
pub use validation::{check_hermitian, check_normalization, check_probability_conservation, check_unitary};

// Example 1: Single qubit superposition
// One Hadamard on |0> yields two equally likely outcomes.
/// ```
/// use qsim::{hadamard, Circuit, QsimError};
///
/// let mut circuit = Circuit::with_qubits(1)?;
/// circuit.gate(&hadamard(), 0)?.measure(0, 0)?;
/// circuit.compile()?;
///
/// let result = circuit.run_seeded(1000, 7)?;
/// assert_eq!(result.bits(), vec!["0".to_string(), "1".to_string()]);
/// assert!((result.probability("0") - 0.5).abs() < 1e-9);
/// assert!((result.probability("1") - 0.5).abs() < 1e-9);
/// assert_eq!(result.count("0") + result.count("1"), 1000);
/// # Ok::<(), QsimError>(())
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item

// Example 2: Recovering a Simon secret
// Samples from the Simon circuit are orthogonal to the secret, which the
// GF(2) solver recovers.
/// ```
/// use qsim::circuits::oracles::simon_oracle;
/// use qsim::solver::to_bit_string;
/// use qsim::{hadamard, solve, Circuit, CircuitConfig, QsimError};
///
/// let secret = "110";
/// let n = secret.len();
/// let mut circuit = Circuit::new(CircuitConfig::with_qubits(2 * n).classical_bits(n))?;
/// let inputs: Vec<usize> = (0..n).collect();
/// circuit
///     .gate_parallel(&hadamard(), &inputs)?
///     .oracle(&simon_oracle(secret)?)?
///     .gate_parallel(&hadamard(), &inputs)?;
/// for q in 0..n {
///     circuit.measure(q, q)?;
/// }
/// circuit.compile()?;
///
/// let result = circuit.run_seeded(100, 1)?;
/// let candidates = solve(&result.bits())?;
/// assert!(candidates.iter().any(|v| to_bit_string(v) == secret));
/// # Ok::<(), QsimError>(())
/// ```
#[doc(hidden)]
const _: () = ();
