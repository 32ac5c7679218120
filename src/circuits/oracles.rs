//! Oracle sub-circuits for the bundled demo algorithms.
//!
//! Each constructor returns an uncompiled circuit with no classical bits,
//! ready to be inserted into a larger circuit with [`Circuit::oracle`].

use super::{Circuit, CircuitConfig};
use crate::core::{QsimError, Result};
use crate::operations;

/// Deutsch-Jozsa constant oracle on `num_qubits` qubits (the last one is the
/// ancilla): `f(x) = output` for every input.
pub fn constant_oracle(num_qubits: usize, output: u8) -> Result<Circuit> {
    if output > 1 {
        return Err(QsimError::invalid_state("constant_oracle", format!("output must be 0 or 1, got {}", output)));
    }
    let mut oracle = Circuit::new(CircuitConfig::with_qubits(num_qubits).classical_bits(0))?;
    oracle.gate_all(&operations::identity())?;
    if output == 1 {
        oracle.gate(&operations::pauli_x(), num_qubits - 1)?;
    }
    Ok(oracle)
}

/// Deutsch-Jozsa balanced oracle: `f(x)` is the parity of the input qubits,
/// written into the last qubit.
pub fn balanced_oracle(num_qubits: usize) -> Result<Circuit> {
    if num_qubits < 2 {
        return Err(QsimError::invalid_state("balanced_oracle", "needs at least one input qubit and the ancilla"));
    }
    let mut oracle = Circuit::new(CircuitConfig::with_qubits(num_qubits).classical_bits(0))?;
    let ancilla = num_qubits - 1;
    for input in 0..ancilla {
        oracle.cgate(&operations::pauli_x(), input, ancilla)?;
    }
    Ok(oracle)
}

/// Simon oracle for the secret `s` over `2·|s|` qubits: `|x>|y> -> |x>|y ⊕ f(x)>`
/// with `f(x) = f(x ⊕ s)`.
///
/// The input register copies into the output register; if `s` is nonzero,
/// the first set bit of `s` then controls an XOR of `s` into the output.
pub fn simon_oracle(secret: &str) -> Result<Circuit> {
    let bits = parse_bits("simon_oracle", secret)?;
    let n = bits.len();
    if n == 0 {
        return Err(QsimError::invalid_state("simon_oracle", "secret must not be empty"));
    }
    let mut oracle = Circuit::new(CircuitConfig::with_qubits(2 * n).classical_bits(0))?;
    for i in 0..n {
        oracle.cgate(&operations::pauli_x(), i, n + i)?;
    }
    if let Some(pivot) = bits.iter().position(|b| *b == 1) {
        for (k, _) in bits.iter().enumerate().filter(|(_, b)| **b == 1) {
            oracle.cgate(&operations::pauli_x(), pivot, n + k)?;
        }
    }
    Ok(oracle)
}

fn parse_bits(context: &'static str, bits: &str) -> Result<Vec<u8>> {
    bits.chars()
        .map(|c| match c {
            '0' => Ok(0),
            '1' => Ok(1),
            _ => Err(QsimError::invalid_state(context, format!("'{}' is not a bit", c))),
        })
        .collect()
}
