// src/simulation/engine.rs
use crate::circuits::{Circuit, CompiledCircuit};
use crate::core::{Basis, Ket, Result, UNMEASURED};
use crate::operations::{self, Operator};
use crate::simulation::SimulationResult;
use tracing::{debug, trace};

/// Evolves a compiled circuit's state and turns it into an outcome
/// distribution. (Internal visibility)
pub(crate) struct SimulationEngine<'a> {
    compiled: &'a CompiledCircuit,
    steps: &'a [Operator],
    measurement_mapping: &'a [Option<usize>],
    num_qubits: usize,
    num_bits: usize,
}

impl<'a> SimulationEngine<'a> {
    /// Binds the engine to a circuit; fails unless the circuit is compiled.
    pub(crate) fn init(circuit: &'a Circuit) -> Result<Self> {
        let compiled = circuit.require_compiled("run")?;
        Ok(Self {
            compiled,
            steps: circuit.steps(),
            measurement_mapping: circuit.measurement_mapping(),
            num_qubits: circuit.num_qubits(),
            num_bits: circuit.num_bits(),
        })
    }

    /// Final state of the register.
    ///
    /// Without barriers this is one application of the combined evolution
    /// operator; with barriers the steps are replayed one at a time and the
    /// state at every barrier is logged.
    pub(crate) fn evolve(&self) -> Result<Ket> {
        if !self.compiled.has_barriers {
            return self.compiled.evolution.apply(&self.compiled.initial);
        }

        let mut state = self.compiled.initial.clone();
        for (index, step) in self.steps.iter().enumerate() {
            if step.is_barrier() {
                debug!(step = index, %state, "barrier");
                continue;
            }
            state = step.apply(&state)?;
        }
        Ok(state)
    }

    /// Projects `state` onto every computational basis string and accumulates
    /// the probabilities into `result`, keyed by the measured bit-string.
    ///
    /// Basis strings that agree on all measured qubits land on the same key,
    /// which marginalizes the unmeasured qubits out.
    pub(crate) fn measure(&self, state: &Ket, result: &mut SimulationResult) -> Result<()> {
        let bra = state.conjugate();
        for assignment in basis_assignments(self.num_qubits) {
            let proj = operations::projector_string(&assignment)?;
            let p = bra.dot(&proj.apply(state)?)?.norm();
            let bits = self.outcome_bits(&assignment);
            trace!(projection = proj.label(), p, bits = bits.as_str(), "projection");
            result.add_outcome(&bits, p);
        }
        Ok(())
    }

    /// Writes each measured qubit's basis value into its classical bit
    /// position; unmeasured positions keep the placeholder.
    fn outcome_bits(&self, assignment: &[Basis]) -> String {
        let mut bits = vec![UNMEASURED; self.num_bits];
        for &qubit in &self.compiled.measured_qubits {
            if let Some(bit) = self.measurement_mapping[qubit] {
                bits[bit] = assignment[qubit].symbol();
            }
        }
        bits.into_iter().collect()
    }
}

/// Every assignment of `{|0>, |1>}` to `num_qubits` positions, qubit 0
/// varying slowest (so the i-th assignment is the binary expansion of i).
pub(crate) fn basis_assignments(num_qubits: usize) -> Vec<Vec<Basis>> {
    fn extend(prefix: &mut Vec<Basis>, remaining: usize, out: &mut Vec<Vec<Basis>>) {
        if remaining == 0 {
            out.push(prefix.clone());
            return;
        }
        for basis in [Basis::Zero, Basis::One] {
            prefix.push(basis);
            extend(prefix, remaining - 1, out);
            prefix.pop();
        }
    }

    let mut out = Vec::with_capacity(1 << num_qubits);
    extend(&mut Vec::with_capacity(num_qubits), num_qubits, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuits::CircuitConfig;
    use crate::core::QsimError;

    #[test]
    fn test_basis_assignments_enumerate_binary_order() {
        let all = basis_assignments(2);
        assert_eq!(
            all,
            vec![
                vec![Basis::Zero, Basis::Zero],
                vec![Basis::Zero, Basis::One],
                vec![Basis::One, Basis::Zero],
                vec![Basis::One, Basis::One],
            ]
        );
        assert_eq!(basis_assignments(5).len(), 32);
    }

    #[test]
    fn test_engine_requires_compiled_circuit() -> Result<()> {
        let mut circuit = Circuit::with_qubits(1)?;
        circuit.gate(&operations::hadamard(), 0)?.measure(0, 0)?;
        assert!(matches!(SimulationEngine::init(&circuit), Err(QsimError::InvalidState { context: "run", .. })));
        Ok(())
    }

    #[test]
    fn test_outcome_bits_follow_mapping() -> Result<()> {
        // qubit 2 -> bit 0, qubit 0 -> bit 1, qubit 1 unmeasured
        let mut circuit = Circuit::new(CircuitConfig::with_qubits(3).classical_bits(2))?;
        circuit.gate(&operations::identity(), 0)?.measure(2, 0)?.measure(0, 1)?;
        circuit.compile()?;
        let engine = SimulationEngine::init(&circuit)?;
        assert_eq!(engine.outcome_bits(&[Basis::One, Basis::Zero, Basis::Zero]), "01");
        assert_eq!(engine.outcome_bits(&[Basis::Zero, Basis::One, Basis::One]), "10");
        Ok(())
    }

    #[test]
    fn test_replay_matches_combined_evolution() -> Result<()> {
        let mut with_barriers = Circuit::with_qubits(2)?;
        with_barriers
            .gate(&operations::hadamard(), 0)?
            .barrier()?
            .cgate(&operations::pauli_x(), 0, 1)?
            .barrier()?
            .measure(0, 0)?
            .measure(1, 1)?;
        with_barriers.compile()?;

        let engine = SimulationEngine::init(&with_barriers)?;
        let replayed = engine.evolve()?;
        let combined = with_barriers.compiled().map(|c| c.evolution().apply(c.initial()));
        let combined = combined.ok_or_else(|| QsimError::invalid_state("test", "not compiled"))??;
        assert!(replayed.approx_eq(&combined, crate::core::TOLERANCE));
        Ok(())
    }
}
