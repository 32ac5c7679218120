// tests/simulation_tests.rs

use qsim::circuits::oracles::{balanced_oracle, constant_oracle, simon_oracle};
use qsim::solver::to_bit_string;
use qsim::{
    hadamard, identity, pauli_x, solve, Basis, Circuit, CircuitConfig, Ket, QsimError, SimulationResult, Simulator,
};

use approx::assert_abs_diff_eq;

// Helper: circuit whose qubits start in the given basis states, one bit per qubit.
fn circuit_from(states: &[Basis]) -> Result<Circuit, QsimError> {
    let kets = states.iter().map(|b| Ket::basis(*b)).collect();
    Circuit::new(CircuitConfig::with_states(kets))
}

// Helper: measure every qubit into the bit with the same index.
fn measure_all(circuit: &mut Circuit) -> Result<(), QsimError> {
    for q in 0..circuit.num_qubits() {
        circuit.measure(q, q)?;
    }
    Ok(())
}

#[test]
fn test_single_qubit_superposition() -> Result<(), QsimError> {
    let mut circuit = Circuit::with_qubits(1)?;
    circuit.gate(&hadamard(), 0)?.measure(0, 0)?;
    circuit.compile()?;

    let result = circuit.run(100)?;
    assert_eq!(result.bits(), vec!["0".to_string(), "1".to_string()]);
    assert_abs_diff_eq!(result.probability("0"), 0.5, epsilon = 1e-9);
    assert_abs_diff_eq!(result.probability("1"), 0.5, epsilon = 1e-9);
    Ok(())
}

#[test]
fn test_ghz_state() -> Result<(), QsimError> {
    let mut circuit = Circuit::with_qubits(3)?;
    circuit.gate(&hadamard(), 0)?.cgate(&pauli_x(), 0, 1)?.cgate(&pauli_x(), 1, 2)?;
    measure_all(&mut circuit)?;
    circuit.compile()?;

    let result = circuit.run_seeded(1000, 17)?;
    assert_eq!(result.bits(), vec!["000".to_string(), "111".to_string()]);
    assert_abs_diff_eq!(result.probability("000"), 0.5, epsilon = 1e-9);
    assert_abs_diff_eq!(result.probability("111"), 0.5, epsilon = 1e-9);
    for other in ["001", "010", "011", "100", "101", "110"] {
        assert_abs_diff_eq!(result.probability(other), 0.0);
        assert_eq!(result.count(other), 0);
    }
    assert_eq!(result.count("000") + result.count("111"), 1000);
    Ok(())
}

#[test]
fn test_controlled_x_flips_target_only_when_control_set() -> Result<(), QsimError> {
    let mut flipped = circuit_from(&[Basis::One, Basis::Zero])?;
    flipped.cgate(&pauli_x(), 0, 1)?;
    measure_all(&mut flipped)?;
    flipped.compile()?;
    let result = flipped.run(10)?;
    assert_eq!(result.bits(), vec!["11".to_string()]);
    assert_abs_diff_eq!(result.measured_ratio("11"), 1.0);

    let mut unchanged = circuit_from(&[Basis::Zero, Basis::Zero])?;
    unchanged.cgate(&pauli_x(), 0, 1)?;
    measure_all(&mut unchanged)?;
    unchanged.compile()?;
    let result = unchanged.run(10)?;
    assert_eq!(result.bits(), vec!["00".to_string()]);
    Ok(())
}

#[test]
fn test_multi_controlled_x() -> Result<(), QsimError> {
    // Toffoli: only |11x> flips the target.
    for (input, expected) in [("110", "111"), ("100", "100"), ("111", "110"), ("010", "010")] {
        let states: Vec<Basis> = input.chars().map(Basis::try_from).collect::<Result<_, _>>()?;
        let mut circuit = circuit_from(&states)?;
        circuit.mcgate(&pauli_x(), &[0, 1], 2)?;
        measure_all(&mut circuit)?;
        circuit.compile()?;
        let result = circuit.run(1)?;
        assert_eq!(result.bits(), vec![expected.to_string()], "input {}", input);
    }
    Ok(())
}

#[test]
fn test_probability_conservation_with_partial_measurement() -> Result<(), QsimError> {
    // Two of four qubits measured, into swapped bit positions.
    let mut circuit = Circuit::new(CircuitConfig::with_qubits(4).classical_bits(2))?;
    circuit.gate_all(&hadamard())?.cgate(&pauli_x(), 0, 3)?.gate(&hadamard(), 1)?;
    circuit.measure(3, 0)?.measure(0, 1)?;
    circuit.compile()?;

    let result = circuit.run(50)?;
    assert_abs_diff_eq!(result.total_probability(), 1.0, epsilon = 1e-9);
    qsim::check_probability_conservation(&result, None)?;
    assert!(result.bits().iter().all(|bits| bits.len() == 2));
    Ok(())
}

#[test]
fn test_compile_rejects_unwritten_bit() -> Result<(), QsimError> {
    let mut circuit = Circuit::with_qubits(2)?;
    circuit.gate(&hadamard(), 0)?.measure(0, 0)?;
    let err = circuit.compile().unwrap_err();
    assert!(matches!(err, QsimError::InvalidState { context: "compile", .. }));
    Ok(())
}

#[test]
fn test_sampling_converges_to_exact_probabilities() -> Result<(), QsimError> {
    let mut circuit = Circuit::with_qubits(1)?;
    circuit.gate(&hadamard(), 0)?.measure(0, 0)?;
    circuit.compile()?;
    let result = Simulator::new(100_000).with_seed(2024).run(&circuit)?;
    assert_abs_diff_eq!(result.measured_ratio("0"), 0.5, epsilon = 0.01);
    assert_abs_diff_eq!(result.measured_ratio("1"), 0.5, epsilon = 0.01);

    let mut skewed = SimulationResult::with_seed(100_000, 99);
    skewed.add_outcome("00", 0.1);
    skewed.add_outcome("01", 0.2);
    skewed.add_outcome("10", 0.3);
    skewed.add_outcome("11", 0.4);
    skewed.sample();
    for bits in ["00", "01", "10", "11"] {
        assert_abs_diff_eq!(skewed.measured_ratio(bits), skewed.probability(bits), epsilon = 0.01);
    }
    Ok(())
}

#[test]
fn test_barriers_do_not_change_the_outcome() -> Result<(), QsimError> {
    let mut circuit = Circuit::with_qubits(2)?;
    circuit.gate(&hadamard(), 0)?.barrier()?.cgate(&pauli_x(), 0, 1)?.barrier()?;
    measure_all(&mut circuit)?;
    circuit.compile()?;

    let result = circuit.run(10)?;
    assert_eq!(result.bits(), vec!["00".to_string(), "11".to_string()]);

    let snapshots = circuit.snapshots()?;
    assert_eq!(snapshots.len(), 2);
    qsim::check_normalization(&snapshots[0], None)?;
    qsim::check_normalization(&snapshots[1], None)?;
    Ok(())
}

#[test]
fn test_lifecycle_errors() -> Result<(), QsimError> {
    let mut circuit = Circuit::with_qubits(2)?;
    assert!(matches!(circuit.compile(), Err(QsimError::InvalidState { context: "compile", .. })));
    assert!(matches!(circuit.gate(&hadamard(), 2), Err(QsimError::IndexOutOfRange { index: 2, bound: 2, .. })));
    assert!(matches!(circuit.measure(0, 5), Err(QsimError::IndexOutOfRange { .. })));

    circuit.gate(&hadamard(), 0)?.measure(0, 0)?;
    assert!(matches!(circuit.measure(0, 1), Err(QsimError::InvalidState { context: "measure", .. })));
    assert!(matches!(circuit.measure(1, 0), Err(QsimError::InvalidState { context: "measure", .. })));
    assert!(matches!(circuit.gate(&hadamard(), 0), Err(QsimError::InvalidState { .. })));
    assert!(matches!(circuit.run(1), Err(QsimError::InvalidState { context: "run", .. })));

    circuit.measure(1, 1)?;
    circuit.compile()?;
    assert!(matches!(circuit.gate(&identity(), 1), Err(QsimError::InvalidState { .. })));
    assert!(circuit.run(1).is_ok());
    Ok(())
}

#[test]
fn test_construction_errors() {
    assert!(matches!(Circuit::with_qubits(0), Err(QsimError::InvalidState { .. })));
    assert!(matches!(
        Circuit::new(CircuitConfig::with_qubits(2).classical_bits(3)),
        Err(QsimError::InvalidState { .. })
    ));
    let mut circuit = Circuit::with_qubits(2).unwrap();
    assert!(matches!(
        circuit.gate(&qsim::operations::identity_n(2).unwrap(), 0),
        Err(QsimError::DimensionMismatch { expected: 2, actual: 4, .. })
    ));
}

#[test]
fn test_deutsch_jozsa_distinguishes_constant_from_balanced() -> Result<(), QsimError> {
    let inputs = 3;
    let run = |oracle: &Circuit| -> Result<SimulationResult, QsimError> {
        let mut states = vec![Basis::Zero; inputs];
        states.push(Basis::One);
        let kets = states.into_iter().map(Ket::basis).collect();
        let mut circuit = Circuit::new(CircuitConfig::with_states(kets).classical_bits(inputs))?;
        let input_qubits: Vec<usize> = (0..inputs).collect();
        circuit.gate_all(&hadamard())?.oracle(oracle)?.gate_parallel(&hadamard(), &input_qubits)?;
        for q in 0..inputs {
            circuit.measure(q, q)?;
        }
        circuit.compile()?;
        circuit.run_seeded(200, 5)
    };

    for output in [0, 1] {
        let result = run(&constant_oracle(inputs + 1, output)?)?;
        assert_abs_diff_eq!(result.probability("000"), 1.0, epsilon = 1e-9);
    }
    let result = run(&balanced_oracle(inputs + 1)?)?;
    assert_abs_diff_eq!(result.probability("000"), 0.0);
    assert_abs_diff_eq!(result.probability("111"), 1.0, epsilon = 1e-9);
    Ok(())
}

#[test]
fn test_simon_recovers_secret() -> Result<(), QsimError> {
    let secret = "110";
    let n = secret.len();
    let mut circuit = Circuit::new(CircuitConfig::with_qubits(2 * n).classical_bits(n))?;
    let inputs: Vec<usize> = (0..n).collect();
    circuit
        .gate_parallel(&hadamard(), &inputs)?
        .oracle(&simon_oracle(secret)?)?
        .gate_parallel(&hadamard(), &inputs)?;
    for q in 0..n {
        circuit.measure(q, q)?;
    }
    circuit.compile()?;

    let result = circuit.run(100)?;
    // Every outcome y satisfies y · s = 0 (mod 2).
    assert_eq!(
        result.bits(),
        vec!["000".to_string(), "001".to_string(), "110".to_string(), "111".to_string()]
    );
    for bits in result.bits() {
        assert_abs_diff_eq!(result.probability(&bits), 0.25, epsilon = 1e-9);
    }

    let candidates = solve(&result.bits())?;
    let recovered: Vec<String> = candidates.iter().map(|v| to_bit_string(v)).collect();
    assert_eq!(recovered, vec![secret.to_string()]);
    Ok(())
}
