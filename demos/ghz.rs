//! Prepares the three-qubit GHZ state (|000> + |111>)/√2 and samples it.
//! Set `RUST_LOG=qsim=debug` to see the state at each barrier.

use qsim::{hadamard, pauli_x, Circuit, QsimError};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), QsimError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("--- qsim Example: GHZ State ---");

    let mut circuit = Circuit::with_qubits(3)?;
    circuit
        .gate(&hadamard(), 0)?
        .barrier()?
        .cgate(&pauli_x(), 0, 1)?
        .cgate(&pauli_x(), 1, 2)?
        .barrier()?;
    for q in 0..3 {
        circuit.measure(q, q)?;
    }
    circuit.compile()?;
    println!("\nCircuit Definition:\n{}", circuit);

    for (i, state) in circuit.snapshots()?.iter().enumerate() {
        println!("State at barrier {}: {}", i, state);
    }

    let result = circuit.run(1024)?;
    println!("\n{}", result);
    println!("Expected: only 000 and 111, each with probability 0.5");
    Ok(())
}
