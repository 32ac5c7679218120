//! Deutsch-Jozsa: decides with one oracle query whether f: {0,1}^n -> {0,1}
//! is constant or balanced.
//!
//! Usage: `cargo run --example deutsch_jozsa -- [n]` (default n = 3).

use qsim::circuits::oracles::{balanced_oracle, constant_oracle};
use qsim::{hadamard, Basis, Circuit, CircuitConfig, Ket, QsimError};
use tracing_subscriber::EnvFilter;

fn run(name: &str, oracle: &Circuit, inputs: usize) -> Result<(), QsimError> {
    let mut states = vec![Ket::basis(Basis::Zero); inputs];
    states.push(Ket::basis(Basis::One));
    let mut circuit = Circuit::new(CircuitConfig::with_states(states).classical_bits(inputs))?;

    let input_qubits: Vec<usize> = (0..inputs).collect();
    circuit.gate_all(&hadamard())?.oracle(oracle)?.gate_parallel(&hadamard(), &input_qubits)?;
    for q in 0..inputs {
        circuit.measure(q, q)?;
    }
    circuit.compile()?;

    let result = circuit.run(100)?;
    let zeros = "0".repeat(inputs);
    let verdict = if result.measured_ratio(&zeros) > 0.5 { "constant" } else { "balanced" };
    println!("\n{} oracle:\n{}", name, result);
    println!("=> f is {}", verdict);
    Ok(())
}

fn main() -> Result<(), QsimError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let inputs = std::env::args().nth(1).and_then(|arg| arg.parse().ok()).unwrap_or(3usize);
    println!("--- qsim Example: Deutsch-Jozsa ({} input qubits) ---", inputs);

    run("Constant (f = 0)", &constant_oracle(inputs + 1, 0)?, inputs)?;
    run("Constant (f = 1)", &constant_oracle(inputs + 1, 1)?, inputs)?;
    run("Balanced (parity)", &balanced_oracle(inputs + 1)?, inputs)?;
    Ok(())
}
