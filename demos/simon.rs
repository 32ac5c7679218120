//! Simon's algorithm: recovers the hidden period s of a 2-to-1 function
//! with f(x) = f(x ⊕ s), using the GF(2) solver on the sampled outcomes.
//!
//! Usage: `cargo run --example simon -- [secret]` (default secret = 110).

use qsim::circuits::oracles::simon_oracle;
use qsim::solver::to_bit_string;
use qsim::{hadamard, solve, Circuit, CircuitConfig, QsimError};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), QsimError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let secret = std::env::args().nth(1).unwrap_or_else(|| "110".to_string());
    let n = secret.len();
    println!("--- qsim Example: Simon (secret = {}) ---", secret);

    let mut circuit = Circuit::new(CircuitConfig::with_qubits(2 * n).classical_bits(n))?;
    let inputs: Vec<usize> = (0..n).collect();
    circuit
        .gate_parallel(&hadamard(), &inputs)?
        .oracle(&simon_oracle(&secret)?)?
        .gate_parallel(&hadamard(), &inputs)?;
    for q in 0..n {
        circuit.measure(q, q)?;
    }
    circuit.compile()?;

    let result = circuit.run(4 * n)?;
    println!("\n{}", result);

    // Only outcomes that were actually sampled are fed to the solver.
    let sampled: Vec<&String> = result.counts().iter().filter(|(_, count)| **count > 0).map(|(bits, _)| bits).collect();
    let candidates = solve(&sampled)?;
    println!("Candidate secrets from {} distinct samples:", sampled.len());
    for v in &candidates {
        let bits = to_bit_string(v);
        let marker = if bits == secret { "  <- matches" } else { "" };
        println!("  {}{}", bits, marker);
    }
    Ok(())
}
