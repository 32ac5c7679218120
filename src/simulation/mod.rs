// src/simulation/mod.rs

//! Executes compiled [`Circuit`]s.
//!
//! A run evolves the initial state, computes the exact projective
//! probability of every classical bit-string, and then draws a fixed number
//! of shots from that distribution. The projection step visits all `2^n`
//! computational basis strings, so cost grows exponentially with the qubit
//! count.

mod results;
pub(crate) mod engine;

// Re-export the main public interface types
pub use results::{Outcome, SimulationResult};

use crate::circuits::Circuit;
use crate::core::Result;
use crate::validation;
use engine::SimulationEngine;
use tracing::{debug, warn};

/// Run configuration: number of shots and an optional fixed seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Simulator {
    shots: usize,
    seed: Option<u64>,
}

impl Simulator {
    /// Simulator drawing `shots` samples from an entropy-seeded generator.
    pub fn new(shots: usize) -> Self {
        Self { shots, seed: None }
    }

    /// Fixes the sampler seed so that counts are reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn shots(&self) -> usize {
        self.shots
    }

    /// Runs a compiled circuit.
    ///
    /// # Returns
    /// * `Ok(SimulationResult)` with the exact outcome distribution and the sampled counts.
    /// * `Err(QsimError::InvalidState)` if the circuit has not been compiled.
    pub fn run(&self, circuit: &Circuit) -> Result<SimulationResult> {
        let engine = SimulationEngine::init(circuit)?;
        let state = engine.evolve()?;

        let mut result = match self.seed {
            Some(seed) => SimulationResult::with_seed(self.shots, seed),
            None => SimulationResult::new(self.shots),
        };
        engine.measure(&state, &mut result)?;

        if let Err(e) = validation::check_probability_conservation(&result, None) {
            // Normalization and unitarity are not enforced on caller-supplied states and operators.
            warn!(error = %e, "outcome probabilities do not sum to 1");
        }

        result.sample();
        debug!(shots = self.shots, outcomes = result.bits().len(), "run complete");
        Ok(result)
    }
}
