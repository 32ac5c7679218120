// src/simulation/results.rs
use crate::core::PROBABILITY_EPSILON;
use rand::prelude::*;
use std::collections::BTreeMap;
use std::fmt;

/// A classical bit-string together with the probability mass measured into it.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    bits: String,
    probability: f64,
}

impl Outcome {
    pub(crate) fn new(bits: &str) -> Self {
        Self { bits: bits.to_string(), probability: 0.0 }
    }

    pub fn bits(&self) -> &str {
        &self.bits
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    fn add_probability(&mut self, p: f64) {
        self.probability += p;
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [p={:.6}]", self.bits, self.probability)
    }
}

/// Exact outcome distribution of a run plus the counts of the sampled shots.
///
/// Outcomes are kept in lexicographic order of their bit-strings, which is
/// also the order the cumulative distribution is walked in while sampling.
#[derive(Debug)]
pub struct SimulationResult {
    outcomes: BTreeMap<String, Outcome>,
    counts: BTreeMap<String, usize>,
    shots: usize,
    rng: StdRng,
}

impl SimulationResult {
    /// Empty result set whose sampler is seeded from system entropy.
    pub fn new(shots: usize) -> Self {
        Self::with_seed(shots, rand::random())
    }

    /// Empty result set with a reproducible sampler.
    pub fn with_seed(shots: usize, seed: u64) -> Self {
        Self { outcomes: BTreeMap::new(), counts: BTreeMap::new(), shots, rng: StdRng::seed_from_u64(seed) }
    }

    /// Adds `p` to the probability mass of `bits`, creating the outcome on first use.
    /// Masses below `PROBABILITY_EPSILON` are ignored.
    pub fn add_outcome(&mut self, bits: &str, p: f64) {
        if p < PROBABILITY_EPSILON {
            return;
        }
        self.outcomes.entry(bits.to_string()).or_insert_with(|| Outcome::new(bits)).add_probability(p);
    }

    /// Draws `shots` samples from the accumulated distribution, replacing any
    /// previous counts.
    pub fn sample(&mut self) {
        self.counts = self.outcomes.keys().map(|bits| (bits.clone(), 0)).collect();
        let Some(last) = self.outcomes.keys().next_back().cloned() else {
            return;
        };

        for _ in 0..self.shots {
            let draw: f64 = self.rng.random();
            let mut cumulative = 0.0;
            // Rounding can leave the total just below 1; such draws go to the last outcome.
            let mut chosen = &last;
            for outcome in self.outcomes.values() {
                cumulative += outcome.probability;
                if draw < cumulative {
                    chosen = &outcome.bits;
                    break;
                }
            }
            if let Some(count) = self.counts.get_mut(chosen) {
                *count += 1;
            }
        }
    }

    /// Fraction of shots that produced `bits`, 0 if it was never sampled.
    pub fn measured_ratio(&self, bits: &str) -> f64 {
        match self.counts.get(bits) {
            Some(count) if self.shots > 0 => *count as f64 / self.shots as f64,
            _ => 0.0,
        }
    }

    /// Exact probability of `bits`, 0 if it cannot occur.
    pub fn probability(&self, bits: &str) -> f64 {
        self.outcomes.get(bits).map_or(0.0, Outcome::probability)
    }

    /// Bit-strings with nonzero probability, in lexicographic order.
    pub fn bits(&self) -> Vec<String> {
        self.outcomes.keys().cloned().collect()
    }

    pub fn outcomes(&self) -> impl Iterator<Item = &Outcome> {
        self.outcomes.values()
    }

    pub fn counts(&self) -> &BTreeMap<String, usize> {
        &self.counts
    }

    pub fn count(&self, bits: &str) -> usize {
        self.counts.get(bits).copied().unwrap_or(0)
    }

    pub fn shots(&self) -> usize {
        self.shots
    }

    /// Sum of all outcome probabilities; 1 for a normalized run.
    pub fn total_probability(&self) -> f64 {
        self.outcomes.values().map(Outcome::probability).sum()
    }
}

impl fmt::Display for SimulationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Outcomes with probability:")?;
        if self.outcomes.is_empty() {
            writeln!(f, "  No outcome has nonzero probability.")?;
        }
        for outcome in self.outcomes.values() {
            writeln!(f, "  {}", outcome)?;
        }
        writeln!(f, "Measurements:")?;
        const LINE_WIDTH: usize = 50;
        for (bits, count) in &self.counts {
            let filled = if self.shots > 0 { count * LINE_WIDTH / self.shots } else { 0 };
            writeln!(
                f,
                "  {} |{}{}| {:.2}% ({}/{})",
                bits,
                "#".repeat(filled),
                ".".repeat(LINE_WIDTH - filled),
                self.measured_ratio(bits) * 100.0,
                count,
                self.shots
            )?;
        }
        Ok(())
    }
}
