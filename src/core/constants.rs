//! Numerical constants shared by the simulator.

/// Constants used by the simulation and its checks.
pub mod qsim_constants {
    /// Default tolerance for approximate floating-point comparisons.
    pub const TOLERANCE: f64 = 1e-9;
    /// Outcomes with less probability mass than this are treated as impossible.
    pub const PROBABILITY_EPSILON: f64 = 1e-12;
    /// Character written into a bit-string position that no qubit was measured into.
    pub const UNMEASURED: char = '_';
}
