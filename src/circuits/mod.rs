// src/circuits/mod.rs

//! Circuit assembly and compilation.
//!
//! A [`Circuit`] starts out *building*: gates are appended as full-register
//! operators (each single-qubit gate is padded with identities to `2^n × 2^n`
//! before it is stored) and measurements are recorded as a qubit -> classical
//! bit mapping. [`Circuit::compile`] moves it to *compiled*, after which the
//! circuit is immutable and can be [`run`](Circuit::run) any number of times.
//!
//! Every inserted step acts on the whole register, so memory and time grow
//! as `4^n`. That is the scaling limit of exact dense simulation; circuits
//! beyond a dozen or so qubits are out of reach.

pub mod oracles;

use crate::core::error::{check_dims, check_range};
use crate::core::{tensor_reduce_kets, Basis, Ket, QsimError, Result};
use crate::operations::{self, Operator};
use crate::simulation::{SimulationResult, Simulator};
use std::fmt;
use tracing::debug;

/// How the initial register is described.
#[derive(Debug, Clone, PartialEq)]
pub enum InitialQubits {
    /// `n` qubits, all prepared in the configured default basis state.
    Count(usize),
    /// Explicit single-qubit states, qubit 0 first.
    States(Vec<Ket>),
}

/// Construction parameters for a [`Circuit`].
#[derive(Debug, Clone, PartialEq)]
pub struct CircuitConfig {
    pub qubits: InitialQubits,
    /// Basis used when `qubits` is a count. Defaults to `|0>`.
    pub basis: Basis,
    /// Number of classical bits; defaults to the qubit count.
    pub classical_bits: Option<usize>,
}

impl CircuitConfig {
    /// `n` qubits prepared in `|0>`, `n` classical bits.
    pub fn with_qubits(num_qubits: usize) -> Self {
        Self { qubits: InitialQubits::Count(num_qubits), basis: Basis::Zero, classical_bits: None }
    }

    /// One qubit per supplied state.
    pub fn with_states(states: Vec<Ket>) -> Self {
        Self { qubits: InitialQubits::States(states), basis: Basis::Zero, classical_bits: None }
    }

    pub fn basis(mut self, basis: Basis) -> Self {
        self.basis = basis;
        self
    }

    pub fn classical_bits(mut self, classical_bits: usize) -> Self {
        self.classical_bits = Some(classical_bits);
        self
    }
}

/// Data derived once by [`Circuit::compile`].
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledCircuit {
    /// Tensor product of all initial qubits.
    pub(crate) initial: Ket,
    /// Product of every non-barrier step, earliest step applied first.
    pub(crate) evolution: Operator,
    /// Measured qubit indices in ascending order.
    pub(crate) measured_qubits: Vec<usize>,
    /// Whether the run has to replay step by step to expose barrier states.
    pub(crate) has_barriers: bool,
}

impl CompiledCircuit {
    pub fn initial(&self) -> &Ket {
        &self.initial
    }

    pub fn evolution(&self) -> &Operator {
        &self.evolution
    }

    pub fn measured_qubits(&self) -> &[usize] {
        &self.measured_qubits
    }
}

/// An n-qubit circuit with m classical bits.
#[derive(Clone, PartialEq)]
pub struct Circuit {
    num_qubits: usize,
    num_bits: usize,
    qubits: Vec<Ket>,
    /// Full-register operators in insertion order; barriers are zero-dimension sentinels.
    steps: Vec<Operator>,
    /// `measurement_mapping[qubit] = Some(bit)` once the qubit is measured.
    measurement_mapping: Vec<Option<usize>>,
    compiled: Option<CompiledCircuit>,
}

impl Circuit {
    /// Creates a circuit from an explicit configuration.
    pub fn new(config: CircuitConfig) -> Result<Self> {
        let qubits = match config.qubits {
            InitialQubits::Count(n) => vec![Ket::basis(config.basis); n],
            InitialQubits::States(states) => {
                for state in &states {
                    check_dims("Circuit::new", 2, state.dim())?;
                }
                states
            }
        };
        let num_qubits = qubits.len();
        if num_qubits == 0 {
            return Err(QsimError::invalid_state("Circuit::new", "a circuit needs at least one qubit"));
        }
        if num_qubits >= usize::BITS as usize {
            return Err(QsimError::invalid_state("Circuit::new", format!("{} qubits overflow the state dimension", num_qubits)));
        }
        let num_bits = config.classical_bits.unwrap_or(num_qubits);
        if num_bits > num_qubits {
            return Err(QsimError::invalid_state(
                "Circuit::new",
                format!("{} classical bits cannot all be backed by {} qubits", num_bits, num_qubits),
            ));
        }

        Ok(Self {
            num_qubits,
            num_bits,
            qubits,
            steps: Vec::new(),
            measurement_mapping: vec![None; num_qubits],
            compiled: None,
        })
    }

    /// `n` qubits in `|0>` with `n` classical bits.
    pub fn with_qubits(num_qubits: usize) -> Result<Self> {
        Self::new(CircuitConfig::with_qubits(num_qubits))
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    pub fn num_bits(&self) -> usize {
        self.num_bits
    }

    /// Dimension of the full register, `2^n`.
    pub fn dim(&self) -> usize {
        1 << self.num_qubits
    }

    /// Inserted steps, barriers included.
    pub fn steps(&self) -> &[Operator] {
        &self.steps
    }

    /// The classical bit a qubit is measured into, if any.
    pub fn measurement(&self, qubit: usize) -> Option<usize> {
        self.measurement_mapping.get(qubit).copied().flatten()
    }

    pub fn is_compiled(&self) -> bool {
        self.compiled.is_some()
    }

    /// The compiled form, once [`compile`](Self::compile) has succeeded.
    pub fn compiled(&self) -> Option<&CompiledCircuit> {
        self.compiled.as_ref()
    }

    // --- Building ---

    /// Applies a single-qubit `op` to `qubit`.
    pub fn gate(&mut self, op: &Operator, qubit: usize) -> Result<&mut Self> {
        self.gate_parallel(op, &[qubit])
    }

    /// Applies the same single-qubit `op` to every listed qubit in one step.
    pub fn gate_parallel(&mut self, op: &Operator, qubits: &[usize]) -> Result<&mut Self> {
        self.ensure_building("gate")?;
        check_dims("gate", 2, op.dim())?;
        for &qubit in qubits {
            self.ensure_unmeasured("gate", qubit)?;
        }

        let mut parts = vec![operations::identity(); self.num_qubits];
        for &qubit in qubits {
            parts[qubit] = op.clone();
        }
        let step = operations::tensor_reduce(&parts)?;
        self.steps.push(step);
        Ok(self)
    }

    /// Applies the single-qubit `op` to every qubit.
    pub fn gate_all(&mut self, op: &Operator) -> Result<&mut Self> {
        let all: Vec<usize> = (0..self.num_qubits).collect();
        self.gate_parallel(op, &all)
    }

    /// Controlled gate: applies `op` to `target` when `control` is `|1>`.
    ///
    /// Built as `P0(control) ⊗ I(target) + P1(control) ⊗ op(target)`,
    /// identity on every other qubit.
    pub fn cgate(&mut self, op: &Operator, control: usize, target: usize) -> Result<&mut Self> {
        self.ensure_building("cgate")?;
        check_dims("cgate", 2, op.dim())?;
        self.ensure_unmeasured("cgate", control)?;
        self.ensure_unmeasured("cgate", target)?;
        if control == target {
            return Err(QsimError::invalid_state("cgate", "control and target qubits are the same"));
        }

        let mut inactive = vec![operations::identity(); self.num_qubits];
        let mut active = inactive.clone();
        inactive[control] = operations::projector(Basis::Zero);
        active[control] = operations::projector(Basis::One);
        active[target] = op.clone();

        let step = operations::tensor_reduce(&inactive)?
            .add(&operations::tensor_reduce(&active)?)?
            .with_label(format!("C{}[{},{}]", op.label(), control, target));
        self.steps.push(step);
        Ok(self)
    }

    /// Multi-controlled gate: applies `op` to `target` only when every
    /// control qubit is `|1>`.
    ///
    /// Built as `I + (⊗ P1 on controls) ⊗ (op - I) on target`; with a single
    /// control this equals [`cgate`](Self::cgate).
    pub fn mcgate(&mut self, op: &Operator, controls: &[usize], target: usize) -> Result<&mut Self> {
        self.ensure_building("mcgate")?;
        check_dims("mcgate", 2, op.dim())?;
        if controls.is_empty() {
            return Err(QsimError::invalid_state("mcgate", "at least one control qubit is required"));
        }
        self.ensure_unmeasured("mcgate", target)?;
        for (i, &control) in controls.iter().enumerate() {
            self.ensure_unmeasured("mcgate", control)?;
            if control == target || controls[..i].contains(&control) {
                return Err(QsimError::invalid_state("mcgate", format!("qubit {} is used more than once", control)));
            }
        }

        let mut parts = vec![operations::identity(); self.num_qubits];
        for &control in controls {
            parts[control] = operations::projector(Basis::One);
        }
        parts[target] = op.sub(&operations::identity())?;
        let controlled = operations::tensor_reduce(&parts)?;

        let labels: Vec<String> = controls.iter().map(|c| c.to_string()).collect();
        let step = operations::identity_n(self.num_qubits)?
            .add(&controlled)?
            .with_label(format!("{}{}[{},{}]", "C".repeat(controls.len()), op.label(), labels.join(","), target));
        self.steps.push(step);
        Ok(self)
    }

    /// Records that `qubit` is measured into classical `bit`.
    pub fn measure(&mut self, qubit: usize, bit: usize) -> Result<&mut Self> {
        self.ensure_building("measure")?;
        check_range("measure", qubit, self.num_qubits)?;
        check_range("measure", bit, self.num_bits)?;
        if let Some(existing) = self.measurement_mapping[qubit] {
            return Err(QsimError::invalid_state(
                "measure",
                format!("qubit {} is already measured into bit {}", qubit, existing),
            ));
        }
        if let Some(owner) = self.measurement_mapping.iter().position(|b| *b == Some(bit)) {
            return Err(QsimError::invalid_state(
                "measure",
                format!("classical bit {} is already assigned to qubit {}", bit, owner),
            ));
        }
        self.measurement_mapping[qubit] = Some(bit);
        Ok(self)
    }

    /// Inserts a checkpoint; the run exposes the state at this point but the
    /// evolution is unaffected.
    pub fn barrier(&mut self) -> Result<&mut Self> {
        self.ensure_building("barrier")?;
        self.steps.push(Operator::barrier());
        Ok(self)
    }

    /// Appends a whole sub-circuit as a single step.
    pub fn oracle(&mut self, oracle: &Circuit) -> Result<&mut Self> {
        self.ensure_building("oracle")?;
        check_dims("oracle", self.num_qubits, oracle.num_qubits)?;
        let step = oracle.to_operator()?;
        self.steps.push(step);
        Ok(self)
    }

    /// Appends a full-register operator as one step.
    pub fn unitary(&mut self, op: Operator) -> Result<&mut Self> {
        self.ensure_building("unitary")?;
        check_dims("unitary", self.dim(), op.dim())?;
        self.steps.push(op);
        Ok(self)
    }

    /// Multiplies all steps into one operator, the first step acting first.
    /// Barriers are skipped.
    pub fn to_operator(&self) -> Result<Operator> {
        if self.steps.is_empty() {
            return Err(QsimError::invalid_state("to_operator", "circuit has no gates"));
        }
        let mut combined = operations::identity_n(self.num_qubits)?;
        for step in self.steps.iter().filter(|s| !s.is_barrier()) {
            combined = step.compose(&combined)?;
        }
        let labels: Vec<&str> = self.steps.iter().filter(|s| !s.is_barrier()).map(|s| s.label()).collect();
        Ok(combined.with_label(format!("[{}]", labels.join(" "))))
    }

    // --- Compilation ---

    /// Prepares the circuit for execution. A second call is a no-op.
    ///
    /// Fails if no steps were inserted or if some classical bit is never
    /// written by a measurement.
    pub fn compile(&mut self) -> Result<()> {
        if self.compiled.is_some() {
            return Ok(());
        }
        if self.steps.is_empty() {
            return Err(QsimError::invalid_state("compile", "no gates to compile"));
        }

        if let Some(bit) = (0..self.num_bits).find(|bit| !self.measurement_mapping.contains(&Some(*bit))) {
            return Err(QsimError::invalid_state(
                "compile",
                format!("classical bit {} is never written; remove it or measure a qubit into it", bit),
            ));
        }

        let initial = tensor_reduce_kets(&self.qubits)?;
        let evolution = self.to_operator()?;
        let measured_qubits: Vec<usize> =
            (0..self.num_qubits).filter(|q| self.measurement_mapping[*q].is_some()).collect();
        let has_barriers = self.steps.iter().any(Operator::is_barrier);

        debug!(
            num_qubits = self.num_qubits,
            num_steps = self.steps.len(),
            ?measured_qubits,
            has_barriers,
            "compiled circuit"
        );

        self.compiled = Some(CompiledCircuit { initial, evolution, measured_qubits, has_barriers });
        Ok(())
    }

    // --- Execution ---

    /// Runs the compiled circuit and samples `shots` outcomes with an
    /// entropy-seeded generator.
    pub fn run(&self, shots: usize) -> Result<SimulationResult> {
        Simulator::new(shots).run(self)
    }

    /// Like [`run`](Self::run) but with a fixed seed, for reproducible counts.
    pub fn run_seeded(&self, shots: usize, seed: u64) -> Result<SimulationResult> {
        Simulator::new(shots).with_seed(seed).run(self)
    }

    /// Replays the compiled circuit step by step and returns the state at
    /// every barrier, in order.
    pub fn snapshots(&self) -> Result<Vec<Ket>> {
        let compiled = self.require_compiled("snapshots")?;
        let mut state = compiled.initial.clone();
        let mut snapshots = Vec::new();
        for step in &self.steps {
            if step.is_barrier() {
                snapshots.push(state.clone());
            } else {
                state = step.apply(&state)?;
            }
        }
        Ok(snapshots)
    }

    pub(crate) fn measurement_mapping(&self) -> &[Option<usize>] {
        &self.measurement_mapping
    }

    pub(crate) fn require_compiled(&self, context: &'static str) -> Result<&CompiledCircuit> {
        self.compiled
            .as_ref()
            .ok_or_else(|| QsimError::invalid_state(context, "circuit was not compiled"))
    }

    fn ensure_building(&self, context: &'static str) -> Result<()> {
        if self.compiled.is_some() {
            return Err(QsimError::invalid_state(context, "circuit is already compiled"));
        }
        Ok(())
    }

    fn ensure_unmeasured(&self, context: &'static str, qubit: usize) -> Result<()> {
        check_range(context, qubit, self.num_qubits)?;
        if let Some(bit) = self.measurement_mapping[qubit] {
            return Err(QsimError::invalid_state(
                context,
                format!("qubit {} is already measured into bit {}", qubit, bit),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.is_compiled() { "compiled" } else { "building" };
        writeln!(f, "qsim::Circuit[{} qubits, {} bits, {} steps, {}]", self.num_qubits, self.num_bits, self.steps.len(), state)?;
        match &self.compiled {
            Some(compiled) => writeln!(f, "  initial: {}", compiled.initial)?,
            None => {
                for (i, qubit) in self.qubits.iter().enumerate() {
                    writeln!(f, "  q{}: {}", i, qubit)?;
                }
            }
        }
        for step in &self.steps {
            if step.is_barrier() {
                writeln!(f, "  --- barrier ---")?;
            } else {
                writeln!(f, "  {}", step.label())?;
            }
        }
        for (qubit, bit) in self.measurement_mapping.iter().enumerate() {
            if let Some(bit) = bit {
                writeln!(f, "  measure q{} -> c{}", qubit, bit)?;
            }
        }
        Ok(())
    }
}

// Keep the Debug impl delegating to Display
impl fmt::Debug for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
