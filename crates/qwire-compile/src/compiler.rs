//! Compilation driver.

use std::fmt;

use tracing::{debug, info, instrument, warn};

use qwire_ir::CircuitGraph;

use crate::adjacency::Adjacency;
use crate::emit::{CompiledCircuit, EndpointMode, emit};
use crate::error::{CompileError, CompileResult};
use crate::schedule::schedule;
use crate::validator::StructuralValidator;

/// Phase of a single compile call.
///
/// ```text
/// Idle -> Validating -> Rejected
///                    -> Scheduling -> Stalled
///                                  -> Emitting -> Done
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompilePhase {
    /// Not started.
    Idle,
    /// Running structural rules.
    Validating,
    /// A rule failed; terminal.
    Rejected,
    /// Propagating lines through the graph.
    Scheduling,
    /// Some nodes never became ready; terminal.
    Stalled,
    /// Building the compiled circuit.
    Emitting,
    /// Finished; terminal.
    Done,
}

impl CompilePhase {
    /// Check if `next` is a legal successor of this phase.
    pub fn can_advance_to(self, next: CompilePhase) -> bool {
        use CompilePhase::*;
        matches!(
            (self, next),
            (Idle, Validating)
                | (Validating, Rejected)
                | (Validating, Scheduling)
                | (Scheduling, Stalled)
                | (Scheduling, Emitting)
                | (Emitting, Done)
        )
    }

    /// Check if this phase ends a compile call.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            CompilePhase::Rejected | CompilePhase::Stalled | CompilePhase::Done
        )
    }
}

impl fmt::Display for CompilePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CompilePhase::Idle => "idle",
            CompilePhase::Validating => "validating",
            CompilePhase::Rejected => "rejected",
            CompilePhase::Scheduling => "scheduling",
            CompilePhase::Stalled => "stalled",
            CompilePhase::Emitting => "emitting",
            CompilePhase::Done => "done",
        };
        f.write_str(name)
    }
}

#[derive(Debug)]
struct PhaseTracker(CompilePhase);

impl PhaseTracker {
    fn advance(&mut self, next: CompilePhase) {
        debug_assert!(self.0.can_advance_to(next), "{} -> {}", self.0, next);
        debug!(from = %self.0, to = %next, "compile phase");
        self.0 = next;
    }
}

/// Compiles circuit graphs for one endpoint mode.
///
/// A compiler holds no per-call state, so one instance can serve any
/// number of graphs, including from several threads at once.
#[derive(Debug, Default)]
pub struct Compiler {
    validator: StructuralValidator,
    mode: EndpointMode,
}

impl Compiler {
    /// Create a compiler with the standard rules.
    pub fn new(mode: EndpointMode) -> Self {
        Self {
            validator: StructuralValidator::standard(),
            mode,
        }
    }

    /// Replace the rule set.
    #[must_use]
    pub fn with_validator(mut self, validator: StructuralValidator) -> Self {
        self.validator = validator;
        self
    }

    /// Set the endpoint mode.
    #[must_use]
    pub fn with_mode(mut self, mode: EndpointMode) -> Self {
        self.mode = mode;
        self
    }

    /// Get the endpoint mode.
    pub fn mode(&self) -> EndpointMode {
        self.mode
    }

    /// Validate, schedule and emit one snapshot.
    #[instrument(skip_all, fields(mode = %self.mode, nodes = graph.nodes().len(), edges = graph.edges().len()))]
    pub fn compile(&self, graph: &CircuitGraph) -> CompileResult<CompiledCircuit> {
        let mut phase = PhaseTracker(CompilePhase::Idle);
        let adjacency = Adjacency::build(graph);

        phase.advance(CompilePhase::Validating);
        if let Err(err) = self.validator.run(&adjacency) {
            phase.advance(CompilePhase::Rejected);
            info!("Graph rejected: {}", err);
            return Err(err.into());
        }

        phase.advance(CompilePhase::Scheduling);
        let schedule = schedule(&adjacency);
        if !schedule.is_complete() {
            phase.advance(CompilePhase::Stalled);
            warn!(
                "Scheduling stalled with {} unreachable node(s)",
                schedule.stalled.len()
            );
            return Err(CompileError::Stalled {
                nodes: schedule.stalled,
            });
        }

        phase.advance(CompilePhase::Emitting);
        let sources = graph.ordered_qubit_sources();
        let compiled = emit(&schedule.ops, &sources, self.mode);

        phase.advance(CompilePhase::Done);
        info!(
            "Compiled {} qubits into {} operations",
            compiled.num_qubits(),
            compiled.operations.len()
        );
        Ok(compiled)
    }
}

/// Compile a snapshot with the standard rules.
pub fn compile(graph: &CircuitGraph, mode: EndpointMode) -> CompileResult<CompiledCircuit> {
    Compiler::new(mode).compile(graph)
}
