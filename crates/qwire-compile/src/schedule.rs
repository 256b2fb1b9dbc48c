//! Dataflow scheduling of a validated graph.
//!
//! Every qubit source starts a token carrying its logical line. Tokens move
//! along wires; a two-qubit gate fires once both of its input slots hold a
//! line. Ready nodes wait in a priority queue keyed by the lowest logical
//! line they carry, then by the order in which they became ready, so the
//! emitted order is a pure function of the graph's structure.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::fmt;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

use qwire_ir::{NodeId, NodeKind, Operation};

use crate::adjacency::{Adjacency, NodeIndex};

/// Index of a logical qubit line.
///
/// Line `i` starts at the `i`-th qubit source in vertical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogicalQubit(pub u32);

impl LogicalQubit {
    /// Get the raw index.
    #[inline]
    pub fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for LogicalQubit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<u32> for LogicalQubit {
    fn from(index: u32) -> Self {
        Self(index)
    }
}

impl TryFrom<usize> for LogicalQubit {
    type Error = std::num::TryFromIntError;

    fn try_from(line: usize) -> Result<Self, Self::Error> {
        u32::try_from(line).map(Self)
    }
}

/// Input slots of a two-qubit gate waiting for its lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PendingInputs {
    slots: [Option<LogicalQubit>; 2],
}

impl PendingInputs {
    /// Record the line arriving at `slot` (0 for `input1`, 1 for `input2`).
    pub fn fill(&mut self, slot: usize, line: LogicalQubit) {
        if let Some(entry) = self.slots.get_mut(slot) {
            *entry = Some(line);
        }
    }

    /// Check if both slots are filled.
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Both lines in slot order, once ready.
    pub fn lines(&self) -> Option<[LogicalQubit; 2]> {
        match self.slots {
            [Some(a), Some(b)] => Some([a, b]),
            _ => None,
        }
    }
}

/// One scheduled gate or measurement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledOp {
    /// The node that produced this operation.
    pub node: NodeId,
    /// The operation.
    pub operation: Operation,
    /// Logical lines consumed, in slot order.
    pub inputs: Vec<LogicalQubit>,
}

/// Outcome of a scheduling run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schedule {
    /// Operations in emission order.
    pub ops: Vec<ScheduledOp>,
    /// Gates and measurements that never became ready, sorted by id.
    pub stalled: Vec<NodeId>,
}

impl Schedule {
    /// Check if every gate and measurement was scheduled.
    pub fn is_complete(&self) -> bool {
        self.stalled.is_empty()
    }
}

/// A ready node waiting in the queue.
#[derive(Debug)]
struct Token {
    priority: LogicalQubit,
    seq: u64,
    node: NodeIndex,
    lines: Vec<LogicalQubit>,
}

impl Token {
    fn key(&self) -> Reverse<(LogicalQubit, u64)> {
        Reverse((self.priority, self.seq))
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Token {}

impl PartialOrd for Token {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Token {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

/// Ready queue with a monotone readiness counter.
#[derive(Debug, Default)]
struct ReadyQueue {
    heap: BinaryHeap<Token>,
    enqueued: FxHashSet<NodeIndex>,
    seq: u64,
}

impl ReadyQueue {
    /// Enqueue `node` unless it was enqueued before.
    fn push(&mut self, node: NodeIndex, lines: Vec<LogicalQubit>) {
        if !self.enqueued.insert(node) {
            trace!(node = node.index(), "already enqueued");
            return;
        }
        let Some(&priority) = lines.iter().min() else {
            return;
        };
        self.heap.push(Token {
            priority,
            seq: self.seq,
            node,
            lines,
        });
        self.seq += 1;
    }

    fn pop(&mut self) -> Option<Token> {
        self.heap.pop()
    }
}

/// Schedule gates and measurements of a snapshot in dataflow order.
///
/// The graph is expected to have passed validation; on malformed input the
/// scheduler still terminates, and anything it could not reach is reported
/// in [`Schedule::stalled`].
#[instrument(skip_all, fields(nodes = adjacency.num_nodes()))]
pub fn schedule(adjacency: &Adjacency<'_>) -> Schedule {
    let graph = adjacency.graph();
    let mut queue = ReadyQueue::default();
    let mut pending: FxHashMap<NodeIndex, PendingInputs> = FxHashMap::default();
    let mut ops = Vec::new();

    for (line, source) in graph.ordered_qubit_sources().into_iter().enumerate() {
        // Lines past u32::MAX get no token; their gates end up stalled.
        let Ok(qubit) = LogicalQubit::try_from(line) else {
            break;
        };
        let Some(ix) = adjacency.index_of(source.id.as_str()) else {
            continue;
        };
        // Duplicate ids resolve to the first node; skip shadowed sources.
        if !std::ptr::eq(adjacency.node(ix), source) {
            continue;
        }
        queue.push(ix, vec![qubit]);
    }

    while let Some(token) = queue.pop() {
        let node = adjacency.node(token.node);
        trace!(node = %node.id, lines = ?token.lines, "visit");

        if let Some(operation) = node.kind.operation() {
            ops.push(ScheduledOp {
                node: node.id.clone(),
                operation,
                inputs: token.lines.clone(),
            });
        }
        if node.kind.is_measurement() {
            continue;
        }

        for out in adjacency.outgoing(token.node) {
            let line = match node.kind {
                NodeKind::TwoQubitGate { .. } => {
                    let Some(handle) = out.wire.source_handle else {
                        debug!(node = %node.id, "unlabelled two-qubit output; wire not followed");
                        continue;
                    };
                    token.lines.get(handle.slot()).copied()
                }
                _ => token.lines.first().copied(),
            };
            let Some(line) = line else {
                continue;
            };

            let target = adjacency.node(out.target);
            match target.kind {
                NodeKind::QubitSource { .. } => {
                    trace!(target = %target.id, "wire into qubit source ignored");
                }
                NodeKind::SingleQubitGate { .. } | NodeKind::Measurement => {
                    queue.push(out.target, vec![line]);
                }
                NodeKind::TwoQubitGate { .. } => {
                    let Some(handle) = out.wire.target_handle.filter(|h| h.is_input()) else {
                        debug!(target = %target.id, "wire without input handle; slot not filled");
                        continue;
                    };
                    let slots = pending.entry(out.target).or_default();
                    slots.fill(handle.slot(), line);
                    if let Some(lines) = slots.lines() {
                        queue.push(out.target, lines.to_vec());
                    }
                }
            }
        }
    }

    let scheduled: FxHashSet<&NodeId> = ops.iter().map(|op| &op.node).collect();
    let mut stalled: Vec<NodeId> = graph
        .nodes()
        .iter()
        .filter(|n| n.kind.operation().is_some() && !scheduled.contains(&n.id))
        .map(|n| n.id.clone())
        .collect();
    stalled.sort();
    stalled.dedup();

    debug!(
        "Scheduled {} operations, {} stalled",
        ops.len(),
        stalled.len()
    );
    Schedule { ops, stalled }
}
