//! Property-based tests for compiling generated circuit graphs.
//!
//! Every generated graph is well formed: each line runs from its qubit
//! source through a random sequence of gates into one measurement.

use proptest::prelude::*;

use qwire_compile::{CompiledCircuit, EndpointMode, compile};
use qwire_ir::{
    CircuitGraph, Edge, Handle, Node, NodeId, Operation, QubitValue, SingleQubitOp, TwoQubitOp,
};

/// Gate placements along the qubit lines.
#[derive(Debug, Clone)]
enum GateOp {
    Single(usize, SingleQubitOp),
    Two(usize, usize, TwoQubitOp),
}

/// Generate a random gate placement for a circuit with given number of qubits.
fn arb_gate_op(num_qubits: usize) -> impl Strategy<Value = GateOp> {
    let single = (0..num_qubits, prop::sample::select(SingleQubitOp::ALL.to_vec()))
        .prop_map(|(q, op)| GateOp::Single(q, op));
    if num_qubits < 2 {
        single.boxed()
    } else {
        prop_oneof![
            single,
            (0..num_qubits, 0..num_qubits, prop::sample::select(TwoQubitOp::ALL.to_vec()))
                .prop_filter("Lines must differ", |(a, b, _)| a != b)
                .prop_map(|(a, b, op)| GateOp::Two(a, b, op)),
        ]
        .boxed()
    }
}

/// Generate (qubit count, gate placements).
fn arb_circuit() -> impl Strategy<Value = (usize, Vec<GateOp>)> {
    (1_usize..=5).prop_flat_map(|n| (Just(n), prop::collection::vec(arb_gate_op(n), 0..=16)))
}

/// Build the graph for a generated circuit.
///
/// Line `i` starts at qubit source `q{i}` placed at `y = 10 * i`.
fn build(num_qubits: usize, ops: &[GateOp]) -> CircuitGraph {
    let mut g = CircuitGraph::new();
    let mut tails: Vec<(NodeId, Option<Handle>)> = (0..num_qubits)
        .map(|i| (g.qubit(format!("q{i}"), QubitValue::Zero, 10.0 * i as f64), None))
        .collect();

    for (k, op) in ops.iter().enumerate() {
        match *op {
            GateOp::Single(q, gate) => {
                let id = g.single_gate(format!("g{k}"), gate, 10.0 * q as f64);
                let (tail, handle) = tails[q].clone();
                g.connect_handles(&tail, handle, &id, None);
                tails[q] = (id, None);
            }
            GateOp::Two(a, b, gate) => {
                let id = g.two_gate(format!("g{k}"), gate, 5.0 * (a + b) as f64);
                let (tail_a, handle_a) = tails[a].clone();
                let (tail_b, handle_b) = tails[b].clone();
                g.connect_handles(&tail_a, handle_a, &id, Some(Handle::Input1));
                g.connect_handles(&tail_b, handle_b, &id, Some(Handle::Input2));
                tails[a] = (id.clone(), Some(Handle::Output1));
                tails[b] = (id, Some(Handle::Output2));
            }
        }
    }

    for (i, (tail, handle)) in tails.into_iter().enumerate() {
        let m = g.measurement(format!("m{i}"), 10.0 * i as f64);
        g.connect_handles(&tail, handle, &m, None);
    }
    g
}

/// Reorder nodes and edges with a seed-derived permutation.
fn permuted(graph: &CircuitGraph, seed: u64) -> CircuitGraph {
    fn shuffle<T: Clone>(items: &[T], seed: u64) -> Vec<T> {
        let mut keyed: Vec<(u64, usize)> = (0..items.len())
            .map(|i| {
                let key = (i as u64 ^ seed)
                    .wrapping_mul(0x9E37_79B9_7F4A_7C15)
                    .rotate_left(29);
                (key, i)
            })
            .collect();
        keyed.sort_unstable();
        keyed.into_iter().map(|(_, i)| items[i].clone()).collect()
    }
    let nodes: Vec<Node> = shuffle(graph.nodes(), seed);
    let edges: Vec<Edge> = shuffle(graph.edges(), seed.rotate_left(7));
    CircuitGraph::from_parts(nodes, edges)
}

fn serialized(compiled: &CompiledCircuit) -> String {
    serde_json::to_string(compiled).unwrap()
}

proptest! {
    /// Generated graphs compile, and the qubit list follows vertical order.
    #[test]
    fn test_generated_graphs_compile((n, ops) in arb_circuit()) {
        let compiled = compile(&build(n, &ops), EndpointMode::Circuit).unwrap();
        prop_assert_eq!(compiled.num_qubits(), n);
        for (i, q) in compiled.qubits.iter().enumerate() {
            prop_assert_eq!(q.index.index() as usize, i);
            prop_assert_eq!(q.id.as_str(), format!("q{i}"));
        }
        prop_assert_eq!(compiled.gate_count(), ops.len());
        prop_assert_eq!(compiled.operations.len(), ops.len() + n);
    }

    /// Each operation consumes as many distinct lines as its arity.
    #[test]
    fn test_operation_arity((n, ops) in arb_circuit()) {
        let compiled = compile(&build(n, &ops), EndpointMode::Circuit).unwrap();
        for op in &compiled.operations {
            prop_assert_eq!(op.inputs.len(), op.operation.num_qubits());
            if let [a, b] = op.inputs[..] {
                prop_assert_ne!(a, b);
            }
            prop_assert!(op.inputs.iter().all(|q| (q.index() as usize) < n));
        }
    }

    /// Per line, operations appear in wire order and the measurement is last.
    #[test]
    fn test_line_order_preserved((n, ops) in arb_circuit()) {
        let compiled = compile(&build(n, &ops), EndpointMode::Circuit).unwrap();
        for line in 0..n {
            let expected: Vec<&str> = ops
                .iter()
                .filter_map(|op| match *op {
                    GateOp::Single(q, gate) if q == line => Some(gate.name()),
                    GateOp::Two(a, b, gate) if a == line || b == line => Some(gate.name()),
                    _ => None,
                })
                .chain(std::iter::once(Operation::MEASUREMENT))
                .collect();
            let actual: Vec<&str> = compiled
                .operations
                .iter()
                .filter(|op| op.inputs.iter().any(|q| q.index() as usize == line))
                .map(|op| op.operation.name())
                .collect();
            prop_assert_eq!(actual, expected);
        }
    }

    /// Compiling the same snapshot twice yields identical output.
    #[test]
    fn test_idempotent((n, ops) in arb_circuit()) {
        let graph = build(n, &ops);
        let first = compile(&graph, EndpointMode::Circuit).unwrap();
        let second = compile(&graph, EndpointMode::Circuit).unwrap();
        prop_assert_eq!(serialized(&first), serialized(&second));
    }

    /// Collection order of nodes and edges does not affect the output.
    #[test]
    fn test_permutation_invariant((n, ops) in arb_circuit(), seed in any::<u64>()) {
        let graph = build(n, &ops);
        let shuffled = permuted(&graph, seed);
        let a = compile(&graph, EndpointMode::Circuit).unwrap();
        let b = compile(&shuffled, EndpointMode::Circuit).unwrap();
        prop_assert_eq!(serialized(&a), serialized(&b));
    }

    /// Stabilizer mode emits the circuit-mode list without measurements.
    #[test]
    fn test_stabilizer_mode_drops_only_measurements((n, ops) in arb_circuit()) {
        let graph = build(n, &ops);
        let circuit = compile(&graph, EndpointMode::Circuit).unwrap();
        let stabilizer = compile(&graph, EndpointMode::Stabilizer).unwrap();
        let filtered: Vec<_> = circuit
            .operations
            .into_iter()
            .filter(|op| !op.operation.is_measurement())
            .collect();
        prop_assert_eq!(stabilizer.operations, filtered);
    }
}
