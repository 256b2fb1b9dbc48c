//! Integration tests for end-to-end compilation of editor graphs.
//!
//! These tests drive the public compile entry points with graphs shaped the
//! way the editor exports them and check the emitted operation lists.

use qwire_compile::{
    Adjacency, CompileError, Compiler, EndpointMode, LogicalQubit, StructuralError,
    StructuralValidator, compile, schedule, validate,
};
use qwire_ir::{CircuitGraph, Handle, NodeId, QubitValue, SingleQubitOp, TwoQubitOp};

/// Helper: render operations as `name[i,j]` strings.
fn rendered(compiled: &qwire_compile::CompiledCircuit) -> Vec<String> {
    compiled
        .operations
        .iter()
        .map(|op| {
            let lines: Vec<String> = op.inputs.iter().map(|q| q.index().to_string()).collect();
            format!("{}[{}]", op.operation.name(), lines.join(","))
        })
        .collect()
}

/// Helper: a one-qubit Hadamard circuit.
fn hadamard_circuit() -> CircuitGraph {
    let mut g = CircuitGraph::new();
    let q = g.qubit("q0", QubitValue::Zero, 100.0);
    let h = g.single_gate("h", SingleQubitOp::Hadamard, 100.0);
    let m = g.measurement("m0", 100.0);
    g.connect(&q, &h);
    g.connect(&h, &m);
    g
}

/// Helper: two qubits into a CNOT, then measured.
fn cnot_circuit() -> CircuitGraph {
    let mut g = CircuitGraph::new();
    let q0 = g.qubit("q0", QubitValue::Zero, 100.0);
    let q1 = g.qubit("q1", QubitValue::One, 180.0);
    let cx = g.two_gate("cx", TwoQubitOp::Cnot, 140.0);
    let m0 = g.measurement("m0", 100.0);
    let m1 = g.measurement("m1", 180.0);
    g.connect_handles(&q0, None, &cx, Some(Handle::Input1));
    g.connect_handles(&q1, None, &cx, Some(Handle::Input2));
    g.connect_handles(&cx, Some(Handle::Output1), &m0, None);
    g.connect_handles(&cx, Some(Handle::Output2), &m1, None);
    g
}

// ============================================================================
// Well-formed circuits
// ============================================================================

#[test]
fn test_single_hadamard_stabilizer() {
    let compiled = compile(&hadamard_circuit(), EndpointMode::Stabilizer).unwrap();
    assert_eq!(compiled.num_qubits(), 1);
    assert_eq!(compiled.qubits[0].index, LogicalQubit(0));
    assert_eq!(compiled.qubits[0].value, QubitValue::Zero);
    assert_eq!(rendered(&compiled), ["hadamard[0]"]);
}

#[test]
fn test_single_hadamard_circuit_mode() {
    let compiled = compile(&hadamard_circuit(), EndpointMode::Circuit).unwrap();
    assert_eq!(rendered(&compiled), ["hadamard[0]", "measurement[0]"]);
}

#[test]
fn test_cnot_qubit_order_and_inputs() {
    let compiled = compile(&cnot_circuit(), EndpointMode::Stabilizer).unwrap();
    let ids: Vec<&str> = compiled.qubits.iter().map(|q| q.id.as_str()).collect();
    assert_eq!(ids, ["q0", "q1"]);
    assert_eq!(compiled.qubits[1].value, QubitValue::One);
    assert_eq!(rendered(&compiled), ["cnot[0,1]"]);
}

#[test]
fn test_cnot_circuit_request_json() {
    let compiled = compile(&cnot_circuit(), EndpointMode::Circuit).unwrap();
    let json = serde_json::to_value(compiled.to_circuit_request()).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "qubitNodes": [{"id": "q0", "value": 0}, {"id": "q1", "value": 1}],
            "operations": [
                {"operation": "cnot", "inputs": [0, 1]},
                {"operation": "measurement", "inputs": [0]},
                {"operation": "measurement", "inputs": [1]}
            ]
        })
    );
}

#[test]
fn test_editor_export_compiles() {
    let json = r#"{
        "nodes": [
            {"id": "b", "type": "qubitNode", "position": {"x": 0, "y": 200}, "data": {"value": "|1⟩"}},
            {"id": "a", "type": "qubitNode", "position": {"x": 0, "y": 50}, "data": {"value": 0}},
            {"id": "s", "type": "twoQubitGateNode", "position": {"x": 200, "y": 120}, "data": {"operation": "swap"}},
            {"id": "z", "type": "singleQubitGateNode", "position": {"x": 100, "y": 200}, "data": {"operation": "pauli_z"}},
            {"id": "ma", "type": "measurementNode", "position": {"x": 300, "y": 50}, "data": {}},
            {"id": "mb", "type": "measurementNode", "position": {"x": 300, "y": 200}, "data": {}}
        ],
        "edges": [
            {"id": "e4", "source": "s", "target": "mb", "sourceHandle": "output2"},
            {"id": "e1", "source": "a", "target": "s", "targetHandle": "input1"},
            {"id": "e2", "source": "b", "target": "z"},
            {"id": "e3", "source": "z", "target": "s", "targetHandle": "input2"},
            {"id": "e5", "source": "s", "target": "ma", "sourceHandle": "output1"}
        ]
    }"#;
    let graph = CircuitGraph::from_json(json).unwrap();
    let compiled = compile(&graph, EndpointMode::Circuit).unwrap();
    assert_eq!(compiled.qubits[0].id.as_str(), "a");
    assert_eq!(compiled.qubits[1].value, QubitValue::One);
    assert_eq!(
        rendered(&compiled),
        ["pauli_z[1]", "swap[0,1]", "measurement[0]", "measurement[1]"]
    );
}

#[test]
fn test_compiler_reusable_across_graphs() {
    let compiler = Compiler::new(EndpointMode::Stabilizer);
    let a = compiler.compile(&hadamard_circuit()).unwrap();
    let b = compiler.compile(&cnot_circuit()).unwrap();
    let a_again = compiler.compile(&hadamard_circuit()).unwrap();
    assert_eq!(a, a_again);
    assert_ne!(a, b);
}

// ============================================================================
// Rejected circuits
// ============================================================================

#[test]
fn test_no_qubits() {
    let mut g = CircuitGraph::new();
    g.measurement("m0", 0.0);
    assert_eq!(validate(&g), Err(StructuralError::NoQubits));
    assert!(matches!(
        compile(&g, EndpointMode::Circuit),
        Err(CompileError::Structural(StructuralError::NoQubits))
    ));
}

#[test]
fn test_measurement_mismatch() {
    let mut g = hadamard_circuit();
    g.qubit("q1", QubitValue::Zero, 200.0);
    assert_eq!(
        validate(&g),
        Err(StructuralError::MeasurementCountMismatch {
            qubits: 2,
            measurements: 1
        })
    );
}

#[test]
fn test_gate_missing_output_names_operation() {
    let mut g = CircuitGraph::new();
    let q = g.qubit("q0", QubitValue::Zero, 0.0);
    let h = g.single_gate("h", SingleQubitOp::Hadamard, 0.0);
    g.measurement("m0", 0.0);
    g.connect(&q, &h);

    assert_eq!(
        validate(&g).unwrap_err().to_string(),
        "single qubit gate (hadamard) must have exactly 1 output wire, found 0"
    );
    let err = compile(&g, EndpointMode::Circuit).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid circuit: single qubit gate (hadamard) must have exactly 1 output wire, found 0"
    );
}

#[test]
fn test_cnot_with_one_input_names_operation() {
    let mut g = CircuitGraph::new();
    let q0 = g.qubit("q0", QubitValue::Zero, 0.0);
    let cx = g.two_gate("cx", TwoQubitOp::Cnot, 0.0);
    let m0 = g.measurement("m0", 0.0);
    g.connect_handles(&q0, None, &cx, Some(Handle::Input1));
    g.connect_handles(&cx, Some(Handle::Output1), &m0, None);

    assert_eq!(
        validate(&g).unwrap_err().to_string(),
        "two qubit gate (cnot) must have exactly 2 input wires, found 1"
    );
}

#[test]
fn test_first_violation_independent_of_collection_order() {
    let build = |reverse: bool| {
        let mut g = CircuitGraph::new();
        let ids = if reverse { ["q1", "q0"] } else { ["q0", "q1"] };
        for (i, id) in ids.iter().enumerate() {
            g.qubit(*id, QubitValue::Zero, i as f64);
            g.measurement(format!("m{id}"), i as f64);
        }
        g
    };
    assert_eq!(validate(&build(false)), validate(&build(true)));
}

#[test]
fn test_half_wired_cnot_stalls_without_validation() {
    let mut g = CircuitGraph::new();
    let q0 = g.qubit("q0", QubitValue::Zero, 0.0);
    let cx = g.two_gate("cx", TwoQubitOp::Cnot, 0.0);
    let m0 = g.measurement("m0", 0.0);
    g.connect_handles(&q0, None, &cx, Some(Handle::Input1));
    g.connect_handles(&cx, Some(Handle::Output1), &m0, None);

    let adjacency = Adjacency::build(&g);
    let result = schedule(&adjacency);
    assert!(result.ops.is_empty());
    assert!(result.stalled.contains(&NodeId::new("cx")));

    let unchecked = Compiler::new(EndpointMode::Circuit).with_validator(StructuralValidator::new());
    assert!(matches!(
        unchecked.compile(&g),
        Err(CompileError::Stalled { .. })
    ));

    // With the standard rules the same graph never reaches the scheduler.
    assert!(matches!(
        compile(&g, EndpointMode::Circuit),
        Err(CompileError::Structural(_))
    ));
}
