//! Circuit graph nodes.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::{IrError, IrResult};
use crate::gate::{Operation, SingleQubitOp, TwoQubitOp};

/// Identifier of a node, unique within one graph snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Create a node id.
    pub fn new(id: impl Into<String>) -> Self {
        NodeId(id.into())
    }

    /// Get the id as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        NodeId(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        NodeId(id)
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Canvas coordinate of a node.
///
/// Only `y` carries meaning for compilation: it orders the qubit sources.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal canvas coordinate.
    pub x: f64,
    /// Vertical canvas coordinate.
    pub y: f64,
}

impl Position {
    /// Create a position.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Initial computational-basis value of a qubit source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum QubitValue {
    /// |0⟩
    #[default]
    Zero,
    /// |1⟩
    One,
}

impl QubitValue {
    /// Parse the value spellings the editor produces: `0`, `1`, `"0"`, `"|1⟩"`.
    fn from_editor(id: &NodeId, value: &Value) -> IrResult<Self> {
        let parsed = match value {
            Value::Number(n) => match n.as_u64() {
                Some(0) => Some(QubitValue::Zero),
                Some(1) => Some(QubitValue::One),
                _ => None,
            },
            Value::String(s) => match s.trim() {
                "0" | "|0⟩" | "|0>" => Some(QubitValue::Zero),
                "1" | "|1⟩" | "|1>" => Some(QubitValue::One),
                _ => None,
            },
            _ => None,
        };
        parsed.ok_or_else(|| IrError::InvalidQubitValue {
            id: id.to_string(),
            value: value.to_string(),
        })
    }
}

impl TryFrom<u8> for QubitValue {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(QubitValue::Zero),
            1 => Ok(QubitValue::One),
            other => Err(format!("qubit value must be 0 or 1, got {other}")),
        }
    }
}

impl From<QubitValue> for u8 {
    fn from(value: QubitValue) -> Self {
        match value {
            QubitValue::Zero => 0,
            QubitValue::One => 1,
        }
    }
}

impl fmt::Display for QubitValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "|{}⟩", u8::from(*self))
    }
}

/// The kind of a node together with its kind-specific payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Start of one logical qubit line.
    QubitSource {
        /// Initial basis value.
        value: QubitValue,
    },
    /// A one-input, one-output gate.
    SingleQubitGate {
        /// The gate operation.
        operation: SingleQubitOp,
    },
    /// A gate with `input1`/`input2` and `output1`/`output2` handles.
    TwoQubitGate {
        /// The gate operation.
        operation: TwoQubitOp,
    },
    /// End of one logical qubit line.
    Measurement,
}

impl NodeKind {
    /// Editor type tag of this kind.
    pub fn editor_type(&self) -> &'static str {
        match self {
            NodeKind::QubitSource { .. } => "qubitNode",
            NodeKind::SingleQubitGate { .. } => "singleQubitGateNode",
            NodeKind::TwoQubitGate { .. } => "twoQubitGateNode",
            NodeKind::Measurement => "measurementNode",
        }
    }

    /// Human-readable kind name used in diagnostics.
    pub fn label(&self) -> &'static str {
        match self {
            NodeKind::QubitSource { .. } => "qubit",
            NodeKind::SingleQubitGate { .. } => "single qubit gate",
            NodeKind::TwoQubitGate { .. } => "two qubit gate",
            NodeKind::Measurement => "measurement",
        }
    }

    /// Gate operation name, if this is a gate.
    pub fn operation_name(&self) -> Option<&'static str> {
        match self {
            NodeKind::SingleQubitGate { operation } => Some(operation.name()),
            NodeKind::TwoQubitGate { operation } => Some(operation.name()),
            NodeKind::QubitSource { .. } | NodeKind::Measurement => None,
        }
    }

    /// The operation this node contributes to the emitted list.
    ///
    /// Qubit sources contribute nothing.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            NodeKind::SingleQubitGate { operation } => Some(Operation::Single(*operation)),
            NodeKind::TwoQubitGate { operation } => Some(Operation::Two(*operation)),
            NodeKind::Measurement => Some(Operation::Measurement),
            NodeKind::QubitSource { .. } => None,
        }
    }

    /// Check if this is a qubit source.
    #[inline]
    pub fn is_qubit_source(&self) -> bool {
        matches!(self, NodeKind::QubitSource { .. })
    }

    /// Check if this is a measurement.
    #[inline]
    pub fn is_measurement(&self) -> bool {
        matches!(self, NodeKind::Measurement)
    }

    /// Check if this is a gate of either arity.
    #[inline]
    pub fn is_gate(&self) -> bool {
        matches!(
            self,
            NodeKind::SingleQubitGate { .. } | NodeKind::TwoQubitGate { .. }
        )
    }
}

/// A node of the circuit graph.
///
/// Serializes in the editor's export shape:
/// `{ "id", "type", "position": {x, y}, "data": {...} }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "EditorNode", into = "EditorNode")]
pub struct Node {
    /// Node identifier.
    pub id: NodeId,
    /// Kind and payload.
    pub kind: NodeKind,
    /// Canvas position.
    pub position: Position,
}

impl Node {
    /// Create a node.
    pub fn new(id: impl Into<NodeId>, kind: NodeKind, position: Position) -> Self {
        Self {
            id: id.into(),
            kind,
            position,
        }
    }

    /// Create a qubit source.
    pub fn qubit(id: impl Into<NodeId>, value: QubitValue, position: Position) -> Self {
        Self::new(id, NodeKind::QubitSource { value }, position)
    }

    /// Create a single-qubit gate.
    pub fn single_gate(id: impl Into<NodeId>, operation: SingleQubitOp, position: Position) -> Self {
        Self::new(id, NodeKind::SingleQubitGate { operation }, position)
    }

    /// Create a two-qubit gate.
    pub fn two_gate(id: impl Into<NodeId>, operation: TwoQubitOp, position: Position) -> Self {
        Self::new(id, NodeKind::TwoQubitGate { operation }, position)
    }

    /// Create a measurement.
    pub fn measurement(id: impl Into<NodeId>, position: Position) -> Self {
        Self::new(id, NodeKind::Measurement, position)
    }

    /// Initial value, if this is a qubit source.
    pub fn qubit_value(&self) -> Option<QubitValue> {
        match self.kind {
            NodeKind::QubitSource { value } => Some(value),
            _ => None,
        }
    }
}

/// Node as exported by the editor canvas.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct EditorNode {
    id: NodeId,
    #[serde(rename = "type")]
    node_type: String,
    #[serde(default)]
    position: Position,
    #[serde(default)]
    data: Value,
}

impl EditorNode {
    fn field(&self, field: &'static str) -> IrResult<&Value> {
        self.data.get(field).ok_or_else(|| IrError::MissingNodeData {
            id: self.id.to_string(),
            field,
        })
    }

    fn operation(&self) -> IrResult<&str> {
        let value = self.field("operation")?;
        value.as_str().ok_or_else(|| IrError::UnknownOperation {
            kind: "gate",
            operation: value.to_string(),
        })
    }
}

impl TryFrom<EditorNode> for Node {
    type Error = IrError;

    fn try_from(raw: EditorNode) -> Result<Self, Self::Error> {
        let kind = match raw.node_type.as_str() {
            "qubitNode" => NodeKind::QubitSource {
                value: QubitValue::from_editor(&raw.id, raw.field("value")?)?,
            },
            "singleQubitGateNode" => NodeKind::SingleQubitGate {
                operation: raw.operation()?.parse()?,
            },
            "twoQubitGateNode" => NodeKind::TwoQubitGate {
                operation: raw.operation()?.parse()?,
            },
            "measurementNode" => NodeKind::Measurement,
            other => {
                return Err(IrError::UnknownNodeType {
                    id: raw.id.to_string(),
                    node_type: other.to_string(),
                });
            }
        };
        Ok(Node {
            id: raw.id,
            kind,
            position: raw.position,
        })
    }
}

impl From<Node> for EditorNode {
    fn from(node: Node) -> Self {
        let data = match node.kind {
            NodeKind::QubitSource { value } => json!({ "value": u8::from(value) }),
            NodeKind::SingleQubitGate { operation } => json!({ "operation": operation.name() }),
            NodeKind::TwoQubitGate { operation } => json!({ "operation": operation.name() }),
            NodeKind::Measurement => json!({}),
        };
        EditorNode {
            id: node.id,
            node_type: node.kind.editor_type().to_string(),
            position: node.position,
            data,
        }
    }
}
