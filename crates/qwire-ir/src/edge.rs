//! Wires between nodes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::node::NodeId;

/// A named attachment point on a two-qubit gate.
///
/// Single-port nodes use the implicit unnamed handle, represented as `None`
/// on the [`Edge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Handle {
    /// First input (slot 0).
    Input1,
    /// Second input (slot 1).
    Input2,
    /// First output; forwards slot 0.
    Output1,
    /// Second output; forwards slot 1.
    Output2,
}

impl Handle {
    /// Slot index addressed by this handle.
    #[inline]
    pub fn slot(self) -> usize {
        match self {
            Handle::Input1 | Handle::Output1 => 0,
            Handle::Input2 | Handle::Output2 => 1,
        }
    }

    /// Check if this is an input handle.
    #[inline]
    pub fn is_input(self) -> bool {
        matches!(self, Handle::Input1 | Handle::Input2)
    }

    /// Wire name of the handle.
    pub fn name(self) -> &'static str {
        match self {
            Handle::Input1 => "input1",
            Handle::Input2 => "input2",
            Handle::Output1 => "output1",
            Handle::Output2 => "output2",
        }
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A directed wire from `source` to `target`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    /// Editor-assigned edge id, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Node the wire leaves.
    pub source: NodeId,
    /// Node the wire enters.
    pub target: NodeId,
    /// Output handle on the source, for two-qubit gates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<Handle>,
    /// Input handle on the target, for two-qubit gates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_handle: Option<Handle>,
}

impl Edge {
    /// Create a wire between two unnamed handles.
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self {
            id: None,
            source: source.into(),
            target: target.into(),
            source_handle: None,
            target_handle: None,
        }
    }

    /// Set the source handle.
    #[must_use]
    pub fn from_handle(mut self, handle: Handle) -> Self {
        self.source_handle = Some(handle);
        self
    }

    /// Set the target handle.
    #[must_use]
    pub fn to_handle(mut self, handle: Handle) -> Self {
        self.target_handle = Some(handle);
        self
    }

    /// Set the editor id.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}
