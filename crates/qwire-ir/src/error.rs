//! Error types for the IR crate.

use thiserror::Error;

/// Errors that can occur while loading or building a circuit graph.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// The editor node type is not one of the four known node kinds.
    #[error("Unknown node type '{node_type}' on node '{id}'")]
    UnknownNodeType {
        /// Id of the offending node.
        id: String,
        /// The unrecognized type tag.
        node_type: String,
    },

    /// The gate operation name is not part of the vocabulary for its arity.
    #[error("Unknown {kind} operation '{operation}'")]
    UnknownOperation {
        /// Human-readable node kind ("single qubit gate", "two qubit gate").
        kind: &'static str,
        /// The unrecognized operation name.
        operation: String,
    },

    /// A node payload is missing a required field.
    #[error("Node '{id}' is missing data field '{field}'")]
    MissingNodeData {
        /// Id of the offending node.
        id: String,
        /// Name of the missing field.
        field: &'static str,
    },

    /// A qubit source carries an initial value other than 0 or 1.
    #[error("Qubit '{id}' has invalid initial value {value}")]
    InvalidQubitValue {
        /// Id of the offending node.
        id: String,
        /// The rejected value, rendered as JSON.
        value: String,
    },

    /// A stabilizer tableau has an inconsistent shape or out-of-range entries.
    #[error("Invalid tableau: {0}")]
    InvalidTableau(String),

    /// JSON (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
