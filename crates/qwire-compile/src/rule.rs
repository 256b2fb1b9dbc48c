//! Validation rule trait.

use crate::adjacency::Adjacency;
use crate::error::StructuralError;

/// A single well-formedness check over a graph snapshot.
///
/// Rules are read-only: they inspect the [`Adjacency`] and report the first
/// violation they find. A [`StructuralValidator`](crate::StructuralValidator)
/// runs rules in a fixed order and stops at the first failure.
pub trait ValidationRule: Send + Sync {
    /// Get the name of this rule.
    fn name(&self) -> &str;

    /// Check the snapshot.
    fn check(&self, adjacency: &Adjacency<'_>) -> Result<(), StructuralError>;
}
