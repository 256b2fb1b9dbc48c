//! Ordered rule runner for structural validation.

use tracing::{debug, instrument};

use qwire_ir::CircuitGraph;

use crate::adjacency::Adjacency;
use crate::error::StructuralError;
use crate::rule::ValidationRule;
use crate::rules::{
    GateDegree, HandleAssignment, MeasurementFanIn, MeasurementParity, NoOrphanGates,
    QubitFanOut, QubitPresence, TerminalDirection, WireEndpoints,
};

/// Runs validation rules in order and reports the first violation.
pub struct StructuralValidator {
    /// The rules to check, in order.
    rules: Vec<Box<dyn ValidationRule>>,
}

impl StructuralValidator {
    /// Create a validator with no rules.
    pub fn new() -> Self {
        Self { rules: vec![] }
    }

    /// Create a validator with the built-in rules in their fixed order.
    pub fn standard() -> Self {
        let mut validator = Self::new();
        validator.add_rule(QubitPresence);
        validator.add_rule(MeasurementParity);
        validator.add_rule(QubitFanOut);
        validator.add_rule(GateDegree);
        validator.add_rule(MeasurementFanIn);
        validator.add_rule(NoOrphanGates);
        validator.add_rule(WireEndpoints);
        validator.add_rule(TerminalDirection);
        validator.add_rule(HandleAssignment);
        validator
    }

    /// Append a rule.
    pub fn add_rule(&mut self, rule: impl ValidationRule + 'static) {
        self.rules.push(Box::new(rule));
    }

    /// Check a snapshot.
    pub fn validate(&self, graph: &CircuitGraph) -> Result<(), StructuralError> {
        self.run(&Adjacency::build(graph))
    }

    /// Check a prebuilt adjacency.
    #[instrument(skip_all, fields(rules = self.rules.len(), nodes = adjacency.num_nodes()))]
    pub fn run(&self, adjacency: &Adjacency<'_>) -> Result<(), StructuralError> {
        for rule in &self.rules {
            if let Err(err) = rule.check(adjacency) {
                debug!("Rule {} rejected graph: {}", rule.name(), err);
                return Err(err);
            }
        }
        debug!("All {} rules passed", self.rules.len());
        Ok(())
    }

    /// Names of the configured rules, in order.
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Get the number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if the validator has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for StructuralValidator {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for StructuralValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StructuralValidator")
            .field("rules", &self.rule_names())
            .finish()
    }
}
