//! Evaluation trace types

use ohmage_core::{Literal, LogicalKind};
use serde::{Deserialize, Serialize};

/// Record of how one node of a condition evaluated
///
/// Branches skipped by short-circuiting do not appear.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionTrace {
    /// The node rendered as a condition sentence (e.g. `[q1] >= 1`)
    pub expression: String,

    /// The bound response value for a comparison
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<Literal>,

    /// The evaluation result
    pub result: bool,

    /// Connective of a logical node
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<LogicalKind>,

    /// Traces of the evaluated children of a logical node
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nested: Vec<ConditionTrace>,
}

impl ConditionTrace {
    /// Trace of a comparison leaf
    pub fn comparison(expression: String, actual: Literal, result: bool) -> Self {
        Self {
            expression,
            actual: Some(actual),
            result,
            kind: None,
            nested: Vec::new(),
        }
    }

    /// Trace of a logical node
    pub fn logical(
        expression: String,
        kind: LogicalKind,
        result: bool,
        nested: Vec<ConditionTrace>,
    ) -> Self {
        Self {
            expression,
            actual: None,
            result,
            kind: Some(kind),
            nested,
        }
    }
}
