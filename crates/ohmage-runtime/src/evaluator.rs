//! Condition evaluator
//!
//! Evaluates a parsed condition against the responses collected so far.
//! AND and OR short-circuit: the right operand is never looked at once the
//! left operand decides the result, so a missing binding on the right side
//! is not an error in that case.

use crate::comparison::compare;
use crate::error::{EvaluationError, Result};
use crate::trace::ConditionTrace;
use ohmage_core::{Bindings, ConditionNode, Literal, LogicalKind};

/// Evaluate a condition against bindings
pub fn evaluate(tree: &ConditionNode, bindings: &Bindings) -> Result<bool> {
    Evaluator::evaluate(tree, bindings)
}

/// Stateless evaluator over condition trees
pub struct Evaluator;

impl Evaluator {
    /// Evaluate a condition against bindings
    pub fn evaluate(tree: &ConditionNode, bindings: &Bindings) -> Result<bool> {
        match tree {
            ConditionNode::Comparison {
                identifier,
                operator,
                literal,
            } => {
                let actual = Self::lookup(identifier, bindings)?;
                let result = compare(identifier, actual, *operator, literal)?;
                tracing::debug!(
                    "[{}] {} {} with {} -> {}",
                    identifier,
                    operator,
                    literal,
                    actual,
                    result
                );
                Ok(result)
            }
            ConditionNode::Logical { kind, left, right } => {
                let left_result = Self::evaluate(left, bindings)?;
                match (kind, left_result) {
                    (LogicalKind::And, false) => Ok(false),
                    (LogicalKind::Or, true) => Ok(true),
                    _ => Self::evaluate(right, bindings),
                }
            }
        }
    }

    /// Evaluate a condition and record how each evaluated node resolved
    pub fn evaluate_with_trace(
        tree: &ConditionNode,
        bindings: &Bindings,
    ) -> Result<(bool, ConditionTrace)> {
        match tree {
            ConditionNode::Comparison {
                identifier,
                operator,
                literal,
            } => {
                let actual = Self::lookup(identifier, bindings)?;
                let result = compare(identifier, actual, *operator, literal)?;
                Ok((
                    result,
                    ConditionTrace::comparison(tree.to_string(), actual.clone(), result),
                ))
            }
            ConditionNode::Logical { kind, left, right } => {
                let (left_result, left_trace) = Self::evaluate_with_trace(left, bindings)?;
                let mut nested = vec![left_trace];

                let result = match (kind, left_result) {
                    (LogicalKind::And, false) => false,
                    (LogicalKind::Or, true) => true,
                    _ => {
                        let (right_result, right_trace) =
                            Self::evaluate_with_trace(right, bindings)?;
                        nested.push(right_trace);
                        right_result
                    }
                };

                Ok((
                    result,
                    ConditionTrace::logical(tree.to_string(), *kind, result, nested),
                ))
            }
        }
    }

    fn lookup<'b>(identifier: &str, bindings: &'b Bindings) -> Result<&'b Literal> {
        bindings
            .get(identifier)
            .ok_or_else(|| EvaluationError::MissingBinding(identifier.to_string()))
    }
}
