//! Condition AST nodes
//!
//! A parsed condition sentence is a tree of comparison leaves joined by
//! logical nodes. Trees are built once by the parser and never mutated
//! afterwards, so a single tree can be shared between threads and
//! evaluated against many binding sets.

use super::operator::{LogicalKind, OperatorKind};
use crate::types::Literal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Condition AST node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConditionNode {
    /// `[identifier] operator literal`
    Comparison {
        identifier: String,
        operator: OperatorKind,
        literal: Literal,
    },

    /// `left and right` / `left or right`
    Logical {
        kind: LogicalKind,
        left: Box<ConditionNode>,
        right: Box<ConditionNode>,
    },
}

impl ConditionNode {
    /// Create a comparison leaf
    pub fn comparison(
        identifier: impl Into<String>,
        operator: OperatorKind,
        literal: impl Into<Literal>,
    ) -> Self {
        ConditionNode::Comparison {
            identifier: identifier.into(),
            operator,
            literal: literal.into(),
        }
    }

    /// Create a logical node
    pub fn logical(kind: LogicalKind, left: ConditionNode, right: ConditionNode) -> Self {
        ConditionNode::Logical {
            kind,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Create an AND node
    pub fn and(left: ConditionNode, right: ConditionNode) -> Self {
        Self::logical(LogicalKind::And, left, right)
    }

    /// Create an OR node
    pub fn or(left: ConditionNode, right: ConditionNode) -> Self {
        Self::logical(LogicalKind::Or, left, right)
    }

    /// Height of the tree; a single comparison has depth 1
    pub fn depth(&self) -> usize {
        match self {
            ConditionNode::Comparison { .. } => 1,
            ConditionNode::Logical { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    /// Number of comparison leaves
    pub fn comparison_count(&self) -> usize {
        match self {
            ConditionNode::Comparison { .. } => 1,
            ConditionNode::Logical { left, right, .. } => {
                left.comparison_count() + right.comparison_count()
            }
        }
    }

    pub fn is_comparison(&self) -> bool {
        matches!(self, ConditionNode::Comparison { .. })
    }

    fn fmt_child(
        &self,
        f: &mut fmt::Formatter<'_>,
        parent: LogicalKind,
        right_side: bool,
    ) -> fmt::Result {
        // Logical chains associate to the left, so an equal-precedence node
        // on the right needs parentheses to keep its shape.
        let needs_parens = match self {
            ConditionNode::Logical { kind, .. } => {
                kind.precedence() < parent.precedence()
                    || (right_side && kind.precedence() == parent.precedence())
            }
            ConditionNode::Comparison { .. } => false,
        };

        if needs_parens {
            write!(f, "({})", self)
        } else {
            write!(f, "{}", self)
        }
    }
}

impl fmt::Display for ConditionNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConditionNode::Comparison {
                identifier,
                operator,
                literal,
            } => write!(f, "[{}] {} {}", identifier, operator, literal),
            ConditionNode::Logical { kind, left, right } => {
                left.fmt_child(f, *kind, false)?;
                write!(f, " {} ", kind)?;
                right.fmt_child(f, *kind, true)
            }
        }
    }
}
