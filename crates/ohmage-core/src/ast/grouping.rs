//! Grouping map types
//!
//! The grouping map is a definition-time view of a condition: for each
//! identifier, the (operator, literal) pairs it is compared against, in
//! left-to-right order. It drops the AND/OR structure entirely, so the tree
//! stays the source of truth for evaluation.

use super::operator::OperatorKind;
use crate::types::Literal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One constraint on an identifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionValuePair {
    pub operator: OperatorKind,
    pub literal: Literal,
}

impl ConditionValuePair {
    pub fn new(operator: OperatorKind, literal: impl Into<Literal>) -> Self {
        Self {
            operator,
            literal: literal.into(),
        }
    }
}

impl fmt::Display for ConditionValuePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.operator, self.literal)
    }
}

/// Identifier to constraint list, keys sorted for stable output
pub type GroupingMap = BTreeMap<String, Vec<ConditionValuePair>>;
