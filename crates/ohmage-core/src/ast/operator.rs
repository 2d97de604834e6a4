//! Operators for condition sentences

use serde::{Deserialize, Serialize};
use std::fmt;

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperatorKind {
    /// Equal (==)
    Eq,
    /// Not equal (!=)
    Ne,
    /// Less than (<)
    Lt,
    /// Less than or equal (<=)
    Le,
    /// Greater than (>)
    Gt,
    /// Greater than or equal (>=)
    Ge,
}

impl OperatorKind {
    /// Source symbol for this operator
    pub fn symbol(&self) -> &'static str {
        match self {
            OperatorKind::Eq => "==",
            OperatorKind::Ne => "!=",
            OperatorKind::Lt => "<",
            OperatorKind::Le => "<=",
            OperatorKind::Gt => ">",
            OperatorKind::Ge => ">=",
        }
    }

    /// Returns true for operators that need an ordering (`<`, `<=`, `>`, `>=`)
    pub fn is_ordering(&self) -> bool {
        matches!(
            self,
            OperatorKind::Lt | OperatorKind::Le | OperatorKind::Gt | OperatorKind::Ge
        )
    }
}

impl fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Logical connectives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogicalKind {
    And,
    Or,
}

impl LogicalKind {
    /// Binding strength; AND binds tighter than OR
    pub fn precedence(&self) -> u8 {
        match self {
            LogicalKind::Or => 1,
            LogicalKind::And => 2,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            LogicalKind::And => "and",
            LogicalKind::Or => "or",
        }
    }
}

impl fmt::Display for LogicalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}
