//! Ohmage Core - shared types for the condition expression engine
//!
//! This crate provides the data model used across the ohmage crates:
//! - Literal values and runtime bindings
//! - The condition AST (comparison leaves and logical nodes)
//! - Grouping map types for definition-time validation
//! - Survey definition types

pub mod ast;
pub mod types;

// Re-export commonly used types
pub use ast::{
    ConditionNode, ConditionValuePair, GroupingMap, LogicalKind, OperatorKind, SurveyDefinition,
    SurveyItem,
};
pub use types::{Bindings, Literal};
