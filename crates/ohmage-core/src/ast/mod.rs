//! Abstract Syntax Tree definitions for condition sentences

pub mod condition;
pub mod grouping;
pub mod operator;
pub mod survey;

pub use condition::ConditionNode;
pub use grouping::{ConditionValuePair, GroupingMap};
pub use operator::{LogicalKind, OperatorKind};
pub use survey::{SurveyDefinition, SurveyItem};
