//! Ohmage SDK - condition engine for survey campaigns
//!
//! High-level API used by campaign-definition validation and response
//! submission:
//! - `ConditionEngine::validate` / `validate_against` check a condition
//!   sentence when a campaign is uploaded
//! - `ConditionEngine::should_display` decides whether a conditioned item
//!   is shown for the responses collected so far

pub mod builder;
pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod validator;

// Re-export main types
pub use builder::ConditionEngineBuilder;
pub use cache::CacheStats;
pub use config::{EngineConfig, MissingBindingPolicy};
pub use engine::ConditionEngine;
pub use error::{Result, SdkError};
pub use validator::SurveyValidation;

// Re-export commonly used types from dependencies
pub use ohmage_core::{
    Bindings, ConditionNode, ConditionValuePair, GroupingMap, Literal, SurveyDefinition, SurveyItem,
};
pub use ohmage_runtime::ConditionTrace;
