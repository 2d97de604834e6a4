//! Configuration types for ConditionEngine

use crate::error::{Result, SdkError};
use ohmage_parser::DEFAULT_MAX_DEPTH;
use serde::{Deserialize, Serialize};

/// Default bound on cached condition trees
pub const DEFAULT_MAX_CACHED_CONDITIONS: usize = 1024;

/// What to do when a condition references a prompt with no response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingBindingPolicy {
    /// Report `SdkError::Evaluation(MissingBinding)`
    #[default]
    Fail,
    /// Show the conditioned item
    Display,
    /// Skip the conditioned item
    Hide,
}

/// Main engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum tree depth and parenthesis nesting of a condition
    pub max_depth: usize,

    /// Handling of missing responses in `should_display`
    pub missing_binding_policy: MissingBindingPolicy,

    /// Conditions may only reference items that come earlier in the survey
    pub require_prior_reference: bool,

    /// Keep parsed trees per sentence for repeated evaluation
    pub cache_conditions: bool,

    /// Most trees kept by the cache; the oldest is evicted when full
    pub max_cached_conditions: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            missing_binding_policy: MissingBindingPolicy::default(),
            require_prior_reference: true,
            cache_conditions: true,
            max_cached_conditions: DEFAULT_MAX_CACHED_CONDITIONS,
        }
    }
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum nesting depth
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the missing-binding policy
    pub fn with_missing_binding_policy(mut self, policy: MissingBindingPolicy) -> Self {
        self.missing_binding_policy = policy;
        self
    }

    /// Require conditions to reference earlier items only
    pub fn require_prior_reference(mut self, enable: bool) -> Self {
        self.require_prior_reference = enable;
        self
    }

    /// Enable the parsed-condition cache
    pub fn cache_conditions(mut self, enable: bool) -> Self {
        self.cache_conditions = enable;
        self
    }

    /// Set the cache bound
    pub fn with_max_cached_conditions(mut self, max: usize) -> Self {
        self.max_cached_conditions = max;
        self
    }

    /// Check that the configuration is usable
    pub fn validate(&self) -> Result<()> {
        if self.max_depth == 0 {
            return Err(SdkError::ConfigError(
                "max_depth must be at least 1".to_string(),
            ));
        }
        if self.cache_conditions && self.max_cached_conditions == 0 {
            return Err(SdkError::ConfigError(
                "max_cached_conditions must be at least 1 when caching is enabled".to_string(),
            ));
        }
        Ok(())
    }
}
