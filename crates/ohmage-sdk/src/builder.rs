//! Builder pattern for ConditionEngine

use crate::config::{EngineConfig, MissingBindingPolicy};
use crate::engine::ConditionEngine;
use crate::error::Result;

/// Builder for ConditionEngine
///
/// # Example
///
/// ```rust
/// use ohmage_sdk::{ConditionEngineBuilder, MissingBindingPolicy};
///
/// let engine = ConditionEngineBuilder::new()
///     .with_max_depth(32)
///     .missing_binding_policy(MissingBindingPolicy::Display)
///     .build()
///     .unwrap();
///
/// assert_eq!(engine.config().max_depth, 32);
/// ```
#[derive(Debug, Default)]
pub struct ConditionEngineBuilder {
    config: EngineConfig,
}

impl ConditionEngineBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the maximum nesting depth of a condition
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.config.max_depth = max_depth;
        self
    }

    /// Set how missing responses are handled
    pub fn missing_binding_policy(mut self, policy: MissingBindingPolicy) -> Self {
        self.config.missing_binding_policy = policy;
        self
    }

    /// Require conditions to reference earlier items only
    pub fn require_prior_reference(mut self, enable: bool) -> Self {
        self.config.require_prior_reference = enable;
        self
    }

    /// Enable the parsed-condition cache
    pub fn cache_conditions(mut self, enable: bool) -> Self {
        self.config.cache_conditions = enable;
        self
    }

    /// Bound the parsed-condition cache
    pub fn max_cached_conditions(mut self, max: usize) -> Self {
        self.config.max_cached_conditions = max;
        self
    }

    /// Build the engine
    pub fn build(self) -> Result<ConditionEngine> {
        ConditionEngine::new(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let engine = ConditionEngineBuilder::new().build().unwrap();
        assert_eq!(engine.config(), &EngineConfig::default());
    }

    #[test]
    fn test_builder_overrides() {
        let engine = ConditionEngineBuilder::new()
            .with_config(EngineConfig::new().with_max_depth(4))
            .cache_conditions(false)
            .max_cached_conditions(16)
            .require_prior_reference(false)
            .build()
            .unwrap();

        assert_eq!(engine.config().max_depth, 4);
        assert!(!engine.config().cache_conditions);
        assert_eq!(engine.config().max_cached_conditions, 16);
        assert!(!engine.config().require_prior_reference);
    }

    #[test]
    fn test_builder_rejects_invalid_config() {
        assert!(ConditionEngineBuilder::new().with_max_depth(0).build().is_err());
    }
}
