//! Condition engine
//!
//! `ConditionEngine` is the entry point for campaign-definition validation
//! and response-time display decisions. It is `Send + Sync`; share one
//! engine behind an `Arc` across request handlers.

use crate::cache::{CacheStats, ConditionCache};
use crate::config::{EngineConfig, MissingBindingPolicy};
use crate::error::{Result, SdkError};
use crate::validator::{self, SurveyValidation};
use ohmage_core::{Bindings, ConditionNode, GroupingMap, SurveyDefinition};
use ohmage_parser::{ConditionParser, SurveyParser};
use ohmage_runtime::{ConditionTrace, EvaluationError, Evaluator};
use std::collections::HashSet;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

/// Condition engine
pub struct ConditionEngine {
    config: EngineConfig,
    parser: ConditionParser,
    /// Parsed trees keyed by sentence, bounded by `max_cached_conditions`
    cache: RwLock<ConditionCache>,
}

impl ConditionEngine {
    /// Create an engine from configuration
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let parser = ConditionParser::new().with_max_depth(config.max_depth);
        let capacity = if config.cache_conditions {
            config.max_cached_conditions
        } else {
            0
        };

        tracing::debug!("Condition engine created with {:?}", config);
        Ok(Self {
            config,
            parser,
            cache: RwLock::new(ConditionCache::new(capacity)),
        })
    }

    /// Get the engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Parse a condition sentence
    ///
    /// With `cache_conditions` enabled the tree is parsed once per distinct
    /// sentence and shared afterwards, keeping at most
    /// `max_cached_conditions` trees (oldest evicted first). Failed parses
    /// are never cached.
    pub fn parse(&self, sentence: &str) -> Result<Arc<ConditionNode>> {
        if self.config.cache_conditions {
            let cached = self
                .cache
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .get(sentence);
            if let Some(tree) = cached {
                tracing::trace!("Condition cache hit: {}", sentence);
                return Ok(tree);
            }
        }

        let tree = self
            .parser
            .parse(sentence)
            .map(Arc::new)
            .map_err(|source| SdkError::InvalidCondition {
                sentence: sentence.to_string(),
                source,
            })?;

        if self.config.cache_conditions {
            let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
            return Ok(cache.insert(sentence, tree));
        }

        Ok(tree)
    }

    /// Validate a condition sentence and return its grouping map
    pub fn validate(&self, sentence: &str) -> Result<GroupingMap> {
        let tree = self.parse(sentence)?;
        Ok(ohmage_runtime::group(&tree))
    }

    /// Validate a condition sentence against the prompts declared in a campaign
    pub fn validate_against(
        &self,
        sentence: &str,
        prompts: &HashSet<String>,
    ) -> Result<GroupingMap> {
        let map = self.validate(sentence)?;

        if let Some(identifier) = map.keys().find(|id| !prompts.contains(*id)) {
            return Err(SdkError::UnknownPrompt {
                identifier: identifier.clone(),
                sentence: sentence.to_string(),
            });
        }

        Ok(map)
    }

    /// Evaluate a condition sentence against collected responses
    pub fn evaluate(&self, sentence: &str, bindings: &Bindings) -> Result<bool> {
        let tree = self.parse(sentence)?;
        Ok(Evaluator::evaluate(&tree, bindings)?)
    }

    /// Evaluate a condition sentence and return the evaluation trace
    pub fn evaluate_with_trace(
        &self,
        sentence: &str,
        bindings: &Bindings,
    ) -> Result<(bool, ConditionTrace)> {
        let tree = self.parse(sentence)?;
        Ok(Evaluator::evaluate_with_trace(&tree, bindings)?)
    }

    /// Decide whether a conditioned item is displayed
    ///
    /// Missing responses are handled by `missing_binding_policy`; every
    /// other evaluation error is returned.
    pub fn should_display(&self, sentence: &str, bindings: &Bindings) -> Result<bool> {
        let tree = self.parse(sentence)?;

        match Evaluator::evaluate(&tree, bindings) {
            Ok(result) => Ok(result),
            Err(EvaluationError::MissingBinding(identifier)) => {
                match self.config.missing_binding_policy {
                    MissingBindingPolicy::Fail => {
                        Err(EvaluationError::MissingBinding(identifier).into())
                    }
                    MissingBindingPolicy::Display => {
                        tracing::warn!(
                            "No response for '{}' in condition '{}', displaying item",
                            identifier,
                            sentence
                        );
                        Ok(true)
                    }
                    MissingBindingPolicy::Hide => {
                        tracing::warn!(
                            "No response for '{}' in condition '{}', hiding item",
                            identifier,
                            sentence
                        );
                        Ok(false)
                    }
                }
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Validate every condition of a survey
    pub fn validate_survey(&self, survey: &SurveyDefinition) -> Result<SurveyValidation> {
        validator::validate_survey(self, survey)
    }

    /// Load a survey definition from a YAML file
    pub fn load_survey(&self, path: impl AsRef<Path>) -> Result<SurveyDefinition> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let survey = SurveyParser::parse(&content)?;
        tracing::debug!(
            "Loaded survey '{}' from {}",
            survey.id,
            path.as_ref().display()
        );
        Ok(survey)
    }

    /// Ids of the survey items displayed for the given responses
    pub fn displayed_items(
        &self,
        survey: &SurveyDefinition,
        bindings: &Bindings,
    ) -> Result<Vec<String>> {
        let mut displayed = Vec::with_capacity(survey.items.len());

        for item in &survey.items {
            let visible = match &item.condition {
                Some(sentence) => self.should_display(sentence, bindings)?,
                None => true,
            };
            if visible {
                displayed.push(item.id.clone());
            }
        }

        Ok(displayed)
    }

    /// Number of cached trees
    pub fn cached_len(&self) -> usize {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Cache hit/miss/eviction counters
    pub fn cache_stats(&self) -> CacheStats {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .stats()
    }

    /// Drop all cached trees
    pub fn clear_cache(&self) {
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}
