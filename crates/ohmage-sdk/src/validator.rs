//! Survey condition validation
//!
//! Checks every conditioned item of a survey:
//! - the sentence parses
//! - every referenced identifier is an item of the same survey
//! - with `require_prior_reference`, the referenced item comes before the
//!   conditioned one, since responses are collected in order

use crate::engine::ConditionEngine;
use crate::error::{Result, SdkError};
use ohmage_core::{GroupingMap, SurveyDefinition};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// Grouping maps of a validated survey, keyed by item id
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurveyValidation {
    pub survey_id: String,
    pub conditions: BTreeMap<String, GroupingMap>,
}

impl SurveyValidation {
    /// Ids of the items that carry a condition
    pub fn conditioned_items(&self) -> impl Iterator<Item = &str> {
        self.conditions.keys().map(String::as_str)
    }
}

/// Validate all conditions of a survey, stopping at the first error
pub(crate) fn validate_survey(
    engine: &ConditionEngine,
    survey: &SurveyDefinition,
) -> Result<SurveyValidation> {
    let prompts: HashSet<String> = survey.items.iter().map(|item| item.id.clone()).collect();
    let mut conditions = BTreeMap::new();

    for (position, item) in survey.items.iter().enumerate() {
        let Some(sentence) = item.condition.as_deref() else {
            continue;
        };

        let map = engine.validate_against(sentence, &prompts)?;

        if engine.config().require_prior_reference {
            for identifier in map.keys() {
                let referenced = survey.position_of(identifier).unwrap_or(usize::MAX);
                if referenced >= position {
                    return Err(SdkError::ForwardReference {
                        item: item.id.clone(),
                        identifier: identifier.clone(),
                    });
                }
            }
        }

        conditions.insert(item.id.clone(), map);
    }

    tracing::debug!(
        "Validated survey '{}': {} conditioned items",
        survey.id,
        conditions.len()
    );

    Ok(SurveyValidation {
        survey_id: survey.id.clone(),
        conditions,
    })
}
