//! Survey definition parser
//!
//! Parses YAML survey definitions:
//!
//! ```yaml
//! survey:
//!   id: mood
//!   title: Daily mood
//!   items:
//!     - id: q1
//!       text: How do you feel today (1-5)?
//!     - id: q2
//!       text: What made it a good day?
//!       condition: "[q1] >= 4"
//! ```
//!
//! Only structure is checked here; condition sentences are validated
//! against the survey by the SDK.

use crate::error::{ParseError, Result};
use ohmage_core::SurveyDefinition;
use serde_yaml::Value as YamlValue;
use std::collections::HashSet;

/// Survey definition parser
pub struct SurveyParser;

impl SurveyParser {
    /// Parse a survey definition from a YAML string
    pub fn parse(yaml_str: &str) -> Result<SurveyDefinition> {
        let yaml: YamlValue = serde_yaml::from_str(yaml_str)?;
        Self::parse_from_yaml(&yaml)
    }

    /// Parse a survey definition from a YAML value
    pub fn parse_from_yaml(yaml: &YamlValue) -> Result<SurveyDefinition> {
        let survey_obj = yaml.get("survey").ok_or_else(|| {
            ParseError::InvalidSurvey("Missing required field: survey".to_string())
        })?;

        let survey: SurveyDefinition = serde_yaml::from_value(survey_obj.clone())?;

        Self::check_structure(&survey)?;
        log::debug!(
            "Parsed survey '{}' with {} items",
            survey.id,
            survey.items.len()
        );
        Ok(survey)
    }

    fn check_structure(survey: &SurveyDefinition) -> Result<()> {
        if survey.id.trim().is_empty() {
            return Err(ParseError::InvalidSurvey("Survey id is empty".to_string()));
        }

        let mut seen = HashSet::new();
        for (index, item) in survey.items.iter().enumerate() {
            if item.id.trim().is_empty() {
                return Err(ParseError::InvalidSurvey(format!(
                    "Item {} of survey '{}' has an empty id",
                    index, survey.id
                )));
            }
            if !seen.insert(item.id.as_str()) {
                return Err(ParseError::InvalidSurvey(format!(
                    "Duplicate item id '{}' in survey '{}'",
                    item.id, survey.id
                )));
            }
        }

        Ok(())
    }
}
