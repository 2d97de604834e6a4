//! Survey definition types
//!
//! A survey is an ordered list of items. An item may carry a condition
//! sentence that decides whether it is displayed; the sentence may only
//! refer to items of the same survey.

use serde::{Deserialize, Serialize};

/// A single survey item (prompt)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyItem {
    /// Prompt identifier referenced as `[id]` in conditions
    pub id: String,

    /// Prompt text shown to the participant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Condition sentence controlling display
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}

impl SurveyItem {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: None,
            condition: None,
        }
    }

    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

/// A survey definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyDefinition {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Items in presentation order
    #[serde(default)]
    pub items: Vec<SurveyItem>,
}

impl SurveyDefinition {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: None,
            items: Vec::new(),
        }
    }

    pub fn with_item(mut self, item: SurveyItem) -> Self {
        self.items.push(item);
        self
    }

    /// Position of an item in presentation order
    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    /// Items that carry a condition sentence
    pub fn conditional_items(&self) -> impl Iterator<Item = (&SurveyItem, &str)> {
        self.items
            .iter()
            .filter_map(|item| item.condition.as_deref().map(|c| (item, c)))
    }
}
