//! Next-topic decision table keyed by proficiency level.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::ProficiencyLevel;

/// Canned topic per level, with a default for unset levels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct TopicTable {
    #[validate(length(min = 1))]
    pub beginner: String,
    #[validate(length(min = 1))]
    pub intermediate: String,
    #[validate(length(min = 1))]
    pub advanced: String,
    #[validate(length(min = 1))]
    pub default: String,
}

impl Default for TopicTable {
    fn default() -> Self {
        Self {
            beginner: "Let's talk about your daily routine. What do you usually do in the morning?"
                .to_string(),
            intermediate: "Tell me about a memorable trip you have taken and what made it special."
                .to_string(),
            advanced: "What is your opinion on how technology is changing the way people communicate?"
                .to_string(),
            default: "Let's start with something simple: introduce yourself and tell me about your hobbies."
                .to_string(),
        }
    }
}

impl TopicTable {
    pub fn propose(&self, level: ProficiencyLevel) -> &str {
        match level {
            ProficiencyLevel::Beginner => &self.beginner,
            ProficiencyLevel::Intermediate => &self.intermediate,
            ProficiencyLevel::Advanced => &self.advanced,
            ProficiencyLevel::Unset => &self.default,
        }
    }
}
