//! Good-practice detection.
//!
//! Recognises sophisticated connectors and precision adverbs and picks the
//! matching praise text.

use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::structure::word_set_pattern;
use crate::error::AppError;

/// Placeholder replaced by the matched marker in praise templates
pub const MARKER_PLACEHOLDER: &str = "{marker}";

/// Class of good-practice marker, checked in this order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerClass {
    Connector,
    Precision,
    General,
}

/// Marker lists and praise templates, as stored in a rule book
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PraiseSpec {
    #[validate(length(min = 1))]
    pub connectors: Vec<String>,
    #[validate(length(min = 1))]
    pub precision: Vec<String>,
    #[validate(length(min = 1))]
    pub general: Vec<String>,
    #[validate(length(min = 1))]
    pub connector_text: String,
    #[validate(length(min = 1))]
    pub precision_text: String,
    #[validate(length(min = 1))]
    pub generic_text: String,
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl Default for PraiseSpec {
    fn default() -> Self {
        Self {
            connectors: words(&[
                "however",
                "therefore",
                "furthermore",
                "moreover",
                "consequently",
                "nevertheless",
                "although",
                "whereas",
            ]),
            precision: words(&[
                "specifically",
                "particularly",
                "precisely",
                "notably",
                "essentially",
                "approximately",
            ]),
            general: words(&[
                "for example",
                "for instance",
                "in my opinion",
                "on the other hand",
                "in addition",
            ]),
            connector_text: "Excellent use of \"{marker}\"! Linking words like this make your \
                             reasoning easy to follow."
                .to_string(),
            precision_text: "Nice precision with \"{marker}\". Careful word choice like this \
                             makes you sound fluent."
                .to_string(),
            generic_text: "Good job organising your ideas clearly.".to_string(),
        }
    }
}

/// A detected good-practice marker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PraiseMatch {
    pub class: MarkerClass,
    /// Marker as written by the learner, lowercased
    pub marker: String,
}

/// Good-practice checker
#[derive(Debug, Clone)]
pub struct PraiseRules {
    classes: Vec<(MarkerClass, Regex)>,
    connector_text: String,
    precision_text: String,
    generic_text: String,
}

impl PraiseRules {
    pub fn compile(spec: &PraiseSpec) -> Result<Self, AppError> {
        spec.validate()?;
        Ok(Self {
            classes: vec![
                (MarkerClass::Connector, word_set_pattern(&spec.connectors)?),
                (MarkerClass::Precision, word_set_pattern(&spec.precision)?),
                (MarkerClass::General, word_set_pattern(&spec.general)?),
            ],
            connector_text: spec.connector_text.clone(),
            precision_text: spec.precision_text.clone(),
            generic_text: spec.generic_text.clone(),
        })
    }

    /// First marker found, by class priority
    pub fn check(&self, text: &str) -> Option<PraiseMatch> {
        self.classes.iter().find_map(|(class, pattern)| {
            pattern.find(text).map(|m| PraiseMatch {
                class: *class,
                marker: m.as_str().to_lowercase(),
            })
        })
    }

    /// Praise text for a detected marker
    pub fn compose(&self, found: &PraiseMatch) -> String {
        match found.class {
            MarkerClass::Connector => self.connector_text.replace(MARKER_PLACEHOLDER, &found.marker),
            MarkerClass::Precision => self.precision_text.replace(MARKER_PLACEHOLDER, &found.marker),
            MarkerClass::General => self.generic_text.replace(MARKER_PLACEHOLDER, &found.marker),
        }
    }
}
