//! Grammar check using regex rule tables.
//!
//! Covers subject-verb agreement, article usage and preposition usage with
//! fixed patterns, plus a short-text heuristic for mixed verb tenses.
//! Every rule contributes at most one issue, however often it matches.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use validator::Validate;

use super::item::GrammarIssue;
use crate::error::AppError;

/// Grammar area a rule belongs to. Issues are presented in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrammarCategory {
    SubjectVerbAgreement,
    TenseConsistency,
    ArticleUsage,
    PrepositionUsage,
}

impl GrammarCategory {
    pub fn label(&self) -> &'static str {
        match self {
            GrammarCategory::SubjectVerbAgreement => "Subject-verb agreement",
            GrammarCategory::TenseConsistency => "Tense consistency",
            GrammarCategory::ArticleUsage => "Article usage",
            GrammarCategory::PrepositionUsage => "Preposition usage",
        }
    }
}

impl fmt::Display for GrammarCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Verb tense a marker word signals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tense {
    Past,
    Present,
    Future,
}

/// Uncompiled grammar rule, as stored in a rule book
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GrammarRuleSpec {
    pub category: GrammarCategory,
    /// Case-insensitive regex
    #[validate(length(min = 1))]
    pub pattern: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(length(min = 1))]
    pub correction: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TenseMarkerSpec {
    pub tense: Tense,
    #[validate(length(min = 1))]
    pub pattern: String,
}

/// Mixed-tense heuristic settings.
///
/// Only utterances strictly shorter than `max_length` characters are checked.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TenseSpec {
    #[validate(range(min = 1))]
    pub max_length: usize,
    #[validate(length(min = 2))]
    pub markers: Vec<TenseMarkerSpec>,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(length(min = 1))]
    pub correction: String,
}

fn rule(category: GrammarCategory, pattern: &str, description: &str, correction: &str) -> GrammarRuleSpec {
    GrammarRuleSpec {
        category,
        pattern: pattern.to_string(),
        description: description.to_string(),
        correction: correction.to_string(),
    }
}

/// Built-in grammar rules
pub fn builtin_rules() -> Vec<GrammarRuleSpec> {
    use GrammarCategory::*;

    vec![
        // Subject-verb agreement
        rule(
            SubjectVerbAgreement,
            r"\b(he|she|it)\s+don['’]?t\b",
            "\"don't\" does not agree with he, she or it",
            "Use \"doesn't\" with third-person singular subjects: he doesn't, she doesn't, it doesn't.",
        ),
        rule(
            SubjectVerbAgreement,
            r"\b(he|she|it)\s+have\b",
            "\"have\" does not agree with he, she or it",
            "Use \"has\" with third-person singular subjects: he has, she has, it has.",
        ),
        rule(
            SubjectVerbAgreement,
            r"\b(we|you|they)\s+was\b",
            "\"was\" does not agree with a plural subject",
            "Use \"were\" with we, you and they: we were, they were.",
        ),
        rule(
            SubjectVerbAgreement,
            r"\bI\s+(is|are)\b",
            "\"I\" takes its own form of \"to be\"",
            "Use \"am\" with I: I am.",
        ),
        // Articles
        rule(
            ArticleUsage,
            r"\ba\s+[aeiou]\w*",
            "\"a\" is used before a vowel sound",
            "Use \"an\" before words that start with a vowel sound: an apple, an idea.",
        ),
        rule(
            ArticleUsage,
            r"\ban\s+[bcdfgjklmnpqrstvwxz]\w*",
            "\"an\" is used before a consonant sound",
            "Use \"a\" before words that start with a consonant sound: a book, a car.",
        ),
        // Prepositions
        rule(
            PrepositionUsage,
            r"\bdepend(s|ed|ing)?\s+of\b",
            "\"depend\" takes the preposition \"on\", not \"of\"",
            "Say \"depends on\": It depends on the weather.",
        ),
        rule(
            PrepositionUsage,
            r"\blisten(s|ed|ing)?\s+music\b",
            "\"listen\" needs \"to\" before its object",
            "Say \"listening to music\": I am listening to music.",
        ),
        rule(
            PrepositionUsage,
            r"\bmarried\s+with\b",
            "\"married\" takes the preposition \"to\"",
            "Say \"married to\": She is married to a doctor.",
        ),
        rule(
            PrepositionUsage,
            r"\bdifferent\s+than\b",
            "\"different\" is normally followed by \"from\"",
            "Say \"different from\": This book is different from that one.",
        ),
    ]
}

/// Built-in mixed-tense heuristic
pub fn builtin_tense() -> TenseSpec {
    TenseSpec {
        max_length: 100,
        markers: vec![
            TenseMarkerSpec {
                tense: Tense::Past,
                pattern: r"\b(was|were|went|did|had|came|saw|said|made|took|got)\b".to_string(),
            },
            TenseMarkerSpec {
                tense: Tense::Present,
                pattern: r"\b(is|are|am|go|goes|do|does|have|has|come|comes|see|sees)\b".to_string(),
            },
            TenseMarkerSpec {
                tense: Tense::Future,
                pattern: r"\b(will|shall|won['’]t|gonna)\b".to_string(),
            },
        ],
        description: "past and present forms are mixed in one short sentence".to_string(),
        correction: "Keep one time frame per sentence: if it happened in the past, use past forms throughout (I was going and I went).".to_string(),
    }
}

fn compile_pattern(pattern: &str) -> Result<Regex, AppError> {
    Ok(RegexBuilder::new(pattern).case_insensitive(true).build()?)
}

/// Compiled grammar rule
#[derive(Debug, Clone)]
struct GrammarRule {
    category: GrammarCategory,
    pattern: Regex,
    description: String,
    correction: String,
}

#[derive(Debug, Clone)]
struct TenseHeuristic {
    max_length: usize,
    markers: Vec<(Tense, Regex)>,
    description: String,
    correction: String,
}

impl TenseHeuristic {
    fn is_mixed(&self, text: &str) -> bool {
        if text.chars().count() >= self.max_length {
            return false;
        }

        let found: HashSet<Tense> = self
            .markers
            .iter()
            .filter(|(_, pattern)| pattern.is_match(text))
            .map(|(tense, _)| *tense)
            .collect();

        found.len() >= 2
    }
}

/// Grammar checker over a compiled rule table
#[derive(Debug, Clone)]
pub struct GrammarTable {
    rules: Vec<GrammarRule>,
    tense: TenseHeuristic,
}

impl GrammarTable {
    /// Validate and compile rule specs
    pub fn compile(rules: &[GrammarRuleSpec], tense: &TenseSpec) -> Result<Self, AppError> {
        let mut compiled = Vec::with_capacity(rules.len());
        for spec in rules {
            spec.validate()?;
            compiled.push(GrammarRule {
                category: spec.category,
                pattern: compile_pattern(&spec.pattern)?,
                description: spec.description.clone(),
                correction: spec.correction.clone(),
            });
        }

        tense.validate()?;
        let mut markers = Vec::with_capacity(tense.markers.len());
        for marker in &tense.markers {
            marker.validate()?;
            markers.push((marker.tense, compile_pattern(&marker.pattern)?));
        }

        Ok(Self {
            rules: compiled,
            tense: TenseHeuristic {
                max_length: tense.max_length,
                markers,
                description: tense.description.clone(),
                correction: tense.correction.clone(),
            },
        })
    }

    /// Number of pattern rules (the tense heuristic not included)
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Find all rule violations, ordered by category then table order
    pub fn check(&self, text: &str) -> Vec<GrammarIssue> {
        let mut issues: Vec<GrammarIssue> = self
            .rules
            .iter()
            .filter(|rule| rule.pattern.is_match(text))
            .map(|rule| GrammarIssue {
                category: rule.category,
                description: rule.description.clone(),
                correction: rule.correction.clone(),
            })
            .collect();

        if self.tense.is_mixed(text) {
            issues.push(GrammarIssue {
                category: GrammarCategory::TenseConsistency,
                description: self.tense.description.clone(),
                correction: self.tense.correction.clone(),
            });
        }

        // Stable: table order is kept within a category
        issues.sort_by_key(|issue| issue.category);
        issues
    }
}

/// Merge issues into the text of a single correction item
pub fn compose_corrections(issues: &[GrammarIssue]) -> String {
    let mut text = String::from("Let's fix a few grammar points:");
    for (idx, issue) in issues.iter().enumerate() {
        text.push_str(&format!(
            "\n{}. {}: {}. Rule: {}",
            idx + 1,
            issue.category,
            issue.description,
            issue.correction
        ));
    }
    text
}
