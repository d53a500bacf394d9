//! Vocabulary precision check.
//!
//! Flags vague words and phrases from a fixed list and proposes more precise
//! replacements. One issue per listed term, however many times it occurs.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::item::VocabularyIssue;
use crate::error::AppError;

/// Uncompiled vocabulary rule, as stored in a rule book
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VocabularyRuleSpec {
    /// Term shown to the learner
    #[validate(length(min = 1))]
    pub term: String,
    /// Case-insensitive regex locating the term
    #[validate(length(min = 1))]
    pub pattern: String,
    #[validate(length(min = 1))]
    pub suggestions: Vec<String>,
    #[validate(length(min = 1))]
    pub rationale: String,
}

fn rule(term: &str, pattern: &str, suggestions: &[&str], rationale: &str) -> VocabularyRuleSpec {
    VocabularyRuleSpec {
        term: term.to_string(),
        pattern: pattern.to_string(),
        suggestions: suggestions.iter().map(|s| s.to_string()).collect(),
        rationale: rationale.to_string(),
    }
}

/// Built-in imprecise terms
pub fn builtin_rules() -> Vec<VocabularyRuleSpec> {
    vec![
        rule(
            "thing",
            r"\bthings?\b",
            &["item", "object", "aspect", "issue"],
            "\"Thing\" is vague; naming the exact object or idea makes you easier to understand.",
        ),
        rule(
            "stuff",
            r"\bstuff\b",
            &["belongings", "materials", "equipment"],
            "\"Stuff\" is informal; a specific noun sounds more natural in most contexts.",
        ),
        rule(
            "a lot",
            r"\ba\s+lot\b",
            &["many", "much", "a great deal", "numerous"],
            "\"A lot\" is conversational; a precise quantifier makes your statement stronger.",
        ),
        rule(
            "really",
            r"\breally\b",
            &["extremely", "genuinely", "truly", "particularly"],
            "\"Really\" is an overused intensifier; a stronger adverb adds precision.",
        ),
    ]
}

#[derive(Debug, Clone)]
struct VocabularyRule {
    term: String,
    pattern: Regex,
    suggestions: Vec<String>,
    rationale: String,
}

/// Vocabulary checker over a compiled rule table
#[derive(Debug, Clone)]
pub struct VocabularyTable {
    rules: Vec<VocabularyRule>,
}

impl VocabularyTable {
    /// Validate and compile rule specs
    pub fn compile(rules: &[VocabularyRuleSpec]) -> Result<Self, AppError> {
        let mut compiled = Vec::with_capacity(rules.len());
        for spec in rules {
            spec.validate()?;
            if spec.suggestions.iter().any(|s| s.trim().is_empty()) {
                return Err(AppError::Validation(format!(
                    "blank suggestion for vocabulary term \"{}\"",
                    spec.term
                )));
            }
            let pattern = RegexBuilder::new(&spec.pattern)
                .case_insensitive(true)
                .build()?;
            compiled.push(VocabularyRule {
                term: spec.term.clone(),
                pattern,
                suggestions: spec.suggestions.clone(),
                rationale: spec.rationale.clone(),
            });
        }
        Ok(Self { rules: compiled })
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Find vague terms in table order
    pub fn check(&self, text: &str) -> Vec<VocabularyIssue> {
        self.rules
            .iter()
            .filter(|rule| rule.pattern.is_match(text))
            .map(|rule| VocabularyIssue {
                term: rule.term.clone(),
                suggestions: rule.suggestions.clone(),
                rationale: rule.rationale.clone(),
            })
            .collect()
    }
}

/// Merge issues into the text of a single vocabulary tip
pub fn compose_tips(issues: &[VocabularyIssue]) -> String {
    let mut text = String::from("Here are some ways to be more precise:");
    for issue in issues {
        text.push_str(&format!(
            "\n- Instead of \"{}\", try: {}. {}",
            issue.term,
            issue.suggestions.join(", "),
            issue.rationale
        ));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> VocabularyTable {
        VocabularyTable::compile(&builtin_rules()).unwrap()
    }

    #[test]
    fn test_single_term() {
        let issues = table().check("thing");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].term, "thing");
    }

    #[test]
    fn test_repeated_term_reported_once() {
        let issues = table().check("This thing and that thing, and other things");
        assert_eq!(issues.len(), 1);
    }

    #[test]
    fn test_word_boundaries() {
        // "something" and "reallocate" are not flagged
        assert!(table().check("something to reallocate").is_empty());
    }

    #[test]
    fn test_table_order() {
        let issues = table().check("I really like this stuff a lot");
        let terms: Vec<&str> = issues.iter().map(|i| i.term.as_str()).collect();
        assert_eq!(terms, vec!["stuff", "a lot", "really"]);
    }

    #[test]
    fn test_empty_suggestions_rejected() {
        let bad = vec![rule("thing", r"\bthing\b", &[], "why")];
        assert!(matches!(
            VocabularyTable::compile(&bad),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_compose_tips() {
        let issues = table().check("so much stuff");
        let text = compose_tips(&issues);
        assert!(text.contains("Instead of \"stuff\", try: belongings, materials, equipment."));
    }
}
