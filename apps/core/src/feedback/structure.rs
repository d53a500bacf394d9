//! Sentence structure check.
//!
//! Flags run-on sentences and long utterances that never link their ideas
//! with a connective word.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppError;

/// Structural limits, as stored in a rule book
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StructureSpec {
    /// A sentence with more tokens than this is a run-on
    #[validate(range(min = 1))]
    pub max_sentence_tokens: usize,
    /// Utterances longer than this many characters need a connective
    #[validate(range(min = 1))]
    pub long_text_chars: usize,
    #[validate(length(min = 1))]
    pub connectives: Vec<String>,
    /// Fixed advice text
    #[validate(length(min = 1))]
    pub suggestion: String,
}

impl Default for StructureSpec {
    fn default() -> Self {
        Self {
            max_sentence_tokens: 25,
            long_text_chars: 100,
            connectives: ["however", "therefore", "furthermore", "moreover", "consequently"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            suggestion: "Try breaking long ideas into shorter sentences, and link them with \
                         connectors such as \"however\", \"therefore\" or \"furthermore\" so \
                         your listener can follow your reasoning."
                .to_string(),
        }
    }
}

/// Why the structure check fired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureIssue {
    /// A sentence exceeded the token limit
    RunOnSentence { tokens: usize },
    /// A long utterance with no connective word
    MissingConnectives { chars: usize },
}

/// Builds `\b(?:w1|w2|...)\b` from plain words
pub(crate) fn word_set_pattern(words: &[String]) -> Result<Regex, AppError> {
    // A blank alternative would match at every word boundary
    if words.iter().any(|w| w.trim().is_empty()) {
        return Err(AppError::Validation(
            "word lists must not contain blank entries".to_string(),
        ));
    }
    let alternatives: Vec<String> = words.iter().map(|w| regex::escape(w.trim())).collect();
    let pattern = format!(r"\b(?:{})\b", alternatives.join("|"));
    Ok(RegexBuilder::new(&pattern).case_insensitive(true).build()?)
}

/// Structure checker
#[derive(Debug, Clone)]
pub struct StructureRules {
    max_sentence_tokens: usize,
    long_text_chars: usize,
    connectives: Regex,
    suggestion: String,
}

impl StructureRules {
    pub fn compile(spec: &StructureSpec) -> Result<Self, AppError> {
        spec.validate()?;
        Ok(Self {
            max_sentence_tokens: spec.max_sentence_tokens,
            long_text_chars: spec.long_text_chars,
            connectives: word_set_pattern(&spec.connectives)?,
            suggestion: spec.suggestion.clone(),
        })
    }

    pub fn suggestion(&self) -> &str {
        &self.suggestion
    }

    /// Token count of the longest sentence
    fn longest_sentence(&self, text: &str) -> usize {
        text.split(['.', '!', '?'])
            .map(|sentence| sentence.split_whitespace().count())
            .max()
            .unwrap_or(0)
    }

    /// Run the check. Run-on sentences take precedence in the reported reason.
    pub fn check(&self, text: &str) -> Option<StructureIssue> {
        let tokens = self.longest_sentence(text);
        if tokens > self.max_sentence_tokens {
            return Some(StructureIssue::RunOnSentence { tokens });
        }

        let chars = text.chars().count();
        if chars > self.long_text_chars && !self.connectives.is_match(text) {
            return Some(StructureIssue::MissingConnectives { chars });
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> StructureRules {
        StructureRules::compile(&StructureSpec::default()).unwrap()
    }

    #[test]
    fn test_short_text_passes() {
        assert_eq!(rules().check("I like tea."), None);
        assert_eq!(rules().check(""), None);
    }

    #[test]
    fn test_run_on_sentence() {
        let sentence = vec!["word"; 26].join(" ");
        assert_eq!(
            rules().check(&sentence),
            Some(StructureIssue::RunOnSentence { tokens: 26 })
        );

        // Short enough to stay clear of the connective check
        let exactly_25 = vec!["a"; 25].join(" ");
        assert!(exactly_25.chars().count() <= 100);
        assert_eq!(rules().check(&exactly_25), None);
    }

    #[test]
    fn test_connective_threshold_edge() {
        let at_limit = format!("{}abcde", "abcd ".repeat(19));
        assert_eq!(at_limit.chars().count(), 100);
        assert_eq!(rules().check(&at_limit), None);

        let over_limit = format!("{}d", at_limit);
        assert_eq!(
            rules().check(&over_limit),
            Some(StructureIssue::MissingConnectives { chars: 101 })
        );
    }

    #[test]
    fn test_blank_word_rejected() {
        let words = vec!["however".to_string(), "  ".to_string()];
        assert!(matches!(word_set_pattern(&words), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_sentences_split_on_punctuation() {
        let text = format!("{}. {}! {}?", vec!["a"; 20].join(" "), vec!["b"; 20].join(" "), "ok");
        // 40 tokens overall, but no single sentence exceeds the limit
        assert!(text.chars().count() <= 100);
        assert_eq!(rules().check(&text), None);
    }

    #[test]
    fn test_long_text_without_connective() {
        let text = "I went to the market in the morning. I bought apples. I met my friend. \
                    We talked for hours. It was fun.";
        assert!(text.chars().count() > 100);
        assert!(matches!(
            rules().check(text),
            Some(StructureIssue::MissingConnectives { .. })
        ));
    }

    #[test]
    fn test_long_text_with_connective() {
        let text = "I went to the market in the morning. However, I bought nothing. I met my \
                    friend. We talked for hours. It was fun.";
        assert!(text.chars().count() > 100);
        assert_eq!(rules().check(text), None);
    }
}
