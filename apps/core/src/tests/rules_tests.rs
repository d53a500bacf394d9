//! Rule Book Tests
//!
//! Custom rule books loaded from JSON, section fallback and validation.

use std::io::Write;
use std::sync::Arc;

use crate::error::AppError;
use crate::feedback::{FeedbackEngine, FeedbackKind, FixedChoice, RuleBook};
use crate::models::ProficiencyLevel;

const CUSTOM_BOOK: &str = r#"{
    "vocabulary": [
        {
            "term": "nice",
            "pattern": "\\bnice\\b",
            "suggestions": ["delightful", "pleasant"],
            "rationale": "\"Nice\" says very little about what you liked."
        }
    ],
    "structure": {
        "max_sentence_tokens": 5,
        "long_text_chars": 100,
        "connectives": ["however"],
        "suggestion": "Shorter sentences, please."
    },
    "topics": {
        "beginner": "Colours",
        "intermediate": "Travel",
        "advanced": "Politics",
        "default": "Introductions"
    },
    "encouragements": ["Keep going!"]
}"#;

#[cfg(test)]
mod loading_tests {
    use super::*;

    #[test]
    fn test_custom_sections_replace_builtins() {
        let book = Arc::new(RuleBook::from_json(CUSTOM_BOOK).unwrap());
        let engine = FeedbackEngine::with_rules(book, Box::new(FixedChoice(0)));

        let items = engine.analyze_utterance("What a nice thing to say to me today");
        let kinds: Vec<FeedbackKind> = items.iter().map(|i| i.kind).collect();
        assert_eq!(kinds, vec![FeedbackKind::VocabularyTip, FeedbackKind::Suggestion]);
        assert!(items[0].text.contains("Instead of \"nice\""));
        // "thing" is no longer in the vocabulary table
        assert!(!items[0].text.contains("\"thing\""));
        assert_eq!(items[1].text, "Shorter sentences, please.");

        assert_eq!(engine.propose_next_topic(ProficiencyLevel::Advanced), "Politics");
        assert_eq!(engine.compose_encouragement(), "Keep going!");
    }

    #[test]
    fn test_missing_sections_fall_back() {
        let book = Arc::new(RuleBook::from_json(CUSTOM_BOOK).unwrap());
        let engine = FeedbackEngine::with_rules(book, Box::new(FixedChoice(0)));

        // Grammar was not overridden
        let items = engine.analyze_utterance("He don't know");
        assert_eq!(items[0].kind, FeedbackKind::Correction);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CUSTOM_BOOK.as_bytes()).unwrap();

        let book = RuleBook::from_file(file.path()).unwrap();
        assert_eq!(book.topics.beginner, "Colours");
        assert_eq!(book.vocabulary.len(), 1);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = RuleBook::from_file(dir.path().join("absent.json"));
        assert!(matches!(result, Err(AppError::Io(_))));
    }
}

#[cfg(test)]
mod validation_tests {
    use super::*;

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            RuleBook::from_json("{ not json"),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_invalid_regex() {
        let json = r#"{"grammar": [{
            "category": "article_usage",
            "pattern": "[unclosed",
            "description": "d",
            "correction": "c"
        }]}"#;
        assert!(matches!(RuleBook::from_json(json), Err(AppError::Config(_))));
    }

    #[test]
    fn test_zero_threshold_rejected() {
        let json = r#"{"structure": {
            "max_sentence_tokens": 0,
            "long_text_chars": 100,
            "connectives": ["however"],
            "suggestion": "s"
        }}"#;
        assert!(matches!(RuleBook::from_json(json), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_empty_topic_rejected() {
        let json = r#"{"topics": {
            "beginner": "",
            "intermediate": "b",
            "advanced": "c",
            "default": "d"
        }}"#;
        assert!(matches!(RuleBook::from_json(json), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_tense_needs_two_markers() {
        let json = r#"{"tense": {
            "max_length": 100,
            "markers": [{"tense": "past", "pattern": "\\bwas\\b"}],
            "description": "d",
            "correction": "c"
        }}"#;
        assert!(matches!(RuleBook::from_json(json), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_blank_praise_marker_rejected() {
        let json = r#"{"praise": {
            "connectors": [""],
            "precision": ["specifically"],
            "general": ["because"],
            "connector_text": "Great use of \"{marker}\"!",
            "precision_text": "Nice precision with \"{marker}\".",
            "generic_text": "Excellent use of \"{marker}\"!"
        }}"#;
        assert!(matches!(RuleBook::from_json(json), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_blank_connective_rejected() {
        let json = r#"{"structure": {
            "max_sentence_tokens": 25,
            "long_text_chars": 100,
            "connectives": [" "],
            "suggestion": "s"
        }}"#;
        assert!(matches!(RuleBook::from_json(json), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_blank_suggestion_rejected() {
        let json = r#"{"vocabulary": [{
            "term": "nice",
            "pattern": "\\bnice\\b",
            "suggestions": ["pleasant", ""],
            "rationale": "r"
        }]}"#;
        assert!(matches!(RuleBook::from_json(json), Err(AppError::Validation(_))));
    }
}
