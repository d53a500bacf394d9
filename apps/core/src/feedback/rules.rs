//! Rule Book - immutable configuration of the feedback engine.
//!
//! A rule book bundles every table the checks read: grammar rules, the tense
//! heuristic, vague terms, structural limits, praise markers, topics and
//! encouragement lines. It is compiled once and shared by `Arc`; nothing
//! mutates it afterwards.
//!
//! Custom books are JSON documents. Any section left out falls back to the
//! built-in section.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, LazyLock};
use tracing::{debug, info};

use super::encouragement::builtin_encouragements;
use super::grammar::{self, GrammarRuleSpec, GrammarTable, TenseSpec};
use super::praise::{PraiseRules, PraiseSpec};
use super::structure::{StructureRules, StructureSpec};
use super::topics::TopicTable;
use super::vocabulary::{self, VocabularyRuleSpec, VocabularyTable};
use crate::error::AppError;

/// Uncompiled rule book, as read from JSON
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleBookSpec {
    #[serde(default)]
    pub grammar: Option<Vec<GrammarRuleSpec>>,
    #[serde(default)]
    pub tense: Option<TenseSpec>,
    #[serde(default)]
    pub vocabulary: Option<Vec<VocabularyRuleSpec>>,
    #[serde(default)]
    pub structure: Option<StructureSpec>,
    #[serde(default)]
    pub praise: Option<PraiseSpec>,
    #[serde(default)]
    pub topics: Option<TopicTable>,
    #[serde(default)]
    pub encouragements: Option<Vec<String>>,
}

/// Compiled, read-only rule tables
#[derive(Debug, Clone)]
pub struct RuleBook {
    pub grammar: GrammarTable,
    pub vocabulary: VocabularyTable,
    pub structure: StructureRules,
    pub praise: PraiseRules,
    pub topics: TopicTable,
    pub encouragements: Vec<String>,
}

// Compile the built-in book once per process.
// NOTE: the built-in tables are constants; failing to compile them is a bug.
static BUILTIN: LazyLock<Arc<RuleBook>> = LazyLock::new(|| {
    Arc::new(RuleBook::compile(RuleBookSpec::default()).expect("Invalid built-in rule book"))
});

impl RuleBook {
    /// Shared built-in rule book
    pub fn builtin() -> Arc<RuleBook> {
        Arc::clone(&BUILTIN)
    }

    /// Validate and compile a spec, filling missing sections from the built-ins
    pub fn compile(spec: RuleBookSpec) -> Result<Self, AppError> {
        let grammar_rules = spec.grammar.unwrap_or_else(grammar::builtin_rules);
        let tense = spec.tense.unwrap_or_else(grammar::builtin_tense);
        let vocabulary_rules = spec.vocabulary.unwrap_or_else(vocabulary::builtin_rules);
        let structure = spec.structure.unwrap_or_default();
        let praise = spec.praise.unwrap_or_default();
        let topics = spec.topics.unwrap_or_default();
        let encouragements = spec.encouragements.unwrap_or_else(builtin_encouragements);

        validator::Validate::validate(&topics)?;
        if encouragements.is_empty() || encouragements.iter().any(|s| s.trim().is_empty()) {
            return Err(AppError::Validation(
                "encouragements must be a non-empty list of non-empty lines".to_string(),
            ));
        }

        let book = Self {
            grammar: GrammarTable::compile(&grammar_rules, &tense)?,
            vocabulary: VocabularyTable::compile(&vocabulary_rules)?,
            structure: StructureRules::compile(&structure)?,
            praise: PraiseRules::compile(&praise)?,
            topics,
            encouragements,
        };

        debug!(
            "Compiled rule book: {} grammar rules, {} vocabulary rules, {} encouragements",
            book.grammar.len(),
            book.vocabulary.len(),
            book.encouragements.len()
        );

        Ok(book)
    }

    /// Parse and compile a JSON rule book
    pub fn from_json(json: &str) -> Result<Self, AppError> {
        let spec: RuleBookSpec = serde_json::from_str(json)?;
        Self::compile(spec)
    }

    /// Load a JSON rule book from disk
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let book = Self::from_json(&json)?;
        info!("Loaded rule book from {:?}", path);
        Ok(book)
    }
}
