//! # Feedback Module
//!
//! Rule-based analysis of learner utterances, run before or alongside the
//! language-model reply.
//!
//! ## Components
//! - `grammar`: Grammar rule table and the short-text tense heuristic
//! - `vocabulary`: Vague-word detection with precise replacements
//! - `structure`: Run-on sentence and missing-connective detection
//! - `praise`: Good-practice marker detection
//! - `topics`: Next-topic table keyed by proficiency level
//! - `encouragement`: Canned encouragement behind an injectable random source
//! - `rules`: Compiled, immutable rule book
//! - `item`: Output data structures
//! - `engine`: Main orchestrator

pub mod encouragement;
pub mod engine;
pub mod grammar;
pub mod item;
pub mod praise;
pub mod rules;
pub mod structure;
pub mod topics;
pub mod vocabulary;

pub use encouragement::{FixedChoice, RandomSource, SeededRandom, ThreadRandom};
pub use engine::FeedbackEngine;
pub use grammar::{GrammarCategory, Tense};
pub use item::{FeedbackItem, FeedbackKind, GrammarIssue, TurnReview, VocabularyIssue};
pub use praise::{MarkerClass, PraiseMatch};
pub use rules::{RuleBook, RuleBookSpec};
pub use structure::StructureIssue;
pub use topics::TopicTable;
