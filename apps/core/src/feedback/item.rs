//! Feedback Items - Output structures of the feedback engine.
//!
//! Items are immutable once built; the conversation orchestrator owns them
//! and appends them to the session's feedback list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::models::LearnerTurn;

/// Kind of feedback, also its presentation category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackKind {
    /// Grammar corrections
    Correction,
    /// Word-choice improvements
    VocabularyTip,
    /// Structural advice
    Suggestion,
    /// Praise for good practice
    Encouragement,
}

impl FeedbackKind {
    pub fn label(&self) -> &'static str {
        match self {
            FeedbackKind::Correction => "correction",
            FeedbackKind::VocabularyTip => "vocabulary_tip",
            FeedbackKind::Suggestion => "suggestion",
            FeedbackKind::Encouragement => "encouragement",
        }
    }

    /// Whether the item asks the learner to change something
    pub fn is_corrective(&self) -> bool {
        !matches!(self, FeedbackKind::Encouragement)
    }
}

impl fmt::Display for FeedbackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One discrete piece of feedback attached to a learner message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackItem {
    /// Unique identifier (UUID v4)
    pub id: String,
    /// Session the source message belongs to
    pub session_id: String,
    /// Message the feedback was produced from
    pub message_id: String,
    pub kind: FeedbackKind,
    /// Composed, learner-facing text
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl FeedbackItem {
    pub fn new(turn: &LearnerTurn, kind: FeedbackKind, text: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            session_id: turn.session_id.clone(),
            message_id: turn.message_id.clone(),
            kind,
            text,
            created_at: Utc::now(),
        }
    }
}

/// A grammar rule violation found in an utterance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarIssue {
    pub category: super::grammar::GrammarCategory,
    /// Short description of what went wrong
    pub description: String,
    /// The rule the learner should apply instead
    pub correction: String,
}

/// An imprecise word or phrase found in an utterance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyIssue {
    /// The flagged term as listed in the rule table
    pub term: String,
    pub suggestions: Vec<String>,
    pub rationale: String,
}

/// Complete review of one learner turn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnReview {
    /// Feedback items in presentation order
    pub items: Vec<FeedbackItem>,
    /// Proposed next conversation topic
    pub next_topic: String,
    /// Processing time in milliseconds
    pub processing_time_ms: u64,
    /// Timestamp of the review
    pub timestamp: DateTime<Utc>,
}

impl TurnReview {
    /// Check if any item asks the learner to change something
    pub fn has_corrections(&self) -> bool {
        self.items.iter().any(|item| item.kind.is_corrective())
    }

    /// Items of a single kind, in presentation order
    pub fn items_of(&self, kind: FeedbackKind) -> impl Iterator<Item = &FeedbackItem> {
        self.items.iter().filter(move |item| item.kind == kind)
    }

    /// Get a summary for logging
    pub fn summary(&self) -> String {
        let kinds: Vec<&str> = self.items.iter().map(|item| item.kind.label()).collect();
        format!(
            "Items: {} [{}], Corrections: {}, Time: {}ms",
            self.items.len(),
            kinds.join(", "),
            if self.has_corrections() { "yes" } else { "no" },
            self.processing_time_ms
        )
    }
}
