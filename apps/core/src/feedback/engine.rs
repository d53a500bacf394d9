//! Feedback Engine - Main orchestrator for the feedback module.
//!
//! Runs the four checks over one learner utterance, in a fixed order:
//! 1. Grammar (one merged correction)
//! 2. Vocabulary precision (one merged tip)
//! 3. Sentence structure (one suggestion)
//! 4. Good practice (one encouragement)
//!
//! The order is the presentation order; learning points are numbered by it.

use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

use super::encouragement::{self, RandomSource, ThreadRandom};
use super::grammar::compose_corrections;
use super::item::{FeedbackItem, FeedbackKind, TurnReview};
use super::rules::RuleBook;
use super::vocabulary::compose_tips;
use crate::models::{LearnerTurn, ProficiencyLevel};

/// Stateless feedback engine over an immutable rule book
pub struct FeedbackEngine {
    rules: Arc<RuleBook>,
    rng: Box<dyn RandomSource>,
}

impl Default for FeedbackEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FeedbackEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedbackEngine")
            .field("rules", &self.rules)
            .finish_non_exhaustive()
    }
}

impl FeedbackEngine {
    /// Create an engine with the built-in rules and thread randomness
    pub fn new() -> Self {
        Self::with_rules(RuleBook::builtin(), Box::new(ThreadRandom))
    }

    pub fn with_rules(rules: Arc<RuleBook>, rng: Box<dyn RandomSource>) -> Self {
        Self { rules, rng }
    }

    /// Same rules, different random source
    pub fn with_random(mut self, rng: Box<dyn RandomSource>) -> Self {
        self.rng = rng;
        self
    }

    pub fn rules(&self) -> &RuleBook {
        &self.rules
    }

    /// Analyze an utterance with no session or message attached
    pub fn analyze_utterance(&self, utterance: &str) -> Vec<FeedbackItem> {
        self.analyze_turn(&LearnerTurn::detached(utterance))
    }

    /// Analyze one learner turn. Never fails; no match gives an empty list.
    pub fn analyze_turn(&self, turn: &LearnerTurn) -> Vec<FeedbackItem> {
        let text = turn.text.as_str();
        let mut items = Vec::new();

        // 1. Grammar
        let grammar_issues = self.rules.grammar.check(text);
        if !grammar_issues.is_empty() {
            items.push(FeedbackItem::new(
                turn,
                FeedbackKind::Correction,
                compose_corrections(&grammar_issues),
            ));
        }

        // 2. Vocabulary
        let vocabulary_issues = self.rules.vocabulary.check(text);
        if !vocabulary_issues.is_empty() {
            items.push(FeedbackItem::new(
                turn,
                FeedbackKind::VocabularyTip,
                compose_tips(&vocabulary_issues),
            ));
        }

        // 3. Structure
        if let Some(issue) = self.rules.structure.check(text) {
            debug!("Structure issue: {:?}", issue);
            items.push(FeedbackItem::new(
                turn,
                FeedbackKind::Suggestion,
                self.rules.structure.suggestion().to_string(),
            ));
        }

        // 4. Good practice
        if let Some(found) = self.rules.praise.check(text) {
            items.push(FeedbackItem::new(
                turn,
                FeedbackKind::Encouragement,
                self.rules.praise.compose(&found),
            ));
        }

        debug!(
            session_id = %turn.session_id,
            message_id = %turn.message_id,
            "Analyzed utterance: {} grammar issues, {} vocabulary issues, {} items",
            grammar_issues.len(),
            vocabulary_issues.len(),
            items.len()
        );

        items
    }

    /// Canned next-topic for a proficiency level
    pub fn propose_next_topic(&self, level: ProficiencyLevel) -> &str {
        self.rules.topics.propose(level)
    }

    /// Random canned encouragement
    pub fn compose_encouragement(&self) -> String {
        encouragement::draw(&self.rules.encouragements, self.rng.as_ref())
    }

    /// Analyze a turn and propose the next topic
    pub fn review(&self, turn: &LearnerTurn, level: ProficiencyLevel) -> TurnReview {
        let start = Instant::now();

        let items = self.analyze_turn(turn);
        let next_topic = self.propose_next_topic(level).to_string();

        let review = TurnReview {
            items,
            next_topic,
            processing_time_ms: start.elapsed().as_millis() as u64,
            timestamp: Utc::now(),
        };

        debug!(session_id = %turn.session_id, "Turn review: {}", review.summary());
        review
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::encouragement::FixedChoice;

    #[test]
    fn test_clean_utterance() {
        let engine = FeedbackEngine::new();
        assert!(engine.analyze_utterance("I like tea.").is_empty());
    }

    #[test]
    fn test_presentation_order() {
        let engine = FeedbackEngine::new();
        let text = "He don't like this thing, however he keeps it in the small garage \
                    next to the old car that his father bought many years before he moved";
        let kinds: Vec<FeedbackKind> = engine
            .analyze_utterance(text)
            .iter()
            .map(|item| item.kind)
            .collect();

        assert_eq!(
            kinds,
            vec![
                FeedbackKind::Correction,
                FeedbackKind::VocabularyTip,
                FeedbackKind::Suggestion,
                FeedbackKind::Encouragement,
            ]
        );
    }

    #[test]
    fn test_turn_references() {
        let engine = FeedbackEngine::new();
        let turn = LearnerTurn::new("session-7", "msg-3", "It depends of you");
        let items = engine.analyze_turn(&turn);

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].session_id, "session-7");
        assert_eq!(items[0].message_id, "msg-3");
    }

    #[test]
    fn test_compose_encouragement_uses_source() {
        let engine = FeedbackEngine::new().with_random(Box::new(FixedChoice(1)));
        assert_eq!(
            engine.compose_encouragement(),
            engine.rules().encouragements[1]
        );
    }

    #[test]
    fn test_review() {
        let engine = FeedbackEngine::new();
        let turn = LearnerTurn::new("s", "m", "He don't like it.");
        let review = engine.review(&turn, ProficiencyLevel::Beginner);

        assert_eq!(review.items.len(), 1);
        assert!(review.has_corrections());
        assert_eq!(review.next_topic, engine.rules().topics.beginner);
    }
}
