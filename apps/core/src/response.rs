//! Response composition.
//!
//! Turns a turn review into the text handed to speech synthesis: the
//! personality's share of the feedback as numbered learning points, an
//! encouragement when nothing needs fixing, then the next topic.

use serde::{Deserialize, Serialize};

use crate::feedback::{FeedbackEngine, FeedbackItem, TurnReview};
use crate::personality::Personality;

/// Heading placed above the numbered feedback
pub const LEARNING_POINTS_HEADING: &str = "Learning Points:";

/// Reply text plus the voice settings to speak it with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComposedResponse {
    pub text: String,
    /// Numbered learning points, in engine order
    pub learning_points: Vec<String>,
    /// Feedback the personality kept, for the session's feedback list
    pub feedback: Vec<FeedbackItem>,
    pub next_topic: String,
    pub voice_id: String,
    pub speaking_rate: f32,
}

/// Composes replies for one personality
pub struct ResponseComposer<'a> {
    engine: &'a FeedbackEngine,
    personality: &'a Personality,
}

impl<'a> ResponseComposer<'a> {
    pub fn new(engine: &'a FeedbackEngine, personality: &'a Personality) -> Self {
        Self {
            engine,
            personality,
        }
    }

    pub fn compose(&self, review: TurnReview) -> ComposedResponse {
        let feedback = self.personality.filter(review.items);

        let learning_points: Vec<String> = feedback
            .iter()
            .enumerate()
            .map(|(idx, item)| format!("{}. {}", idx + 1, item.text))
            .collect();

        let mut sections = Vec::new();
        if !learning_points.is_empty() {
            sections.push(format!(
                "{}\n{}",
                LEARNING_POINTS_HEADING,
                learning_points.join("\n")
            ));
        }

        if !feedback.iter().any(|item| item.kind.is_corrective()) {
            let encouragement = self.engine.compose_encouragement();
            if !encouragement.is_empty() {
                sections.push(encouragement);
            }
        }

        sections.push(format!("Next topic: {}", review.next_topic));

        ComposedResponse {
            text: sections.join("\n\n"),
            learning_points,
            feedback,
            next_topic: review.next_topic,
            voice_id: self.personality.voice_id.clone(),
            speaking_rate: self.personality.speaking_rate,
        }
    }
}
