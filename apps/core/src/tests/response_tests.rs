//! Response Tests
//!
//! How each personality shapes the engine's feedback into a reply.

use crate::feedback::{FeedbackEngine, FeedbackKind, FixedChoice};
use crate::models::{LearnerTurn, ProficiencyLevel};
use crate::personality::{Personality, PersonalityKind};
use crate::response::{ResponseComposer, LEARNING_POINTS_HEADING};

const MIXED_TURN: &str = "He don't like this thing, however he keeps it in the small garage \
                          next to the old car that his father bought many years before he moved";

fn engine() -> FeedbackEngine {
    FeedbackEngine::new().with_random(Box::new(FixedChoice(3)))
}

#[cfg(test)]
mod personality_response_tests {
    use super::*;

    #[test]
    fn test_strict_teacher_lists_everything_in_order() {
        let engine = engine();
        let teacher = Personality::preset(PersonalityKind::StrictTeacher);
        let review = engine.review(&LearnerTurn::detached(MIXED_TURN), ProficiencyLevel::Beginner);

        let response = ResponseComposer::new(&engine, &teacher).compose(review);

        assert_eq!(response.learning_points.len(), 4);
        for (idx, point) in response.learning_points.iter().enumerate() {
            assert!(point.starts_with(&format!("{}. ", idx + 1)));
        }
        assert!(response.learning_points[0].contains("Subject-verb agreement"));
        assert!(response.learning_points[3].contains("\"however\""));
        assert!(response.text.contains(LEARNING_POINTS_HEADING));
        assert!(response
            .text
            .ends_with(&format!("Next topic: {}", engine.rules().topics.beginner)));
    }

    #[test]
    fn test_friendly_tutor_keeps_one_correction() {
        let engine = engine();
        let tutor = Personality::preset(PersonalityKind::FriendlyTutor);
        let review = engine.review(&LearnerTurn::detached(MIXED_TURN), ProficiencyLevel::Unset);

        let response = ResponseComposer::new(&engine, &tutor).compose(review);
        let kinds: Vec<FeedbackKind> = response.feedback.iter().map(|i| i.kind).collect();

        assert_eq!(kinds, vec![FeedbackKind::Correction, FeedbackKind::Encouragement]);
        assert_eq!(response.learning_points.len(), 2);
        assert_eq!(response.voice_id, "Joanna");
    }

    #[test]
    fn test_conversation_partner_only_encourages() {
        let engine = engine();
        let partner = Personality::preset(PersonalityKind::ConversationPartner);
        let review = engine.review(&LearnerTurn::detached(MIXED_TURN), ProficiencyLevel::Advanced);

        let response = ResponseComposer::new(&engine, &partner).compose(review);

        assert_eq!(response.learning_points.len(), 1);
        assert!(!response.text.contains("Subject-verb agreement"));
        // Nothing corrective is left, so a canned line is added
        assert!(response.text.contains(&engine.rules().encouragements[3]));
    }

    #[test]
    fn test_empty_utterance_still_answers() {
        let engine = engine();
        let teacher = Personality::preset(PersonalityKind::StrictTeacher);
        let review = engine.review(&LearnerTurn::detached(""), ProficiencyLevel::Unset);

        let response = ResponseComposer::new(&engine, &teacher).compose(review);

        assert!(response.feedback.is_empty());
        assert!(!response.text.contains(LEARNING_POINTS_HEADING));
        assert_eq!(response.next_topic, engine.rules().topics.default);
    }
}
