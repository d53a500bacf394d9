//! Tutor personalities.
//!
//! A personality bundles tone and voice settings with a feedback style. Only
//! the strict teacher surfaces every finding; the others are configuration
//! variants that soften what the engine reports.

use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

use crate::feedback::{FeedbackItem, FeedbackKind};
use crate::models::LearnerProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonalityKind {
    StrictTeacher,
    FriendlyTutor,
    ConversationPartner,
    PronunciationCoach,
}

impl PersonalityKind {
    pub const ALL: [PersonalityKind; 4] = [
        PersonalityKind::StrictTeacher,
        PersonalityKind::FriendlyTutor,
        PersonalityKind::ConversationPartner,
        PersonalityKind::PronunciationCoach,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            PersonalityKind::StrictTeacher => "strict_teacher",
            PersonalityKind::FriendlyTutor => "friendly_tutor",
            PersonalityKind::ConversationPartner => "conversation_partner",
            PersonalityKind::PronunciationCoach => "pronunciation_coach",
        }
    }

    /// Accepts ids with either `_` or `-` separators
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_lowercase().replace('-', "_");
        Self::ALL.into_iter().find(|kind| kind.id() == normalized)
    }
}

impl fmt::Display for PersonalityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// How much of the engine's output a personality passes on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackStyle {
    /// Every item, in engine order
    Detailed,
    /// The first corrective item only, plus all encouragement
    Gentle,
    /// Encouragement items only
    EncouragementOnly,
}

/// Tone, voice and feedback configuration of a tutor
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Personality {
    pub kind: PersonalityKind,
    #[validate(length(min = 1))]
    pub name: String,
    pub description: String,
    /// Tone instruction for the language model (e.g., "Direct and precise")
    #[validate(length(min = 1))]
    pub tone: String,
    /// Text-to-speech voice identifier
    #[validate(length(min = 1))]
    pub voice_id: String,
    /// Speech rate multiplier, 1.0 is normal speed
    #[validate(range(min = 0.5, max = 2.0))]
    pub speaking_rate: f32,
    pub feedback_style: FeedbackStyle,
    /// Behavioral guidelines rendered into the system prompt
    #[serde(default)]
    pub guidelines: Vec<String>,
}

fn lines(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl Personality {
    /// Built-in configuration for a personality kind
    pub fn preset(kind: PersonalityKind) -> Self {
        match kind {
            PersonalityKind::StrictTeacher => Self {
                kind,
                name: "Professor Grammar".to_string(),
                description: "A demanding teacher who points out every mistake.".to_string(),
                tone: "Direct, precise and formal".to_string(),
                voice_id: "Matthew".to_string(),
                speaking_rate: 0.9,
                feedback_style: FeedbackStyle::Detailed,
                guidelines: lines(&[
                    "Correct every grammar mistake explicitly.",
                    "Explain the rule behind each correction.",
                    "Expect complete sentences.",
                ]),
            },
            PersonalityKind::FriendlyTutor => Self {
                kind,
                name: "Maya".to_string(),
                description: "A patient tutor who corrects gently.".to_string(),
                tone: "Warm, patient and encouraging".to_string(),
                voice_id: "Joanna".to_string(),
                speaking_rate: 1.0,
                feedback_style: FeedbackStyle::Gentle,
                guidelines: lines(&[
                    "Focus on one improvement at a time.",
                    "Celebrate progress before correcting.",
                ]),
            },
            PersonalityKind::ConversationPartner => Self {
                kind,
                name: "Alex".to_string(),
                description: "A casual partner who keeps the conversation flowing.".to_string(),
                tone: "Relaxed and curious".to_string(),
                voice_id: "Brian".to_string(),
                speaking_rate: 1.1,
                feedback_style: FeedbackStyle::EncouragementOnly,
                guidelines: lines(&[
                    "Keep the conversation natural.",
                    "Ask follow-up questions.",
                ]),
            },
            PersonalityKind::PronunciationCoach => Self {
                kind,
                name: "Coach Sam".to_string(),
                description: "A coach focused on clear, confident speech.".to_string(),
                tone: "Energetic and clear".to_string(),
                voice_id: "Amy".to_string(),
                speaking_rate: 0.85,
                feedback_style: FeedbackStyle::Gentle,
                guidelines: lines(&[
                    "Model clear pronunciation in every reply.",
                    "Keep sentences short so they are easy to repeat.",
                ]),
            },
        }
    }

    /// Every built-in personality
    pub fn all() -> Vec<Self> {
        PersonalityKind::ALL.into_iter().map(Self::preset).collect()
    }

    /// Apply the feedback style, keeping engine order
    pub fn filter(&self, items: Vec<FeedbackItem>) -> Vec<FeedbackItem> {
        match self.feedback_style {
            FeedbackStyle::Detailed => items,
            FeedbackStyle::Gentle => {
                let mut corrective_seen = false;
                items
                    .into_iter()
                    .filter(|item| {
                        if item.kind == FeedbackKind::Encouragement {
                            return true;
                        }
                        if corrective_seen {
                            return false;
                        }
                        corrective_seen = true;
                        true
                    })
                    .collect()
            }
            FeedbackStyle::EncouragementOnly => items
                .into_iter()
                .filter(|item| item.kind == FeedbackKind::Encouragement)
                .collect(),
        }
    }

    /// Prompt fragment describing this personality for the language model
    pub fn system_prompt(&self, learner: &LearnerProfile) -> String {
        let mut prompt = format!(
            "You are {}, a tutor for {} learners. {}\n",
            self.name, learner.target_language, self.description
        );
        prompt.push_str(&format!("Your tone should be: {}.\n", self.tone));
        prompt.push_str(&format!(
            "You are speaking with {}, whose level is {}.\n",
            learner.display_name, learner.proficiency_level
        ));

        if !self.guidelines.is_empty() {
            prompt.push_str("Follow these guidelines:\n");
            for guideline in &self.guidelines {
                prompt.push_str(&format!("- {}\n", guideline));
            }
        }

        prompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LearnerTurn, ProficiencyLevel};

    fn items(kinds: &[FeedbackKind]) -> Vec<FeedbackItem> {
        let turn = LearnerTurn::detached("x");
        kinds
            .iter()
            .map(|kind| FeedbackItem::new(&turn, *kind, kind.label().to_string()))
            .collect()
    }

    fn kinds(items: &[FeedbackItem]) -> Vec<FeedbackKind> {
        items.iter().map(|i| i.kind).collect()
    }

    const FULL: [FeedbackKind; 4] = [
        FeedbackKind::Correction,
        FeedbackKind::VocabularyTip,
        FeedbackKind::Suggestion,
        FeedbackKind::Encouragement,
    ];

    #[test]
    fn test_presets_are_valid() {
        for personality in Personality::all() {
            assert!(personality.validate().is_ok(), "{} invalid", personality.kind);
        }
    }

    #[test]
    fn test_parse_kind() {
        assert_eq!(PersonalityKind::parse("strict-teacher"), Some(PersonalityKind::StrictTeacher));
        assert_eq!(PersonalityKind::parse("Friendly_Tutor"), Some(PersonalityKind::FriendlyTutor));
        assert_eq!(PersonalityKind::parse("pirate"), None);
    }

    #[test]
    fn test_detailed_keeps_everything() {
        let teacher = Personality::preset(PersonalityKind::StrictTeacher);
        assert_eq!(kinds(&teacher.filter(items(&FULL))), FULL.to_vec());
    }

    #[test]
    fn test_gentle_keeps_first_correction() {
        let tutor = Personality::preset(PersonalityKind::FriendlyTutor);
        assert_eq!(
            kinds(&tutor.filter(items(&FULL))),
            vec![FeedbackKind::Correction, FeedbackKind::Encouragement]
        );

        let tips = items(&[FeedbackKind::VocabularyTip, FeedbackKind::Suggestion]);
        assert_eq!(kinds(&tutor.filter(tips)), vec![FeedbackKind::VocabularyTip]);
    }

    #[test]
    fn test_encouragement_only() {
        let partner = Personality::preset(PersonalityKind::ConversationPartner);
        assert_eq!(
            kinds(&partner.filter(items(&FULL))),
            vec![FeedbackKind::Encouragement]
        );
    }

    #[test]
    fn test_system_prompt() {
        let learner = LearnerProfile {
            learner_id: "u1".to_string(),
            display_name: "Kim".to_string(),
            proficiency_level: ProficiencyLevel::Intermediate,
            target_language: "English".to_string(),
        };
        let prompt = Personality::preset(PersonalityKind::StrictTeacher).system_prompt(&learner);

        assert!(prompt.starts_with("You are Professor Grammar, a tutor for English learners."));
        assert!(prompt.contains("Kim, whose level is intermediate"));
        assert!(prompt.contains("- Explain the rule behind each correction."));
    }
}
