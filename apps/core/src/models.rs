use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Learner skill tier, used to pick the next conversation topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProficiencyLevel {
    Beginner,
    Intermediate,
    Advanced,
    /// No level recorded yet, or a value this build does not know about.
    #[default]
    #[serde(other)]
    Unset,
}

impl ProficiencyLevel {
    /// Returns the lowercase label for the level
    pub fn label(&self) -> &'static str {
        match self {
            ProficiencyLevel::Beginner => "beginner",
            ProficiencyLevel::Intermediate => "intermediate",
            ProficiencyLevel::Advanced => "advanced",
            ProficiencyLevel::Unset => "unset",
        }
    }
}

impl fmt::Display for ProficiencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Lossy parse: anything unrecognised maps to `Unset`.
impl From<&str> for ProficiencyLevel {
    fn from(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "beginner" => ProficiencyLevel::Beginner,
            "intermediate" => ProficiencyLevel::Intermediate,
            "advanced" => ProficiencyLevel::Advanced,
            _ => ProficiencyLevel::Unset,
        }
    }
}

impl From<Option<&str>> for ProficiencyLevel {
    fn from(value: Option<&str>) -> Self {
        value.map(ProficiencyLevel::from).unwrap_or_default()
    }
}

/// Represents the learner a conversation belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearnerProfile {
    /// The unique identifier for the learner.
    pub learner_id: String,
    /// Name used when addressing the learner.
    pub display_name: String,
    /// Self-reported or assessed skill tier.
    #[serde(default)]
    pub proficiency_level: ProficiencyLevel,
    /// Language being practised (e.g., "English").
    #[serde(default = "default_target_language")]
    pub target_language: String,
}

fn default_target_language() -> String {
    "English".to_string()
}

/// Who authored a conversation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    Learner,
    Agent,
}

/// Represents a single message within a conversation session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationMessage {
    /// The unique identifier for the message.
    pub id: String,
    /// The ID of the session this message belongs to.
    pub session_id: String,
    /// The author of the message.
    pub role: MessageRole,
    /// The text content (transcribed speech for voice turns).
    pub content: String,
    /// When the message was recorded.
    pub created_at: DateTime<Utc>,
}

/// One learner utterance handed to the feedback engine, with the references
/// copied into every feedback item it produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearnerTurn {
    pub session_id: String,
    pub message_id: String,
    pub text: String,
}

impl LearnerTurn {
    pub fn new(
        session_id: impl Into<String>,
        message_id: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            message_id: message_id.into(),
            text: text.into(),
        }
    }

    /// A turn not attached to any session or message.
    pub fn detached(text: impl Into<String>) -> Self {
        Self::new(String::new(), String::new(), text)
    }
}

impl From<&ConversationMessage> for LearnerTurn {
    fn from(message: &ConversationMessage) -> Self {
        Self::new(
            message.session_id.clone(),
            message.id.clone(),
            message.content.clone(),
        )
    }
}

/// Picks the most recent learner-authored message from a session history.
///
/// Messages are compared by `created_at`; on ties the later position in the
/// slice wins.
pub fn latest_learner_turn(messages: &[ConversationMessage]) -> Option<LearnerTurn> {
    messages
        .iter()
        .enumerate()
        .filter(|(_, m)| m.role == MessageRole::Learner)
        .max_by_key(|(idx, m)| (m.created_at, *idx))
        .map(|(_, m)| LearnerTurn::from(m))
}
