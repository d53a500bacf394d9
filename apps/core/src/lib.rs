// LanguagePeer Feedback Core
// Rule-based feedback for learner utterances, called by the conversation handler

pub mod config;
pub mod error;
pub mod feedback;
pub mod logging;
pub mod models;
pub mod personality;
pub mod response;

pub use error::AppError;
pub use feedback::{FeedbackEngine, FeedbackItem, FeedbackKind, RuleBook, TurnReview};
pub use models::{LearnerProfile, LearnerTurn, ProficiencyLevel};
pub use personality::{Personality, PersonalityKind};
pub use response::{ComposedResponse, ResponseComposer};

#[cfg(test)]
mod tests;
