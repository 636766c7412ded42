use chrono::{DateTime, Utc};
use serde::Serialize;

/// Whether a question is currently in flight
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnStatus {
    #[default]
    Idle,
    AwaitingResponse,
}

/// What the displayed response text currently is
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnOutcome {
    /// Nothing asked yet, showing the initial placeholder
    #[default]
    Placeholder,
    Answered,
    Failed,
}

/// The most recent question and its (possibly pending) answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversationTurn {
    pub question_text: String,
    pub response_text: String,
    pub status: TurnStatus,
    pub outcome: TurnOutcome,
    pub answered_at: Option<DateTime<Utc>>,
}

impl ConversationTurn {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            question_text: String::new(),
            response_text: placeholder.into(),
            status: TurnStatus::Idle,
            outcome: TurnOutcome::Placeholder,
            answered_at: None,
        }
    }

    pub fn is_awaiting(&self) -> bool {
        self.status == TurnStatus::AwaitingResponse
    }
}
