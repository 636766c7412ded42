use chrono::Utc;
use tracing::{debug, info, warn};

use super::{
    input::{InputEdit, InputState},
    turn::{ConversationTurn, TurnOutcome, TurnStatus},
    view::{BotSide, BotTone, ChatView, UserSide, BOT_AVATAR, USER_AVATAR},
};
use crate::inference::InferenceResult;

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Static strings the panel displays
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelText {
    pub title: String,
    pub disclaimer: String,
    pub input_placeholder: String,
    pub response_placeholder: String,
    pub error_message: String,
}

impl Default for PanelText {
    fn default() -> Self {
        Self {
            title: "Medi-Bot 3.1-8B".to_string(),
            disclaimer: "Medi-Bot 3.1-8B is powered by a large language model, and as such, it can make mistakes: please research all answers on your own as well. For important medical questions, please consult a human healthcare provider.".to_string(),
            input_placeholder: "Enter your question here.".to_string(),
            response_placeholder: "Hi! Ask me a medical question to get started.".to_string(),
            error_message: "Sorry, I ran into an issue when processing your question, feel free to try again. If the issue persists, I recommend trying to contact your healthcare provider with your question instead.".to_string(),
        }
    }
}

/// A question the runtime must send on the panel's behalf
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingQuery {
    pub seq: u64,
    pub question: String,
}

/// What happened to a reply handed to `apply_reply`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyDisposition {
    Applied,
    Failed,
    /// Reply belonged to a superseded question and was dropped
    Stale,
}

/// State container for the chat panel
///
/// All mutation goes through typed transitions; `render` is a pure
/// function of the fields below.
#[derive(Debug, Clone)]
pub struct ChatPanel {
    text: PanelText,
    input: InputState,
    turn: ConversationTurn,
    /// Sequence number of the most recent submission, 0 before the first
    latest_seq: u64,
    spinner_frame: usize,
}

impl ChatPanel {
    pub fn new(text: PanelText) -> Self {
        let turn = ConversationTurn::new(text.response_placeholder.clone());
        Self {
            text,
            input: InputState::new(),
            turn,
            latest_seq: 0,
            spinner_frame: 0,
        }
    }

    pub fn turn(&self) -> &ConversationTurn {
        &self.turn
    }

    pub fn status(&self) -> TurnStatus {
        self.turn.status
    }

    #[cfg(test)]
    pub fn input(&self) -> &str {
        self.input.value()
    }

    /// Sequence number of the most recent submission, 0 before the first
    pub fn latest_seq(&self) -> u64 {
        self.latest_seq
    }

    pub fn edit_input(&mut self, edit: InputEdit) {
        self.input.apply(edit);
    }

    /// Submit whatever is in the input box, clearing it if a query was issued
    pub fn submit(&mut self) -> Option<PendingQuery> {
        let text = self.input.value().to_string();
        let pending = self.submit_question(&text)?;
        self.input.take();
        Some(pending)
    }

    /// Start a new turn for `text`
    ///
    /// Blank input is ignored. A submission while another is in flight
    /// supersedes it: the earlier reply will be reported as stale.
    pub fn submit_question(&mut self, text: &str) -> Option<PendingQuery> {
        if text.trim().is_empty() {
            debug!("Ignoring blank question");
            return None;
        }

        if self.turn.is_awaiting() {
            info!("Question {} superseded by a new submission", self.latest_seq);
        }

        self.latest_seq += 1;
        self.turn.question_text = text.to_string();
        self.turn.status = TurnStatus::AwaitingResponse;
        self.spinner_frame = 0;

        debug!("Submitting question {}", self.latest_seq);
        Some(PendingQuery {
            seq: self.latest_seq,
            question: text.to_string(),
        })
    }

    /// Fold a completed request back into the panel
    pub fn apply_reply(&mut self, seq: u64, result: InferenceResult<String>) -> ReplyDisposition {
        if seq != self.latest_seq || !self.turn.is_awaiting() {
            debug!("Dropping stale reply {} (latest is {})", seq, self.latest_seq);
            return ReplyDisposition::Stale;
        }

        self.turn.status = TurnStatus::Idle;
        self.turn.answered_at = Some(Utc::now());

        match result {
            Ok(response) => {
                self.turn.response_text = response;
                self.turn.outcome = TurnOutcome::Answered;
                ReplyDisposition::Applied
            }
            Err(e) => {
                if e.is_transport() {
                    warn!("Question {} could not reach the inference service: {}", seq, e);
                } else {
                    warn!("Question {} got an unusable reply: {}", seq, e);
                }
                self.turn.response_text = self.text.error_message.clone();
                self.turn.outcome = TurnOutcome::Failed;
                ReplyDisposition::Failed
            }
        }
    }

    /// Advance the working indicator
    pub fn tick(&mut self) {
        if self.turn.is_awaiting() {
            self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES.len();
        }
    }

    pub fn render(&self) -> ChatView {
        let showing_placeholder = self.input.is_empty();
        let user = UserSide {
            avatar: USER_AVATAR,
            input: if showing_placeholder {
                self.text.input_placeholder.clone()
            } else {
                self.input.value().to_string()
            },
            showing_placeholder,
            cursor_column: self.input.cursor_column(),
            last_question: (!self.turn.question_text.is_empty())
                .then(|| self.turn.question_text.clone()),
            can_send: !self.input.value().trim().is_empty(),
        };

        let bot = if self.turn.is_awaiting() {
            BotSide {
                avatar: BOT_AVATAR,
                text: format!("{} Working on it...", SPINNER_FRAMES[self.spinner_frame]),
                tone: BotTone::Working,
                footer: None,
            }
        } else {
            let tone = match self.turn.outcome {
                TurnOutcome::Placeholder => BotTone::Placeholder,
                TurnOutcome::Answered => BotTone::Answer,
                TurnOutcome::Failed => BotTone::Error,
            };
            BotSide {
                avatar: BOT_AVATAR,
                text: self.turn.response_text.clone(),
                tone,
                footer: self
                    .turn
                    .answered_at
                    .map(|at| format!("Answered at {} UTC", at.format("%H:%M:%S"))),
            }
        };

        ChatView {
            heading: self.text.title.clone(),
            disclaimer: self.text.disclaimer.clone(),
            user,
            bot,
        }
    }
}

impl Default for ChatPanel {
    fn default() -> Self {
        Self::new(PanelText::default())
    }
}
