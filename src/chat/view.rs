//! Plain description of what the chat panel shows
//!
//! A `ChatView` is produced by `ChatPanel::render` and consumed by the
//! terminal layer. It carries no terminal types so it can be compared in
//! tests.

/// Bundled text-art avatars
pub const USER_AVATAR: &str = include_str!("../../assets/user-avatar.txt");
pub const BOT_AVATAR: &str = include_str!("../../assets/doctor-avatar.txt");

/// How the bot text should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotTone {
    Placeholder,
    Answer,
    Working,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSide {
    pub avatar: &'static str,
    /// Current input value, or the placeholder when empty
    pub input: String,
    pub showing_placeholder: bool,
    pub cursor_column: usize,
    /// Last submitted question, echoed above the form
    pub last_question: Option<String>,
    /// Submitting is meaningful only with non-blank input
    pub can_send: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotSide {
    pub avatar: &'static str,
    pub text: String,
    pub tone: BotTone,
    pub footer: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatView {
    pub heading: String,
    pub disclaimer: String,
    pub user: UserSide,
    pub bot: BotSide,
}
