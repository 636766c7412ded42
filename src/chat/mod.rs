//! Chat panel state, transitions, and the view it renders to
//!
//! The panel never performs I/O. `submit` hands back a `PendingQuery` that
//! the caller sends to the inference service; the result comes back through
//! `apply_reply`. Each submission is tagged with a sequence number and only
//! the latest one may update the displayed response.

mod input;
mod panel;
mod turn;
mod view;

pub use input::InputEdit;
pub use panel::{ChatPanel, PanelText, PendingQuery, ReplyDisposition};
pub use turn::TurnStatus;
pub use view::{BotSide, BotTone, ChatView, UserSide};
