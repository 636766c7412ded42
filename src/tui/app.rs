use anyhow::Result;
use std::sync::Arc;
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{debug, info};

use super::{
    draw,
    events::Event,
    keys::{Action, KeyMap},
    styles::Theme,
    Frame,
};
use crate::{
    chat::{ChatPanel, InputEdit, PanelText, PendingQuery, ReplyDisposition, TurnStatus},
    inference::InferenceService,
};

/// Main application state and controller
pub struct App {
    /// Whether the application should quit
    pub should_quit: bool,

    /// Key mappings for the application
    pub key_map: KeyMap,

    /// Current theme for styling
    pub theme: Theme,

    /// Whether the help overlay is shown
    pub show_help: bool,

    panel: ChatPanel,

    service: Arc<dyn InferenceService>,

    /// Where background requests report back
    event_sender: mpsc::UnboundedSender<Event>,

    /// Request for the latest question, if still running
    in_flight: Option<JoinHandle<()>>,
}

impl App {
    /// Create a new application instance
    pub fn new(
        text: PanelText,
        service: Arc<dyn InferenceService>,
        event_sender: mpsc::UnboundedSender<Event>,
    ) -> Self {
        Self {
            should_quit: false,
            key_map: KeyMap::default(),
            theme: Theme::default(),
            show_help: false,
            panel: ChatPanel::new(text),
            service,
            event_sender,
            in_flight: None,
        }
    }

    #[cfg(test)]
    pub fn panel(&self) -> &ChatPanel {
        &self.panel
    }

    /// Handle incoming events, returning whether the app should exit
    pub fn handle_event(&mut self, event: Event) -> Result<bool> {
        match event {
            Event::Key(key_event) => match self.key_map.action_for(&key_event) {
                Action::Quit => {
                    self.should_quit = true;
                }
                Action::ToggleHelp => {
                    self.show_help = !self.show_help;
                }
                Action::Dismiss => {
                    if self.show_help {
                        self.show_help = false;
                    } else {
                        self.panel.edit_input(InputEdit::Clear);
                    }
                }
                Action::Submit => {
                    if let Some(pending) = self.panel.submit() {
                        self.dispatch(pending);
                    }
                }
                Action::Edit(edit) => self.panel.edit_input(edit),
                Action::Ignore => {}
            },

            Event::Paste(text) => self.panel.edit_input(InputEdit::Paste(text)),

            // ratatui picks up the new size on the next draw
            Event::Resize(width, height) => debug!("Terminal resized to {}x{}", width, height),

            Event::Tick => self.panel.tick(),

            Event::Reply { seq, result } => {
                let disposition = self.panel.apply_reply(seq, result);
                if disposition != ReplyDisposition::Stale {
                    self.in_flight = None;
                }
                debug!("Reply {} {:?}", seq, disposition);
            }
        }

        Ok(self.should_quit)
    }

    /// Send a question in the background, superseding any request still running
    fn dispatch(&mut self, pending: PendingQuery) {
        if let Some(previous) = self.in_flight.take() {
            previous.abort();
        }

        info!("Asking question {}", pending.seq);
        let service = Arc::clone(&self.service);
        let sender = self.event_sender.clone();
        self.in_flight = Some(tokio::spawn(async move {
            let result = service.query(&pending.question).await;
            // the receiver is gone only when the app is shutting down
            let _ = sender.send(Event::Reply {
                seq: pending.seq,
                result,
            });
        }));
    }

    /// Abort the outstanding request, if any
    pub fn shutdown(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }

    /// Render the application UI
    pub fn render(&self, frame: &mut Frame) {
        let view = self.panel.render();
        let status = self.status_text();
        let area = frame.size();
        draw::draw_chat(frame, area, &view, &self.theme, &status);

        if self.show_help {
            draw::draw_help(frame, &self.key_map, &self.theme);
        }
    }

    fn status_text(&self) -> String {
        match self.panel.status() {
            TurnStatus::AwaitingResponse => format!(
                " Question #{} waiting on {} | {}",
                self.panel.latest_seq(),
                self.service.endpoint(),
                self.key_map.hint()
            ),
            TurnStatus::Idle => format!(" {} | {}", self.service.endpoint(), self.key_map.hint()),
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.shutdown();
    }
}
