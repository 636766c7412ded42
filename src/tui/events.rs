use crossterm::event::{Event as CrosstermEvent, EventStream, KeyEvent, KeyEventKind};
use futures::StreamExt;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{interval, Interval, MissedTickBehavior};
use tracing::warn;

use crate::inference::InferenceResult;

/// Application events
#[derive(Debug)]
pub enum Event {
    /// Keyboard input event
    Key(KeyEvent),

    /// Bracketed paste
    Paste(String),

    /// Terminal resize event
    Resize(u16, u16),

    /// Periodic tick event
    Tick,

    /// A question finished, successfully or not
    Reply {
        seq: u64,
        result: InferenceResult<String>,
    },
}

/// Multiplexes terminal input, internal events, and the tick timer
pub struct EventHandler {
    /// Internal event receiver
    receiver: mpsc::UnboundedReceiver<Event>,

    /// Internal event sender, handed to background tasks
    sender: mpsc::UnboundedSender<Event>,

    terminal_events: EventStream,

    tick: Interval,
}

impl EventHandler {
    /// Create a new event handler
    pub fn new(tick_rate: Duration) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let mut tick = interval(tick_rate);
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

        Self {
            receiver,
            sender,
            terminal_events: EventStream::new(),
            tick,
        }
    }

    /// Get the next event; `None` once terminal input has ended
    pub async fn next(&mut self) -> Option<Event> {
        loop {
            tokio::select! {
                maybe_event = self.terminal_events.next() => match maybe_event {
                    Some(Ok(event)) => {
                        if let Some(event) = convert_crossterm_event(event) {
                            return Some(event);
                        }
                    }
                    Some(Err(e)) => {
                        warn!("Failed to read terminal event: {}", e);
                        return None;
                    }
                    None => return None,
                },
                Some(event) = self.receiver.recv() => return Some(event),
                _ = self.tick.tick() => return Some(Event::Tick),
            }
        }
    }

    /// Get a clone of the sender
    pub fn sender(&self) -> mpsc::UnboundedSender<Event> {
        self.sender.clone()
    }
}

/// Convert crossterm events to application events
fn convert_crossterm_event(event: CrosstermEvent) -> Option<Event> {
    match event {
        CrosstermEvent::Key(key_event) if key_event.kind != KeyEventKind::Release => {
            Some(Event::Key(key_event))
        }
        CrosstermEvent::Paste(text) => Some(Event::Paste(text)),
        CrosstermEvent::Resize(width, height) => Some(Event::Resize(width, height)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};

    #[test]
    fn test_key_release_is_dropped() {
        let release = KeyEvent {
            code: KeyCode::Char('a'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert!(convert_crossterm_event(CrosstermEvent::Key(release)).is_none());

        let press = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        assert!(matches!(
            convert_crossterm_event(CrosstermEvent::Key(press)),
            Some(Event::Key(_))
        ));
    }

    #[test]
    fn test_focus_events_are_ignored() {
        assert!(convert_crossterm_event(CrosstermEvent::FocusGained).is_none());
        assert!(matches!(
            convert_crossterm_event(CrosstermEvent::Paste("hi".to_string())),
            Some(Event::Paste(text)) if text == "hi"
        ));
    }
}
