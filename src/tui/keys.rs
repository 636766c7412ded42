use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::chat::InputEdit;

/// Key binding configuration
#[derive(Debug, Clone)]
pub struct KeyBinding {
    pub key: KeyCode,
    pub modifiers: KeyModifiers,
    pub label: &'static str,
    pub description: &'static str,
}

impl KeyBinding {
    pub const fn new(
        key: KeyCode,
        modifiers: KeyModifiers,
        label: &'static str,
        description: &'static str,
    ) -> Self {
        Self {
            key,
            modifiers,
            label,
            description,
        }
    }

    pub fn matches(&self, event: &KeyEvent) -> bool {
        self.key == event.code && self.modifiers == event.modifiers
    }
}

/// What a key press means to the chat app
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    ToggleHelp,
    Submit,
    Dismiss,
    Edit(InputEdit),
    Ignore,
}

/// Application key mappings
#[derive(Debug, Clone)]
pub struct KeyMap {
    pub quit: KeyBinding,
    pub quit_alt: KeyBinding,
    pub help: KeyBinding,
    pub submit: KeyBinding,
    pub dismiss: KeyBinding,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            quit: KeyBinding::new(KeyCode::Char('c'), KeyModifiers::CONTROL, "Ctrl+C", "Quit"),
            quit_alt: KeyBinding::new(KeyCode::Char('q'), KeyModifiers::CONTROL, "Ctrl+Q", "Quit"),
            help: KeyBinding::new(KeyCode::F(1), KeyModifiers::NONE, "F1", "Show/hide help"),
            submit: KeyBinding::new(KeyCode::Enter, KeyModifiers::NONE, "Enter", "Send question"),
            dismiss: KeyBinding::new(KeyCode::Esc, KeyModifiers::NONE, "Esc", "Close help / clear input"),
        }
    }
}

impl KeyMap {
    /// Translate a key press into an action
    pub fn action_for(&self, event: &KeyEvent) -> Action {
        if self.quit.matches(event) || self.quit_alt.matches(event) {
            return Action::Quit;
        }
        if self.help.matches(event) {
            return Action::ToggleHelp;
        }
        if self.submit.matches(event) {
            return Action::Submit;
        }
        if self.dismiss.matches(event) {
            return Action::Dismiss;
        }

        let edit = match event.code {
            // AltGr arrives as Ctrl+Alt on Windows
            KeyCode::Char(c)
                if event.modifiers.contains(KeyModifiers::CONTROL)
                    == event.modifiers.contains(KeyModifiers::ALT) =>
            {
                InputEdit::Insert(c)
            }
            KeyCode::Backspace => InputEdit::Backspace,
            KeyCode::Delete => InputEdit::Delete,
            KeyCode::Left => InputEdit::Left,
            KeyCode::Right => InputEdit::Right,
            KeyCode::Home => InputEdit::Home,
            KeyCode::End => InputEdit::End,
            _ => return Action::Ignore,
        };
        Action::Edit(edit)
    }

    /// Get help text for all key bindings
    pub fn help_lines(&self) -> Vec<(&'static str, &'static str)> {
        [&self.submit, &self.dismiss, &self.help, &self.quit, &self.quit_alt]
            .iter()
            .map(|b| (b.label, b.description))
            .collect()
    }

    /// Short hint for the status bar
    pub fn hint(&self) -> String {
        format!(
            "{} send | {} clear | {} help | {} quit",
            self.submit.label, self.dismiss.label, self.help.label, self.quit.label
        )
    }
}
