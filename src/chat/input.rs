//! Controlled single-line input
//!
//! The value and cursor are owned here and mutated one edit at a time, so the
//! panel never has to ask the terminal what the user typed.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// A single change to the input value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEdit {
    Insert(char),
    Paste(String),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    Clear,
}

/// Input value plus a cursor kept on a grapheme boundary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    value: String,
    /// Byte offset into `value`
    cursor: usize,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Terminal column of the cursor, counting wide characters as two cells
    pub fn cursor_column(&self) -> usize {
        self.value[..self.cursor].width()
    }

    pub fn apply(&mut self, edit: InputEdit) {
        match edit {
            InputEdit::Insert(c) => {
                self.value.insert(self.cursor, c);
                self.cursor += c.len_utf8();
            }
            InputEdit::Paste(text) => {
                // single-line input, newlines become spaces
                let text: String = text
                    .chars()
                    .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
                    .filter(|c| !c.is_control())
                    .collect();
                self.value.insert_str(self.cursor, &text);
                self.cursor += text.len();
            }
            InputEdit::Backspace => {
                if let Some(start) = self.prev_boundary() {
                    self.value.replace_range(start..self.cursor, "");
                    self.cursor = start;
                }
            }
            InputEdit::Delete => {
                if let Some(end) = self.next_boundary() {
                    self.value.replace_range(self.cursor..end, "");
                }
            }
            InputEdit::Left => {
                if let Some(start) = self.prev_boundary() {
                    self.cursor = start;
                }
            }
            InputEdit::Right => {
                if let Some(end) = self.next_boundary() {
                    self.cursor = end;
                }
            }
            InputEdit::Home => self.cursor = 0,
            InputEdit::End => self.cursor = self.value.len(),
            InputEdit::Clear => {
                self.value.clear();
                self.cursor = 0;
            }
        }
    }

    /// Take the current value, leaving the input empty
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.value)
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.value[..self.cursor]
            .grapheme_indices(true)
            .next_back()
            .map(|(idx, _)| idx)
    }

    fn next_boundary(&self) -> Option<usize> {
        self.value[self.cursor..]
            .graphemes(true)
            .next()
            .map(|g| self.cursor + g.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> InputState {
        let mut input = InputState::new();
        for c in text.chars() {
            input.apply(InputEdit::Insert(c));
        }
        input
    }

    #[test]
    fn test_typing_and_backspace() {
        let mut input = typed("fever");
        assert_eq!(input.value(), "fever");
        assert_eq!(input.cursor_column(), 5);

        input.apply(InputEdit::Backspace);
        assert_eq!(input.value(), "feve");
    }

    #[test]
    fn test_cursor_movement_edits_in_place() {
        let mut input = typed("cogh");
        input.apply(InputEdit::Left);
        input.apply(InputEdit::Insert('u'));
        assert_eq!(input.value(), "coguh");
        input.apply(InputEdit::Backspace);

        input.apply(InputEdit::Left);
        input.apply(InputEdit::Insert('u'));
        assert_eq!(input.value(), "cough");

        input.apply(InputEdit::Home);
        input.apply(InputEdit::Delete);
        assert_eq!(input.value(), "ough");

        input.apply(InputEdit::End);
        input.apply(InputEdit::Right);
        assert_eq!(input.cursor_column(), 4);
    }

    #[test]
    fn test_multibyte_and_wide_characters() {
        let mut input = typed("né頭");
        // 'n' + 'é' + one wide glyph
        assert_eq!(input.cursor_column(), 4);

        input.apply(InputEdit::Backspace);
        assert_eq!(input.value(), "né");
        input.apply(InputEdit::Left);
        input.apply(InputEdit::Backspace);
        assert_eq!(input.value(), "é");
    }

    #[test]
    fn test_backspace_on_empty_is_noop() {
        let mut input = InputState::new();
        input.apply(InputEdit::Backspace);
        input.apply(InputEdit::Delete);
        input.apply(InputEdit::Left);
        assert!(input.is_empty());
        assert_eq!(input.cursor_column(), 0);
    }

    #[test]
    fn test_paste_flattens_newlines() {
        let mut input = typed("a");
        input.apply(InputEdit::Paste("b\nc\r\n".to_string()));
        assert_eq!(input.value(), "ab c  ");
        assert_eq!(input.cursor_column(), 6);
    }

    #[test]
    fn test_take_resets() {
        let mut input = typed("sore throat");
        assert_eq!(input.take(), "sore throat");
        assert!(input.is_empty());
        assert_eq!(input.cursor_column(), 0);
    }
}
