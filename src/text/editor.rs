//! Single-line text buffer with a character cursor
//!
//! Shared by the tree filter bar and the query filter input. Every editing
//! key of the input surface maps onto one [`EditCommand`].

use super::navigator::{find_next_boundary, find_previous_boundary};

/// An editing operation on a [`LineEditor`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditCommand {
    /// Insert a printable character at the cursor
    Insert(char),
    /// Delete the character before the cursor
    Backspace,
    /// Delete the character under the cursor
    Delete,
    /// Delete back to the previous word boundary (Ctrl+W)
    DeleteWordBack,
    /// Move one character left
    CursorLeft,
    /// Move one character right
    CursorRight,
    /// Move to the previous word boundary (Ctrl+Left)
    WordLeft,
    /// Move to the next word boundary (Ctrl+Right)
    WordRight,
    /// Move to the start of the line
    Home,
    /// Move to the end of the line
    End,
}

impl EditCommand {
    /// Whether this command can change the text (as opposed to only the cursor)
    #[must_use]
    pub const fn is_mutation(self) -> bool {
        matches!(
            self,
            Self::Insert(_) | Self::Backspace | Self::Delete | Self::DeleteWordBack
        )
    }
}

/// Text buffer with cursor (character index, not byte)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineEditor {
    buffer: String,
    cursor: usize,
}

impl LineEditor {
    /// Create an empty editor
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
        }
    }

    /// Create an editor holding `text` with the cursor at the end
    #[must_use]
    pub fn with_text(text: impl Into<String>) -> Self {
        let mut editor = Self::new();
        editor.set_text(text);
        editor
    }

    /// Current text
    #[must_use]
    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Cursor position in characters
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Length of the text in characters
    #[must_use]
    pub fn len_chars(&self) -> usize {
        self.buffer.chars().count()
    }

    /// Whether the buffer is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Replace the whole text and move the cursor to the end
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.buffer = text.into();
        self.cursor = self.len_chars();
    }

    /// Apply an editing command, returning `true` if the text changed
    pub fn apply(&mut self, command: EditCommand) -> bool {
        match command {
            EditCommand::Insert(c) => {
                self.insert_char(c);
                true
            }
            EditCommand::Backspace => self.backspace(),
            EditCommand::Delete => self.delete(),
            EditCommand::DeleteWordBack => self.delete_word_back(),
            EditCommand::CursorLeft => {
                self.cursor = self.cursor.saturating_sub(1);
                false
            }
            EditCommand::CursorRight => {
                self.cursor = (self.cursor + 1).min(self.len_chars());
                false
            }
            EditCommand::WordLeft => {
                self.cursor = self.word_start_before_cursor();
                false
            }
            EditCommand::WordRight => {
                self.cursor = self.word_end_after_cursor();
                false
            }
            EditCommand::Home => {
                self.cursor = 0;
                false
            }
            EditCommand::End => {
                self.cursor = self.len_chars();
                false
            }
        }
    }

    /// Byte index of a character position
    fn byte_index(&self, char_pos: usize) -> usize {
        self.buffer
            .char_indices()
            .nth(char_pos)
            .map_or(self.buffer.len(), |(i, _)| i)
    }

    fn insert_char(&mut self, c: char) {
        let byte_idx = self.byte_index(self.cursor);
        self.buffer.insert(byte_idx, c);
        self.cursor += 1;
    }

    fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let byte_idx = self.byte_index(self.cursor - 1);
        self.buffer.remove(byte_idx);
        self.cursor -= 1;
        true
    }

    fn delete(&mut self) -> bool {
        if self.cursor >= self.len_chars() {
            return false;
        }
        let byte_idx = self.byte_index(self.cursor);
        self.buffer.remove(byte_idx);
        true
    }

    /// Previous boundary, retried one character earlier when the cursor
    /// already sits right after a boundary so the motion always progresses
    fn word_start_before_cursor(&self) -> usize {
        let start = find_previous_boundary(&self.buffer, self.cursor);
        if start == self.cursor && self.cursor > 0 {
            find_previous_boundary(&self.buffer, self.cursor - 1)
        } else {
            start
        }
    }

    fn word_end_after_cursor(&self) -> usize {
        let end = find_next_boundary(&self.buffer, self.cursor);
        if end == self.cursor && self.cursor < self.len_chars() {
            find_next_boundary(&self.buffer, self.cursor + 1)
        } else {
            end
        }
    }

    fn delete_word_back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let start = self.word_start_before_cursor();
        let from = self.byte_index(start);
        let to = self.byte_index(self.cursor);
        self.buffer.drain(from..to);
        self.cursor = start;
        from != to
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_text(editor: &mut LineEditor, text: &str) {
        for c in text.chars() {
            editor.apply(EditCommand::Insert(c));
        }
    }

    #[test]
    fn test_basic_input() {
        let mut editor = LineEditor::new();
        type_text(&mut editor, "hello");

        assert_eq!(editor.text(), "hello");
        assert_eq!(editor.cursor(), 5);
    }

    #[test]
    fn test_cursor_movement() {
        let mut editor = LineEditor::with_text("hello");

        editor.apply(EditCommand::CursorLeft);
        assert_eq!(editor.cursor(), 4);

        editor.apply(EditCommand::Home);
        assert_eq!(editor.cursor(), 0);

        editor.apply(EditCommand::CursorLeft);
        assert_eq!(editor.cursor(), 0);

        editor.apply(EditCommand::End);
        assert_eq!(editor.cursor(), 5);

        editor.apply(EditCommand::CursorRight);
        assert_eq!(editor.cursor(), 5); // Should not go past end
    }

    #[test]
    fn test_insert_in_middle() {
        let mut editor = LineEditor::with_text(".usrs");
        editor.apply(EditCommand::CursorLeft);
        editor.apply(EditCommand::CursorLeft);
        assert!(editor.apply(EditCommand::Insert('e')));
        assert_eq!(editor.text(), ".users");
        assert_eq!(editor.cursor(), 4);
    }

    #[test]
    fn test_backspace() {
        let mut editor = LineEditor::with_text("hello");

        assert!(editor.apply(EditCommand::Backspace));
        assert_eq!(editor.text(), "hell");
        assert_eq!(editor.cursor(), 4);

        editor.apply(EditCommand::Home);
        assert!(!editor.apply(EditCommand::Backspace));
        assert_eq!(editor.text(), "hell"); // Nothing happens at position 0
    }

    #[test]
    fn test_delete() {
        let mut editor = LineEditor::with_text("abc");
        assert!(!editor.apply(EditCommand::Delete));

        editor.apply(EditCommand::Home);
        assert!(editor.apply(EditCommand::Delete));
        assert_eq!(editor.text(), "bc");
        assert_eq!(editor.cursor(), 0);
    }

    #[test]
    fn test_delete_word_back_inside_segment() {
        let mut editor = LineEditor::with_text(".users.na");
        assert!(editor.apply(EditCommand::DeleteWordBack));
        assert_eq!(editor.text(), ".users.");
        assert_eq!(editor.cursor(), 7);
    }

    #[test]
    fn test_delete_word_back_after_boundary() {
        let mut editor = LineEditor::with_text(".a.b[0]");
        assert!(editor.apply(EditCommand::DeleteWordBack));
        assert_eq!(editor.text(), ".a.b[");

        assert!(editor.apply(EditCommand::DeleteWordBack));
        assert_eq!(editor.text(), ".a.");
    }

    #[test]
    fn test_delete_word_back_without_boundary() {
        let mut editor = LineEditor::with_text("get users");
        assert!(editor.apply(EditCommand::DeleteWordBack));
        assert_eq!(editor.text(), "");
        assert!(!editor.apply(EditCommand::DeleteWordBack));
    }

    #[test]
    fn test_word_motion() {
        let mut editor = LineEditor::with_text(".users[0].name");

        editor.apply(EditCommand::WordLeft);
        assert_eq!(editor.cursor(), 10);
        editor.apply(EditCommand::WordLeft);
        assert_eq!(editor.cursor(), 9);

        editor.apply(EditCommand::Home);
        editor.apply(EditCommand::WordRight);
        assert_eq!(editor.cursor(), 6);
        editor.apply(EditCommand::WordRight);
        assert_eq!(editor.cursor(), 8);
        editor.apply(EditCommand::WordRight);
        assert_eq!(editor.cursor(), 9);
        editor.apply(EditCommand::WordRight);
        assert_eq!(editor.cursor(), 14);
    }

    #[test]
    fn test_multibyte_editing() {
        let mut editor = LineEditor::with_text("café");
        editor.apply(EditCommand::Backspace);
        assert_eq!(editor.text(), "caf");
        type_text(&mut editor, "é!");
        assert_eq!(editor.text(), "café!");
        assert_eq!(editor.cursor(), 5);
    }

    #[test]
    fn test_is_mutation() {
        assert!(EditCommand::Insert('x').is_mutation());
        assert!(EditCommand::DeleteWordBack.is_mutation());
        assert!(!EditCommand::WordLeft.is_mutation());
        assert!(!EditCommand::End.is_mutation());
    }
}
