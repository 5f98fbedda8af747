/// Text typed into the input box but not yet sent.
///
/// The cursor is a character index, so editing stays UTF-8 safe.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Draft {
    text: String,
    cursor: usize,
}

/// Convert a character index to a byte index for UTF-8 safe string operations
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

impl Draft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// True when there is nothing worth sending
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Replace the whole draft, cursor at the end
    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.text.chars().count();
    }

    /// Take the text out, leaving an empty draft
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.text)
    }

    pub fn insert(&mut self, c: char) {
        let byte_pos = char_to_byte_index(&self.text, self.cursor);
        self.text.insert(byte_pos, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let byte_pos = char_to_byte_index(&self.text, self.cursor);
            self.text.remove(byte_pos);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.text.chars().count() {
            let byte_pos = char_to_byte_index(&self.text, self.cursor);
            self.text.remove(byte_pos);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.text.chars().count());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.chars().count();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_at_cursor() {
        let mut draft = Draft::new();
        for c in "helo".chars() {
            draft.insert(c);
        }
        draft.move_left();
        draft.insert('l');
        assert_eq!(draft.as_str(), "hello");
        assert_eq!(draft.cursor(), 4);
    }

    #[test]
    fn test_multibyte_editing() {
        let mut draft = Draft::new();
        draft.set("héllo wörld");
        draft.move_home();
        draft.move_right();
        draft.delete();
        assert_eq!(draft.as_str(), "hllo wörld");

        draft.move_end();
        draft.backspace();
        assert_eq!(draft.as_str(), "hllo wörl");
        assert_eq!(draft.cursor(), 9);
    }

    #[test]
    fn test_cursor_bounds() {
        let mut draft = Draft::new();
        draft.backspace();
        draft.delete();
        draft.move_left();
        assert_eq!(draft.cursor(), 0);

        draft.set("ab");
        draft.move_right();
        assert_eq!(draft.cursor(), 2);
    }

    #[test]
    fn test_blank_and_take() {
        let mut draft = Draft::new();
        assert!(draft.is_blank());
        draft.set(" \t ");
        assert!(draft.is_blank());

        draft.set("  hi ");
        assert!(!draft.is_blank());
        assert_eq!(draft.take(), "  hi ");
        assert_eq!(draft, Draft::new());
    }
}
