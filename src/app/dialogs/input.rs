//! Single-line text input used by the path, color and printer dialogs.

use crate::core::event::{KeyCode, KeyEvent};
use unicode_width::UnicodeWidthChar;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputField {
    text: String,
    /// Char index.
    cursor: usize,
}

impl InputField {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            cursor: text.chars().count(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor = text.chars().count();
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn byte_offset(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }

    pub fn insert_str(&mut self, s: &str) {
        let s: String = s.chars().filter(|c| !c.is_control()).collect();
        let at = self.byte_offset(self.cursor);
        self.text.insert_str(at, &s);
        self.cursor += s.chars().count();
    }

    /// Returns `true` when the key edited the field or moved its cursor.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(ch) if key.modifiers.is_text_input() => {
                let at = self.byte_offset(self.cursor);
                self.text.insert(at, ch);
                self.cursor += 1;
            }
            KeyCode::Backspace if self.cursor > 0 => {
                self.cursor -= 1;
                let at = self.byte_offset(self.cursor);
                self.text.remove(at);
            }
            KeyCode::Delete if self.cursor < self.text.chars().count() => {
                let at = self.byte_offset(self.cursor);
                self.text.remove(at);
            }
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(self.text.chars().count()),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.text.chars().count(),
            _ => return false,
        }
        true
    }

    /// Visible slice for `width` cells and the cursor's cell offset inside it.
    /// Scrolls so the cursor cell stays in view.
    pub fn window(&self, width: usize) -> (String, u16) {
        if width == 0 {
            return (String::new(), 0);
        }
        let chars: Vec<char> = self.text.chars().collect();
        let cell = |c: &char| UnicodeWidthChar::width(*c).unwrap_or(0);

        // Walk back from the cursor, leaving one cell for the cursor itself.
        let mut start = self.cursor;
        let mut used = 1;
        while start > 0 {
            let w = cell(&chars[start - 1]);
            if used + w > width {
                break;
            }
            used += w;
            start -= 1;
        }

        let mut visible = String::new();
        let mut filled = 0;
        let mut cursor_x = 0;
        for (idx, ch) in chars.iter().enumerate().skip(start) {
            if idx == self.cursor {
                cursor_x = filled;
            }
            let w = cell(ch);
            if filled + w > width {
                break;
            }
            visible.push(*ch);
            filled += w;
        }
        if self.cursor >= chars.len() {
            cursor_x = filled;
        }
        (visible, cursor_x.min(width.saturating_sub(1)) as u16)
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/app/dialogs/input.rs"]
mod tests;
