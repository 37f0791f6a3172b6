//! Rope-backed document: the concrete [`TextSurface`].
//!
//! Positions are char indices into the rope. Lines split on `\n` only; a `\r` before the
//! newline belongs to the line break and is never shown or stepped into.

use super::format::{Alignment, FontSpec, TextColor};
use super::history::{EditHistory, EditKind, Snapshot};
use super::print::{Paragraph, PrintDocument};
use super::services::ports::surface::TextSurface;
use ropey::{Rope, RopeSlice};
use std::borrow::Cow;
use std::ops::Range;
use unicode_segmentation::UnicodeSegmentation;

fn slice_to_cow(slice: RopeSlice<'_>) -> Cow<'_, str> {
    match slice.as_str() {
        Some(s) => Cow::Borrowed(s),
        None => Cow::Owned(slice.to_string()),
    }
}

pub struct DocumentSurface {
    rope: Rope,
    /// One entry per rope line.
    alignments: Vec<Alignment>,
    cursor: usize,
    anchor: Option<usize>,
    goal_column: Option<usize>,
    font: FontSpec,
    color: TextColor,
    version: u64,
    next_version: u64,
    clean_version: Option<u64>,
    reported_modified: bool,
    history: EditHistory,
    clipboard: String,
    clipboard_dirty: bool,
}

impl DocumentSurface {
    pub fn new() -> Self {
        Self::with_history(EditHistory::new())
    }

    pub fn with_undo_limit(limit: usize) -> Self {
        Self::with_history(EditHistory::with_limit(limit))
    }

    fn with_history(history: EditHistory) -> Self {
        Self {
            rope: Rope::new(),
            alignments: vec![Alignment::Left],
            cursor: 0,
            anchor: None,
            goal_column: None,
            font: FontSpec::default(),
            color: TextColor::BLACK,
            version: 0,
            next_version: 1,
            clean_version: Some(0),
            reported_modified: false,
            history,
            clipboard: String::new(),
            clipboard_dirty: false,
        }
    }

    pub fn from_text(text: &str) -> Self {
        let mut doc = Self::new();
        doc.set_text(text);
        doc.set_modified(false);
        doc.reported_modified = false;
        doc
    }

    // ==================== queries ====================

    pub fn rope(&self) -> &Rope {
        &self.rope
    }

    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Line content without its line break.
    pub fn line_text(&self, line: usize) -> String {
        if line >= self.rope.len_lines() {
            return String::new();
        }
        let raw = slice_to_cow(self.rope.line(line));
        match raw.strip_suffix('\n') {
            Some(body) => body.strip_suffix('\r').unwrap_or(body).to_string(),
            None => raw.into_owned(),
        }
    }

    fn content_len(&self, line: usize) -> usize {
        let slice = self.rope.line(line);
        let mut len = slice.len_chars();
        if len > 0 && slice.char(len - 1) == '\n' {
            len -= 1;
            if len > 0 && slice.char(len - 1) == '\r' {
                len -= 1;
            }
        }
        len
    }

    pub fn paragraph_alignment(&self, line: usize) -> Alignment {
        self.alignments.get(line).copied().unwrap_or_default()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// `(line, char column)` of the cursor.
    pub fn cursor_position(&self) -> (usize, usize) {
        self.position_of(self.cursor)
    }

    pub fn position_of(&self, idx: usize) -> (usize, usize) {
        let idx = idx.min(self.rope.len_chars());
        let line = self.rope.char_to_line(idx);
        (line, idx - self.rope.line_to_char(line))
    }

    /// Ordered, non-empty selection range.
    pub fn selection(&self) -> Option<Range<usize>> {
        let anchor = self.anchor?;
        if anchor == self.cursor {
            return None;
        }
        Some(anchor.min(self.cursor)..anchor.max(self.cursor))
    }

    pub fn selected_text(&self) -> Option<String> {
        self.selection()
            .map(|range| self.rope.slice(range).to_string())
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn clipboard(&self) -> &str {
        &self.clipboard
    }

    /// Returns the register contents once after each copy/cut.
    pub fn take_clipboard_update(&mut self) -> Option<String> {
        if !std::mem::take(&mut self.clipboard_dirty) {
            return None;
        }
        Some(self.clipboard.clone())
    }

    // ==================== editing ====================

    pub fn insert_char(&mut self, ch: char) {
        let mut buf = [0u8; 4];
        self.insert_str(ch.encode_utf8(&mut buf));
    }

    pub fn insert_str(&mut self, text: &str) {
        if text.is_empty() && self.selection().is_none() {
            return;
        }
        let (range, kind) = match self.selection() {
            Some(range) => (range, EditKind::Other),
            None if text.contains('\n') => (self.cursor..self.cursor, EditKind::Other),
            None => (self.cursor..self.cursor, EditKind::Typing),
        };
        self.replace_range(range, text, kind);
    }

    pub fn insert_newline(&mut self) {
        self.insert_str("\n");
    }

    pub fn insert_tab(&mut self) {
        self.insert_char('\t');
    }

    pub fn delete_backward(&mut self) {
        if let Some(range) = self.selection() {
            self.replace_range(range, "", EditKind::Other);
            return;
        }
        if self.cursor == 0 {
            return;
        }
        let start = self.prev_boundary(self.cursor);
        self.replace_range(start..self.cursor, "", EditKind::Deleting);
    }

    pub fn delete_forward(&mut self) {
        if let Some(range) = self.selection() {
            self.replace_range(range, "", EditKind::Other);
            return;
        }
        let end = self.next_boundary(self.cursor);
        if end > self.cursor {
            self.replace_range(self.cursor..end, "", EditKind::Deleting);
        }
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            rope: self.rope.clone(),
            alignments: self.alignments.clone(),
            cursor: self.cursor,
            version: self.version,
        }
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.rope = snapshot.rope;
        self.alignments = snapshot.alignments;
        self.cursor = snapshot.cursor.min(self.rope.len_chars());
        self.version = snapshot.version;
        self.anchor = None;
        self.goal_column = None;
    }

    fn bump_version(&mut self) {
        self.version = self.next_version;
        self.next_version += 1;
    }

    fn replace_range(&mut self, range: Range<usize>, text: &str, kind: EditKind) {
        let len = self.rope.len_chars();
        let start = range.start.min(len);
        let end = range.end.clamp(start, len);
        self.history.record(self.snapshot(), kind);

        let start_line = self.rope.char_to_line(start);
        let end_line = self.rope.char_to_line(end);
        let inherited = self.paragraph_alignment(start_line);
        let inserted_lines = text.matches('\n').count();
        self.alignments.drain(start_line + 1..end_line + 1);
        self.alignments.splice(
            start_line + 1..start_line + 1,
            std::iter::repeat(inherited).take(inserted_lines),
        );

        if end > start {
            self.rope.remove(start..end);
        }
        if !text.is_empty() {
            self.rope.insert(start, text);
        }
        debug_assert_eq!(self.alignments.len(), self.rope.len_lines());

        self.cursor = start + text.chars().count();
        self.anchor = None;
        self.goal_column = None;
        self.bump_version();
    }

    // ==================== cursor ====================

    fn place_cursor(&mut self, idx: usize, extend: bool) {
        if extend {
            if self.anchor.is_none() {
                self.anchor = Some(self.cursor);
            }
        } else {
            self.anchor = None;
        }
        self.cursor = idx.min(self.rope.len_chars());
        self.history.break_group();
    }

    fn prev_boundary(&self, idx: usize) -> usize {
        let line = self.rope.char_to_line(idx);
        let start = self.rope.line_to_char(line);
        if idx == start {
            if line == 0 {
                return 0;
            }
            return self.rope.line_to_char(line - 1) + self.content_len(line - 1);
        }
        let col = idx - start;
        let content = self.line_text(line);
        let mut offset = 0;
        for g in content.graphemes(true) {
            let next = offset + g.chars().count();
            if next >= col {
                return start + offset;
            }
            offset = next;
        }
        start + offset
    }

    fn next_boundary(&self, idx: usize) -> usize {
        let line = self.rope.char_to_line(idx);
        let start = self.rope.line_to_char(line);
        let col = idx - start;
        let len = self.content_len(line);
        if col >= len {
            if line + 1 < self.rope.len_lines() {
                return self.rope.line_to_char(line + 1);
            }
            return idx;
        }
        let content = self.line_text(line);
        let mut offset = 0;
        for g in content.graphemes(true) {
            offset += g.chars().count();
            if offset > col {
                return start + offset;
            }
        }
        start + len
    }

    fn grapheme_column(&self, line: usize, col: usize) -> usize {
        let content = self.line_text(line);
        let mut offset = 0;
        let mut count = 0;
        for g in content.graphemes(true) {
            if offset >= col {
                break;
            }
            offset += g.chars().count();
            count += 1;
        }
        count
    }

    fn char_column(&self, line: usize, graphemes: usize) -> usize {
        self.line_text(line)
            .graphemes(true)
            .take(graphemes)
            .map(|g| g.chars().count())
            .sum()
    }

    pub fn move_left(&mut self, extend: bool) {
        if !extend {
            if let Some(range) = self.selection() {
                self.place_cursor(range.start, false);
                self.goal_column = None;
                return;
            }
        }
        let idx = self.prev_boundary(self.cursor);
        self.place_cursor(idx, extend);
        self.goal_column = None;
    }

    pub fn move_right(&mut self, extend: bool) {
        if !extend {
            if let Some(range) = self.selection() {
                self.place_cursor(range.end, false);
                self.goal_column = None;
                return;
            }
        }
        let idx = self.next_boundary(self.cursor);
        self.place_cursor(idx, extend);
        self.goal_column = None;
    }

    /// Moves `delta` lines, keeping the goal column across short lines.
    pub fn move_vertical(&mut self, delta: isize, extend: bool) {
        let (line, col) = self.cursor_position();
        let goal = self
            .goal_column
            .unwrap_or_else(|| self.grapheme_column(line, col));
        let last = self.rope.len_lines().saturating_sub(1);

        let idx = if delta < 0 && line == 0 {
            0
        } else if delta > 0 && line == last {
            self.rope.len_chars()
        } else {
            let target = if delta < 0 {
                line.saturating_sub(delta.unsigned_abs())
            } else {
                (line + delta as usize).min(last)
            };
            self.rope.line_to_char(target) + self.char_column(target, goal)
        };

        self.place_cursor(idx, extend);
        self.goal_column = Some(goal);
    }

    pub fn move_up(&mut self, extend: bool) {
        self.move_vertical(-1, extend);
    }

    pub fn move_down(&mut self, extend: bool) {
        self.move_vertical(1, extend);
    }

    pub fn move_line_start(&mut self, extend: bool) {
        let (line, _) = self.cursor_position();
        self.place_cursor(self.rope.line_to_char(line), extend);
        self.goal_column = None;
    }

    pub fn move_line_end(&mut self, extend: bool) {
        let (line, _) = self.cursor_position();
        let idx = self.rope.line_to_char(line) + self.content_len(line);
        self.place_cursor(idx, extend);
        self.goal_column = None;
    }

    pub fn move_document_start(&mut self, extend: bool) {
        self.place_cursor(0, extend);
        self.goal_column = None;
    }

    pub fn move_document_end(&mut self, extend: bool) {
        self.place_cursor(self.rope.len_chars(), extend);
        self.goal_column = None;
    }

    /// Cursor from `(line, char column)`, clamped to the document.
    pub fn set_cursor_position(&mut self, line: usize, col: usize, extend: bool) {
        let last = self.rope.len_lines().saturating_sub(1);
        let line = line.min(last);
        let col = col.min(self.content_len(line));
        self.place_cursor(self.rope.line_to_char(line) + col, extend);
        self.goal_column = None;
    }

    pub fn select_all(&mut self) {
        self.anchor = Some(0);
        self.cursor = self.rope.len_chars();
        self.goal_column = None;
        self.history.break_group();
    }

    fn selected_lines(&self) -> Range<usize> {
        match self.selection() {
            Some(range) => {
                let first = self.rope.char_to_line(range.start);
                let last = self.rope.char_to_line(range.end);
                first..last + 1
            }
            None => {
                let line = self.rope.char_to_line(self.cursor);
                line..line + 1
            }
        }
    }
}

impl Default for DocumentSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl TextSurface for DocumentSurface {
    fn text(&self) -> String {
        self.rope.to_string()
    }

    fn set_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        self.alignments = vec![Alignment::Left; self.rope.len_lines()];
        self.cursor = 0;
        self.anchor = None;
        self.goal_column = None;
        self.history.clear();
        self.bump_version();
    }

    fn is_modified(&self) -> bool {
        self.clean_version != Some(self.version)
    }

    fn set_modified(&mut self, modified: bool) {
        self.clean_version = if modified { None } else { Some(self.version) };
        self.history.break_group();
    }

    fn take_modification_change(&mut self) -> Option<bool> {
        let now = self.is_modified();
        if now == self.reported_modified {
            return None;
        }
        self.reported_modified = now;
        Some(now)
    }

    fn font(&self) -> FontSpec {
        self.font
    }

    fn set_font(&mut self, font: FontSpec) {
        self.font = font;
    }

    fn alignment(&self) -> Alignment {
        self.paragraph_alignment(self.rope.char_to_line(self.cursor))
    }

    fn set_alignment(&mut self, alignment: Alignment) {
        let lines = self.selected_lines();
        if self.alignments[lines.clone()]
            .iter()
            .all(|a| *a == alignment)
        {
            return;
        }
        self.history.record(self.snapshot(), EditKind::Other);
        for slot in &mut self.alignments[lines] {
            *slot = alignment;
        }
        self.bump_version();
    }

    fn text_color(&self) -> TextColor {
        self.color
    }

    fn set_text_color(&mut self, color: TextColor) {
        self.color = color;
    }

    fn undo(&mut self) {
        if let Some(previous) = self.history.undo(self.snapshot()) {
            self.restore(previous);
        }
    }

    fn redo(&mut self) {
        if let Some(next) = self.history.redo(self.snapshot()) {
            self.restore(next);
        }
    }

    fn cut(&mut self) {
        let Some(range) = self.selection() else {
            return;
        };
        self.clipboard = self.rope.slice(range.clone()).to_string();
        self.clipboard_dirty = true;
        self.replace_range(range, "", EditKind::Other);
    }

    fn copy(&mut self) {
        if let Some(text) = self.selected_text() {
            self.clipboard = text;
            self.clipboard_dirty = true;
        }
    }

    fn paste(&mut self) {
        if self.clipboard.is_empty() {
            return;
        }
        let text = self.clipboard.clone();
        let range = self
            .selection()
            .unwrap_or(self.cursor..self.cursor);
        self.replace_range(range, &text, EditKind::Other);
    }

    fn render_source(&self, title: &str) -> PrintDocument {
        PrintDocument {
            title: title.to_string(),
            paragraphs: (0..self.rope.len_lines())
                .map(|line| Paragraph {
                    text: self.line_text(line),
                    alignment: self.paragraph_alignment(line),
                })
                .collect(),
            font: self.font,
            color: self.color,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/document.rs"]
mod tests;
