//! Soft wrapping and the scroll position of the editor view.
//!
//! Paragraphs wrap at word boundaries to the view width; each visual row is then placed
//! according to its paragraph's alignment.

use crate::kernel::format::Alignment;
use crate::kernel::DocumentSurface;
use std::ops::Range;
use unicode_width::UnicodeWidthChar;

pub(crate) fn cell_width(ch: char, tab_size: u8) -> usize {
    if ch == '\t' {
        usize::from(tab_size.max(1))
    } else {
        UnicodeWidthChar::width(ch).unwrap_or(0)
    }
}

/// Char ranges of the visual rows of one paragraph. Never empty.
pub(crate) fn wrap_line(chars: &[char], width: usize, tab_size: u8) -> Vec<Range<usize>> {
    if width == 0 || chars.is_empty() {
        return vec![0..chars.len()];
    }

    let mut rows = Vec::new();
    let mut start = 0;
    let mut used = 0;
    let mut last_break: Option<usize> = None;

    for (i, &ch) in chars.iter().enumerate() {
        let w = cell_width(ch, tab_size);
        if ch == ' ' && used + w > width {
            // Trailing spaces may hang past the edge.
            rows.push(start..i + 1);
            start = i + 1;
            used = 0;
            last_break = None;
            continue;
        }
        while used + w > width && i > start {
            let brk = match last_break {
                Some(b) if b > start && b <= i => b,
                _ => i,
            };
            rows.push(start..brk);
            start = brk;
            last_break = None;
            used = chars[start..i].iter().map(|c| cell_width(*c, tab_size)).sum();
        }
        used += w;
        if ch == ' ' || ch == '\t' {
            last_break = Some(i + 1);
        }
    }
    rows.push(start..chars.len());
    rows
}

/// One visual row with the x offset of every char.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RowLayout {
    pub line: usize,
    pub start: usize,
    pub end: usize,
    pub last: bool,
    pub chars: Vec<char>,
    /// `xs[i]` is the column of `chars[i]`; the final entry is the column just past the row.
    pub xs: Vec<u16>,
}

impl RowLayout {
    /// Column for a char column of this row's paragraph.
    pub fn x_of(&self, col: usize) -> u16 {
        let idx = col.saturating_sub(self.start).min(self.xs.len().saturating_sub(1));
        self.xs.get(idx).copied().unwrap_or(0)
    }

    /// Char column nearest to the left of screen column `x`.
    pub fn col_at(&self, x: u16) -> usize {
        let n = self.chars.len();
        let mut col = 0;
        while col < n && self.xs[col + 1] <= x {
            col += 1;
        }
        // Land after a hanging space only when clicking past the row.
        let at_end_of_wrapped = col == n && !self.last && n > 0;
        self.start + if at_end_of_wrapped { n - 1 } else { col }
    }

    pub fn contains_col(&self, col: usize) -> bool {
        col >= self.start && (col < self.end || (self.last && col == self.end))
    }
}

fn place_row(
    line: usize,
    chars: &[char],
    range: Range<usize>,
    last: bool,
    alignment: Alignment,
    width: usize,
    tab_size: u8,
) -> RowLayout {
    let row = &chars[range.clone()];
    let widths: Vec<usize> = row.iter().map(|c| cell_width(*c, tab_size)).collect();
    let trimmed_len = row
        .iter()
        .rposition(|c| !c.is_whitespace())
        .map(|i| i + 1)
        .unwrap_or(0);
    let content: usize = widths[..trimmed_len].iter().sum();
    let slack = width.saturating_sub(content);

    let first_word = row.iter().position(|c| !c.is_whitespace()).unwrap_or(0);
    let gaps: Vec<usize> = (first_word..trimmed_len).filter(|&i| row[i] == ' ').collect();

    let (offset, mut extra_per_gap, mut remainder) = match alignment {
        Alignment::Left => (0, 0, 0),
        Alignment::Center => (slack / 2, 0, 0),
        Alignment::Right => (slack, 0, 0),
        Alignment::Justify if !last && !gaps.is_empty() => {
            (0, slack / gaps.len(), slack % gaps.len())
        }
        Alignment::Justify => (0, 0, 0),
    };
    if width == 0 {
        extra_per_gap = 0;
        remainder = 0;
    }

    let mut xs = Vec::with_capacity(row.len() + 1);
    let mut x = offset;
    for (i, w) in widths.iter().enumerate() {
        xs.push(x.min(u16::MAX as usize) as u16);
        x += w;
        if gaps.binary_search(&i).is_ok() {
            x += extra_per_gap;
            if remainder > 0 {
                x += 1;
                remainder -= 1;
            }
        }
    }
    xs.push(x.min(u16::MAX as usize) as u16);

    RowLayout {
        line,
        start: range.start,
        end: range.end,
        last,
        chars: row.to_vec(),
        xs,
    }
}

/// Every visual row of paragraph `line`.
pub(crate) fn layout_line(doc: &DocumentSurface, line: usize, width: usize, tab_size: u8) -> Vec<RowLayout> {
    let chars: Vec<char> = doc.line_text(line).chars().collect();
    let ranges = wrap_line(&chars, width, tab_size);
    let count = ranges.len();
    let alignment = doc.paragraph_alignment(line);
    ranges
        .into_iter()
        .enumerate()
        .map(|(idx, range)| place_row(line, &chars, range, idx + 1 == count, alignment, width, tab_size))
        .collect()
}

/// Top of the view as `(paragraph, row within paragraph)`.
/// Field order gives the top-to-bottom ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Viewport {
    pub line: usize,
    pub row: usize,
}

impl Viewport {
    fn row_count(doc: &DocumentSurface, line: usize, width: usize, tab_size: u8) -> usize {
        let chars: Vec<char> = doc.line_text(line).chars().collect();
        wrap_line(&chars, width, tab_size).len()
    }

    fn next(self, doc: &DocumentSurface, width: usize, tab_size: u8) -> Option<Self> {
        if self.row + 1 < Self::row_count(doc, self.line, width, tab_size) {
            Some(Self { line: self.line, row: self.row + 1 })
        } else if self.line + 1 < doc.line_count() {
            Some(Self { line: self.line + 1, row: 0 })
        } else {
            None
        }
    }

    fn prev(self, doc: &DocumentSurface, width: usize, tab_size: u8) -> Option<Self> {
        if self.row > 0 {
            Some(Self { line: self.line, row: self.row - 1 })
        } else if self.line > 0 {
            let line = self.line - 1;
            let rows = Self::row_count(doc, line, width, tab_size);
            Some(Self { line, row: rows.saturating_sub(1) })
        } else {
            None
        }
    }

    /// Keeps the top inside the document after edits or resizes.
    pub fn clamp(&mut self, doc: &DocumentSurface, width: usize, tab_size: u8) {
        let last = doc.line_count().saturating_sub(1);
        if self.line > last {
            self.line = last;
            self.row = 0;
        }
        let rows = Self::row_count(doc, self.line, width, tab_size);
        self.row = self.row.min(rows.saturating_sub(1));
    }

    pub fn scroll(&mut self, doc: &DocumentSurface, delta: isize, width: usize, tab_size: u8) {
        for _ in 0..delta.unsigned_abs() {
            let step = if delta < 0 {
                self.prev(doc, width, tab_size)
            } else {
                self.next(doc, width, tab_size)
            };
            match step {
                Some(next) => *self = next,
                None => break,
            }
        }
    }

    fn cursor_row(doc: &DocumentSurface, width: usize, tab_size: u8) -> Self {
        let (line, col) = doc.cursor_position();
        let rows = layout_line(doc, line, width, tab_size);
        let row = rows
            .iter()
            .position(|r| r.contains_col(col))
            .unwrap_or(rows.len().saturating_sub(1));
        Self { line, row }
    }

    /// Scrolls the minimum amount that brings the cursor row into a `height`-row view.
    pub fn follow_cursor(&mut self, doc: &DocumentSurface, width: usize, height: usize, tab_size: u8) {
        if height == 0 {
            return;
        }
        let target = Self::cursor_row(doc, width, tab_size);
        if target < *self {
            *self = target;
            return;
        }
        let mut probe = *self;
        for _ in 1..height {
            if probe == target {
                return;
            }
            match probe.next(doc, width, tab_size) {
                Some(next) => probe = next,
                None => return,
            }
        }
        if probe == target {
            return;
        }
        let mut top = target;
        for _ in 1..height {
            match top.prev(doc, width, tab_size) {
                Some(prev) => top = prev,
                None => break,
            }
        }
        *self = top;
    }

    /// Rows visible from the top, at most `height`.
    pub(crate) fn rows(&self, doc: &DocumentSurface, width: usize, height: usize, tab_size: u8) -> Vec<RowLayout> {
        let mut out = Vec::with_capacity(height);
        let mut line = self.line;
        let mut skip = self.row;
        while out.len() < height && line < doc.line_count() {
            out.extend(
                layout_line(doc, line, width, tab_size)
                    .into_iter()
                    .skip(skip)
                    .take(height - out.len()),
            );
            skip = 0;
            line += 1;
        }
        out
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/app/notepad/layout.rs"]
mod tests;
