//! Paginates a [`PrintDocument`] using fixed-advance font metrics.

use super::{PageSetup, PrintDocument};
use crate::kernel::format::Alignment;

pub const LINE_HEIGHT_FACTOR: f32 = 1.2;
const TAB_WIDTH: usize = 4;

/// One line of text placed on a page. `y` is the baseline in PDF coordinates
/// (origin bottom-left).
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub x: f32,
    pub y: f32,
    pub text: String,
    /// Extra space added to every U+0020 when the line is justified.
    pub word_spacing: f32,
    /// Rendered width including any justification spacing.
    pub width: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub width: f32,
    pub height: f32,
    pub lines: Vec<PlacedLine>,
}

impl PageLayout {
    pub fn is_blank(&self) -> bool {
        self.lines.iter().all(|l| l.text.trim().is_empty())
    }
}

struct WrappedLine {
    text: String,
    alignment: Alignment,
    last_in_paragraph: bool,
}

/// Lays out every paragraph of `doc` onto pages described by `setup`.
///
/// Always returns at least one page.
pub fn paginate(doc: &PrintDocument, setup: &PageSetup) -> Vec<PageLayout> {
    let (page_w, page_h) = setup.page_size();
    let size = f32::from(doc.font.size_pt);
    let advance = doc.font.family.advance_em() * size;
    let line_height = size * LINE_HEIGHT_FACTOR;

    let avail_w = setup.printable_width();
    let max_chars = ((avail_w / advance).floor() as usize).max(1);
    let lines_per_page = ((setup.printable_height() / line_height).floor() as usize).max(1);

    let mut wrapped = Vec::new();
    for paragraph in &doc.paragraphs {
        let text = expand_tabs(paragraph.text.trim_end_matches('\r'));
        let pieces = wrap(&text, max_chars);
        let count = pieces.len();
        for (idx, piece) in pieces.into_iter().enumerate() {
            wrapped.push(WrappedLine {
                text: piece,
                alignment: paragraph.alignment,
                last_in_paragraph: idx + 1 == count,
            });
        }
    }

    let mut pages = Vec::new();
    for chunk in wrapped.chunks(lines_per_page) {
        let lines = chunk
            .iter()
            .enumerate()
            .map(|(row, line)| {
                let y = page_h - setup.margin_pt - size - row as f32 * line_height;
                place(line, setup.margin_pt, y, avail_w, advance)
            })
            .collect();
        pages.push(PageLayout {
            width: page_w,
            height: page_h,
            lines,
        });
    }

    if pages.is_empty() {
        pages.push(PageLayout {
            width: page_w,
            height: page_h,
            lines: Vec::new(),
        });
    }
    pages
}

fn place(line: &WrappedLine, margin: f32, y: f32, avail_w: f32, advance: f32) -> PlacedLine {
    let natural = line.text.chars().count() as f32 * advance;
    let slack = (avail_w - natural).max(0.0);
    let gaps = line.text.chars().filter(|c| *c == ' ').count();

    let (x, word_spacing, width) = match line.alignment {
        Alignment::Left => (margin, 0.0, natural),
        Alignment::Right => (margin + slack, 0.0, natural),
        Alignment::Center => (margin + slack / 2.0, 0.0, natural),
        Alignment::Justify if !line.last_in_paragraph && gaps > 0 => {
            (margin, slack / gaps as f32, avail_w)
        }
        Alignment::Justify => (margin, 0.0, natural),
    };

    PlacedLine {
        x,
        y,
        text: line.text.clone(),
        word_spacing,
        width,
    }
}

fn expand_tabs(text: &str) -> String {
    if !text.contains('\t') {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len() + 8);
    let mut col = 0usize;
    for ch in text.chars() {
        if ch == '\t' {
            let pad = TAB_WIDTH - col % TAB_WIDTH;
            out.extend(std::iter::repeat(' ').take(pad));
            col += pad;
        } else {
            out.push(ch);
            col += 1;
        }
    }
    out
}

/// Greedy word wrap at spaces; words longer than a line are split hard.
pub(crate) fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut rest: Vec<char> = text.chars().collect();
    let mut out = Vec::new();

    while rest.len() > max_chars {
        let window = &rest[..=max_chars];
        let (line, skip) = match window.iter().rposition(|c| *c == ' ') {
            Some(pos) if pos > 0 => (rest[..pos].iter().collect::<String>(), pos + 1),
            _ => (rest[..max_chars].iter().collect::<String>(), max_chars),
        };
        out.push(line.trim_end_matches(' ').to_string());
        rest.drain(..skip);
    }

    out.push(rest.into_iter().collect());
    out
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/print/layout.rs"]
mod tests;
