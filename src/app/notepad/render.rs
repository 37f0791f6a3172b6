use super::layout::{cell_width, RowLayout};
use crate::app::theme::UiTheme;
use crate::kernel::format::FontSpec;
use crate::kernel::services::ports::TextSurface;
use crate::kernel::DocumentSurface;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Widget;
use unicode_width::UnicodeWidthStr;

/// Screen rows: menu bar, editor, status bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct WindowLayout {
    pub menu: Rect,
    pub editor: Rect,
    pub status: Rect,
}

impl WindowLayout {
    pub fn split(area: Rect) -> Self {
        let menu = Rect::new(area.x, area.y, area.width, area.height.min(1));
        let status_h = u16::from(area.height >= 2);
        let status = Rect::new(area.x, area.bottom().saturating_sub(status_h), area.width, status_h);
        let editor = Rect::new(
            area.x,
            menu.bottom(),
            area.width,
            area.height.saturating_sub(menu.height + status_h),
        );
        Self { menu, editor, status }
    }
}

pub(crate) fn text_style(font: &FontSpec, color: ratatui::style::Color) -> Style {
    let mut style = Style::default().fg(color);
    if font.bold {
        style = style.add_modifier(Modifier::BOLD);
    }
    if font.italic {
        style = style.add_modifier(Modifier::ITALIC);
    }
    if font.underline {
        style = style.add_modifier(Modifier::UNDERLINED);
    }
    style
}

pub(crate) struct EditorView<'a> {
    pub doc: &'a DocumentSurface,
    pub rows: &'a [RowLayout],
    pub theme: &'a UiTheme,
    pub tab_size: u8,
}

impl Widget for EditorView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        buf.set_style(area, Style::default());
        let text = text_style(&self.doc.font(), self.theme.text_color(self.doc.text_color()));
        let selected_style = text.bg(self.theme.selection_bg);
        let selection = self.doc.selection();
        let is_selected = |idx: usize| selection.as_ref().is_some_and(|r| r.contains(&idx));

        for (i, row) in self.rows.iter().enumerate().take(area.height as usize) {
            let y = area.y + i as u16;
            let line_start = self.doc.rope().line_to_char(row.line);

            for (k, ch) in row.chars.iter().enumerate() {
                let x = row.xs[k];
                if x >= area.width {
                    break;
                }
                let abs = line_start + row.start + k;
                let style = if is_selected(abs) { selected_style } else { text };
                let next = row.xs[k + 1].min(area.width);

                if cell_width(*ch, self.tab_size) == 0 {
                    if x > 0 {
                        let cell = &mut buf[(area.x + x - 1, y)];
                        let symbol = format!("{}{}", cell.symbol(), ch);
                        cell.set_symbol(&symbol);
                    }
                    continue;
                }
                for cx in x..next {
                    buf[(area.x + cx, y)].set_char(' ').set_style(style);
                }
                if !ch.is_whitespace() {
                    let mut tmp = [0u8; 4];
                    let max = (area.width - x) as usize;
                    buf.set_stringn(area.x + x, y, ch.encode_utf8(&mut tmp), max, style);
                }
            }

            // Show a selected line break as one highlighted cell.
            if row.last && is_selected(line_start + row.end) {
                let x = row.xs.last().copied().unwrap_or(0);
                if x < area.width {
                    buf[(area.x + x, y)].set_char(' ').set_style(selected_style);
                }
            }
        }
    }
}

/// Cursor cell inside `area`, if the cursor row is visible.
pub(crate) fn cursor_cell(doc: &DocumentSurface, rows: &[RowLayout], area: Rect) -> Option<(u16, u16)> {
    if area.width == 0 {
        return None;
    }
    let (line, col) = doc.cursor_position();
    let idx = rows
        .iter()
        .position(|row| row.line == line && row.contains_col(col))?;
    let x = rows[idx].x_of(col).min(area.width - 1);
    Some((area.x + x, area.y + idx as u16))
}

pub(crate) struct StatusBar<'a> {
    pub left: &'a str,
    pub right: &'a str,
    pub theme: &'a UiTheme,
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        let style = self.theme.status();
        buf.set_style(area, style);
        let right_w = self.right.width() as u16;
        let right_x = area.right().saturating_sub(right_w + 1);
        let left_max = right_x.saturating_sub(area.x + 2) as usize;
        buf.set_stringn(area.x + 1, area.y, self.left, left_max, style);
        if right_x > area.x {
            buf.set_string(right_x, area.y, self.right, style);
        }
    }
}

/// Window title at the right end of the menu bar.
pub(crate) fn render_title(buf: &mut Buffer, bar: Rect, title: &str, reserved: u16, theme: &UiTheme) {
    let w = title.width() as u16;
    let x = bar.right().saturating_sub(w + 1);
    if x > bar.x + reserved {
        buf.set_string(x, bar.y, title, theme.menu());
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/app/notepad/render.rs"]
mod tests;
