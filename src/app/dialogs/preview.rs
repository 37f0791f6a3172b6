//! Live print preview. Pages are re-laid out whenever paper or orientation changes.

use super::{centered, dialog_frame, Modal, ModalStep};
use crate::app::theme::UiTheme;
use crate::core::event::{InputEvent, KeyCode, MouseButton, MouseEventKind};
use crate::kernel::print::{PageLayout, PageSetup};
use crate::kernel::services::ports::PreviewSource;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::Frame;

/// Terminal cells are roughly twice as tall as they are wide.
const CELL_ASPECT: f32 = 2.0;

pub(super) struct PreviewModal<'a> {
    source: &'a dyn PreviewSource,
    setup: PageSetup,
    pages: Vec<PageLayout>,
    page: usize,
}

impl<'a> PreviewModal<'a> {
    pub(super) fn new(source: &'a dyn PreviewSource, setup: PageSetup) -> Self {
        let pages = source.render(&setup);
        Self {
            source,
            setup,
            pages,
            page: 0,
        }
    }

    fn relayout(&mut self) {
        self.pages = self.source.render(&self.setup);
        self.page = self.page.min(self.pages.len().saturating_sub(1));
        tracing::debug!(
            paper = self.setup.paper.name(),
            orientation = self.setup.orientation.name(),
            pages = self.pages.len(),
            "preview relaid"
        );
    }

    fn step(&mut self, delta: isize) {
        let last = self.pages.len().saturating_sub(1) as isize;
        self.page = (self.page as isize + delta).clamp(0, last) as usize;
    }

    fn header(&self) -> String {
        format!(
            "Page {}/{}  {} {}",
            self.page + 1,
            self.pages.len().max(1),
            self.setup.paper.name(),
            self.setup.orientation.name(),
        )
    }
}

/// Page rectangle in cells, fitted into `area` and centered.
fn page_rect(page: &PageLayout, area: Rect) -> (Rect, f32) {
    if page.width <= 0.0 || page.height <= 0.0 || area.width == 0 || area.height == 0 {
        return (Rect::new(area.x, area.y, 0, 0), 0.0);
    }
    let scale = (f32::from(area.width) / page.width)
        .min(f32::from(area.height) * CELL_ASPECT / page.height);
    let width = ((page.width * scale).round() as u16).clamp(1, area.width);
    let height = ((page.height * scale / CELL_ASPECT).round() as u16).clamp(1, area.height);
    (centered(area, width, height), scale)
}

fn paint_page(buf: &mut Buffer, page: &PageLayout, area: Rect, ink: Style) {
    let (rect, scale) = page_rect(page, area);
    if rect.width == 0 {
        return;
    }
    let paper = Style::default().bg(Color::White).fg(Color::Black);
    buf.set_style(rect, paper);
    for y in rect.y..rect.bottom() {
        for x in rect.x..rect.right() {
            buf[(x, y)].set_char(' ');
        }
    }

    let mut used_rows = vec![false; rect.height as usize];
    for line in &page.lines {
        // PDF baselines count from the bottom edge.
        let row = ((page.height - line.y) * scale / CELL_ASPECT).floor() as i32;
        let col = (line.x * scale).floor() as i32;
        if row < 0 || row >= i32::from(rect.height) || col >= i32::from(rect.width) {
            continue;
        }
        let row = row as usize;
        if used_rows[row] || line.text.trim().is_empty() {
            continue;
        }
        used_rows[row] = true;
        let x = rect.x + col.max(0) as u16;
        let max = rect.right().saturating_sub(x) as usize;
        buf.set_stringn(x, rect.y + row as u16, &line.text, max, ink.bg(Color::White));
    }
}

impl Modal for PreviewModal<'_> {
    type Output = PageSetup;

    fn render(&self, frame: &mut Frame, area: Rect, theme: &UiTheme) {
        let window = centered(
            area,
            area.width.saturating_sub(4).max(20),
            area.height.saturating_sub(2).max(8),
        );
        let buf = frame.buffer_mut();
        let inner = dialog_frame(buf, window, "Print Preview", theme);
        if inner.height < 3 {
            return;
        }

        buf.set_stringn(inner.x + 1, inner.y, self.header(), inner.width as usize, theme.accent());
        let hint = "PgUp/PgDn page  O orientation  P paper  Esc close";
        buf.set_stringn(
            inner.x + 1,
            inner.bottom() - 1,
            hint,
            inner.width.saturating_sub(1) as usize,
            theme.muted(),
        );

        let body = Rect::new(
            inner.x + 1,
            inner.y + 1,
            inner.width.saturating_sub(2),
            inner.height.saturating_sub(2),
        );
        if let Some(page) = self.pages.get(self.page) {
            paint_page(buf, page, body, Style::default().fg(Color::Black));
        }
    }

    fn handle(&mut self, event: &InputEvent, _area: Rect) -> ModalStep<PageSetup> {
        match event {
            InputEvent::Key(key) => match key.code {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => {
                    return ModalStep::Done(self.setup)
                }
                KeyCode::PageDown | KeyCode::Right | KeyCode::Down | KeyCode::Char('n') => {
                    self.step(1)
                }
                KeyCode::PageUp | KeyCode::Left | KeyCode::Up => self.step(-1),
                KeyCode::Home => self.page = 0,
                KeyCode::End => self.page = self.pages.len().saturating_sub(1),
                KeyCode::Char('o') | KeyCode::Char('O') => {
                    self.setup.orientation = self.setup.orientation.toggled();
                    self.relayout();
                }
                KeyCode::Char('p') | KeyCode::Char('P') => {
                    self.setup.paper = self.setup.paper.toggled();
                    self.relayout();
                }
                _ => {}
            },
            InputEvent::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollDown => self.step(1),
                MouseEventKind::ScrollUp => self.step(-1),
                MouseEventKind::Down(MouseButton::Right) => return ModalStep::Done(self.setup),
                _ => {}
            },
            _ => {}
        }
        ModalStep::Continue
    }

    fn abort(&self) -> PageSetup {
        self.setup
    }
}
