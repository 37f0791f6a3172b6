//! Terminal implementation of the [`Dialogs`] port.
//!
//! Every dialog is a [`Modal`] driven by a nested event loop over the last frame the
//! main window drew, so the editor stays visible behind it.

mod color;
mod confirm;
mod file;
mod font;
mod input;
mod preview;
mod printer;

pub use input::InputField;

use super::theme::UiTheme;
use crate::core::event::{EventSource, InputEvent, MouseEvent};
use crate::kernel::format::{FontSpec, TextColor};
use crate::kernel::print::PageSetup;
use crate::kernel::services::adapters::LocalFileProvider;
use crate::kernel::services::ports::{
    DiscardChoice, Dialogs, MessageKind, Picked, PreviewSource, PrinterSettings, SaveRequest,
};
use ratatui::backend::Backend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Clear, Widget};
use ratatui::{Frame, Terminal};
use std::io;
use std::path::PathBuf;
use unicode_width::UnicodeWidthStr;

pub(crate) enum ModalStep<T> {
    Continue,
    Done(T),
}

pub(crate) trait Modal {
    type Output;

    fn render(&self, frame: &mut Frame, area: Rect, theme: &UiTheme);

    fn handle(&mut self, event: &InputEvent, area: Rect) -> ModalStep<Self::Output>;

    /// Result when the loop is torn down (shutdown or terminal error).
    fn abort(&self) -> Self::Output;
}

pub struct TuiHost<B: Backend, E: EventSource> {
    terminal: Terminal<B>,
    events: E,
    theme: UiTheme,
    backdrop: Option<Buffer>,
    files: LocalFileProvider,
    last_dir: PathBuf,
    shutdown: bool,
}

impl<B: Backend, E: EventSource> TuiHost<B, E> {
    pub fn new(terminal: Terminal<B>, events: E, theme: UiTheme) -> Self {
        let last_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self {
            terminal,
            events,
            theme,
            backdrop: None,
            files: LocalFileProvider::new(),
            last_dir,
            shutdown: false,
        }
    }

    pub fn with_start_dir(mut self, dir: PathBuf) -> Self {
        self.last_dir = dir;
        self
    }

    pub fn theme(&self) -> &UiTheme {
        &self.theme
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    pub fn backend(&self) -> &B {
        self.terminal.backend()
    }

    pub fn next_event(&mut self) -> io::Result<InputEvent> {
        self.events.next_event()
    }

    /// Set once a modal saw a shutdown request; the main loop must exit.
    pub fn shutdown_requested(&self) -> bool {
        self.shutdown
    }

    pub fn request_shutdown(&mut self) {
        self.shutdown = true;
    }

    /// Draws the main window and keeps the result as the backdrop for dialogs.
    pub fn draw_window(&mut self, paint: impl FnOnce(&mut Frame, &UiTheme)) -> io::Result<()> {
        let theme = &self.theme;
        let completed = self.terminal.draw(|frame| paint(frame, theme))?;
        self.backdrop = Some(completed.buffer.clone());
        Ok(())
    }

    /// Returns the area the modal was laid out in.
    fn draw_modal<M: Modal>(&mut self, modal: &M) -> io::Result<Rect> {
        let backdrop = &self.backdrop;
        let theme = &self.theme;
        let completed = self.terminal.draw(|frame| {
            let area = frame.area();
            if let Some(backdrop) = backdrop {
                if backdrop.area == area {
                    frame.buffer_mut().clone_from(backdrop);
                }
            }
            modal.render(frame, area, theme);
        })?;
        Ok(completed.area)
    }

    pub(crate) fn run_modal<M: Modal>(&mut self, mut modal: M) -> M::Output {
        loop {
            let area = match self.draw_modal(&modal) {
                Ok(area) => area,
                Err(err) => {
                    tracing::warn!(error = %err, "dialog draw failed");
                    return modal.abort();
                }
            };
            let event = match self.events.next_event() {
                Ok(event) => event,
                Err(err) => {
                    tracing::warn!(error = %err, "dialog input failed");
                    return modal.abort();
                }
            };
            match event {
                InputEvent::Shutdown => {
                    self.shutdown = true;
                    return modal.abort();
                }
                // The next draw picks up the new size.
                InputEvent::Resize(..) => {}
                event => {
                    if let ModalStep::Done(value) = modal.handle(&event, area) {
                        return value;
                    }
                }
            }
        }
    }
}

impl<B: Backend, E: EventSource> Dialogs for TuiHost<B, E> {
    fn confirm_discard(&mut self, title: &str, message: &str) -> DiscardChoice {
        self.run_modal(confirm::DiscardModal::new(title, message))
    }

    fn open_path(&mut self, title: &str) -> Option<PathBuf> {
        let modal = file::FileModal::open(title, self.files, self.last_dir.clone());
        let picked = self.run_modal(modal);
        self.remember_dir(picked.as_ref());
        picked
    }

    fn save_path(&mut self, request: &SaveRequest) -> Option<PathBuf> {
        let modal = file::FileModal::save(request, self.files, self.last_dir.clone());
        let picked = self.run_modal(modal);
        self.remember_dir(picked.as_ref());
        picked
    }

    fn pick_font(&mut self, current: &FontSpec) -> Picked<FontSpec> {
        self.run_modal(font::FontModal::new(*current))
    }

    fn pick_color(&mut self, current: TextColor) -> Picked<TextColor> {
        self.run_modal(color::ColorModal::new(current))
    }

    fn pick_printer(&mut self, current: &PrinterSettings) -> Picked<PrinterSettings> {
        self.run_modal(printer::PrinterModal::new(current))
    }

    fn print_preview(&mut self, source: &dyn PreviewSource, setup: PageSetup) -> PageSetup {
        self.run_modal(preview::PreviewModal::new(source, setup))
    }

    fn message(&mut self, kind: MessageKind, title: &str, text: &str) {
        self.run_modal(confirm::MessageModal::new(kind, title, text))
    }
}

impl<B: Backend, E: EventSource> TuiHost<B, E> {
    fn remember_dir(&mut self, picked: Option<&PathBuf>) {
        if let Some(parent) = picked.and_then(|p| p.parent()) {
            if !parent.as_os_str().is_empty() {
                self.last_dir = parent.to_path_buf();
            }
        }
    }
}

// ==================== shared drawing ====================

pub(crate) fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + area.width.saturating_sub(width) / 2,
        area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    )
}

/// Clears `area`, draws the framed window and returns its inner rect.
pub(crate) fn dialog_frame(buf: &mut Buffer, area: Rect, title: &str, theme: &UiTheme) -> Rect {
    Clear.render(area, buf);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.dialog_border())
        .style(theme.dialog())
        .title(Span::styled(format!(" {title} "), theme.accent()));
    let inner = block.inner(area);
    block.render(area, buf);
    inner
}

pub(crate) fn contains(rect: Rect, mouse: &MouseEvent) -> bool {
    mouse.column >= rect.x
        && mouse.column < rect.right()
        && mouse.row >= rect.y
        && mouse.row < rect.bottom()
}

/// Button cells, centered on `row`.
pub(crate) fn button_rects(row: Rect, labels: &[&str]) -> Vec<Rect> {
    const GAP: u16 = 2;
    let widths: Vec<u16> = labels.iter().map(|l| l.width() as u16 + 4).collect();
    let total = widths.iter().sum::<u16>() + GAP * labels.len().saturating_sub(1) as u16;
    let mut x = row.x + row.width.saturating_sub(total) / 2;
    widths
        .into_iter()
        .map(|w| {
            let rect = Rect::new(x, row.y, w.min(row.right().saturating_sub(x)), 1);
            x = x.saturating_add(w + GAP);
            rect
        })
        .collect()
}

pub(crate) fn render_buttons(
    buf: &mut Buffer,
    row: Rect,
    labels: &[&str],
    focused: Option<usize>,
    theme: &UiTheme,
) {
    for (idx, (rect, label)) in button_rects(row, labels).into_iter().zip(labels).enumerate() {
        let style = if focused == Some(idx) {
            theme.menu_selected().add_modifier(Modifier::BOLD)
        } else {
            theme.dialog()
        };
        buf.set_stringn(
            rect.x,
            rect.y,
            format!("[ {label} ]"),
            rect.width as usize,
            style,
        );
    }
}

/// Writes `label` then the input's visible window, returning the cursor cell.
pub(crate) fn render_input(
    buf: &mut Buffer,
    row: Rect,
    label: &str,
    field: &InputField,
    focused: bool,
    theme: &UiTheme,
) -> Option<(u16, u16)> {
    let label_w = label.width() as u16;
    buf.set_stringn(row.x, row.y, label, row.width as usize, theme.dialog());
    let x = row.x + label_w.min(row.width);
    let width = row.right().saturating_sub(x);
    let style = if focused {
        Style::default().bg(theme.selection_bg).fg(theme.dialog_fg)
    } else {
        theme.muted()
    };
    buf.set_style(Rect::new(x, row.y, width, 1), style);
    let (visible, cursor_x) = field.window(width as usize);
    buf.set_stringn(x, row.y, visible, width as usize, style);
    (focused && width > 0).then(|| (x + cursor_x, row.y))
}

#[cfg(test)]
#[path = "../../../tests/unit/app/dialogs/mod.rs"]
mod tests;
