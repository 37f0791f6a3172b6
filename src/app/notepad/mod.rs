//! The main window: menu bar, editing surface and status bar, plus the event loop that
//! routes input to the menu, the document or the controller.

mod layout;
mod render;

pub use layout::Viewport;

use self::layout::RowLayout;
use self::render::{cursor_cell, render_title, EditorView, StatusBar, WindowLayout};
use super::dialogs::TuiHost;
use super::menu::{MenuAction, MenuBar};
use crate::core::event::{
    EventSource, InputEvent, Key, KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind,
};
use crate::core::Command;
use crate::kernel::format::Alignment;
use crate::kernel::services::adapters::{KeybindingService, LocalFileProvider, SystemPrintDevice};
use crate::kernel::services::ports::{PrintDevice, TextSurface};
use crate::kernel::{DocumentSurface, EditorController, Outcome};
use crate::tui::Osc52Clipboard;
use ratatui::backend::Backend;
use ratatui::layout::{Position, Rect};
use ratatui::widgets::Widget;
use std::io;

const SCROLL_STEP: isize = 3;

pub type NotepadController<B, E, P = SystemPrintDevice> =
    EditorController<DocumentSurface, TuiHost<B, E>, P, LocalFileProvider>;

pub struct Notepad<B: Backend, E: EventSource, P: PrintDevice = SystemPrintDevice> {
    controller: NotepadController<B, E, P>,
    keybindings: KeybindingService,
    menu: MenuBar,
    viewport: Viewport,
    tab_size: u8,
    clipboard_mirror: Option<Osc52Clipboard>,
    terminal_title: bool,
    last_title: String,
    status: Option<String>,
    /// Geometry of the last frame, for mouse hit-testing.
    layout: WindowLayout,
    rows: Vec<RowLayout>,
    follow_cursor: bool,
    should_quit: bool,
}

impl<B: Backend, E: EventSource, P: PrintDevice> Notepad<B, E, P> {
    pub fn new(controller: NotepadController<B, E, P>, keybindings: KeybindingService) -> Self {
        Self {
            controller,
            keybindings,
            menu: MenuBar::new(),
            viewport: Viewport::default(),
            tab_size: 4,
            clipboard_mirror: None,
            terminal_title: false,
            last_title: String::new(),
            status: None,
            layout: WindowLayout::default(),
            rows: Vec::new(),
            follow_cursor: true,
            should_quit: false,
        }
    }

    pub fn with_tab_size(mut self, tab_size: u8) -> Self {
        self.tab_size = tab_size.max(1);
        self
    }

    /// Mirrors cut/copy into the terminal's clipboard.
    pub fn with_clipboard_mirror(mut self, clipboard: Osc52Clipboard) -> Self {
        self.clipboard_mirror = Some(clipboard);
        self
    }

    /// Keeps the terminal window title in sync with the document.
    pub fn with_terminal_title(mut self, enabled: bool) -> Self {
        self.terminal_title = enabled;
        self
    }

    pub fn controller(&self) -> &NotepadController<B, E, P> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut NotepadController<B, E, P> {
        &mut self.controller
    }

    pub fn menu(&self) -> &MenuBar {
        &self.menu
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn run(&mut self) -> io::Result<()> {
        tracing::info!("editor loop started");
        while !self.should_quit {
            self.draw()?;
            let event = self.controller.dialogs_mut().next_event()?;
            self.handle_event(event);
        }
        tracing::info!("editor loop finished");
        Ok(())
    }

    pub fn draw(&mut self) -> io::Result<()> {
        let title = self.controller.window_title();
        if self.terminal_title && title != self.last_title {
            if let Err(err) = crate::tui::terminal_guard::set_title(&title) {
                tracing::debug!(error = %err, "cannot set terminal title");
            }
        }
        self.last_title = title;

        let status_left = self.status_left();
        let status_right = self.status_right();
        let tab_size = self.tab_size;
        let follow = std::mem::take(&mut self.follow_cursor);

        let menu = &self.menu;
        let keys = &self.keybindings;
        let viewport = &mut self.viewport;
        let rows = &mut self.rows;
        let window = &mut self.layout;
        let last_title = &self.last_title;
        let (doc, host) = self.controller.parts_mut();
        let doc: &DocumentSurface = doc;

        host.draw_window(|frame, theme| {
            let area = frame.area();
            let split = WindowLayout::split(area);
            *window = split;

            let width = split.editor.width as usize;
            let height = split.editor.height as usize;
            viewport.clamp(doc, width, tab_size);
            if follow {
                viewport.follow_cursor(doc, width, height, tab_size);
            }
            *rows = viewport.rows(doc, width, height, tab_size);

            let buf = frame.buffer_mut();
            EditorView {
                doc,
                rows: rows.as_slice(),
                theme,
                tab_size,
            }
            .render(split.editor, buf);
            StatusBar {
                left: &status_left,
                right: &status_right,
                theme,
            }
            .render(split.status, buf);

            menu.render_bar(split.menu, buf, theme);
            let reserved = menu
                .title_spans(split.menu)
                .last()
                .map(|(_, end)| end.saturating_sub(split.menu.x))
                .unwrap_or(0);
            render_title(buf, split.menu, last_title, reserved + 2, theme);

            let alignment = doc.alignment();
            let font = doc.font();
            menu.render_dropdown(area, buf, theme, keys, |command| match command {
                Command::ToggleBold => font.bold,
                Command::ToggleItalic => font.italic,
                Command::ToggleUnderline => font.underline,
                Command::AlignLeft => alignment == Alignment::Left,
                Command::AlignCenter => alignment == Alignment::Center,
                Command::AlignRight => alignment == Alignment::Right,
                Command::AlignJustify => alignment == Alignment::Justify,
                _ => false,
            });

            if !menu.is_open() {
                if let Some((x, y)) = cursor_cell(doc, rows.as_slice(), split.editor) {
                    frame.set_cursor_position(Position::new(x, y));
                }
            }
        })
    }

    fn status_left(&self) -> String {
        match &self.status {
            Some(message) => message.clone(),
            None => {
                let marker = if self.controller.is_modified() { " [modified]" } else { "" };
                format!("{}{}", self.controller.document_name(), marker)
            }
        }
    }

    fn status_right(&self) -> String {
        let doc = self.controller.surface();
        let (line, col) = doc.cursor_position();
        let font = doc.font();
        format!(
            "Ln {}, Col {} | {} {} | {} | {}",
            line + 1,
            col + 1,
            font,
            font.style_flags(),
            doc.alignment().name(),
            doc.text_color(),
        )
    }

    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::Shutdown => {
                if self.controller.is_modified() {
                    tracing::warn!("shutdown requested with unsaved changes");
                } else {
                    tracing::info!("shutdown requested");
                }
                self.should_quit = true;
            }
            InputEvent::Key(key) => {
                if !key.is_release() {
                    self.handle_key(key);
                }
            }
            InputEvent::Mouse(mouse) => self.handle_mouse(mouse),
            InputEvent::Paste(text) => {
                if !self.menu.is_open() {
                    self.status = None;
                    self.controller.surface_mut().insert_str(&text);
                    self.follow_cursor = true;
                }
            }
            InputEvent::Resize(..) => self.follow_cursor = true,
            InputEvent::FocusGained | InputEvent::FocusLost => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if self.menu.is_open() {
            let action = self.menu.handle_key(&key);
            self.apply_menu_action(action);
            return;
        }

        let normalized = Key::from(key);
        if let Some(command) = self.keybindings.resolve(&normalized) {
            self.execute(command);
            return;
        }

        match key.code {
            KeyCode::Char(ch) if key.modifiers.is_text_input() => {
                self.status = None;
                self.controller.surface_mut().insert_char(ch);
                self.follow_cursor = true;
            }
            KeyCode::Char(ch) if key.modifiers.contains(crate::core::KeyModifiers::ALT) => {
                if let Some(index) = self.menu.mnemonic_index(ch) {
                    self.menu.open(index);
                }
            }
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let screen = Rect::new(
            self.layout.menu.x,
            self.layout.menu.y,
            self.layout.menu.width,
            self.layout.status.bottom().saturating_sub(self.layout.menu.y),
        );
        let action = self.menu.handle_mouse(&mouse, screen, &self.keybindings);
        if action != MenuAction::Ignored {
            self.apply_menu_action(action);
            return;
        }

        let editor = self.layout.editor;
        let width = editor.width as usize;
        match mouse.kind {
            MouseEventKind::ScrollUp => {
                let doc = self.controller.surface();
                self.viewport.scroll(doc, -SCROLL_STEP, width, self.tab_size);
            }
            MouseEventKind::ScrollDown => {
                let doc = self.controller.surface();
                self.viewport.scroll(doc, SCROLL_STEP, width, self.tab_size);
            }
            MouseEventKind::Down(MouseButton::Left) | MouseEventKind::Drag(MouseButton::Left) => {
                let extend = matches!(mouse.kind, MouseEventKind::Drag(_));
                if let Some((line, col)) = self.hit_test(mouse.column, mouse.row, extend) {
                    self.controller
                        .surface_mut()
                        .set_cursor_position(line, col, extend);
                    self.follow_cursor = true;
                }
            }
            _ => {}
        }
    }

    /// `(line, col)` under a screen cell. Drags clamp to the nearest visible row.
    fn hit_test(&self, column: u16, row: u16, clamp: bool) -> Option<(usize, usize)> {
        let editor = self.layout.editor;
        let inside_rows = row >= editor.y && row < editor.bottom();
        if !clamp && (!inside_rows || column < editor.x || column >= editor.right()) {
            return None;
        }
        if self.rows.is_empty() {
            return None;
        }
        let idx = (row.saturating_sub(editor.y) as usize).min(self.rows.len() - 1);
        let visual = &self.rows[idx];
        let x = column.saturating_sub(editor.x);
        Some((visual.line, visual.col_at(x)))
    }

    fn apply_menu_action(&mut self, action: MenuAction) {
        if let MenuAction::Execute(command) = action {
            self.execute(command);
        }
    }

    fn page_rows(&self) -> isize {
        (self.layout.editor.height as isize - 1).max(1)
    }

    pub fn execute(&mut self, command: Command) {
        tracing::debug!(command = command.name(), "execute");
        self.status = None;
        match command {
            Command::NewDocument => {
                if self.controller.new_document().is_completed() {
                    self.viewport = Viewport::default();
                }
            }
            Command::OpenDocument => {
                if let Outcome::Completed(path) = self.controller.open_document() {
                    self.viewport = Viewport::default();
                    self.status = Some(format!("Opened {}", path.display()));
                }
            }
            Command::SaveDocument => {
                if let Outcome::Completed(path) = self.controller.save_document() {
                    self.status = Some(format!("Saved {}", path.display()));
                }
            }
            Command::PrintDocument => {
                if self.controller.print_document().is_completed() {
                    self.status = Some("Sent to printer".to_string());
                }
            }
            Command::PrintPreview => self.controller.print_preview(),
            Command::ExportPdf => {
                if let Outcome::Completed(path) = self.controller.export_pdf() {
                    self.status = Some(format!("Exported {}", path.display()));
                }
            }
            Command::Quit => {
                if self.controller.request_quit() {
                    self.should_quit = true;
                }
            }
            Command::Undo => self.controller.undo(),
            Command::Redo => self.controller.redo(),
            Command::Cut => self.controller.cut(),
            Command::Copy => self.controller.copy(),
            Command::Paste => self.controller.paste(),
            Command::SelectAll => self.controller.surface_mut().select_all(),
            Command::ToggleBold => {
                self.controller.toggle_bold();
            }
            Command::ToggleItalic => {
                self.controller.toggle_italic();
            }
            Command::ToggleUnderline => {
                self.controller.toggle_underline();
            }
            Command::AlignLeft => self.controller.set_alignment(Alignment::Left),
            Command::AlignCenter => self.controller.set_alignment(Alignment::Center),
            Command::AlignRight => self.controller.set_alignment(Alignment::Right),
            Command::AlignJustify => self.controller.set_alignment(Alignment::Justify),
            Command::PickFont => {
                self.controller.pick_font();
            }
            Command::PickColor => {
                self.controller.pick_color();
            }
            Command::About => self.controller.show_about(),
            Command::OpenMenu => self.menu.open(0),
            Command::CursorLeft => self.controller.surface_mut().move_left(false),
            Command::CursorRight => self.controller.surface_mut().move_right(false),
            Command::CursorUp => self.controller.surface_mut().move_up(false),
            Command::CursorDown => self.controller.surface_mut().move_down(false),
            Command::CursorLineStart => self.controller.surface_mut().move_line_start(false),
            Command::CursorLineEnd => self.controller.surface_mut().move_line_end(false),
            Command::CursorFileStart => self.controller.surface_mut().move_document_start(false),
            Command::CursorFileEnd => self.controller.surface_mut().move_document_end(false),
            Command::PageUp => {
                let rows = self.page_rows();
                self.controller.surface_mut().move_vertical(-rows, false);
            }
            Command::PageDown => {
                let rows = self.page_rows();
                self.controller.surface_mut().move_vertical(rows, false);
            }
            Command::SelectLeft => self.controller.surface_mut().move_left(true),
            Command::SelectRight => self.controller.surface_mut().move_right(true),
            Command::SelectUp => self.controller.surface_mut().move_up(true),
            Command::SelectDown => self.controller.surface_mut().move_down(true),
            Command::SelectLineStart => self.controller.surface_mut().move_line_start(true),
            Command::SelectLineEnd => self.controller.surface_mut().move_line_end(true),
            Command::InsertNewline => self.controller.surface_mut().insert_newline(),
            Command::InsertTab => self.controller.surface_mut().insert_tab(),
            Command::DeleteBackward => self.controller.surface_mut().delete_backward(),
            Command::DeleteForward => self.controller.surface_mut().delete_forward(),
        }
        self.follow_cursor = true;
        self.sync_clipboard();
        if self.controller.dialogs().shutdown_requested() {
            self.should_quit = true;
        }
    }

    fn sync_clipboard(&mut self) {
        let Some(text) = self.controller.surface_mut().take_clipboard_update() else {
            return;
        };
        if let Some(mirror) = &self.clipboard_mirror {
            if let Err(err) = mirror.copy(&text) {
                tracing::warn!(error = %err, "clipboard mirror failed");
            }
        }
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/app/notepad/mod.rs"]
mod tests;
