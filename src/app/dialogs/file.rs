//! Open/save path picker: a path input above a listing of the current directory.

use super::{
    button_rects, centered, contains, dialog_frame, render_buttons, render_input, InputField,
    Modal, ModalStep,
};
use crate::app::theme::UiTheme;
use crate::core::event::{InputEvent, KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use crate::kernel::services::ports::{DirEntry, FileFilter, FileProvider, SaveRequest};
use ratatui::layout::{Position, Rect};
use ratatui::Frame;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Open,
    Save,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Input,
    List,
}

const BUTTONS_OPEN: [&str; 2] = ["Open", "Cancel"];
const BUTTONS_SAVE: [&str; 2] = ["Save", "Cancel"];

struct Layout {
    window: Rect,
    dir_row: Rect,
    input_row: Rect,
    list: Rect,
    buttons: Rect,
}

fn layout(area: Rect) -> Layout {
    let window = centered(area, 72.min(area.width.saturating_sub(2)).max(30), 20);
    let inner = Rect::new(
        window.x + 2,
        window.y + 1,
        window.width.saturating_sub(4),
        window.height.saturating_sub(2),
    );
    let row = |offset: u16| Rect::new(inner.x, inner.y + offset, inner.width, 1);
    let list_height = inner.height.saturating_sub(6);
    Layout {
        window,
        dir_row: row(0),
        input_row: row(1),
        list: Rect::new(inner.x, inner.y + 3, inner.width, list_height),
        buttons: row(inner.height.saturating_sub(1)),
    }
}

pub(super) struct FileModal<F: FileProvider> {
    title: String,
    mode: Mode,
    filter: FileFilter,
    files: F,
    dir: PathBuf,
    entries: Vec<DirEntry>,
    input: InputField,
    focus: Focus,
    selected: usize,
    scroll: usize,
    error: Option<String>,
}

impl<F: FileProvider> FileModal<F> {
    pub(super) fn open(title: &str, files: F, dir: PathBuf) -> Self {
        let mut modal = Self::blank(title, Mode::Open, FileFilter::AllFiles, files, dir);
        modal.focus = Focus::List;
        modal.reload();
        modal
    }

    pub(super) fn save(request: &SaveRequest, files: F, fallback_dir: PathBuf) -> Self {
        let suggested_dir = request
            .suggested
            .as_deref()
            .and_then(Path::parent)
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf);
        let dir = suggested_dir.unwrap_or(fallback_dir);
        let mut modal = Self::blank(&request.title, Mode::Save, request.filter, files, dir);
        if let Some(name) = request.suggested.as_deref().and_then(Path::file_name) {
            modal.input.set_text(&name.to_string_lossy());
        }
        modal.reload();
        modal
    }

    fn blank(title: &str, mode: Mode, filter: FileFilter, files: F, dir: PathBuf) -> Self {
        Self {
            title: title.to_string(),
            mode,
            filter,
            files,
            dir,
            entries: Vec::new(),
            input: InputField::default(),
            focus: Focus::Input,
            selected: 0,
            scroll: 0,
            error: None,
        }
    }

    fn reload(&mut self) {
        self.selected = 0;
        self.scroll = 0;
        self.entries.clear();
        if let Some(parent) = self.dir.parent() {
            self.entries.push(DirEntry {
                name: "..".to_string(),
                path: parent.to_path_buf(),
                is_dir: true,
            });
        }
        match self.files.list_dir(&self.dir) {
            Ok(listing) => {
                self.error = None;
                self.entries.extend(
                    listing
                        .into_iter()
                        .filter(|e| e.is_dir || self.filter.accepts(&e.name)),
                );
            }
            Err(err) => self.error = Some(err.to_string()),
        }
    }

    fn enter_dir(&mut self, dir: PathBuf) {
        tracing::debug!(dir = %dir.display(), "file dialog changed directory");
        self.dir = dir;
        self.reload();
    }

    fn buttons(&self) -> &'static [&'static str; 2] {
        match self.mode {
            Mode::Open => &BUTTONS_OPEN,
            Mode::Save => &BUTTONS_SAVE,
        }
    }

    fn resolve_input(&self) -> Option<PathBuf> {
        let text = self.input.text().trim();
        if text.is_empty() {
            return None;
        }
        let path = PathBuf::from(text);
        Some(if path.is_absolute() {
            path
        } else {
            self.dir.join(path)
        })
    }

    fn submit_input(&mut self) -> ModalStep<Option<PathBuf>> {
        let Some(path) = self.resolve_input() else {
            return ModalStep::Continue;
        };
        if path.is_dir() {
            self.input.set_text("");
            self.enter_dir(path);
            return ModalStep::Continue;
        }
        ModalStep::Done(Some(path))
    }

    fn activate_entry(&mut self) -> ModalStep<Option<PathBuf>> {
        let Some(entry) = self.entries.get(self.selected).cloned() else {
            return ModalStep::Continue;
        };
        if entry.is_dir {
            self.enter_dir(entry.path);
            ModalStep::Continue
        } else {
            ModalStep::Done(Some(entry.path))
        }
    }

    fn select(&mut self, index: usize, list_height: usize) {
        if self.entries.is_empty() {
            return;
        }
        self.selected = index.min(self.entries.len() - 1);
        if self.selected < self.scroll {
            self.scroll = self.selected;
        } else if list_height > 0 && self.selected >= self.scroll + list_height {
            self.scroll = self.selected + 1 - list_height;
        }
        if let Some(entry) = self.entries.get(self.selected) {
            if !entry.is_dir && self.mode == Mode::Save {
                let name = entry.name.clone();
                self.input.set_text(&name);
            }
        }
    }

    fn handle_key(&mut self, key: &KeyEvent, list_height: usize) -> ModalStep<Option<PathBuf>> {
        match key.code {
            KeyCode::Esc => return ModalStep::Done(None),
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = match self.focus {
                    Focus::Input => Focus::List,
                    Focus::List => Focus::Input,
                };
                return ModalStep::Continue;
            }
            _ => {}
        }
        match self.focus {
            Focus::Input => {
                if key.code == KeyCode::Enter {
                    return self.submit_input();
                }
                if key.code == KeyCode::Down {
                    self.focus = Focus::List;
                } else {
                    self.input.handle_key(key);
                }
            }
            Focus::List => match key.code {
                KeyCode::Up => self.select(self.selected.saturating_sub(1), list_height),
                KeyCode::Down => self.select(self.selected + 1, list_height),
                KeyCode::PageUp => {
                    self.select(self.selected.saturating_sub(list_height.max(1)), list_height)
                }
                KeyCode::PageDown => self.select(self.selected + list_height.max(1), list_height),
                KeyCode::Home => self.select(0, list_height),
                KeyCode::End => self.select(usize::MAX, list_height),
                KeyCode::Enter => return self.activate_entry(),
                KeyCode::Backspace => {
                    if let Some(parent) = self.dir.parent().map(Path::to_path_buf) {
                        self.enter_dir(parent);
                    }
                }
                KeyCode::Char(_) if key.modifiers.is_text_input() => {
                    self.focus = Focus::Input;
                    self.input.handle_key(key);
                }
                _ => {}
            },
        }
        ModalStep::Continue
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent, layout: &Layout) -> ModalStep<Option<PathBuf>> {
        let list_height = layout.list.height as usize;
        match mouse.kind {
            MouseEventKind::ScrollUp => self.select(self.selected.saturating_sub(1), list_height),
            MouseEventKind::ScrollDown => self.select(self.selected + 1, list_height),
            MouseEventKind::Down(MouseButton::Left) => {
                if contains(layout.input_row, mouse) {
                    self.focus = Focus::Input;
                } else if contains(layout.list, mouse) {
                    let index = self.scroll + (mouse.row - layout.list.y) as usize;
                    if index < self.entries.len() {
                        self.focus = Focus::List;
                        if index == self.selected {
                            return self.activate_entry();
                        }
                        self.select(index, list_height);
                    }
                } else {
                    let hit = button_rects(layout.buttons, self.buttons())
                        .iter()
                        .position(|rect| contains(*rect, mouse));
                    match hit {
                        Some(0) => {
                            return if self.focus == Focus::List && self.input.is_empty() {
                                self.activate_entry()
                            } else {
                                self.submit_input()
                            };
                        }
                        Some(_) => return ModalStep::Done(None),
                        None => {}
                    }
                }
            }
            _ => {}
        }
        ModalStep::Continue
    }
}

impl<F: FileProvider> Modal for FileModal<F> {
    type Output = Option<PathBuf>;

    fn render(&self, frame: &mut Frame, area: Rect, theme: &UiTheme) {
        let layout = layout(area);
        let buf = frame.buffer_mut();
        dialog_frame(buf, layout.window, &self.title, theme);

        let dir = self.dir.display().to_string();
        buf.set_stringn(
            layout.dir_row.x,
            layout.dir_row.y,
            format!("In: {dir}"),
            layout.dir_row.width as usize,
            theme.muted(),
        );
        let cursor = render_input(
            buf,
            layout.input_row,
            "Name: ",
            &self.input,
            self.focus == Focus::Input,
            theme,
        );

        if let Some(error) = &self.error {
            buf.set_stringn(
                layout.list.x,
                layout.list.y,
                error,
                layout.list.width as usize,
                theme.dialog().fg(theme.error_fg),
            );
        }
        let offset = u16::from(self.error.is_some());
        for (row, entry) in self
            .entries
            .iter()
            .enumerate()
            .skip(self.scroll)
            .take(layout.list.height.saturating_sub(offset) as usize)
        {
            let y = layout.list.y + offset + (row - self.scroll) as u16;
            let style = if row == self.selected && self.focus == Focus::List {
                theme.menu_selected()
            } else if row == self.selected {
                theme.dialog().bg(theme.selection_bg)
            } else if entry.is_dir {
                theme.dialog().fg(theme.accent_fg)
            } else {
                theme.dialog()
            };
            let line = Rect::new(layout.list.x, y, layout.list.width, 1);
            buf.set_style(line, style);
            let name = if entry.is_dir {
                format!("{}/", entry.name)
            } else {
                entry.name.clone()
            };
            buf.set_stringn(line.x, y, name, line.width as usize, style);
        }

        let hint = format!("{}   Tab: switch focus", self.filter.label());
        let hint_row = layout.buttons.y.saturating_sub(1);
        buf.set_stringn(
            layout.buttons.x,
            hint_row,
            hint,
            layout.buttons.width as usize,
            theme.muted(),
        );
        render_buttons(buf, layout.buttons, self.buttons(), None, theme);

        if let Some((x, y)) = cursor {
            frame.set_cursor_position(Position::new(x, y));
        }
    }

    fn handle(&mut self, event: &InputEvent, area: Rect) -> ModalStep<Option<PathBuf>> {
        let layout = layout(area);
        match event {
            InputEvent::Key(key) => self.handle_key(key, layout.list.height as usize),
            InputEvent::Mouse(mouse) => self.handle_mouse(mouse, &layout),
            InputEvent::Paste(text) => {
                self.focus = Focus::Input;
                self.input.insert_str(text);
                ModalStep::Continue
            }
            _ => ModalStep::Continue,
        }
    }

    fn abort(&self) -> Option<PathBuf> {
        None
    }
}
