//! Menu bar model and its drop-down rendering.

use super::theme::UiTheme;
use crate::core::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use crate::core::Command;
use crate::kernel::services::adapters::KeybindingService;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Clear, Widget};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEntry {
    Item {
        label: &'static str,
        command: Command,
    },
    Separator,
}

impl MenuEntry {
    const fn item(label: &'static str, command: Command) -> Self {
        MenuEntry::Item { label, command }
    }

    pub fn command(&self) -> Option<Command> {
        match self {
            MenuEntry::Item { command, .. } => Some(*command),
            MenuEntry::Separator => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Menu {
    pub title: &'static str,
    /// Opened with Alt+mnemonic.
    pub mnemonic: char,
    pub entries: Vec<MenuEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    /// Event consumed, nothing to run.
    None,
    Execute(Command),
    Closed,
    /// Event was outside the menu and should be handled by the editor.
    Ignored,
}

const TITLE_GAP: u16 = 2;

fn default_menus() -> Vec<Menu> {
    use MenuEntry::Separator;
    vec![
        Menu {
            title: "File",
            mnemonic: 'f',
            entries: vec![
                MenuEntry::item("New", Command::NewDocument),
                MenuEntry::item("Open...", Command::OpenDocument),
                MenuEntry::item("Save...", Command::SaveDocument),
                Separator,
                MenuEntry::item("Print...", Command::PrintDocument),
                MenuEntry::item("Print Preview", Command::PrintPreview),
                MenuEntry::item("Export PDF...", Command::ExportPdf),
                Separator,
                MenuEntry::item("Quit", Command::Quit),
            ],
        },
        Menu {
            title: "Edit",
            mnemonic: 'e',
            entries: vec![
                MenuEntry::item("Undo", Command::Undo),
                MenuEntry::item("Redo", Command::Redo),
                Separator,
                MenuEntry::item("Cut", Command::Cut),
                MenuEntry::item("Copy", Command::Copy),
                MenuEntry::item("Paste", Command::Paste),
                Separator,
                MenuEntry::item("Select All", Command::SelectAll),
            ],
        },
        Menu {
            title: "Format",
            mnemonic: 'o',
            entries: vec![
                MenuEntry::item("Bold", Command::ToggleBold),
                MenuEntry::item("Italic", Command::ToggleItalic),
                MenuEntry::item("Underline", Command::ToggleUnderline),
                Separator,
                MenuEntry::item("Align Left", Command::AlignLeft),
                MenuEntry::item("Align Center", Command::AlignCenter),
                MenuEntry::item("Align Right", Command::AlignRight),
                MenuEntry::item("Justify", Command::AlignJustify),
                Separator,
                MenuEntry::item("Font...", Command::PickFont),
                MenuEntry::item("Color...", Command::PickColor),
            ],
        },
        Menu {
            title: "Help",
            mnemonic: 'h',
            entries: vec![MenuEntry::item("About", Command::About)],
        },
    ]
}

#[derive(Debug, Clone)]
pub struct MenuBar {
    menus: Vec<Menu>,
    open: Option<usize>,
    selected: usize,
}

impl Default for MenuBar {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuBar {
    pub fn new() -> Self {
        Self {
            menus: default_menus(),
            open: None,
            selected: 0,
        }
    }

    pub fn menus(&self) -> &[Menu] {
        &self.menus
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn open_index(&self) -> Option<usize> {
        self.open
    }

    pub fn selected_entry(&self) -> Option<&MenuEntry> {
        self.open
            .and_then(|menu| self.menus.get(menu))
            .and_then(|menu| menu.entries.get(self.selected))
    }

    pub fn open(&mut self, index: usize) {
        if index < self.menus.len() {
            self.open = Some(index);
            self.selected = self.first_item(index);
        }
    }

    pub fn close(&mut self) {
        self.open = None;
        self.selected = 0;
    }

    /// Alt+letter lookup.
    pub fn mnemonic_index(&self, ch: char) -> Option<usize> {
        let ch = ch.to_ascii_lowercase();
        self.menus.iter().position(|menu| menu.mnemonic == ch)
    }

    fn first_item(&self, menu: usize) -> usize {
        self.menus[menu]
            .entries
            .iter()
            .position(|e| e.command().is_some())
            .unwrap_or(0)
    }

    fn step_menu(&mut self, delta: isize) {
        let Some(open) = self.open else {
            return;
        };
        let len = self.menus.len() as isize;
        let next = (open as isize + delta).rem_euclid(len) as usize;
        self.open(next);
    }

    fn step_item(&mut self, delta: isize) {
        let Some(open) = self.open else {
            return;
        };
        let entries = &self.menus[open].entries;
        let len = entries.len() as isize;
        let mut idx = self.selected as isize;
        for _ in 0..len {
            idx = (idx + delta).rem_euclid(len);
            if entries[idx as usize].command().is_some() {
                self.selected = idx as usize;
                return;
            }
        }
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> MenuAction {
        if self.open.is_none() {
            return MenuAction::Ignored;
        }
        match key.code {
            KeyCode::Esc | KeyCode::F(10) => {
                self.close();
                MenuAction::Closed
            }
            KeyCode::Left => {
                self.step_menu(-1);
                MenuAction::None
            }
            KeyCode::Right => {
                self.step_menu(1);
                MenuAction::None
            }
            KeyCode::Up => {
                self.step_item(-1);
                MenuAction::None
            }
            KeyCode::Down => {
                self.step_item(1);
                MenuAction::None
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.activate_selected(),
            _ => MenuAction::None,
        }
    }

    fn activate_selected(&mut self) -> MenuAction {
        match self.selected_entry().and_then(MenuEntry::command) {
            Some(command) => {
                self.close();
                MenuAction::Execute(command)
            }
            None => MenuAction::None,
        }
    }

    /// Column range of every title on the bar row.
    pub fn title_spans(&self, bar: Rect) -> Vec<(u16, u16)> {
        let mut x = bar.x.saturating_add(1);
        self.menus
            .iter()
            .map(|menu| {
                let width = menu.title.width() as u16 + 2;
                let span = (x, x.saturating_add(width));
                x = x.saturating_add(width + TITLE_GAP);
                span
            })
            .collect()
    }

    fn dropdown_width(&self, menu: usize, keys: &KeybindingService) -> u16 {
        let widest = self.menus[menu]
            .entries
            .iter()
            .filter_map(|entry| match entry {
                MenuEntry::Item { label, command } => {
                    let shortcut = keys.key_for(*command).map(|k| k.label()).unwrap_or_default();
                    Some(label.width() + shortcut.width() + 3)
                }
                MenuEntry::Separator => None,
            })
            .max()
            .unwrap_or(0);
        // check column + border
        widest as u16 + 4
    }

    pub fn dropdown_area(&self, screen: Rect, keys: &KeybindingService) -> Option<Rect> {
        let open = self.open?;
        let (x, _) = *self.title_spans(screen).get(open)?;
        let width = self.dropdown_width(open, keys).min(screen.width);
        let height = (self.menus[open].entries.len() as u16 + 2)
            .min(screen.height.saturating_sub(1));
        let x = x.min(screen.right().saturating_sub(width));
        Some(Rect::new(x, screen.y.saturating_add(1), width, height))
    }

    /// Mouse handling for the bar row and the open drop-down.
    pub fn handle_mouse(
        &mut self,
        mouse: &MouseEvent,
        screen: Rect,
        keys: &KeybindingService,
    ) -> MenuAction {
        let MouseEventKind::Down(MouseButton::Left) = mouse.kind else {
            return if self.is_open() {
                MenuAction::None
            } else {
                MenuAction::Ignored
            };
        };

        if mouse.row == screen.y {
            let hit = self
                .title_spans(screen)
                .iter()
                .position(|(start, end)| mouse.column >= *start && mouse.column < *end);
            return match hit {
                Some(index) if self.open == Some(index) => {
                    self.close();
                    MenuAction::Closed
                }
                Some(index) => {
                    self.open(index);
                    MenuAction::None
                }
                None if self.is_open() => {
                    self.close();
                    MenuAction::Closed
                }
                None => MenuAction::None,
            };
        }

        let Some(area) = self.dropdown_area(screen, keys) else {
            return MenuAction::Ignored;
        };
        let inside = mouse.column > area.x
            && mouse.column < area.right().saturating_sub(1)
            && mouse.row > area.y
            && mouse.row < area.bottom().saturating_sub(1);
        if !inside {
            self.close();
            return MenuAction::Closed;
        }
        let row = (mouse.row - area.y - 1) as usize;
        let is_item = self
            .open
            .and_then(|open| self.menus[open].entries.get(row))
            .is_some_and(|entry| entry.command().is_some());
        if !is_item {
            return MenuAction::None;
        }
        self.selected = row;
        self.activate_selected()
    }

    pub fn render_bar(&self, area: Rect, buf: &mut Buffer, theme: &UiTheme) {
        buf.set_style(area, theme.menu());
        for (index, (menu, (x, _))) in self
            .menus
            .iter()
            .zip(self.title_spans(area))
            .enumerate()
        {
            if x >= area.right() {
                break;
            }
            let style = if self.open == Some(index) {
                theme.menu_selected()
            } else {
                theme.menu()
            };
            let max = area.right().saturating_sub(x) as usize;
            buf.set_stringn(x, area.y, format!(" {} ", menu.title), max, style);
        }
    }

    /// `checked` marks toggles and the active alignment.
    pub fn render_dropdown(
        &self,
        screen: Rect,
        buf: &mut Buffer,
        theme: &UiTheme,
        keys: &KeybindingService,
        checked: impl Fn(Command) -> bool,
    ) {
        let (Some(open), Some(area)) = (self.open, self.dropdown_area(screen, keys)) else {
            return;
        };
        Clear.render(area, buf);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.menu())
            .style(theme.menu());
        let inner = block.inner(area);
        block.render(area, buf);

        for (row, entry) in self.menus[open].entries.iter().enumerate() {
            let y = inner.y + row as u16;
            if y >= inner.bottom() {
                break;
            }
            let line = Rect::new(inner.x, y, inner.width, 1);
            match entry {
                MenuEntry::Separator => {
                    let rule = "─".repeat(inner.width as usize);
                    buf.set_string(inner.x, y, rule, theme.menu());
                }
                MenuEntry::Item { label, command } => {
                    let style: Style = if row == self.selected {
                        theme.menu_selected()
                    } else {
                        theme.menu()
                    };
                    buf.set_style(line, style);
                    let mark = if checked(*command) { "✓" } else { " " };
                    buf.set_stringn(
                        inner.x,
                        y,
                        format!("{mark} {label}"),
                        inner.width as usize,
                        style,
                    );
                    if let Some(key) = keys.key_for(*command) {
                        let label = key.label();
                        let w = label.width() as u16;
                        if w + 1 < inner.width {
                            let x = inner.right().saturating_sub(w + 1);
                            buf.set_string(x, y, label, style);
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/app/menu.rs"]
mod tests;
