use super::{
    button_rects, centered, contains, dialog_frame, render_buttons, render_input, InputField,
    Modal, ModalStep,
};
use crate::app::theme::UiTheme;
use crate::core::event::{InputEvent, KeyCode, KeyEvent, MouseButton, MouseEventKind};
use crate::kernel::format::TextColor;
use crate::kernel::services::ports::Picked;
use ratatui::layout::{Position, Rect};
use ratatui::style::Style;
use ratatui::Frame;

const COLUMNS: usize = 4;
const CELL_WIDTH: u16 = 12;
const BUTTONS: [&str; 2] = ["OK", "Cancel"];

struct Layout {
    window: Rect,
    grid: Rect,
    hex_row: Rect,
    status_row: Rect,
    buttons: Rect,
}

fn layout(area: Rect) -> Layout {
    let rows = TextColor::named().len().div_ceil(COLUMNS) as u16;
    let window = centered(area, CELL_WIDTH * COLUMNS as u16 + 4, rows + 9);
    let x = window.x + 2;
    let width = window.width.saturating_sub(4);
    let grid = Rect::new(x, window.y + 2, width, rows);
    Layout {
        window,
        grid,
        hex_row: Rect::new(x, grid.bottom() + 1, width, 1),
        status_row: Rect::new(x, grid.bottom() + 2, width, 1),
        buttons: Rect::new(
            window.x + 1,
            window.bottom().saturating_sub(2),
            window.width.saturating_sub(2),
            1,
        ),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Palette,
    Hex,
}

pub(super) struct ColorModal {
    selected: usize,
    hex: InputField,
    focus: Focus,
    error: Option<String>,
}

impl ColorModal {
    pub(super) fn new(current: TextColor) -> Self {
        let named = TextColor::named();
        match named.iter().position(|(_, c)| *c == current) {
            Some(selected) => Self {
                selected,
                hex: InputField::new(&current.to_hex()),
                focus: Focus::Palette,
                error: None,
            },
            None => Self {
                selected: 0,
                hex: InputField::new(&current.to_hex()),
                focus: Focus::Hex,
                error: None,
            },
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let len = TextColor::named().len() as isize;
        let next = self.selected as isize + delta;
        if (0..len).contains(&next) {
            self.selected = next as usize;
            self.sync_hex();
        }
    }

    fn sync_hex(&mut self) {
        if let Some((_, color)) = TextColor::named().get(self.selected) {
            self.hex.set_text(&color.to_hex());
            self.error = None;
        }
    }

    fn confirm(&mut self) -> ModalStep<Picked<TextColor>> {
        if self.focus == Focus::Palette {
            if let Some((_, color)) = TextColor::named().get(self.selected) {
                return ModalStep::Done(Picked::Selected(*color));
            }
        }
        match TextColor::parse(self.hex.text()) {
            Some(color) => ModalStep::Done(Picked::Selected(color)),
            None => {
                self.error = Some(format!("Not a color: {}", self.hex.text()));
                ModalStep::Continue
            }
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> ModalStep<Picked<TextColor>> {
        match key.code {
            KeyCode::Esc => return ModalStep::Done(Picked::Cancelled),
            KeyCode::Enter => return self.confirm(),
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = match self.focus {
                    Focus::Palette => Focus::Hex,
                    Focus::Hex => Focus::Palette,
                };
                return ModalStep::Continue;
            }
            _ => {}
        }
        match self.focus {
            Focus::Palette => match key.code {
                KeyCode::Left => self.move_selection(-1),
                KeyCode::Right => self.move_selection(1),
                KeyCode::Up => self.move_selection(-(COLUMNS as isize)),
                KeyCode::Down => self.move_selection(COLUMNS as isize),
                _ => {}
            },
            Focus::Hex => {
                if self.hex.handle_key(key) {
                    self.error = None;
                }
            }
        }
        ModalStep::Continue
    }
}

impl Modal for ColorModal {
    type Output = Picked<TextColor>;

    fn render(&self, frame: &mut Frame, area: Rect, theme: &UiTheme) {
        let layout = layout(area);
        let buf = frame.buffer_mut();
        dialog_frame(buf, layout.window, "Text Color", theme);

        for (idx, (name, color)) in TextColor::named().iter().enumerate() {
            let x = layout.grid.x + (idx % COLUMNS) as u16 * CELL_WIDTH;
            let y = layout.grid.y + (idx / COLUMNS) as u16;
            if y >= layout.grid.bottom() || x >= layout.grid.right() {
                continue;
            }
            buf.set_string(x, y, "  ", Style::default().bg(theme.rgb(*color)));
            let style = if idx == self.selected && self.focus == Focus::Palette {
                theme.menu_selected()
            } else if idx == self.selected {
                theme.dialog().bg(theme.selection_bg)
            } else {
                theme.dialog()
            };
            buf.set_stringn(x + 3, y, name, (CELL_WIDTH - 4) as usize, style);
        }

        let cursor = render_input(
            buf,
            layout.hex_row,
            "Hex: ",
            &self.hex,
            self.focus == Focus::Hex,
            theme,
        );
        let status_style = theme.dialog();
        match (&self.error, TextColor::parse(self.hex.text())) {
            (Some(error), _) => {
                buf.set_stringn(
                    layout.status_row.x,
                    layout.status_row.y,
                    error,
                    layout.status_row.width as usize,
                    status_style.fg(theme.error_fg),
                );
            }
            (None, Some(color)) => {
                buf.set_string(
                    layout.status_row.x,
                    layout.status_row.y,
                    "Preview ",
                    status_style,
                );
                buf.set_string(
                    layout.status_row.x + 8,
                    layout.status_row.y,
                    "    ",
                    Style::default().bg(theme.rgb(color)),
                );
            }
            (None, None) => {}
        }
        render_buttons(buf, layout.buttons, &BUTTONS, None, theme);
        if let Some((x, y)) = cursor {
            frame.set_cursor_position(Position::new(x, y));
        }
    }

    fn handle(&mut self, event: &InputEvent, area: Rect) -> ModalStep<Picked<TextColor>> {
        match event {
            InputEvent::Key(key) => self.handle_key(key),
            InputEvent::Paste(text) if self.focus == Focus::Hex => {
                self.hex.insert_str(text);
                ModalStep::Continue
            }
            InputEvent::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                let layout = layout(area);
                if contains(layout.grid, mouse) {
                    let col = ((mouse.column - layout.grid.x) / CELL_WIDTH) as usize;
                    let row = (mouse.row - layout.grid.y) as usize;
                    let idx = row * COLUMNS + col;
                    if col < COLUMNS && idx < TextColor::named().len() {
                        self.focus = Focus::Palette;
                        self.selected = idx;
                        self.sync_hex();
                    }
                    return ModalStep::Continue;
                }
                if contains(layout.hex_row, mouse) {
                    self.focus = Focus::Hex;
                    return ModalStep::Continue;
                }
                match button_rects(layout.buttons, &BUTTONS)
                    .iter()
                    .position(|rect| contains(*rect, mouse))
                {
                    Some(0) => self.confirm(),
                    Some(_) => ModalStep::Done(Picked::Cancelled),
                    None => ModalStep::Continue,
                }
            }
            _ => ModalStep::Continue,
        }
    }

    fn abort(&self) -> Picked<TextColor> {
        Picked::Cancelled
    }
}
