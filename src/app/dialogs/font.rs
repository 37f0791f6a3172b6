use super::{button_rects, centered, contains, dialog_frame, render_buttons, Modal, ModalStep};
use crate::app::theme::UiTheme;
use crate::core::event::{InputEvent, KeyCode, MouseButton, MouseEventKind};
use crate::kernel::format::{FontFamily, FontSpec, MAX_FONT_SIZE, MIN_FONT_SIZE};
use crate::kernel::services::ports::Picked;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::Frame;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Family,
    Size,
    Bold,
    Italic,
    Underline,
}

const FIELDS: [Field; 5] = [
    Field::Family,
    Field::Size,
    Field::Bold,
    Field::Italic,
    Field::Underline,
];

const BUTTONS: [&str; 2] = ["OK", "Cancel"];

fn layout(area: Rect) -> (Rect, Rect, Rect) {
    let window = centered(area, 44, 13);
    let fields = Rect::new(window.x + 2, window.y + 2, window.width.saturating_sub(4), 5);
    let buttons = Rect::new(
        window.x + 1,
        window.bottom().saturating_sub(2),
        window.width.saturating_sub(2),
        1,
    );
    (window, fields, buttons)
}

pub(super) struct FontModal {
    font: FontSpec,
    field: usize,
}

impl FontModal {
    pub(super) fn new(font: FontSpec) -> Self {
        Self { font, field: 0 }
    }

    fn adjust(&mut self, delta: i32) {
        match FIELDS[self.field] {
            Field::Family => {
                let all = FontFamily::ALL;
                let idx = all.iter().position(|f| *f == self.font.family).unwrap_or(0) as i32;
                let next = (idx + delta).rem_euclid(all.len() as i32) as usize;
                self.font.family = all[next];
            }
            Field::Size => {
                let size = (i32::from(self.font.size_pt) + delta)
                    .clamp(i32::from(MIN_FONT_SIZE), i32::from(MAX_FONT_SIZE));
                self.font = self.font.with_size(size as u16);
            }
            Field::Bold => self.font.bold = !self.font.bold,
            Field::Italic => self.font.italic = !self.font.italic,
            Field::Underline => self.font.underline = !self.font.underline,
        }
    }

    fn row_text(&self, field: Field) -> String {
        let check = |on: bool| if on { "[x]" } else { "[ ]" };
        match field {
            Field::Family => format!("Family     < {} >", self.font.family.name()),
            Field::Size => format!("Size       < {} pt >", self.font.size_pt),
            Field::Bold => format!("{} Bold", check(self.font.bold)),
            Field::Italic => format!("{} Italic", check(self.font.italic)),
            Field::Underline => format!("{} Underline", check(self.font.underline)),
        }
    }
}

impl Modal for FontModal {
    type Output = Picked<FontSpec>;

    fn render(&self, frame: &mut Frame, area: Rect, theme: &UiTheme) {
        let (window, fields, buttons) = layout(area);
        let buf = frame.buffer_mut();
        let inner = dialog_frame(buf, window, "Font", theme);

        for (idx, field) in FIELDS.iter().enumerate() {
            let style = if idx == self.field {
                theme.menu_selected()
            } else {
                theme.dialog()
            };
            let y = fields.y + idx as u16;
            buf.set_style(Rect::new(fields.x, y, fields.width, 1), style);
            buf.set_stringn(fields.x, y, self.row_text(*field), fields.width as usize, style);
        }

        let mut sample = theme.dialog();
        if self.font.bold {
            sample = sample.add_modifier(Modifier::BOLD);
        }
        if self.font.italic {
            sample = sample.add_modifier(Modifier::ITALIC);
        }
        if self.font.underline {
            sample = sample.add_modifier(Modifier::UNDERLINED);
        }
        let sample_y = fields.bottom() + 1;
        if sample_y < inner.bottom() {
            buf.set_stringn(
                fields.x,
                sample_y,
                format!("Sample: AaBbYyZz  ({})", self.font),
                fields.width as usize,
                sample,
            );
        }
        render_buttons(buf, buttons, &BUTTONS, None, theme);
    }

    fn handle(&mut self, event: &InputEvent, area: Rect) -> ModalStep<Picked<FontSpec>> {
        match event {
            InputEvent::Key(key) => match key.code {
                KeyCode::Esc => return ModalStep::Done(Picked::Cancelled),
                KeyCode::Enter => return ModalStep::Done(Picked::Selected(self.font)),
                KeyCode::Up | KeyCode::BackTab => {
                    self.field = (self.field + FIELDS.len() - 1) % FIELDS.len()
                }
                KeyCode::Down | KeyCode::Tab => self.field = (self.field + 1) % FIELDS.len(),
                KeyCode::Left | KeyCode::Char('-') => self.adjust(-1),
                KeyCode::Right | KeyCode::Char('+') | KeyCode::Char(' ') => self.adjust(1),
                _ => {}
            },
            InputEvent::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                let (_, fields, buttons) = layout(area);
                if contains(fields, mouse) {
                    let idx = (mouse.row - fields.y) as usize;
                    if idx == self.field {
                        self.adjust(1);
                    } else {
                        self.field = idx;
                    }
                } else {
                    match button_rects(buttons, &BUTTONS)
                        .iter()
                        .position(|rect| contains(*rect, mouse))
                    {
                        Some(0) => return ModalStep::Done(Picked::Selected(self.font)),
                        Some(_) => return ModalStep::Done(Picked::Cancelled),
                        None => {}
                    }
                }
            }
            _ => {}
        }
        ModalStep::Continue
    }

    fn abort(&self) -> Picked<FontSpec> {
        Picked::Cancelled
    }
}
