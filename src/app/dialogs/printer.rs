use super::{
    button_rects, centered, contains, dialog_frame, render_buttons, render_input, InputField,
    Modal, ModalStep,
};
use crate::app::theme::UiTheme;
use crate::core::event::{InputEvent, KeyCode, KeyEvent, MouseButton, MouseEventKind};
use crate::kernel::services::ports::{Picked, PrintDestination, PrinterSettings, MAX_COPIES};
use ratatui::layout::{Position, Rect};
use ratatui::Frame;

const BUTTONS: [&str; 2] = ["Print", "Cancel"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Printer,
    Copies,
    Paper,
    Orientation,
}

const FIELDS: [Field; 4] = [Field::Printer, Field::Copies, Field::Paper, Field::Orientation];

fn layout(area: Rect) -> (Rect, Rect, Rect) {
    let window = centered(area, 52, 11);
    let fields = Rect::new(window.x + 2, window.y + 2, window.width.saturating_sub(4), 4);
    let buttons = Rect::new(
        window.x + 1,
        window.bottom().saturating_sub(2),
        window.width.saturating_sub(2),
        1,
    );
    (window, fields, buttons)
}

pub(super) struct PrinterModal {
    settings: PrinterSettings,
    printer: InputField,
    copies: InputField,
    field: usize,
    error: Option<String>,
}

impl PrinterModal {
    pub(super) fn new(current: &PrinterSettings) -> Self {
        Self {
            settings: current.clone(),
            printer: InputField::new(current.printer_name().unwrap_or_default()),
            copies: InputField::new(&current.copies.to_string()),
            field: 0,
            error: None,
        }
    }

    fn confirm(&mut self) -> ModalStep<Picked<PrinterSettings>> {
        let copies = match self.copies.text().trim().parse::<u16>() {
            Ok(n) if (1..=MAX_COPIES).contains(&n) => n,
            _ => {
                self.error = Some(format!("Copies must be between 1 and {MAX_COPIES}"));
                self.field = 1;
                return ModalStep::Continue;
            }
        };
        let name = self.printer.text().trim();
        let mut settings = self.settings.clone();
        settings.destination = PrintDestination::Printer {
            name: (!name.is_empty()).then(|| name.to_string()),
        };
        settings.copies = copies;
        ModalStep::Done(Picked::Selected(settings))
    }

    fn toggle(&mut self) {
        match FIELDS[self.field] {
            Field::Paper => self.settings.page.paper = self.settings.page.paper.toggled(),
            Field::Orientation => {
                self.settings.page.orientation = self.settings.page.orientation.toggled()
            }
            Field::Printer | Field::Copies => {}
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> ModalStep<Picked<PrinterSettings>> {
        match key.code {
            KeyCode::Esc => return ModalStep::Done(Picked::Cancelled),
            KeyCode::Enter => return self.confirm(),
            KeyCode::Up | KeyCode::BackTab => {
                self.field = (self.field + FIELDS.len() - 1) % FIELDS.len();
                return ModalStep::Continue;
            }
            KeyCode::Down | KeyCode::Tab => {
                self.field = (self.field + 1) % FIELDS.len();
                return ModalStep::Continue;
            }
            _ => {}
        }
        match FIELDS[self.field] {
            Field::Printer => {
                self.printer.handle_key(key);
            }
            Field::Copies => match key.code {
                KeyCode::Char(ch) if !ch.is_ascii_digit() => {}
                _ => {
                    if self.copies.handle_key(key) {
                        self.error = None;
                    }
                }
            },
            Field::Paper | Field::Orientation => {
                if matches!(key.code, KeyCode::Left | KeyCode::Right | KeyCode::Char(' ')) {
                    self.toggle();
                }
            }
        }
        ModalStep::Continue
    }
}

impl Modal for PrinterModal {
    type Output = Picked<PrinterSettings>;

    fn render(&self, frame: &mut Frame, area: Rect, theme: &UiTheme) {
        let (window, fields, buttons) = layout(area);
        let buf = frame.buffer_mut();
        dialog_frame(buf, window, "Print", theme);

        let row = |idx: u16| Rect::new(fields.x, fields.y + idx, fields.width, 1);
        let mut cursor = render_input(
            buf,
            row(0),
            "Printer:     ",
            &self.printer,
            self.field == 0,
            theme,
        );
        cursor = cursor.or(render_input(
            buf,
            row(1),
            "Copies:      ",
            &self.copies,
            self.field == 1,
            theme,
        ));
        let choice = |idx: usize, label: &str, value: &str| {
            let style = if self.field == idx {
                theme.menu_selected()
            } else {
                theme.dialog()
            };
            (format!("{label}< {value} >"), style)
        };
        for (idx, (text, style)) in [
            choice(2, "Paper:       ", self.settings.page.paper.name()),
            choice(3, "Orientation: ", self.settings.page.orientation.name()),
        ]
        .into_iter()
        .enumerate()
        {
            let r = row(idx as u16 + 2);
            buf.set_stringn(r.x, r.y, text, r.width as usize, style);
        }

        let hint_y = fields.bottom();
        match &self.error {
            Some(error) => {
                buf.set_stringn(
                    fields.x,
                    hint_y,
                    error,
                    fields.width as usize,
                    theme.dialog().fg(theme.error_fg),
                );
            }
            None => {
                buf.set_stringn(
                    fields.x,
                    hint_y,
                    "Leave the printer empty for the system default",
                    fields.width as usize,
                    theme.muted(),
                );
            }
        }
        render_buttons(buf, buttons, &BUTTONS, None, theme);
        if let Some((x, y)) = cursor {
            frame.set_cursor_position(Position::new(x, y));
        }
    }

    fn handle(&mut self, event: &InputEvent, area: Rect) -> ModalStep<Picked<PrinterSettings>> {
        match event {
            InputEvent::Key(key) => self.handle_key(key),
            InputEvent::Paste(text) if self.field == 0 => {
                self.printer.insert_str(text);
                ModalStep::Continue
            }
            InputEvent::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                let (_, fields, buttons) = layout(area);
                if contains(fields, mouse) {
                    let idx = (mouse.row - fields.y) as usize;
                    if idx == self.field {
                        self.toggle();
                    } else {
                        self.field = idx;
                    }
                    return ModalStep::Continue;
                }
                match button_rects(buttons, &BUTTONS)
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

    fn abort(&self) -> Picked<PrinterSettings> {
        Picked::Cancelled
    }
}
