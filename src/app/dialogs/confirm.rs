use super::{button_rects, centered, contains, dialog_frame, render_buttons, Modal, ModalStep};
use crate::app::theme::UiTheme;
use crate::core::event::{InputEvent, KeyCode, MouseButton, MouseEventKind};
use crate::kernel::services::ports::{DiscardChoice, MessageKind};
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Paragraph, Widget, Wrap};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

const DISCARD_BUTTONS: [&str; 3] = ["Save", "Don't Save", "Cancel"];
const DISCARD_CHOICES: [DiscardChoice; 3] =
    [DiscardChoice::Save, DiscardChoice::Discard, DiscardChoice::Cancel];

fn text_height(text: &str, width: u16) -> u16 {
    let width = width.max(1) as usize;
    text.lines()
        .map(|line| line.width().div_ceil(width).max(1) as u16)
        .sum::<u16>()
        .max(1)
}

/// Window rect plus the row the buttons sit on.
fn layout(area: Rect, title: &str, text: &str) -> (Rect, Rect) {
    let widest = text.lines().map(UnicodeWidthStr::width).max().unwrap_or(0);
    let width = (widest.max(title.width() + 4) as u16 + 4).clamp(36, 64);
    let inner_w = width.saturating_sub(4);
    let height = text_height(text, inner_w) + 5;
    let window = centered(area, width, height);
    let buttons = Rect::new(
        window.x + 1,
        window.bottom().saturating_sub(2),
        window.width.saturating_sub(2),
        1,
    );
    (window, buttons)
}

fn render_body(frame: &mut Frame, window: Rect, title: &str, text: &str, style: Style, theme: &UiTheme) {
    let buf = frame.buffer_mut();
    let inner = dialog_frame(buf, window, title, theme);
    let body = Rect::new(
        inner.x + 1,
        inner.y + 1,
        inner.width.saturating_sub(2),
        inner.height.saturating_sub(3),
    );
    Paragraph::new(text)
        .style(style)
        .wrap(Wrap { trim: false })
        .render(body, buf);
}

pub(super) struct DiscardModal {
    title: String,
    message: String,
    focused: usize,
}

impl DiscardModal {
    pub(super) fn new(title: &str, message: &str) -> Self {
        Self {
            title: title.to_string(),
            message: message.to_string(),
            focused: 0,
        }
    }
}

impl Modal for DiscardModal {
    type Output = DiscardChoice;

    fn render(&self, frame: &mut Frame, area: Rect, theme: &UiTheme) {
        let (window, buttons) = layout(area, &self.title, &self.message);
        render_body(frame, window, &self.title, &self.message, theme.dialog(), theme);
        render_buttons(frame.buffer_mut(), buttons, &DISCARD_BUTTONS, Some(self.focused), theme);
    }

    fn handle(&mut self, event: &InputEvent, area: Rect) -> ModalStep<DiscardChoice> {
        match event {
            InputEvent::Key(key) => match key.code {
                KeyCode::Esc => ModalStep::Done(DiscardChoice::Cancel),
                KeyCode::Enter | KeyCode::Char(' ') => {
                    ModalStep::Done(DISCARD_CHOICES[self.focused])
                }
                KeyCode::Char('s') | KeyCode::Char('S') => ModalStep::Done(DiscardChoice::Save),
                KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Char('n') | KeyCode::Char('N') => {
                    ModalStep::Done(DiscardChoice::Discard)
                }
                KeyCode::Char('c') | KeyCode::Char('C') => ModalStep::Done(DiscardChoice::Cancel),
                KeyCode::Left | KeyCode::BackTab => {
                    self.focused = (self.focused + DISCARD_BUTTONS.len() - 1) % DISCARD_BUTTONS.len();
                    ModalStep::Continue
                }
                KeyCode::Right | KeyCode::Tab => {
                    self.focused = (self.focused + 1) % DISCARD_BUTTONS.len();
                    ModalStep::Continue
                }
                _ => ModalStep::Continue,
            },
            InputEvent::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                let (_, buttons) = layout(area, &self.title, &self.message);
                match button_rects(buttons, &DISCARD_BUTTONS)
                    .iter()
                    .position(|rect| contains(*rect, mouse))
                {
                    Some(idx) => ModalStep::Done(DISCARD_CHOICES[idx]),
                    None => ModalStep::Continue,
                }
            }
            _ => ModalStep::Continue,
        }
    }

    fn abort(&self) -> DiscardChoice {
        DiscardChoice::Cancel
    }
}

pub(super) struct MessageModal {
    kind: MessageKind,
    title: String,
    text: String,
}

impl MessageModal {
    pub(super) fn new(kind: MessageKind, title: &str, text: &str) -> Self {
        Self {
            kind,
            title: title.to_string(),
            text: text.to_string(),
        }
    }
}

impl Modal for MessageModal {
    type Output = ();

    fn render(&self, frame: &mut Frame, area: Rect, theme: &UiTheme) {
        let (window, buttons) = layout(area, &self.title, &self.text);
        let style = match self.kind {
            MessageKind::Error => theme.dialog().fg(theme.error_fg),
            MessageKind::Info | MessageKind::About => theme.dialog(),
        };
        render_body(frame, window, &self.title, &self.text, style, theme);
        render_buttons(frame.buffer_mut(), buttons, &["OK"], Some(0), theme);
    }

    fn handle(&mut self, event: &InputEvent, _area: Rect) -> ModalStep<()> {
        match event {
            InputEvent::Key(key)
                if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) =>
            {
                ModalStep::Done(())
            }
            InputEvent::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                ModalStep::Done(())
            }
            _ => ModalStep::Continue,
        }
    }

    fn abort(&self) {}
}
