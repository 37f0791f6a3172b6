//! Screen colors, built from the `theme` section of settings.

use crate::kernel::format::TextColor;
use crate::kernel::services::ports::ThemeSettings;
use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSupport {
    TrueColor,
    Ansi256,
    Ansi16,
}

impl ColorSupport {
    /// `ZPAD_COLOR_SUPPORT` wins over `COLORTERM`/`TERM` sniffing.
    pub fn detect() -> Self {
        if let Ok(value) = std::env::var("ZPAD_COLOR_SUPPORT") {
            match value.trim().to_ascii_lowercase().as_str() {
                "truecolor" | "24bit" | "rgb" => return ColorSupport::TrueColor,
                "256" | "ansi256" => return ColorSupport::Ansi256,
                "16" | "ansi16" | "basic" => return ColorSupport::Ansi16,
                _ => {}
            }
        }
        let colorterm = std::env::var("COLORTERM")
            .unwrap_or_default()
            .to_ascii_lowercase();
        let term = std::env::var("TERM").unwrap_or_default().to_ascii_lowercase();
        Self::from_env(&colorterm, &term)
    }

    fn from_env(colorterm: &str, term: &str) -> Self {
        let truecolor = ["truecolor", "24bit", "direct"];
        if truecolor
            .iter()
            .any(|marker| colorterm.contains(marker) || term.contains(marker))
        {
            ColorSupport::TrueColor
        } else if term.contains("256color") {
            ColorSupport::Ansi256
        } else {
            ColorSupport::Ansi16
        }
    }
}

#[derive(Debug, Clone)]
pub struct UiTheme {
    pub menu_bg: Color,
    pub menu_fg: Color,
    pub menu_selected_bg: Color,
    pub menu_selected_fg: Color,
    pub status_bg: Color,
    pub status_fg: Color,
    pub selection_bg: Color,
    pub dialog_border: Color,
    pub dialog_bg: Color,
    pub dialog_fg: Color,
    pub accent_fg: Color,
    pub error_fg: Color,
    pub muted_fg: Color,
    pub support: ColorSupport,
}

impl Default for UiTheme {
    fn default() -> Self {
        let mut theme = Self {
            menu_bg: Color::Reset,
            menu_fg: Color::Reset,
            menu_selected_bg: Color::Reset,
            menu_selected_fg: Color::Reset,
            status_bg: Color::Reset,
            status_fg: Color::Reset,
            selection_bg: Color::Reset,
            dialog_border: Color::Reset,
            dialog_bg: Color::Reset,
            dialog_fg: Color::Reset,
            accent_fg: Color::Reset,
            error_fg: Color::Reset,
            muted_fg: Color::Reset,
            support: ColorSupport::TrueColor,
        };
        theme.apply_settings(&ThemeSettings::default());
        theme
    }
}

impl UiTheme {
    pub fn from_settings(settings: &ThemeSettings) -> Self {
        let mut theme = Self::default();
        theme.apply_settings(settings);
        theme
    }

    /// Unparsable values keep the current color.
    pub fn apply_settings(&mut self, settings: &ThemeSettings) {
        let slots: [(&Option<String>, &mut Color); 13] = [
            (&settings.menu_bg, &mut self.menu_bg),
            (&settings.menu_fg, &mut self.menu_fg),
            (&settings.menu_selected_bg, &mut self.menu_selected_bg),
            (&settings.menu_selected_fg, &mut self.menu_selected_fg),
            (&settings.status_bg, &mut self.status_bg),
            (&settings.status_fg, &mut self.status_fg),
            (&settings.selection_bg, &mut self.selection_bg),
            (&settings.dialog_border, &mut self.dialog_border),
            (&settings.dialog_bg, &mut self.dialog_bg),
            (&settings.dialog_fg, &mut self.dialog_fg),
            (&settings.accent_fg, &mut self.accent_fg),
            (&settings.error_fg, &mut self.error_fg),
            (&settings.muted_fg, &mut self.muted_fg),
        ];
        for (value, slot) in slots {
            match value.as_deref().map(parse_color) {
                Some(Some(color)) => *slot = color,
                Some(None) => {
                    tracing::warn!(value = ?value, "ignoring unparsable theme color")
                }
                None => {}
            }
        }
    }

    pub fn with_support(mut self, support: ColorSupport) -> Self {
        self.support = support;
        self
    }

    pub fn menu(&self) -> Style {
        Style::default().bg(self.menu_bg).fg(self.menu_fg)
    }

    pub fn menu_selected(&self) -> Style {
        Style::default()
            .bg(self.menu_selected_bg)
            .fg(self.menu_selected_fg)
    }

    pub fn status(&self) -> Style {
        Style::default().bg(self.status_bg).fg(self.status_fg)
    }

    pub fn dialog(&self) -> Style {
        Style::default().bg(self.dialog_bg).fg(self.dialog_fg)
    }

    pub fn dialog_border(&self) -> Style {
        Style::default().fg(self.dialog_border).bg(self.dialog_bg)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted_fg)
    }

    pub fn accent(&self) -> Style {
        Style::default().fg(self.accent_fg).add_modifier(Modifier::BOLD)
    }

    /// Document text color on screen; black means the terminal's own foreground.
    pub fn text_color(&self, color: TextColor) -> Color {
        if color == TextColor::BLACK {
            return Color::Reset;
        }
        self.rgb(color)
    }

    /// Exact color, degraded to what the terminal can show.
    pub fn rgb(&self, color: TextColor) -> Color {
        match self.support {
            ColorSupport::TrueColor => Color::Rgb(color.r, color.g, color.b),
            ColorSupport::Ansi256 => Color::Indexed(rgb_to_ansi256(color.r, color.g, color.b)),
            ColorSupport::Ansi16 => Color::Indexed(rgb_to_ansi16(color.r, color.g, color.b)),
        }
    }
}

pub fn parse_color(value: &str) -> Option<Color> {
    let v = value.trim();
    if v.is_empty() {
        return None;
    }

    if let Some(hex) = v.strip_prefix('#') {
        return TextColor::parse(&format!("#{hex}")).map(|c| Color::Rgb(c.r, c.g, c.b));
    }
    if let Ok(index) = v.parse::<u8>() {
        return Some(Color::Indexed(index));
    }

    let v = v.to_ascii_lowercase().replace(['-', ' '], "_");
    let c = match v.as_str() {
        "reset" | "default" => Color::Reset,
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "gray" | "grey" => Color::Gray,
        "dark_gray" | "dark_grey" | "darkgray" | "darkgrey" => Color::DarkGray,
        "light_red" => Color::LightRed,
        "light_green" => Color::LightGreen,
        "light_yellow" => Color::LightYellow,
        "light_blue" => Color::LightBlue,
        "light_magenta" => Color::LightMagenta,
        "light_cyan" => Color::LightCyan,
        "white" => Color::White,
        _ => return None,
    };
    Some(c)
}

const ANSI16_RGB: [(u8, u8, u8); 16] = [
    (0, 0, 0),
    (205, 0, 0),
    (0, 205, 0),
    (205, 205, 0),
    (0, 0, 238),
    (205, 0, 205),
    (0, 205, 205),
    (229, 229, 229),
    (127, 127, 127),
    (255, 0, 0),
    (0, 255, 0),
    (255, 255, 0),
    (92, 92, 255),
    (255, 0, 255),
    (0, 255, 255),
    (255, 255, 255),
];

fn distance_sq(a: (u8, u8, u8), b: (u8, u8, u8)) -> u32 {
    let d = |x: u8, y: u8| (x as i32 - y as i32).pow(2) as u32;
    d(a.0, b.0) + d(a.1, b.1) + d(a.2, b.2)
}

fn rgb_to_ansi16(r: u8, g: u8, b: u8) -> u8 {
    ANSI16_RGB
        .iter()
        .enumerate()
        .min_by_key(|(_, rgb)| distance_sq((r, g, b), **rgb))
        .map(|(i, _)| i as u8)
        .unwrap_or(7)
}

/// Nearest entry of the 6x6x6 cube or the gray ramp.
fn rgb_to_ansi256(r: u8, g: u8, b: u8) -> u8 {
    const LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];
    let level = |v: u8| {
        LEVELS
            .iter()
            .enumerate()
            .min_by_key(|(_, l)| (v as i32 - **l as i32).abs())
            .map(|(i, _)| i as u8)
            .unwrap_or(0)
    };
    let (ri, gi, bi) = (level(r), level(g), level(b));
    let cube = (LEVELS[ri as usize], LEVELS[gi as usize], LEVELS[bi as usize]);
    let cube_index = 16 + 36 * ri + 6 * gi + bi;

    let avg = ((r as u16 + g as u16 + b as u16) / 3) as u8;
    let gray_step = (avg.saturating_sub(8) / 10).min(23);
    let gray_value = 8 + gray_step * 10;
    let gray_index = 232 + gray_step;

    if distance_sq((r, g, b), (gray_value, gray_value, gray_value)) < distance_sq((r, g, b), cube)
    {
        gray_index
    } else {
        cube_index
    }
}

#[cfg(test)]
#[path = "../../tests/unit/app/theme.rs"]
mod tests;
