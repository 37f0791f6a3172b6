//! Formatting state: font, paragraph alignment and text color.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const MIN_FONT_SIZE: u16 = 6;
pub const MAX_FONT_SIZE: u16 = 72;
pub const DEFAULT_FONT_SIZE: u16 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    #[default]
    Courier,
    Helvetica,
    Times,
}

impl FontFamily {
    pub const ALL: [FontFamily; 3] = [FontFamily::Courier, FontFamily::Helvetica, FontFamily::Times];

    pub fn name(self) -> &'static str {
        match self {
            FontFamily::Courier => "Courier",
            FontFamily::Helvetica => "Helvetica",
            FontFamily::Times => "Times",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|family| family.name().eq_ignore_ascii_case(value.trim()))
    }

    /// Average glyph advance in em units. Courier is exact; the others are approximations.
    pub fn advance_em(self) -> f32 {
        match self {
            FontFamily::Courier => 0.6,
            FontFamily::Helvetica => 0.52,
            FontFamily::Times => 0.48,
        }
    }

    /// Name of the matching standard-14 PDF font.
    pub fn base_font(self, bold: bool, italic: bool) -> &'static str {
        match (self, bold, italic) {
            (FontFamily::Courier, false, false) => "Courier",
            (FontFamily::Courier, true, false) => "Courier-Bold",
            (FontFamily::Courier, false, true) => "Courier-Oblique",
            (FontFamily::Courier, true, true) => "Courier-BoldOblique",
            (FontFamily::Helvetica, false, false) => "Helvetica",
            (FontFamily::Helvetica, true, false) => "Helvetica-Bold",
            (FontFamily::Helvetica, false, true) => "Helvetica-Oblique",
            (FontFamily::Helvetica, true, true) => "Helvetica-BoldOblique",
            (FontFamily::Times, false, false) => "Times-Roman",
            (FontFamily::Times, true, false) => "Times-Bold",
            (FontFamily::Times, false, true) => "Times-Italic",
            (FontFamily::Times, true, true) => "Times-BoldItalic",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSpec {
    pub family: FontFamily,
    pub size_pt: u16,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: FontFamily::default(),
            size_pt: DEFAULT_FONT_SIZE,
            bold: false,
            italic: false,
            underline: false,
        }
    }
}

impl FontSpec {
    pub fn with_size(mut self, size_pt: u16) -> Self {
        self.size_pt = size_pt.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
        self
    }

    pub fn base_font(&self) -> &'static str {
        self.family.base_font(self.bold, self.italic)
    }

    /// Short style marker for status displays, e.g. `BI-`.
    pub fn style_flags(&self) -> String {
        let mut out = String::with_capacity(3);
        out.push(if self.bold { 'B' } else { '-' });
        out.push(if self.italic { 'I' } else { '-' });
        out.push(if self.underline { 'U' } else { '-' });
        out
    }
}

impl fmt::Display for FontSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}pt", self.family.name(), self.size_pt)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Right,
    Center,
    Justify,
}

impl Alignment {
    pub const ALL: [Alignment; 4] = [
        Alignment::Left,
        Alignment::Right,
        Alignment::Center,
        Alignment::Justify,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Alignment::Left => "Left",
            Alignment::Right => "Right",
            Alignment::Center => "Center",
            Alignment::Justify => "Justify",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TextColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

const NAMED_COLORS: [(&str, TextColor); 16] = [
    ("black", TextColor::rgb(0x00, 0x00, 0x00)),
    ("gray", TextColor::rgb(0x80, 0x80, 0x80)),
    ("silver", TextColor::rgb(0xC0, 0xC0, 0xC0)),
    ("white", TextColor::rgb(0xFF, 0xFF, 0xFF)),
    ("maroon", TextColor::rgb(0x80, 0x00, 0x00)),
    ("red", TextColor::rgb(0xFF, 0x00, 0x00)),
    ("orange", TextColor::rgb(0xFF, 0xA5, 0x00)),
    ("yellow", TextColor::rgb(0xFF, 0xFF, 0x00)),
    ("olive", TextColor::rgb(0x80, 0x80, 0x00)),
    ("green", TextColor::rgb(0x00, 0x80, 0x00)),
    ("lime", TextColor::rgb(0x00, 0xFF, 0x00)),
    ("teal", TextColor::rgb(0x00, 0x80, 0x80)),
    ("cyan", TextColor::rgb(0x00, 0xFF, 0xFF)),
    ("navy", TextColor::rgb(0x00, 0x00, 0x80)),
    ("blue", TextColor::rgb(0x00, 0x00, 0xFF)),
    ("purple", TextColor::rgb(0x80, 0x00, 0x80)),
];

impl TextColor {
    pub const BLACK: TextColor = TextColor::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn named() -> &'static [(&'static str, TextColor)] {
        &NAMED_COLORS
    }

    pub fn name(self) -> Option<&'static str> {
        NAMED_COLORS
            .iter()
            .find(|(_, color)| *color == self)
            .map(|(name, _)| *name)
    }

    /// Accepts `#rrggbb`, `rrggbb`, `#rgb` or one of the named colors.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if let Some((_, color)) = NAMED_COLORS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(value))
        {
            return Some(*color);
        }

        let hex = value.strip_prefix('#').unwrap_or(value);
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        match hex.len() {
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Self::rgb(r, g, b))
            }
            3 => {
                let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok();
                let (r, g, b) = (digit(0)?, digit(1)?, digit(2)?);
                Some(Self::rgb(r * 17, g * 17, b * 17))
            }
            _ => None,
        }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Components scaled to `0.0..=1.0`, as PDF color operators expect.
    pub fn unit_rgb(self) -> (f32, f32, f32) {
        (
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        )
    }
}

impl fmt::Display for TextColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => f.write_str(&self.to_hex()),
        }
    }
}

impl TryFrom<String> for TextColor {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        TextColor::parse(&value).ok_or_else(|| format!("invalid color: {value}"))
    }
}

impl From<TextColor> for String {
    fn from(color: TextColor) -> Self {
        color.to_hex()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/format.rs"]
mod tests;
