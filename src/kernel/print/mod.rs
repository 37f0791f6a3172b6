//! Print pipeline: document snapshot -> paginated layout -> PDF bytes.
//!
//! The same layout feeds the print preview, PDF export and the system spooler, so
//! what the preview shows is what ends up on paper.

pub mod layout;
pub mod pdf;

use super::format::{Alignment, FontSpec, TextColor};
use serde::{Deserialize, Serialize};

pub use layout::{paginate, PageLayout, PlacedLine};
pub use pdf::render_pdf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    pub text: String,
    pub alignment: Alignment,
}

/// Renderable snapshot of a document, including formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintDocument {
    pub title: String,
    pub paragraphs: Vec<Paragraph>,
    pub font: FontSpec,
    pub color: TextColor,
}

impl PrintDocument {
    /// Splits `text` into left-aligned paragraphs.
    pub fn from_text(title: &str, text: &str, font: FontSpec, color: TextColor) -> Self {
        Self {
            title: title.to_string(),
            paragraphs: text
                .split('\n')
                .map(|line| Paragraph {
                    text: line.to_string(),
                    alignment: Alignment::Left,
                })
                .collect(),
            font,
            color,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Paper {
    #[default]
    A4,
    Letter,
}

impl Paper {
    /// Portrait size in points.
    pub fn size_pt(self) -> (f32, f32) {
        match self {
            Paper::A4 => (595.0, 842.0),
            Paper::Letter => (612.0, 792.0),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Paper::A4 => "A4",
            Paper::Letter => "Letter",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Paper::A4 => Paper::Letter,
            Paper::Letter => Paper::A4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl Orientation {
    pub fn name(self) -> &'static str {
        match self {
            Orientation::Portrait => "Portrait",
            Orientation::Landscape => "Landscape",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Orientation::Portrait => Orientation::Landscape,
            Orientation::Landscape => Orientation::Portrait,
        }
    }
}

pub const DEFAULT_MARGIN_PT: f32 = 72.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSetup {
    pub paper: Paper,
    pub orientation: Orientation,
    pub margin_pt: f32,
}

impl Default for PageSetup {
    fn default() -> Self {
        Self {
            paper: Paper::default(),
            orientation: Orientation::default(),
            margin_pt: DEFAULT_MARGIN_PT,
        }
    }
}

impl PageSetup {
    pub fn with_paper(paper: Paper) -> Self {
        Self {
            paper,
            ..Self::default()
        }
    }

    pub fn page_size(&self) -> (f32, f32) {
        let (w, h) = self.paper.size_pt();
        match self.orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        }
    }

    pub fn printable_width(&self) -> f32 {
        (self.page_size().0 - 2.0 * self.margin_pt).max(0.0)
    }

    pub fn printable_height(&self) -> f32 {
        (self.page_size().1 - 2.0 * self.margin_pt).max(0.0)
    }
}
