//! Modal dialog port.
//!
//! Every method blocks until the user dismisses the dialog and reports an explicit
//! outcome instead of a toolkit result code.

use super::print::PrinterSettings;
use crate::kernel::format::{FontSpec, TextColor};
use crate::kernel::print::{paginate, PageLayout, PageSetup, PrintDocument};
use std::path::PathBuf;

/// Answer to the "save changes?" prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscardChoice {
    Save,
    Discard,
    Cancel,
}

/// Result of a picker dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Picked<T> {
    Selected(T),
    Cancelled,
}

impl<T> Picked<T> {
    pub fn selected(self) -> Option<T> {
        match self {
            Picked::Selected(value) => Some(value),
            Picked::Cancelled => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFilter {
    AllFiles,
    Pdf,
}

impl FileFilter {
    pub fn label(self) -> &'static str {
        match self {
            FileFilter::AllFiles => "All files",
            FileFilter::Pdf => "PDF files (*.pdf)",
        }
    }

    pub fn accepts(self, name: &str) -> bool {
        match self {
            FileFilter::AllFiles => true,
            FileFilter::Pdf => name.to_ascii_lowercase().ends_with(".pdf"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveRequest {
    pub title: String,
    pub suggested: Option<PathBuf>,
    pub filter: FileFilter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Error,
    About,
}

/// Paint source for the print preview; re-rendered whenever the page setup changes.
pub trait PreviewSource {
    fn render(&self, setup: &PageSetup) -> Vec<PageLayout>;
}

impl PreviewSource for PrintDocument {
    fn render(&self, setup: &PageSetup) -> Vec<PageLayout> {
        paginate(self, setup)
    }
}

pub trait Dialogs {
    fn confirm_discard(&mut self, title: &str, message: &str) -> DiscardChoice;

    /// `None` when cancelled.
    fn open_path(&mut self, title: &str) -> Option<PathBuf>;

    /// `None` when cancelled.
    fn save_path(&mut self, request: &SaveRequest) -> Option<PathBuf>;

    fn pick_font(&mut self, current: &FontSpec) -> Picked<FontSpec>;

    fn pick_color(&mut self, current: TextColor) -> Picked<TextColor>;

    fn pick_printer(&mut self, current: &PrinterSettings) -> Picked<PrinterSettings>;

    /// Shows a live preview; returns the page setup the user left it with.
    fn print_preview(&mut self, source: &dyn PreviewSource, setup: PageSetup) -> PageSetup;

    fn message(&mut self, kind: MessageKind, title: &str, text: &str);
}
