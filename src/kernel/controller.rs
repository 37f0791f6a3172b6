//! Application logic behind every menu and keyboard command.
//!
//! The controller only talks to ports, so each operation runs the same way against the
//! terminal host and against in-memory fakes.

use super::format::{Alignment, FontSpec, TextColor};
use super::print::PageSetup;
use super::services::ports::dialogs::{
    DiscardChoice, Dialogs, FileFilter, MessageKind, Picked, SaveRequest,
};
use super::services::ports::file::FileProvider;
use super::services::ports::print::{PrintDevice, PrinterSettings};
use super::services::ports::surface::TextSurface;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub const APP_NAME: &str = "zpad";
pub const UNTITLED: &str = "Untitled";

/// Result of an operation that may involve a dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T = ()> {
    Completed(T),
    Cancelled,
    /// Already reported to the user.
    Failed(String),
}

impl<T> Outcome<T> {
    pub fn is_completed(&self) -> bool {
        matches!(self, Outcome::Completed(_))
    }

    pub fn completed(self) -> Option<T> {
        match self {
            Outcome::Completed(value) => Some(value),
            Outcome::Cancelled | Outcome::Failed(_) => None,
        }
    }
}

/// Appends `.pdf` unless the file name already ends with it (any case).
pub fn ensure_pdf_suffix(path: PathBuf) -> PathBuf {
    let has_suffix = path
        .file_name()
        .map(|name| name.to_string_lossy().to_ascii_lowercase().ends_with(".pdf"))
        .unwrap_or(false);
    if has_suffix {
        return path;
    }
    let mut raw: OsString = path.into_os_string();
    raw.push(".pdf");
    PathBuf::from(raw)
}

pub struct EditorController<S, D, P, F> {
    surface: S,
    dialogs: D,
    printer: P,
    files: F,
    current_path: Option<PathBuf>,
    printer_settings: PrinterSettings,
}

impl<S, D, P, F> EditorController<S, D, P, F>
where
    S: TextSurface,
    D: Dialogs,
    P: PrintDevice,
    F: FileProvider,
{
    pub fn new(surface: S, dialogs: D, printer: P, files: F) -> Self {
        Self {
            surface,
            dialogs,
            printer,
            files,
            current_path: None,
            printer_settings: PrinterSettings::default(),
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn dialogs(&self) -> &D {
        &self.dialogs
    }

    pub fn dialogs_mut(&mut self) -> &mut D {
        &mut self.dialogs
    }

    pub fn printer(&self) -> &P {
        &self.printer
    }

    /// Split borrow for hosts that draw the surface while a dialog is running.
    pub fn parts_mut(&mut self) -> (&mut S, &mut D) {
        (&mut self.surface, &mut self.dialogs)
    }

    pub fn current_path(&self) -> Option<&Path> {
        self.current_path.as_deref()
    }

    pub fn is_modified(&self) -> bool {
        self.surface.is_modified()
    }

    pub fn printer_settings(&self) -> &PrinterSettings {
        &self.printer_settings
    }

    pub fn set_printer_settings(&mut self, settings: PrinterSettings) {
        self.printer_settings = settings;
    }

    pub fn page_setup(&self) -> PageSetup {
        self.printer_settings.page
    }

    pub fn document_name(&self) -> String {
        self.current_path
            .as_deref()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| UNTITLED.to_string())
    }

    /// `notes.txt* - zpad` while there are unsaved changes.
    pub fn window_title(&self) -> String {
        let marker = if self.surface.is_modified() { "*" } else { "" };
        format!("{}{} - {}", self.document_name(), marker, APP_NAME)
    }

    // ==================== file ====================

    /// Discard guard. Returns `true` when the pending operation must be abandoned.
    pub fn confirm_discard(&mut self) -> bool {
        if !self.surface.is_modified() {
            return false;
        }

        let message = format!(
            "{} has unsaved changes. Do you want to save them?",
            self.document_name()
        );
        let choice = self.dialogs.confirm_discard("Unsaved changes", &message);
        tracing::debug!(?choice, "discard prompt answered");

        match choice {
            DiscardChoice::Save => !self.save_document().is_completed(),
            DiscardChoice::Discard => false,
            DiscardChoice::Cancel => true,
        }
    }

    pub fn new_document(&mut self) -> Outcome {
        if self.confirm_discard() {
            return Outcome::Cancelled;
        }
        self.surface.clear();
        self.surface.set_modified(false);
        self.current_path = None;
        tracing::info!("new document");
        Outcome::Completed(())
    }

    pub fn open_document(&mut self) -> Outcome<PathBuf> {
        if self.confirm_discard() {
            return Outcome::Cancelled;
        }
        let path = match self.dialogs.open_path("Open File") {
            Some(path) if !path.as_os_str().is_empty() => path,
            _ => return Outcome::Cancelled,
        };
        self.open_path(&path)
    }

    /// Loads `path` without any dialog except the error report. The document is left
    /// untouched when reading fails.
    pub fn open_path(&mut self, path: &Path) -> Outcome<PathBuf> {
        match self.files.read_to_string(path) {
            Ok(text) => {
                self.surface.set_text(&text);
                self.surface.set_modified(false);
                self.current_path = Some(path.to_path_buf());
                tracing::info!(path = %path.display(), chars = text.chars().count(), "file opened");
                Outcome::Completed(path.to_path_buf())
            }
            Err(err) => {
                let message = err.to_string();
                tracing::warn!(path = %path.display(), error = %message, "open failed");
                self.dialogs
                    .message(MessageKind::Error, "Cannot open file", &message);
                Outcome::Failed(message)
            }
        }
    }

    /// Associates an empty document with a path that does not exist yet.
    pub fn bind_path(&mut self, path: PathBuf) {
        self.current_path = Some(path);
    }

    /// Always prompts; the current path is only the suggestion.
    pub fn save_document(&mut self) -> Outcome<PathBuf> {
        let request = SaveRequest {
            title: "Save File".to_string(),
            suggested: self.current_path.clone(),
            filter: FileFilter::AllFiles,
        };
        let path = match self.dialogs.save_path(&request) {
            Some(path) if !path.as_os_str().is_empty() => path,
            _ => {
                tracing::debug!("save cancelled");
                return Outcome::Cancelled;
            }
        };

        let text = self.surface.text();
        match self.files.write(&path, &text) {
            Ok(()) => {
                self.surface.set_modified(false);
                self.current_path = Some(path.clone());
                tracing::info!(path = %path.display(), bytes = text.len(), "file saved");
                self.dialogs.message(
                    MessageKind::Info,
                    "File saved",
                    &format!("Saved {}", path.display()),
                );
                Outcome::Completed(path)
            }
            Err(err) => {
                let message = err.to_string();
                tracing::warn!(path = %path.display(), error = %message, "save failed");
                self.dialogs
                    .message(MessageKind::Error, "Cannot save file", &message);
                Outcome::Failed(message)
            }
        }
    }

    // ==================== print ====================

    pub fn print_document(&mut self) -> Outcome {
        if self.confirm_discard() {
            return Outcome::Cancelled;
        }
        let settings = match self.dialogs.pick_printer(&self.printer_settings) {
            Picked::Selected(settings) => settings,
            Picked::Cancelled => return Outcome::Cancelled,
        };
        self.printer_settings = settings;

        let source = self.surface.render_source(&self.document_name());
        match self.printer.print(&source, &self.printer_settings) {
            Ok(()) => {
                tracing::info!(
                    printer = ?self.printer_settings.printer_name(),
                    copies = self.printer_settings.copies,
                    "document printed"
                );
                Outcome::Completed(())
            }
            Err(err) => {
                let message = err.to_string();
                tracing::warn!(error = %message, "print failed");
                self.dialogs.message(MessageKind::Error, "Print failed", &message);
                Outcome::Failed(message)
            }
        }
    }

    /// The preview re-renders the same snapshot for every page setup the user tries.
    pub fn print_preview(&mut self) {
        let source = self.surface.render_source(&self.document_name());
        let setup = self
            .dialogs
            .print_preview(&source, self.printer_settings.page);
        self.printer_settings.page = setup;
    }

    pub fn export_pdf(&mut self) -> Outcome<PathBuf> {
        let request = SaveRequest {
            title: "Export to PDF".to_string(),
            suggested: self
                .current_path
                .as_ref()
                .map(|path| path.with_extension("pdf")),
            filter: FileFilter::Pdf,
        };
        let path = match self.dialogs.save_path(&request) {
            Some(path) if !path.as_os_str().is_empty() => ensure_pdf_suffix(path),
            _ => return Outcome::Cancelled,
        };

        let source = self.surface.render_source(&self.document_name());
        let settings = PrinterSettings::pdf(path.clone(), self.printer_settings.page);
        match self.printer.print(&source, &settings) {
            Ok(()) => {
                tracing::info!(path = %path.display(), "pdf exported");
                Outcome::Completed(path)
            }
            Err(err) => {
                let message = err.to_string();
                tracing::warn!(path = %path.display(), error = %message, "pdf export failed");
                self.dialogs
                    .message(MessageKind::Error, "Export failed", &message);
                Outcome::Failed(message)
            }
        }
    }

    // ==================== format ====================

    fn update_font(&mut self, update: impl FnOnce(&mut FontSpec)) -> FontSpec {
        let mut font = self.surface.font();
        update(&mut font);
        self.surface.set_font(font);
        font
    }

    /// Returns the new state.
    pub fn toggle_bold(&mut self) -> bool {
        self.update_font(|f| f.bold = !f.bold).bold
    }

    pub fn toggle_italic(&mut self) -> bool {
        self.update_font(|f| f.italic = !f.italic).italic
    }

    pub fn toggle_underline(&mut self) -> bool {
        self.update_font(|f| f.underline = !f.underline).underline
    }

    pub fn set_alignment(&mut self, alignment: Alignment) {
        self.surface.set_alignment(alignment);
    }

    pub fn alignment(&self) -> Alignment {
        self.surface.alignment()
    }

    /// Returns `true` when a font was applied.
    pub fn pick_font(&mut self) -> bool {
        match self.dialogs.pick_font(&self.surface.font()) {
            Picked::Selected(font) => {
                tracing::debug!(%font, "font picked");
                self.surface.set_font(font);
                true
            }
            Picked::Cancelled => false,
        }
    }

    /// Applies the color only on explicit confirmation.
    pub fn pick_color(&mut self) -> bool {
        match self.dialogs.pick_color(self.surface.text_color()) {
            Picked::Selected(color) => {
                tracing::debug!(%color, "color picked");
                self.surface.set_text_color(color);
                true
            }
            Picked::Cancelled => false,
        }
    }

    pub fn text_color(&self) -> TextColor {
        self.surface.text_color()
    }

    pub fn show_about(&mut self) {
        let text = format!(
            "{} {}\nA small plain-text editor for the terminal.\nPrints and exports PDF.",
            APP_NAME,
            env!("CARGO_PKG_VERSION")
        );
        self.dialogs
            .message(MessageKind::About, &format!("About {}", APP_NAME), &text);
    }

    // ==================== edit ====================

    pub fn undo(&mut self) {
        self.surface.undo();
    }

    pub fn redo(&mut self) {
        self.surface.redo();
    }

    pub fn cut(&mut self) {
        self.surface.cut();
    }

    pub fn copy(&mut self) {
        self.surface.copy();
    }

    pub fn paste(&mut self) {
        self.surface.paste();
    }

    /// Discard guard for closing the window. `true` means the app may exit.
    pub fn request_quit(&mut self) -> bool {
        let may_quit = !self.confirm_discard();
        if may_quit {
            tracing::info!("quit requested");
        }
        may_quit
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/controller.rs"]
mod tests;
