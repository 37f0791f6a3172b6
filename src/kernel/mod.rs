//! Headless editor core: document model, controller, print pipeline and services.

pub mod controller;
pub mod document;
pub mod format;
pub mod history;
pub mod print;
pub mod services;

pub use controller::{ensure_pdf_suffix, EditorController, Outcome};
pub use document::DocumentSurface;
pub use format::{Alignment, FontFamily, FontSpec, TextColor};
