//! The editable-text capability the controller drives.

use crate::kernel::format::{Alignment, FontSpec, TextColor};
use crate::kernel::print::PrintDocument;

pub trait TextSurface {
    /// Full plain-text content.
    fn text(&self) -> String;

    /// Replaces the whole content. Clears undo history; the caller decides the
    /// modified flag afterwards.
    fn set_text(&mut self, text: &str);

    fn clear(&mut self) {
        self.set_text("");
    }

    fn is_modified(&self) -> bool;

    fn set_modified(&mut self, modified: bool);

    /// Returns the new flag value if it changed since the previous call.
    fn take_modification_change(&mut self) -> Option<bool>;

    fn font(&self) -> FontSpec;

    fn set_font(&mut self, font: FontSpec);

    /// Alignment of the paragraph holding the cursor.
    fn alignment(&self) -> Alignment;

    /// Aligns the paragraphs covered by the cursor or selection.
    fn set_alignment(&mut self, alignment: Alignment);

    fn text_color(&self) -> TextColor;

    fn set_text_color(&mut self, color: TextColor);

    fn undo(&mut self);

    fn redo(&mut self);

    fn cut(&mut self);

    fn copy(&mut self);

    fn paste(&mut self);

    /// Snapshot for printing, preview and PDF export.
    fn render_source(&self, title: &str) -> PrintDocument;
}
