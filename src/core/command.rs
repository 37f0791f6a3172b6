//! Semantic commands, independent of the key or menu entry that triggers them.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    // file
    NewDocument,
    OpenDocument,
    SaveDocument,
    PrintDocument,
    PrintPreview,
    ExportPdf,
    Quit,

    // edit
    Undo,
    Redo,
    Cut,
    Copy,
    Paste,
    SelectAll,

    // format
    ToggleBold,
    ToggleItalic,
    ToggleUnderline,
    AlignLeft,
    AlignRight,
    AlignCenter,
    AlignJustify,
    PickFont,
    PickColor,

    // help / chrome
    About,
    OpenMenu,

    // cursor
    CursorLeft,
    CursorRight,
    CursorUp,
    CursorDown,
    CursorLineStart,
    CursorLineEnd,
    CursorFileStart,
    CursorFileEnd,
    PageUp,
    PageDown,

    // selection
    SelectLeft,
    SelectRight,
    SelectUp,
    SelectDown,
    SelectLineStart,
    SelectLineEnd,

    // text
    InsertNewline,
    InsertTab,
    DeleteBackward,
    DeleteForward,
}

impl Command {
    pub const ALL: &'static [Command] = &[
        Command::NewDocument,
        Command::OpenDocument,
        Command::SaveDocument,
        Command::PrintDocument,
        Command::PrintPreview,
        Command::ExportPdf,
        Command::Quit,
        Command::Undo,
        Command::Redo,
        Command::Cut,
        Command::Copy,
        Command::Paste,
        Command::SelectAll,
        Command::ToggleBold,
        Command::ToggleItalic,
        Command::ToggleUnderline,
        Command::AlignLeft,
        Command::AlignRight,
        Command::AlignCenter,
        Command::AlignJustify,
        Command::PickFont,
        Command::PickColor,
        Command::About,
        Command::OpenMenu,
        Command::CursorLeft,
        Command::CursorRight,
        Command::CursorUp,
        Command::CursorDown,
        Command::CursorLineStart,
        Command::CursorLineEnd,
        Command::CursorFileStart,
        Command::CursorFileEnd,
        Command::PageUp,
        Command::PageDown,
        Command::SelectLeft,
        Command::SelectRight,
        Command::SelectUp,
        Command::SelectDown,
        Command::SelectLineStart,
        Command::SelectLineEnd,
        Command::InsertNewline,
        Command::InsertTab,
        Command::DeleteBackward,
        Command::DeleteForward,
    ];

    /// Stable name used by `settings.json` keybinding rules.
    pub fn name(&self) -> &'static str {
        match self {
            Command::NewDocument => "newDocument",
            Command::OpenDocument => "openDocument",
            Command::SaveDocument => "saveDocument",
            Command::PrintDocument => "printDocument",
            Command::PrintPreview => "printPreview",
            Command::ExportPdf => "exportPdf",
            Command::Quit => "quit",
            Command::Undo => "undo",
            Command::Redo => "redo",
            Command::Cut => "cut",
            Command::Copy => "copy",
            Command::Paste => "paste",
            Command::SelectAll => "selectAll",
            Command::ToggleBold => "toggleBold",
            Command::ToggleItalic => "toggleItalic",
            Command::ToggleUnderline => "toggleUnderline",
            Command::AlignLeft => "alignLeft",
            Command::AlignRight => "alignRight",
            Command::AlignCenter => "alignCenter",
            Command::AlignJustify => "alignJustify",
            Command::PickFont => "pickFont",
            Command::PickColor => "pickColor",
            Command::About => "about",
            Command::OpenMenu => "openMenu",
            Command::CursorLeft => "cursorLeft",
            Command::CursorRight => "cursorRight",
            Command::CursorUp => "cursorUp",
            Command::CursorDown => "cursorDown",
            Command::CursorLineStart => "cursorLineStart",
            Command::CursorLineEnd => "cursorLineEnd",
            Command::CursorFileStart => "cursorFileStart",
            Command::CursorFileEnd => "cursorFileEnd",
            Command::PageUp => "pageUp",
            Command::PageDown => "pageDown",
            Command::SelectLeft => "selectLeft",
            Command::SelectRight => "selectRight",
            Command::SelectUp => "selectUp",
            Command::SelectDown => "selectDown",
            Command::SelectLineStart => "selectLineStart",
            Command::SelectLineEnd => "selectLineEnd",
            Command::InsertNewline => "insertNewline",
            Command::InsertTab => "insertTab",
            Command::DeleteBackward => "deleteBackward",
            Command::DeleteForward => "deleteForward",
        }
    }

    pub fn from_name(name: &str) -> Option<Command> {
        let name = name.trim();
        Command::ALL
            .iter()
            .copied()
            .find(|cmd| cmd.name().eq_ignore_ascii_case(name))
    }

    /// Commands that may destroy unsaved content and therefore go through the discard guard.
    pub fn is_guarded(&self) -> bool {
        matches!(
            self,
            Command::NewDocument | Command::OpenDocument | Command::PrintDocument | Command::Quit
        )
    }

    pub fn is_cursor_command(&self) -> bool {
        matches!(
            self,
            Command::CursorLeft
                | Command::CursorRight
                | Command::CursorUp
                | Command::CursorDown
                | Command::CursorLineStart
                | Command::CursorLineEnd
                | Command::CursorFileStart
                | Command::CursorFileEnd
                | Command::PageUp
                | Command::PageDown
        )
    }

    pub fn is_selection_command(&self) -> bool {
        matches!(
            self,
            Command::SelectAll
                | Command::SelectLeft
                | Command::SelectRight
                | Command::SelectUp
                | Command::SelectDown
                | Command::SelectLineStart
                | Command::SelectLineEnd
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/core/command.rs"]
mod tests;
