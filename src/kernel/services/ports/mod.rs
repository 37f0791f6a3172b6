//! Service ports: traits + data contracts.

pub mod dialogs;
pub mod file;
pub mod print;
pub mod settings;
pub mod surface;

pub use dialogs::{
    DiscardChoice, Dialogs, FileFilter, MessageKind, Picked, PreviewSource, SaveRequest,
};
pub use file::{DirEntry, FileError, FileProvider, Result as FileResult};
pub use print::{PrintDestination, PrintDevice, PrintError, PrinterSettings, MAX_COPIES};
pub use settings::{EditorSettings, KeybindingRule, PrintSettings, Settings, ThemeSettings};
pub use surface::TextSurface;
