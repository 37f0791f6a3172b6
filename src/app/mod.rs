//! Terminal frontend: main window, menus, modal dialogs and theme.

pub mod dialogs;
pub mod menu;
pub mod notepad;
pub mod theme;

pub use dialogs::TuiHost;
pub use menu::MenuBar;
pub use notepad::Notepad;
pub use theme::UiTheme;
