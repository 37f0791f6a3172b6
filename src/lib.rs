//! zpad - a small plain-text editor with print and PDF export.
//!
//! Modules:
//! - core: commands, input events and event sources
//! - kernel: document surface, controller, formatting, print pipeline, ports and adapters
//! - app: terminal main window, menus and dialogs (feature `tui`)
//! - tui: crossterm plumbing (feature `tui`)

pub mod core;
pub mod kernel;

#[cfg(feature = "tui")]
pub mod app;
#[cfg(feature = "tui")]
pub mod tui;
