//! TUI integration layer (crossterm).
//!
//! Kept apart from `kernel` so the editor core builds without terminal crates.

pub mod crossterm;
pub mod events;
pub mod osc52;
pub mod terminal_guard;

pub use events::CrosstermEvents;
pub use osc52::Osc52Clipboard;
pub use terminal_guard::{TerminalGuard, TerminalRestorer, TerminationSignal};
