//! Core vocabulary shared by the kernel and every frontend:
//! - Command: semantic editor commands
//! - Event: frontend-neutral input events and event sources

pub mod command;
pub mod event;

pub use command::Command;
pub use event::{EventSource, InputEvent, Key, KeyCode, KeyEvent, KeyModifiers, ScriptedEvents};
