//! Printing port: a device that accepts a rendered document.

use crate::kernel::print::{PageSetup, PrintDocument};
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub enum PrintDestination {
    /// A system printer; `None` means the spooler's default.
    Printer { name: Option<String> },
    /// PDF output mode.
    PdfFile(PathBuf),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrinterSettings {
    pub destination: PrintDestination,
    pub copies: u16,
    pub page: PageSetup,
}

pub const MAX_COPIES: u16 = 99;

impl Default for PrinterSettings {
    fn default() -> Self {
        Self {
            destination: PrintDestination::Printer { name: None },
            copies: 1,
            page: PageSetup::default(),
        }
    }
}

impl PrinterSettings {
    pub fn pdf(path: PathBuf, page: PageSetup) -> Self {
        Self {
            destination: PrintDestination::PdfFile(path),
            copies: 1,
            page,
        }
    }

    pub fn printer_name(&self) -> Option<&str> {
        match &self.destination {
            PrintDestination::Printer { name } => name.as_deref(),
            PrintDestination::PdfFile(_) => None,
        }
    }
}

#[derive(Debug)]
pub enum PrintError {
    Io(std::io::Error),
    SpoolerUnavailable { command: String, reason: String },
    SpoolerFailed { command: String, status: String, stderr: String },
}

impl fmt::Display for PrintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrintError::Io(err) => write!(f, "Print output failed: {}", err),
            PrintError::SpoolerUnavailable { command, reason } => {
                write!(f, "Cannot start print spooler '{}': {}", command, reason)
            }
            PrintError::SpoolerFailed {
                command,
                status,
                stderr,
            } => {
                if stderr.is_empty() {
                    write!(f, "Print spooler '{}' failed ({})", command, status)
                } else {
                    write!(f, "Print spooler '{}' failed ({}): {}", command, status, stderr)
                }
            }
        }
    }
}

impl std::error::Error for PrintError {}

impl From<std::io::Error> for PrintError {
    fn from(err: std::io::Error) -> Self {
        PrintError::Io(err)
    }
}

pub trait PrintDevice {
    fn print(&mut self, document: &PrintDocument, settings: &PrinterSettings)
        -> Result<(), PrintError>;
}
