//! System print device: PDF files or the `lp` spooler.

use crate::kernel::print::{paginate, render_pdf, PrintDocument};
use crate::kernel::services::ports::print::{
    PrintDestination, PrintDevice, PrintError, PrinterSettings,
};
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

pub const DEFAULT_SPOOL_COMMAND: &str = "lp";

#[derive(Debug, Clone)]
pub struct SystemPrintDevice {
    spool_command: String,
}

impl SystemPrintDevice {
    pub fn new() -> Self {
        Self::with_spool_command(DEFAULT_SPOOL_COMMAND)
    }

    /// `command` may carry extra arguments, split on whitespace.
    pub fn with_spool_command(command: &str) -> Self {
        let command = command.trim();
        Self {
            spool_command: if command.is_empty() {
                DEFAULT_SPOOL_COMMAND.to_string()
            } else {
                command.to_string()
            },
        }
    }

    pub fn spool_command(&self) -> &str {
        &self.spool_command
    }

    fn write_pdf(&self, path: &Path, bytes: &[u8]) -> Result<(), PrintError> {
        std::fs::write(path, bytes)?;
        tracing::info!(path = %path.display(), bytes = bytes.len(), "pdf written");
        Ok(())
    }

    fn spool(
        &self,
        printer: Option<&str>,
        copies: u16,
        title: &str,
        bytes: &[u8],
    ) -> Result<(), PrintError> {
        let mut parts = self.spool_command.split_whitespace();
        let program = parts.next().unwrap_or(DEFAULT_SPOOL_COMMAND);

        let mut cmd = Command::new(program);
        cmd.args(parts);
        if let Some(name) = printer.filter(|n| !n.trim().is_empty()) {
            cmd.arg("-d").arg(name.trim());
        }
        cmd.arg("-n")
            .arg(copies.max(1).to_string())
            .arg("-t")
            .arg(title)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        let mut child = cmd.spawn().map_err(|e| PrintError::SpoolerUnavailable {
            command: program.to_string(),
            reason: e.to_string(),
        })?;

        if let Some(mut stdin) = child.stdin.take() {
            match stdin.write_all(bytes) {
                Ok(()) => {}
                // the spooler exited early; its status tells the story
                Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {}
                Err(e) => return Err(e.into()),
            }
        }

        let output = child.wait_with_output()?;
        if !output.status.success() {
            return Err(PrintError::SpoolerFailed {
                command: program.to_string(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        tracing::info!(command = program, printer = ?printer, copies, "print job spooled");
        Ok(())
    }
}

impl Default for SystemPrintDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl PrintDevice for SystemPrintDevice {
    fn print(
        &mut self,
        document: &PrintDocument,
        settings: &PrinterSettings,
    ) -> Result<(), PrintError> {
        let pages = paginate(document, &settings.page);
        let bytes = render_pdf(&pages, document);
        tracing::debug!(pages = pages.len(), bytes = bytes.len(), "document rendered");

        match &settings.destination {
            PrintDestination::PdfFile(path) => self.write_pdf(path, &bytes),
            PrintDestination::Printer { name } => {
                self.spool(name.as_deref(), settings.copies, &document.title, &bytes)
            }
        }
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/print.rs"]
mod tests;
