//! Mirrors copied text into the host terminal's clipboard via OSC 52.

use std::io::{self, Write};

const OSC52_OPEN: &str = "\x1b]52;c;";
const OSC52_CLOSE: &str = "\x07";

// tmux only forwards the sequence when wrapped in a DCS passthrough
const TMUX_OPEN: &str = "\x1bPtmux;\x1b\x1b]52;c;";
const TMUX_CLOSE: &str = "\x07\x1b\\";

/// Terminals commonly drop larger payloads.
pub const OSC52_MAX_BYTES: usize = 100 * 1024;

#[derive(Debug)]
pub enum Osc52Error {
    TooLarge { bytes: usize },
    Io(io::Error),
}

impl std::fmt::Display for Osc52Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Osc52Error::TooLarge { bytes } => write!(
                f,
                "selection too large for the terminal clipboard ({} KB, limit {} KB)",
                bytes / 1024,
                OSC52_MAX_BYTES / 1024
            ),
            Osc52Error::Io(err) => write!(f, "cannot write clipboard sequence: {}", err),
        }
    }
}

impl std::error::Error for Osc52Error {}

impl From<io::Error> for Osc52Error {
    fn from(err: io::Error) -> Self {
        Osc52Error::Io(err)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Osc52Clipboard {
    pub tmux: bool,
}

impl Osc52Clipboard {
    pub fn detect() -> Self {
        Self {
            tmux: std::env::var_os("TMUX").is_some(),
        }
    }

    pub fn sequence(&self, text: &str) -> Result<String, Osc52Error> {
        let bytes = text.as_bytes();
        if bytes.len() > OSC52_MAX_BYTES {
            return Err(Osc52Error::TooLarge { bytes: bytes.len() });
        }
        let (open, close) = if self.tmux {
            (TMUX_OPEN, TMUX_CLOSE)
        } else {
            (OSC52_OPEN, OSC52_CLOSE)
        };
        Ok(format!("{open}{}{close}", base64(bytes)))
    }

    pub fn write_to<W: Write>(&self, mut out: W, text: &str) -> Result<(), Osc52Error> {
        let seq = self.sequence(text)?;
        out.write_all(seq.as_bytes())?;
        out.flush()?;
        Ok(())
    }

    pub fn copy(&self, text: &str) -> Result<(), Osc52Error> {
        self.write_to(io::stdout(), text)
    }
}

fn base64(bytes: &[u8]) -> String {
    const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

    let mut out = String::with_capacity(bytes.len().div_ceil(3) * 4);
    for chunk in bytes.chunks(3) {
        let mut group = [0u8; 3];
        group[..chunk.len()].copy_from_slice(chunk);
        let n = u32::from_be_bytes([0, group[0], group[1], group[2]]);

        for i in 0..4 {
            if i <= chunk.len() {
                let sextet = (n >> (18 - 6 * i)) & 0x3f;
                out.push(ALPHABET[sextet as usize] as char);
            } else {
                out.push('=');
            }
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/tui/osc52.rs"]
mod tests;
