//! File access port.
//!
//! Documents are plain UTF-8 text, read and written whole.

use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum FileError {
    NotFound(PathBuf),
    NotAFile(PathBuf),
    InvalidUtf8(PathBuf),
    Io(std::io::Error),
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileError::NotFound(path) => write!(f, "File not found: {}", path.display()),
            FileError::NotAFile(path) => write!(f, "Not a regular file: {}", path.display()),
            FileError::InvalidUtf8(path) => {
                write!(f, "File is not valid UTF-8 text: {}", path.display())
            }
            FileError::Io(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl std::error::Error for FileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FileError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for FileError {
    fn from(err: std::io::Error) -> Self {
        FileError::Io(err)
    }
}

pub type Result<T> = std::result::Result<T, FileError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
}

impl DirEntry {
    pub fn new(path: PathBuf, is_dir: bool) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        Self { name, path, is_dir }
    }
}

pub trait FileProvider {
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Writes `content` verbatim, replacing any existing file.
    fn write(&self, path: &Path, content: &str) -> Result<()>;

    fn exists(&self, path: &Path) -> bool;

    /// Directory listing, directories first, then case-insensitive by name.
    fn list_dir(&self, path: &Path) -> Result<Vec<DirEntry>>;
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/ports/file.rs"]
mod tests;
