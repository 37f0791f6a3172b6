//! Undo/redo history built on rope snapshots.
//!
//! `Rope` clones share their nodes, so keeping a snapshot per undo step is cheap even
//! for large documents.

use super::format::Alignment;
use ropey::Rope;

pub const DEFAULT_UNDO_LIMIT: usize = 500;

#[derive(Debug, Clone)]
pub struct Snapshot {
    pub rope: Rope,
    pub alignments: Vec<Alignment>,
    pub cursor: usize,
    pub version: u64,
}

/// Edits of the same kind made back to back collapse into one undo step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    Typing,
    Deleting,
    Other,
}

#[derive(Debug)]
pub struct EditHistory {
    undo: Vec<Snapshot>,
    redo: Vec<Snapshot>,
    open_group: Option<EditKind>,
    limit: usize,
}

impl EditHistory {
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_UNDO_LIMIT)
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            undo: Vec::new(),
            redo: Vec::new(),
            open_group: None,
            limit: limit.max(1),
        }
    }

    /// Records the state *before* an edit of `kind`.
    pub fn record(&mut self, before: Snapshot, kind: EditKind) {
        self.redo.clear();

        let coalesce = kind != EditKind::Other && self.open_group == Some(kind);
        if !coalesce {
            self.undo.push(before);
            if self.undo.len() > self.limit {
                let overflow = self.undo.len() - self.limit;
                self.undo.drain(..overflow);
            }
        }

        self.open_group = match kind {
            EditKind::Other => None,
            other => Some(other),
        };
    }

    /// Ends the current typing/deleting group; the next edit starts a new undo step.
    pub fn break_group(&mut self) {
        self.open_group = None;
    }

    pub fn undo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let previous = self.undo.pop()?;
        self.redo.push(current);
        self.open_group = None;
        Some(previous)
    }

    pub fn redo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let next = self.redo.pop()?;
        self.undo.push(current);
        self.open_group = None;
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
        self.open_group = None;
    }
}

impl Default for EditHistory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/history.rs"]
mod tests;
