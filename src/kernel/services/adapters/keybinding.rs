//! Key → command table.

use super::settings::parse_keybinding;
use crate::core::event::{Key, KeyCode};
use crate::core::Command;
use crate::kernel::services::ports::settings::KeybindingRule;
use rustc_hash::FxHashMap;

pub struct KeybindingService {
    bindings: FxHashMap<Key, Command>,
    /// Key shown next to a command in menus; the most recent binding wins.
    preferred: FxHashMap<Command, Key>,
}

impl KeybindingService {
    pub fn new() -> Self {
        Self::with_defaults()
    }

    pub fn empty() -> Self {
        Self {
            bindings: FxHashMap::default(),
            preferred: FxHashMap::default(),
        }
    }

    pub fn with_defaults() -> Self {
        let mut service = Self::empty();
        for (key, command) in default_keybindings() {
            service.bind(key, command);
        }
        service
    }

    pub fn resolve(&self, key: &Key) -> Option<Command> {
        self.bindings.get(key).copied()
    }

    pub fn bindings(&self) -> &FxHashMap<Key, Command> {
        &self.bindings
    }

    pub fn bind(&mut self, key: Key, command: Command) {
        if let Some(previous) = self.bindings.insert(key, command) {
            if previous != command && self.preferred.get(&previous) == Some(&key) {
                self.preferred.remove(&previous);
                self.refresh_preferred(previous);
            }
        }
        self.preferred.insert(command, key);
    }

    pub fn unbind(&mut self, key: &Key) -> Option<Command> {
        let command = self.bindings.remove(key)?;
        if self.preferred.get(&command) == Some(key) {
            self.preferred.remove(&command);
            self.refresh_preferred(command);
        }
        Some(command)
    }

    pub fn key_for(&self, command: Command) -> Option<Key> {
        self.preferred.get(&command).copied()
    }

    /// Applies `settings.json` overrides. An empty command unbinds the key.
    pub fn apply_rules(&mut self, rules: &[KeybindingRule]) {
        for rule in rules {
            let Some(key) = parse_keybinding(&rule.key) else {
                tracing::warn!(key = %rule.key, "ignoring keybinding with unparsable key");
                continue;
            };
            let name = rule.command.trim();
            if name.is_empty() {
                let _ = self.unbind(&key);
                continue;
            }
            match Command::from_name(name) {
                Some(command) => self.bind(key, command),
                None => {
                    tracing::warn!(command = %name, "ignoring keybinding for unknown command")
                }
            }
        }
    }

    fn refresh_preferred(&mut self, command: Command) {
        // Deterministic fallback: the shortest label among remaining keys.
        let fallback = self
            .bindings
            .iter()
            .filter(|(_, c)| **c == command)
            .map(|(k, _)| *k)
            .min_by_key(|k| {
                let label = k.label();
                (label.len(), label)
            });
        if let Some(key) = fallback {
            self.preferred.insert(command, key);
        }
    }
}

impl Default for KeybindingService {
    fn default() -> Self {
        Self::new()
    }
}

fn default_keybindings() -> Vec<(Key, Command)> {
    let ch = KeyCode::Char;
    vec![
        (Key::ctrl(ch('n')), Command::NewDocument),
        (Key::ctrl(ch('o')), Command::OpenDocument),
        (Key::ctrl(ch('s')), Command::SaveDocument),
        (Key::ctrl(ch('p')), Command::PrintDocument),
        (Key::ctrl_shift(ch('p')), Command::PrintPreview),
        (Key::ctrl(ch('e')), Command::ExportPdf),
        (Key::ctrl(ch('q')), Command::Quit),
        (Key::ctrl_shift(ch('z')), Command::Redo),
        (Key::ctrl(ch('y')), Command::Redo),
        (Key::ctrl(ch('z')), Command::Undo),
        (Key::ctrl(ch('x')), Command::Cut),
        (Key::ctrl(ch('c')), Command::Copy),
        (Key::ctrl(ch('v')), Command::Paste),
        (Key::ctrl(ch('a')), Command::SelectAll),
        (Key::alt(ch('b')), Command::ToggleBold),
        (Key::alt(ch('i')), Command::ToggleItalic),
        (Key::alt(ch('u')), Command::ToggleUnderline),
        (Key::alt(ch('l')), Command::AlignLeft),
        (Key::alt(ch('r')), Command::AlignRight),
        (Key::alt(ch('c')), Command::AlignCenter),
        (Key::alt(ch('j')), Command::AlignJustify),
        (Key::alt(ch('f')), Command::PickFont),
        (Key::alt(ch('k')), Command::PickColor),
        (Key::simple(KeyCode::F(1)), Command::About),
        (Key::simple(KeyCode::F(10)), Command::OpenMenu),
        (Key::simple(KeyCode::Left), Command::CursorLeft),
        (Key::simple(KeyCode::Right), Command::CursorRight),
        (Key::simple(KeyCode::Up), Command::CursorUp),
        (Key::simple(KeyCode::Down), Command::CursorDown),
        (Key::simple(KeyCode::Home), Command::CursorLineStart),
        (Key::simple(KeyCode::End), Command::CursorLineEnd),
        (Key::ctrl(KeyCode::Home), Command::CursorFileStart),
        (Key::ctrl(KeyCode::End), Command::CursorFileEnd),
        (Key::simple(KeyCode::PageUp), Command::PageUp),
        (Key::simple(KeyCode::PageDown), Command::PageDown),
        (Key::shift(KeyCode::Left), Command::SelectLeft),
        (Key::shift(KeyCode::Right), Command::SelectRight),
        (Key::shift(KeyCode::Up), Command::SelectUp),
        (Key::shift(KeyCode::Down), Command::SelectDown),
        (Key::shift(KeyCode::Home), Command::SelectLineStart),
        (Key::shift(KeyCode::End), Command::SelectLineEnd),
        (Key::simple(KeyCode::Enter), Command::InsertNewline),
        (Key::simple(KeyCode::Tab), Command::InsertTab),
        (Key::simple(KeyCode::Backspace), Command::DeleteBackward),
        (Key::simple(KeyCode::Delete), Command::DeleteForward),
    ]
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/keybinding.rs"]
mod tests;
