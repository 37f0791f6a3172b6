use crate::kernel::format::{FontSpec, TextColor};
use crate::kernel::history::DEFAULT_UNDO_LIMIT;
use crate::kernel::print::Paper;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub keybindings: Vec<KeybindingRule>,
    #[serde(default)]
    pub theme: ThemeSettings,
    #[serde(default)]
    pub editor: EditorSettings,
    #[serde(default)]
    pub print: PrintSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeybindingRule {
    pub key: String,
    pub command: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    pub tab_size: u8,
    pub font: FontSpec,
    pub color: TextColor,
    pub undo_limit: usize,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            tab_size: 4,
            font: FontSpec::default(),
            color: TextColor::BLACK,
            undo_limit: DEFAULT_UNDO_LIMIT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrintSettings {
    pub spool_command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_printer: Option<String>,
    pub paper: Paper,
}

impl Default for PrintSettings {
    fn default() -> Self {
        Self {
            spool_command: "lp".to_string(),
            default_printer: None,
            paper: Paper::A4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub menu_bg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub menu_fg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub menu_selected_bg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub menu_selected_fg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_bg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_fg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selection_bg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dialog_border: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dialog_bg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dialog_fg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent_fg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_fg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub muted_fg: Option<String>,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            menu_bg: Some("dark_gray".to_string()),
            menu_fg: Some("white".to_string()),
            menu_selected_bg: Some("cyan".to_string()),
            menu_selected_fg: Some("black".to_string()),
            status_bg: Some("dark_gray".to_string()),
            status_fg: Some("white".to_string()),
            selection_bg: Some("blue".to_string()),
            dialog_border: Some("cyan".to_string()),
            dialog_bg: None,
            dialog_fg: Some("white".to_string()),
            accent_fg: Some("yellow".to_string()),
            error_fg: Some("red".to_string()),
            muted_fg: Some("dark_gray".to_string()),
        }
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/ports/settings.rs"]
mod tests;
