//! Service adapters: OS specific implementations of the ports.

pub mod file;
pub mod keybinding;
pub mod paths;
pub mod print;
pub mod settings;

pub use file::LocalFileProvider;
pub use keybinding::KeybindingService;
pub use paths::{ensure_log_dir, get_config_dir, get_data_dir, get_log_dir};
pub use print::SystemPrintDevice;
pub use settings::{
    ensure_settings_file, get_settings_path, load_settings, load_settings_from,
    parse_keybinding, SettingsError,
};
