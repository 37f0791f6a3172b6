//! Per-user application directories.
//!
//! - config (settings.json): `$XDG_CONFIG_HOME/zpad`, `~/Library/Application Support/zpad`,
//!   `%APPDATA%\zpad`
//! - data (logs): `$XDG_DATA_HOME/zpad`, `~/Library/Application Support/zpad`,
//!   `%LOCALAPPDATA%\zpad`

use std::path::PathBuf;

pub(crate) const APP_NAME: &str = "zpad";
const LOG_DIR: &str = "logs";

pub fn get_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        return home_join("Library/Application Support");
    }

    #[cfg(target_os = "windows")]
    {
        return std::env::var("APPDATA")
            .ok()
            .map(|appdata| PathBuf::from(appdata).join(APP_NAME));
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        xdg_or_home("XDG_CONFIG_HOME", ".config")
    }
}

pub fn get_data_dir() -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        return home_join("Library/Application Support");
    }

    #[cfg(target_os = "windows")]
    {
        return std::env::var("LOCALAPPDATA")
            .or_else(|_| std::env::var("APPDATA"))
            .ok()
            .map(|dir| PathBuf::from(dir).join(APP_NAME));
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        xdg_or_home("XDG_DATA_HOME", ".local/share")
    }
}

pub fn get_log_dir() -> Option<PathBuf> {
    get_data_dir().map(|p| p.join(LOG_DIR))
}

pub fn ensure_log_dir() -> std::io::Result<PathBuf> {
    let dir = get_log_dir().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Cannot determine log directory",
        )
    })?;

    if !dir.exists() {
        std::fs::create_dir_all(&dir)?;
    }

    Ok(dir)
}

#[cfg(target_os = "macos")]
fn home_join(rel: &str) -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join(rel).join(APP_NAME))
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn xdg_or_home(xdg_var: &str, home_rel: &str) -> Option<PathBuf> {
    match std::env::var(xdg_var) {
        Ok(xdg) if !xdg.is_empty() => Some(PathBuf::from(xdg).join(APP_NAME)),
        _ => std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join(home_rel).join(APP_NAME)),
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/paths.rs"]
mod tests;
