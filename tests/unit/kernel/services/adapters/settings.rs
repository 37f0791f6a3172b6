use super::*;
use tempfile::tempdir;

#[test]
fn parses_modifier_combinations() {
    assert_eq!(
        parse_keybinding("ctrl+shift+p"),
        Some(Key::ctrl_shift(KeyCode::Char('p')))
    );
    assert_eq!(
        parse_keybinding("Alt + B"),
        Some(Key::new(
            KeyCode::Char('b'),
            KeyModifiers::ALT | KeyModifiers::SHIFT
        ))
    );
    assert_eq!(parse_keybinding("f10"), Some(Key::simple(KeyCode::F(10))));
    assert_eq!(parse_keybinding("ctrl+space"), Some(Key::ctrl(KeyCode::Char(' '))));
    assert_eq!(parse_keybinding("shift+pagedown"), Some(Key::shift(KeyCode::PageDown)));
}

#[test]
fn rejects_malformed_keys() {
    assert_eq!(parse_keybinding(""), None);
    assert_eq!(parse_keybinding("ctrl+"), None);
    assert_eq!(parse_keybinding("ctrl+ab"), None);
    assert_eq!(parse_keybinding("a+b"), None);
    assert_eq!(parse_keybinding("f99"), None);
}

#[test]
fn missing_settings_file_yields_defaults() {
    let dir = tempdir().unwrap();
    let settings = load_settings_from(&dir.path().join("settings.json")).unwrap();
    assert_eq!(settings, Settings::default());
}

#[test]
fn malformed_settings_file_is_a_parse_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "{ not json").unwrap();
    let err = load_settings_from(&path).unwrap_err();
    assert!(matches!(err, SettingsError::Parse { .. }));
    assert!(err.to_string().contains("settings.json"));
}

#[test]
fn default_settings_are_written_once() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("settings.json");

    write_default_settings(&path).unwrap();
    assert_eq!(load_settings_from(&path).unwrap(), Settings::default());

    std::fs::write(&path, r#"{ "editor": { "tab_size": 8 } }"#).unwrap();
    write_default_settings(&path).unwrap();
    assert_eq!(load_settings_from(&path).unwrap().editor.tab_size, 8);
}
