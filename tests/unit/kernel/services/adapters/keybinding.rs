use super::*;

fn rule(key: &str, command: &str) -> KeybindingRule {
    KeybindingRule {
        key: key.to_string(),
        command: command.to_string(),
    }
}

#[test]
fn file_commands_use_ctrl_letters() {
    let service = KeybindingService::new();
    assert_eq!(
        service.resolve(&Key::ctrl(KeyCode::Char('s'))),
        Some(Command::SaveDocument)
    );
    assert_eq!(
        service.resolve(&Key::ctrl_shift(KeyCode::Char('p'))),
        Some(Command::PrintPreview)
    );
    assert_eq!(
        service.resolve(&Key::ctrl(KeyCode::Char('p'))),
        Some(Command::PrintDocument)
    );
}

#[test]
fn redo_has_two_keys_and_prefers_ctrl_y() {
    let service = KeybindingService::new();
    assert_eq!(
        service.resolve(&Key::ctrl_shift(KeyCode::Char('z'))),
        Some(Command::Redo)
    );
    assert_eq!(
        service.resolve(&Key::ctrl(KeyCode::Char('y'))),
        Some(Command::Redo)
    );
    assert_eq!(
        service.key_for(Command::Redo),
        Some(Key::ctrl(KeyCode::Char('y')))
    );
}

#[test]
fn every_menu_command_has_a_default_key() {
    let service = KeybindingService::new();
    for command in [
        Command::NewDocument,
        Command::OpenDocument,
        Command::ExportPdf,
        Command::Quit,
        Command::ToggleBold,
        Command::AlignJustify,
        Command::PickFont,
        Command::PickColor,
        Command::About,
    ] {
        assert!(service.key_for(command).is_some(), "{:?}", command);
    }
}

#[test]
fn rules_rebind_and_unbind() {
    let mut service = KeybindingService::new();
    service.apply_rules(&[
        rule("ctrl+shift+s", "exportPdf"),
        rule("ctrl+e", ""),
        rule("ctrl+nope+x", "quit"),
        rule("ctrl+k", "noSuchCommand"),
    ]);

    assert_eq!(
        service.resolve(&Key::ctrl_shift(KeyCode::Char('s'))),
        Some(Command::ExportPdf)
    );
    assert_eq!(service.resolve(&Key::ctrl(KeyCode::Char('e'))), None);
    assert_eq!(service.resolve(&Key::ctrl(KeyCode::Char('k'))), None);
    assert_eq!(
        service.key_for(Command::ExportPdf),
        Some(Key::ctrl_shift(KeyCode::Char('s')))
    );
}

#[test]
fn rebinding_a_key_moves_the_menu_label() {
    let mut service = KeybindingService::new();
    service.bind(Key::ctrl(KeyCode::Char('y')), Command::Undo);

    assert_eq!(
        service.key_for(Command::Redo),
        Some(Key::ctrl_shift(KeyCode::Char('z')))
    );
    assert_eq!(
        service.key_for(Command::Undo),
        Some(Key::ctrl(KeyCode::Char('y')))
    );
}

#[test]
fn unbinding_last_key_clears_label() {
    let mut service = KeybindingService::empty();
    service.bind(Key::simple(KeyCode::F(1)), Command::About);
    assert_eq!(service.unbind(&Key::simple(KeyCode::F(1))), Some(Command::About));
    assert_eq!(service.key_for(Command::About), None);
    assert!(service.bindings().is_empty());
}
