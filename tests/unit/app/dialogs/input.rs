use super::*;
use crate::core::event::KeyModifiers;

fn press(field: &mut InputField, code: KeyCode) -> bool {
    field.handle_key(&KeyEvent::new(code, KeyModifiers::NONE))
}

#[test]
fn edits_at_cursor() {
    let mut field = InputField::new("ac");
    press(&mut field, KeyCode::Left);
    press(&mut field, KeyCode::Char('b'));
    assert_eq!(field.text(), "abc");

    press(&mut field, KeyCode::Home);
    press(&mut field, KeyCode::Delete);
    assert_eq!(field.text(), "bc");

    press(&mut field, KeyCode::End);
    press(&mut field, KeyCode::Backspace);
    assert_eq!(field.text(), "b");
}

#[test]
fn ignores_control_chords() {
    let mut field = InputField::new("x");
    let handled = field.handle_key(&KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));
    assert!(!handled);
    assert_eq!(field.text(), "x");
}

#[test]
fn paste_strips_newlines() {
    let mut field = InputField::default();
    field.insert_str("/tmp/\nnotes.txt");
    assert_eq!(field.text(), "/tmp/notes.txt");
    assert_eq!(field.cursor(), 14);
}

#[test]
fn window_keeps_cursor_visible() {
    let field = InputField::new("0123456789");
    let (visible, x) = field.window(5);
    assert_eq!(visible, "6789");
    assert_eq!(x, 4);

    let mut field = field;
    press(&mut field, KeyCode::Home);
    let (visible, x) = field.window(5);
    assert_eq!(visible, "01234");
    assert_eq!(x, 0);
}

#[test]
fn window_counts_wide_chars() {
    let field = InputField::new("日本語");
    let (visible, x) = field.window(5);
    assert_eq!(visible, "本語");
    assert_eq!(x, 4);
}
