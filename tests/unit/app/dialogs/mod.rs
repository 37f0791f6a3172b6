use super::*;
use crate::core::event::{KeyCode, KeyEvent, KeyModifiers, ScriptedEvents};
use crate::kernel::format::{FontFamily, TextColor};
use crate::kernel::print::{Orientation, PrintDocument};
use crate::kernel::services::ports::{FileFilter, PrintDestination};
use ratatui::backend::TestBackend;
use std::fs;

fn key(code: KeyCode) -> InputEvent {
    InputEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn text(s: &str) -> Vec<InputEvent> {
    s.chars().map(|c| key(KeyCode::Char(c))).collect()
}

fn host(events: Vec<InputEvent>) -> TuiHost<TestBackend, ScriptedEvents> {
    let terminal = Terminal::new(TestBackend::new(80, 24)).expect("terminal");
    TuiHost::new(terminal, ScriptedEvents::new(events), UiTheme::default())
}

fn screen_text(host: &TuiHost<TestBackend, ScriptedEvents>) -> String {
    let buffer = host.backend().buffer();
    let mut out = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

#[test]
fn discard_prompt_buttons() {
    let mut h = host(vec![key(KeyCode::Right), key(KeyCode::Enter)]);
    assert_eq!(h.confirm_discard("Unsaved", "Save?"), DiscardChoice::Discard);

    let mut h = host(vec![key(KeyCode::Enter)]);
    assert_eq!(h.confirm_discard("Unsaved", "Save?"), DiscardChoice::Save);

    let mut h = host(vec![key(KeyCode::Esc)]);
    assert_eq!(h.confirm_discard("Unsaved", "Save?"), DiscardChoice::Cancel);
}

#[test]
fn shutdown_cancels_modal_and_is_remembered() {
    let mut h = host(Vec::new());
    assert_eq!(h.confirm_discard("Unsaved", "Save?"), DiscardChoice::Cancel);
    assert!(h.shutdown_requested());
}

#[test]
fn message_is_drawn_over_backdrop() {
    let mut h = host(vec![key(KeyCode::Enter)]);
    h.draw_window(|frame, _| {
        frame.buffer_mut().set_string(0, 0, "backdrop", Style::default());
    })
    .expect("draw");
    h.message(MessageKind::Info, "File saved", "Saved /tmp/notes.txt");

    let screen = screen_text(&h);
    assert!(screen.starts_with("backdrop"), "{screen}");
    assert!(screen.contains("File saved"));
    assert!(screen.contains("Saved /tmp/notes.txt"));
}

#[test]
fn open_dialog_walks_listing() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::create_dir(dir.path().join("sub")).expect("mkdir");
    fs::write(dir.path().join("a.txt"), "x").expect("write");

    // Entries: "..", "sub", "a.txt".
    let events = vec![key(KeyCode::Down), key(KeyCode::Down), key(KeyCode::Enter)];
    let mut h = host(events).with_start_dir(dir.path().to_path_buf());
    assert_eq!(h.open_path("Open File"), Some(dir.path().join("a.txt")));
}

#[test]
fn open_dialog_escape_cancels() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut h = host(vec![key(KeyCode::Esc)]).with_start_dir(dir.path().to_path_buf());
    assert_eq!(h.open_path("Open File"), None);
}

#[test]
fn save_dialog_uses_suggestion() {
    let dir = tempfile::tempdir().expect("tempdir");
    let suggested = dir.path().join("notes.txt");
    let request = SaveRequest {
        title: "Save File".to_string(),
        suggested: Some(suggested.clone()),
        filter: FileFilter::AllFiles,
    };
    let mut h = host(vec![key(KeyCode::Enter)]);
    assert_eq!(h.save_path(&request), Some(suggested));
}

#[test]
fn save_dialog_typed_directory_is_entered() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::create_dir(dir.path().join("sub")).expect("mkdir");
    let request = SaveRequest {
        title: "Save File".to_string(),
        suggested: None,
        filter: FileFilter::AllFiles,
    };
    let mut events = text("sub");
    events.push(key(KeyCode::Enter));
    events.extend(text("x.txt"));
    events.push(key(KeyCode::Enter));

    let mut h = host(events).with_start_dir(dir.path().to_path_buf());
    assert_eq!(h.save_path(&request), Some(dir.path().join("sub").join("x.txt")));
}

#[test]
fn font_dialog_adjusts_fields() {
    let events = vec![
        key(KeyCode::Right),
        key(KeyCode::Down),
        key(KeyCode::Right),
        key(KeyCode::Down),
        key(KeyCode::Char(' ')),
        key(KeyCode::Enter),
    ];
    let mut h = host(events);
    let picked = h.pick_font(&FontSpec::default()).selected().expect("selected");
    assert_eq!(picked.family, FontFamily::Helvetica);
    assert_eq!(picked.size_pt, 13);
    assert!(picked.bold);
    assert!(!picked.italic);
}

#[test]
fn font_dialog_escape_cancels() {
    let mut h = host(vec![key(KeyCode::Right), key(KeyCode::Esc)]);
    assert_eq!(h.pick_font(&FontSpec::default()), Picked::Cancelled);
}

#[test]
fn color_dialog_palette_and_hex() {
    let mut h = host(vec![key(KeyCode::Right), key(KeyCode::Enter)]);
    let expected = TextColor::named()[1].1;
    assert_eq!(h.pick_color(TextColor::BLACK), Picked::Selected(expected));

    let mut events = vec![key(KeyCode::Tab)];
    events.extend(std::iter::repeat(key(KeyCode::Backspace)).take(7));
    events.extend(text("#123456"));
    events.push(key(KeyCode::Enter));
    let mut h = host(events);
    assert_eq!(
        h.pick_color(TextColor::BLACK),
        Picked::Selected(TextColor::rgb(0x12, 0x34, 0x56))
    );
}

#[test]
fn color_dialog_rejects_bad_hex_and_cancels() {
    let mut events = vec![key(KeyCode::Tab)];
    events.extend(std::iter::repeat(key(KeyCode::Backspace)).take(7));
    events.extend(text("zz"));
    events.push(key(KeyCode::Enter));
    events.push(key(KeyCode::Esc));
    let mut h = host(events);
    assert_eq!(h.pick_color(TextColor::BLACK), Picked::Cancelled);
}

#[test]
fn printer_dialog_collects_name_and_copies() {
    let mut events = text("office");
    events.push(key(KeyCode::Down));
    events.push(key(KeyCode::Backspace));
    events.extend(text("3"));
    events.push(key(KeyCode::Down));
    events.push(key(KeyCode::Right));
    events.push(key(KeyCode::Enter));
    let mut h = host(events);

    let settings = h
        .pick_printer(&PrinterSettings::default())
        .selected()
        .expect("selected");
    assert_eq!(
        settings.destination,
        PrintDestination::Printer {
            name: Some("office".to_string())
        }
    );
    assert_eq!(settings.copies, 3);
    assert_ne!(settings.page.paper, PrinterSettings::default().page.paper);
}

#[test]
fn printer_dialog_rejects_zero_copies() {
    let events = vec![
        key(KeyCode::Down),
        key(KeyCode::Backspace),
        key(KeyCode::Char('0')),
        key(KeyCode::Enter),
        key(KeyCode::Esc),
    ];
    let mut h = host(events);
    assert_eq!(h.pick_printer(&PrinterSettings::default()), Picked::Cancelled);
}

#[test]
fn preview_toggles_orientation_and_shows_pages() {
    let doc = PrintDocument::from_text(
        "notes",
        "hello preview",
        FontSpec::default(),
        TextColor::BLACK,
    );
    let mut h = host(vec![key(KeyCode::Char('o')), key(KeyCode::Esc)]);
    let setup = h.print_preview(&doc, PageSetup::default());
    assert_eq!(setup.orientation, Orientation::Landscape);

    let screen = screen_text(&h);
    assert!(screen.contains("Page 1/1"), "{screen}");
    assert!(screen.contains("Landscape"));
}
