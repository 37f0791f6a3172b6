use super::*;
use crate::kernel::document::DocumentSurface;
use crate::kernel::print::{Paper, PrintDocument};
use crate::kernel::services::ports::dialogs::PreviewSource;
use crate::kernel::services::ports::file::{DirEntry, FileError, Result as FileResult};
use crate::kernel::services::ports::print::{PrintDestination, PrintError};
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

#[derive(Default)]
struct FakeDialogs {
    discard: VecDeque<DiscardChoice>,
    open: VecDeque<Option<PathBuf>>,
    save: VecDeque<Option<PathBuf>>,
    fonts: VecDeque<Picked<FontSpec>>,
    colors: VecDeque<Picked<TextColor>>,
    printers: VecDeque<Picked<PrinterSettings>>,
    preview_result: Option<PageSetup>,

    discard_prompts: usize,
    save_requests: Vec<SaveRequest>,
    messages: Vec<(MessageKind, String)>,
    previewed_pages: Vec<usize>,
}

impl Dialogs for FakeDialogs {
    fn confirm_discard(&mut self, _title: &str, _message: &str) -> DiscardChoice {
        self.discard_prompts += 1;
        self.discard.pop_front().unwrap_or(DiscardChoice::Cancel)
    }

    fn open_path(&mut self, _title: &str) -> Option<PathBuf> {
        self.open.pop_front().flatten()
    }

    fn save_path(&mut self, request: &SaveRequest) -> Option<PathBuf> {
        self.save_requests.push(request.clone());
        self.save.pop_front().flatten()
    }

    fn pick_font(&mut self, _current: &FontSpec) -> Picked<FontSpec> {
        self.fonts.pop_front().unwrap_or(Picked::Cancelled)
    }

    fn pick_color(&mut self, _current: TextColor) -> Picked<TextColor> {
        self.colors.pop_front().unwrap_or(Picked::Cancelled)
    }

    fn pick_printer(&mut self, _current: &PrinterSettings) -> Picked<PrinterSettings> {
        self.printers.pop_front().unwrap_or(Picked::Cancelled)
    }

    fn print_preview(&mut self, source: &dyn PreviewSource, setup: PageSetup) -> PageSetup {
        self.previewed_pages.push(source.render(&setup).len());
        let next = self.preview_result.unwrap_or(setup);
        self.previewed_pages.push(source.render(&next).len());
        next
    }

    fn message(&mut self, kind: MessageKind, _title: &str, text: &str) {
        self.messages.push((kind, text.to_string()));
    }
}

#[derive(Default)]
struct MemoryFiles {
    files: RefCell<HashMap<PathBuf, String>>,
    read_only: bool,
}

impl FileProvider for MemoryFiles {
    fn read_to_string(&self, path: &Path) -> FileResult<String> {
        self.files
            .borrow()
            .get(path)
            .cloned()
            .ok_or_else(|| FileError::NotFound(path.to_path_buf()))
    }

    fn write(&self, path: &Path, content: &str) -> FileResult<()> {
        if self.read_only {
            return Err(FileError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only",
            )));
        }
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.borrow().contains_key(path)
    }

    fn list_dir(&self, _path: &Path) -> FileResult<Vec<DirEntry>> {
        Ok(Vec::new())
    }
}

#[derive(Default)]
struct RecordingPrinter {
    jobs: Vec<(PrintDocument, PrinterSettings)>,
    fail: bool,
}

impl PrintDevice for RecordingPrinter {
    fn print(&mut self, document: &PrintDocument, settings: &PrinterSettings) -> Result<(), PrintError> {
        if self.fail {
            return Err(PrintError::SpoolerUnavailable {
                command: "lp".to_string(),
                reason: "not installed".to_string(),
            });
        }
        self.jobs.push((document.clone(), settings.clone()));
        Ok(())
    }
}

type TestController = EditorController<DocumentSurface, FakeDialogs, RecordingPrinter, MemoryFiles>;

fn controller() -> TestController {
    EditorController::new(
        DocumentSurface::new(),
        FakeDialogs::default(),
        RecordingPrinter::default(),
        MemoryFiles::default(),
    )
}

fn type_text(c: &mut TestController, text: &str) {
    c.surface_mut().insert_str(text);
}

#[test]
fn confirm_discard_without_changes_shows_no_dialog() {
    let mut c = controller();
    assert!(!c.confirm_discard());
    assert_eq!(c.dialogs().discard_prompts, 0);
}

#[test]
fn discard_choice_proceeds_and_cancel_aborts() {
    let mut c = controller();
    type_text(&mut c, "draft");

    c.dialogs_mut().discard.push_back(DiscardChoice::Discard);
    assert!(!c.confirm_discard());

    c.dialogs_mut().discard.push_back(DiscardChoice::Cancel);
    assert!(c.confirm_discard());
    assert_eq!(c.dialogs().discard_prompts, 2);
}

#[test]
fn save_from_discard_prompt_proceeds_only_when_saved() {
    let mut c = controller();
    type_text(&mut c, "draft");

    c.dialogs_mut().discard.push_back(DiscardChoice::Save);
    c.dialogs_mut().save.push_back(None);
    assert!(c.confirm_discard(), "cancelled save must abort");

    c.dialogs_mut().discard.push_back(DiscardChoice::Save);
    c.dialogs_mut().save.push_back(Some(PathBuf::from("/docs/a.txt")));
    assert!(!c.confirm_discard());
    assert!(!c.is_modified());
}

#[test]
fn failed_save_from_discard_prompt_aborts() {
    let mut c = EditorController::new(
        DocumentSurface::new(),
        FakeDialogs::default(),
        RecordingPrinter::default(),
        MemoryFiles {
            read_only: true,
            ..MemoryFiles::default()
        },
    );
    type_text(&mut c, "draft");
    c.dialogs_mut().discard.push_back(DiscardChoice::Save);
    c.dialogs_mut().save.push_back(Some(PathBuf::from("/ro/a.txt")));

    assert_eq!(c.new_document(), Outcome::Cancelled);
    assert_eq!(c.surface().text(), "draft");
    assert!(c.is_modified());
    assert_eq!(c.dialogs().messages[0].0, MessageKind::Error);
}

#[test]
fn new_document_clears_text_and_path() {
    let mut c = controller();
    c.bind_path(PathBuf::from("/docs/a.txt"));
    type_text(&mut c, "hello");
    c.dialogs_mut().discard.push_back(DiscardChoice::Discard);

    assert_eq!(c.new_document(), Outcome::Completed(()));
    assert_eq!(c.surface().text(), "");
    assert!(!c.is_modified());
    assert_eq!(c.current_path(), None);
    assert_eq!(c.window_title(), "Untitled - zpad");
}

#[test]
fn new_document_cancelled_keeps_text() {
    let mut c = controller();
    type_text(&mut c, "keep me");
    c.dialogs_mut().discard.push_back(DiscardChoice::Cancel);

    assert_eq!(c.new_document(), Outcome::Cancelled);
    assert_eq!(c.surface().text(), "keep me");
}

#[test]
fn open_loads_file_and_clears_modified() {
    let mut c = controller();
    let path = PathBuf::from("/docs/notes.txt");
    c.files.write(&path, "line 1\nline 2").unwrap();
    c.dialogs_mut().open.push_back(Some(path.clone()));

    assert_eq!(c.open_document(), Outcome::Completed(path.clone()));
    assert_eq!(c.surface().text(), "line 1\nline 2");
    assert!(!c.is_modified());
    assert_eq!(c.current_path(), Some(path.as_path()));
    assert_eq!(c.window_title(), "notes.txt - zpad");
}

#[test]
fn open_cancelled_or_empty_path_aborts() {
    let mut c = controller();
    c.dialogs_mut().open.push_back(None);
    assert_eq!(c.open_document(), Outcome::Cancelled);

    c.dialogs_mut().open.push_back(Some(PathBuf::new()));
    assert_eq!(c.open_document(), Outcome::Cancelled);
    assert!(c.dialogs().messages.is_empty());
}

#[test]
fn open_missing_file_reports_error_and_keeps_document() {
    let mut c = controller();
    type_text(&mut c, "previous");
    c.dialogs_mut().discard.push_back(DiscardChoice::Discard);
    c.dialogs_mut().open.push_back(Some(PathBuf::from("/nope.txt")));

    let outcome = c.open_document();
    assert!(matches!(outcome, Outcome::Failed(_)));
    assert_eq!(c.surface().text(), "previous");
    assert_eq!(c.dialogs().messages.len(), 1);
    assert_eq!(c.dialogs().messages[0].0, MessageKind::Error);
}

#[test]
fn save_writes_text_and_confirms() {
    let mut c = controller();
    type_text(&mut c, "hello");
    assert!(c.window_title().contains('*'));
    c.dialogs_mut().save.push_back(Some(PathBuf::from("/docs/a.txt")));

    let outcome = c.save_document();
    assert_eq!(outcome, Outcome::Completed(PathBuf::from("/docs/a.txt")));
    assert!(!c.is_modified());
    assert_eq!(
        c.files.read_to_string(Path::new("/docs/a.txt")).unwrap(),
        "hello"
    );
    assert_eq!(c.dialogs().messages[0].0, MessageKind::Info);
}

#[test]
fn save_always_prompts_with_current_path_suggested() {
    let mut c = controller();
    c.bind_path(PathBuf::from("/docs/a.txt"));
    c.dialogs_mut().save.push_back(None);

    assert_eq!(c.save_document(), Outcome::Cancelled);
    let request = &c.dialogs().save_requests[0];
    assert_eq!(request.suggested.as_deref(), Some(Path::new("/docs/a.txt")));
    assert_eq!(request.filter, FileFilter::AllFiles);
}

#[test]
fn save_failure_keeps_modified() {
    let mut c = EditorController::new(
        DocumentSurface::new(),
        FakeDialogs::default(),
        RecordingPrinter::default(),
        MemoryFiles {
            read_only: true,
            ..MemoryFiles::default()
        },
    );
    type_text(&mut c, "hello");
    c.dialogs_mut().save.push_back(Some(PathBuf::from("/docs/a.txt")));

    assert!(matches!(c.save_document(), Outcome::Failed(_)));
    assert!(c.is_modified());
    assert_eq!(c.current_path(), None);
}

#[test]
fn print_sends_formatted_document_to_device() {
    let mut c = controller();
    type_text(&mut c, "print me");
    c.set_alignment(Alignment::Center);
    c.toggle_bold();
    c.dialogs_mut().discard.push_back(DiscardChoice::Discard);
    let settings = PrinterSettings {
        destination: PrintDestination::Printer {
            name: Some("office".to_string()),
        },
        copies: 2,
        page: PageSetup::with_paper(Paper::Letter),
    };
    c.dialogs_mut()
        .printers
        .push_back(Picked::Selected(settings.clone()));

    assert_eq!(c.print_document(), Outcome::Completed(()));
    let (doc, used) = &c.printer().jobs[0];
    assert_eq!(doc.paragraphs[0].text, "print me");
    assert_eq!(doc.paragraphs[0].alignment, Alignment::Center);
    assert!(doc.font.bold);
    assert_eq!(used, &settings);
    assert_eq!(c.printer_settings(), &settings);
}

#[test]
fn print_cancelled_in_printer_dialog_prints_nothing() {
    let mut c = controller();
    assert_eq!(c.print_document(), Outcome::Cancelled);
    assert!(c.printer().jobs.is_empty());
}

#[test]
fn print_device_error_is_reported() {
    let mut c = controller();
    c.printer.fail = true;
    c.dialogs_mut()
        .printers
        .push_back(Picked::Selected(PrinterSettings::default()));

    assert!(matches!(c.print_document(), Outcome::Failed(_)));
    assert_eq!(c.dialogs().messages[0].0, MessageKind::Error);
}

#[test]
fn preview_renders_without_guard_and_keeps_page_setup() {
    let mut c = controller();
    type_text(&mut c, "unsaved");
    let landscape = PageSetup {
        orientation: crate::kernel::print::Orientation::Landscape,
        ..PageSetup::default()
    };
    c.dialogs_mut().preview_result = Some(landscape);

    c.print_preview();
    assert_eq!(c.dialogs().discard_prompts, 0);
    assert_eq!(c.dialogs().previewed_pages, vec![1, 1]);
    assert_eq!(c.page_setup(), landscape);
}

#[test]
fn export_appends_pdf_suffix() {
    let mut c = controller();
    c.dialogs_mut().save.push_back(Some(PathBuf::from("/out/report")));
    assert_eq!(
        c.export_pdf(),
        Outcome::Completed(PathBuf::from("/out/report.pdf"))
    );

    c.dialogs_mut()
        .save
        .push_back(Some(PathBuf::from("/out/Report.PDF")));
    assert_eq!(
        c.export_pdf(),
        Outcome::Completed(PathBuf::from("/out/Report.PDF"))
    );

    let (_, settings) = &c.printer().jobs[0];
    assert_eq!(
        settings.destination,
        PrintDestination::PdfFile(PathBuf::from("/out/report.pdf"))
    );
    assert_eq!(c.dialogs().save_requests[0].filter, FileFilter::Pdf);
}

#[test]
fn export_cancelled_does_nothing() {
    let mut c = controller();
    c.dialogs_mut().save.push_back(None);
    assert_eq!(c.export_pdf(), Outcome::Cancelled);
    assert!(c.printer().jobs.is_empty());
}

#[test]
fn ensure_pdf_suffix_cases() {
    assert_eq!(
        ensure_pdf_suffix(PathBuf::from("report")),
        PathBuf::from("report.pdf")
    );
    assert_eq!(
        ensure_pdf_suffix(PathBuf::from("report.pdf")),
        PathBuf::from("report.pdf")
    );
    assert_eq!(
        ensure_pdf_suffix(PathBuf::from("notes.txt")),
        PathBuf::from("notes.txt.pdf")
    );
}

#[test]
fn toggles_are_involutions() {
    let mut c = controller();
    let before = c.surface().font();
    assert!(c.toggle_bold());
    assert!(!c.toggle_bold());
    assert!(c.toggle_italic());
    assert!(!c.toggle_italic());
    assert!(c.toggle_underline());
    assert!(!c.toggle_underline());
    assert_eq!(c.surface().font(), before);
}

#[test]
fn alignment_round_trips() {
    let mut c = controller();
    c.set_alignment(Alignment::Justify);
    assert_eq!(c.alignment(), Alignment::Justify);
}

#[test]
fn font_applies_only_when_selected() {
    let mut c = controller();
    let before = c.surface().font();
    assert!(!c.pick_font());
    assert_eq!(c.surface().font(), before);

    let chosen = before.with_size(18);
    c.dialogs_mut().fonts.push_back(Picked::Selected(chosen));
    assert!(c.pick_font());
    assert_eq!(c.surface().font().size_pt, 18);
}

#[test]
fn color_applies_only_on_confirmation() {
    let mut c = controller();
    assert!(!c.pick_color());
    assert_eq!(c.text_color(), TextColor::BLACK);

    let red = TextColor::rgb(255, 0, 0);
    c.dialogs_mut().colors.push_back(Picked::Selected(red));
    assert!(c.pick_color());
    assert_eq!(c.text_color(), red);
}

#[test]
fn about_shows_static_message() {
    let mut c = controller();
    c.show_about();
    assert_eq!(c.dialogs().messages[0].0, MessageKind::About);
    assert!(c.dialogs().messages[0].1.contains(APP_NAME));
    assert!(!c.is_modified());
}

#[test]
fn edit_actions_delegate_to_surface() {
    let mut c = controller();
    type_text(&mut c, "abc");
    c.surface_mut().select_all();
    c.cut();
    assert_eq!(c.surface().text(), "");
    c.paste();
    c.paste();
    assert_eq!(c.surface().text(), "abcabc");
    c.undo();
    assert_eq!(c.surface().text(), "abc");
    c.redo();
    assert_eq!(c.surface().text(), "abcabc");
    c.surface_mut().select_all();
    c.copy();
    assert_eq!(c.surface().clipboard(), "abcabc");
}

#[test]
fn quit_is_guarded() {
    let mut c = controller();
    assert!(c.request_quit());

    type_text(&mut c, "unsaved");
    c.dialogs_mut().discard.push_back(DiscardChoice::Cancel);
    assert!(!c.request_quit());
    c.dialogs_mut().discard.push_back(DiscardChoice::Discard);
    assert!(c.request_quit());
}
