use super::*;
use crate::kernel::format::{FontSpec, TextColor};
use crate::kernel::print::PageSetup;
use tempfile::tempdir;

fn document() -> PrintDocument {
    PrintDocument::from_text(
        "notes.txt",
        "hello printer\nsecond line",
        FontSpec::default(),
        TextColor::BLACK,
    )
}

#[test]
fn pdf_destination_writes_a_pdf_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("notes.pdf");
    let settings = PrinterSettings::pdf(path.clone(), PageSetup::default());

    SystemPrintDevice::new().print(&document(), &settings).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
}

#[test]
fn pdf_into_missing_directory_is_an_io_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("typo").join("notes.pdf");
    let settings = PrinterSettings::pdf(path, PageSetup::default());

    let err = SystemPrintDevice::new()
        .print(&document(), &settings)
        .unwrap_err();
    assert!(matches!(err, PrintError::Io(_)));
    assert!(!dir.path().join("typo").exists());
}

#[test]
fn missing_spooler_is_reported_as_unavailable() {
    let mut device = SystemPrintDevice::with_spool_command("zpad-no-such-spooler-binary");
    let err = device
        .print(&document(), &PrinterSettings::default())
        .unwrap_err();
    assert!(matches!(err, PrintError::SpoolerUnavailable { .. }));
    assert!(err.to_string().contains("zpad-no-such-spooler-binary"));
}

#[cfg(unix)]
#[test]
fn failing_spooler_is_reported_with_status() {
    let mut device = SystemPrintDevice::with_spool_command("false");
    let err = device
        .print(&document(), &PrinterSettings::default())
        .unwrap_err();
    assert!(matches!(err, PrintError::SpoolerFailed { .. }));
}

#[cfg(unix)]
#[test]
fn spooler_receives_options() {
    // `true` ignores its arguments and stdin; success means the pipeline ran end to end.
    let mut device = SystemPrintDevice::with_spool_command("true");
    let settings = PrinterSettings {
        destination: PrintDestination::Printer {
            name: Some("office".to_string()),
        },
        copies: 3,
        page: PageSetup::default(),
    };
    device.print(&document(), &settings).unwrap();
}

#[test]
fn blank_spool_command_falls_back_to_lp() {
    assert_eq!(SystemPrintDevice::with_spool_command("  ").spool_command(), "lp");
}
