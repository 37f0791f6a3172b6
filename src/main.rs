use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io;
use std::path::PathBuf;

use zpad::app::{Notepad, TuiHost, UiTheme};
use zpad::kernel::print::PageSetup;
use zpad::kernel::services::adapters::{
    ensure_settings_file, load_settings_from, KeybindingService, LocalFileProvider,
    SystemPrintDevice,
};
use zpad::kernel::services::ports::{
    PrintDestination, PrinterSettings, Settings, TextSurface,
};
use zpad::kernel::{DocumentSurface, EditorController};
use zpad::tui::terminal_guard::{install_termination_signals, SHUTDOWN_GRACE};
use zpad::tui::{CrosstermEvents, Osc52Clipboard, TerminalGuard};

mod logging;

const USAGE: &str = "usage: zpad [PATH]";

fn parse_args() -> Result<Option<PathBuf>, String> {
    let mut path = None;
    for arg in std::env::args_os().skip(1) {
        match arg.to_str() {
            Some("-h") | Some("--help") => return Err(USAGE.to_string()),
            Some("-V") | Some("--version") => {
                return Err(format!("zpad {}", env!("CARGO_PKG_VERSION")))
            }
            _ if path.is_some() => return Err(USAGE.to_string()),
            _ => path = Some(PathBuf::from(arg)),
        }
    }
    Ok(path)
}

fn load_settings() -> Settings {
    let path = match ensure_settings_file() {
        Ok(path) => path,
        Err(err) => {
            tracing::warn!(error = %err, "settings unavailable; using defaults");
            return Settings::default();
        }
    };
    match load_settings_from(&path) {
        Ok(settings) => settings,
        Err(err) => {
            tracing::warn!(error = %err, "settings rejected; using defaults");
            Settings::default()
        }
    }
}

fn main() -> io::Result<()> {
    let path = match parse_args() {
        Ok(path) => path,
        Err(message) => {
            println!("{message}");
            return Ok(());
        }
    };

    let _logging = logging::init();
    let settings = load_settings();

    let mut surface = DocumentSurface::with_undo_limit(settings.editor.undo_limit);
    surface.set_font(settings.editor.font);
    surface.set_text_color(settings.editor.color);

    let printer = SystemPrintDevice::with_spool_command(&settings.print.spool_command);
    let printer_settings = PrinterSettings {
        destination: PrintDestination::Printer {
            name: settings.print.default_printer.clone(),
        },
        page: PageSetup::with_paper(settings.print.paper),
        ..PrinterSettings::default()
    };

    let mut keybindings = KeybindingService::new();
    keybindings.apply_rules(&settings.keybindings);

    let guard = TerminalGuard::new()?;
    guard.install_panic_restore();
    let signals = install_termination_signals(guard.restorer(), SHUTDOWN_GRACE)?;
    let events = CrosstermEvents::with_signals(signals);

    let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    let host = TuiHost::new(terminal, events, UiTheme::from_settings(&settings.theme));

    let mut controller =
        EditorController::new(surface, host, printer, LocalFileProvider::new());
    controller.set_printer_settings(printer_settings);

    if let Some(path) = path {
        if path.exists() {
            controller.open_path(&path);
        } else {
            tracing::info!(path = %path.display(), "starting new file");
            controller.bind_path(path);
        }
    }

    let mut notepad = Notepad::new(controller, keybindings)
        .with_tab_size(settings.editor.tab_size)
        .with_clipboard_mirror(Osc52Clipboard::detect())
        .with_terminal_title(true);
    let result = notepad.run();

    drop(notepad);
    drop(guard);
    if let Err(err) = &result {
        tracing::error!(error = %err, "editor loop failed");
    }
    result
}
