mod app;
mod config;
mod dialog;
mod library;
mod logging;
mod reporter;
mod scanner;
mod ui;
mod url;

use std::io::{self, Write};
use std::panic;
use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use serde::Serialize;

use app::App;
use config::AppConfig;
use dialog::{ScanDialog, ScanNotification};
use scanner::{ContentType, LibraryScanner, ScanOptions, ScanSummary};
use ui::{handle_key, ColorScheme, DialogView, StringTable};

#[derive(Parser, Debug)]
#[command(name = "medialib-scan")]
#[command(version)]
#[command(about = "Scan media folders into a library with a live progress dialog", long_about = None)]
struct Args {
    /// Source directories to scan
    #[arg(required = true)]
    sources: Vec<String>,

    /// What the sources contain (default from config)
    #[arg(short, long, value_enum)]
    content: Option<ContentType>,

    /// Maximum depth to scan
    #[arg(short, long)]
    depth: Option<usize>,

    /// Patterns to exclude (can be repeated)
    #[arg(short = 'x', long = "exclude", action = clap::ArgAction::Append)]
    exclude: Vec<String>,

    /// Drop library entries outside the given sources
    #[arg(long)]
    clean: bool,

    /// Library file to update (default from config)
    #[arg(long)]
    library: Option<PathBuf>,

    /// Do not write the library, only report what would be scanned
    #[arg(long)]
    dry_run: bool,

    /// Config file (default: ~/.config/medialib-scan/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print progress as JSON lines instead of running the TUI
    #[arg(long)]
    json: bool,

    /// Keep the dialog open after the scan finishes
    #[arg(long)]
    background: bool,

    /// UI refresh interval in milliseconds
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Color scheme: default, dark, light, colorblind
    #[arg(long)]
    color_scheme: Option<String>,

    /// Disable colors
    #[arg(long)]
    no_color: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = AppConfig::load(args.config.as_deref())?;

    let _log_guard = logging::init_logger(&config.log_file(), &config.log_level, args.json)?;

    let library_path = if args.dry_run {
        None
    } else {
        Some(args.library.clone().unwrap_or_else(|| config.library_path()))
    };

    let scan_options = ScanOptions::new(args.sources.clone(), args.content.unwrap_or(config.content))
        .with_max_depth(args.depth)
        .with_exclude_patterns(args.exclude.clone())
        .with_extensions(config.extensions.clone())
        .with_library_path(library_path)
        .with_clean(args.clean);

    let strings = StringTable::with_overrides(&config.strings);
    let tick = Duration::from_millis(args.tick_ms.unwrap_or(config.tick_ms).max(1));

    if args.json {
        return run_json_mode(scan_options, &strings, tick);
    }

    let color_scheme = if args.no_color {
        ColorScheme::monochrome()
    } else {
        ColorScheme::from_name(args.color_scheme.as_deref().unwrap_or(&config.color_scheme))
    };
    let background_update = args.background || config.background_update;

    run_tui_mode(scan_options, background_update, strings, color_scheme, tick)
}

/// One line of headless output.
#[derive(Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum JsonEvent<'a> {
    Progress(&'a DialogView),
    DirectoryScanned { directory: String },
    Finished(&'a ScanSummary),
    Failed { error: String },
}

fn emit(out: &mut impl Write, event: &JsonEvent) -> Result<()> {
    serde_json::to_writer(&mut *out, event)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

/// Sample the dialog on every tick and print each changed projection.
fn run_json_mode(options: ScanOptions, strings: &StringTable, tick: Duration) -> Result<()> {
    let (tx, rx) = mpsc::sync_channel(1024);
    let dialog = Arc::new(ScanDialog::new(tx, true));
    dialog.show_scan();

    let scanner = LibraryScanner::new(options, dialog.clone());
    let handle = thread::spawn(move || scanner.scan());

    let mut stdout = io::stdout().lock();
    let mut last: Option<DialogView> = None;

    loop {
        let finished = handle.is_finished();

        if let Some(view) = dialog.frame_move(strings) {
            if last.as_ref() != Some(&view) {
                emit(&mut stdout, &JsonEvent::Progress(&view))?;
                last = Some(view);
            }
        }

        while let Ok(notification) = rx.try_recv() {
            if let ScanNotification::DirectoryScanned(dir) = notification {
                emit(
                    &mut stdout,
                    &JsonEvent::DirectoryScanned {
                        directory: url::display_path(&dir),
                    },
                )?;
            }
        }

        if finished {
            break;
        }
        thread::sleep(tick);
    }

    let result = handle
        .join()
        .map_err(|_| anyhow::anyhow!("scanner thread panicked"))?;
    match result {
        Ok(summary) => emit(&mut stdout, &JsonEvent::Finished(&summary)),
        Err(err) => {
            emit(
                &mut stdout,
                &JsonEvent::Failed {
                    error: err.to_string(),
                },
            )?;
            Err(err).context("library scan failed")
        }
    }
}

fn run_tui_mode(
    scan_options: ScanOptions,
    background_update: bool,
    strings: StringTable,
    color_scheme: ColorScheme,
    tick: Duration,
) -> Result<()> {
    // Set up panic handler to restore terminal on crash
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut app = App::new(scan_options, background_update, strings, color_scheme);
    app.start_scan();

    let result = run_app(&mut terminal, &mut app, tick);
    app.shutdown();

    // Restore terminal
    let cleanup_result = cleanup_terminal(&mut terminal);
    result.and(cleanup_result)
}

/// Clean up terminal state.
fn cleanup_terminal<B: ratatui::backend::Backend + Write>(terminal: &mut Terminal<B>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    tick: Duration,
) -> Result<()> {
    loop {
        // Sample scan progress
        app.update();

        terminal.draw(|frame| ui::render_ui(frame, app))?;

        // Handle input with timeout (drives the refresh tick)
        if event::poll(tick)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press, not release
                if key.kind == KeyEventKind::Press {
                    let command = handle_key(key, &app.input_mode);
                    app.handle_command(command);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
