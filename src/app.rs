use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::dialog::{ScanDialog, ScanNotification};
use crate::scanner::{LibraryScanner, ScanError, ScanOptions, ScanSummary};
use crate::ui::{ColorScheme, Command, ConfirmAction, DialogView, InputMode, StringTable};
use crate::url;

/// Most recent scanned directories kept for the history panel
const HISTORY_LEN: usize = 8;
const NOTIFICATION_QUEUE: usize = 256;

/// Application state
pub struct App {
    pub options: ScanOptions,
    pub dialog: Arc<ScanDialog>,
    pub strings: StringTable,
    pub color_scheme: ColorScheme,
    pub input_mode: InputMode,

    // Scan state
    pub scan_state: ScanState,
    /// Projection sampled on the last tick, None while the dialog is hidden
    pub view: Option<DialogView>,
    /// Scanned directories, newest first, credentials stripped
    pub history: VecDeque<String>,
    /// Dialog hidden by the user while the scan keeps running
    pub in_background: bool,
    notifications: Receiver<ScanNotification>,
    scan_thread: Option<JoinHandle<Result<ScanSummary, ScanError>>>,
    cancel_flag: Option<Arc<AtomicBool>>,

    // Animation
    pub spinner_frame: usize,
    pub last_spinner_update: Instant,

    pub should_quit: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScanState {
    Idle,
    Scanning,
    Complete(ScanSummary),
    Cancelled,
    Error(String),
}

impl App {
    pub fn new(
        options: ScanOptions,
        background_update: bool,
        strings: StringTable,
        color_scheme: ColorScheme,
    ) -> Self {
        let (tx, rx) = mpsc::sync_channel(NOTIFICATION_QUEUE);

        Self {
            options,
            dialog: Arc::new(ScanDialog::new(tx, background_update)),
            strings,
            color_scheme,
            input_mode: InputMode::Normal,
            scan_state: ScanState::Idle,
            view: None,
            history: VecDeque::with_capacity(HISTORY_LEN),
            in_background: false,
            notifications: rx,
            scan_thread: None,
            cancel_flag: None,
            spinner_frame: 0,
            last_spinner_update: Instant::now(),
            should_quit: false,
        }
    }

    /// Start scanning in background thread
    pub fn start_scan(&mut self) {
        if self.scan_state == ScanState::Scanning {
            return;
        }

        info!(sources = ?self.options.sources, "starting library scan");
        self.scan_state = ScanState::Scanning;
        self.history.clear();
        self.in_background = false;
        self.dialog.show_scan();

        let scanner = LibraryScanner::new(self.options.clone(), self.dialog.clone());
        self.cancel_flag = Some(scanner.cancel_flag());
        self.scan_thread = Some(thread::spawn(move || scanner.scan()));
    }

    /// Sample the dialog and drain scanner notifications. Called once per tick.
    pub fn update(&mut self) {
        loop {
            match self.notifications.try_recv() {
                Ok(ScanNotification::DirectoryScanned(dir)) => {
                    if self.history.len() == HISTORY_LEN {
                        self.history.pop_back();
                    }
                    self.history.push_front(url::display_path(&dir));
                }
                Ok(ScanNotification::ScanFinished) => self.finish_scan(),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => break,
            }
        }

        // Finished notification may have been dropped on a full queue
        if self.scan_state == ScanState::Scanning
            && self.scan_thread.as_ref().is_some_and(|h| h.is_finished())
        {
            self.finish_scan();
        }

        if self.dialog.close_requested() {
            self.dialog.close();
        }

        self.view = if self.in_background {
            None
        } else {
            self.dialog.frame_move(&self.strings)
        };

        if self.last_spinner_update.elapsed() >= Duration::from_millis(80) {
            self.spinner_frame = self.spinner_frame.wrapping_add(1);
            self.last_spinner_update = Instant::now();
        }
    }

    fn finish_scan(&mut self) {
        let Some(handle) = self.scan_thread.take() else {
            return;
        };
        self.cancel_flag = None;

        self.scan_state = match handle.join() {
            Ok(Ok(summary)) => ScanState::Complete(summary),
            Ok(Err(ScanError::Interrupted)) => ScanState::Cancelled,
            Ok(Err(err)) => ScanState::Error(err.to_string()),
            Err(_) => {
                warn!("scanner thread panicked");
                ScanState::Error("scanner thread panicked".to_string())
            }
        };
    }

    fn request_cancel(&self) {
        if let Some(flag) = &self.cancel_flag {
            flag.store(true, Ordering::Relaxed);
        }
    }

    pub fn is_scanning(&self) -> bool {
        self.scan_state == ScanState::Scanning
    }

    pub fn handle_command(&mut self, command: Command) {
        match command {
            Command::Quit => {
                if self.is_scanning() {
                    self.input_mode = InputMode::Confirm(ConfirmAction::Quit);
                } else {
                    self.should_quit = true;
                }
            }
            Command::CancelScan => {
                if self.is_scanning() {
                    self.input_mode = InputMode::Confirm(ConfirmAction::CancelScan);
                }
            }
            Command::ToggleBackground => {
                if self.is_scanning() {
                    self.in_background = !self.in_background;
                }
            }
            Command::Rescan => {
                if !self.is_scanning() {
                    self.start_scan();
                }
            }
            Command::Confirm => {
                if let InputMode::Confirm(action) = self.input_mode {
                    self.request_cancel();
                    if action == ConfirmAction::Quit {
                        self.should_quit = true;
                    }
                }
                self.input_mode = InputMode::Normal;
            }
            Command::Cancel => {
                self.input_mode = InputMode::Normal;
            }
            Command::Noop => {}
        }
    }

    /// Current spinner character
    pub fn spinner_char(&self) -> char {
        const SPINNER: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
        SPINNER[self.spinner_frame % SPINNER.len()]
    }

    /// Stop a running scan and wait for the worker to exit.
    pub fn shutdown(&mut self) {
        self.request_cancel();
        if let Some(handle) = self.scan_thread.take() {
            let _ = handle.join();
        }
    }
}
