//! Scan progress dialog: the scanner-facing side of the UI.
//!
//! The scanner thread calls the [`ScanObserver`] methods, which only write
//! into the dialog's [`ScanProgressReporter`]. The UI thread calls
//! [`ScanDialog::frame_move`] once per tick to sample it. Directory and
//! completion events go out through an injected notification channel.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{SyncSender, TrySendError};

use tracing::{debug, info};

use crate::reporter::{ScanPhase, ScanProgressReporter};
use crate::scanner::ScanObserver;
use crate::ui::{DialogView, StringTable};

/// Events the dialog forwards to the rest of the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanNotification {
    /// All items of a directory were processed (raw path)
    DirectoryScanned(String),
    /// The scan ended and the library may have changed
    ScanFinished,
}

pub struct ScanDialog {
    reporter: ScanProgressReporter,
    notifications: SyncSender<ScanNotification>,
    /// Stay open after the scan finishes
    background_update: bool,
    active: AtomicBool,
    close_requested: AtomicBool,
}

impl ScanDialog {
    pub fn new(notifications: SyncSender<ScanNotification>, background_update: bool) -> Self {
        Self {
            reporter: ScanProgressReporter::new(),
            notifications,
            background_update,
            active: AtomicBool::new(false),
            close_requested: AtomicBool::new(false),
        }
    }

    /// Open the dialog for a new scan with fresh progress state.
    pub fn show_scan(&self) {
        self.reporter.reset();
        self.close_requested.store(false, Ordering::SeqCst);
        self.active.store(true, Ordering::SeqCst);
    }

    pub fn close(&self) {
        self.active.store(false, Ordering::SeqCst);
        self.close_requested.store(false, Ordering::SeqCst);
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Set once the scan finished and the dialog should go away.
    pub fn close_requested(&self) -> bool {
        self.close_requested.load(Ordering::SeqCst)
    }

    pub fn reporter(&self) -> &ScanProgressReporter {
        &self.reporter
    }

    /// Sample the reporter and project it for rendering. None while hidden.
    pub fn frame_move(&self, strings: &StringTable) -> Option<DialogView> {
        if !self.is_active() {
            return None;
        }
        Some(DialogView::project(&self.reporter().snapshot(), strings))
    }

    fn notify(&self, notification: ScanNotification) {
        // Never stall the scanner on a slow or absent UI
        match self.notifications.try_send(notification) {
            Ok(()) => {}
            Err(TrySendError::Full(n)) => debug!(?n, "notification queue full, dropping"),
            Err(TrySendError::Disconnected(n)) => debug!(?n, "no notification listener"),
        }
    }
}

impl ScanObserver for ScanDialog {
    fn on_directory_changed(&self, directory: &str) {
        self.reporter.set_directory(directory);
    }

    fn on_directory_scanned(&self, directory: &str) {
        self.notify(ScanNotification::DirectoryScanned(directory.to_string()));
    }

    fn on_state_changed(&self, phase: ScanPhase) {
        self.reporter.set_phase(phase);
    }

    fn on_set_progress(&self, current: u64, total: u64) {
        self.reporter.set_overall_progress(current, total);
    }

    fn on_set_current_progress(&self, current: u64, total: u64) {
        self.reporter.set_current_item_progress(current, total);
    }

    fn on_set_title(&self, title: &str) {
        self.reporter.set_title(title);
    }

    fn on_finished(&self) {
        self.notify(ScanNotification::ScanFinished);
        info!("library scan stopped or finished");

        if !self.background_update {
            self.close_requested.store(true, Ordering::SeqCst);
        }
    }
}
