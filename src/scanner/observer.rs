use crate::reporter::ScanPhase;

/// Receives scan callbacks from the worker thread.
///
/// Implementations must be cheap: the scanner calls these inline between
/// filesystem operations.
pub trait ScanObserver: Send + Sync {
    /// The scanner moved on to a new directory.
    fn on_directory_changed(&self, directory: &str);

    /// Every item in `directory` has been processed.
    fn on_directory_scanned(&self, directory: &str);

    fn on_state_changed(&self, phase: ScanPhase);

    /// Overall progress across all directories.
    fn on_set_progress(&self, current: u64, total: u64);

    /// Progress within the current directory.
    fn on_set_current_progress(&self, current: u64, total: u64);

    /// Label of the item being processed.
    fn on_set_title(&self, title: &str);

    /// The scan ended, successfully or not. Always the last callback.
    fn on_finished(&self);
}
