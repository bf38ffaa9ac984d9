//! Thread-safe mailbox for library scan progress.
//!
//! The scanning worker writes individual fields through the setters; the UI
//! refresh tick reads a full copy with [`ScanProgressReporter::snapshot`].
//! Every operation holds the same lock for its whole duration, so a reader
//! never observes a half-written field. Nothing is queued: a snapshot sees
//! the latest completed write of each field.

mod percent;

pub use percent::{is_visible, percent_of, HIDDEN};

use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use tracing::{debug, trace};

/// Stage of a library scan.
///
/// Phases form an unordered set. The usual order is Preparing, RemovingOld,
/// one or more Fetching phases, CleaningDatabase, CompressingDatabase,
/// WritingChanges, Idle, but nothing here enforces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanPhase {
    Preparing,
    RemovingOld,
    CleaningDatabase,
    FetchingMovieInfo,
    FetchingMusicVideoInfo,
    FetchingTvShowInfo,
    CompressingDatabase,
    WritingChanges,
    Idle,
}

impl ScanPhase {
    /// Every phase, in the order a full scan normally visits them.
    #[cfg(test)]
    pub const ALL: [ScanPhase; 9] = [
        ScanPhase::Preparing,
        ScanPhase::RemovingOld,
        ScanPhase::FetchingMovieInfo,
        ScanPhase::FetchingMusicVideoInfo,
        ScanPhase::FetchingTvShowInfo,
        ScanPhase::CleaningDatabase,
        ScanPhase::CompressingDatabase,
        ScanPhase::WritingChanges,
        ScanPhase::Idle,
    ];
}

/// Copy of the shared progress state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanProgressState {
    pub phase: ScanPhase,
    /// Raw directory as reported by the scanner (may contain credentials)
    pub current_directory: String,
    pub title: String,
    /// Overall percent in `[-1, 100]`, -1 when hidden
    pub overall_percent: f32,
    /// Percent of the current item in `[-1, 100]`, -1 when hidden
    pub current_item_percent: f32,
}

impl Default for ScanProgressState {
    fn default() -> Self {
        Self {
            phase: ScanPhase::Preparing,
            current_directory: String::new(),
            title: String::new(),
            overall_percent: HIDDEN,
            current_item_percent: HIDDEN,
        }
    }
}

/// Lock-guarded progress state shared between a scanner and a UI sampler.
#[derive(Debug, Default)]
pub struct ScanProgressReporter {
    state: Mutex<ScanProgressState>,
}

impl ScanProgressReporter {
    /// Create a reporter in the reset state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the directory currently being scanned. No validation is done.
    pub fn set_directory(&self, path: impl Into<String>) {
        self.lock().current_directory = path.into();
    }

    /// Store a new phase. Any phase may follow any other.
    pub fn set_phase(&self, phase: ScanPhase) {
        let mut state = self.lock();
        if state.phase != phase {
            trace!(from = ?state.phase, to = ?phase, "scan phase changed");
        }
        state.phase = phase;
    }

    /// Store `min(100, 100 * current / total)` as the overall percent.
    ///
    /// A zero `total` leaves the stored value unchanged.
    pub fn set_overall_progress(&self, current: u64, total: u64) {
        match percent_of(current, total) {
            Some(percent) => self.lock().overall_percent = percent,
            None => debug!(current, "ignoring overall progress with zero total"),
        }
    }

    /// Same contract as [`set_overall_progress`](Self::set_overall_progress)
    /// for the current item bar.
    pub fn set_current_item_progress(&self, current: u64, total: u64) {
        match percent_of(current, total) {
            Some(percent) => self.lock().current_item_percent = percent,
            None => debug!(current, "ignoring item progress with zero total"),
        }
    }

    pub fn set_title(&self, text: impl Into<String>) {
        self.lock().title = text.into();
    }

    /// Return to Preparing with empty labels and hidden bars.
    pub fn reset(&self) {
        *self.lock() = ScanProgressState::default();
    }

    /// Copy every field under a single lock acquisition.
    pub fn snapshot(&self) -> ScanProgressState {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, ScanProgressState> {
        // The guarded fields are plain values and stay valid even if a
        // writer panicked mid-scan.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_new_reporter_is_reset() {
        let reporter = ScanProgressReporter::new();
        assert_eq!(reporter.snapshot(), ScanProgressState::default());
    }

    #[test]
    fn test_overall_progress() {
        let reporter = ScanProgressReporter::new();
        reporter.set_overall_progress(50, 100);
        assert_eq!(reporter.snapshot().overall_percent, 50.0);
    }

    #[test]
    fn test_overall_progress_clamped() {
        let reporter = ScanProgressReporter::new();
        reporter.set_overall_progress(150, 100);
        assert_eq!(reporter.snapshot().overall_percent, 100.0);
    }

    #[test]
    fn test_progress_with_huge_counts() {
        let reporter = ScanProgressReporter::new();
        reporter.set_overall_progress(1 << 62, 1 << 62);
        reporter.set_current_item_progress(u64::MAX, u64::MAX);
        let snap = reporter.snapshot();
        assert_eq!(snap.overall_percent, 100.0);
        assert_eq!(snap.current_item_percent, 100.0);
    }

    #[test]
    fn test_zero_total_is_noop() {
        let reporter = ScanProgressReporter::new();
        reporter.set_overall_progress(3, 4);
        reporter.set_current_item_progress(1, 2);

        reporter.set_overall_progress(1, 0);
        reporter.set_current_item_progress(1, 0);

        let snap = reporter.snapshot();
        assert_eq!(snap.overall_percent, 75.0);
        assert_eq!(snap.current_item_percent, 50.0);
    }

    #[test]
    fn test_fields_are_independent() {
        let reporter = ScanProgressReporter::new();
        reporter.set_phase(ScanPhase::FetchingTvShowInfo);
        reporter.set_directory("/media/tv");
        reporter.set_title("Some Show");
        reporter.set_current_item_progress(1, 4);

        let snap = reporter.snapshot();
        assert_eq!(snap.phase, ScanPhase::FetchingTvShowInfo);
        assert_eq!(snap.current_directory, "/media/tv");
        assert_eq!(snap.title, "Some Show");
        assert_eq!(snap.current_item_percent, 25.0);
        assert_eq!(snap.overall_percent, HIDDEN);
    }

    #[test]
    fn test_any_phase_may_follow_any_other() {
        let reporter = ScanProgressReporter::new();
        for phase in ScanPhase::ALL.iter().rev() {
            reporter.set_phase(*phase);
            assert_eq!(reporter.snapshot().phase, *phase);
        }
        reporter.set_phase(ScanPhase::WritingChanges);
        reporter.set_phase(ScanPhase::Preparing);
        assert_eq!(reporter.snapshot().phase, ScanPhase::Preparing);
    }

    #[test]
    fn test_reset() {
        let reporter = ScanProgressReporter::new();
        reporter.set_phase(ScanPhase::Idle);
        reporter.set_directory("smb://nas/movies");
        reporter.set_title("Alien");
        reporter.set_overall_progress(9, 10);
        reporter.set_current_item_progress(10, 10);

        reporter.reset();

        let snap = reporter.snapshot();
        assert_eq!(snap.phase, ScanPhase::Preparing);
        assert_eq!(snap.current_directory, "");
        assert_eq!(snap.title, "");
        assert_eq!(snap.overall_percent, -1.0);
        assert_eq!(snap.current_item_percent, -1.0);
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let reporter = ScanProgressReporter::new();
        reporter.set_title("before");
        let snap = reporter.snapshot();
        reporter.set_title("after");
        assert_eq!(snap.title, "before");
    }

    #[test]
    fn test_concurrent_snapshots_never_tear() {
        let reporter = Arc::new(ScanProgressReporter::new());
        let done = Arc::new(AtomicBool::new(false));

        let long_a = "a".repeat(512);
        let long_b = "b".repeat(1024);

        let writer = {
            let reporter = Arc::clone(&reporter);
            let done = Arc::clone(&done);
            let (long_a, long_b) = (long_a.clone(), long_b.clone());
            thread::spawn(move || {
                for i in 0..5_000u64 {
                    let text = if i % 2 == 0 { &long_a } else { &long_b };
                    reporter.set_directory(text.clone());
                    reporter.set_title(text.clone());
                    reporter.set_overall_progress(i % 101, 100);
                    reporter.set_current_item_progress(i, 5_000);
                }
                done.store(true, Ordering::SeqCst);
            })
        };

        let mut samples = 0;
        while !done.load(Ordering::SeqCst) || samples == 0 {
            let snap = reporter.snapshot();
            for field in [&snap.current_directory, &snap.title] {
                assert!(
                    field.is_empty() || *field == long_a || *field == long_b,
                    "torn string of length {}",
                    field.len()
                );
            }
            for percent in [snap.overall_percent, snap.current_item_percent] {
                assert!(percent == HIDDEN || (0.0..=100.0).contains(&percent));
                assert_eq!(percent.fract(), 0.0);
            }
            samples += 1;
        }

        writer.join().unwrap();
        let last = reporter.snapshot();
        assert_eq!(last.current_directory, long_b);
        assert_eq!(last.current_item_percent, 99.0);
    }

    #[test]
    fn test_poisoned_lock_is_recovered() {
        let reporter = Arc::new(ScanProgressReporter::new());
        {
            let reporter = Arc::clone(&reporter);
            let _ = thread::spawn(move || {
                let _guard = reporter.state.lock().unwrap();
                panic!("writer died while holding the lock");
            })
            .join();
        }

        reporter.set_title("still usable");
        assert_eq!(reporter.snapshot().title, "still usable");
    }
}
