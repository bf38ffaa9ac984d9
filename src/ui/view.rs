//! Render projection of a progress snapshot.

use serde::Serialize;

use crate::reporter::{is_visible, ScanPhase, ScanProgressState};
use crate::url;

use super::strings::{phase_message_key, StringTable};

/// Phases during which directory, title and progress bars are shown.
pub fn shows_details(phase: ScanPhase) -> bool {
    matches!(
        phase,
        ScanPhase::FetchingMovieInfo
            | ScanPhase::FetchingMusicVideoInfo
            | ScanPhase::FetchingTvShowInfo
            | ScanPhase::CleaningDatabase
    )
}

/// What the dialog draws for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DialogView {
    pub phase: ScanPhase,
    /// Status line, None when the phase has no message
    pub status: Option<String>,
    /// Directory with credentials stripped, empty when hidden
    pub directory: String,
    pub title: String,
    /// Overall bar percent, None when the bar is hidden
    pub overall: Option<f32>,
    /// Current item bar percent, None when the bar is hidden
    pub current: Option<f32>,
}

impl DialogView {
    pub fn project(state: &ScanProgressState, strings: &StringTable) -> Self {
        let status = phase_message_key(state.phase).map(|key| strings.get(key).to_string());

        if !shows_details(state.phase) {
            return Self {
                phase: state.phase,
                status,
                directory: String::new(),
                title: String::new(),
                overall: None,
                current: None,
            };
        }

        Self {
            phase: state.phase,
            status,
            directory: url::display_path(&state.current_directory),
            title: state.title.clone(),
            overall: is_visible(state.overall_percent).then_some(state.overall_percent),
            current: is_visible(state.current_item_percent).then_some(state.current_item_percent),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(phase: ScanPhase) -> ScanProgressState {
        ScanProgressState {
            phase,
            current_directory: "smb://bob:pw@nas/Films/Heat".to_string(),
            title: "Heat (1995)".to_string(),
            overall_percent: 40.0,
            current_item_percent: 75.0,
        }
    }

    #[test]
    fn test_fetching_shows_everything() {
        let view = DialogView::project(&state(ScanPhase::FetchingTvShowInfo), &StringTable::default());
        assert_eq!(view.status.as_deref(), Some("Downloading TV show information"));
        assert_eq!(view.directory, "smb://nas/Films/Heat");
        assert_eq!(view.title, "Heat (1995)");
        assert_eq!(view.overall, Some(40.0));
        assert_eq!(view.current, Some(75.0));
    }

    #[test]
    fn test_every_fetching_phase_shows_details() {
        for phase in [
            ScanPhase::FetchingMovieInfo,
            ScanPhase::FetchingMusicVideoInfo,
            ScanPhase::FetchingTvShowInfo,
            ScanPhase::CleaningDatabase,
        ] {
            assert!(shows_details(phase), "{:?}", phase);
            let view = DialogView::project(&state(phase), &StringTable::default());
            assert!(view.status.is_some());
            assert_eq!(view.directory, "smb://nas/Films/Heat");
            assert_eq!(view.title, "Heat (1995)");
            assert_eq!(view.overall, Some(40.0));
            assert_eq!(view.current, Some(75.0));
        }
        assert!(!shows_details(ScanPhase::Idle));
        assert!(!shows_details(ScanPhase::Preparing));
    }

    #[test]
    fn test_idle_hides_details() {
        let view = DialogView::project(&state(ScanPhase::Idle), &StringTable::default());
        assert_eq!(view.status, None);
        assert_eq!(view.directory, "");
        assert_eq!(view.title, "");
        assert_eq!(view.overall, None);
        assert_eq!(view.current, None);
    }

    #[test]
    fn test_non_detail_phases() {
        for phase in [
            ScanPhase::Preparing,
            ScanPhase::RemovingOld,
            ScanPhase::CompressingDatabase,
            ScanPhase::WritingChanges,
        ] {
            let view = DialogView::project(&state(phase), &StringTable::default());
            assert!(view.status.is_some());
            assert!(view.directory.is_empty());
            assert!(view.overall.is_none() && view.current.is_none());
        }
    }

    #[test]
    fn test_cleaning_shows_details() {
        let view = DialogView::project(&state(ScanPhase::CleaningDatabase), &StringTable::default());
        assert_eq!(view.status.as_deref(), Some("Cleaning up library"));
        assert_eq!(view.overall, Some(40.0));
    }

    #[test]
    fn test_bars_hidden_independently() {
        let mut s = state(ScanPhase::FetchingMovieInfo);
        s.overall_percent = -1.0;
        let view = DialogView::project(&s, &StringTable::default());
        assert_eq!(view.overall, None);
        assert_eq!(view.current, Some(75.0));

        let mut s = state(ScanPhase::FetchingMovieInfo);
        s.current_item_percent = -1.0;
        s.overall_percent = 0.0;
        let view = DialogView::project(&s, &StringTable::default());
        assert_eq!(view.overall, Some(0.0));
        assert_eq!(view.current, None);
    }
}
