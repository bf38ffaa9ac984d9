//! Message table for the scan dialog.
//!
//! Phases map to stable message keys; the [`StringTable`] turns keys into
//! display text. English defaults can be overridden per key from the config.

use std::collections::HashMap;

use crate::reporter::ScanPhase;

/// Message key shown in the status line for a phase. Idle has none.
pub fn phase_message_key(phase: ScanPhase) -> Option<&'static str> {
    match phase {
        ScanPhase::Preparing => Some("scan.preparing"),
        ScanPhase::RemovingOld => Some("scan.removing_old"),
        ScanPhase::CleaningDatabase => Some("scan.cleaning_database"),
        ScanPhase::FetchingMovieInfo => Some("scan.fetching_movie_info"),
        ScanPhase::FetchingMusicVideoInfo => Some("scan.fetching_musicvideo_info"),
        ScanPhase::FetchingTvShowInfo => Some("scan.fetching_tvshow_info"),
        ScanPhase::CompressingDatabase => Some("scan.compressing_database"),
        ScanPhase::WritingChanges => Some("scan.writing_changes"),
        ScanPhase::Idle => None,
    }
}

const DEFAULT_STRINGS: &[(&str, &str)] = &[
    ("scan.preparing", "Preparing..."),
    ("scan.removing_old", "Removing old items from library"),
    ("scan.cleaning_database", "Cleaning up library"),
    ("scan.fetching_movie_info", "Downloading movie information"),
    ("scan.fetching_musicvideo_info", "Downloading music video information"),
    ("scan.fetching_tvshow_info", "Downloading TV show information"),
    ("scan.compressing_database", "Compressing database"),
    ("scan.writing_changes", "Writing changes"),
    ("dialog.title", "Updating library"),
    ("dialog.background", "Scanning in background"),
    ("dialog.finished", "Library scan finished"),
    ("dialog.cancelled", "Library scan cancelled"),
    ("dialog.failed", "Library scan failed"),
];

#[derive(Debug, Clone)]
pub struct StringTable {
    strings: HashMap<String, String>,
}

impl Default for StringTable {
    fn default() -> Self {
        Self {
            strings: DEFAULT_STRINGS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl StringTable {
    /// Defaults with `overrides` replacing or adding entries.
    pub fn with_overrides(overrides: &HashMap<String, String>) -> Self {
        let mut table = Self::default();
        table
            .strings
            .extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
        table
    }

    /// Text for `key`, or the key itself when it is unknown.
    pub fn get<'a>(&'a self, key: &'a str) -> &'a str {
        self.strings.get(key).map(String::as_str).unwrap_or(key)
    }
}
