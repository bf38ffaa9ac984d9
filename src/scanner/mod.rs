//! Library scanner that walks media sources and reports progress.
//!
//! The scanner knows nothing about how progress is displayed; it talks to a
//! [`ScanObserver`] from its own thread.

mod observer;
mod walker;

pub use observer::ScanObserver;
pub use walker::{LibraryScanner, ScanOptions, ScanSummary};

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::library::LibraryError;
use crate::reporter::ScanPhase;

/// Kind of media a source holds, which selects the fetching phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Movies,
    #[value(name = "tvshows")]
    TvShows,
    #[value(name = "musicvideos")]
    MusicVideos,
}

impl ContentType {
    pub fn fetch_phase(self) -> ScanPhase {
        match self {
            ContentType::Movies => ScanPhase::FetchingMovieInfo,
            ContentType::TvShows => ScanPhase::FetchingTvShowInfo,
            ContentType::MusicVideos => ScanPhase::FetchingMusicVideoInfo,
        }
    }
}

/// Errors that can occur during a library scan.
#[derive(Error, Debug)]
pub enum ScanError {
    /// Permission denied when accessing a path
    #[error("permission denied: {path}")]
    PermissionDenied {
        /// The path that could not be accessed
        path: PathBuf,
    },

    /// The specified path does not exist
    #[error("path not found: {path}")]
    PathNotFound {
        /// The path that was not found
        path: PathBuf,
    },

    /// An I/O error occurred while accessing a path
    #[error("I/O error at {path}: {source}")]
    IoError {
        /// The path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The specified path is not a directory
    #[error("not a directory: {path}")]
    NotADirectory {
        /// The path that was expected to be a directory
        path: PathBuf,
    },

    /// Only local directories can be walked
    #[error("unsupported source (only local directories can be scanned): {source_url}")]
    UnsupportedSource { source_url: String },

    /// Loading or saving the library failed
    #[error(transparent)]
    Library(#[from] LibraryError),

    /// The scan was interrupted
    #[error("scan interrupted")]
    Interrupted,
}
