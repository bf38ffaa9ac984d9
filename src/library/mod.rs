//! Persistent media library updated by the scanner.
//!
//! Stored as a single JSON document. Writes go to a temporary sibling file
//! which is then renamed over the old one.

mod title;

pub use title::parse_file_name;

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::scanner::ContentType;

const LIBRARY_VERSION: u32 = 1;

/// Errors raised while loading or saving the library.
#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("cannot access library {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("corrupt library {path}: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("library {path} has version {found}, expected {expected}")]
    Version {
        path: PathBuf,
        found: u32,
        expected: u32,
    },
}

/// One media file known to the library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaEntry {
    pub path: PathBuf,
    pub title: String,
    pub year: Option<u16>,
    /// `(season, episode)` for TV episodes
    pub episode: Option<(u16, u16)>,
    pub content: ContentType,
    pub added: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Library {
    pub version: u32,
    pub updated: Option<DateTime<Utc>>,
    entries: Vec<MediaEntry>,
    /// Paths of `entries`, kept in sync by every mutating method
    #[serde(skip)]
    index: HashSet<PathBuf>,
}

impl Default for Library {
    fn default() -> Self {
        Self {
            version: LIBRARY_VERSION,
            updated: None,
            entries: Vec::new(),
            index: HashSet::new(),
        }
    }
}

impl Library {
    /// Load the library at `path`. A missing file gives an empty library.
    pub fn load(path: &Path) -> Result<Self, LibraryError> {
        if !path.exists() {
            debug!(path = %path.display(), "no library yet, starting empty");
            return Ok(Self::default());
        }

        let data = fs::read(path).map_err(|source| LibraryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut library: Library =
            serde_json::from_slice(&data).map_err(|source| LibraryError::Format {
                path: path.to_path_buf(),
                source,
            })?;

        if library.version != LIBRARY_VERSION {
            return Err(LibraryError::Version {
                path: path.to_path_buf(),
                found: library.version,
                expected: LIBRARY_VERSION,
            });
        }

        library.rebuild_index();
        Ok(library)
    }

    /// Write the library to `path`, creating parent directories.
    pub fn save(&mut self, path: &Path) -> Result<(), LibraryError> {
        let io_err = |source| LibraryError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        self.updated = Some(Utc::now());
        let json = serde_json::to_vec_pretty(self).map_err(|source| LibraryError::Format {
            path: path.to_path_buf(),
            source,
        })?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(io_err)?;
        fs::rename(&tmp, path).map_err(io_err)?;

        info!(path = %path.display(), entries = self.entries.len(), "library saved");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.index.contains(path)
    }

    /// Add a new entry. Returns false if the path is already known.
    pub fn insert(&mut self, entry: MediaEntry) -> bool {
        if !self.index.insert(entry.path.clone()) {
            return false;
        }
        self.entries.push(entry);
        true
    }

    /// Drop entries whose file no longer exists. Returns how many were removed.
    pub fn remove_missing(&mut self) -> usize {
        let missing: HashSet<PathBuf> = self
            .entries
            .par_iter()
            .filter(|e| !e.path.exists())
            .map(|e| e.path.clone())
            .collect();

        self.entries.retain(|e| !missing.contains(&e.path));
        self.index.retain(|p| !missing.contains(p));
        missing.len()
    }

    /// Drop entries that are not under any of `sources`.
    pub fn remove_outside(&mut self, sources: &[PathBuf]) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|e| sources.iter().any(|s| e.path.starts_with(s)));
        self.rebuild_index();
        before - self.entries.len()
    }

    /// Remove duplicate paths, keeping the first, and sort by path.
    pub fn compact(&mut self) -> usize {
        let before = self.entries.len();
        let mut seen = HashSet::new();
        self.entries.retain(|e| seen.insert(e.path.clone()));
        self.entries.sort_by(|a, b| a.path.cmp(&b.path));
        self.index = seen;
        before - self.entries.len()
    }

    fn rebuild_index(&mut self) {
        self.index = self.entries.iter().map(|e| e.path.clone()).collect();
    }
}
