//! JSON-backed save history.
//!
//! The whole log is a single pretty-printed JSON array:
//! - oldest entry first, newest last
//! - rewritten in full on every append
//! - removed only by `clear`
//!
//! A missing file is an empty log. A file that fails to parse is either
//! treated as empty (lenient) or reported as `StoreError::CorruptLog` (strict).

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::StoreError;
use crate::platform;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const NO_MESSAGE: &str = "No message provided";

/// One audit record per successful save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub filename: String,
    pub timestamp: String,
    pub user: String,
    pub update_message: String,
    pub file_size: usize,
}

impl HistoryEntry {
    /// Record a save of `content` happening now, by the current OS user.
    pub fn new(filename: &str, content: &str, message: &str) -> Self {
        Self::recorded_at(
            filename,
            content,
            message,
            platform::current_user(),
            Local::now().naive_local(),
        )
    }

    pub fn recorded_at(
        filename: &str,
        content: &str,
        message: &str,
        user: String,
        when: NaiveDateTime,
    ) -> Self {
        let update_message = if message.is_empty() {
            NO_MESSAGE.to_string()
        } else {
            message.to_string()
        };

        HistoryEntry {
            filename: filename.to_string(),
            timestamp: when.format(TIMESTAMP_FORMAT).to_string(),
            user,
            update_message,
            // characters, not bytes
            file_size: content.chars().count(),
        }
    }

    pub fn recorded_time(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.timestamp, TIMESTAMP_FORMAT).ok()
    }
}

/// Summary shown by `stats`: update count and who saved last.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryStats {
    pub total_updates: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_user: Option<String>,
}

impl HistoryStats {
    pub fn from_entries(entries: &[HistoryEntry]) -> Self {
        let last = entries.last();
        HistoryStats {
            total_updates: entries.len(),
            last_timestamp: last.map(|e| e.timestamp.clone()),
            last_user: last.map(|e| e.user.clone()),
        }
    }
}

/// Handle on the persisted log file. Holds no entries itself; every
/// operation goes to disk so callers always see the persisted state.
#[derive(Debug, Clone)]
pub struct HistoryLog {
    path: PathBuf,
    strict: bool,
}

impl HistoryLog {
    pub fn new(path: PathBuf, strict: bool) -> Self {
        HistoryLog { path, strict }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Vec<HistoryEntry>, StoreError> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str::<Vec<HistoryEntry>>(&data) {
            Ok(entries) => Ok(entries),
            Err(source) if self.strict => Err(StoreError::CorruptLog {
                path: self.path.clone(),
                source,
            }),
            Err(e) => {
                warn!("ignoring unreadable history log {}: {e}", self.path.display());
                Ok(Vec::new())
            }
        }
    }

    /// Read-modify-write: load, push, persist. Returns the new entry count.
    pub fn append(&self, entry: HistoryEntry) -> Result<usize, StoreError> {
        let mut entries = self.load()?;
        entries.push(entry);
        self.persist(&entries)?;
        Ok(entries.len())
    }

    /// Replace the persisted log with `entries`.
    ///
    /// Written to a sibling temp file first and renamed over the log, so a
    /// reader never sees a half-written array.
    pub fn persist(&self, entries: &[HistoryEntry]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(entries)?;
        let tmp_path = self.tmp_path();
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &self.path)?;

        debug!("wrote {} history entries to {}", entries.len(), self.path.display());
        Ok(())
    }

    /// Delete the log file. Succeeds when there is nothing to delete.
    pub fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!("removed history log {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// File names inside the log's directory that belong to the log itself:
    /// the log and the scratch file `persist` renames over it.
    pub fn reserved_names(&self) -> Vec<String> {
        [self.path.clone(), self.tmp_path()]
            .iter()
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect()
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
