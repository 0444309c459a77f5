//! History-tracked file store.
//!
//! Saves script contents into a single root directory and records one
//! `HistoryEntry` per successful save:
//! - file names are reduced to their base name, so writes never leave the root
//! - content is written first, then the log is read, appended and rewritten
//! - a failed log write does not roll back the content write
//!
//! Browsing helpers (list, load, create) live in `browse`.

pub mod browse;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::Config;
use crate::error::StoreError;
use crate::history::{HistoryEntry, HistoryLog, HistoryStats};

pub struct FileStore {
    root: PathBuf,
    log: HistoryLog,
    extension: String,
}

impl FileStore {
    pub fn new(root: PathBuf, log: HistoryLog, extension: &str) -> Self {
        FileStore {
            root,
            log,
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let log = HistoryLog::new(config.history_path(), config.strict_history);
        FileStore::new(config.root.clone(), log, &config.script_extension)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn history_path(&self) -> &Path {
        self.log.path()
    }

    /// Write `content` to `<root>/<basename(filename)>` and append a history entry.
    ///
    /// `None` content is rejected before any I/O happens.
    pub fn save(
        &self,
        content: Option<&str>,
        filename: &str,
        message: &str,
    ) -> Result<String, StoreError> {
        let name = self.save_as(content, filename, message)?;
        Ok(format!("Script saved to {name}"))
    }

    /// Same as `save`, returning the normalized name the content was stored under.
    pub fn save_as(
        &self,
        content: Option<&str>,
        filename: &str,
        message: &str,
    ) -> Result<String, StoreError> {
        let content = content.ok_or(StoreError::MissingContent)?;
        let name = self.normalize(filename)?;

        fs::create_dir_all(&self.root)?;
        let path = self.root.join(&name);
        fs::write(&path, content)?;
        debug!(
            "wrote {} ({} characters, {} bytes on disk)",
            path.display(),
            content.chars().count(),
            content.len()
        );

        let count = self.log.append(HistoryEntry::new(&name, content, message))?;
        info!("saved {name}, history now has {count} entries");

        Ok(name)
    }

    /// Every recorded save, oldest first.
    pub fn list_history(&self) -> Result<Vec<HistoryEntry>, StoreError> {
        self.log.load()
    }

    pub fn clear_history(&self) -> Result<String, StoreError> {
        self.log.clear()?;
        info!("history cleared");
        Ok("History cleared!".to_string())
    }

    pub fn history_stats(&self) -> Result<HistoryStats, StoreError> {
        Ok(HistoryStats::from_entries(&self.list_history()?))
    }

    /// Strip directory components from a caller-supplied name.
    ///
    /// Names without a final component (`""`, `".."`, `"/"`) are rejected, as
    /// are the history log's own name and the scratch file it is rewritten through.
    pub fn normalize(&self, filename: &str) -> Result<String, StoreError> {
        let name = Path::new(filename)
            .file_name()
            .and_then(|n| n.to_str())
            .filter(|n| !n.is_empty())
            .ok_or_else(|| StoreError::InvalidFilename(filename.to_string()))?;

        if self.log.reserved_names().iter().any(|reserved| reserved == name) {
            return Err(StoreError::InvalidFilename(filename.to_string()));
        }

        Ok(name.to_string())
    }
}

/// The `(ok, message)` pair handed to presentation code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub ok: bool,
    pub message: String,
}

impl Outcome {
    /// Failures are prefixed with `context`, e.g. "Error saving script: ...".
    pub fn from_result(result: Result<String, StoreError>, context: &str) -> Self {
        match result {
            Ok(message) => Outcome { ok: true, message },
            Err(e) => Outcome {
                ok: false,
                message: format!("{context}: {e}"),
            },
        }
    }

    pub fn from_save(result: Result<String, StoreError>) -> Self {
        Self::from_result(result, "Error saving script")
    }
}
