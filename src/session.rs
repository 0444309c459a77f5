//! Editor session state.
//!
//! Holds what an editing front end needs between actions: the selected
//! file, the working buffer, the save target and the pending update
//! message. Anything persisted goes through the `FileStore`.

use tracing::{debug, warn};

use crate::error::StoreError;
use crate::history::{HistoryEntry, HistoryStats};
use crate::store::browse::STARTER_TEMPLATE;
use crate::store::{FileStore, Outcome};

pub struct Session {
    store: FileStore,
    pub selected_file: String,
    pub buffer: String,
    pub save_filename: String,
    pub update_message: String,
}

impl Session {
    /// Start on `default_file`, or on the starter template if it does not
    /// exist yet or cannot be read.
    pub fn open(store: FileStore, default_file: &str) -> Result<Self, StoreError> {
        let selected = store.normalize(default_file)?;
        let buffer = match store.load_script(&selected) {
            Ok(content) => content,
            Err(StoreError::NotFound(_)) => STARTER_TEMPLATE.to_string(),
            Err(e) => {
                warn!("could not read {selected}, starting from template: {e}");
                STARTER_TEMPLATE.to_string()
            }
        };

        Ok(Session {
            store,
            save_filename: selected.clone(),
            selected_file: selected,
            buffer,
            update_message: String::new(),
        })
    }

    pub fn store(&self) -> &FileStore {
        &self.store
    }

    pub fn select(&mut self, filename: &str) -> Result<(), StoreError> {
        let name = self.store.normalize(filename)?;
        self.buffer = self.store.load_script(&name)?;
        debug!("selected {name}");
        self.save_filename = name.clone();
        self.selected_file = name;
        Ok(())
    }

    /// Re-read the selected file from disk, discarding buffer edits.
    pub fn reload(&mut self) -> Result<String, StoreError> {
        self.buffer = self.store.load_script(&self.selected_file)?;
        Ok(format!("Reloaded {}!", self.selected_file))
    }

    pub fn edit(&mut self, text: impl Into<String>) {
        self.buffer = text.into();
    }

    /// Create `filename` from the template and switch to it.
    pub fn create(&mut self, filename: &str) -> Result<String, StoreError> {
        let message = self.store.create_script(filename)?;
        self.select(filename)?;
        Ok(message)
    }

    /// Save the buffer under `filename`.
    ///
    /// On success the pending message is cleared and, when the name differs
    /// from the selected file, the session switches to the saved file.
    pub fn save(&mut self, filename: &str, message: &str) -> Outcome {
        let result = self
            .store
            .save_as(Some(self.buffer.as_str()), filename, message)
            .map(|name| {
                self.update_message.clear();
                if name != self.selected_file {
                    debug!("switching from {} to {name}", self.selected_file);
                    self.selected_file = name.clone();
                }
                let confirmation = format!("Script saved to {name}");
                self.save_filename = name;
                confirmation
            });
        Outcome::from_save(result)
    }

    pub fn history(&self) -> Result<Vec<HistoryEntry>, StoreError> {
        self.store.list_history()
    }

    pub fn stats(&self) -> Result<HistoryStats, StoreError> {
        self.store.history_stats()
    }

    pub fn clear_history(&self) -> Result<String, StoreError> {
        self.store.clear_history()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::fs;
    use tempfile::TempDir;

    fn session_in(dir: &TempDir) -> Session {
        let store = FileStore::from_config(&Config::with_root(dir.path()));
        Session::open(store, "handler.py").unwrap()
    }

    #[test]
    fn opens_on_starter_template_when_default_missing() {
        let dir = TempDir::new().unwrap();
        let session = session_in(&dir);
        assert_eq!(session.selected_file, "handler.py");
        assert_eq!(session.buffer, STARTER_TEMPLATE);
    }

    #[test]
    fn opens_on_existing_default_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("handler.py"), "x = 1\n").unwrap();
        assert_eq!(session_in(&dir).buffer, "x = 1\n");
    }

    #[test]
    fn unreadable_default_file_does_not_block_the_store() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("handler.py"), [0xffu8, 0xfe]).unwrap();

        let mut session = session_in(&dir);
        assert_eq!(session.buffer, STARTER_TEMPLATE);
        assert!(matches!(session.reload(), Err(StoreError::Io(_))));

        session.edit("x = 1");
        assert!(session.save("a.py", "still works").ok);
        assert_eq!(session.history().unwrap().len(), 1);
        session.clear_history().unwrap();
        assert!(session.history().unwrap().is_empty());
    }

    #[test]
    fn save_under_new_name_switches_selection() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(&dir);
        session.edit("print('new')");
        session.update_message = "draft".to_string();

        let outcome = session.save("other.py", "split out");
        assert!(outcome.ok, "{}", outcome.message);
        assert_eq!(outcome.message, "Script saved to other.py");
        assert_eq!(session.selected_file, "other.py");
        assert_eq!(session.save_filename, "other.py");
        assert!(session.update_message.is_empty());

        let history = session.history().unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].update_message, "split out");
        assert_eq!(session.stats().unwrap().total_updates, 1);
    }

    #[test]
    fn failed_save_keeps_state() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(&dir);
        session.update_message = "pending".to_string();

        let outcome = session.save("..", "msg");
        assert!(!outcome.ok);
        assert!(outcome.message.starts_with("Error saving script:"));
        assert_eq!(session.selected_file, "handler.py");
        assert_eq!(session.update_message, "pending");
        assert!(session.history().unwrap().is_empty());
    }

    #[test]
    fn select_and_reload_follow_disk() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(&dir);
        fs::write(dir.path().join("b.py"), "one").unwrap();

        session.select("b.py").unwrap();
        assert_eq!(session.buffer, "one");

        session.edit("unsaved");
        fs::write(dir.path().join("b.py"), "two").unwrap();
        assert_eq!(session.reload().unwrap(), "Reloaded b.py!");
        assert_eq!(session.buffer, "two");

        fs::remove_file(dir.path().join("b.py")).unwrap();
        assert!(matches!(session.reload(), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn create_switches_to_new_file() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(&dir);
        session.create("fresh.py").unwrap();
        assert_eq!(session.selected_file, "fresh.py");
        assert!(session.buffer.starts_with("# New Python script"));
    }

    #[test]
    fn clear_history_through_session() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(&dir);
        assert!(session.save("handler.py", "").ok);
        session.clear_history().unwrap();
        assert!(session.history().unwrap().is_empty());
    }
}
