//! Listing, loading and creating scripts in the store root.

use std::fs;
use std::io::ErrorKind;

use tracing::debug;
use walkdir::WalkDir;

use super::FileStore;
use crate::error::StoreError;

/// Content written by `create_script`.
pub const NEW_FILE_TEMPLATE: &str =
    "# New Python script\n\ndef main():\n    print('Hello, World!')\n\nif __name__ == '__main__':\n    main()\n";

/// Buffer shown when the default file does not exist yet.
pub const STARTER_TEMPLATE: &str =
    "# Write your Python script here\n\ndef main():\n    print('Hello, World!')\n\nif __name__ == '__main__':\n    main()";

impl FileStore {
    /// Sorted names of script files directly inside the root.
    ///
    /// A missing root lists as empty.
    pub fn list_scripts(&self) -> Result<Vec<String>, StoreError> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let history_name = self.log.path().file_name();
        let mut names = Vec::new();

        // unreadable entries and dangling links are skipped, not fatal
        let entries = WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
            .into_iter()
            .filter_map(|e| e.ok());

        for entry in entries {
            if Some(entry.file_name()) == history_name {
                continue;
            }

            // metadata follows symlinks, so linked scripts still count as files
            let is_file = fs::metadata(entry.path())
                .map(|m| m.is_file())
                .unwrap_or(false);
            if !is_file {
                continue;
            }

            let matches_ext = entry
                .path()
                .extension()
                .is_some_and(|ext| ext.to_string_lossy() == self.extension.as_str());
            if !matches_ext {
                continue;
            }

            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }

        names.sort();
        Ok(names)
    }

    pub fn load_script(&self, filename: &str) -> Result<String, StoreError> {
        let name = self.normalize(filename)?;
        let path = self.root.join(&name);
        fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => StoreError::NotFound(name),
            _ => StoreError::Io(e),
        })
    }

    /// Create a new script from the template. Does not record history.
    pub fn create_script(&self, filename: &str) -> Result<String, StoreError> {
        let name = self.normalize(filename)?;
        let suffix = format!(".{}", self.extension);
        if !name.ends_with(&suffix) {
            return Err(StoreError::InvalidFilename(format!(
                "{name} (must end with {suffix})"
            )));
        }

        fs::create_dir_all(&self.root)?;
        let path = self.root.join(&name);

        // create_new fails atomically if the file is already there
        let file = fs::OpenOptions::new().write(true).create_new(true).open(&path);
        match file {
            Ok(mut file) => {
                use std::io::Write as _;
                file.write_all(NEW_FILE_TEMPLATE.as_bytes())?;
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(StoreError::AlreadyExists(name));
            }
            Err(e) => return Err(e.into()),
        }

        debug!("created {}", path.display());
        Ok(format!("Created {name}"))
    }
}
