use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::cli::Cli;
use crate::error::StoreError;
use crate::platform;

pub const DEFAULT_HISTORY_FILE: &str = ".script_history.json";
pub const DEFAULT_EXTENSION: &str = "py";
pub const DEFAULT_FILE: &str = "handler.py";

pub struct Config {
    pub root: PathBuf,
    pub history_file: String,
    pub script_extension: String,
    pub default_file: String,
    pub strict_history: bool,
    pub verbose: bool,
}

/// On-disk shape of config.toml. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    root: Option<PathBuf>,
    history_file: Option<String>,
    script_extension: Option<String>,
    default_file: Option<String>,
    strict_history: Option<bool>,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Result<Self, StoreError> {
        let file_config = match &cli.config {
            Some(path) => read_file_config(path)?,
            None => match platform::config_path() {
                Some(path) if path.exists() => read_file_config(&path)?,
                _ => FileConfig::default(),
            },
        };

        let mut config = Config::default().merge(file_config);
        if let Some(root) = &cli.root {
            config.root = root.clone();
        }
        config.verbose = cli.verbose;
        Ok(config)
    }

    pub fn default() -> Self {
        Config {
            root: PathBuf::from("."),
            history_file: DEFAULT_HISTORY_FILE.to_string(),
            script_extension: DEFAULT_EXTENSION.to_string(),
            default_file: DEFAULT_FILE.to_string(),
            strict_history: false,
            verbose: false,
        }
    }

    /// Config rooted at `root` with every other setting at its default.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Config {
            root: root.into(),
            ..Config::default()
        }
    }

    pub fn history_path(&self) -> PathBuf {
        self.root.join(&self.history_file)
    }

    fn merge(mut self, file: FileConfig) -> Self {
        if let Some(root) = file.root {
            self.root = root;
        }
        if let Some(history_file) = file.history_file {
            self.history_file = history_file;
        }
        if let Some(ext) = file.script_extension {
            self.script_extension = ext.trim_start_matches('.').to_string();
        }
        if let Some(default_file) = file.default_file {
            self.default_file = default_file;
        }
        if let Some(strict) = file.strict_history {
            self.strict_history = strict;
        }
        self
    }
}

fn read_file_config(path: &Path) -> Result<FileConfig, StoreError> {
    debug!("loading config from {}", path.display());
    let text = std::fs::read_to_string(path)
        .map_err(|e| StoreError::Configuration(format!("{}: {e}", path.display())))?;
    parse_file_config(&text)
        .map_err(|e| StoreError::Configuration(format!("{}: {e}", path.display())))
}

fn parse_file_config(text: &str) -> Result<FileConfig, toml::de::Error> {
    toml::from_str(text)
}
