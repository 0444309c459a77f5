pub mod cli;
pub mod config;
pub mod error;
pub mod history;
pub mod platform;
pub mod report;
pub mod session;
pub mod store;

pub use error::StoreError;
pub use history::{HistoryEntry, HistoryLog, HistoryStats};
pub use session::Session;
pub use store::{FileStore, Outcome};
