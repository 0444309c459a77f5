//! Terminal rendering of the save history.
//!
//! One block per entry:
//! - header line with timestamp, file and user
//! - size in characters and the update message, indented below

use super::{ordered, Order};
use crate::history::HistoryEntry;

pub fn render(entries: &[HistoryEntry], order: Order) -> String {
    if entries.is_empty() {
        return String::from("No update history available yet. Save a file to start tracking updates.\n");
    }

    let mut output = String::new();
    output.push_str(&format!("Update history ({} entries)\n", entries.len()));
    output.push_str(&"-".repeat(60));
    output.push('\n');

    for entry in ordered(entries, order) {
        output.push_str(&format!(
            "{}  {:30} by {}\n",
            entry.timestamp,
            truncate(&entry.filename, 30),
            entry.user
        ));
        output.push_str(&format!("    size: {} characters\n", entry.file_size));
        for line in entry.update_message.lines() {
            output.push_str(&format!("    {line}\n"));
        }
    }

    output
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{truncated}...")
    }
}
