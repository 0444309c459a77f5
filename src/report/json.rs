//! JSON output for history listings.
//!
//! Same field names as the persisted log, so output can be piped back
//! through other tools.

use super::{ordered, Order};
use crate::history::{HistoryEntry, HistoryStats};

pub fn render(entries: &[HistoryEntry], order: Order) -> String {
    serde_json::to_string_pretty(&ordered(entries, order)).unwrap_or_else(|_| String::from("[]"))
}

pub fn render_stats(stats: &HistoryStats) -> String {
    serde_json::to_string_pretty(stats).unwrap_or_else(|_| String::from("{}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str) -> HistoryEntry {
        HistoryEntry {
            filename: name.to_string(),
            timestamp: "2024-01-01 00:00:00".to_string(),
            user: "dev".to_string(),
            update_message: "m".to_string(),
            file_size: 1,
        }
    }

    #[test]
    fn newest_first_reverses_output_only() {
        let entries = vec![entry("a.py"), entry("b.py")];
        let parsed: Vec<HistoryEntry> =
            serde_json::from_str(&render(&entries, Order::NewestFirst)).unwrap();
        assert_eq!(parsed[0].filename, "b.py");
        assert_eq!(parsed[1].filename, "a.py");
        assert_eq!(entries[0].filename, "a.py");
    }

    #[test]
    fn empty_stats_omit_last_fields() {
        let out = render_stats(&HistoryStats::from_entries(&[]));
        assert!(out.contains("\"total_updates\": 0"));
        assert!(!out.contains("last_user"));
    }
}
