pub mod table;
pub mod json;

use crate::history::{HistoryEntry, HistoryStats};

/// Display order for history listings. The log itself is always oldest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    NewestFirst,
    OldestFirst,
}

pub fn print_history(entries: &[HistoryEntry], order: Order, as_json: bool) {
    if as_json {
        println!("{}", json::render(entries, order));
    } else {
        print!("{}", table::render(entries, order));
    }
}

pub fn print_stats(stats: &HistoryStats, as_json: bool) {
    if as_json {
        println!("{}", json::render_stats(stats));
        return;
    }

    println!("Total updates: {}", stats.total_updates);
    if let (Some(timestamp), Some(user)) = (&stats.last_timestamp, &stats.last_user) {
        println!("Last update: {timestamp}");
        println!("By: {user}");
    }
}

/// Borrow entries in display order without touching the log order.
pub(crate) fn ordered(entries: &[HistoryEntry], order: Order) -> Vec<&HistoryEntry> {
    match order {
        Order::OldestFirst => entries.iter().collect(),
        Order::NewestFirst => entries.iter().rev().collect(),
    }
}
