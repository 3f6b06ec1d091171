//! Terminal display formatting
//!
//! Renders query results as plain-text tables. The query engine returns
//! structured data only; everything user-facing happens here.

use crate::models::Entry;
use crate::query::{Listing, TrendSeries};

/// Format a single entry as a listing row
pub fn format_entry_row(entry: &Entry) -> String {
    format!(
        "{:<20} {:>10} {:<12} {:<6} {}",
        truncate(&entry.name, 20),
        entry.cost.to_string(),
        entry.date.format("%Y-%m-%d"),
        entry.id.to_string(),
        entry.tags.join(", ")
    )
}

/// Format a listing with its cost total
pub fn format_listing(listing: &Listing) -> String {
    if listing.entries.is_empty() {
        return "No entries found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<20} {:>10} {:<12} {:<6} {}\n",
        "Name", "Cost", "Date", "ID", "Tags"
    ));
    output.push_str(&"-".repeat(67));
    output.push('\n');

    for entry in &listing.entries {
        output.push_str(&format_entry_row(entry));
        output.push('\n');
    }

    output.push_str(&"-".repeat(67));
    output.push('\n');
    output.push_str(&format!("Total cost: {}\n", listing.total));

    output
}

/// Format sliding-window trend series with their fitted values
///
/// One block per series: raw window sums and the smoothed trend, row per
/// day offset.
pub fn format_trend_series(series: &[TrendSeries]) -> String {
    let mut output = String::new();

    for s in series {
        output.push_str(&format!("{}\n", s.label));
        output.push_str(&format!(
            "{:>8} {:>12} {:>12}\n",
            "Offset", "Window sum", "Trend"
        ));
        output.push_str(&"-".repeat(34));
        output.push('\n');

        for (offset, (raw, fit)) in s.raw.iter().zip(&s.fit).enumerate() {
            output.push_str(&format!("{:>8} {:>12} {:>12.2}\n", offset, raw.to_string(), fit));
        }
        output.push('\n');
    }

    output
}

/// Format per-tag totals from the comparison view
pub fn format_comparison(totals: &[(String, crate::models::Money)]) -> String {
    let mut output = String::new();
    output.push_str(&format!("{:<20} {:>12}\n", "Tag", "Total"));
    output.push_str(&"-".repeat(33));
    output.push('\n');

    for (tag, total) in totals {
        output.push_str(&format!("{:<20} {:>12}\n", truncate(tag, 20), total.to_string()));
    }

    output
}

/// Truncate a string to a maximum number of characters
///
/// Names and tags are arbitrary user text, so the cut has to land on a
/// character boundary, never a byte offset.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        format!("{:width$}", s, width = max_len)
    } else {
        let cut = s
            .char_indices()
            .nth(max_len.saturating_sub(3))
            .map(|(i, _)| i)
            .unwrap_or(s.len());
        format!("{}...", &s[..cut])
    }
}
