//! Lightweight SVG chart rendering for tidemark reports.
//!
//! Consumes finished numeric series and produces standalone SVG documents.
//! Deliberately small: ranked bar charts for churn reports and a two-series
//! line chart for defect forecasts, nothing more.

mod bar;
mod line;

pub use bar::{horizontal_bar_chart, vertical_bar_chart};
pub use line::{line_chart, LineSeries};

/// Escape a string for use as SVG text content or attribute value.
pub(crate) fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Shorten a label to `max` characters, keeping the tail.
///
/// File paths diverge at the tail, so the leading directories are the part
/// worth dropping.
pub(crate) fn truncate_label(label: &str, max: usize) -> String {
    let count = label.chars().count();
    if count <= max {
        return label.to_string();
    }
    let tail: String = label
        .chars()
        .skip(count - max.saturating_sub(1))
        .collect();
    format!("\u{2026}{tail}")
}
