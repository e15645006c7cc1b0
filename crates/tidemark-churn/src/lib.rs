//! Git churn measurement: per-file and per-module line-change totals.
//!
//! Extracts `git log --numstat` output, parses it into per-commit change
//! records, folds them into per-file and per-module churn tallies, and
//! writes a JSON report plus ranked bar charts.

pub mod aggregate;
pub mod extract;
pub mod numstat;
pub mod report;
