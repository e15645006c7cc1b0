//! Folding change records into per-file and per-module churn tallies.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::numstat::ChurnRecord;

/// Module key for files that live at the repository root.
pub const ROOT_MODULE: &str = ".";

/// Accumulated line-change totals for one file or module.
///
/// # Examples
///
/// ```
/// use tidemark_churn::aggregate::ChurnMetric;
///
/// let metric = ChurnMetric { added: 10, removed: 4, total_churn: 14 };
/// assert_eq!(metric.total_churn, metric.added + metric.removed);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChurnMetric {
    /// Total lines added.
    pub added: u64,
    /// Total lines removed.
    pub removed: u64,
    /// `added + removed`.
    pub total_churn: u64,
}

/// Per-file and per-module churn tallies.
///
/// Keys are ordered (`BTreeMap`) so serializing the same history twice
/// produces byte-identical output.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChurnReport {
    /// Churn keyed by file path.
    pub files: BTreeMap<String, ChurnMetric>,
    /// Churn keyed by parent directory; root files land under `"."`.
    pub modules: BTreeMap<String, ChurnMetric>,
}

/// Fold change records into a churn report.
///
/// A running sum per key; the fold is associative and commutative, so input
/// order never matters. `total_churn` is derived in a final pass.
///
/// # Examples
///
/// ```
/// use tidemark_churn::aggregate::aggregate_churn;
/// use tidemark_churn::numstat::parse_numstat;
///
/// let records = parse_numstat("2\t1\tsrc/lib.rs\n4\t0\tsrc/lib.rs\n");
/// let report = aggregate_churn(&records);
/// assert_eq!(report.files["src/lib.rs"].total_churn, 7);
/// assert_eq!(report.modules["src"].added, 6);
/// ```
pub fn aggregate_churn(records: &[ChurnRecord]) -> ChurnReport {
    let mut report = ChurnReport::default();

    for record in records {
        let file = report.files.entry(record.path.clone()).or_default();
        file.added += record.added;
        file.removed += record.removed;

        let module = report.modules.entry(module_key(&record.path)).or_default();
        module.added += record.added;
        module.removed += record.removed;
    }

    for metric in report.files.values_mut() {
        metric.total_churn = metric.added + metric.removed;
    }
    for metric in report.modules.values_mut() {
        metric.total_churn = metric.added + metric.removed;
    }

    report
}

/// Derive the module key for a file path: its parent directory, or
/// [`ROOT_MODULE`] for root-level files.
///
/// # Examples
///
/// ```
/// use tidemark_churn::aggregate::module_key;
///
/// assert_eq!(module_key("a/b/c.txt"), "a/b");
/// assert_eq!(module_key("root.txt"), ".");
/// ```
pub fn module_key(path: &str) -> String {
    match Path::new(path).parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            parent.to_string_lossy().into_owned()
        }
        _ => ROOT_MODULE.to_string(),
    }
}

impl ChurnReport {
    /// The `n` files with the highest total churn, descending; ties break
    /// by path so rankings are stable across runs.
    pub fn top_files(&self, n: usize) -> Vec<(&str, u64)> {
        let mut ranked: Vec<(&str, u64)> = self
            .files
            .iter()
            .map(|(path, m)| (path.as_str(), m.total_churn))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(n);
        ranked
    }

    /// All modules ranked by total churn, descending, ties by name.
    pub fn ranked_modules(&self) -> Vec<(&str, u64)> {
        let mut ranked: Vec<(&str, u64)> = self
            .modules
            .iter()
            .map(|(module, m)| (module.as_str(), m.total_churn))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numstat::parse_numstat;

    fn record(added: u64, removed: u64, path: &str) -> ChurnRecord {
        ChurnRecord {
            added,
            removed,
            path: path.into(),
        }
    }

    #[test]
    fn file_and_module_grand_totals_match() {
        let records = vec![
            record(3, 1, "a/b/c.txt"),
            record(2, 2, "a/b/d.txt"),
            record(5, 0, "a/e.txt"),
            record(1, 1, "root.txt"),
        ];
        let report = aggregate_churn(&records);

        let grand: u64 = records.iter().map(|r| r.added + r.removed).sum();
        let file_total: u64 = report.files.values().map(|m| m.total_churn).sum();
        let module_total: u64 = report.modules.values().map(|m| m.total_churn).sum();
        assert_eq!(file_total, grand);
        assert_eq!(module_total, grand);
    }

    #[test]
    fn repeated_paths_accumulate() {
        let records = vec![record(3, 1, "src/x.rs"), record(2, 4, "src/x.rs")];
        let report = aggregate_churn(&records);
        assert_eq!(
            report.files["src/x.rs"],
            ChurnMetric {
                added: 5,
                removed: 5,
                total_churn: 10
            }
        );
    }

    #[test]
    fn nested_path_maps_to_parent_directory() {
        assert_eq!(module_key("a/b/c.txt"), "a/b");
        let report = aggregate_churn(&[record(1, 0, "a/b/c.txt")]);
        assert!(report.modules.contains_key("a/b"));
    }

    #[test]
    fn root_file_maps_to_sentinel_module() {
        assert_eq!(module_key("root.txt"), ROOT_MODULE);
        let report = aggregate_churn(&[record(2, 3, "root.txt")]);
        assert_eq!(report.modules[ROOT_MODULE].total_churn, 5);
    }

    #[test]
    fn aggregation_is_order_independent() {
        let mut records = vec![
            record(3, 1, "a/x.rs"),
            record(1, 1, "a/y.rs"),
            record(7, 2, "b/z.rs"),
        ];
        let forward = aggregate_churn(&records);
        records.reverse();
        let backward = aggregate_churn(&records);
        assert_eq!(forward.files, backward.files);
        assert_eq!(forward.modules, backward.modules);
    }

    #[test]
    fn binary_markers_never_reach_aggregates() {
        let records = parse_numstat("-\t-\tlogo.png\n1\t1\tsrc/a.rs\n");
        let report = aggregate_churn(&records);
        assert!(!report.files.contains_key("logo.png"));
        assert_eq!(report.files.len(), 1);
    }

    #[test]
    fn top_files_ranks_by_total_churn() {
        let records = vec![
            record(1, 0, "small.rs"),
            record(10, 10, "big.rs"),
            record(3, 3, "mid.rs"),
        ];
        let report = aggregate_churn(&records);
        let top = report.top_files(2);
        assert_eq!(top, vec![("big.rs", 20), ("mid.rs", 6)]);
    }

    #[test]
    fn ranked_modules_break_ties_by_name() {
        let records = vec![record(1, 1, "b/x.rs"), record(1, 1, "a/y.rs")];
        let report = aggregate_churn(&records);
        let ranked = report.ranked_modules();
        assert_eq!(ranked, vec![("a", 2), ("b", 2)]);
    }
}
