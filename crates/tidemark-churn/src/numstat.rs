//! Parser for `git log --numstat` text.

/// A single (commit, file) line-change record.
///
/// # Examples
///
/// ```
/// use tidemark_churn::numstat::ChurnRecord;
///
/// let record = ChurnRecord {
///     added: 10,
///     removed: 3,
///     path: "src/main.rs".into(),
/// };
/// assert_eq!(record.added, 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChurnRecord {
    /// Lines added in this commit.
    pub added: u64,
    /// Lines removed in this commit.
    pub removed: u64,
    /// File path relative to the repository root.
    pub path: String,
}

/// Parse numstat text into change records.
///
/// Parsing is best-effort and silently lossy: a line is skipped when it is
/// empty, is a commit header, does not split into exactly three tab-separated
/// fields, or its count fields are not integers (git emits `-` placeholders
/// for binary files). Skipped lines never affect other records and never
/// raise an error.
///
/// # Examples
///
/// ```
/// use tidemark_churn::numstat::parse_numstat;
///
/// let log = "commit abc123\n10\t2\tsrc/main.rs\n-\t-\tlogo.png\n";
/// let records = parse_numstat(log);
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].path, "src/main.rs");
/// ```
pub fn parse_numstat(input: &str) -> Vec<ChurnRecord> {
    let mut records = Vec::new();
    for line in input.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with("commit") {
            continue;
        }
        let mut parts = line.split('\t');
        let (Some(added), Some(removed), Some(path), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            continue;
        };
        let (Ok(added), Ok(removed)) = (added.parse::<u64>(), removed.parse::<u64>()) else {
            continue;
        };
        records.push(ChurnRecord {
            added,
            removed,
            path: path.to_string(),
        });
    }
    records
}
