//! Weekly defect series loading.
//!
//! Hand-parses the CSV input: a header row plus comma-split data rows,
//! with the defect-count and week-start columns located by substring
//! detection. No gap filling; rows are kept in input order.

use std::path::Path;

use chrono::NaiveDate;
use tidemark_core::TidemarkError;

use crate::columns::{require_column, DEFECT_TOKEN, WEEK_TOKEN};

/// One observed week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyPoint {
    /// First day of the observed week.
    pub week_start: NaiveDate,
    /// Defects reported during that week.
    pub defects_reported: u64,
}

/// A chronologically ordered weekly defect series.
///
/// # Examples
///
/// ```
/// use tidemark_forecast::series::WeeklySeries;
///
/// let csv = "Week_Start,DefectCount\n2026-01-05,4\n2026-01-12,6\n";
/// let series = WeeklySeries::from_csv(csv).unwrap();
/// assert_eq!(series.points.len(), 2);
/// assert_eq!(series.values(), vec![4.0, 6.0]);
/// ```
#[derive(Debug, Clone)]
pub struct WeeklySeries {
    /// Observed weeks, in input order.
    pub points: Vec<WeeklyPoint>,
}

impl WeeklySeries {
    /// Read and parse a CSV file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`TidemarkError::FileNotFound`] when the file does not exist,
    /// otherwise propagates the errors of [`WeeklySeries::from_csv`].
    pub fn from_file(path: &Path) -> Result<Self, TidemarkError> {
        if !path.exists() {
            return Err(TidemarkError::FileNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_csv(&content)
    }

    /// Parse CSV text into a weekly series.
    ///
    /// The defect-count column is the first header containing `defect`
    /// (case-insensitive) and the week column the first containing `week`.
    /// Fields are trimmed and surrounding double quotes are stripped.
    ///
    /// # Errors
    ///
    /// Returns [`TidemarkError::MissingColumn`] when a required column is
    /// absent, and [`TidemarkError::Parse`] for an empty file, a row with
    /// too few fields, a malformed date, or a non-integer defect count.
    pub fn from_csv(content: &str) -> Result<Self, TidemarkError> {
        let mut lines = content.lines().filter(|l| !l.trim().is_empty());
        let header = lines
            .next()
            .ok_or_else(|| TidemarkError::Parse("defect CSV is empty".into()))?;
        let headers: Vec<String> = split_row(header);

        let defect_col = require_column(&headers, DEFECT_TOKEN)?;
        let week_col = require_column(&headers, WEEK_TOKEN)?;

        let mut points = Vec::new();
        for (row_idx, line) in lines.enumerate() {
            let fields = split_row(line);
            let line_no = row_idx + 2;
            let (Some(week_raw), Some(defect_raw)) =
                (fields.get(week_col), fields.get(defect_col))
            else {
                return Err(TidemarkError::Parse(format!(
                    "line {line_no}: expected at least {} fields, got {}",
                    week_col.max(defect_col) + 1,
                    fields.len()
                )));
            };

            let week_start = NaiveDate::parse_from_str(week_raw, "%Y-%m-%d").map_err(|e| {
                TidemarkError::Parse(format!("line {line_no}: bad week date '{week_raw}': {e}"))
            })?;
            let defects_reported = defect_raw.parse::<u64>().map_err(|e| {
                TidemarkError::Parse(format!(
                    "line {line_no}: bad defect count '{defect_raw}': {e}"
                ))
            })?;

            points.push(WeeklyPoint {
                week_start,
                defects_reported,
            });
        }

        if points.is_empty() {
            return Err(TidemarkError::Parse("defect CSV has no data rows".into()));
        }

        Ok(Self { points })
    }

    /// Defect counts as floats, ready for the forecaster.
    pub fn values(&self) -> Vec<f64> {
        self.points
            .iter()
            .map(|p| p.defects_reported as f64)
            .collect()
    }

    /// The most recent observed week.
    pub fn last_week(&self) -> NaiveDate {
        // from_csv rejects empty series, so points is never empty here
        self.points
            .last()
            .map(|p| p.week_start)
            .unwrap_or(NaiveDate::MIN)
    }
}

fn split_row(line: &str) -> Vec<String> {
    line.split(',')
        .map(|field| {
            field
                .trim()
                .trim_matches('"')
                .to_string()
        })
        .collect()
}
