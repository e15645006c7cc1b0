//! Forecast presentation: table, indicators, chart, and persisted CSV.

use std::fmt::Write as _;
use std::path::Path;

use chrono::{Duration, NaiveDate};
use tidemark_chart::LineSeries;
use tidemark_core::TidemarkError;

use crate::series::WeeklySeries;

/// Filename of the forecast line chart.
pub const FORECAST_CHART: &str = "defect_forecast.svg";

/// One forecast week, rounded for presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastPoint {
    /// First day of the forecast week.
    pub week_start: NaiveDate,
    /// Forecast defect count, rounded to the nearest integer.
    pub forecast_defects: i64,
}

/// Attach contiguous week dates to raw forecast values, rounding each value
/// to the nearest integer. Week k starts `7 * k` days after the week
/// following `last_week`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use tidemark_forecast::output::build_forecast;
///
/// let last = NaiveDate::from_ymd_opt(2026, 1, 19).unwrap();
/// let points = build_forecast(last, &[2.5, 2.75]);
/// assert_eq!(points[0].week_start, NaiveDate::from_ymd_opt(2026, 1, 26).unwrap());
/// assert_eq!(points[0].forecast_defects, 3);
/// assert_eq!(points[1].forecast_defects, 3);
/// ```
pub fn build_forecast(last_week: NaiveDate, values: &[f64]) -> Vec<ForecastPoint> {
    values
        .iter()
        .enumerate()
        .map(|(i, value)| ForecastPoint {
            week_start: last_week + Duration::weeks(i as i64 + 1),
            forecast_defects: value.round() as i64,
        })
        .collect()
}

/// Summary indicators over the historical series.
#[derive(Debug, Clone, PartialEq)]
pub struct Indicators {
    /// Sum of all weekly defect counts.
    pub total_defects: u64,
    /// Mean weekly defect count.
    pub average_weekly: f64,
    /// Largest weekly defect count.
    pub peak_weekly: u64,
}

impl Indicators {
    /// Compute the three indicators from a loaded series.
    pub fn from_series(series: &WeeklySeries) -> Self {
        let counts: Vec<u64> = series.points.iter().map(|p| p.defects_reported).collect();
        let total_defects: u64 = counts.iter().sum();
        let average_weekly = total_defects as f64 / counts.len().max(1) as f64;
        let peak_weekly = counts.iter().copied().max().unwrap_or(0);
        Self {
            total_defects,
            average_weekly,
            peak_weekly,
        }
    }
}

/// Render the forecast as an aligned text table.
pub fn forecast_table(points: &[ForecastPoint]) -> String {
    let mut table = String::new();
    let _ = writeln!(table, "{:<12} {:>16}", "week_start", "forecast_defects");
    for point in points {
        let _ = writeln!(
            table,
            "{:<12} {:>16}",
            point.week_start.format("%Y-%m-%d"),
            point.forecast_defects
        );
    }
    table
}

/// Persist the forecast table as CSV, overwriting any previous run.
///
/// Columns: `week_start` (ISO date), `forecast_defects` (integer).
///
/// # Errors
///
/// Returns [`TidemarkError::Io`] if the file cannot be written.
pub fn write_forecast_csv(points: &[ForecastPoint], out_path: &Path) -> Result<(), TidemarkError> {
    let mut csv = String::from("week_start,forecast_defects\n");
    for point in points {
        let _ = writeln!(
            csv,
            "{},{}",
            point.week_start.format("%Y-%m-%d"),
            point.forecast_defects
        );
    }
    std::fs::write(out_path, csv)?;
    Ok(())
}

/// Render the historical and forecast series as one line chart in `dir`
/// and return the chart path.
///
/// # Errors
///
/// Returns [`TidemarkError::Io`] if the chart file cannot be written.
pub fn render_chart(
    series: &WeeklySeries,
    points: &[ForecastPoint],
    dir: &Path,
) -> Result<std::path::PathBuf, TidemarkError> {
    let mut x_labels: Vec<String> = series
        .points
        .iter()
        .map(|p| p.week_start.format("%Y-%m-%d").to_string())
        .collect();
    x_labels.extend(
        points
            .iter()
            .map(|p| p.week_start.format("%Y-%m-%d").to_string()),
    );

    let chart_series = vec![
        LineSeries {
            label: "Historical".into(),
            start: 0,
            values: series.values(),
        },
        LineSeries {
            label: "Forecast".into(),
            start: series.points.len(),
            values: points.iter().map(|p| p.forecast_defects as f64).collect(),
        },
    ];

    let svg = tidemark_chart::line_chart("Defect Inflow Forecast", &x_labels, &chart_series);
    let path = dir.join(FORECAST_CHART);
    std::fs::write(&path, svg)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_series() -> WeeklySeries {
        WeeklySeries::from_csv("week_start,defects\n2026-01-05,4\n2026-01-12,6\n2026-01-19,5\n")
            .unwrap()
    }

    #[test]
    fn forecast_weeks_are_contiguous() {
        let points = build_forecast(date(2026, 1, 19), &[5.0, 5.0, 5.0]);
        assert_eq!(points[0].week_start, date(2026, 1, 26));
        assert_eq!(points[1].week_start, date(2026, 2, 2));
        assert_eq!(points[2].week_start, date(2026, 2, 9));
    }

    #[test]
    fn values_round_to_nearest_integer() {
        let points = build_forecast(date(2026, 1, 19), &[2.4, 2.5, 2.6]);
        let rounded: Vec<i64> = points.iter().map(|p| p.forecast_defects).collect();
        assert_eq!(rounded, vec![2, 3, 3]);
    }

    #[test]
    fn indicators_cover_total_average_peak() {
        let indicators = Indicators::from_series(&sample_series());
        assert_eq!(indicators.total_defects, 15);
        assert_eq!(indicators.average_weekly, 5.0);
        assert_eq!(indicators.peak_weekly, 6);
    }

    #[test]
    fn csv_output_has_header_and_iso_dates() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("forecast_output.csv");
        let points = build_forecast(date(2026, 1, 19), &[4.6]);
        write_forecast_csv(&points, &out).unwrap();
        let content = std::fs::read_to_string(&out).unwrap();
        assert_eq!(content, "week_start,forecast_defects\n2026-01-26,5\n");
    }

    #[test]
    fn csv_is_overwritten_each_run() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("forecast_output.csv");
        write_forecast_csv(&build_forecast(date(2026, 1, 19), &[1.0, 2.0]), &out).unwrap();
        write_forecast_csv(&build_forecast(date(2026, 1, 19), &[9.0]), &out).unwrap();
        let content = std::fs::read_to_string(&out).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(content.contains(",9"));
    }

    #[test]
    fn table_lists_every_point() {
        let points = build_forecast(date(2026, 1, 19), &[3.0, 4.0]);
        let table = forecast_table(&points);
        assert!(table.contains("2026-01-26"));
        assert!(table.contains("2026-02-02"));
        assert_eq!(table.lines().count(), 3);
    }

    #[test]
    fn chart_covers_history_and_forecast() {
        let dir = tempfile::tempdir().unwrap();
        let series = sample_series();
        let points = build_forecast(series.last_week(), &[5.0, 5.0]);
        let path = render_chart(&series, &points, dir.path()).unwrap();
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("Historical"));
        assert!(svg.contains("Forecast"));
        assert!(svg.contains("2026-02-02"));
    }
}
