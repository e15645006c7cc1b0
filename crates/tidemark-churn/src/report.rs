//! JSON report and ranked chart output for churn tallies.

use std::path::{Path, PathBuf};

use tidemark_core::TidemarkError;

use crate::aggregate::ChurnReport;

/// Filename of the top-files chart, written to the working directory.
pub const TOP_FILES_CHART: &str = "top_files_churn.svg";
/// Filename of the per-module chart, written to the working directory.
pub const MODULE_CHART: &str = "module_churn.svg";

const CHURN_AXIS_LABEL: &str = "Total Churn (lines added + removed)";

/// Serialize the report as pretty JSON to `out_path`.
///
/// Schema: `{"files": {path: {added, removed, total_churn}}, "modules": {...}}`.
/// Map keys are ordered, so identical tallies produce byte-identical files.
///
/// # Errors
///
/// Returns [`TidemarkError::Io`] if the file cannot be written.
pub fn write_report(report: &ChurnReport, out_path: &Path) -> Result<(), TidemarkError> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(out_path, json)?;
    Ok(())
}

/// Render the two ranked bar charts into `dir` and return their paths.
///
/// `top_n` limits the file chart; the module chart always shows every
/// module.
///
/// # Errors
///
/// Returns [`TidemarkError::Io`] if a chart file cannot be written.
pub fn render_charts(
    report: &ChurnReport,
    top_n: usize,
    dir: &Path,
) -> Result<Vec<PathBuf>, TidemarkError> {
    let files: Vec<(String, f64)> = report
        .top_files(top_n)
        .into_iter()
        .map(|(path, churn)| (path.to_string(), churn as f64))
        .collect();
    let modules: Vec<(String, f64)> = report
        .ranked_modules()
        .into_iter()
        .map(|(module, churn)| (module.to_string(), churn as f64))
        .collect();

    let files_chart = tidemark_chart::horizontal_bar_chart(
        &format!("Top {top_n} Files by Code Churn"),
        CHURN_AXIS_LABEL,
        &files,
    );
    let modules_chart =
        tidemark_chart::vertical_bar_chart("Code Churn per Module", CHURN_AXIS_LABEL, &modules);

    let files_path = dir.join(TOP_FILES_CHART);
    let modules_path = dir.join(MODULE_CHART);
    std::fs::write(&files_path, files_chart)?;
    std::fs::write(&modules_path, modules_chart)?;
    Ok(vec![files_path, modules_path])
}
