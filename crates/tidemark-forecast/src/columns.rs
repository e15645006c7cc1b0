//! Column auto-detection by substring match.

use tidemark_core::TidemarkError;

/// Detection token for the defect-count column.
pub const DEFECT_TOKEN: &str = "defect";
/// Detection token for the week-start column.
pub const WEEK_TOKEN: &str = "week";

/// Find the first header (in native order) whose lowercased name contains
/// `token`. First match wins; no ambiguity resolution.
///
/// # Examples
///
/// ```
/// use tidemark_forecast::columns::detect_column;
///
/// let headers = ["Week_Start", "DefectCount"];
/// assert_eq!(detect_column(&headers, "defect"), Some(1));
/// assert_eq!(detect_column(&headers, "week"), Some(0));
/// assert_eq!(detect_column(&headers, "owner"), None);
/// ```
pub fn detect_column<S: AsRef<str>>(headers: &[S], token: &str) -> Option<usize> {
    headers
        .iter()
        .position(|h| h.as_ref().to_lowercase().contains(token))
}

/// Like [`detect_column`], but a missing column is a typed error carrying
/// the token so the caller can surface one user-facing message.
///
/// # Errors
///
/// Returns [`TidemarkError::MissingColumn`] when no header matches.
pub fn require_column<S: AsRef<str>>(headers: &[S], token: &str) -> Result<usize, TidemarkError> {
    detect_column(headers, token).ok_or_else(|| TidemarkError::MissingColumn(token.to_string()))
}
