use std::path::PathBuf;

/// Errors that can occur across the tidemark pipelines.
///
/// Each variant wraps a specific error domain. Library crates use this type
/// directly; the binary crate converts to `miette` diagnostics at the boundary.
///
/// # Examples
///
/// ```
/// use tidemark_core::TidemarkError;
///
/// let err = TidemarkError::Git("exit code 128".into());
/// assert!(err.to_string().contains("exit code 128"));
/// ```
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum TidemarkError {
    /// Filesystem I/O failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Git command failure (non-zero exit or spawn failure).
    #[error("git error: {0}")]
    Git(String),

    /// Malformed tabular or numeric input.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid or missing configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// No input column matched the detection token.
    #[error("no column matching '{0}' found in input header")]
    MissingColumn(String),

    /// JSON serialization / deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A required file was not found.
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),
}
