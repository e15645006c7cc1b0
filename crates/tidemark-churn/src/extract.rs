//! Git history extraction via the `git` executable.
//!
//! Git is treated as a black-box producer of line-oriented numstat text;
//! all interpretation happens downstream in [`crate::numstat`].

use std::path::Path;
use std::process::Command;

use tidemark_core::TidemarkError;

/// Run `git log --numstat` on the repository at `repo_path` and return the
/// raw stdout text.
///
/// The log is requested with `--pretty=format:commit %H` so commit headers
/// are single recognizable lines the parser can skip.
///
/// # Errors
///
/// Returns [`TidemarkError::Git`] when the git binary cannot be spawned or
/// exits non-zero; the captured stderr text is included in the message.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use tidemark_churn::extract::run_git_log;
///
/// let log = run_git_log(Path::new(".")).unwrap();
/// println!("{} lines of history", log.lines().count());
/// ```
pub fn run_git_log(repo_path: &Path) -> Result<String, TidemarkError> {
    let output = Command::new("git")
        .arg("-C")
        .arg(repo_path)
        .args(["log", "--numstat", "--pretty=format:commit %H"])
        .output()
        .map_err(|e| TidemarkError::Git(format!("failed to run git: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(TidemarkError::Git(format!(
            "git log failed: {}",
            stderr.trim()
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_repository_path_fails_with_git_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_git_log(dir.path()).unwrap_err();
        assert!(matches!(err, TidemarkError::Git(_)), "got: {err:?}");
    }
}
