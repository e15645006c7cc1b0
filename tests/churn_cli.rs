use std::path::Path;
use std::process::Command;

fn git(dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .arg("-C")
        .arg(dir)
        .args(args)
        .output()
        .expect("git should be runnable");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
}

fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Build a small scratch repository with two commits touching a nested
/// file, a root file, and a binary file.
fn scratch_repo(dir: &Path) {
    git(dir, &["init", "-q"]);
    git(dir, &["config", "user.email", "test@example.com"]);
    git(dir, &["config", "user.name", "Test"]);

    std::fs::create_dir_all(dir.join("src")).unwrap();
    std::fs::write(dir.join("src/lib.rs"), "fn a() {}\nfn b() {}\n").unwrap();
    std::fs::write(dir.join("README.md"), "# scratch\n").unwrap();
    std::fs::write(dir.join("blob.bin"), [0u8, 159, 146, 150]).unwrap();
    git(dir, &["add", "."]);
    git(dir, &["commit", "-q", "-m", "initial"]);

    std::fs::write(dir.join("src/lib.rs"), "fn a() {}\nfn c() {}\nfn d() {}\n").unwrap();
    git(dir, &["add", "."]);
    git(dir, &["commit", "-q", "-m", "rework lib"]);
}

#[test]
fn churn_writes_report_and_charts() {
    if !git_available() {
        eprintln!("skipping: git not available");
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    scratch_repo(dir.path());

    let output = Command::new(env!("CARGO_BIN_EXE_tidemark"))
        .args(["churn", "--repo", ".", "--out", "churn_results.json"])
        .current_dir(dir.path())
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "churn failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let report: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(dir.path().join("churn_results.json")).unwrap(),
    )
    .unwrap();

    // Two commits: 2 added, then 2 added 1 removed on the same file
    assert_eq!(report["files"]["src/lib.rs"]["added"], 4);
    assert_eq!(report["files"]["src/lib.rs"]["removed"], 1);
    assert_eq!(report["files"]["src/lib.rs"]["total_churn"], 5);
    assert_eq!(report["modules"]["src"]["total_churn"], 5);
    // Root README lands in the sentinel module; the binary never appears
    assert_eq!(report["modules"]["."]["added"], 1);
    assert!(report["files"].get("blob.bin").is_none());

    assert!(dir.path().join("top_files_churn.svg").exists());
    assert!(dir.path().join("module_churn.svg").exists());
}

#[test]
fn churn_is_idempotent_over_unchanged_history() {
    if !git_available() {
        eprintln!("skipping: git not available");
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    scratch_repo(dir.path());

    for out in ["first.json", "second.json"] {
        let output = Command::new(env!("CARGO_BIN_EXE_tidemark"))
            .args(["churn", "--repo", ".", "--out", out])
            .current_dir(dir.path())
            .output()
            .unwrap();
        assert!(output.status.success());
    }

    assert_eq!(
        std::fs::read(dir.path().join("first.json")).unwrap(),
        std::fs::read(dir.path().join("second.json")).unwrap(),
    );
}

#[test]
fn churn_rejects_non_repository() {
    let dir = tempfile::tempdir().unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_tidemark"))
        .args(["churn", "--repo", ".", "--out", "churn.json"])
        .current_dir(dir.path())
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Not a git repository"),
        "unexpected stderr: {stderr}"
    );
    assert!(!dir.path().join("churn.json").exists());
}

#[test]
fn churn_requires_repo_and_out_flags() {
    let output = Command::new(env!("CARGO_BIN_EXE_tidemark"))
        .arg("churn")
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--repo"));
}
