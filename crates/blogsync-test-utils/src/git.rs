//! Git repository fixtures driven through the `git` CLI.

use std::fs;
use std::path::Path;
use std::process::Command;

fn run(path: &Path, args: &[&str], envs: &[(&str, &str)]) {
    let output = Command::new("git")
        .args(args)
        .envs(envs.iter().copied())
        .current_dir(path)
        .output()
        .unwrap_or_else(|e| panic!("failed to run `git {args:?}`: {e}"));
    if !output.status.success() {
        panic!(
            "`git {args:?}` failed:\n{}",
            String::from_utf8_lossy(&output.stderr)
        );
    }
}

/// Initialises a real git repository with an initial commit.
///
/// Configures `user.email`, `user.name` and `commit.gpgsign = false`, then
/// commits a `README.md`.
///
/// # Panics
/// Panics if any git operation fails.
pub fn real_git_repo_with_commit(path: &Path) {
    run(path, &["init"], &[]);
    run(path, &["config", "user.email", "test@test.com"], &[]);
    run(path, &["config", "user.name", "Test User"], &[]);
    run(path, &["config", "commit.gpgsign", "false"], &[]);

    fs::write(path.join("README.md"), "# Test")
        .unwrap_or_else(|e| panic!("failed to write README.md: {e}"));

    run(path, &["add", "."], &[]);
    run(path, &["commit", "-m", "Initial commit"], &[]);
}

/// Writes `content` to `relative` inside the repository and commits it with
/// the given author date (any format `git` accepts, e.g. RFC 3339).
///
/// # Panics
/// Panics if the write or any git operation fails.
pub fn commit_file(repo: &Path, relative: &str, content: &str, author_date: &str) {
    let path = repo.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .unwrap_or_else(|e| panic!("failed to create {}: {e}", parent.display()));
    }
    fs::write(&path, content).unwrap_or_else(|e| panic!("failed to write {relative}: {e}"));

    run(repo, &["add", relative], &[]);
    run(
        repo,
        &["commit", "-m", &format!("Update {relative}")],
        &[("GIT_AUTHOR_DATE", author_date)],
    );
}
