//! Tests for last-commit lookup

use std::fs;

use blogsync_git::last_clean_commit_time;
use blogsync_test_utils::git::{commit_file, real_git_repo_with_commit};
use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

#[test]
fn test_clean_tracked_file_reports_author_date() {
    let temp = TempDir::new().unwrap();
    real_git_repo_with_commit(temp.path());
    commit_file(
        temp.path(),
        "entry/2012/12/19/trip.md",
        "first\n",
        "2012-12-19T10:00:00+09:00",
    );
    commit_file(temp.path(), "other.md", "unrelated\n", "2013-01-01T00:00:00+00:00");

    let time = last_clean_commit_time(&temp.path().join("entry/2012/12/19/trip.md")).unwrap();

    assert_eq!(time, Some(Utc.with_ymd_and_hms(2012, 12, 19, 1, 0, 0).unwrap()));
}

#[test]
fn test_latest_touching_commit_wins() {
    let temp = TempDir::new().unwrap();
    real_git_repo_with_commit(temp.path());
    commit_file(temp.path(), "post.md", "v1\n", "2020-01-01T00:00:00+00:00");
    commit_file(temp.path(), "post.md", "v2\n", "2020-06-01T00:00:00+00:00");

    let time = last_clean_commit_time(&temp.path().join("post.md")).unwrap();

    assert_eq!(time, Some(Utc.with_ymd_and_hms(2020, 6, 1, 0, 0, 0).unwrap()));
}

#[test]
fn test_modified_file_is_not_clean() {
    let temp = TempDir::new().unwrap();
    real_git_repo_with_commit(temp.path());
    commit_file(temp.path(), "post.md", "v1\n", "2020-01-01T00:00:00+00:00");
    fs::write(temp.path().join("post.md"), "edited\n").unwrap();

    let time = last_clean_commit_time(&temp.path().join("post.md")).unwrap();

    assert_eq!(time, None);
}

#[test]
fn test_untracked_file_has_no_history() {
    let temp = TempDir::new().unwrap();
    real_git_repo_with_commit(temp.path());
    fs::write(temp.path().join("new.md"), "draft\n").unwrap();

    let time = last_clean_commit_time(&temp.path().join("new.md")).unwrap();

    assert_eq!(time, None);
}

#[test]
fn test_missing_file_is_an_error() {
    let temp = TempDir::new().unwrap();
    real_git_repo_with_commit(temp.path());

    assert!(last_clean_commit_time(&temp.path().join("missing.md")).is_err());
}
