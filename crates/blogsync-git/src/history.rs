//! Last-commit lookup for individual files.

use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone, Utc};
use git2::{Commit, ErrorCode, Repository};

use crate::{Error, Result};

/// Author time of the last commit that touched `path`.
///
/// Returns `Ok(None)` when `path` is not inside a git work tree, is
/// untracked or ignored, has uncommitted changes, or the repository has no
/// commits yet. Only a clean, tracked file yields a timestamp.
pub fn last_clean_commit_time(path: &Path) -> Result<Option<DateTime<Utc>>> {
    let path = blogsync_fs::io::canonicalize(path)?;
    let start = path.parent().unwrap_or(&path);

    let repo = match Repository::discover(start) {
        Ok(repo) => repo,
        Err(e) if e.code() == ErrorCode::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let Some(workdir) = repo.workdir() else {
        return Ok(None);
    };
    let workdir = blogsync_fs::io::canonicalize(workdir)?;
    let relative = relative_to(&path, &workdir)?;

    let status = repo.status_file(&relative)?;
    if !status.is_empty() {
        tracing::debug!(path = %path.display(), ?status, "file is not clean in git");
        return Ok(None);
    }

    let head = match repo.head() {
        Ok(head) => head.peel_to_commit()?,
        Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => {
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };

    let mut revwalk = repo.revwalk()?;
    revwalk.push(head.id())?;
    revwalk.set_sorting(git2::Sort::TOPOLOGICAL | git2::Sort::TIME)?;

    for oid in revwalk {
        let commit = repo.find_commit(oid?)?;
        if touches(&commit, &relative)? {
            let seconds = commit.author().when().seconds();
            return Ok(Utc.timestamp_opt(seconds, 0).single());
        }
    }

    Ok(None)
}

fn relative_to(path: &Path, workdir: &Path) -> Result<PathBuf> {
    path.strip_prefix(workdir)
        .map(Path::to_path_buf)
        .map_err(|_| Error::OutsideWorkTree {
            path: path.to_path_buf(),
        })
}

/// Whether `commit` changed the blob at `relative` compared to its first parent.
fn touches(commit: &Commit<'_>, relative: &Path) -> Result<bool> {
    let Some(blob) = blob_id(commit, relative)? else {
        return Ok(false);
    };

    if commit.parent_count() == 0 {
        return Ok(true);
    }

    let parent = commit.parent(0)?;
    Ok(blob_id(&parent, relative)? != Some(blob))
}

fn blob_id(commit: &Commit<'_>, relative: &Path) -> Result<Option<git2::Oid>> {
    match commit.tree()?.get_path(relative) {
        Ok(entry) => Ok(Some(entry.id())),
        Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}
