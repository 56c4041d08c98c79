//! Deciding whether a remote entry should overwrite its local file

use std::path::Path;

use blogsync_fs::io;
use chrono::{DateTime, Utc};

use crate::Result;

/// Source of the last committed modification time of a file.
pub trait HistoryLookup {
    /// Author time of the last commit touching `path`, provided the file is
    /// tracked and has no uncommitted changes.
    fn last_clean_commit_time(&self, path: &Path) -> Result<Option<DateTime<Utc>>>;
}

/// Lookup for trees without version control.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHistory;

impl HistoryLookup for NoHistory {
    fn last_clean_commit_time(&self, _path: &Path) -> Result<Option<DateTime<Utc>>> {
        Ok(None)
    }
}

/// Lookup backed by the git repository containing the file.
#[derive(Debug, Default, Clone, Copy)]
pub struct GitHistory;

impl HistoryLookup for GitHistory {
    fn last_clean_commit_time(&self, path: &Path) -> Result<Option<DateTime<Utc>>> {
        Ok(blogsync_git::last_clean_commit_time(path)?)
    }
}

/// Compares remote modification times with local files.
pub struct FreshnessOracle {
    history: Box<dyn HistoryLookup>,
}

impl Default for FreshnessOracle {
    fn default() -> Self {
        Self::new(Box::new(NoHistory))
    }
}

impl std::fmt::Debug for FreshnessOracle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FreshnessOracle").finish_non_exhaustive()
    }
}

impl FreshnessOracle {
    pub fn new(history: Box<dyn HistoryLookup>) -> Self {
        Self { history }
    }

    /// Oracle consulting git history.
    pub fn with_git() -> Self {
        Self::new(Box::new(GitHistory))
    }

    /// Last modification time of the local file, `None` if it is missing.
    ///
    /// A clean tracked file reports its last commit's author time; anything
    /// else, including history lookup failures, reports the file mtime.
    pub fn local_last_modified(&self, path: &Path) -> Result<Option<DateTime<Utc>>> {
        let Some(mtime) = io::modified_time(path)? else {
            return Ok(None);
        };
        match self.history.last_clean_commit_time(path) {
            Ok(Some(committed)) => Ok(Some(committed)),
            Ok(None) => Ok(Some(mtime)),
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "History lookup failed, using mtime");
                Ok(Some(mtime))
            }
        }
    }

    /// Whether a remote version modified at `remote` is strictly newer than
    /// the file at `path`. A missing file is always older.
    pub fn is_remote_fresher(&self, remote: DateTime<Utc>, path: &Path) -> Result<bool> {
        let fresher = match self.local_last_modified(path)? {
            Some(local) => remote > local,
            None => true,
        };
        tracing::debug!(path = %path.display(), %remote, fresher, "Freshness check");
        Ok(fresher)
    }
}
