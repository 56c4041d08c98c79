//! Error types for blogsync-git

use std::path::PathBuf;

/// Result type for blogsync-git operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in blogsync-git operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("Filesystem error: {0}")]
    Fs(#[from] blogsync_fs::Error),

    #[error("{path} is outside the work tree of its repository")]
    OutsideWorkTree { path: PathBuf },
}
