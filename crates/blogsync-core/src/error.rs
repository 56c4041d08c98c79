//! Error types for blogsync-core

use std::path::PathBuf;

/// Result type for blogsync-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in blogsync-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed frontmatter block
    #[error("Malformed frontmatter: {message}")]
    Frontmatter { message: String },

    /// A header field whose value cannot be converted
    #[error("Invalid {field} value {value:?}: {message}")]
    HeaderValue {
        field: &'static str,
        value: String,
        message: String,
    },

    /// No local path can be derived for the entry
    #[error("Cannot determine a local path for entry {edit_url:?}: it has no URL")]
    Unresolvable { edit_url: String },

    /// The entry has never been posted
    #[error("Entry has no EditURL")]
    MissingEditUrl,

    /// The blog id cannot be derived from the EditURL
    #[error("Cannot derive a blog id from EditURL {edit_url:?}")]
    InvalidEditUrl { edit_url: String },

    /// No configuration exists for the blog
    #[error("Blog not found: {blog_id}")]
    BlogNotFound { blog_id: String },

    /// None of the configuration files exist
    #[error("Configuration not found (looked at {paths:?})")]
    ConfigNotFound { paths: Vec<PathBuf> },

    /// A local file that does not sit under any blog's entry tree
    #[error("{path} is not a blog entry path")]
    NotAnEntryPath { path: PathBuf },

    // Transparent wrappers for underlying crate errors
    /// Wire format or transport error from blogsync-atom
    #[error(transparent)]
    Atom(#[from] blogsync_atom::Error),

    /// Filesystem error from blogsync-fs
    #[error(transparent)]
    Fs(#[from] blogsync_fs::Error),

    /// Git error from blogsync-git
    #[error(transparent)]
    Git(#[from] blogsync_git::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// YAML serialization/deserialization error
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    /// URL parse error
    #[error(transparent)]
    Url(#[from] url::ParseError),
}

impl Error {
    pub(crate) fn frontmatter(message: impl Into<String>) -> Self {
        Self::Frontmatter {
            message: message.into(),
        }
    }

    pub(crate) fn header_value(
        field: &'static str,
        value: impl Into<String>,
        message: impl ToString,
    ) -> Self {
        Self::HeaderValue {
            field,
            value: value.into(),
            message: message.to_string(),
        }
    }
}
