//! Error types for blogsync-atom

use crate::transport::TransportError;

/// Result type for blogsync-atom operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in blogsync-atom operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The remote answered with a failure status or could not be reached
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Malformed XML or an unexpected document shape
    #[error("Malformed Atom XML: {message}")]
    Xml { message: String },

    /// A timestamp element did not hold an RFC 3339 value
    #[error("Invalid timestamp in <{element}>: {value:?}")]
    Timestamp { element: String, value: String },

    /// An entry lacks a link relation the sync engine depends on
    #[error("could not find link[rel={rel}]")]
    MissingLink { rel: String },
}

impl Error {
    pub fn xml(message: impl std::fmt::Display) -> Self {
        Self::Xml {
            message: message.to_string(),
        }
    }

    pub fn missing_link(rel: &str) -> Self {
        Self::MissingLink {
            rel: rel.to_string(),
        }
    }
}
