//! Filesystem layer for blogsync
//!
//! Provides slash-normalized paths, atomic writes that also stamp the
//! modification time, and YAML configuration loading.

pub mod config;
pub mod error;
pub mod io;
pub mod path;

pub use config::ConfigStore;
pub use error::{Error, Result};
pub use path::NormalizedPath;
