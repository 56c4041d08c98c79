//! Git history queries for blogsync
//!
//! Checkouts and clones reset file modification times, so the author date of
//! the last commit touching a clean file is a better measure of when it was
//! really edited.

pub mod error;
pub mod history;

pub use error::{Error, Result};
pub use history::last_clean_commit_time;
