//! Shared test utilities for the blogsync workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`git`] - git repositories with controlled author dates
//! - [`transport`] - [`ScriptedTransport`], an in-memory AtomPub server stand-in
//! - [`atom`] - builders for Atom entry and feed documents

pub mod atom;
pub mod git;
pub mod transport;

pub use atom::{EntryXml, feed_xml};
pub use transport::{RecordedRequest, ScriptedTransport};
