//! Entry model and synchronization engine for blogsync
//!
//! This crate ties the Layer 0 crates together, implementing:
//!
//! - **Entry model**: header, body and modification time of a blog entry,
//!   convertible to and from Atom
//! - **Frontmatter**: the on-disk `---`-delimited YAML header format
//! - **Path resolution**: where an entry lives under a blog's local root,
//!   including staging of unpublished drafts
//! - **Freshness**: whether a remote copy should overwrite a local file
//! - **Broker**: pull, push, post, fetch and remove for one blog
//! - **Configuration**: per-blog settings merged from YAML files
//!
//! # Architecture
//!
//! ```text
//!                    blogsync-cli
//!                         |
//!                   blogsync-core
//!                         |
//!         +---------------+---------------+
//!         |               |               |
//!    blogsync-fs    blogsync-git    blogsync-atom
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use blogsync_atom::Logger;
//! use blogsync_core::{Broker, ConfigResolver};
//!
//! let config = ConfigResolver::new(std::env::current_dir()?).resolve()?;
//! let broker = Broker::connect(config.require("example.hatenablog.com")?, Arc::new(Logger::new()))?;
//! for entry in broker.fetch_remote_entries(true, true)? {
//!     let path = broker.local_path(&entry)?;
//!     broker.store_fresh(&entry, &path)?;
//! }
//! ```

pub mod broker;
pub mod config;
pub mod entry;
pub mod error;
pub mod freshness;
pub mod frontmatter;
pub mod path;

pub use broker::Broker;
pub use config::{BlogConfig, Config, ConfigResolver};
pub use entry::{Entry, EntryHeader};
pub use error::{Error, Result};
pub use freshness::{FreshnessOracle, GitHistory, HistoryLookup, NoHistory};
pub use path::{extract_entry_path, is_likely_given_path, local_path};
