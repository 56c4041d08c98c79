//! Synchronization between one blog's local tree and the service
//!
//! The [`Broker`] owns the blog's settings, an [`AtomClient`] and a
//! [`FreshnessOracle`]. Every operation is a single blocking round trip (or
//! a paginated series of them) followed by at most one file write and one
//! file removal.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use blogsync_atom::{AtomClient, HttpTransport, Logger, Transport, WsseCredentials};
use blogsync_fs::io;
use chrono::{DateTime, Utc};

use crate::config::BlogConfig;
use crate::entry::Entry;
use crate::freshness::FreshnessOracle;
use crate::path::{self, is_staged_draft_file};
use crate::{Error, Result};

/// Synchronizes entries of one blog.
pub struct Broker<T> {
    config: BlogConfig,
    client: AtomClient<T>,
    oracle: FreshnessOracle,
    logger: Arc<Logger>,
}

impl Broker<HttpTransport> {
    /// Broker talking to the service over HTTPS, consulting git history for
    /// freshness.
    pub fn connect(config: BlogConfig, logger: Arc<Logger>) -> Result<Self> {
        let credentials = WsseCredentials::new(config.username(), config.password());
        let transport = HttpTransport::new(credentials, Arc::clone(&logger))
            .map_err(blogsync_atom::Error::from)?;
        Ok(Self::new(
            config,
            transport,
            FreshnessOracle::with_git(),
            logger,
        ))
    }
}

impl<T: Transport> Broker<T> {
    pub fn new(
        config: BlogConfig,
        transport: T,
        oracle: FreshnessOracle,
        logger: Arc<Logger>,
    ) -> Self {
        Self {
            config,
            client: AtomClient::new(transport),
            oracle,
            logger,
        }
    }

    pub fn config(&self) -> &BlogConfig {
        &self.config
    }

    pub fn client(&self) -> &AtomClient<T> {
        &self.client
    }

    pub fn entry_endpoint_url(&self) -> String {
        self.config.entry_endpoint_url()
    }

    pub fn static_page_endpoint_url(&self) -> String {
        self.config.static_page_endpoint_url()
    }

    /// Local file for `entry`.
    pub fn local_path(&self, entry: &Entry) -> Result<PathBuf> {
        path::local_path(&self.config, entry)
    }

    /// Every remote entry and static page, filtered by draft state.
    ///
    /// Entries come first, then static pages, each in feed order. A static
    /// page collection the service refuses to serve is skipped: blogs
    /// without the feature answer with an error status. Malformed documents
    /// are errors in either collection.
    pub fn fetch_remote_entries(&self, published: bool, drafts: bool) -> Result<Vec<Entry>> {
        let mut entries = Vec::new();
        self.fetch_collection(&self.entry_endpoint_url(), false, published, drafts, &mut entries)?;
        self.fetch_collection(
            &self.static_page_endpoint_url(),
            true,
            published,
            drafts,
            &mut entries,
        )?;
        Ok(entries)
    }

    fn fetch_collection(
        &self,
        url: &str,
        optional: bool,
        published: bool,
        drafts: bool,
        entries: &mut Vec<Entry>,
    ) -> Result<()> {
        let mut next = Some(url.to_string());
        while let Some(url) = next {
            let feed = match self.client.get_feed(&url) {
                Ok(feed) => feed,
                Err(blogsync_atom::Error::Transport(e)) if optional => {
                    self.logger
                        .log("warn", format_args!("{url} unavailable: {e}"));
                    return Ok(());
                }
                Err(e) => return Err(e.into()),
            };
            for atom in &feed.entries {
                let entry = Entry::from_atom(atom)?;
                if (entry.is_draft() && drafts) || (!entry.is_draft() && published) {
                    entries.push(entry);
                }
            }
            next = feed.links.find("next").map(|link| link.href.clone());
        }
        Ok(())
    }

    /// Write `entry` to `path` unless the local file is at least as new.
    pub fn store_fresh(&self, entry: &Entry, path: &Path) -> Result<bool> {
        let remote = entry.last_modified().unwrap_or(DateTime::<Utc>::MIN_UTC);
        if !self.oracle.is_remote_fresher(remote, path)? {
            return Ok(false);
        }
        self.logger.log(
            "fresh",
            format_args!("remote={remote} is newer than {}", path.display()),
        );
        self.store(entry, path, None)?;
        Ok(true)
    }

    /// Write `entry` to `path`, stamping its mtime with the entry's last
    /// modification, and remove `prior` if the entry lived elsewhere.
    pub fn store(&self, entry: &Entry, path: &Path, prior: Option<&Path>) -> Result<()> {
        self.logger.log("store", path.display());
        let document = entry.to_document()?;
        let mtime = entry.last_modified().unwrap_or_else(Utc::now);
        io::write_text_with_mtime(path, &document, mtime)?;

        if let Some(prior) = prior
            && !same_file(prior, path)
        {
            self.logger.log("remove", prior.display());
            match io::remove_file(prior) {
                Ok(()) => {}
                Err(e) if e.is_not_found() => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    /// Refresh the local file of an already posted entry from the service.
    pub fn fetch_entry(&self, local: &Entry, path: &Path) -> Result<bool> {
        let edit_url = require_edit_url(local)?;
        let mut remote = Entry::from_atom(&self.client.get_entry(edit_url)?)?;
        remote.set_custom_path(local.custom_path().map(str::to_string));
        self.store_fresh(&remote, path)
    }

    /// Upload `entry`, read from `path`, unless the remote copy is at least
    /// as new.
    pub fn upload_fresh(&self, entry: &Entry, path: &Path) -> Result<bool> {
        let edit_url = require_edit_url(entry)?;
        let remote = Entry::from_atom(&self.client.get_entry(edit_url)?)?;

        let local_time = entry.last_modified().unwrap_or(DateTime::<Utc>::MIN_UTC);
        let remote_time = remote.last_modified().unwrap_or(DateTime::<Utc>::MIN_UTC);
        if local_time <= remote_time {
            tracing::debug!(path = %path.display(), %local_time, %remote_time, "Remote is not older, skipping upload");
            return Ok(false);
        }

        self.put_entry(entry, Some(path))?;
        Ok(true)
    }

    /// Replace the remote entry and persist the service's answer.
    ///
    /// Returns the path the entry is stored at.
    pub fn put_entry(&self, entry: &Entry, prior: Option<&Path>) -> Result<PathBuf> {
        let edit_url = require_edit_url(entry)?;
        self.logger.log("upload", edit_url);
        let response = self.client.put_entry(edit_url, &entry.to_atom())?;
        self.persist_response(&response, entry, prior)
    }

    /// Create a new entry, or a static page when `is_page` is set.
    ///
    /// `prior` is the local file the entry was written in, removed once the
    /// entry is stored elsewhere. Returns the path the entry is stored at.
    pub fn post_entry(&self, entry: &Entry, is_page: bool, prior: Option<&Path>) -> Result<PathBuf> {
        let endpoint = if is_page {
            self.static_page_endpoint_url()
        } else {
            self.entry_endpoint_url()
        };
        self.logger.log("post", &endpoint);
        let response = self.client.post_entry(&endpoint, &entry.to_atom())?;
        self.persist_response(&response, entry, prior)
    }

    /// Delete the remote entry and its local file.
    pub fn remove_entry(&self, entry: &Entry, path: &Path) -> Result<()> {
        let edit_url = require_edit_url(entry)?;
        self.logger.log("remove", edit_url);
        self.client.delete_entry(edit_url)?;
        io::remove_file(path)?;
        Ok(())
    }

    fn persist_response(
        &self,
        response: &blogsync_atom::AtomEntry,
        sent: &Entry,
        prior: Option<&Path>,
    ) -> Result<PathBuf> {
        let mut entry = Entry::from_atom(response)?;
        entry.set_custom_path(sent.custom_path().map(str::to_string));

        let mut path = self.local_path(&entry)?;
        if entry.is_draft() && entry.custom_path().is_none() {
            // keep a staged draft under its staged name until it is published
            if prior.is_some_and(is_staged_draft_file) && !is_staged_draft_file(&path) {
                entry.set_url(None);
                path = self.local_path(&entry)?;
            }
            // a staged draft has no URL of its own yet
            if is_staged_draft_file(&path) {
                entry.set_url(None);
            }
        }

        self.store(&entry, &path, prior)?;
        Ok(path)
    }
}

fn require_edit_url(entry: &Entry) -> Result<&str> {
    if entry.is_remote() {
        Ok(entry.edit_url())
    } else {
        Err(Error::MissingEditUrl)
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    matches!(
        (io::canonicalize(a), io::canonicalize(b)),
        (Ok(a), Ok(b)) if a == b
    )
}
