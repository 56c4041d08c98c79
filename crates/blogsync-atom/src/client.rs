//! AtomPub operations over a [`Transport`]

use crate::codec::{parse_entry, parse_feed, serialize_entry};
use crate::model::{AtomEntry, Feed};
use crate::transport::{Method, Transport};
use crate::Result;

/// AtomPub client: every call is exactly one request.
#[derive(Debug)]
pub struct AtomClient<T> {
    transport: T,
}

impl<T: Transport> AtomClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// GET one feed page.
    pub fn get_feed(&self, url: &str) -> Result<Feed> {
        let response = self.transport.request(Method::Get, url, None)?;
        parse_feed(&response.body)
    }

    /// GET a single entry by its edit URL.
    pub fn get_entry(&self, url: &str) -> Result<AtomEntry> {
        let response = self.transport.request(Method::Get, url, None)?;
        parse_entry(&response.body)
    }

    /// PUT `entry` to its edit URL and return the server's version.
    pub fn put_entry(&self, url: &str, entry: &AtomEntry) -> Result<AtomEntry> {
        let body = serialize_entry(entry)?;
        let response = self.transport.request(Method::Put, url, Some(&body))?;
        parse_entry(&response.body)
    }

    /// POST `entry` to a collection and return the created entry.
    pub fn post_entry(&self, url: &str, entry: &AtomEntry) -> Result<AtomEntry> {
        let body = serialize_entry(entry)?;
        let response = self.transport.request(Method::Post, url, Some(&body))?;
        parse_entry(&response.body)
    }

    /// DELETE the entry at its edit URL.
    pub fn delete_entry(&self, url: &str) -> Result<()> {
        self.transport.request(Method::Delete, url, None)?;
        Ok(())
    }
}
