//! Atom feed and entry types

use chrono::{DateTime, FixedOffset};

/// Atom namespace
pub const ATOM_NS: &str = "http://www.w3.org/2005/Atom";
/// AtomPub namespace carrying the draft control element
pub const APP_NS: &str = "http://www.w3.org/2007/app";
/// Blog service extension namespace carrying the custom URL element
pub const HATENABLOG_NS: &str = "http://www.hatena.ne.jp/info/xmlns#hatenablog";

/// `<link rel=".." href=".."/>`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Link {
    pub rel: String,
    pub href: String,
}

impl Link {
    pub fn new(rel: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            rel: rel.into(),
            href: href.into(),
        }
    }
}

/// Ordered list of links as they appeared in the document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Links(Vec<Link>);

impl Links {
    pub fn new() -> Self {
        Self::default()
    }

    /// First link with relation `rel`.
    ///
    /// Later links sharing the relation are ignored.
    pub fn find(&self, rel: &str) -> Option<&Link> {
        self.0.iter().find(|link| link.rel == rel)
    }

    pub fn push(&mut self, link: Link) {
        self.0.push(link);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Link> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Link>> for Links {
    fn from(links: Vec<Link>) -> Self {
        Self(links)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Author {
    pub name: String,
}

/// `<content type="..">body</content>`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Content {
    pub content_type: Option<String>,
    pub body: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Category {
    pub term: String,
}

/// `<app:control>`; the service uses `"yes"` / `"no"` values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Control {
    pub draft: String,
    pub preview: String,
}

impl Control {
    /// Control block marking an entry as a previewable draft.
    pub fn draft() -> Self {
        Self {
            draft: "yes".to_string(),
            preview: "yes".to_string(),
        }
    }
}

/// A single Atom entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AtomEntry {
    pub id: Option<String>,
    pub links: Links,
    pub author: Option<Author>,
    pub title: String,
    pub updated: Option<DateTime<FixedOffset>>,
    pub published: Option<DateTime<FixedOffset>>,
    pub edited: Option<DateTime<FixedOffset>>,
    pub content: Content,
    pub categories: Vec<Category>,
    pub control: Option<Control>,
    pub custom_url: Option<String>,
}

impl AtomEntry {
    pub fn is_draft(&self) -> bool {
        self.control.as_ref().is_some_and(|c| c.draft == "yes")
    }
}

/// A page of an Atom feed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Feed {
    pub links: Links,
    pub title: String,
    pub subtitle: String,
    pub entries: Vec<AtomEntry>,
}
