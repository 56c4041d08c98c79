//! The blog entry model shared by the local tree and the remote service

use std::path::Path;

use blogsync_atom::{AtomEntry, Category, Content, Control, Link, Links};
use chrono::{DateTime, FixedOffset, Utc};
use url::Url;

use crate::{Error, Result, frontmatter};

/// Metadata carried in an entry's frontmatter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryHeader {
    pub title: String,
    pub category: Vec<String>,
    pub date: Option<DateTime<FixedOffset>>,
    pub url: Option<Url>,
    pub edit_url: String,
    pub preview_url: Option<String>,
    pub is_draft: bool,
    pub custom_path: Option<String>,
}

impl EntryHeader {
    /// Drop `date` from a draft whose date is not strictly after `now`.
    ///
    /// The service stamps unpublished drafts with their last edit time; that
    /// value is not a publication date and must not be pinned locally.
    pub fn suppress_draft_date(&mut self, now: DateTime<Utc>) {
        if self.is_draft && self.date.is_some_and(|date| date <= now) {
            self.date = None;
        }
    }

    /// Add a category unless it is already present.
    pub fn add_category(&mut self, term: impl Into<String>) {
        let term = term.into();
        if !self.category.contains(&term) {
            self.category.push(term);
        }
    }
}

/// A blog entry: header, body and the time it was last modified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entry {
    header: EntryHeader,
    last_modified: Option<DateTime<Utc>>,
    content: String,
    content_type: String,
}

impl Entry {
    pub fn new(header: EntryHeader, content: impl Into<String>) -> Self {
        Self {
            header,
            last_modified: None,
            content: content.into(),
            content_type: String::new(),
        }
    }

    pub fn header(&self) -> &EntryHeader {
        &self.header
    }

    pub fn header_mut(&mut self) -> &mut EntryHeader {
        &mut self.header
    }

    pub fn title(&self) -> &str {
        &self.header.title
    }

    pub fn category(&self) -> &[String] {
        &self.header.category
    }

    pub fn date(&self) -> Option<DateTime<FixedOffset>> {
        self.header.date
    }

    pub fn url(&self) -> Option<&Url> {
        self.header.url.as_ref()
    }

    pub fn edit_url(&self) -> &str {
        &self.header.edit_url
    }

    pub fn preview_url(&self) -> Option<&str> {
        self.header.preview_url.as_deref()
    }

    pub fn is_draft(&self) -> bool {
        self.header.is_draft
    }

    pub fn custom_path(&self) -> Option<&str> {
        self.header
            .custom_path
            .as_deref()
            .filter(|path| !path.is_empty())
    }

    pub fn last_modified(&self) -> Option<DateTime<Utc>> {
        self.last_modified
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Whether the entry already exists on the service.
    pub fn is_remote(&self) -> bool {
        !self.header.edit_url.is_empty()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.header.title = title.into();
    }

    pub fn set_draft(&mut self, is_draft: bool) {
        self.header.is_draft = is_draft;
    }

    pub fn set_url(&mut self, url: Option<Url>) {
        self.header.url = url;
    }

    pub fn set_custom_path(&mut self, custom_path: Option<String>) {
        self.header.custom_path = custom_path.filter(|path| !path.is_empty());
    }

    pub fn set_last_modified(&mut self, last_modified: Option<DateTime<Utc>>) {
        self.last_modified = last_modified;
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    /// Turn a draft into a published entry modified at `now`.
    pub fn publish(&mut self, now: DateTime<Utc>) {
        self.header.is_draft = false;
        self.last_modified = Some(now);
    }

    /// Build an entry from its Atom representation.
    ///
    /// `alternate` and `edit` links are required. The Atom `custom_url`
    /// element is not mapped: a custom path only ever comes from the local
    /// side.
    pub fn from_atom(atom: &AtomEntry) -> Result<Self> {
        Self::from_atom_at(atom, Utc::now())
    }

    /// [`Entry::from_atom`] evaluating draft dates against `now`.
    pub fn from_atom_at(atom: &AtomEntry, now: DateTime<Utc>) -> Result<Self> {
        let alternate = atom
            .links
            .find("alternate")
            .ok_or_else(|| blogsync_atom::Error::missing_link("alternate"))?;
        let edit = atom
            .links
            .find("edit")
            .ok_or_else(|| blogsync_atom::Error::missing_link("edit"))?;
        let url = Url::parse(&alternate.href)?;

        let mut header = EntryHeader {
            title: atom.title.clone(),
            category: Vec::new(),
            date: atom.updated,
            url: Some(url),
            edit_url: edit.href.clone(),
            preview_url: atom.links.find("preview").map(|link| link.href.clone()),
            is_draft: atom.is_draft(),
            custom_path: None,
        };
        for category in &atom.categories {
            header.add_category(category.term.clone());
        }
        header.suppress_draft_date(now);

        let last_modified = atom
            .edited
            .or(atom.updated)
            .map(|time| time.with_timezone(&Utc));

        Ok(Self {
            header,
            last_modified,
            content: atom.content.body.clone(),
            content_type: atom.content.content_type.clone().unwrap_or_default(),
        })
    }

    /// The Atom representation sent to the service.
    pub fn to_atom(&self) -> AtomEntry {
        let mut links = Links::new();
        if let Some(url) = &self.header.url {
            links.push(Link::new("alternate", url.as_str()));
        }
        if self.is_remote() {
            links.push(Link::new("edit", self.header.edit_url.as_str()));
        }

        AtomEntry {
            links,
            title: self.header.title.clone(),
            updated: self.header.date,
            content: Content {
                content_type: Some(self.content_type.clone()).filter(|t| !t.is_empty()),
                body: self.content.clone(),
            },
            categories: self
                .header
                .category
                .iter()
                .map(|term| Category { term: term.clone() })
                .collect(),
            control: self.header.is_draft.then(Control::draft),
            custom_url: self.custom_path().map(str::to_string),
            ..Default::default()
        }
    }

    /// The blog id encoded in the EditURL.
    ///
    /// EditURLs look like `https://blog.hatena.ne.jp/{owner}/{blog_id}/atom/entry/{id}`.
    pub fn blog_id(&self) -> Result<String> {
        if !self.is_remote() {
            return Err(Error::MissingEditUrl);
        }
        let invalid = || Error::InvalidEditUrl {
            edit_url: self.header.edit_url.clone(),
        };
        let url = Url::parse(&self.header.edit_url).map_err(|_| invalid())?;
        url.path()
            .split('/')
            .nth(2)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .ok_or_else(invalid)
    }

    /// The last segment of the EditURL, which the service uses as entry id.
    pub fn entry_id(&self) -> Option<&str> {
        self.header
            .edit_url
            .rsplit('/')
            .next()
            .filter(|id| !id.is_empty())
    }

    /// Parse a frontmatter document.
    pub fn parse(text: &str) -> Result<Self> {
        let (header, content) = frontmatter::parse(text)?;
        Ok(Self::new(header, content))
    }

    /// Load a local file, taking `last_modified` from its mtime.
    pub fn load(path: &Path) -> Result<Self> {
        let text = blogsync_fs::io::read_text(path)?;
        let mut entry = Self::parse(&text)?;
        entry.last_modified = blogsync_fs::io::modified_time(path)?;
        Ok(entry)
    }

    /// Render the entry as a frontmatter document.
    pub fn to_document(&self) -> Result<String> {
        frontmatter::serialize(self)
    }
}
