//! Settings for a single blog

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// API root used when a blog does not set `api_root`.
pub const DEFAULT_API_ROOT: &str = "https://blog.hatena.ne.jp";

/// Settings for one blog, as written under its id in a config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogConfig {
    /// Blog id, taken from the key the settings are written under
    #[serde(skip)]
    pub blog_id: String,

    pub local_root: Option<PathBuf>,
    pub username: Option<String>,
    pub password: Option<String>,

    /// Account owning the blog when it differs from `username`
    pub owner: Option<String>,

    /// Store entries directly under `local_root` instead of
    /// `local_root/<blog_id>`
    pub omit_domain: Option<bool>,

    /// Base URL of the AtomPub API
    pub api_root: Option<String>,

    /// Whether the settings come from a project-local config file
    #[serde(skip)]
    pub local: bool,
}

impl BlogConfig {
    pub fn new(blog_id: impl Into<String>) -> Self {
        Self {
            blog_id: blog_id.into(),
            ..Default::default()
        }
    }

    /// Directory holding this blog's entries.
    pub fn local_root_dir(&self) -> PathBuf {
        let root = self.local_root.clone().unwrap_or_default();
        if self.omit_domain.unwrap_or(false) {
            root
        } else {
            root.join(&self.blog_id)
        }
    }

    pub fn username(&self) -> &str {
        self.username.as_deref().unwrap_or_default()
    }

    pub fn password(&self) -> &str {
        self.password.as_deref().unwrap_or_default()
    }

    /// Account name in API URLs: `owner` if set, `username` otherwise.
    pub fn owner_name(&self) -> &str {
        self.owner
            .as_deref()
            .filter(|owner| !owner.is_empty())
            .unwrap_or_else(|| self.username())
    }

    pub fn api_root(&self) -> &str {
        self.api_root
            .as_deref()
            .filter(|root| !root.is_empty())
            .unwrap_or(DEFAULT_API_ROOT)
            .trim_end_matches('/')
    }

    /// Collection of regular entries.
    pub fn entry_endpoint_url(&self) -> String {
        self.collection_url("entry")
    }

    /// Collection of static pages.
    pub fn static_page_endpoint_url(&self) -> String {
        self.collection_url("page")
    }

    fn collection_url(&self, collection: &str) -> String {
        format!(
            "{}/{}/{}/atom/{collection}",
            self.api_root(),
            self.owner_name(),
            self.blog_id
        )
    }

    /// Fill unset fields from `fallback`.
    ///
    /// `owner` is not inherited: it names the account of one particular blog.
    pub fn inherit(&mut self, fallback: &BlogConfig) {
        if self.local_root.is_none() {
            self.local_root = fallback.local_root.clone();
        }
        if self.username.as_deref().is_none_or(str::is_empty) {
            self.username = fallback.username.clone();
        }
        if self.password.as_deref().is_none_or(str::is_empty) {
            self.password = fallback.password.clone();
        }
        if self.omit_domain.is_none() {
            self.omit_domain = fallback.omit_domain;
        }
        if self.api_root.is_none() {
            self.api_root = fallback.api_root.clone();
        }
        if !self.local {
            self.local = fallback.local;
        }
    }
}
