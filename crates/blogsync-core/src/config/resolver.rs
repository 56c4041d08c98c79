//! Configuration resolution with field-by-field merge
//!
//! The `ConfigResolver` loads the project and user config files and merges
//! them, earlier files taking priority.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use blogsync_fs::ConfigStore;

use super::blog::BlogConfig;
use crate::{Error, Result};

/// Project-local config file name, looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "blogsync.yaml";

/// Key of the section every blog inherits from.
pub const DEFAULT_SECTION: &str = "default";

/// Overrides the `default` username.
pub const USERNAME_ENV: &str = "BLOGSYNC_USERNAME";

/// Overrides the `default` password.
pub const PASSWORD_ENV: &str = "BLOGSYNC_PASSWORD";

type Document = BTreeMap<String, Option<BlogConfig>>;

/// Merged configuration of all known blogs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Settings inherited by every blog
    pub default: BlogConfig,

    /// Per-blog settings keyed by blog id, without inheritance applied
    pub blogs: BTreeMap<String, BlogConfig>,
}

impl Config {
    /// Parse the YAML `content` of the config file at `path`.
    ///
    /// Relative `local_root` values are resolved against the file's
    /// directory and a leading `~` against `home`. Blogs from a file named
    /// [`LOCAL_CONFIG_FILE`] are marked local.
    pub fn parse(path: &Path, content: &str, home: Option<&Path>) -> Result<Self> {
        let document: Option<Document> = ConfigStore::parse(path, content)?;
        let is_local = path
            .file_name()
            .is_some_and(|name| name == LOCAL_CONFIG_FILE);
        let base_dir = path.parent().unwrap_or(Path::new(""));

        let mut config = Config::default();
        for (blog_id, blog) in document.unwrap_or_default() {
            let mut blog = blog.unwrap_or_default();
            blog.blog_id = blog_id.clone();
            blog.local = is_local;
            blog.local_root = blog
                .local_root
                .filter(|root| !root.as_os_str().is_empty())
                .map(|root| resolve_local_root(&root, base_dir, home));

            if blog_id == DEFAULT_SECTION {
                config.default = blog;
            } else {
                config.blogs.insert(blog_id, blog);
            }
        }
        Ok(config)
    }

    /// Merge `other` into `self`; values already set in `self` win.
    pub fn merge(mut self, other: Config) -> Self {
        self.default.inherit(&other.default);
        for (blog_id, blog) in other.blogs {
            match self.blogs.get_mut(&blog_id) {
                Some(existing) => {
                    existing.inherit(&blog);
                    if existing.owner.is_none() {
                        existing.owner = blog.owner;
                    }
                }
                None => {
                    self.blogs.insert(blog_id, blog);
                }
            }
        }
        self
    }

    /// Replace the default credentials with non-empty values.
    pub fn apply_env_overrides(&mut self, username: Option<String>, password: Option<String>) {
        if let Some(username) = username.filter(|u| !u.is_empty()) {
            self.default.username = Some(username);
        }
        if let Some(password) = password.filter(|p| !p.is_empty()) {
            self.default.password = Some(password);
        }
    }

    /// Settings for `blog_id` with the default section applied.
    pub fn get(&self, blog_id: &str) -> Option<BlogConfig> {
        let mut blog = self.blogs.get(blog_id)?.clone();
        blog.inherit(&self.default);
        Some(blog)
    }

    /// Like [`Config::get`], but a missing blog is an error.
    pub fn require(&self, blog_id: &str) -> Result<BlogConfig> {
        self.get(blog_id).ok_or_else(|| Error::BlogNotFound {
            blog_id: blog_id.to_string(),
        })
    }

    /// Blog whose local root contains `path`, preferring the deepest root.
    pub fn detect_blog_config(&self, path: &Path) -> Option<BlogConfig> {
        self.blogs
            .keys()
            .filter_map(|blog_id| self.get(blog_id))
            .filter(|blog| blog.local_root.is_some() && path.starts_with(blog.local_root_dir()))
            .max_by_key(|blog| blog.local_root_dir().as_os_str().len())
    }

    /// Ids of every configured blog.
    pub fn blog_ids(&self) -> Vec<String> {
        self.blogs.keys().cloned().collect()
    }

    /// Ids of blogs declared in a project-local config file.
    pub fn local_blog_ids(&self) -> Vec<String> {
        self.blogs
            .values()
            .filter(|blog| blog.local)
            .map(|blog| blog.blog_id.clone())
            .collect()
    }
}

/// Resolves configuration by merging the project and user config files.
pub struct ConfigResolver {
    /// Directory searched for the project config
    cwd: PathBuf,

    /// Override for the home directory (used for testing).
    /// When `None`, `dirs::home_dir()` is used.
    home_override: Option<PathBuf>,
}

impl ConfigResolver {
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            home_override: None,
        }
    }

    /// Create a resolver with a custom home directory.
    pub fn with_home_dir(cwd: impl Into<PathBuf>, home: impl Into<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            home_override: Some(home.into()),
        }
    }

    fn home_dir(&self) -> Option<PathBuf> {
        self.home_override.clone().or_else(dirs::home_dir)
    }

    /// Config files in priority order.
    pub fn config_paths(&self) -> Vec<PathBuf> {
        let mut paths = vec![self.cwd.join(LOCAL_CONFIG_FILE)];
        if let Some(home) = self.home_dir() {
            paths.push(home.join(".config").join("blogsync").join("config.yaml"));
        }
        paths
    }

    /// Load and merge every config file that exists.
    ///
    /// Environment overrides are applied last. Having no config file at
    /// all is an error.
    pub fn resolve(&self) -> Result<Config> {
        let mut config = self.resolve_files()?;
        config.apply_env_overrides(
            std::env::var(USERNAME_ENV).ok(),
            std::env::var(PASSWORD_ENV).ok(),
        );
        Ok(config)
    }

    /// [`ConfigResolver::resolve`] without environment overrides.
    pub fn resolve_files(&self) -> Result<Config> {
        let home = self.home_dir();
        let paths = self.config_paths();

        let mut merged: Option<Config> = None;
        for path in &paths {
            let content = match blogsync_fs::io::read_text(path) {
                Ok(content) => content,
                Err(e) if e.is_not_found() => {
                    tracing::debug!(path = %path.display(), "No config file - skipping");
                    continue;
                }
                Err(e) => return Err(e.into()),
            };
            tracing::debug!(path = %path.display(), "Loading config");
            let config = Config::parse(path, &content, home.as_deref())?;
            merged = Some(match merged {
                Some(merged) => merged.merge(config),
                None => config,
            });
        }

        merged.ok_or(Error::ConfigNotFound { paths })
    }
}

fn resolve_local_root(root: &Path, base_dir: &Path, home: Option<&Path>) -> PathBuf {
    let expanded = match (root.strip_prefix("~"), home) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => root.to_path_buf(),
    };
    if expanded.is_absolute() {
        expanded
    } else {
        base_dir.join(expanded)
    }
}
