//! Mapping entries to files under a blog's local root
//!
//! A published entry lives at the path of its public URL:
//! `https://example.hatenablog.com/entry/2012/12/19/weekend-trip` becomes
//! `<root>/example.hatenablog.com/entry/2012/12/19/weekend-trip.md`.
//! Drafts the service has not given a stable URL yet are staged under
//! `entry/_draft/<id>.md`, keyed by the last segment of their EditURL.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use blogsync_fs::NormalizedPath;
use percent_encoding::percent_decode_str;
use regex::Regex;

use crate::config::BlogConfig;
use crate::entry::Entry;
use crate::{Error, Result};

/// File extension of entry files.
pub const EXTENSION: &str = "md";

/// Directory below `entry/` holding staged drafts.
pub const DRAFT_DIR: &str = "_draft";

const ENTRY_SEGMENT: &str = "/entry/";

/// `2012/12/19/123456`
static DATE_AND_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^2[01][0-9]{2}/[01][0-9]/[0-3][0-9]/[0-9]{6}$").expect("static regex")
});

/// `20121219/1355875200`
static DATE_AND_EPOCH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^2[01][0-9]{2}[01][0-9][0-3][0-9]/[0-9]{9,12}$").expect("static regex")
});

/// `2012/12/19/weekend-trip`
static DATE_AND_TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^2[01][0-9]{2}/[01][0-9]/[0-3][0-9]/.+$").expect("static regex")
});

/// Local file for `entry` under the blog's root.
///
/// A non-empty custom path takes precedence over the URL. Drafts posted to
/// the entry collection whose URL does not look like one the service assigns
/// on publication are staged under `entry/_draft/`.
pub fn local_path(config: &BlogConfig, entry: &Entry) -> Result<PathBuf> {
    let root = NormalizedPath::new(config.local_root_dir());
    let url_path = entry
        .url()
        .map(|url| percent_decode_str(url.path()).decode_utf8_lossy().into_owned());

    let relative = if let Some(custom_path) = entry.custom_path() {
        custom_relative_path(entry, url_path.as_deref(), custom_path)
    } else if let Some(staged) = staged_relative_path(entry, url_path.as_deref()) {
        staged
    } else if let Some(url_path) = url_path {
        url_path
    } else {
        return Err(Error::Unresolvable {
            edit_url: entry.edit_url().to_string(),
        });
    };

    Ok(root
        .join(&format!("{}.{EXTENSION}", relative.trim_end_matches('/')))
        .to_native())
}

/// Split a slash-separated path at its last `/entry/` segment.
///
/// Returns `(subdir, entry_path)`: the part before `/entry/` and the part
/// after it. Without an `/entry/` segment the subdir is empty and the whole
/// path, less its leading slash, is the entry path.
pub fn extract_entry_path(path: &str) -> (&str, &str) {
    match path.rsplit_once(ENTRY_SEGMENT) {
        Some((subdir, entry_path)) => (subdir, entry_path),
        None => ("", path.trim_start_matches('/')),
    }
}

/// Entry path of a local file relative to the blog root, extension removed.
///
/// `<root>/entry/2012/12/19/weekend-trip.md` yields
/// `2012/12/19/weekend-trip`. `None` when the file is not below an
/// `entry/` directory of the root.
pub fn entry_path_of_file(config: &BlogConfig, path: &Path) -> Option<String> {
    let root = NormalizedPath::new(config.local_root_dir());
    let file = NormalizedPath::new(path);
    let relative = file.strip_prefix(&root)?;
    let relative = relative
        .strip_suffix(&format!(".{EXTENSION}"))
        .unwrap_or(relative);
    let relative = format!("/{relative}");
    let (_, entry_path) = relative.rsplit_once(ENTRY_SEGMENT)?;
    Some(entry_path.to_string()).filter(|p| !p.is_empty())
}

/// Whether `entry_path` looks like a path the service assigns on its own.
pub fn is_likely_given_path(entry_path: &str) -> bool {
    DATE_AND_TIME.is_match(entry_path)
        || DATE_AND_EPOCH.is_match(entry_path)
        || DATE_AND_TITLE.is_match(entry_path)
}

/// Whether an entry path points into the draft staging directory.
pub fn is_staged_draft_path(entry_path: &str) -> bool {
    entry_path.starts_with(&format!("{DRAFT_DIR}/"))
}

/// Whether a local file sits in a draft staging directory.
pub fn is_staged_draft_file(path: &Path) -> bool {
    NormalizedPath::new(path)
        .as_str()
        .contains(&format!("{ENTRY_SEGMENT}{DRAFT_DIR}/"))
}

fn custom_relative_path(entry: &Entry, url_path: Option<&str>, custom_path: &str) -> String {
    let custom_path = custom_path.trim_start_matches('/');
    if entry.edit_url().contains("/atom/page/") {
        // static pages have no entry/ prefix
        return custom_path.to_string();
    }
    let subdir = url_path
        .and_then(|p| p.rsplit_once(ENTRY_SEGMENT))
        .map_or("", |(subdir, _)| subdir);
    format!("{subdir}{ENTRY_SEGMENT}{custom_path}")
}

fn staged_relative_path(entry: &Entry, url_path: Option<&str>) -> Option<String> {
    if !entry.is_draft() || !entry.edit_url().contains("/atom/entry/") {
        return None;
    }
    let id = entry.entry_id()?;
    let subdir = match url_path {
        Some(url_path) => {
            let (subdir, entry_path) = extract_entry_path(url_path);
            if is_likely_given_path(entry_path) {
                return None;
            }
            subdir
        }
        None => "",
    };
    Some(format!("{subdir}{ENTRY_SEGMENT}{DRAFT_DIR}/{id}"))
}
