//! Post a new entry from standard input

use std::io::Read;
use std::path::PathBuf;

use blogsync_core::Entry;
use colored::Colorize;

use crate::context::{Connector, Context};
use crate::error::Result;

/// Overrides applied to the posted document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostOptions {
    pub draft: bool,
    pub title: Option<String>,
    pub custom_path: Option<String>,
    pub page: bool,
}

/// Run the post command, reading the document from `input`.
///
/// Returns the path the posted entry was stored at.
pub fn run_post<C: Connector>(
    ctx: &Context<C>,
    blog_id: &str,
    options: &PostOptions,
    mut input: impl Read,
) -> Result<PathBuf> {
    let mut text = String::new();
    input.read_to_string(&mut text)?;

    let mut entry = Entry::parse(&text)?;
    if let Some(title) = &options.title {
        entry.set_title(title.clone());
    }
    if options.draft {
        entry.set_draft(true);
    }
    if let Some(custom_path) = &options.custom_path {
        entry.set_custom_path(Some(custom_path.clone()));
    }

    let broker = ctx.broker(blog_id)?;
    let path = broker.post_entry(&entry, options.page, None)?;
    println!("{} {}", "post".green().bold(), path.display());
    Ok(path)
}
