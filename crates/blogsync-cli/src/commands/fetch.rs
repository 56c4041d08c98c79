//! Refresh individual entry files

use std::path::PathBuf;

use blogsync_core::Entry;
use colored::Colorize;

use crate::context::{Connector, Context, absolute};
use crate::error::Result;

/// Run the fetch command. Returns the number of files rewritten.
pub fn run_fetch<C: Connector>(ctx: &Context<C>, files: &[PathBuf]) -> Result<usize> {
    let mut updated = 0;
    for file in files {
        let path = absolute(file)?;
        let entry = Entry::load(&path)?;
        let broker = ctx.broker_for(&entry)?;
        if broker.fetch_entry(&entry, &path)? {
            updated += 1;
            println!("{} {}", "fetch".green().bold(), path.display());
        } else {
            println!("{} {} is up to date", "fetch".dimmed(), path.display());
        }
    }
    Ok(updated)
}
