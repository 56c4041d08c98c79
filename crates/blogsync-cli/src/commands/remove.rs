//! Delete entries remotely and locally

use std::path::PathBuf;

use blogsync_core::Entry;
use colored::Colorize;

use crate::context::{Connector, Context, absolute};
use crate::error::Result;

/// Run the remove command.
pub fn run_remove<C: Connector>(ctx: &Context<C>, files: &[PathBuf]) -> Result<()> {
    for file in files {
        let path = absolute(file)?;
        let entry = Entry::load(&path)?;
        let broker = ctx.broker_for(&entry)?;
        broker.remove_entry(&entry, &path)?;
        println!("{} {}", "remove".red().bold(), path.display());
    }
    Ok(())
}
