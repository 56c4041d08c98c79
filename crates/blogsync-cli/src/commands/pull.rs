//! Download entries of whole blogs

use colored::Colorize;

use crate::context::{Connector, Context};
use crate::error::{CliError, Result};

/// Run the pull command.
///
/// Without blog ids, every blog from the project-local config is pulled.
/// Returns the number of files written.
pub fn run_pull<C: Connector>(
    ctx: &Context<C>,
    blogs: &[String],
    no_drafts: bool,
    only_drafts: bool,
) -> Result<usize> {
    let blogs = if blogs.is_empty() {
        ctx.config.local_blog_ids()
    } else {
        blogs.to_vec()
    };
    if blogs.is_empty() {
        return Err(CliError::user(
            "no blog given and no blogsync.yaml in the current directory",
        ));
    }

    let mut total = 0;
    for blog_id in &blogs {
        let broker = ctx.broker(blog_id)?;
        let entries = broker.fetch_remote_entries(!only_drafts, !no_drafts)?;
        tracing::debug!(blog_id, count = entries.len(), "Fetched remote entries");

        let mut stored = 0;
        for entry in &entries {
            let path = broker.local_path(entry)?;
            if broker.store_fresh(entry, &path)? {
                stored += 1;
            }
        }
        println!(
            "{} {}: {} of {} entries updated",
            "pull".green().bold(),
            blog_id,
            stored,
            entries.len()
        );
        total += stored;
    }
    Ok(total)
}
