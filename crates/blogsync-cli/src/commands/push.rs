//! Upload local entry files

use std::path::{Path, PathBuf};

use blogsync_core::path::{entry_path_of_file, is_likely_given_path, is_staged_draft_path};
use blogsync_core::{Broker, Entry};
use chrono::Utc;
use colored::Colorize;

use crate::context::{Connector, Context, absolute};
use crate::error::{CliError, Result};

/// Run the push command.
///
/// Files without an EditURL are posted as new entries of the blog whose
/// local root contains them, named after their path below `entry/`. Other
/// files are uploaded when newer than the remote copy. Returns the number
/// of entries sent.
pub fn run_push<C: Connector>(ctx: &Context<C>, files: &[PathBuf], publish: bool) -> Result<usize> {
    let mut sent = 0;
    for file in files {
        let path = absolute(file)?;
        let mut entry = Entry::load(&path)?;
        if publish && entry.is_draft() {
            entry.publish(Utc::now());
        }

        let pushed = if entry.is_remote() {
            let broker = ctx.broker_for(&entry)?;
            upload(&broker, &mut entry, &path)?
        } else {
            let broker = ctx.broker_at(&path)?;
            post_new(&broker, &mut entry, &path)?;
            true
        };

        if pushed {
            sent += 1;
            println!("{} {}", "push".green().bold(), path.display());
        } else {
            println!("{} {} is up to date", "push".dimmed(), path.display());
        }
    }
    Ok(sent)
}

fn upload<T: blogsync_atom::Transport>(
    broker: &Broker<T>,
    entry: &mut Entry,
    path: &Path,
) -> Result<bool> {
    if entry.custom_path().is_none()
        && let Some(entry_path) = entry_path_of_file(broker.config(), path)
        && !is_likely_given_path(&entry_path)
        && !is_staged_draft_path(&entry_path)
    {
        entry.set_custom_path(Some(entry_path));
    }
    Ok(broker.upload_fresh(entry, path)?)
}

fn post_new<T: blogsync_atom::Transport>(
    broker: &Broker<T>,
    entry: &mut Entry,
    path: &Path,
) -> Result<PathBuf> {
    if entry.custom_path().is_none() {
        let entry_path = entry_path_of_file(broker.config(), path)
            .filter(|p| !is_staged_draft_path(p))
            .ok_or_else(|| {
                CliError::user(format!(
                    "{} is not below an entry/ directory; cannot derive its path",
                    path.display()
                ))
            })?;
        entry.set_custom_path(Some(entry_path));
    }
    Ok(broker.post_entry(entry, false, Some(path))?)
}
