//! blogsync CLI
//!
//! Keeps a blog's entries and a tree of local Markdown files in sync.

mod cli;
mod commands;
mod context;
mod error;
mod logging;

use std::sync::Arc;

use blogsync_atom::Logger;
use blogsync_core::ConfigResolver;
use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use commands::PostOptions;
use context::{Context, HttpConnector};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}: {}", "warning".yellow().bold(), e);
    }
    tracing::debug!("Verbose mode enabled");

    let logger = Arc::new(Logger::from_env()?);
    let result = execute_command(cli.command, Arc::clone(&logger));
    logger.close()?;
    result
}

fn execute_command(cmd: Commands, logger: Arc<Logger>) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let config = ConfigResolver::new(&cwd).resolve()?;

    let ctx = Context::new(config, HttpConnector::new(logger));
    match cmd {
        Commands::Pull {
            blogs,
            no_drafts,
            only_drafts,
        } => commands::run_pull(&ctx, &blogs, no_drafts, only_drafts).map(drop),
        Commands::Fetch { files } => commands::run_fetch(&ctx, &files).map(drop),
        Commands::Push { publish, files } => commands::run_push(&ctx, &files, publish).map(drop),
        Commands::Post {
            blog,
            draft,
            title,
            custom_path,
            page,
        } => {
            let options = PostOptions {
                draft,
                title,
                custom_path,
                page,
            };
            commands::run_post(&ctx, &blog, &options, std::io::stdin().lock()).map(drop)
        }
        Commands::Remove { files } => commands::run_remove(&ctx, &files),
        Commands::List => commands::run_list(&ctx.config, &mut std::io::stdout().lock()),
    }
}
