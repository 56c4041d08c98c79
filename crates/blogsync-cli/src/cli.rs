//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// blogsync - Edit blog entries as local Markdown files
#[derive(Parser, Debug)]
#[command(name = "blogsync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Download entries of the given blogs (default: blogs in ./blogsync.yaml)
    Pull {
        /// Blog ids to pull
        blogs: Vec<String>,

        /// Skip drafts
        #[arg(long, conflicts_with = "only_drafts")]
        no_drafts: bool,

        /// Pull drafts only
        #[arg(long)]
        only_drafts: bool,
    },

    /// Refresh local entry files from the service
    Fetch {
        /// Entry files
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Upload local entry files, posting the ones never uploaded
    Push {
        /// Publish drafts
        #[arg(long)]
        publish: bool,

        /// Entry files
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Post a new entry read from standard input
    ///
    /// Examples:
    ///   blogsync post example.hatenablog.com < draft.md
    ///   blogsync post --draft --title "Ideas" example.hatenablog.com < ideas.md
    ///   blogsync post --page --custom-path about example.hatenablog.com < about.md
    Post {
        /// Blog id to post to
        blog: String,

        /// Post as a draft
        #[arg(long)]
        draft: bool,

        /// Entry title
        #[arg(long)]
        title: Option<String>,

        /// Path of the entry under the blog's URL
        #[arg(long)]
        custom_path: Option<String>,

        /// Post a static page instead of an entry
        #[arg(long)]
        page: bool,
    },

    /// List configured blogs and their local directories
    List,

    /// Delete entries from the service and the local tree
    Remove {
        /// Entry files
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}
