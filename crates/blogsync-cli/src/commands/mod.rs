//! Command implementations for blogsync-cli

pub mod fetch;
pub mod list;
pub mod post;
pub mod pull;
pub mod push;
pub mod remove;

pub use fetch::run_fetch;
pub use list::run_list;
pub use post::{PostOptions, run_post};
pub use pull::run_pull;
pub use push::run_push;
pub use remove::run_remove;
