//! Blog configuration and its resolution from YAML files
//!
//! # Configuration Sources
//!
//! Configuration is loaded from these files, earlier files taking priority
//! field by field:
//!
//! 1. **Project config** - `./blogsync.yaml`; blogs declared here are *local*
//!    and are what `pull` synchronizes when no blog is named
//! 2. **User config** - `~/.config/blogsync/config.yaml`
//!
//! Each file maps blog ids to settings. The `default` key holds settings
//! every blog inherits when it does not set them itself:
//!
//! ```yaml
//! default:
//!   local_root: ~/blogs
//!   username: motemen
//!   password: secret
//! example.hatenablog.com:
//!   omit_domain: true
//! ```
//!
//! `BLOGSYNC_USERNAME` and `BLOGSYNC_PASSWORD` override the `default`
//! credentials.
//!
//! # Example
//!
//! ```ignore
//! use blogsync_core::config::ConfigResolver;
//!
//! let config = ConfigResolver::new(std::env::current_dir()?).resolve()?;
//! let blog = config.get("example.hatenablog.com");
//! ```

mod blog;
mod resolver;

pub use blog::{BlogConfig, DEFAULT_API_ROOT};
pub use resolver::{
    Config, ConfigResolver, DEFAULT_SECTION, LOCAL_CONFIG_FILE, PASSWORD_ENV, USERNAME_ENV,
};
