//! What every command needs: the merged configuration and a way to reach
//! the service for one blog.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use blogsync_atom::{HttpTransport, Logger, Transport};
use blogsync_core::{BlogConfig, Broker, Config, Entry};

use crate::error::{CliError, Result};

/// Builds a broker for a blog.
pub trait Connector {
    type Transport: Transport;

    fn connect(&self, config: BlogConfig) -> blogsync_core::Result<Broker<Self::Transport>>;
}

/// Connects over HTTPS, sharing one logger across brokers.
pub struct HttpConnector {
    logger: Arc<Logger>,
}

impl HttpConnector {
    pub fn new(logger: Arc<Logger>) -> Self {
        Self { logger }
    }
}

impl Connector for HttpConnector {
    type Transport = HttpTransport;

    fn connect(&self, config: BlogConfig) -> blogsync_core::Result<Broker<HttpTransport>> {
        Broker::connect(config, Arc::clone(&self.logger))
    }
}

/// Configuration plus connector, passed to every command.
pub struct Context<C> {
    pub config: Config,
    pub connector: C,
}

impl<C: Connector> Context<C> {
    pub fn new(config: Config, connector: C) -> Self {
        Self { config, connector }
    }

    /// Broker for a configured blog.
    pub fn broker(&self, blog_id: &str) -> Result<Broker<C::Transport>> {
        let config = self.config.require(blog_id)?;
        Ok(self.connector.connect(config)?)
    }

    /// Broker for the blog an already posted entry belongs to.
    pub fn broker_for(&self, entry: &Entry) -> Result<Broker<C::Transport>> {
        self.broker(&entry.blog_id()?)
    }

    /// Broker for the blog whose local tree contains `path`.
    pub fn broker_at(&self, path: &Path) -> Result<Broker<C::Transport>> {
        let config = self.config.detect_blog_config(path).ok_or_else(|| {
            CliError::user(format!(
                "{} is not inside the local root of any configured blog",
                path.display()
            ))
        })?;
        Ok(self.connector.connect(config)?)
    }
}

/// `path` made absolute against the working directory.
pub fn absolute(path: &Path) -> Result<PathBuf> {
    Ok(std::path::absolute(path)?)
}
