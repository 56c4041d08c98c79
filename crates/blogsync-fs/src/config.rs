//! YAML configuration loading

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::{Error, Result, io};

/// Loads YAML configuration documents from disk.
#[derive(Debug, Default)]
pub struct ConfigStore;

impl ConfigStore {
    pub fn new() -> Self {
        Self
    }

    /// Load and deserialize a YAML file.
    pub fn load<T: DeserializeOwned>(&self, path: &Path) -> Result<T> {
        let content = io::read_text(path)?;
        Self::parse(path, &content)
    }

    /// Load a YAML file if it exists.
    ///
    /// A missing file is `Ok(None)`; any other failure is an error.
    pub fn load_optional<T: DeserializeOwned>(&self, path: &Path) -> Result<Option<T>> {
        match self.load(path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.is_not_found() => {
                tracing::debug!(path = %path.display(), "config file not present");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Deserialize YAML text that was read from `path`.
    pub fn parse<T: DeserializeOwned>(path: &Path, content: &str) -> Result<T> {
        serde_yaml::from_str(content).map_err(|e| Error::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}
