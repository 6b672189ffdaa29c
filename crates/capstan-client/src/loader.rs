//! Built-in configuration loaders
//!
//! Two small [`ConfigLoader`] implementations cover the common cases:
//! a fixed in-memory configuration (programmatic setup and tests) and a
//! JSON file on disk. Anything richer, such as merged credential chains,
//! belongs in its own crate behind the same trait.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::config::RestConfig;
use crate::error::Result;
use crate::traits::ConfigLoader;

/// Loader that returns a preset configuration
#[derive(Debug, Clone)]
pub struct FixedConfigLoader {
    config: RestConfig,
}

impl FixedConfigLoader {
    /// Create a loader that always returns `config`
    ///
    /// The configuration is validated on every load, not at construction,
    /// so load failures surface through the same path as any other
    /// loader's.
    pub fn new(config: RestConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl ConfigLoader for FixedConfigLoader {
    async fn client_config(&self) -> Result<RestConfig> {
        self.config.validate()?;
        Ok(self.config.clone())
    }
}

/// Loader that reads a JSON-encoded [`RestConfig`] from disk
#[derive(Debug, Clone)]
pub struct FileConfigLoader {
    path: PathBuf,
}

impl FileConfigLoader {
    /// Create a loader reading from `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path this loader reads from
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ConfigLoader for FileConfigLoader {
    async fn client_config(&self) -> Result<RestConfig> {
        let raw = tokio::fs::read(&self.path).await?;
        let config: RestConfig = serde_json::from_slice(&raw)?;
        config.validate()?;

        debug!(path = %self.path.display(), host = %config.host, "loaded client configuration file");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::error::Error;

    #[tokio::test]
    async fn test_fixed_loader_returns_config() {
        let loader = FixedConfigLoader::new(RestConfig::new("https://api.example.com"));
        let config = loader.client_config().await.unwrap();
        assert_eq!(config.host, "https://api.example.com");
    }

    #[tokio::test]
    async fn test_fixed_loader_validates() {
        let loader = FixedConfigLoader::new(RestConfig::new(""));
        assert!(loader.client_config().await.is_err());
    }

    #[tokio::test]
    async fn test_file_loader_reads_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        tokio::fs::write(
            &path,
            r#"{"host": "https://api.example.com", "bearer_token": "sekrit"}"#,
        )
        .await
        .unwrap();

        let config = FileConfigLoader::new(&path).client_config().await.unwrap();
        assert_eq!(config.host, "https://api.example.com");
        assert_eq!(config.bearer_token.as_deref(), Some("sekrit"));
        assert_eq!(config.group_version, None);
    }

    #[tokio::test]
    async fn test_file_loader_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let loader = FileConfigLoader::new(dir.path().join("absent.json"));
        assert!(matches!(loader.client_config().await, Err(Error::Io(_))));
    }

    #[tokio::test]
    async fn test_file_loader_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        tokio::fs::write(&path, b"{ not json").await.unwrap();

        let result = FileConfigLoader::new(&path).client_config().await;
        assert!(matches!(result, Err(Error::MalformedConfigFile(_))));
    }
}
