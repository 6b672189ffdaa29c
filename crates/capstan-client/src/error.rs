//! Error types for client configuration and caching
//!
//! The cache itself never classifies or wraps collaborator failures; the
//! variants below are the vocabulary collaborator implementations use,
//! and the cache passes them through verbatim with `?`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    // Collaborator failures, propagated unchanged by the cache
    #[error("failed to load client configuration: {0}")]
    ConfigLoad(String),

    #[error("client/server version mismatch: {0}")]
    VersionMismatch(String),

    #[error("unable to negotiate an API version: {0}")]
    Negotiation(String),

    #[error("failed to construct client: {0}")]
    ClientBuild(String),

    // Version string handling
    #[error(transparent)]
    InvalidGroupVersion(#[from] capstan_api::Error),

    // Configuration validation
    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid host URL: {0}")]
    InvalidHost(#[from] url::ParseError),

    // File loader errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed configuration file: {0}")]
    MalformedConfigFile(#[from] serde_json::Error),
}

impl Error {
    /// Create a configuration-load error
    pub fn config_load(reason: impl Into<String>) -> Self {
        Self::ConfigLoad(reason.into())
    }

    /// Create a version-mismatch error
    pub fn version_mismatch(reason: impl Into<String>) -> Self {
        Self::VersionMismatch(reason.into())
    }

    /// Create a negotiation error
    pub fn negotiation(reason: impl Into<String>) -> Self {
        Self::Negotiation(reason.into())
    }

    /// Create a client-construction error
    pub fn client_build(reason: impl Into<String>) -> Self {
        Self::ClientBuild(reason.into())
    }

    /// Create an invalid-configuration error
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig(reason.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
