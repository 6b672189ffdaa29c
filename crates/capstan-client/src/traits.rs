//! Collaborator traits consumed by the client cache
//!
//! The cache orchestrates four expensive steps but owns none of them:
//! loading a base configuration, checking client/server compatibility,
//! negotiating a concrete API version, and constructing a client. Each
//! is behind a trait so transports and credential mechanisms stay out
//! of this crate.
//!
//! Implementations return [`crate::Error`] directly; the cache never
//! wraps or reclassifies a collaborator failure.

use async_trait::async_trait;

use capstan_api::GroupVersion;

use crate::config::RestConfig;
use crate::error::Result;

/// Produces the base connection/credential configuration
///
/// The loaded configuration is independent of any API version; the
/// cache copies it before negotiation touches it.
#[async_trait]
pub trait ConfigLoader: Send + Sync {
    /// Load the base client configuration
    async fn client_config(&self) -> Result<RestConfig>;
}

/// Server-facing operations on clients for one API flavor
///
/// `client` is the bootstrap client handle where one exists; on the very
/// first calls it is `None` because no client has been materialized yet,
/// and implementations must be able to work from the configuration
/// alone.
#[async_trait]
pub trait ClientFactory: Send + Sync {
    /// The client handle type this factory constructs
    type Client: Send + Sync;

    /// Check that this client build is compatible with the server
    /// described by `config`
    async fn matches_server_version(
        &self,
        client: Option<&Self::Client>,
        config: &RestConfig,
    ) -> Result<()>;

    /// Choose one mutually acceptable group-version
    ///
    /// `preferred` is the caller's requested version if any; `registered`
    /// is the full set this build understands. Fails when no common
    /// version exists.
    async fn negotiate_version(
        &self,
        client: Option<&Self::Client>,
        config: &RestConfig,
        preferred: Option<&GroupVersion>,
        registered: &[GroupVersion],
    ) -> Result<GroupVersion>;

    /// Construct a client from a fully negotiated configuration
    async fn build(&self, config: &RestConfig) -> Result<Self::Client>;
}
