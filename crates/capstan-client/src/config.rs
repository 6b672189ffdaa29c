//! Client configuration for a group/versioned API server
//!
//! A [`RestConfig`] describes how to reach a server independent of any
//! particular API version; the version field is filled in later by
//! negotiation. Configurations are plain values: cloning one yields an
//! independent copy, which is what lets the cache hand out entries
//! without aliasing its stored state.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use capstan_api::GroupVersion;

use crate::error::{Error, Result};

/// Default API root prefix on the server
pub const DEFAULT_API_ROOT: &str = "/api";

/// Default request timeout applied when none is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// User agent reported by clients built from a defaulted configuration
pub const DEFAULT_USER_AGENT: &str = concat!("capstan/", env!("CARGO_PKG_VERSION"));

/// Connection and credential configuration for one API server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestConfig {
    /// Base URL of the server, e.g. `https://api.example.com:6443`
    pub host: String,

    /// Root path under which versioned APIs are served
    #[serde(default)]
    pub api_root: Option<String>,

    /// Negotiated API version; `None` until negotiation has run
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_version: Option<GroupVersion>,

    /// Bearer token credential, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bearer_token: Option<String>,

    /// User agent to report; defaulted if unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    /// Per-request timeout; defaulted if unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<Duration>,

    /// Skip server certificate verification (for test servers)
    #[serde(default)]
    pub insecure: bool,
}

impl RestConfig {
    /// Create a configuration for `host` with everything else unset
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            api_root: None,
            group_version: None,
            bearer_token: None,
            user_agent: None,
            timeout: None,
            insecure: false,
        }
    }

    /// Set the bearer token credential
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Set the user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Fill in version-independent defaults expected by clients
    ///
    /// Only unset fields are touched; explicit values always win.
    pub fn apply_defaults(&mut self) {
        if self.api_root.is_none() {
            self.api_root = Some(DEFAULT_API_ROOT.to_string());
        }
        if self.user_agent.is_none() {
            self.user_agent = Some(DEFAULT_USER_AGENT.to_string());
        }
        if self.timeout.is_none() {
            self.timeout = Some(DEFAULT_TIMEOUT);
        }
    }

    /// Check that the configuration is usable as a connection target
    pub fn validate(&self) -> Result<()> {
        if self.host.is_empty() {
            return Err(Error::invalid_config("host must not be empty"));
        }
        let url = Url::parse(&self.host)?;
        if url.host_str().is_none() {
            return Err(Error::invalid_config(format!(
                "host {:?} has no authority component",
                self.host
            )));
        }
        Ok(())
    }
}
