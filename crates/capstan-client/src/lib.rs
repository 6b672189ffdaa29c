//! Memoizing client cache for a group/versioned API server
//!
//! Command-line tools that talk to a versioned API pay three expensive
//! setup costs: loading connection/credential configuration, optionally
//! confirming client/server compatibility, and negotiating a concrete
//! API version against the set of versions the server advertises. This
//! crate makes each of those happen at most once per process (per
//! distinct version string for negotiation) and reuses the results on
//! every subsequent call.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                 ClientCache                  │
//! │  default_state ── one-time bootstrap         │
//! │  configs ──────── version → RestConfig       │
//! │  clients ──────── canonical → client handle  │
//! └──────────────────────────────────────────────┘
//!          │               │              │
//!     ConfigLoader    ClientFactory   ApiRegistry
//!     (credentials)   (negotiate,     (known
//!                      check, build)   versions)
//! ```
//!
//! The collaborators are traits ([`ConfigLoader`], [`ClientFactory`]);
//! transports, authentication, and retry policy live behind them, not
//! here. Resolved configurations are memoized under both the requested
//! version string and the canonical negotiated string, so the two spell
//! the same cache entry.
//!
//! See [`ClientCache`] for the lookup semantics and a usage example.

pub mod cache;
pub mod config;
pub mod error;
pub mod loader;
pub mod traits;

pub use cache::ClientCache;
pub use config::{DEFAULT_API_ROOT, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT, RestConfig};
pub use error::{Error, Result};
pub use loader::{FileConfigLoader, FixedConfigLoader};
pub use traits::{ClientFactory, ConfigLoader};
