//! Group/version vocabulary for the capstan API client
//!
//! This crate holds the version-addressing types shared by everything
//! that talks to a group/versioned API server:
//!
//! - [`GroupVersion`]: a parsed `group/version` identifier with strict
//!   validation
//! - [`ApiRegistry`]: the ordered set of group-versions a build knows
//!   how to speak
//!
//! # Example
//!
//! ```rust
//! use capstan_api::{ApiRegistry, GroupVersion};
//!
//! let gv = GroupVersion::parse("apps/v1")?;
//! assert_eq!(gv.group, "apps");
//! assert_eq!(gv.to_string(), "apps/v1");
//!
//! let registry = ApiRegistry::from_versions(["v1", "apps/v1"]);
//! assert_eq!(registry.group_versions()?.len(), 2);
//! # Ok::<(), capstan_api::Error>(())
//! ```

pub mod error;
pub mod group_version;
pub mod registry;

pub use error::{Error, Result};
pub use group_version::GroupVersion;
pub use registry::ApiRegistry;
