//! Group/version identifiers for versioned API surfaces
//!
//! An API version is addressed as `group/version` (for example
//! `batch/v2alpha1`) or as a bare `version` for the legacy core group
//! (for example `v1`). Parsing is strict: a malformed identifier is an
//! error rather than a best-effort guess, because these strings key
//! caches and are compared against server-advertised versions.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A parsed API group/version identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupVersion {
    /// API group; empty for the legacy core group
    pub group: String,
    /// Version within the group, e.g. `v1` or `v2beta1`
    pub version: String,
}

impl GroupVersion {
    /// Create a group-version from its two components
    pub fn new(group: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            version: version.into(),
        }
    }

    /// Create a version in the legacy core group (empty group)
    pub fn core(version: impl Into<String>) -> Self {
        Self::new("", version)
    }

    /// Parse a group-version string
    ///
    /// Accepts `version` (core group) and `group/version`. Rejects empty
    /// input, empty segments, more than one `/`, and characters outside
    /// `[A-Za-z0-9.-]`.
    pub fn parse(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(Error::invalid_group_version(s, "empty string"));
        }

        let (group, version) = match s.split_once('/') {
            None => ("", s),
            Some((group, version)) => {
                if version.contains('/') {
                    return Err(Error::invalid_group_version(s, "more than one '/'"));
                }
                (group, version)
            }
        };

        if group.is_empty() && s.contains('/') {
            return Err(Error::invalid_group_version(s, "empty group segment"));
        }
        if version.is_empty() {
            return Err(Error::invalid_group_version(s, "empty version segment"));
        }
        if !group.chars().all(is_identifier_char) || !version.chars().all(is_identifier_char) {
            return Err(Error::invalid_group_version(
                s,
                "characters outside [A-Za-z0-9.-]",
            ));
        }

        Ok(Self::new(group, version))
    }

    /// Whether this identifier is in the legacy core group
    pub fn is_core(&self) -> bool {
        self.group.is_empty()
    }
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '.' || c == '-'
}

impl fmt::Display for GroupVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.group.is_empty() {
            write!(f, "{}", self.version)
        } else {
            write!(f, "{}/{}", self.group, self.version)
        }
    }
}

impl std::str::FromStr for GroupVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        GroupVersion::parse(s)
    }
}
