//! Registry of group-versions known to the process
//!
//! Version negotiation needs the full set of group-versions this build
//! understands, independent of what any one server advertises. The
//! registry keeps that set as an ordered, duplicate-free list of version
//! strings and hands out the parsed form on demand.

use crate::error::Result;
use crate::group_version::GroupVersion;

/// Ordered set of registered group-version strings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiRegistry {
    versions: Vec<String>,
}

impl ApiRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry from an ordered list of version strings
    ///
    /// Duplicates are dropped, keeping the first occurrence. Entries are
    /// not parsed here; [`ApiRegistry::group_versions`] reports malformed
    /// entries when the set is actually needed.
    pub fn from_versions<I, S>(versions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut registry = Self::new();
        for version in versions {
            registry.register(version);
        }
        registry
    }

    /// Add a version string, keeping registration order and ignoring
    /// duplicates
    pub fn register(&mut self, version: impl Into<String>) {
        let version = version.into();
        if !self.versions.iter().any(|v| *v == version) {
            self.versions.push(version);
        }
    }

    /// The registered version strings, in registration order
    pub fn versions(&self) -> &[String] {
        &self.versions
    }

    /// Parse every registered version
    ///
    /// Fails on the first malformed entry; a registry containing an
    /// unparseable string is a build defect, not a negotiable condition.
    pub fn group_versions(&self) -> Result<Vec<GroupVersion>> {
        self.versions
            .iter()
            .map(|v| GroupVersion::parse(v))
            .collect()
    }

    /// Number of registered versions
    pub fn len(&self) -> usize {
        self.versions.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_order_preserved() {
        let registry = ApiRegistry::from_versions(["apps/v1", "v1", "batch/v2alpha1"]);
        assert_eq!(registry.versions(), ["apps/v1", "v1", "batch/v2alpha1"]);
    }

    #[test]
    fn test_duplicates_ignored() {
        let mut registry = ApiRegistry::from_versions(["v1", "v1"]);
        registry.register("v1");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_group_versions_parses_all() {
        let registry = ApiRegistry::from_versions(["v1", "apps/v1"]);
        let parsed = registry.group_versions().unwrap();
        assert_eq!(
            parsed,
            vec![GroupVersion::core("v1"), GroupVersion::new("apps", "v1")]
        );
    }

    #[test]
    fn test_group_versions_rejects_malformed_entry() {
        let registry = ApiRegistry::from_versions(["v1", "???"]);
        assert!(registry.group_versions().is_err());
    }

    #[test]
    fn test_empty_registry() {
        let registry = ApiRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.group_versions().unwrap().is_empty());
    }
}
