//! Package index trait for querying installed and upgradable packages

use std::collections::BTreeMap;

#[cfg(test)]
use mockall::automock;

use crate::version::error::UpgradeError;

/// A single package as reported by the package manager
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageEntry {
    pub name: String,
    pub version: String,
}

impl PackageEntry {
    pub fn new(name: &str, version: &str) -> Self {
        Self {
            name: name.to_string(),
            version: version.to_string(),
        }
    }
}

/// Trait for read-only queries against the package database
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait PackageIndex: Send + Sync {
    /// Installed packages matching `package_name`
    ///
    /// Several entries may share a name (e.g. kernels kept side by side).
    async fn installed(&self, package_name: &str) -> Result<Vec<PackageEntry>, UpgradeError>;

    /// Packages an unconstrained upgrade would install for `package_name`
    ///
    /// # Returns
    /// * `Ok(vec![])` - No upgrade is available
    /// * `Ok(entries)` - One or more candidates, in no particular order
    async fn upgrades(&self, package_name: &str) -> Result<Vec<PackageEntry>, UpgradeError>;
}

/// Group entries by package name, keeping the version strings of each group
pub fn group_by_name(entries: Vec<PackageEntry>) -> BTreeMap<String, Vec<String>> {
    let mut groups: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for entry in entries {
        groups.entry(entry.name).or_default().push(entry.version);
    }
    groups
}
