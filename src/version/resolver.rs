//! Installed and target version resolution
//!
//! Reduces raw package index entries to comparable versions, enforcing that a
//! query names exactly one package.

use tracing::info;

use crate::version::error::UpgradeError;
use crate::version::index::{PackageIndex, group_by_name};
use crate::version::package_version::{PackageVersion, parse_version};

/// Resolves package versions through a [`PackageIndex`]
pub struct VersionResolver<'a> {
    index: &'a dyn PackageIndex,
}

impl<'a> VersionResolver<'a> {
    pub fn new(index: &'a dyn PackageIndex) -> Self {
        Self { index }
    }

    /// Versions of `package_name` currently installed
    ///
    /// Fails with `Precondition` unless the query yields exactly one package name.
    pub async fn installed_versions(
        &self,
        package_name: &str,
    ) -> Result<Vec<PackageVersion>, UpgradeError> {
        let entries = self.index.installed(package_name).await?;
        let mut groups = group_by_name(entries);

        if groups.len() != 1 {
            return Err(UpgradeError::Precondition {
                package: package_name.to_string(),
                reason: format!(
                    "expected exactly one installed package name, found {:?}",
                    groups.keys().collect::<Vec<_>>()
                ),
            });
        }

        let raw = groups.pop_first().map(|(_, v)| v).unwrap_or_default();
        let versions = parse_all(package_name, &raw)?;
        info!(
            "Installed versions of '{}': {:?}",
            package_name,
            versions.iter().map(PackageVersion::to_string).collect::<Vec<_>>()
        );
        Ok(versions)
    }

    /// Version an unconstrained upgrade would install, or None if none is available
    ///
    /// When several candidates are offered for the same name, the largest one wins.
    pub async fn target_version(
        &self,
        package_name: &str,
    ) -> Result<Option<PackageVersion>, UpgradeError> {
        let entries = self.index.upgrades(package_name).await?;
        let mut groups = group_by_name(entries);

        let target = match groups.len() {
            0 => None,
            1 => {
                let raw = groups.pop_first().map(|(_, v)| v).unwrap_or_default();
                parse_all(package_name, &raw)?.into_iter().max()
            }
            _ => {
                return Err(UpgradeError::Precondition {
                    package: package_name.to_string(),
                    reason: format!(
                        "expected at most one upgradable package name, found {:?}",
                        groups.keys().collect::<Vec<_>>()
                    ),
                });
            }
        };

        info!(
            "Target version of '{}': {}",
            package_name,
            target
                .as_ref()
                .map_or_else(|| "None".to_string(), PackageVersion::to_string)
        );
        Ok(target)
    }
}

fn parse_all(package_name: &str, raw: &[String]) -> Result<Vec<PackageVersion>, UpgradeError> {
    raw.iter()
        .map(|v| {
            parse_version(v).ok_or_else(|| UpgradeError::InvalidVersion {
                package: package_name.to_string(),
                version: v.clone(),
            })
        })
        .collect()
}
