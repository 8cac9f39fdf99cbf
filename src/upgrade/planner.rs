//! Upgrade planning
//!
//! Turns the resolved versions and the kernel compatibility ceiling into an
//! ordered list of dnf invocations. Pure: nothing here touches the system.

use std::cmp::Ordering;
use std::fmt;

use tracing::info;

use crate::config::{KERNEL_EXCLUDE_OPTION, ZFS_PACKAGE, ZFS_UPGRADE_GLOB};
use crate::version::error::UpgradeError;
use crate::version::package_version::{PackageVersion, compare_major_minor, max_version};

/// A single dnf invocation of the plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpgradeStep {
    /// Upgrade the ZFS packages on their own
    UpgradeZfs,
    /// Upgrade everything, optionally leaving the kernel alone
    UpgradeAll { exclude_kernel: bool },
}

impl UpgradeStep {
    /// dnf arguments for this step, without the global options
    pub fn dnf_args(&self) -> Vec<String> {
        match self {
            UpgradeStep::UpgradeZfs => vec!["upgrade".to_string(), ZFS_UPGRADE_GLOB.to_string()],
            UpgradeStep::UpgradeAll { exclude_kernel } => {
                let mut args = Vec::with_capacity(2);
                if *exclude_kernel {
                    args.push(KERNEL_EXCLUDE_OPTION.to_string());
                }
                args.push("upgrade".to_string());
                args
            }
        }
    }
}

impl fmt::Display for UpgradeStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dnf {}", self.dnf_args().join(" "))
    }
}

/// Ordered steps of a run: at most one ZFS upgrade, then the general upgrade
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpgradePlan {
    pub steps: Vec<UpgradeStep>,
}

impl UpgradePlan {
    pub fn upgrades_zfs_first(&self) -> bool {
        self.steps.first() == Some(&UpgradeStep::UpgradeZfs)
    }

    pub fn excludes_kernel(&self) -> bool {
        self.steps
            .iter()
            .any(|s| matches!(s, UpgradeStep::UpgradeAll { exclude_kernel: true }))
    }
}

/// The ZFS version the system will run after the plan: the upgrade target if
/// there is one, otherwise the newest installed version.
///
/// Fails when a target exists but is not newer than what is installed.
pub fn effective_zfs_version(
    installed: &[PackageVersion],
    target: Option<&PackageVersion>,
) -> Result<PackageVersion, UpgradeError> {
    let newest_installed = max_version(installed).ok_or_else(|| UpgradeError::Precondition {
        package: ZFS_PACKAGE.to_string(),
        reason: "no installed version".to_string(),
    })?;

    match target {
        Some(target) if target <= newest_installed => Err(UpgradeError::UpgradeTargetNotNewer {
            package: ZFS_PACKAGE.to_string(),
            target: target.to_string(),
            installed: newest_installed.to_string(),
        }),
        Some(target) => Ok(target.clone()),
        None => Ok(newest_installed.clone()),
    }
}

/// Build the plan for one run.
///
/// `max_kernel` must have been looked up for the effective ZFS version.
pub fn plan_upgrade(
    zfs_installed: &[PackageVersion],
    zfs_target: Option<&PackageVersion>,
    kernel_target: Option<&PackageVersion>,
    max_kernel: &PackageVersion,
) -> Result<UpgradePlan, UpgradeError> {
    // Validates the target > installed invariant
    effective_zfs_version(zfs_installed, zfs_target)?;

    let mut steps = Vec::with_capacity(2);
    if zfs_target.is_some() {
        steps.push(UpgradeStep::UpgradeZfs);
    }

    let exclude_kernel = match kernel_target {
        Some(kernel) if compare_major_minor(kernel, max_kernel) == Ordering::Greater => {
            info!(
                "Excluding kernel upgrades, because {} > {}",
                kernel, max_kernel
            );
            true
        }
        _ => false,
    };
    steps.push(UpgradeStep::UpgradeAll { exclude_kernel });

    Ok(UpgradePlan { steps })
}
