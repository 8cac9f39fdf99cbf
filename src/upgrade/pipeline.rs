//! End-to-end upgrade run: resolve, look up compatibility, plan, execute

use tracing::{debug, error, info};

use crate::config::{KERNEL_PACKAGE, UpgradeConfig, ZFS_PACKAGE};
use crate::upgrade::planner::{UpgradePlan, UpgradeStep, effective_zfs_version, plan_upgrade};
use crate::upgrade::runner::CommandRunner;
use crate::version::error::UpgradeError;
use crate::version::fetcher::MetadataFetcher;
use crate::version::index::PackageIndex;
use crate::version::oracle::CompatibilityOracle;
use crate::version::resolver::VersionResolver;

/// Wires the collaborators of a single run together
pub struct UpgradePipeline<'a> {
    resolver: VersionResolver<'a>,
    oracle: CompatibilityOracle<'a>,
    runner: &'a dyn CommandRunner,
    dry_run: bool,
}

impl<'a> UpgradePipeline<'a> {
    pub fn new(
        index: &'a dyn PackageIndex,
        fetcher: &'a dyn MetadataFetcher,
        runner: &'a dyn CommandRunner,
        config: &UpgradeConfig,
    ) -> Self {
        Self {
            resolver: VersionResolver::new(index),
            oracle: CompatibilityOracle::new(fetcher, &config.meta_base_url),
            runner,
            dry_run: config.dry_run,
        }
    }

    /// Resolve versions and compute the plan without running anything
    pub async fn plan(&self) -> Result<UpgradePlan, UpgradeError> {
        let zfs_target = self.resolver.target_version(ZFS_PACKAGE).await?;
        let zfs_installed = self.resolver.installed_versions(ZFS_PACKAGE).await?;
        let zfs_effective = effective_zfs_version(&zfs_installed, zfs_target.as_ref())?;

        let max_kernel = self.oracle.max_supported_kernel(&zfs_effective).await?;
        let kernel_target = self.resolver.target_version(KERNEL_PACKAGE).await?;

        let plan = plan_upgrade(
            &zfs_installed,
            zfs_target.as_ref(),
            kernel_target.as_ref(),
            &max_kernel,
        )?;
        debug!(
            "Plan: zfs first={}, exclude kernel={}",
            plan.upgrades_zfs_first(),
            plan.excludes_kernel()
        );
        Ok(plan)
    }

    /// Run the steps in order, stopping at the first non-zero exit code
    ///
    /// Returns the exit code of the last step that ran.
    pub async fn execute(&self, plan: &UpgradePlan) -> Result<i32, UpgradeError> {
        let mut rc = 0;
        for step in &plan.steps {
            match step {
                UpgradeStep::UpgradeZfs => info!("Upgrading zfs..."),
                UpgradeStep::UpgradeAll { .. } => info!("Upgrading all the packages..."),
            }

            rc = self.runner.run(step.dnf_args()).await?;
            if rc != 0 {
                if *step == UpgradeStep::UpgradeZfs {
                    error!("Failed to upgrade zfs, exiting. rc={}", rc);
                } else {
                    error!("Failed to upgrade packages. rc={}", rc);
                }
                return Ok(rc);
            }
        }
        Ok(rc)
    }

    /// Plan and, unless this is a dry run, execute
    pub async fn run(&self) -> Result<i32, UpgradeError> {
        let plan = self.plan().await?;

        if self.dry_run {
            info!("Dry run, not executing the plan");
            for step in &plan.steps {
                println!("{}", step);
            }
            return Ok(0);
        }

        self.execute(&plan).await
    }
}
