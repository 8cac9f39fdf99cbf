use std::path::PathBuf;

// =============================================================================
// Time-related constants
// =============================================================================

/// Timeout for the metadata fetch in milliseconds (10 seconds)
pub const FETCH_TIMEOUT_MS: u64 = 10_000;

// =============================================================================
// Package manager and package names
// =============================================================================

/// Default location of the dnf executable
pub const DEFAULT_DNF_PATH: &str = "/usr/bin/dnf";

/// Package carrying the ZFS userland and kernel module
pub const ZFS_PACKAGE: &str = "zfs";

/// Package carrying the Linux kernel
pub const KERNEL_PACKAGE: &str = "kernel";

/// Glob passed to `dnf upgrade` when upgrading ZFS on its own
pub const ZFS_UPGRADE_GLOB: &str = "zfs*";

/// Option that keeps every kernel package out of a transaction
pub const KERNEL_EXCLUDE_OPTION: &str = "--exclude=kernel*";

/// Default base URL of the OpenZFS release metadata.
/// The `META` file of a release lives at `<base>/zfs-<version>/META`.
pub const DEFAULT_META_BASE_URL: &str = "https://raw.githubusercontent.com/openzfs/zfs";

/// Runtime configuration, captured once at startup and read-only afterwards
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpgradeConfig {
    /// Enables debug logging
    pub verbose: bool,
    /// Proxy for the metadata fetch only, e.g. `socks5h://127.0.0.1:8080`
    pub proxy: Option<String>,
    /// Compute and print the plan without running any upgrade
    pub dry_run: bool,
    pub meta_base_url: String,
    pub dnf_path: PathBuf,
    /// Extra options inserted into every `dnf upgrade` invocation
    pub dnf_opts: Vec<String>,
}

impl Default for UpgradeConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            proxy: None,
            dry_run: false,
            meta_base_url: DEFAULT_META_BASE_URL.to_string(),
            dnf_path: PathBuf::from(DEFAULT_DNF_PATH),
            dnf_opts: Vec::new(),
        }
    }
}

impl UpgradeConfig {
    /// Returns the proxy URL, treating an empty string as "no proxy"
    pub fn proxy_url(&self) -> Option<&str> {
        self.proxy.as_deref().filter(|p| !p.trim().is_empty())
    }
}
