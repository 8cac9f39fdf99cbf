use thiserror::Error;

#[derive(Debug, Error)]
pub enum UpgradeError {
    /// A package query did not group into exactly one package name
    #[error("Precondition failed for package '{package}': {reason}")]
    Precondition { package: String, reason: String },

    #[error("Invalid version '{version}' for package '{package}'")]
    InvalidVersion { package: String, version: String },

    #[error("Upgrade target {target} of '{package}' is not newer than installed {installed}")]
    UpgradeTargetNotNewer {
        package: String,
        target: String,
        installed: String,
    },

    #[error("Package query for '{package}' failed ({status}): {stderr}")]
    IndexQuery {
        package: String,
        status: String,
        stderr: String,
    },

    #[error("Remote metadata unavailable at {url}: {reason}")]
    RemoteUnavailable { url: String, reason: String },

    #[error("Malformed metadata at {url}: {reason}")]
    MetadataFormat { url: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
