//! dnf-backed package index
//!
//! Queries go through `dnf repoquery`, which reads the rpm database and the
//! repository metadata without touching either.

use std::path::{Path, PathBuf};

use tokio::process::Command;
use tracing::{debug, warn};

use crate::version::error::UpgradeError;
use crate::version::index::{PackageEntry, PackageIndex};

/// Output format of one repoquery line: `<name>\t<version>`
const QUERY_FORMAT: &str = "%{name}\t%{version}\n";

#[derive(Debug, Clone, Copy)]
enum QueryKind {
    Installed,
    Upgrades,
}

impl QueryKind {
    fn flag(self) -> &'static str {
        match self {
            QueryKind::Installed => "--installed",
            QueryKind::Upgrades => "--upgrades",
        }
    }
}

/// Package index implementation that shells out to dnf
pub struct DnfPackageIndex {
    dnf_path: PathBuf,
}

impl DnfPackageIndex {
    pub fn new(dnf_path: &Path) -> Self {
        Self {
            dnf_path: dnf_path.to_path_buf(),
        }
    }

    fn query_args(kind: QueryKind, package_name: &str) -> Vec<String> {
        vec![
            "--quiet".to_string(),
            "repoquery".to_string(),
            kind.flag().to_string(),
            "--queryformat".to_string(),
            QUERY_FORMAT.to_string(),
            package_name.to_string(),
        ]
    }

    async fn query(
        &self,
        kind: QueryKind,
        package_name: &str,
    ) -> Result<Vec<PackageEntry>, UpgradeError> {
        let args = Self::query_args(kind, package_name);
        debug!("Querying {} {:?}", self.dnf_path.display(), args);

        let output = Command::new(&self.dnf_path)
            .args(&args)
            .stdin(std::process::Stdio::null())
            .output()
            .await?;

        if !output.status.success() {
            return Err(UpgradeError::IndexQuery {
                package: package_name.to_string(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let entries = parse_query_output(&String::from_utf8_lossy(&output.stdout));
        debug!("Query result for '{}': {:?}", package_name, entries);
        Ok(entries)
    }
}

#[async_trait::async_trait]
impl PackageIndex for DnfPackageIndex {
    async fn installed(&self, package_name: &str) -> Result<Vec<PackageEntry>, UpgradeError> {
        self.query(QueryKind::Installed, package_name).await
    }

    async fn upgrades(&self, package_name: &str) -> Result<Vec<PackageEntry>, UpgradeError> {
        self.query(QueryKind::Upgrades, package_name).await
    }
}

/// Parse repoquery output, one `<name>\t<version>` entry per line.
///
/// Blank lines are skipped; lines without both fields are skipped with a warning.
fn parse_query_output(stdout: &str) -> Vec<PackageEntry> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            let mut fields = line.split('\t').map(str::trim);
            match (fields.next(), fields.next()) {
                (Some(name), Some(version)) if !name.is_empty() && !version.is_empty() => {
                    Some(PackageEntry::new(name, version))
                }
                _ => {
                    warn!("Ignoring unexpected repoquery line: {:?}", line);
                    None
                }
            }
        })
        .collect()
}
