//! In-memory stand-ins for dnf and the metadata server

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use zfs_upgrade_guard::upgrade::runner::CommandRunner;
use zfs_upgrade_guard::version::error::UpgradeError;
use zfs_upgrade_guard::version::fetcher::MetadataFetcher;
use zfs_upgrade_guard::version::index::{PackageEntry, PackageIndex};

/// Fake package index backed by fixed installed/upgradable entries
#[derive(Default)]
pub struct FakePackageIndex {
    installed: Vec<PackageEntry>,
    upgrades: Vec<PackageEntry>,
}

impl FakePackageIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_installed(mut self, name: &str, version: &str) -> Self {
        self.installed.push(PackageEntry::new(name, version));
        self
    }

    pub fn with_upgrade(mut self, name: &str, version: &str) -> Self {
        self.upgrades.push(PackageEntry::new(name, version));
        self
    }

    /// Names starting with the query match, like a loose dnf glob would
    fn matching(entries: &[PackageEntry], package_name: &str) -> Vec<PackageEntry> {
        entries
            .iter()
            .filter(|e| e.name.starts_with(package_name))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl PackageIndex for FakePackageIndex {
    async fn installed(&self, package_name: &str) -> Result<Vec<PackageEntry>, UpgradeError> {
        Ok(Self::matching(&self.installed, package_name))
    }

    async fn upgrades(&self, package_name: &str) -> Result<Vec<PackageEntry>, UpgradeError> {
        Ok(Self::matching(&self.upgrades, package_name))
    }
}

/// Fake metadata server: unknown URLs answer like a 404
#[derive(Default)]
pub struct FakeMetadataFetcher {
    documents: HashMap<String, String>,
    requested: Mutex<Vec<String>>,
}

impl FakeMetadataFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, url: &str, body: &str) -> Self {
        self.documents.insert(url.to_string(), body.to_string());
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl MetadataFetcher for FakeMetadataFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, UpgradeError> {
        self.requested.lock().unwrap().push(url.to_string());
        self.documents
            .get(url)
            .cloned()
            .ok_or_else(|| UpgradeError::RemoteUnavailable {
                url: url.to_string(),
                reason: "Unexpected status: 404 Not Found".to_string(),
            })
    }
}

/// Runner that records every invocation and replies with scripted exit codes
#[derive(Default)]
pub struct RecordingRunner {
    exit_codes: Mutex<Vec<i32>>,
    calls: Mutex<Vec<Vec<String>>>,
}

impl RecordingRunner {
    /// Exit codes are handed out in order; 0 once they run out
    pub fn with_exit_codes(exit_codes: Vec<i32>) -> Self {
        Self {
            exit_codes: Mutex::new(exit_codes.into_iter().rev().collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandRunner for RecordingRunner {
    async fn run(&self, args: Vec<String>) -> Result<i32, UpgradeError> {
        self.calls.lock().unwrap().push(args);
        Ok(self.exit_codes.lock().unwrap().pop().unwrap_or(0))
    }
}

/// `META` document with the given kernel ceiling
pub fn meta_with_linux_maximum(linux_maximum: &str) -> String {
    format!(
        "Meta:          1\nName:          zfs\nLinux-Maximum: {}\nLinux-Minimum: 4.18\n",
        linux_maximum
    )
}
