//! Kernel compatibility lookup for ZFS releases
//!
//! Every OpenZFS release ships a `META` file declaring the newest kernel
//! series it builds against, e.g. `Linux-Maximum: 6.8`.

use regex::Regex;
use tracing::{debug, info};

use crate::version::error::UpgradeError;
use crate::version::fetcher::MetadataFetcher;
use crate::version::package_version::PackageVersion;

/// Answers "which kernel does this ZFS release support?"
pub struct CompatibilityOracle<'a> {
    fetcher: &'a dyn MetadataFetcher,
    base_url: String,
    /// Regex for the compatibility field: `Linux-Maximum: 6.8`
    linux_maximum_re: Regex,
}

impl<'a> CompatibilityOracle<'a> {
    pub fn new(fetcher: &'a dyn MetadataFetcher, base_url: &str) -> Self {
        Self {
            fetcher,
            base_url: base_url.trim_end_matches('/').to_string(),
            linux_maximum_re: Regex::new(r"(?m)^Linux-Maximum:[ \t]*(\d+)\.(\d+)[ \t\r]*$").unwrap(),
        }
    }

    /// URL of the `META` file of a ZFS release, with the version as dnf reported it
    pub fn meta_url(&self, zfs_version: &PackageVersion) -> String {
        format!("{}/zfs-{}/META", self.base_url, zfs_version.as_str())
    }

    /// Newest kernel (major.minor) supported by `zfs_version`
    pub async fn max_supported_kernel(
        &self,
        zfs_version: &PackageVersion,
    ) -> Result<PackageVersion, UpgradeError> {
        let url = self.meta_url(zfs_version);
        let meta = self.fetcher.fetch_text(&url).await?;
        let max_kernel = self.parse_linux_maximum(&url, &meta)?;
        info!("ZFS {} supports kernels up to {}", zfs_version, max_kernel);
        Ok(max_kernel)
    }

    /// Extract the single `Linux-Maximum` field from a `META` document.
    ///
    /// Zero or several matches are both treated as a format error.
    fn parse_linux_maximum(&self, url: &str, meta: &str) -> Result<PackageVersion, UpgradeError> {
        let matches: Vec<_> = self.linux_maximum_re.captures_iter(meta).collect();
        debug!("Linux-Maximum matches: {}", matches.len());

        let [caps] = matches.as_slice() else {
            return Err(UpgradeError::MetadataFormat {
                url: url.to_string(),
                reason: format!(
                    "expected exactly one Linux-Maximum line, found {}",
                    matches.len()
                ),
            });
        };

        let component = |i: usize| -> Result<u64, UpgradeError> {
            caps[i].parse().map_err(|_| UpgradeError::MetadataFormat {
                url: url.to_string(),
                reason: format!("Linux-Maximum component out of range: {}", &caps[i]),
            })
        };

        Ok(PackageVersion::from_major_minor(component(1)?, component(2)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_META_BASE_URL;
    use crate::version::fetcher::MockMetadataFetcher;
    use crate::version::package_version::parse_version;
    use rstest::rstest;

    fn v(s: &str) -> PackageVersion {
        parse_version(s).unwrap()
    }

    const META_2_2_3: &str = "\
Meta:          1
Name:          zfs
Branch:        1.0
Version:       2.2.3
Release:       1
Release-Tags:  relext
License:       CDDL
Author:        OpenZFS
Linux-Maximum: 6.7
Linux-Minimum: 3.10
";

    fn fetcher_returning(body: &'static str) -> MockMetadataFetcher {
        let mut fetcher = MockMetadataFetcher::new();
        fetcher
            .expect_fetch_text()
            .returning(move |_| Ok(body.to_string()));
        fetcher
    }

    #[tokio::test]
    async fn max_supported_kernel_requests_meta_of_given_release() {
        let mut fetcher = MockMetadataFetcher::new();
        fetcher
            .expect_fetch_text()
            .withf(|url: &str| url == "https://raw.githubusercontent.com/openzfs/zfs/zfs-2.2.3/META")
            .times(1)
            .returning(|_| Ok(META_2_2_3.to_string()));

        let oracle = CompatibilityOracle::new(&fetcher, DEFAULT_META_BASE_URL);
        let result = oracle
            .max_supported_kernel(&v("2.2.3"))
            .await
            .unwrap();

        assert_eq!(result.to_string(), "6.7");
    }

    #[test]
    fn meta_url_strips_trailing_slash_of_base() {
        let fetcher = MockMetadataFetcher::new();
        let oracle = CompatibilityOracle::new(&fetcher, "http://mirror.local/zfs/");

        assert_eq!(
            oracle.meta_url(&v("2.1.0")),
            "http://mirror.local/zfs/zfs-2.1.0/META"
        );
    }

    #[rstest]
    #[case("2.2", "http://mirror.local/zfs-2.2/META")]
    #[case("2.2.3.1", "http://mirror.local/zfs-2.2.3.1/META")]
    #[tokio::test]
    async fn max_supported_kernel_puts_reported_version_into_url_verbatim(
        #[case] zfs_version: &str,
        #[case] expected_url: &'static str,
    ) {
        let mut fetcher = MockMetadataFetcher::new();
        fetcher
            .expect_fetch_text()
            .withf(move |url: &str| url == expected_url)
            .times(1)
            .returning(|_| Ok("Linux-Maximum: 6.8\n".to_string()));
        let oracle = CompatibilityOracle::new(&fetcher, "http://mirror.local");

        let result = oracle.max_supported_kernel(&v(zfs_version)).await.unwrap();

        assert_eq!(result.to_string(), "6.8");
    }

    #[rstest]
    #[case("Linux-Maximum: 6.5\n", "6.5")]
    #[case("Name: zfs\nLinux-Maximum:6.10\nLinux-Minimum: 4.18\n", "6.10")]
    #[case("Linux-Maximum:   6.8   \r\n", "6.8")]
    #[tokio::test]
    async fn max_supported_kernel_parses_single_field(
        #[case] body: &'static str,
        #[case] expected: &str,
    ) {
        let fetcher = fetcher_returning(body);
        let oracle = CompatibilityOracle::new(&fetcher, "http://mirror.local");

        let result = oracle
            .max_supported_kernel(&v("2.2.0"))
            .await
            .unwrap();

        assert_eq!(result.to_string(), expected);
        assert_eq!(result, v(expected));
    }

    #[rstest]
    #[case("Name: zfs\nLinux-Minimum: 3.10\n")] // field absent
    #[case("Linux-Maximum: 6.5\nLinux-Maximum: 6.6\n")] // duplicated
    #[case("linux-maximum: 6.5\n")] // key is case-sensitive
    #[case("# Linux-Maximum: 6.5\n")] // anchored at line start
    #[case("Linux-Maximum: 6\n")] // major only
    #[case("Linux-Maximum: 6.5.1\n")] // patch not allowed
    #[case("")]
    #[tokio::test]
    async fn max_supported_kernel_rejects_malformed_meta(#[case] body: &'static str) {
        let fetcher = fetcher_returning(body);
        let oracle = CompatibilityOracle::new(&fetcher, "http://mirror.local");

        let result = oracle.max_supported_kernel(&v("2.2.0")).await;

        assert!(matches!(result, Err(UpgradeError::MetadataFormat { .. })));
    }

    #[tokio::test]
    async fn max_supported_kernel_propagates_fetch_failure() {
        let mut fetcher = MockMetadataFetcher::new();
        fetcher.expect_fetch_text().returning(|url| {
            Err(UpgradeError::RemoteUnavailable {
                url: url.to_string(),
                reason: "Unexpected status: 404 Not Found".to_string(),
            })
        });
        let oracle = CompatibilityOracle::new(&fetcher, "http://mirror.local");

        let result = oracle.max_supported_kernel(&v("2.2.0")).await;

        assert!(matches!(result, Err(UpgradeError::RemoteUnavailable { .. })));
    }
}
