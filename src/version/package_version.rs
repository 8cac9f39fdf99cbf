//! Package version values as dnf reports them
//!
//! rpm versions are dot-separated numbers of any length (`2.2.3`,
//! `2.2.3.1`, `6.08`). They are ordered component by component, with
//! missing trailing components counting as zero.

use std::cmp::Ordering;
use std::fmt;

/// A numeric dotted version that remembers the string it was parsed from
#[derive(Debug, Clone)]
pub struct PackageVersion {
    raw: String,
    components: Vec<u64>,
}

impl PackageVersion {
    /// Parse `major[.minor[.patch...]]`; every component must be a number
    pub fn parse(version: &str) -> Option<Self> {
        let raw = version.trim();
        let components = raw
            .split('.')
            .map(|c| {
                if !c.is_empty() && c.bytes().all(|b| b.is_ascii_digit()) {
                    c.parse::<u64>().ok()
                } else {
                    None
                }
            })
            .collect::<Option<Vec<_>>>()?;

        Some(Self {
            raw: raw.to_string(),
            components,
        })
    }

    /// Version carrying only a major.minor pair, e.g. a kernel series
    pub fn from_major_minor(major: u64, minor: u64) -> Self {
        Self {
            raw: format!("{}.{}", major, minor),
            components: vec![major, minor],
        }
    }

    /// The string as reported, without normalization
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn major(&self) -> u64 {
        self.component(0)
    }

    pub fn minor(&self) -> u64 {
        self.component(1)
    }

    fn component(&self, index: usize) -> u64 {
        self.components.get(index).copied().unwrap_or(0)
    }
}

impl Ord for PackageVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.components.len().max(other.components.len());
        (0..len)
            .map(|i| self.component(i).cmp(&other.component(i)))
            .find(|o| o.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for PackageVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for PackageVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PackageVersion {}

impl fmt::Display for PackageVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Parse a version string, or None if any component is not a number
pub fn parse_version(version: &str) -> Option<PackageVersion> {
    PackageVersion::parse(version)
}

/// Compare only the major.minor pair of two versions.
///
/// Kernel compatibility is declared as `Linux-Maximum: 6.8`, so patch and
/// later components must not take part in the comparison.
pub fn compare_major_minor(a: &PackageVersion, b: &PackageVersion) -> Ordering {
    (a.major(), a.minor()).cmp(&(b.major(), b.minor()))
}

/// Largest version of the slice, or None if it is empty
pub fn max_version(versions: &[PackageVersion]) -> Option<&PackageVersion> {
    versions.iter().max()
}
