//! Version resolution and kernel compatibility layer
//!
//! This module answers two questions: which ZFS and kernel versions are
//! installed or about to be installed, and which kernel series a given ZFS
//! release supports.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │    Index    │────▶│  Resolver   │────▶│  Versions   │
//! │ (dnf query) │     │ (group/max) │     │ (zfs,kernel)│
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                                                │
//!                                                ▼
//! ┌─────────────┐                         ┌─────────────┐
//! │   Fetcher   │────────────────────────▶│   Oracle    │
//! │ (HTTP META) │                         │(Linux-Max.) │
//! └─────────────┘                         └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`error`]: Error type shared by every stage of a run
//! - [`fetcher`]: Fetcher trait for remote release metadata
//! - [`fetchers`]: Concrete fetcher implementations (HTTP)
//! - [`index`]: Package index trait for installed/upgradable packages
//! - [`indexes`]: Concrete index implementations (dnf)
//! - [`oracle`]: Maximum supported kernel lookup for a ZFS release
//! - [`resolver`]: Installed and target version resolution
//! - [`package_version`]: Version parsing, ordering and major.minor comparison

pub mod error;
pub mod fetcher;
pub mod fetchers;
pub mod index;
pub mod indexes;
pub mod oracle;
pub mod package_version;
pub mod resolver;
