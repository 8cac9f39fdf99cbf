//! Package index implementations

pub mod dnf;

pub use dnf::DnfPackageIndex;
