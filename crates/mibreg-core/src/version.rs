//! Build version gate
//!
//! Modules that rely on registry behavior introduced in a given release can
//! check the running build before resolving anything.

use semver::Version;
use thiserror::Error;

/// Version of this build
pub const BUILD_VERSION: &str = env!("CARGO_PKG_VERSION");

/// The running build is older than a module requires
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("mibreg version {required} or later required, running {actual}")]
pub struct VersionError {
    /// Minimum version requested
    pub required: Version,
    /// Version of the running build
    pub actual: Version,
}

/// Check the running build against a minimum `major.minor.patch`
pub fn check_minimum_version(major: u64, minor: u64, patch: u64) -> Result<(), VersionError> {
    check_version(&build_version(), major, minor, patch)
}

/// Check the running build against a minimum `major.minor`, patch level 0
pub fn check_minimum_release(major: u64, minor: u64) -> Result<(), VersionError> {
    check_minimum_version(major, minor, 0)
}

/// Check `actual` against a minimum `major.minor.patch`
///
/// Pre-release and build metadata on `actual` are ignored, so
/// `1.2.0-rc.1` satisfies a `1.2.0` requirement.
pub fn check_version(actual: &Version, major: u64, minor: u64, patch: u64) -> Result<(), VersionError> {
    let required = Version::new(major, minor, patch);
    let release = Version::new(actual.major, actual.minor, actual.patch);
    if release < required {
        return Err(VersionError {
            required,
            actual: actual.clone(),
        });
    }
    Ok(())
}

/// Parsed [`BUILD_VERSION`]
pub fn build_version() -> Version {
    // Cargo guarantees a valid semver package version.
    Version::parse(BUILD_VERSION).unwrap_or_else(|_| Version::new(0, 0, 0))
}
