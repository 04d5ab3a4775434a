//! Common version types shared by probes, registries and the oracle

use std::fmt;

/// Reported by the local probe when the tool binary cannot be found
pub const NOT_INSTALLED: &str = "not installed";

/// Reported by either probe when the version could not be determined
pub const ERROR: &str = "error";

/// Reported by the remote probe when the registry has no such package
pub const NOT_FOUND: &str = "not found";

/// Placeholder for a version that has not been probed yet
pub const UNKNOWN: &str = "unknown";

/// A version string that stands in for "could not determine"
///
/// Sentinels are never parsed numerically. They take part in update decisions
/// only through the fixed policy in [`crate::version::oracle::needs_update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sentinel {
    NotInstalled,
    Error,
    NotFound,
    Unknown,
}

impl Sentinel {
    /// Returns the string representation of the sentinel
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentinel::NotInstalled => NOT_INSTALLED,
            Sentinel::Error => ERROR,
            Sentinel::NotFound => NOT_FOUND,
            Sentinel::Unknown => UNKNOWN,
        }
    }

    /// Recognize a sentinel; only the exact lowercase strings match
    pub fn classify(raw: &str) -> Option<Sentinel> {
        [
            Sentinel::NotInstalled,
            Sentinel::Error,
            Sentinel::NotFound,
            Sentinel::Unknown,
        ]
        .into_iter()
        .find(|sentinel| sentinel.as_str() == raw)
    }
}

impl fmt::Display for Sentinel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type of remote version source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistryType {
    /// GitHub Releases (owner/repo)
    GitHub,
    /// Python Package Index
    PyPI,
}

impl RegistryType {
    /// Returns the string representation of the registry type
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistryType::GitHub => "github",
            RegistryType::PyPI => "pypi",
        }
    }
}
