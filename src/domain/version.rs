use crate::error::{ReleaseTagError, Result};
use std::fmt;
use std::str::FromStr;

/// Semantic version triple. Ordering is major, then minor, then patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    /// Create a new version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
        }
    }

    /// The floor used when no tag parses as a version
    pub fn zero() -> Self {
        Version::default()
    }

    /// Parse a plain `major.minor.patch` string.
    ///
    /// Grammar follows the `semver` crate (no leading zeros, no prefix), but
    /// pre-release and build metadata are rejected since only the triple is
    /// tracked here. Surrounding whitespace is ignored.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let parsed = semver::Version::parse(trimmed).map_err(|e| {
            ReleaseTagError::version(format!("Invalid version '{}': {}", trimmed, e))
        })?;

        if !parsed.pre.is_empty() || !parsed.build.is_empty() {
            return Err(ReleaseTagError::version(format!(
                "Invalid version '{}': pre-release and build metadata are not supported",
                trimmed
            )));
        }

        Ok(Version::new(parsed.major, parsed.minor, parsed.patch))
    }

    /// Increment only the patch component
    ///
    /// Fails when the patch number is already `u64::MAX`.
    pub fn bump_patch(&self) -> Result<Self> {
        let patch = self.patch.checked_add(1).ok_or_else(|| {
            ReleaseTagError::version(format!("Cannot bump patch of '{}': patch overflows", self))
        })?;
        Ok(Version { patch, ..*self })
    }
}

impl FromStr for Version {
    type Err = ReleaseTagError;

    fn from_str(s: &str) -> Result<Self> {
        Version::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
