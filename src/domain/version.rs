use std::fmt;

use semver::{BuildMetadata, Prerelease, Version};
use serde::Serialize;

use crate::error::{CommitCheckError, Result};

/// Version bump level triggered by a set of commits.
///
/// Declaration order is the total order: `None < Patch < Minor < Major`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionBump {
    #[default]
    None,
    Patch,
    Minor,
    Major,
}

impl VersionBump {
    pub fn as_str(&self) -> &'static str {
        match self {
            VersionBump::None => "none",
            VersionBump::Patch => "patch",
            VersionBump::Minor => "minor",
            VersionBump::Major => "major",
        }
    }
}

impl fmt::Display for VersionBump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses a version from a release tag, accepting an optional `v`/`V` prefix
///
/// # Example
/// ```ignore
/// assert_eq!(parse_version_from_tag("v1.2.3")?, Version::new(1, 2, 3));
/// ```
pub fn parse_version_from_tag(tag: &str) -> Result<Version> {
    let clean_tag = tag.trim().trim_start_matches(['v', 'V']);
    Version::parse(clean_tag)
        .map_err(|e| CommitCheckError::version(format!("Invalid version '{}': {}", tag, e)))
}

/// Applies a bump to the current release version.
///
/// - **Major**: major += 1, minor = 0, patch = 0
/// - **Minor**: minor += 1, patch = 0
/// - **Patch**: patch += 1
/// - **None**: unchanged
///
/// Any real bump clears pre-release and build metadata.
pub fn next_version(current: &Version, bump: VersionBump) -> Version {
    let mut next = current.clone();
    match bump {
        VersionBump::None => return next,
        VersionBump::Major => {
            next.major += 1;
            next.minor = 0;
            next.patch = 0;
        }
        VersionBump::Minor => {
            next.minor += 1;
            next.patch = 0;
        }
        VersionBump::Patch => {
            next.patch += 1;
        }
    }
    next.pre = Prerelease::EMPTY;
    next.build = BuildMetadata::EMPTY;
    next
}
