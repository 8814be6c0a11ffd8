use crate::domain::Version;
use crate::error::Result;
use std::collections::BTreeSet;

/// Outcome of comparing the declared version with tag history
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// HEAD already carries the declared version as a tag; nothing to do
    AlreadyTagged(Version),
    /// A new tag must be published for this version
    Publish(Version),
}

impl Resolution {
    /// The version this outcome refers to
    pub fn version(&self) -> Version {
        match self {
            Resolution::AlreadyTagged(v) | Resolution::Publish(v) => *v,
        }
    }

    pub fn is_publish(&self) -> bool {
        matches!(self, Resolution::Publish(_))
    }
}

/// Decide which version, if any, should be tagged.
///
/// 1. `declared` already tagged on HEAD: [`Resolution::AlreadyTagged`].
/// 2. `declared` strictly ahead of every tag: publish it verbatim.
/// 3. Otherwise publish the latest tag with its patch bumped.
///
/// Bumping a latest tag whose patch is `u64::MAX` is a version error.
pub fn resolve(
    declared: Version,
    latest_tag: Version,
    head_tags: &BTreeSet<String>,
) -> Result<Resolution> {
    if head_tags.contains(&declared.to_string()) {
        return Ok(Resolution::AlreadyTagged(declared));
    }

    if declared > latest_tag {
        Ok(Resolution::Publish(declared))
    } else {
        latest_tag.bump_patch().map(Resolution::Publish)
    }
}
