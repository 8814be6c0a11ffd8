use crate::domain::Version;
use crate::error::{ReleaseTagError, Result};
use crate::git::{CommandRunner, GitClient};
use std::collections::BTreeSet;

/// Result of scanning tag history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagScan {
    /// Highest version tag, or 0.0.0 when none parse
    pub latest: Version,
    /// Tags that are not plain versions, in listing order
    pub ignored: Vec<String>,
}

/// Find the highest version among `tags`, skipping anything that does not parse
pub fn scan_tags<S: AsRef<str>>(tags: &[S]) -> TagScan {
    let mut latest = Version::zero();
    let mut ignored = Vec::new();

    for tag in tags {
        let tag = tag.as_ref();
        match Version::parse(tag) {
            Ok(version) => latest = latest.max(version),
            Err(_) => ignored.push(tag.to_string()),
        }
    }

    TagScan { latest, ignored }
}

/// Reads version information out of the repository's tags
pub struct TagScanner<'a, R: CommandRunner> {
    git: &'a GitClient<R>,
}

impl<'a, R: CommandRunner> TagScanner<'a, R> {
    pub fn new(git: &'a GitClient<R>) -> Self {
        TagScanner { git }
    }

    /// Fetch tags from `remote`, then return the highest version tag.
    ///
    /// A failed fetch is reported as [ReleaseTagError::Sync].
    pub fn latest_version_tag(&self, remote: &str) -> Result<TagScan> {
        self.git
            .fetch_tags(remote)
            .map_err(|e| ReleaseTagError::sync(remote, e))?;

        let tags = self.git.list_tags()?;
        Ok(scan_tags(&tags))
    }

    /// Literal names of the tags pointing at HEAD
    pub fn tags_at_head(&self) -> Result<BTreeSet<String>> {
        Ok(self.git.tags_at_head()?.into_iter().collect())
    }
}
