//! Publishing a resolved version: commit the version file, tag, push.
//!
//! Every step is single-shot. The first failure aborts the sequence and
//! nothing already done is rolled back; rerunning picks up from whatever
//! state git is left in.

pub mod identity;

pub use identity::{ensure_identity, IdentityReport, IdentityStore};

use crate::config::{CommitConfig, IdentityConfig};
use crate::domain::Version;
use crate::error::Result;
use crate::git::{CommandRunner, GitClient};
use crate::metadata::MetadataFile;
use crate::ui;

/// What a publish run did (or, in dry-run mode, would do)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReport {
    pub tag: String,
    pub remote: String,
    pub branch: String,
    /// The version file was rewritten and committed
    pub committed: bool,
    pub identity: IdentityReport,
    pub dry_run: bool,
}

/// Carries out the side effects for a `Publish` outcome
pub struct Publisher<'a, R: CommandRunner> {
    git: &'a GitClient<R>,
    metadata: &'a MetadataFile,
    /// Path of the metadata file as git should see it
    metadata_arg: &'a str,
    identity: &'a IdentityConfig,
    commit: &'a CommitConfig,
    remote: &'a str,
    dry_run: bool,
}

impl<'a, R: CommandRunner> Publisher<'a, R> {
    pub fn new(
        git: &'a GitClient<R>,
        metadata: &'a MetadataFile,
        metadata_arg: &'a str,
        identity: &'a IdentityConfig,
        commit: &'a CommitConfig,
        remote: &'a str,
    ) -> Self {
        Publisher {
            git,
            metadata,
            metadata_arg,
            identity,
            commit,
            remote,
            dry_run: false,
        }
    }

    /// Report the plan without running any mutating command
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Publish `target` as a tag and push it to `branch`.
    ///
    /// Steps:
    /// 1. Ensure a committer identity is configured
    /// 2. Rewrite and commit the version file if it differs from `target`
    /// 3. Create the tag `major.minor.patch`
    /// 4. `git push --tags <remote> <branch>`
    pub fn publish(&self, target: Version, branch: &str) -> Result<PublishReport> {
        let tag = target.to_string();

        let identity = if self.dry_run {
            IdentityReport::default()
        } else {
            ensure_identity(self.git, self.identity)?
        };

        let current = self.metadata.read_version()?;
        let needs_commit = current != target;

        if self.dry_run {
            if needs_commit {
                ui::display_status(&format!(
                    "Would update {} from {} to {} and commit",
                    self.metadata_arg, current, target
                ));
            }
            ui::display_status(&format!("Would create tag {}", tag));
            ui::display_status(&format!(
                "Would run: git push --tags {} {}",
                self.remote, branch
            ));
        } else {
            if needs_commit {
                self.commit_version(current, target)?;
            }

            ui::display_status(&format!("Creating tag {}", tag));
            self.git.create_tag(&tag)?;

            ui::display_status(&format!("Pushing tags to {} {}", self.remote, branch));
            self.git.push_tags(self.remote, branch)?;
            ui::display_success(&format!("Published tag {}", tag));
        }

        Ok(PublishReport {
            tag,
            remote: self.remote.to_string(),
            branch: branch.to_string(),
            committed: needs_commit,
            identity,
            dry_run: self.dry_run,
        })
    }

    fn commit_version(&self, current: Version, target: Version) -> Result<()> {
        ui::display_status(&format!(
            "Updating {} from {} to {}",
            self.metadata_arg, current, target
        ));
        self.metadata.write_version(&target)?;
        self.git.add(self.metadata_arg)?;

        let message = self.commit.render(&target.to_string(), self.metadata_arg);
        self.git.commit(&message)?;
        ui::display_success(&format!("Committed: {}", message));
        Ok(())
    }
}
