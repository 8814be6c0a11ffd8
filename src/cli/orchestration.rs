//! Main workflow orchestration logic
//!
//! Keeps the release sequence separate from argument parsing so it can be
//! driven programmatically with any [CommandRunner].

use std::path::PathBuf;

use crate::analyzer::TagScanner;
use crate::boundary::BoundaryWarning;
use crate::config::Config;
use crate::domain::{resolve, BranchContext, Resolution, Version};
use crate::error::{ReleaseTagError, Result};
use crate::git::{CommandRunner, GitClient};
use crate::publisher::{PublishReport, Publisher};
use crate::ui;

/// Arguments for the release workflow
///
/// Mirrors the CLI Args but with environment lookups already done, so the
/// workflow never reads process state itself.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReleaseWorkflowArgs {
    /// Directory holding the repository and metadata file
    pub repo_dir: PathBuf,

    /// Explicit branch to push to
    pub branch: Option<String>,

    /// Value of the CI ref variable, if set
    pub git_ref: Option<String>,

    /// Directory to register as git `safe.directory`
    pub safe_directory: Option<String>,

    /// Resolve and report without mutating anything
    pub dry_run: bool,

    /// Echo git commands and list skipped tags
    pub verbose: bool,
}

/// Result of a successful workflow
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowResult {
    /// HEAD already carries the declared version; nothing was changed
    AlreadyTagged { version: Version },
    /// A tag was published (or planned, in dry-run mode)
    Published {
        declared: Version,
        latest_tag: Version,
        report: PublishReport,
    },
}

/// Main release workflow
///
/// 1. Register the safe directory, if one is given
/// 2. Read the declared version
/// 3. Fetch tags and find the latest version tag
/// 4. Collect tags on HEAD
/// 5. Resolve the target version
/// 6. Publish it, unless HEAD is already tagged
pub fn run_release_workflow<R: CommandRunner>(
    args: &ReleaseWorkflowArgs,
    config: &Config,
    runner: R,
) -> Result<WorkflowResult> {
    let git = GitClient::new(runner).verbose(args.verbose);

    if let Some(dir) = &args.safe_directory {
        if !args.dry_run {
            ensure_safe_directory(&git, dir)?;
        }
    }

    let metadata = config.metadata.open(&args.repo_dir)?;
    let declared = metadata.read_version()?;

    let scanner = TagScanner::new(&git);
    let scan = scanner.latest_version_tag(&config.git.remote)?;
    if args.verbose {
        ui::display_ignored_tags(&scan.ignored);
    }

    let head_tags = scanner.tags_at_head()?;
    let resolution = resolve(declared, scan.latest, &head_tags)?;
    ui::display_version_summary(&declared, &scan.latest, &resolution);

    let target = match resolution {
        Resolution::AlreadyTagged(version) => {
            ui::display_success(&format!("already tagged {} on HEAD", version));
            return Ok(WorkflowResult::AlreadyTagged { version });
        }
        Resolution::Publish(target) => target,
    };

    if target != declared {
        ui::display_boundary_warning(&BoundaryWarning::DeclaredNotAhead {
            declared: declared.to_string(),
            latest_tag: scan.latest.to_string(),
        });
    }

    let branch = BranchContext::resolve(
        args.branch.as_deref(),
        args.git_ref.as_deref(),
        &config.git.branch_ref_prefix,
    )
    .ok_or_else(|| {
        ReleaseTagError::config(format!(
            "Cannot determine the branch to push to: {} is not set; pass --branch",
            config.git.ref_variable
        ))
    })?;
    if let Some(warning) = &branch.warning {
        ui::display_boundary_warning(warning);
    }

    ui::display_status(&format!("new version to be published is {}", target));
    let report = Publisher::new(
        &git,
        &metadata,
        &config.metadata.path,
        &config.identity,
        &config.commit,
        &config.git.remote,
    )
    .dry_run(args.dry_run)
    .publish(target, &branch.name)?;

    Ok(WorkflowResult::Published {
        declared,
        latest_tag: scan.latest,
        report,
    })
}

/// Add `dir` to the global `safe.directory` list unless already present
pub fn ensure_safe_directory<R: CommandRunner>(git: &GitClient<R>, dir: &str) -> Result<bool> {
    let existing = git.config_get_all_global("safe.directory")?;
    if existing.iter().any(|d| d == dir || d == "*") {
        return Ok(false);
    }
    git.config_add_global("safe.directory", dir)?;
    Ok(true)
}
