use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use release_tagger::cli::{run_release_workflow, ReleaseWorkflowArgs, WorkflowResult};
use release_tagger::config::{self, ConfigOverrides, MetadataPreset};
use release_tagger::git::SystemRunner;
use release_tagger::metadata::MetadataFormat;
use release_tagger::ui;

/// Set by GitHub Actions to the checked-out workspace
const WORKSPACE_VARIABLE: &str = "GITHUB_WORKSPACE";

#[derive(clap::Parser)]
#[command(
    name = "release-tagger",
    about = "Tag and push the project version from CI, bumping the patch when it is already taken"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, value_enum, help = "Use a well-known metadata file layout")]
    preset: Option<MetadataPreset>,

    #[arg(long, help = "Metadata file holding the version")]
    file: Option<String>,

    #[arg(long, value_enum, help = "Syntax of the metadata file")]
    format: Option<MetadataFormat>,

    #[arg(long, help = "Dotted key path of the version, e.g. project.version")]
    key: Option<String>,

    #[arg(long, help = "Remote to fetch tags from and push to")]
    remote: Option<String>,

    #[arg(short, long, help = "Branch to push to (defaults to the CI ref)")]
    branch: Option<String>,

    #[arg(short = 'C', long = "dir", help = "Run as if started in this directory")]
    dir: Option<PathBuf>,

    #[arg(long, help = "Preview what would happen without making changes")]
    dry_run: bool,

    #[arg(long, help = "Echo git commands and list ignored tags")]
    verbose: bool,

    #[arg(short, long, help = "Print version information")]
    version: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.version {
        println!("release-tagger {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let repo_dir = args.dir.clone().unwrap_or_else(|| PathBuf::from("."));

    let mut config = match config::load_config(args.config.as_deref(), &repo_dir) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };
    config.apply(&ConfigOverrides {
        preset: args.preset,
        file: args.file.clone(),
        format: args.format,
        key: args.key.clone(),
        remote: args.remote.clone(),
    });

    let workflow_args = ReleaseWorkflowArgs {
        repo_dir: repo_dir.clone(),
        branch: args.branch.clone(),
        git_ref: std::env::var(&config.git.ref_variable).ok(),
        safe_directory: config
            .git
            .safe_directory
            .clone()
            .or_else(|| std::env::var(WORKSPACE_VARIABLE).ok()),
        dry_run: args.dry_run,
        verbose: args.verbose,
    };

    match run_release_workflow(&workflow_args, &config, SystemRunner::in_dir(&repo_dir)) {
        Ok(WorkflowResult::AlreadyTagged { .. }) => Ok(()),
        Ok(WorkflowResult::Published { report, .. }) => {
            if report.dry_run {
                ui::display_success(&format!("Dry run complete for tag {}", report.tag));
            } else {
                ui::display_success(&format!(
                    "Successfully published tag {} to {}/{}",
                    report.tag, report.remote, report.branch
                ));
            }
            Ok(())
        }
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    }
}
