//! Git process abstraction layer
//!
//! All version-control work goes through the system `git` binary. The
//! [CommandRunner] trait is the one seam: it runs a program with arguments
//! and hands back captured output and exit status. [GitClient] builds the
//! individual git invocations on top of it and turns non-zero exits into
//! [ReleaseTagError::Process].
//!
//! - [system::SystemRunner]: spawns real processes
//! - [mock::MockRunner]: scripted responses for tests
//!
//! ```rust
//! # use release_tagger::git::{GitClient, MockRunner};
//! let runner = MockRunner::new().respond(&["tag", "-l"], "1.0.0\n1.1.0\n");
//! let git = GitClient::new(runner);
//! assert_eq!(git.list_tags().unwrap(), vec!["1.0.0", "1.1.0"]);
//! ```

pub mod mock;
pub mod system;

pub use mock::MockRunner;
pub use system::SystemRunner;

use crate::error::{ReleaseTagError, Result};
use crate::ui;

/// Captured result of running an external command
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    /// Exit code, `None` if the process was killed by a signal
    pub status: Option<i32>,
}

impl CommandOutput {
    /// A successful run with the given stdout
    pub fn success(stdout: impl Into<String>) -> Self {
        CommandOutput {
            stdout: stdout.into(),
            stderr: String::new(),
            status: Some(0),
        }
    }

    /// A failed run with the given exit code and stderr
    pub fn failure(status: i32, stderr: impl Into<String>) -> Self {
        CommandOutput {
            stdout: String::new(),
            stderr: stderr.into(),
            status: Some(status),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == Some(0)
    }
}

/// Runs external commands.
///
/// Implementations only report what happened; deciding whether a non-zero
/// exit is fatal is left to the caller. An `Err` means the process could
/// not be started at all.
pub trait CommandRunner: Send + Sync {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        (**self).run(program, args)
    }
}

/// Git operations used by the release workflow
pub struct GitClient<R: CommandRunner> {
    runner: R,
    verbose: bool,
}

impl<R: CommandRunner> GitClient<R> {
    pub fn new(runner: R) -> Self {
        GitClient {
            runner,
            verbose: false,
        }
    }

    /// Echo every git command before running it
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Run git and return the raw output whatever the exit status
    fn run_raw(&self, args: &[&str]) -> Result<CommandOutput> {
        if self.verbose {
            ui::display_command(&command_line(args));
        }
        self.runner.run("git", args)
    }

    /// Run git and fail on a non-zero exit status
    fn run_checked(&self, args: &[&str]) -> Result<String> {
        let output = self.run_raw(args)?;
        if output.is_success() {
            Ok(output.stdout)
        } else {
            Err(process_error(args, output))
        }
    }

    /// `git fetch --tags <remote>`
    pub fn fetch_tags(&self, remote: &str) -> Result<()> {
        self.run_checked(&["fetch", "--tags", remote])?;
        Ok(())
    }

    /// `git tag -l`
    pub fn list_tags(&self) -> Result<Vec<String>> {
        let stdout = self.run_checked(&["tag", "-l"])?;
        Ok(split_names(&stdout))
    }

    /// `git tag --points-at HEAD`
    pub fn tags_at_head(&self) -> Result<Vec<String>> {
        let stdout = self.run_checked(&["tag", "--points-at", "HEAD"])?;
        Ok(split_names(&stdout))
    }

    /// `git config <key>`; an unset key (exit 1, no output) is `None`
    pub fn config_get(&self, key: &str) -> Result<Option<String>> {
        let args = ["config", key];
        let output = self.run_raw(&args)?;
        match output.status {
            Some(0) => Ok(non_empty(&output.stdout)),
            Some(1) if output.stdout.trim().is_empty() && output.stderr.trim().is_empty() => {
                Ok(None)
            }
            _ => Err(process_error(&args, output)),
        }
    }

    /// `git config --global <key> <value>`
    pub fn config_set_global(&self, key: &str, value: &str) -> Result<()> {
        self.run_checked(&["config", "--global", key, value])?;
        Ok(())
    }

    /// `git config --global --get-all <key>`; unset yields an empty list
    pub fn config_get_all_global(&self, key: &str) -> Result<Vec<String>> {
        let args = ["config", "--global", "--get-all", key];
        let output = self.run_raw(&args)?;
        match output.status {
            Some(0) => Ok(output
                .stdout
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .collect()),
            Some(1) if output.stdout.trim().is_empty() => Ok(Vec::new()),
            _ => Err(process_error(&args, output)),
        }
    }

    /// `git config --global --add <key> <value>`
    pub fn config_add_global(&self, key: &str, value: &str) -> Result<()> {
        self.run_checked(&["config", "--global", "--add", key, value])?;
        Ok(())
    }

    /// `git add <path>`
    pub fn add(&self, path: &str) -> Result<()> {
        self.run_checked(&["add", path])?;
        Ok(())
    }

    /// `git commit -m <message>`
    pub fn commit(&self, message: &str) -> Result<()> {
        self.run_checked(&["commit", "-m", message])?;
        Ok(())
    }

    /// `git tag <name>`
    pub fn create_tag(&self, name: &str) -> Result<()> {
        self.run_checked(&["tag", name])?;
        Ok(())
    }

    /// `git push --tags <remote> <branch>`
    pub fn push_tags(&self, remote: &str, branch: &str) -> Result<()> {
        self.run_checked(&["push", "--tags", remote, branch])?;
        Ok(())
    }
}

fn split_names(stdout: &str) -> Vec<String> {
    stdout.split_whitespace().map(str::to_string).collect()
}

fn non_empty(stdout: &str) -> Option<String> {
    let trimmed = stdout.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn command_line(args: &[&str]) -> String {
    let mut line = String::from("git");
    for arg in args {
        line.push(' ');
        if arg.is_empty() || arg.contains(char::is_whitespace) {
            line.push_str(&format!("{:?}", arg));
        } else {
            line.push_str(arg);
        }
    }
    line
}

fn process_error(args: &[&str], output: CommandOutput) -> ReleaseTagError {
    ReleaseTagError::Process {
        command: command_line(args),
        status: output.status,
        stdout: output.stdout,
        stderr: output.stderr,
    }
}
