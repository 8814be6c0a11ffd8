use crate::error::Result;
use crate::git::{CommandOutput, CommandRunner};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Runs commands as real child processes
#[derive(Debug, Clone, Default)]
pub struct SystemRunner {
    /// Working directory for spawned commands; inherits the current one if unset
    work_dir: Option<PathBuf>,
}

impl SystemRunner {
    pub fn new() -> Self {
        SystemRunner { work_dir: None }
    }

    /// Run every command inside `dir`
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        SystemRunner {
            work_dir: Some(dir.as_ref().to_path_buf()),
        }
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        let mut cmd = Command::new(program);
        cmd.args(args);
        if let Some(dir) = &self.work_dir {
            cmd.current_dir(dir);
        }

        let output = cmd.output()?;

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            status: output.status.code(),
        })
    }
}
