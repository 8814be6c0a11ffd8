use std::path::{Path, PathBuf};
use thiserror::Error;

/// Unified error type for release-tagger operations
#[derive(Error, Debug)]
pub enum ReleaseTagError {
    #[error("Cannot read version from {}: {reason}", path.display())]
    ConfigRead { path: PathBuf, reason: String },

    #[error("Cannot write version to {}: {reason}", path.display())]
    ConfigWrite { path: PathBuf, reason: String },

    #[error("Could not fetch tags from remote '{remote}': {source}")]
    Sync {
        remote: String,
        #[source]
        source: Box<ReleaseTagError>,
    },

    #[error(
        "Command '{command}' failed with {}\nstdout:\n{stdout}\nstderr:\n{stderr}",
        describe_status(*status)
    )]
    Process {
        command: String,
        status: Option<i32>,
        stdout: String,
        stderr: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn describe_status(status: Option<i32>) -> String {
    match status {
        Some(code) => format!("exit code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

/// Convenience type alias for Results in release-tagger
pub type Result<T> = std::result::Result<T, ReleaseTagError>;

impl ReleaseTagError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseTagError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        ReleaseTagError::Version(msg.into())
    }

    /// Failure to read the declared version out of a metadata file
    pub fn config_read(path: &Path, reason: impl Into<String>) -> Self {
        ReleaseTagError::ConfigRead {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    /// Failure to rewrite a metadata file
    pub fn config_write(path: &Path, reason: impl Into<String>) -> Self {
        ReleaseTagError::ConfigWrite {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    /// Wrap a failed tag fetch so callers can tell it apart from parse failures
    pub fn sync(remote: impl Into<String>, source: ReleaseTagError) -> Self {
        ReleaseTagError::Sync {
            remote: remote.into(),
            source: Box::new(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ReleaseTagError::config("test config issue");
        assert_eq!(err.to_string(), "Configuration error: test config issue");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ReleaseTagError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_config_read_mentions_path_and_reason() {
        let err = ReleaseTagError::config_read(
            Path::new("pyproject.toml"),
            "key 'project.version' not found",
        );
        let msg = err.to_string();
        assert!(msg.contains("pyproject.toml"));
        assert!(msg.contains("project.version"));
    }

    #[test]
    fn test_process_error_carries_output() {
        let err = ReleaseTagError::Process {
            command: "git push --tags origin main".to_string(),
            status: Some(128),
            stdout: String::new(),
            stderr: "fatal: could not read from remote".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("git push --tags origin main"));
        assert!(msg.contains("exit code 128"));
        assert!(msg.contains("fatal: could not read from remote"));
    }

    #[test]
    fn test_process_error_without_status() {
        let err = ReleaseTagError::Process {
            command: "git fetch --tags origin".to_string(),
            status: None,
            stdout: String::new(),
            stderr: String::new(),
        };
        assert!(err.to_string().contains("terminated by signal"));
    }

    #[test]
    fn test_sync_error_is_distinct_and_keeps_source() {
        let inner = ReleaseTagError::Process {
            command: "git fetch --tags origin".to_string(),
            status: Some(1),
            stdout: String::new(),
            stderr: "network unreachable".to_string(),
        };
        let err = ReleaseTagError::sync("origin", inner);
        assert!(matches!(err, ReleaseTagError::Sync { .. }));
        let msg = err.to_string();
        assert!(msg.starts_with("Could not fetch tags from remote 'origin'"));
        assert!(msg.contains("network unreachable"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (ReleaseTagError::config("x"), "Configuration error"),
            (ReleaseTagError::version("x"), "Version parsing error"),
            (
                ReleaseTagError::config_write(Path::new("setup.cfg"), "x"),
                "Cannot write version",
            ),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }
}
