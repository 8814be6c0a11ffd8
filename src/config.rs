use crate::error::{ReleaseTagError, Result};
use crate::metadata::{KeyPath, MetadataFile, MetadataFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "releasetag.toml";

/// File name looked up in the user configuration directory
pub const USER_CONFIG_FILE_NAME: &str = ".releasetag.toml";

/// Represents the complete configuration for release-tagger.
///
/// Describes where the declared version lives, how to talk to the remote,
/// which identity to fall back to, and how commits are worded.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub metadata: MetadataConfig,

    #[serde(default)]
    pub git: GitConfig,

    #[serde(default)]
    pub identity: IdentityConfig,

    #[serde(default)]
    pub commit: CommitConfig,
}

/// Well-known metadata file layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum MetadataPreset {
    /// `pyproject.toml`, key `project.version`
    Pyproject,
    /// `setup.cfg`, key `metadata.version`
    SetupCfg,
    /// `Cargo.toml`, key `package.version`
    Cargo,
}

/// Location and syntax of the file holding the declared version.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct MetadataConfig {
    #[serde(default = "default_metadata_format")]
    pub format: MetadataFormat,

    #[serde(default = "default_metadata_path")]
    pub path: String,

    #[serde(default = "default_metadata_key")]
    pub key: String,
}

fn default_metadata_format() -> MetadataFormat {
    MetadataFormat::Toml
}

fn default_metadata_path() -> String {
    "pyproject.toml".to_string()
}

fn default_metadata_key() -> String {
    "project.version".to_string()
}

impl Default for MetadataConfig {
    fn default() -> Self {
        MetadataConfig::from_preset(MetadataPreset::Pyproject)
    }
}

impl MetadataConfig {
    pub fn from_preset(preset: MetadataPreset) -> Self {
        let (format, path, key) = match preset {
            MetadataPreset::Pyproject => {
                (MetadataFormat::Toml, "pyproject.toml", "project.version")
            }
            MetadataPreset::SetupCfg => (MetadataFormat::Ini, "setup.cfg", "metadata.version"),
            MetadataPreset::Cargo => (MetadataFormat::Toml, "Cargo.toml", "package.version"),
        };
        MetadataConfig {
            format,
            path: path.to_string(),
            key: key.to_string(),
        }
    }

    /// Build the typed accessor, resolving a relative path against `root`
    pub fn open(&self, root: &Path) -> Result<MetadataFile> {
        let key = KeyPath::parse(&self.key)?;
        let path = Path::new(&self.path);
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            root.join(path)
        };
        MetadataFile::new(path, self.format, key)
    }
}

/// Remote and CI ref settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GitConfig {
    #[serde(default = "default_remote")]
    pub remote: String,

    /// Environment variable holding the ref being built
    #[serde(default = "default_ref_variable")]
    pub ref_variable: String,

    #[serde(default = "default_branch_ref_prefix")]
    pub branch_ref_prefix: String,

    /// Directory to register as a git `safe.directory` before running
    #[serde(default)]
    pub safe_directory: Option<String>,
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_ref_variable() -> String {
    "GITHUB_REF".to_string()
}

fn default_branch_ref_prefix() -> String {
    "refs/heads/".to_string()
}

impl Default for GitConfig {
    fn default() -> Self {
        GitConfig {
            remote: default_remote(),
            ref_variable: default_ref_variable(),
            branch_ref_prefix: default_branch_ref_prefix(),
            safe_directory: None,
        }
    }
}

/// Fallback commit identity used when git has none configured.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct IdentityConfig {
    #[serde(default = "default_identity_name")]
    pub name: String,

    #[serde(default = "default_identity_email")]
    pub email: String,
}

fn default_identity_name() -> String {
    "github-actions[bot]".to_string()
}

fn default_identity_email() -> String {
    "github-actions[bot]@users.noreply.github.com".to_string()
}

impl Default for IdentityConfig {
    fn default() -> Self {
        IdentityConfig {
            name: default_identity_name(),
            email: default_identity_email(),
        }
    }
}

/// Version-bump commit settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CommitConfig {
    /// Supports `{version}` and `{file}` placeholders
    #[serde(default = "default_commit_message")]
    pub message: String,
}

fn default_commit_message() -> String {
    "update version to {version} in {file}".to_string()
}

impl Default for CommitConfig {
    fn default() -> Self {
        CommitConfig {
            message: default_commit_message(),
        }
    }
}

impl CommitConfig {
    /// Render the commit message for `version` written to `file`
    pub fn render(&self, version: &str, file: &str) -> String {
        self.message
            .replace("{version}", version)
            .replace("{file}", file)
    }
}

/// Command-line values that take precedence over the loaded file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub preset: Option<MetadataPreset>,
    pub file: Option<String>,
    pub format: Option<MetadataFormat>,
    pub key: Option<String>,
    pub remote: Option<String>,
}

impl Config {
    /// Apply command-line overrides. A preset replaces the whole metadata
    /// section; individual flags then refine it.
    pub fn apply(&mut self, overrides: &ConfigOverrides) {
        if let Some(preset) = overrides.preset {
            self.metadata = MetadataConfig::from_preset(preset);
        }
        if let Some(file) = &overrides.file {
            self.metadata.path = file.clone();
        }
        if let Some(format) = overrides.format {
            self.metadata.format = format;
        }
        if let Some(key) = &overrides.key {
            self.metadata.key = key.clone();
        }
        if let Some(remote) = &overrides.remote {
            self.git.remote = remote.clone();
        }
    }
}

/// Parse configuration from TOML text read out of `origin`
pub fn parse_config(content: &str, origin: &Path) -> Result<Config> {
    toml::from_str(content)
        .map_err(|e| ReleaseTagError::config(format!("Invalid {}: {}", origin.display(), e)))
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `releasetag.toml` in `work_dir`
/// 3. `.releasetag.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>, work_dir: &Path) -> Result<Config> {
    match locate_config(config_path, work_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path).map_err(|e| {
                ReleaseTagError::config(format!("Cannot read {}: {}", path.display(), e))
            })?;
            parse_config(&content, &path)
        }
        None => Ok(Config::default()),
    }
}

fn locate_config(config_path: Option<&str>, work_dir: &Path) -> Option<PathBuf> {
    if let Some(path) = config_path {
        return Some(PathBuf::from(path));
    }

    let local = work_dir.join(CONFIG_FILE_NAME);
    if local.exists() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join(USER_CONFIG_FILE_NAME))
        .filter(|path| path.exists())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_match_pyproject_layout() {
        let config = Config::default();
        assert_eq!(config.metadata.format, MetadataFormat::Toml);
        assert_eq!(config.metadata.path, "pyproject.toml");
        assert_eq!(config.metadata.key, "project.version");
        assert_eq!(config.git.remote, "origin");
        assert_eq!(config.git.ref_variable, "GITHUB_REF");
        assert_eq!(config.git.branch_ref_prefix, "refs/heads/");
        assert_eq!(config.identity.name, "github-actions[bot]");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let content =
            "[metadata]\nformat = \"ini\"\npath = \"setup.cfg\"\nkey = \"metadata.version\"\n";
        let config = parse_config(content, Path::new(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(config.metadata, MetadataConfig::from_preset(MetadataPreset::SetupCfg));
        assert_eq!(config.git, GitConfig::default());
        assert_eq!(config.commit, CommitConfig::default());
    }

    #[test]
    fn test_invalid_format_is_rejected() {
        let err = parse_config("[metadata]\nformat = \"yaml\"\n", Path::new("ci/release.toml"))
            .unwrap_err();
        assert!(matches!(err, ReleaseTagError::Config(_)));
        let msg = err.to_string();
        assert!(msg.starts_with("Configuration error: Invalid ci/release.toml"));
        assert_eq!(msg.matches("Configuration error").count(), 1);
    }

    #[test]
    fn test_commit_message_render() {
        let commit = CommitConfig::default();
        assert_eq!(
            commit.render("1.0.1", "pyproject.toml"),
            "update version to 1.0.1 in pyproject.toml"
        );
    }

    #[test]
    fn test_overrides_apply_preset_then_flags() {
        let mut config = Config::default();
        config.apply(&ConfigOverrides {
            preset: Some(MetadataPreset::SetupCfg),
            file: Some("pkg/setup.cfg".to_string()),
            remote: Some("upstream".to_string()),
            ..Default::default()
        });
        assert_eq!(config.metadata.format, MetadataFormat::Ini);
        assert_eq!(config.metadata.path, "pkg/setup.cfg");
        assert_eq!(config.metadata.key, "metadata.version");
        assert_eq!(config.git.remote, "upstream");
    }

    #[test]
    fn test_open_resolves_relative_path() {
        let metadata = MetadataConfig::from_preset(MetadataPreset::Cargo);
        let file = metadata.open(Path::new("/work")).unwrap();
        assert_eq!(file.path(), Path::new("/work/Cargo.toml"));
        assert_eq!(file.key().to_string(), "package.version");
    }

    #[test]
    fn test_load_config_from_work_dir() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[git]\nremote = \"upstream\"\n",
        )
        .unwrap();
        let config = load_config(None, dir.path()).unwrap();
        assert_eq!(config.git.remote, "upstream");
    }

    #[test]
    fn test_load_config_explicit_missing_path_fails() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(load_config(missing.to_str(), dir.path()).is_err());
    }
}
