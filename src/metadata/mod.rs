//! Reading and rewriting the declared version in a project metadata file.
//!
//! The file is treated as a document with one designated string key. Reads
//! either produce a [Version] or a [ReleaseTagError::ConfigRead]; rewrites
//! change only that key's value and leave every other byte alone.

pub mod ini_file;
pub mod toml_file;

use crate::domain::Version;
use crate::error::{ReleaseTagError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Syntax of the metadata file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MetadataFormat {
    Toml,
    Ini,
}

impl fmt::Display for MetadataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataFormat::Toml => write!(f, "toml"),
            MetadataFormat::Ini => write!(f, "ini"),
        }
    }
}

/// Dotted location of the version key, e.g. `project.version`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPath {
    segments: Vec<String>,
}

impl KeyPath {
    pub fn parse(path: &str) -> Result<Self> {
        let segments: Vec<String> = path.split('.').map(|s| s.trim().to_string()).collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(ReleaseTagError::config(format!(
                "Invalid key path '{}': segments must be non-empty",
                path
            )));
        }
        Ok(KeyPath { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl FromStr for KeyPath {
    type Err = ReleaseTagError;

    fn from_str(s: &str) -> Result<Self> {
        KeyPath::parse(s)
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

/// Typed accessor for the version stored in a metadata file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataFile {
    path: PathBuf,
    format: MetadataFormat,
    key: KeyPath,
}

impl MetadataFile {
    pub fn new(path: impl Into<PathBuf>, format: MetadataFormat, key: KeyPath) -> Result<Self> {
        if format == MetadataFormat::Ini && key.segments().len() != 2 {
            return Err(ReleaseTagError::config(format!(
                "INI key path '{}' must be exactly 'section.key'",
                key
            )));
        }
        Ok(MetadataFile {
            path: path.into(),
            format,
            key,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn key(&self) -> &KeyPath {
        &self.key
    }

    /// Read the raw string value of the version key
    pub fn read_raw(&self) -> Result<String> {
        let content = fs::read_to_string(&self.path)
            .map_err(|e| ReleaseTagError::config_read(&self.path, e.to_string()))?;

        let value = match self.format {
            MetadataFormat::Toml => toml_file::read_string(&content, &self.key),
            MetadataFormat::Ini => ini_file::read_string(&content, &self.key),
        };
        value.map_err(|reason| ReleaseTagError::config_read(&self.path, reason))
    }

    /// Read the declared version
    pub fn read_version(&self) -> Result<Version> {
        let raw = self.read_raw()?;
        Version::parse(&raw).map_err(|e| ReleaseTagError::config_read(&self.path, e.to_string()))
    }

    /// Set the version key to `version`, preserving the rest of the file
    pub fn write_version(&self, version: &Version) -> Result<()> {
        let content = fs::read_to_string(&self.path)
            .map_err(|e| ReleaseTagError::config_write(&self.path, e.to_string()))?;

        let value = version.to_string();
        let updated = match self.format {
            MetadataFormat::Toml => toml_file::set_string(&content, &self.key, &value),
            MetadataFormat::Ini => ini_file::set_string(&content, &self.key, &value),
        }
        .map_err(|reason| ReleaseTagError::config_write(&self.path, reason))?;

        fs::write(&self.path, updated)
            .map_err(|e| ReleaseTagError::config_write(&self.path, e.to_string()))
    }
}
