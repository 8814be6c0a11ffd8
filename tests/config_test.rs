use release_tagger::config::{load_config, Config, MetadataPreset};
use release_tagger::metadata::MetadataFormat;
use serial_test::serial;
use std::env;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::{NamedTempFile, TempDir};

#[test]
fn test_load_from_explicit_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
[metadata]
format = "ini"
path = "setup.cfg"
key = "metadata.version"

[git]
remote = "upstream"
branch_ref_prefix = "refs/heads/release/"

[identity]
name = "release-bot"
email = "release-bot@example.com"

[commit]
message = "chore(release): {version}"
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(temp_file.path().to_str(), Path::new(".")).unwrap();
    assert_eq!(config.metadata.format, MetadataFormat::Ini);
    assert_eq!(config.metadata.path, "setup.cfg");
    assert_eq!(config.git.remote, "upstream");
    assert_eq!(config.git.branch_ref_prefix, "refs/heads/release/");
    assert_eq!(config.git.ref_variable, "GITHUB_REF");
    assert_eq!(config.identity.name, "release-bot");
    assert_eq!(config.commit.render("2.0.0", "setup.cfg"), "chore(release): 2.0.0");
}

#[test]
fn test_unknown_fields_are_ignored() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file
        .write_all(b"[metadata]\npath = \"Cargo.toml\"\nunused = true\n")
        .unwrap();
    temp_file.flush().unwrap();

    let config = load_config(temp_file.path().to_str(), Path::new(".")).unwrap();
    assert_eq!(config.metadata.path, "Cargo.toml");
    assert_eq!(config.metadata.key, "project.version");
}

#[test]
fn test_malformed_file_reports_path() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"[metadata\n").unwrap();
    temp_file.flush().unwrap();

    let err = load_config(temp_file.path().to_str(), Path::new(".")).unwrap_err();
    assert!(err
        .to_string()
        .contains(&temp_file.path().display().to_string()));
}

#[test]
#[serial]
fn test_load_from_current_directory() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("releasetag.toml"),
        "[metadata]\npath = \"Cargo.toml\"\nkey = \"package.version\"\n",
    )
    .unwrap();

    let original_dir = env::current_dir().unwrap();
    env::set_current_dir(temp_dir.path()).expect("Could not change to temp dir");
    let result = load_config(None, Path::new("."));
    env::set_current_dir(original_dir).unwrap();

    let config = result.unwrap();
    assert_eq!(config.metadata.path, "Cargo.toml");
    assert_eq!(config.metadata.key, "package.version");
}

#[test]
fn test_presets() {
    let mut config = Config::default();
    config.apply(&release_tagger::config::ConfigOverrides {
        preset: Some(MetadataPreset::Cargo),
        ..Default::default()
    });
    assert_eq!(config.metadata.format, MetadataFormat::Toml);
    assert_eq!(config.metadata.path, "Cargo.toml");
    assert_eq!(config.metadata.key, "package.version");
}
