//! Lossless TOML access through `toml_edit`

use crate::metadata::KeyPath;
use toml_edit::{DocumentMut, Item, Value};

fn parse(content: &str) -> Result<DocumentMut, String> {
    content
        .parse::<DocumentMut>()
        .map_err(|e| format!("malformed TOML: {}", e))
}

/// Look up `key` and return its string value
pub fn read_string(content: &str, key: &KeyPath) -> Result<String, String> {
    let doc = parse(content)?;

    let mut item = doc.as_item();
    for segment in key.segments() {
        item = item
            .get(segment.as_str())
            .ok_or_else(|| format!("key '{}' not found", key))?;
    }

    item.as_str()
        .map(str::to_string)
        .ok_or_else(|| format!("key '{}' is not a string", key))
}

/// Replace the string value at `key`, keeping its surrounding formatting.
///
/// The key must already exist; missing tables are not created.
pub fn set_string(content: &str, key: &KeyPath, value: &str) -> Result<String, String> {
    let mut doc = parse(content)?;

    let mut item: &mut Item = doc.as_item_mut();
    for segment in key.segments() {
        item = item
            .get_mut(segment.as_str())
            .ok_or_else(|| format!("key '{}' not found", key))?;
    }

    let current = item
        .as_value_mut()
        .filter(|v| v.is_str())
        .ok_or_else(|| format!("key '{}' is not a string", key))?;

    let decor = current.decor().clone();
    *current = Value::from(value);
    *current.decor_mut() = decor;

    Ok(doc.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PYPROJECT: &str = r#"# build settings
[build-system]
requires = ["setuptools>=61"]

[project]
name = "demo"   # package name
version = "1.0.0"  # bumped in CI
dependencies = [
    "requests",
]

[tool.poetry]
version = "0.3.0"
"#;

    fn key(path: &str) -> KeyPath {
        KeyPath::parse(path).unwrap()
    }

    #[test]
    fn test_read_project_version() {
        assert_eq!(read_string(PYPROJECT, &key("project.version")).unwrap(), "1.0.0");
    }

    #[test]
    fn test_read_nested_table() {
        assert_eq!(read_string(PYPROJECT, &key("tool.poetry.version")).unwrap(), "0.3.0");
    }

    #[test]
    fn test_read_dotted_key_at_root() {
        let content = "project.version = \"2.0.0\"\n";
        assert_eq!(read_string(content, &key("project.version")).unwrap(), "2.0.0");
    }

    #[test]
    fn test_read_missing_key() {
        let err = read_string(PYPROJECT, &key("package.version")).unwrap_err();
        assert!(err.contains("not found"));
    }

    #[test]
    fn test_read_non_string_value() {
        let err = read_string("[project]\nversion = 3\n", &key("project.version")).unwrap_err();
        assert!(err.contains("not a string"));
    }

    #[test]
    fn test_read_malformed() {
        let err = read_string("[project\nversion = ", &key("project.version")).unwrap_err();
        assert!(err.contains("malformed TOML"));
    }

    #[test]
    fn test_set_preserves_comments_and_layout() {
        let updated = set_string(PYPROJECT, &key("project.version"), "1.0.1").unwrap();
        let expected = PYPROJECT.replace(
            "version = \"1.0.0\"  # bumped in CI",
            "version = \"1.0.1\"  # bumped in CI",
        );
        assert_eq!(updated, expected);
    }

    #[test]
    fn test_set_leaves_other_keys_untouched() {
        let updated = set_string(PYPROJECT, &key("project.version"), "4.0.0").unwrap();
        let before: toml::Value = toml::from_str(PYPROJECT).unwrap();
        let after: toml::Value = toml::from_str(&updated).unwrap();

        assert_eq!(after["project"]["version"].as_str(), Some("4.0.0"));
        assert_eq!(after["project"]["name"], before["project"]["name"]);
        assert_eq!(after["project"]["dependencies"], before["project"]["dependencies"]);
        assert_eq!(after["tool"], before["tool"]);
        assert_eq!(after["build-system"], before["build-system"]);
    }

    #[test]
    fn test_inline_table_read_and_set() {
        let content = "# inline\nproject = { name = \"x\", version = \"1.0.0\" }\n";
        assert_eq!(read_string(content, &key("project.version")).unwrap(), "1.0.0");

        let updated = set_string(content, &key("project.version"), "1.0.1").unwrap();
        assert_eq!(
            updated,
            "# inline\nproject = { name = \"x\", version = \"1.0.1\" }\n"
        );
        assert_eq!(read_string(&updated, &key("project.name")).unwrap(), "x");
    }

    #[test]
    fn test_set_missing_key_fails() {
        let content = "[project]\nname = \"x\"\n";
        assert!(set_string(content, &key("project.version"), "1.0.0").is_err());
    }

    #[test]
    fn test_set_non_string_fails() {
        let content = "[project]\nversion = 1\n";
        assert!(set_string(content, &key("project.version"), "1.0.0").is_err());
    }
}
