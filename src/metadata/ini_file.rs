//! Line-preserving INI access for `setup.cfg` style files.
//!
//! Section names are case-sensitive, option names are not. `=` and `:`
//! are both accepted as separators. Lines starting with `#` or `;` are
//! comments. Only the value of the matched option is ever rewritten.

use crate::metadata::KeyPath;
use regex::Regex;
use std::sync::OnceLock;

const SECTION_PATTERN: &str = r"^\s*\[([^\]]+)\]\s*(?:[#;].*)?$";
const OPTION_PATTERN: &str =
    r"^(?P<lead>(?P<key>[^\s=:\[#;][^=:]*?)\s*[=:][ \t]*)(?P<value>.*?)(?P<trail>[ \t]*)$";

struct Grammar {
    section: Regex,
    option: Regex,
}

impl Grammar {
    fn compile() -> Result<Self, String> {
        let section =
            Regex::new(SECTION_PATTERN).map_err(|e| format!("invalid INI grammar: {}", e))?;
        let option =
            Regex::new(OPTION_PATTERN).map_err(|e| format!("invalid INI grammar: {}", e))?;
        Ok(Grammar { section, option })
    }

    /// Compiled once per process
    fn get() -> Result<&'static Grammar, String> {
        static GRAMMAR: OnceLock<Result<Grammar, String>> = OnceLock::new();
        GRAMMAR.get_or_init(Grammar::compile).as_ref().map_err(Clone::clone)
    }
}

/// Location of the option's value inside the content
struct Found {
    start: usize,
    end: usize,
}

fn split_key(key: &KeyPath) -> Result<(&str, &str), String> {
    match key.segments() {
        [section, option] => Ok((section.as_str(), option.as_str())),
        _ => Err(format!("INI key path '{}' must be exactly 'section.key'", key)),
    }
}

fn find(grammar: &Grammar, content: &str, key: &KeyPath) -> Result<Found, String> {
    let (section, option) = split_key(key)?;

    let mut current: Option<&str> = None;
    let mut section_seen = false;
    let mut offset = 0;

    for raw_line in content.split_inclusive('\n') {
        let line_start = offset;
        offset += raw_line.len();
        let line = raw_line.trim_end_matches(['\n', '\r']);

        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with(';') {
            continue;
        }

        if let Some(caps) = grammar.section.captures(line) {
            let name = caps.get(1).map(|m| m.as_str().trim());
            current = name;
            if name == Some(section) {
                section_seen = true;
            }
            continue;
        }

        if current != Some(section) || line.starts_with(char::is_whitespace) {
            continue;
        }

        if let Some(caps) = grammar.option.captures(line) {
            let name = caps.name("key").map(|m| m.as_str().trim()).unwrap_or_default();
            if name.eq_ignore_ascii_case(option) {
                let value = caps
                    .name("value")
                    .ok_or_else(|| format!("key '{}' has no value", key))?;
                return Ok(Found {
                    start: line_start + value.start(),
                    end: line_start + value.end(),
                });
            }
        }
    }

    if section_seen {
        Err(format!("key '{}' not found", key))
    } else {
        Err(format!("section '[{}]' not found", section))
    }
}

/// Look up `section.option` and return its value
pub fn read_string(content: &str, key: &KeyPath) -> Result<String, String> {
    let found = find(Grammar::get()?, content, key)?;
    Ok(content[found.start..found.end].to_string())
}

/// Replace the value of `section.option`, leaving every other byte unchanged
pub fn set_string(content: &str, key: &KeyPath, value: &str) -> Result<String, String> {
    let found = find(Grammar::get()?, content, key)?;
    let mut updated = String::with_capacity(content.len() + value.len());
    updated.push_str(&content[..found.start]);
    updated.push_str(value);
    updated.push_str(&content[found.end..]);
    Ok(updated)
}
