//! Formatting functions for progress output.
//!
//! Everything the tool reports goes through here so colour and layout are
//! decided in one place. Status lines go to stdout, problems go to stderr.

use console::style;

use crate::boundary::BoundaryWarning;
use crate::domain::{Resolution, Version};

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Echo an external command about to run.
pub fn display_command(command_line: &str) {
    println!("  {} {}", style("$").dim(), style(command_line).cyan());
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Show the three versions the decision was based on.
///
/// # Arguments
/// * `declared` - Version read from the metadata file
/// * `latest_tag` - Highest version tag in history (0.0.0 if none)
/// * `resolution` - What the resolver decided
pub fn display_version_summary(
    declared: &Version,
    latest_tag: &Version,
    resolution: &Resolution,
) {
    println!("\n{}", style("Version summary:").bold());
    for line in version_summary_lines(declared, latest_tag, resolution) {
        println!("{}", line);
    }
}

fn version_summary_lines(
    declared: &Version,
    latest_tag: &Version,
    resolution: &Resolution,
) -> Vec<String> {
    let new = match resolution {
        Resolution::AlreadyTagged(v) => format!("{} (already tagged on HEAD)", style(v).dim()),
        Resolution::Publish(v) => style(v).green().to_string(),
    };
    vec![
        format!("  Declared:   {}", declared),
        format!("  Latest tag: {}", latest_tag),
        format!("  New:        {}", new),
    ]
}

const MAX_LISTED_TAGS: usize = 10;

/// List tags that were skipped because they are not plain versions.
pub fn display_ignored_tags(tags: &[String]) {
    if tags.is_empty() {
        return;
    }
    println!(
        "{} ignoring {} non-version tag(s):",
        style("→").yellow(),
        tags.len()
    );
    for line in ignored_tag_lines(tags) {
        println!("{}", line);
    }
}

/// One line per listed tag, capped at [MAX_LISTED_TAGS] plus a remainder line
fn ignored_tag_lines(tags: &[String]) -> Vec<String> {
    let mut lines: Vec<String> = tags
        .iter()
        .take(MAX_LISTED_TAGS)
        .map(|tag| format!("  - {}", tag))
        .collect();
    if tags.len() > MAX_LISTED_TAGS {
        lines.push(format!("  ... and {} more", tags.len() - MAX_LISTED_TAGS));
    }
    lines
}
