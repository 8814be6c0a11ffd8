//! User-facing output.
//!
//! The tool runs unattended in CI, so there are no prompts; this module only
//! re-exports the formatting helpers.

pub mod formatter;

pub use formatter::{
    display_boundary_warning, display_command, display_error, display_ignored_tags,
    display_status, display_success, display_version_summary,
};
