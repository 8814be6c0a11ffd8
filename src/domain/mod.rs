//! Domain logic - pure release rules independent of git and the filesystem

pub mod branch;
pub mod resolution;
pub mod version;

pub use branch::BranchContext;
pub use resolution::{resolve, Resolution};
pub use version::Version;
