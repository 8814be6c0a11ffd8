use std::fmt;

/// Warnings about unusual but non-fatal inputs.
/// These are reported to the user and the run continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundaryWarning {
    /// The CI ref did not start with the branch prefix and is pushed verbatim
    RefWithoutBranchPrefix { git_ref: String, prefix: String },
    /// The version file is at or behind the tag history and will be overwritten
    DeclaredNotAhead { declared: String, latest_tag: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::RefWithoutBranchPrefix { git_ref, prefix } => {
                write!(
                    f,
                    "Ref '{}' does not start with '{}'; pushing to it as-is",
                    git_ref, prefix
                )
            }
            BoundaryWarning::DeclaredNotAhead {
                declared,
                latest_tag,
            } => {
                write!(
                    f,
                    "Declared version {} is not ahead of latest tag {}; bumping the tag instead",
                    declared, latest_tag
                )
            }
        }
    }
}
