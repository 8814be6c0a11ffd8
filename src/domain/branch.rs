use crate::boundary::BoundaryWarning;

/// The branch a release is pushed to, with how it was obtained
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchContext {
    pub name: String,
    pub warning: Option<BoundaryWarning>,
}

impl BranchContext {
    /// Derive the branch short name.
    ///
    /// An explicit branch always wins. Otherwise `git_ref` has `prefix`
    /// stripped; a ref without the prefix is used as-is and flagged.
    /// Returns `None` when neither source yields a non-empty name.
    pub fn resolve(explicit: Option<&str>, git_ref: Option<&str>, prefix: &str) -> Option<Self> {
        if let Some(name) = explicit.map(str::trim).filter(|b| !b.is_empty()) {
            return Some(BranchContext {
                name: name.to_string(),
                warning: None,
            });
        }

        let git_ref = git_ref.map(str::trim).filter(|r| !r.is_empty())?;
        match git_ref.strip_prefix(prefix) {
            Some(short) if !short.is_empty() => Some(BranchContext {
                name: short.to_string(),
                warning: None,
            }),
            Some(_) => None,
            None => Some(BranchContext {
                name: git_ref.to_string(),
                warning: Some(BoundaryWarning::RefWithoutBranchPrefix {
                    git_ref: git_ref.to_string(),
                    prefix: prefix.to_string(),
                }),
            }),
        }
    }
}
