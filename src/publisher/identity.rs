use crate::config::IdentityConfig;
use crate::error::Result;
use crate::git::{CommandRunner, GitClient};

/// Access to the committer identity settings
pub trait IdentityStore {
    /// Current value of `key`, `None` when unset or empty
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Persist `key = value` for all repositories of the user
    fn set_global(&self, key: &str, value: &str) -> Result<()>;
}

impl<R: CommandRunner> IdentityStore for GitClient<R> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.config_get(key)
    }

    fn set_global(&self, key: &str, value: &str) -> Result<()> {
        self.config_set_global(key, value)
    }
}

/// Which identity keys had to be filled with the fallback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IdentityReport {
    pub set_name: bool,
    pub set_email: bool,
}

/// Make sure `user.name` and `user.email` are configured.
///
/// Existing values are left alone, so running this repeatedly converges on
/// the same state.
pub fn ensure_identity<S: IdentityStore + ?Sized>(
    store: &S,
    fallback: &IdentityConfig,
) -> Result<IdentityReport> {
    Ok(IdentityReport {
        set_name: ensure_key(store, "user.name", &fallback.name)?,
        set_email: ensure_key(store, "user.email", &fallback.email)?,
    })
}

fn ensure_key<S: IdentityStore + ?Sized>(store: &S, key: &str, fallback: &str) -> Result<bool> {
    if store.get(key)?.is_some() {
        return Ok(false);
    }
    store.set_global(key, fallback)?;
    Ok(true)
}
