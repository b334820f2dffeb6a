use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::github::ReleaseSource;

/// Handle to display name for everyone seen while scanning commits and
/// reviews. Entries are only ever added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContributorRegistry {
    names: BTreeMap<String, String>,
}

impl ContributorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `handle`, displayed as `display_name` or as the handle itself
    /// when the account has no name set.
    pub fn register(&mut self, handle: impl Into<String>, display_name: Option<String>) {
        let handle = handle.into();
        let name = display_name.unwrap_or_else(|| handle.clone());
        self.names.insert(handle, name);
    }

    pub fn contains(&self, handle: &str) -> bool {
        self.names.contains_key(handle)
    }

    pub fn display_name(&self, handle: &str) -> Option<&str> {
        self.names.get(handle).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Makes sure `handle` is in the registry, looking its profile up the first
/// time it is seen. Accounts that no longer exist are shown by handle.
pub async fn identify(
    source: &dyn ReleaseSource,
    registry: &mut ContributorRegistry,
    handle: &str,
) -> Result<()> {
    if registry.contains(handle) {
        return Ok(());
    }

    match source.get_user(handle).await {
        Ok(user) => registry.register(handle, user.name),
        Err(Error::UserNotFound(_)) => {
            tracing::warn!("No GitHub profile for {}, using handle as name", handle);
            registry.register(handle, None);
        }
        Err(e) => return Err(e),
    }

    Ok(())
}
