//! Response cache trait.

use std::sync::Arc;

use crate::Result;

/// A synchronous string-keyed, string-valued store that survives restarts.
///
/// The client never invalidates or overwrites an entry it has written; once
/// a key is set it is read back for the lifetime of the store.
pub trait Cache: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

impl<C: Cache + ?Sized> Cache for Arc<C> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}
