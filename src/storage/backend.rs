//! Key-value storage abstraction.
//!
//! This module defines the [`KeyValueStore`] trait that [`PersistentList`]
//! persists through. It deliberately mirrors a browser-style local storage:
//! string keys, string values, no transactions, no listing.
//!
//! [`PersistentList`]: crate::storage::PersistentList

use crate::domain::error::{PopcornError, Result};

/// Durable string-to-string storage.
///
/// # Implementations
///
/// - [`JsonFileStore`](crate::storage::JsonFileStore): one file per key under a data directory
/// - [`MemoryStore`](crate::storage::MemoryStore): in-process map, used by tests
///
/// # Examples
///
/// ```
/// use popcorn::storage::{KeyValueStore, MemoryStore};
///
/// let mut store = MemoryStore::default();
/// store.set("watchedList", "[]")?;
/// assert_eq!(store.get("watchedList")?.as_deref(), Some("[]"));
/// # Ok::<(), popcorn::domain::PopcornError>(())
/// ```
pub trait KeyValueStore: Send {
    /// Reads the value stored under `key`.
    ///
    /// Returns `Ok(None)` if nothing has been stored yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or the write fails.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

/// Rejects keys that cannot safely become a file name.
///
/// # Errors
///
/// Returns [`PopcornError::Storage`] for empty keys, path separators, or
/// dot-only names.
pub fn validate_key(key: &str) -> Result<()> {
    let invalid = key.is_empty()
        || key.chars().all(|c| c == '.')
        || key.contains(['/', '\\', '\0']);

    if invalid {
        return Err(PopcornError::Storage(format!("invalid storage key: {key:?}")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_keys_are_accepted() {
        assert!(validate_key("watchedList").is_ok());
        assert!(validate_key("watched.v2").is_ok());
    }

    #[test]
    fn path_like_keys_are_rejected() {
        for key in ["", ".", "..", "../escape", "a/b", "a\\b"] {
            assert!(validate_key(key).is_err(), "{key:?} should be rejected");
        }
    }
}
