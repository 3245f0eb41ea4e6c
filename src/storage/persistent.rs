//! A value mirrored into a [`KeyValueStore`] on every change.

use crate::domain::error::Result;
use crate::storage::backend::KeyValueStore;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Holds `T` in memory and writes its JSON form back under `key` whenever it
/// changes.
///
/// The stored value is read once, in [`PersistentList::load`]. A missing or
/// unreadable value falls back to the supplied default; there is no schema
/// versioning, so an incompatible stored shape is treated like a missing one.
///
/// # Examples
///
/// ```
/// use popcorn::storage::{KeyValueStore, MemoryStore, PersistentList};
///
/// let mut list = PersistentList::load(MemoryStore::default(), "watchedList", Vec::<u8>::new());
/// list.set(vec![7, 9])?;
/// assert_eq!(list.value(), &vec![7, 9]);
/// assert_eq!(list.store().get("watchedList")?.as_deref(), Some("[7,9]"));
/// # Ok::<(), popcorn::domain::PopcornError>(())
/// ```
pub struct PersistentList<T, S> {
    store: S,
    key: String,
    value: T,
}

impl<T, S> PersistentList<T, S>
where
    T: Serialize + DeserializeOwned,
    S: KeyValueStore,
{
    /// Reads the stored value for `key`, or uses `default` when absent or unparseable.
    pub fn load(store: S, key: impl Into<String>, default: T) -> Self {
        let key = key.into();
        let _span = tracing::debug_span!("persistent_load", key = %key).entered();

        let value = match store.get(&key) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(value) => {
                    tracing::debug!("loaded stored value");
                    value
                }
                Err(e) => {
                    tracing::warn!(error = %e, "stored value is unparseable, using default");
                    default
                }
            },
            Ok(None) => {
                tracing::debug!("no stored value, using default");
                default
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to read stored value, using default");
                default
            }
        };

        Self { store, key, value }
    }

    #[must_use]
    pub const fn value(&self) -> &T {
        &self.value
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Gives the store back, dropping the in-memory value.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Replaces the value and writes it back.
    ///
    /// The in-memory value is replaced even when the write fails.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the store write fails.
    pub fn set(&mut self, new_value: T) -> Result<()> {
        self.value = new_value;
        self.persist()
    }

    /// Mutates the value in place and writes it back.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the store write fails.
    pub fn update(&mut self, mutate: impl FnOnce(&mut T)) -> Result<()> {
        mutate(&mut self.value);
        self.persist()
    }

    fn persist(&mut self) -> Result<()> {
        let _span = tracing::debug_span!("persistent_save", key = %self.key).entered();
        let json = serde_json::to_string(&self.value)?;
        self.store.set(&self.key, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Rating, WatchedCollection, WatchedEntry};
    use crate::storage::{JsonFileStore, MemoryStore};

    fn entry(id: &str, rating: u8) -> WatchedEntry {
        WatchedEntry {
            id: id.to_string(),
            title: format!("Movie {id}"),
            year: "1999".to_string(),
            poster_url: String::new(),
            runtime_minutes: Some(120),
            external_rating: Some(7.5),
            user_rating: Rating::new(rating).unwrap(),
            rating_revision_count: 2,
        }
    }

    #[test]
    fn absent_key_yields_default() {
        let list = PersistentList::load(MemoryStore::default(), "watchedList", WatchedCollection::default());
        assert!(list.value().is_empty());
    }

    #[test]
    fn unparseable_value_yields_default() {
        let store = MemoryStore::with_value("watchedList", "{not json");
        let list = PersistentList::load(store, "watchedList", WatchedCollection::default());
        assert!(list.value().is_empty());
    }

    #[test]
    fn legacy_null_value_yields_default() {
        let store = MemoryStore::with_value("watchedList", "null");
        let list = PersistentList::load(store, "watchedList", WatchedCollection::default());
        assert!(list.value().is_empty());
    }

    #[test]
    fn every_change_is_written_back() {
        let mut list = PersistentList::load(MemoryStore::default(), "watchedList", WatchedCollection::default());
        list.update(|watched| watched.push(entry("tt1", 7))).unwrap();

        let raw = list.store().get("watchedList").unwrap().unwrap();
        let stored: WatchedCollection = serde_json::from_str(&raw).unwrap();
        assert_eq!(&stored, list.value());
    }

    #[test]
    fn survives_reload_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let watched = WatchedCollection::new(vec![entry("tt1", 7), entry("tt2", 10), entry("tt1", 3)]);

        {
            let store = JsonFileStore::new(dir.path().to_path_buf()).unwrap();
            let mut list = PersistentList::load(store, "watchedList", WatchedCollection::default());
            list.set(watched.clone()).unwrap();
        }

        let store = JsonFileStore::new(dir.path().to_path_buf()).unwrap();
        let reloaded = PersistentList::load(store, "watchedList", WatchedCollection::default());
        assert_eq!(reloaded.value(), &watched);
    }
}
