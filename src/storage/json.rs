//! File-backed key-value store.
//!
//! Each key maps to `<data_dir>/<key>.json`. Values are written with an atomic
//! write-to-temp + rename so a crash mid-save never leaves a truncated file.

use crate::domain::error::Result;
use crate::storage::backend::{validate_key, KeyValueStore};
use std::path::{Path, PathBuf};

/// One JSON file per key in a data directory.
///
/// # File Layout
///
/// ```text
/// /host/.local/share/zellij/popcorn/
/// └── watchedList.json
/// ```
pub struct JsonFileStore {
    data_dir: PathBuf,
}

impl JsonFileStore {
    /// Opens a store rooted at `data_dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use popcorn::storage::JsonFileStore;
    /// use std::path::PathBuf;
    ///
    /// let store = JsonFileStore::new(PathBuf::from("/tmp/popcorn"))?;
    /// # Ok::<(), popcorn::domain::PopcornError>(())
    /// ```
    pub fn new(data_dir: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?data_dir, "initializing JSON file store");
        std::fs::create_dir_all(&data_dir)?;
        Ok(Self { data_dir })
    }

    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.data_dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let _span = tracing::debug_span!("json_store_get", key = %key).entered();

        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(contents) => {
                tracing::debug!(bytes = contents.len(), "value read");
                Ok(Some(contents))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("no stored value");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let _span = tracing::debug_span!("json_store_set", key = %key, bytes = value.len()).entered();

        let path = self.path_for(key)?;
        let tmp_path = path.with_extension("json.tmp");

        tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
        std::fs::write(&tmp_path, value)?;

        tracing::trace!("renaming temporary file to final location");
        std::fs::rename(&tmp_path, &path)?;

        tracing::debug!("value saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().to_path_buf()).unwrap();
        assert_eq!(store.get("watchedList").unwrap(), None);
    }

    #[test]
    fn set_then_get_returns_value_and_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().to_path_buf()).unwrap();

        store.set("watchedList", "[1,2]").unwrap();
        store.set("watchedList", "[3]").unwrap();

        assert_eq!(store.get("watchedList").unwrap().as_deref(), Some("[3]"));
        assert!(dir.path().join("watchedList.json").exists());
        assert!(!dir.path().join("watchedList.json.tmp").exists());
    }

    #[test]
    fn creates_nested_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("share").join("popcorn");
        let mut store = JsonFileStore::new(nested.clone()).unwrap();
        store.set("k", "v").unwrap();
        assert!(nested.join("k.json").exists());
    }

    #[test]
    fn traversal_keys_are_refused() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().to_path_buf()).unwrap();
        assert!(store.set("../outside", "x").is_err());
        assert!(store.get("../outside").is_err());
    }
}
