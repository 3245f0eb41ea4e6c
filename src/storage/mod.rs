//! Storage layer for the watched list.
//!
//! The watched collection is a single JSON document stored under one key. The
//! layer is split so the persistence rule ("write back on every change") is
//! independent of where the bytes end up.
//!
//! # Modules
//!
//! - `backend`: The [`KeyValueStore`] trait and key validation
//! - `json`: One-file-per-key store with atomic writes
//! - `memory`: In-process store
//! - `persistent`: [`PersistentList`], a value mirrored into a store

pub mod backend;
pub mod json;
pub mod memory;
pub mod persistent;

pub use backend::KeyValueStore;
pub use json::JsonFileStore;
pub use memory::MemoryStore;
pub use persistent::PersistentList;

/// Key under which the watched list is stored unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "watchedList";
