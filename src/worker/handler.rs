//! Storage worker.
//!
//! Owns the [`PersistentList`] holding the watched collection. The plugin
//! thread asks for the initial value once and then sends the full list after
//! every change; the worker mirrors each change to disk.

use crate::domain::error::{PopcornError, Result};
use crate::domain::WatchedCollection;
use crate::infrastructure::paths;
use crate::storage::{JsonFileStore, KeyValueStore, PersistentList, DEFAULT_STORAGE_KEY};
use crate::worker::{WorkerMessage, WorkerResponse};
use serde::{Deserialize, Serialize};
use zellij_tile::prelude::{PluginMessage, ZellijWorker};
use zellij_tile::shim::post_message_to_plugin;

type WatchedList = PersistentList<WatchedCollection, Box<dyn KeyValueStore>>;

/// Worker thread state.
///
/// The store is opened lazily on the first message. Tests inject one with
/// [`PopcornWorker::with_store`].
#[derive(Serialize, Deserialize, Default)]
pub struct PopcornWorker {
    #[serde(skip)]
    store: Option<Box<dyn KeyValueStore>>,

    #[serde(skip)]
    watched: Option<WatchedList>,
}

impl PopcornWorker {
    /// Creates a worker that persists into `store` instead of the data directory.
    #[must_use]
    pub fn with_store(store: Box<dyn KeyValueStore>) -> Self {
        Self {
            store: Some(store),
            watched: None,
        }
    }

    fn open_default_store() -> Result<Box<dyn KeyValueStore>> {
        Ok(Box::new(JsonFileStore::new(paths::get_data_dir())?))
    }

    /// Returns the list for `storage_key`, loading it on first use or when the key changes.
    fn watched_list(&mut self, storage_key: &str) -> Result<&mut WatchedList> {
        let reload = self
            .watched
            .as_ref()
            .map_or(true, |list| list.key() != storage_key);

        if reload {
            let store = match (self.watched.take(), self.store.take()) {
                (Some(list), _) => list.into_store(),
                (None, Some(store)) => store,
                (None, None) => Self::open_default_store()?,
            };
            self.watched = Some(PersistentList::load(store, storage_key, WatchedCollection::default()));
        }

        self.watched
            .as_mut()
            .ok_or_else(|| PopcornError::Worker("watched list not initialized".to_string()))
    }

    /// Logs and converts a storage result into a response.
    fn respond<T, F>(operation: &str, result: Result<T>, on_success: F) -> WorkerResponse
    where
        F: FnOnce(T) -> WorkerResponse,
    {
        match result {
            Ok(value) => {
                tracing::debug!(operation = operation, "storage operation successful");
                on_success(value)
            }
            Err(e) => {
                tracing::warn!(operation = operation, error = %e, "storage operation failed");
                WorkerResponse::Error {
                    message: format!("{operation}: {e}"),
                }
            }
        }
    }

    fn handle_load_watched(&mut self, storage_key: &str) -> WorkerResponse {
        Self::respond(
            "load watched list",
            self.watched_list(storage_key).map(|list| list.value().clone()),
            |entries| {
                tracing::debug!(count = entries.len(), "watched list loaded");
                WorkerResponse::WatchedLoaded { entries }
            },
        )
    }

    fn handle_save_watched(&mut self, entries: WatchedCollection) -> WorkerResponse {
        let count = entries.len();
        let storage_key = self
            .watched
            .as_ref()
            .map_or_else(|| DEFAULT_STORAGE_KEY.to_string(), |list| list.key().to_string());

        Self::respond(
            "save watched list",
            self.watched_list(&storage_key).and_then(|list| list.set(entries)),
            |()| WorkerResponse::WatchedSaved { count },
        )
    }

    /// Attaches the caller's trace context so worker spans join its trace.
    ///
    /// The returned guard must be held for the duration of the operation.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_context = message.trace_context()?;
        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(trace_id, span_id, TraceFlags::SAMPLED, true, TraceState::default());
        let otel_context = opentelemetry::Context::current().with_remote_span_context(span_context);

        Some(otel_context.attach())
    }

    /// Processes one request and returns the response to post back.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = Self::attach_parent_trace_context(&message);

        let span = tracing::debug_span!("worker_handle_message");
        let _guard = span.entered();

        match message {
            WorkerMessage::LoadWatched { storage_key, .. } => self.handle_load_watched(&storage_key),
            WorkerMessage::SaveWatched { entries, .. } => self.handle_save_watched(entries),
        }
    }
}

static WORKER_TRACING_INITIALIZED: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(false);

impl ZellijWorker<'_> for PopcornWorker {
    /// Entry point for messages from the plugin thread.
    ///
    /// `message` is the routing name echoed back with the response; `payload`
    /// is a JSON [`WorkerMessage`].
    fn on_message(&mut self, message: String, payload: String) {
        if !WORKER_TRACING_INITIALIZED.swap(true, std::sync::atomic::Ordering::Relaxed) {
            crate::observability::init_tracing(&crate::Config::default());
        }

        let worker_message: WorkerMessage = match serde_json::from_str(&payload) {
            Ok(msg) => msg,
            Err(e) => {
                tracing::warn!(error = %e, "failed to deserialize worker message");
                return;
            }
        };

        let response = self.handle_message(worker_message);

        match serde_json::to_string(&response) {
            Ok(payload) => post_message_to_plugin(PluginMessage {
                name: message,
                payload,
                worker_name: None,
            }),
            Err(e) => tracing::warn!(error = %e, "failed to serialize worker response"),
        }
    }
}
