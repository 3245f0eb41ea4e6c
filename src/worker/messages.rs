//! Plugin/worker message protocol.
//!
//! The plugin thread never touches the filesystem: it posts [`WorkerMessage`]s
//! as JSON and receives [`WorkerResponse`]s back as custom message events. Each
//! request carries the caller's trace context so worker spans join the same
//! trace.

use crate::domain::WatchedCollection;
use serde::{Deserialize, Serialize};

/// Trace and parent span ids, serialized alongside a worker request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across threads.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the trace and span ids of the active span.
    ///
    /// Returns `None` outside an exported span (for example when tracing is
    /// not initialized).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use popcorn::worker::TraceContext;
    ///
    /// if let Some(ctx) = TraceContext::from_current() {
    ///     println!("trace {}", ctx.trace_id);
    /// }
    /// ```
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let span = tracing::Span::current();

        let otel_context = span.context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }
}

/// Generates `WorkerMessage` constructors that attach the current trace context.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " message with current trace context")]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    load_watched(LoadWatched { storage_key: String }),
    save_watched(SaveWatched { entries: WatchedCollection }),
}

/// Messages sent from the plugin thread to the storage worker.
///
/// All variants include an optional trace context for distributed tracing
/// support.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Read the watched list once, opening the store under `storage_key`.
    LoadWatched {
        /// Key the watched list is stored under.
        storage_key: String,

        /// Trace context for linking spans across threads.
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Replace the stored watched list with `entries`.
    SaveWatched {
        /// The complete watched list after the change.
        entries: WatchedCollection,

        /// Trace context for linking spans across threads.
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    /// The trace context carried by any variant.
    #[must_use]
    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::LoadWatched { trace_context, .. } | Self::SaveWatched { trace_context, .. } => {
                trace_context.as_ref()
            }
        }
    }
}

/// Responses sent from the worker back to the plugin thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// The stored watched list (or the empty default).
    WatchedLoaded {
        entries: WatchedCollection,
    },

    /// The watched list was written back.
    WatchedSaved {
        /// Number of entries now stored.
        count: usize,
    },

    /// An error occurred during the worker operation.
    Error {
        /// Human-readable error message.
        message: String,
    },
}
