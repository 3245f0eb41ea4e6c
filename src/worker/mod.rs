//! Background worker for watched-list persistence.
//!
//! Filesystem I/O runs on a Zellij worker thread so the plugin's render loop
//! never blocks on disk.
//!
//! # Architecture
//!
//! - `messages`: Request/response protocol with trace context propagation
//! - `handler`: Worker implementation and message processing logic

pub mod handler;
pub mod messages;

pub use handler::PopcornWorker;
pub use messages::{TraceContext, WorkerMessage, WorkerResponse};

/// Name the worker is registered and addressed under.
pub const WORKER_NAME: &str = "popcorn";
