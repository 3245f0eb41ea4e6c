//! Side effects requested by the event handler.
//!
//! The handler never calls into Zellij directly. It returns a `Vec<Action>`
//! which the plugin runtime executes in order after each event.

use crate::fetch::FetchRequest;
use crate::worker::WorkerMessage;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Posts a message to the storage worker.
    PostToWorker(WorkerMessage),

    /// Issues an HTTP `GET` whose result comes back as a web request event.
    WebRequest(FetchRequest),

    /// Renames the plugin pane, the terminal counterpart of a window title.
    SetPaneTitle(String),
}
