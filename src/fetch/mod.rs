//! Request/response plumbing for the two OMDb lookups.
//!
//! Zellij delivers HTTP responses asynchronously as `WebRequestResult` events,
//! carrying back whatever context map was attached to the request. Popcorn
//! stores the request kind and a per-fetcher request id in that map, so that a
//! response can be routed to its fetcher and matched against the request that
//! is currently in flight.
//!
//! # Modules
//!
//! - [`cancel`]: Cancellation token for superseded requests
//! - [`search`]: Search-as-you-type fetcher
//! - [`details`]: Single-title details fetcher

pub mod cancel;
pub mod details;
pub mod search;

pub use cancel::CancellationToken;
pub use details::DetailsFetcher;
pub use search::{SearchFetcher, MIN_QUERY_CHARS};

use std::collections::BTreeMap;
use std::fmt;

/// Context key holding the request id.
pub const CONTEXT_REQUEST_ID: &str = "popcorn_request_id";

/// Context key holding the request kind.
pub const CONTEXT_KIND: &str = "popcorn_request_kind";

/// Which lookup a request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Search,
    Details,
}

impl RequestKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Details => "details",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "search" => Some(Self::Search),
            "details" => Some(Self::Details),
            _ => None,
        }
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An outgoing `GET` request, ready to hand to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub id: u64,
    pub kind: RequestKind,
    pub url: String,
}

impl FetchRequest {
    /// Context map to attach to the web request so the response can be routed back.
    #[must_use]
    pub fn context(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            (CONTEXT_REQUEST_ID.to_string(), self.id.to_string()),
            (CONTEXT_KIND.to_string(), self.kind.as_str().to_string()),
        ])
    }
}

/// A completed HTTP exchange, already routed by kind and id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub id: u64,
    pub kind: RequestKind,
    pub status: u16,
    pub body: Vec<u8>,
}

impl FetchResponse {
    /// Rebuilds a response from the host event fields.
    ///
    /// Returns `None` when the context does not identify one of our requests.
    #[must_use]
    pub fn from_context(status: u16, body: Vec<u8>, context: &BTreeMap<String, String>) -> Option<Self> {
        let id = context.get(CONTEXT_REQUEST_ID)?.parse().ok()?;
        let kind = RequestKind::parse(context.get(CONTEXT_KIND)?)?;
        Some(Self { id, kind, status, body })
    }

    /// Whether the status is in the 2xx range.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The request currently allowed to commit, with its cancellation handle.
#[derive(Debug, Clone)]
pub(crate) struct InFlight {
    pub(crate) id: u64,
    pub(crate) token: CancellationToken,
}

impl InFlight {
    pub(crate) fn new(id: u64) -> Self {
        Self {
            id,
            token: CancellationToken::new(),
        }
    }

    /// True when `response` answers this request and nobody cancelled it.
    pub(crate) fn accepts(&self, response: &FetchResponse) -> bool {
        self.id == response.id && !self.token.is_cancelled()
    }
}
