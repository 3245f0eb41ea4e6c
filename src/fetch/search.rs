//! Search-as-you-type over the OMDb title search.
//!
//! [`SearchFetcher`] owns the result list and its loading/error flags. Every
//! query change goes through [`SearchFetcher::set_query`], which either clears
//! the state (short queries) or supersedes the in-flight request with a new
//! one. Only the latest request may commit; anything else that comes back is
//! dropped without touching state.

use super::{FetchRequest, FetchResponse, InFlight, RequestKind};
use crate::domain::{FetchError, MovieSummary};
use crate::omdb::{parse_search, OmdbEndpoint};

/// Queries shorter than this never reach the network.
pub const MIN_QUERY_CHARS: usize = 3;

#[derive(Debug, Default)]
pub struct SearchFetcher {
    endpoint: OmdbEndpoint,
    next_id: u64,
    in_flight: Option<InFlight>,
    results: Vec<MovieSummary>,
    is_loading: bool,
    error: Option<FetchError>,
}

impl SearchFetcher {
    #[must_use]
    pub fn new(endpoint: OmdbEndpoint) -> Self {
        Self {
            endpoint,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn results(&self) -> &[MovieSummary] {
        &self.results
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.is_loading
    }

    #[must_use]
    pub const fn error(&self) -> Option<&FetchError> {
        self.error.as_ref()
    }

    /// Id of the request allowed to commit, if any.
    #[must_use]
    pub fn in_flight_id(&self) -> Option<u64> {
        self.in_flight.as_ref().map(|in_flight| in_flight.id)
    }

    /// Reacts to a new query.
    ///
    /// # Parameters
    ///
    /// * `query` - The full text of the search box
    ///
    /// # Returns
    ///
    /// The request to issue, or `None` when the query is too short. In both
    /// cases any previous in-flight request is cancelled first.
    ///
    /// # Examples
    ///
    /// ```
    /// use popcorn::fetch::SearchFetcher;
    /// use popcorn::omdb::OmdbEndpoint;
    ///
    /// let mut fetcher = SearchFetcher::new(OmdbEndpoint::new("https://www.omdbapi.com/", "k"));
    /// assert!(fetcher.set_query("in").is_none());
    /// let request = fetcher.set_query("inception").unwrap();
    /// assert!(request.url.ends_with("&s=inception"));
    /// assert!(fetcher.is_loading());
    /// ```
    pub fn set_query(&mut self, query: &str) -> Option<FetchRequest> {
        let _span = tracing::debug_span!("search_set_query", query_len = query.len()).entered();

        self.cancel();

        if query.chars().count() < MIN_QUERY_CHARS {
            tracing::debug!("query below minimum length, clearing results");
            self.results.clear();
            self.error = None;
            self.is_loading = false;
            return None;
        }

        self.next_id += 1;
        let request = FetchRequest {
            id: self.next_id,
            kind: RequestKind::Search,
            url: self.endpoint.search_url(query),
        };

        self.in_flight = Some(InFlight::new(request.id));
        self.is_loading = true;
        self.error = None;

        tracing::debug!(request_id = request.id, "search request issued");
        Some(request)
    }

    /// Cancels the in-flight request, if any, and stops loading.
    ///
    /// Results and error are left as they were.
    pub fn cancel(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            tracing::debug!(request_id = in_flight.id, "cancelling search request");
            in_flight.token.cancel();
        }
        self.is_loading = false;
    }

    /// Applies a search response.
    ///
    /// Returns `true` when the response was for the current request and its
    /// outcome was committed, `false` when it was stale and dropped.
    pub fn complete(&mut self, response: &FetchResponse) -> bool {
        let _span = tracing::debug_span!("search_complete", request_id = response.id, status = response.status).entered();

        match &self.in_flight {
            Some(in_flight) if in_flight.accepts(response) => {}
            _ => {
                tracing::debug!(current = ?self.in_flight_id(), "discarding superseded search response");
                return false;
            }
        }

        self.in_flight = None;
        self.is_loading = false;

        let outcome = if response.is_success() {
            parse_search(&response.body)
        } else {
            Err(FetchError::Transport)
        };

        match outcome {
            Ok(results) => {
                tracing::debug!(count = results.len(), "search results committed");
                self.results = results;
                self.error = None;
            }
            Err(error) => {
                tracing::debug!(error = %error, "search failed, keeping previous results");
                self.error = Some(error);
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::omdb::DEFAULT_API_URL;

    const INCEPTION_HITS: &[u8] = br#"{"Search":[
        {"Title":"Inception","Year":"2010","imdbID":"tt1375666","Poster":"p1"},
        {"Title":"Inception: The Cobol Job","Year":"2010","imdbID":"tt5295894","Poster":"p2"}
    ],"Response":"True"}"#;

    fn fetcher() -> SearchFetcher {
        SearchFetcher::new(OmdbEndpoint::new(DEFAULT_API_URL, "test"))
    }

    fn ok(request: &FetchRequest, body: &[u8]) -> FetchResponse {
        FetchResponse {
            id: request.id,
            kind: RequestKind::Search,
            status: 200,
            body: body.to_vec(),
        }
    }

    #[test]
    fn short_query_issues_nothing_and_clears_state() {
        let mut fetcher = fetcher();
        let request = fetcher.set_query("inception").unwrap();
        fetcher.complete(&ok(&request, INCEPTION_HITS));
        assert_eq!(fetcher.results().len(), 2);

        assert!(fetcher.set_query("in").is_none());
        assert!(fetcher.results().is_empty());
        assert!(fetcher.error().is_none());
        assert!(!fetcher.is_loading());
        assert_eq!(fetcher.in_flight_id(), None);
    }

    #[test]
    fn long_query_sets_loading_and_targets_s_parameter() {
        let mut fetcher = fetcher();
        let request = fetcher.set_query("inception").unwrap();
        assert!(fetcher.is_loading());
        assert!(fetcher.error().is_none());
        assert_eq!(request.kind, RequestKind::Search);
        assert_eq!(request.url, "https://www.omdbapi.com/?apikey=test&s=inception");
    }

    #[test]
    fn successful_response_replaces_results() {
        let mut fetcher = fetcher();
        let request = fetcher.set_query("inception").unwrap();
        assert!(fetcher.complete(&ok(&request, INCEPTION_HITS)));
        assert!(!fetcher.is_loading());
        assert_eq!(fetcher.results()[0].id, "tt1375666");
    }

    #[test]
    fn superseded_response_never_commits() {
        let mut fetcher = fetcher();
        let first = fetcher.set_query("inc").unwrap();
        let second = fetcher.set_query("inception").unwrap();

        assert!(!fetcher.complete(&ok(&first, INCEPTION_HITS)));
        assert!(fetcher.results().is_empty());
        assert!(fetcher.is_loading());

        assert!(fetcher.complete(&ok(&second, INCEPTION_HITS)));
        assert_eq!(fetcher.results().len(), 2);
    }

    #[test]
    fn response_after_short_query_is_dropped() {
        let mut fetcher = fetcher();
        let request = fetcher.set_query("matrix").unwrap();
        fetcher.set_query("ma");
        assert!(!fetcher.complete(&ok(&request, INCEPTION_HITS)));
        assert!(fetcher.results().is_empty());
    }

    #[test]
    fn transport_failure_keeps_previous_results() {
        let mut fetcher = fetcher();
        let request = fetcher.set_query("inception").unwrap();
        fetcher.complete(&ok(&request, INCEPTION_HITS));

        let retry = fetcher.set_query("inceptio").unwrap();
        let failed = FetchResponse {
            status: 502,
            ..ok(&retry, b"")
        };
        assert!(fetcher.complete(&failed));

        assert_eq!(fetcher.error(), Some(&FetchError::Transport));
        assert_eq!(fetcher.error().map(ToString::to_string).as_deref(), Some("Connection Lost..."));
        assert_eq!(fetcher.results().len(), 2);
        assert!(!fetcher.is_loading());
    }

    #[test]
    fn false_response_reports_movies_not_found() {
        let mut fetcher = fetcher();
        let request = fetcher.set_query("zzzzzzzz").unwrap();
        fetcher.complete(&ok(&request, br#"{"Response":"False","Error":"Movie not found!"}"#));

        assert_eq!(fetcher.error().map(ToString::to_string).as_deref(), Some("Movies not found!"));
        assert!(!fetcher.is_loading());
    }

    #[test]
    fn new_query_clears_previous_error() {
        let mut fetcher = fetcher();
        let request = fetcher.set_query("zzzzzzzz").unwrap();
        fetcher.complete(&ok(&request, br#"{"Response":"False"}"#));
        assert!(fetcher.error().is_some());

        fetcher.set_query("inception");
        assert!(fetcher.error().is_none());
    }

    #[test]
    fn explicit_cancel_drops_late_response() {
        let mut fetcher = fetcher();
        let request = fetcher.set_query("inception").unwrap();
        fetcher.cancel();
        assert!(!fetcher.is_loading());
        assert!(!fetcher.complete(&ok(&request, INCEPTION_HITS)));
        assert!(fetcher.results().is_empty());
        assert!(fetcher.error().is_none());
    }

    #[test]
    fn cancel_keeps_committed_results() {
        let mut fetcher = fetcher();
        let first = fetcher.set_query("inception").unwrap();
        fetcher.complete(&ok(&first, INCEPTION_HITS));
        let second = fetcher.set_query("inceptio").unwrap();

        fetcher.cancel();

        assert_eq!(fetcher.results().len(), 2);
        assert!(!fetcher.is_loading());
        assert!(!fetcher.complete(&ok(&second, INCEPTION_HITS)));
    }
}
