//! Full-record lookup for the selected title.

use super::{FetchRequest, FetchResponse, InFlight, RequestKind};
use crate::domain::{FetchError, MovieDetails};
use crate::omdb::{parse_details, OmdbEndpoint};

/// Loads [`MovieDetails`] for one IMDb id at a time.
///
/// Details are never cached: selecting a title always clears what was shown
/// before and issues a fresh request. A response is committed only if it
/// answers the latest request for the id that is still selected.
#[derive(Debug, Default)]
pub struct DetailsFetcher {
    endpoint: OmdbEndpoint,
    next_id: u64,
    movie_id: Option<String>,
    in_flight: Option<InFlight>,
    details: Option<MovieDetails>,
    is_loading: bool,
    error: Option<FetchError>,
}

impl DetailsFetcher {
    #[must_use]
    pub fn new(endpoint: OmdbEndpoint) -> Self {
        Self {
            endpoint,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn movie_id(&self) -> Option<&str> {
        self.movie_id.as_deref()
    }

    #[must_use]
    pub const fn details(&self) -> Option<&MovieDetails> {
        self.details.as_ref()
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.is_loading
    }

    #[must_use]
    pub const fn error(&self) -> Option<&FetchError> {
        self.error.as_ref()
    }

    /// Title of the loaded details, if there is a non-empty one.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.details
            .as_ref()
            .map(|details| details.title.as_str())
            .filter(|title| !title.is_empty())
    }

    /// Starts loading `movie_id`, discarding whatever was shown before.
    pub fn select(&mut self, movie_id: &str) -> FetchRequest {
        let _span = tracing::debug_span!("details_select", movie_id = %movie_id).entered();

        self.cancel();
        self.next_id += 1;

        let request = FetchRequest {
            id: self.next_id,
            kind: RequestKind::Details,
            url: self.endpoint.details_url(movie_id),
        };

        self.movie_id = Some(movie_id.to_string());
        self.in_flight = Some(InFlight::new(request.id));
        self.details = None;
        self.error = None;
        self.is_loading = true;

        tracing::debug!(request_id = request.id, "details request issued");
        request
    }

    /// Forgets the selection. Any response still on its way is dropped.
    pub fn clear(&mut self) {
        self.cancel();
        self.movie_id = None;
        self.details = None;
        self.error = None;
    }

    fn cancel(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            in_flight.token.cancel();
        }
        self.is_loading = false;
    }

    /// Applies a details response. Returns whether it was committed.
    pub fn complete(&mut self, response: &FetchResponse) -> bool {
        let _span = tracing::debug_span!("details_complete", request_id = response.id, status = response.status).entered();

        if !self.in_flight.as_ref().is_some_and(|in_flight| in_flight.accepts(response)) {
            tracing::debug!(selected = ?self.movie_id, "discarding stale details response");
            return false;
        }

        self.in_flight = None;
        self.is_loading = false;

        let outcome = if response.is_success() {
            parse_details(&response.body)
        } else {
            Err(FetchError::Transport)
        };

        match outcome {
            Ok(mut details) if self.movie_id.as_deref() == Some(details.id.as_str()) || details.id.is_empty() => {
                // payloads without an imdbID belong to the selected title
                if let (true, Some(movie_id)) = (details.id.is_empty(), &self.movie_id) {
                    details.id.clone_from(movie_id);
                }
                tracing::debug!(title = %details.title, "details committed");
                self.details = Some(details);
            }
            Ok(details) => {
                tracing::warn!(received = %details.id, selected = ?self.movie_id, "details answered for another id");
                self.error = Some(FetchError::Malformed);
            }
            Err(error) => {
                tracing::debug!(error = %error, "details lookup failed");
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

    fn body(id: &str, title: &str) -> Vec<u8> {
        format!(r#"{{"imdbID":"{id}","Title":"{title}","Year":"2010","Runtime":"148 min","imdbRating":"8.8","Response":"True"}}"#)
            .into_bytes()
    }

    fn respond(request: &FetchRequest, status: u16, body: Vec<u8>) -> FetchResponse {
        FetchResponse {
            id: request.id,
            kind: RequestKind::Details,
            status,
            body,
        }
    }

    fn fetcher() -> DetailsFetcher {
        DetailsFetcher::new(OmdbEndpoint::new(DEFAULT_API_URL, "test"))
    }

    #[test]
    fn select_targets_i_parameter_and_starts_loading() {
        let mut fetcher = fetcher();
        let request = fetcher.select("tt1375666");
        assert!(request.url.ends_with("&i=tt1375666"));
        assert!(fetcher.is_loading());
        assert!(fetcher.details().is_none());
        assert_eq!(fetcher.movie_id(), Some("tt1375666"));
    }

    #[test]
    fn response_for_current_selection_commits() {
        let mut fetcher = fetcher();
        let request = fetcher.select("tt1375666");
        assert!(fetcher.complete(&respond(&request, 200, body("tt1375666", "Inception"))));
        assert_eq!(fetcher.title(), Some("Inception"));
        assert!(!fetcher.is_loading());
    }

    #[test]
    fn stale_response_after_switch_is_dropped() {
        let mut fetcher = fetcher();
        let first = fetcher.select("tt1375666");
        let _second = fetcher.select("tt0133093");

        assert!(!fetcher.complete(&respond(&first, 200, body("tt1375666", "Inception"))));
        assert!(fetcher.details().is_none());
        assert!(fetcher.is_loading());
    }

    #[test]
    fn reselect_clears_previous_details() {
        let mut fetcher = fetcher();
        let request = fetcher.select("tt1375666");
        fetcher.complete(&respond(&request, 200, body("tt1375666", "Inception")));

        fetcher.select("tt0133093");
        assert!(fetcher.details().is_none());
        assert_eq!(fetcher.title(), None);
    }

    #[test]
    fn payload_without_id_takes_the_selected_id() {
        let mut fetcher = fetcher();
        let request = fetcher.select("tt1");
        let body = br#"{"Title":"NoId","Runtime":"90 min","Response":"True"}"#.to_vec();

        assert!(fetcher.complete(&respond(&request, 200, body)));
        assert_eq!(fetcher.details().map(|d| d.id.as_str()), Some("tt1"));
        assert_eq!(fetcher.title(), Some("NoId"));
    }

    #[test]
    fn transport_failure_is_reported() {
        let mut fetcher = fetcher();
        let request = fetcher.select("tt1375666");
        fetcher.complete(&respond(&request, 500, Vec::new()));
        assert_eq!(fetcher.error(), Some(&FetchError::Transport));
        assert!(!fetcher.is_loading());
    }

    #[test]
    fn clear_drops_in_flight_response() {
        let mut fetcher = fetcher();
        let request = fetcher.select("tt1375666");
        fetcher.clear();
        assert!(!fetcher.complete(&respond(&request, 200, body("tt1375666", "Inception"))));
        assert_eq!(fetcher.movie_id(), None);
    }
}
