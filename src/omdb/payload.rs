//! OMDb JSON response shapes.
//!
//! OMDb answers with HTTP 200 even when nothing matched; the `Response` field
//! (`"True"` / `"False"`) carries the real outcome. Unknown values are reported
//! as the string `"N/A"`, so numeric fields are parsed leniently.

use crate::domain::{FetchError, MovieDetails, MovieSummary};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SearchPayload {
    response: String,
    #[serde(default)]
    search: Vec<SearchHit>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SearchHit {
    #[serde(rename = "imdbID")]
    imdb_id: String,
    title: String,
    #[serde(default)]
    year: String,
    #[serde(default)]
    poster: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DetailsPayload {
    #[serde(default)]
    response: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(rename = "imdbID", default)]
    imdb_id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    year: String,
    #[serde(default)]
    poster: String,
    #[serde(default)]
    runtime: String,
    #[serde(rename = "imdbRating", default)]
    imdb_rating: String,
    #[serde(default)]
    plot: String,
    #[serde(default)]
    released: String,
    #[serde(default)]
    actors: String,
    #[serde(default)]
    director: String,
    #[serde(default)]
    genre: String,
}

fn reports_failure(response: &str) -> bool {
    response.eq_ignore_ascii_case("false")
}

/// Parses a search response body into result rows.
///
/// # Errors
///
/// - [`FetchError::Malformed`] if the body is not the expected JSON
/// - [`FetchError::NoResults`] if OMDb reports `Response: "False"`
///
/// # Examples
///
/// ```
/// use popcorn::omdb::parse_search;
///
/// let body = br#"{"Search":[{"Title":"Inception","Year":"2010","imdbID":"tt1375666","Poster":"N/A"}],"Response":"True"}"#;
/// let results = parse_search(body).unwrap();
/// assert_eq!(results[0].title, "Inception");
/// ```
pub fn parse_search(body: &[u8]) -> Result<Vec<MovieSummary>, FetchError> {
    let payload: SearchPayload = serde_json::from_slice(body).map_err(|e| {
        tracing::debug!(error = %e, "search payload is not valid JSON");
        FetchError::Malformed
    })?;

    if reports_failure(&payload.response) {
        tracing::debug!(reason = ?payload.error, "search reported no results");
        return Err(FetchError::NoResults);
    }

    Ok(payload
        .search
        .into_iter()
        .map(|hit| MovieSummary {
            id: hit.imdb_id,
            title: hit.title,
            year: hit.year,
            poster_url: hit.poster,
        })
        .collect())
}

/// Parses a details response body.
///
/// # Errors
///
/// - [`FetchError::Malformed`] if the body is not the expected JSON
/// - [`FetchError::NoResults`] if OMDb reports `Response: "False"` (unknown id)
pub fn parse_details(body: &[u8]) -> Result<MovieDetails, FetchError> {
    let payload: DetailsPayload = serde_json::from_slice(body).map_err(|e| {
        tracing::debug!(error = %e, "details payload is not valid JSON");
        FetchError::Malformed
    })?;

    if payload.response.as_deref().is_some_and(reports_failure) {
        tracing::debug!(reason = ?payload.error, "details lookup reported failure");
        return Err(FetchError::NoResults);
    }

    Ok(MovieDetails {
        id: payload.imdb_id,
        title: payload.title,
        year: payload.year,
        poster_url: payload.poster,
        runtime_minutes: parse_runtime(&payload.runtime),
        external_rating: payload.imdb_rating.trim().parse().ok(),
        plot: payload.plot,
        release_date: payload.released,
        cast: payload.actors,
        director: payload.director,
        genre: payload.genre,
    })
}

/// `"148 min"` → `Some(148)`, `"N/A"` → `None`.
fn parse_runtime(runtime: &str) -> Option<u32> {
    runtime.split_whitespace().next()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const INCEPTION: &[u8] = br#"{
        "Title": "Inception", "Year": "2010", "Rated": "PG-13",
        "Released": "16 Jul 2010", "Runtime": "148 min",
        "Genre": "Action, Adventure, Sci-Fi", "Director": "Christopher Nolan",
        "Actors": "Leonardo DiCaprio, Joseph Gordon-Levitt, Elliot Page",
        "Plot": "A thief who steals corporate secrets...",
        "Poster": "https://m.media-amazon.com/images/M/inception.jpg",
        "imdbRating": "8.8", "imdbID": "tt1375666", "Response": "True"
    }"#;

    #[test]
    fn search_false_response_maps_to_no_results() {
        let body = br#"{"Response":"False","Error":"Movie not found!"}"#;
        assert_eq!(parse_search(body), Err(FetchError::NoResults));
    }

    #[test]
    fn search_garbage_maps_to_malformed() {
        assert_eq!(parse_search(b"<html>502</html>"), Err(FetchError::Malformed));
    }

    #[test]
    fn search_hits_keep_server_order() {
        let body = br#"{"Search":[
            {"Title":"The Matrix","Year":"1999","imdbID":"tt0133093","Poster":"a.jpg"},
            {"Title":"The Matrix Reloaded","Year":"2003","imdbID":"tt0234215","Poster":"b.jpg"}
        ],"totalResults":"2","Response":"True"}"#;

        let results = parse_search(body).unwrap();
        let ids: Vec<&str> = results.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["tt0133093", "tt0234215"]);
        assert_eq!(results[1].poster_url, "b.jpg");
    }

    #[test]
    fn details_parse_numeric_fields() {
        let details = parse_details(INCEPTION).unwrap();
        assert_eq!(details.id, "tt1375666");
        assert_eq!(details.runtime_minutes, Some(148));
        assert_eq!(details.external_rating, Some(8.8));
        assert_eq!(details.cast, "Leonardo DiCaprio, Joseph Gordon-Levitt, Elliot Page");
        assert_eq!(details.release_date, "16 Jul 2010");
    }

    #[test]
    fn details_tolerate_not_available_values() {
        let body = br#"{"Title":"Obscure","imdbID":"tt9999999","Runtime":"N/A","imdbRating":"N/A","Response":"True"}"#;
        let details = parse_details(body).unwrap();
        assert_eq!(details.runtime_minutes, None);
        assert_eq!(details.external_rating, None);
        assert!(details.plot.is_empty());
    }

    #[test]
    fn details_unknown_id_maps_to_no_results() {
        let body = br#"{"Response":"False","Error":"Incorrect IMDb ID."}"#;
        assert_eq!(parse_details(body), Err(FetchError::NoResults));
    }
}
