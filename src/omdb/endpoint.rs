//! URL construction for the OMDb search and details lookups.

/// Public OMDb API root.
pub const DEFAULT_API_URL: &str = "https://www.omdbapi.com/";

/// Where and with which key to query OMDb.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OmdbEndpoint {
    base_url: String,
    api_key: String,
}

impl OmdbEndpoint {
    #[must_use]
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Builds the title search URL.
    ///
    /// # Examples
    ///
    /// ```
    /// use popcorn::omdb::OmdbEndpoint;
    ///
    /// let endpoint = OmdbEndpoint::new("https://www.omdbapi.com/", "k3y");
    /// assert_eq!(
    ///     endpoint.search_url("star wars"),
    ///     "https://www.omdbapi.com/?apikey=k3y&s=star%20wars"
    /// );
    /// ```
    #[must_use]
    pub fn search_url(&self, query: &str) -> String {
        self.url_with("s", query)
    }

    /// Builds the single-title details URL.
    #[must_use]
    pub fn details_url(&self, imdb_id: &str) -> String {
        self.url_with("i", imdb_id)
    }

    fn url_with(&self, param: &str, value: &str) -> String {
        let separator = if self.base_url.contains('?') { '&' } else { '?' };
        format!(
            "{}{separator}apikey={}&{param}={}",
            self.base_url,
            urlencoding::encode(&self.api_key),
            urlencoding::encode(value)
        )
    }
}

impl Default for OmdbEndpoint {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL, String::new())
    }
}
