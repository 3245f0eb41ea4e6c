//! OMDb endpoint description and wire format.
//!
//! Popcorn talks to exactly one external service, the OMDb API. Both lookups
//! are plain `GET` requests against the same base URL:
//!
//! - search: `?apikey=<key>&s=<title fragment>`
//! - details: `?apikey=<key>&i=<imdb id>`
//!
//! # Modules
//!
//! - [`endpoint`]: URL construction for both lookups
//! - [`payload`]: JSON response shapes and conversion into domain types

pub mod endpoint;
pub mod payload;

pub use endpoint::{OmdbEndpoint, DEFAULT_API_URL};
pub use payload::{parse_details, parse_search};
