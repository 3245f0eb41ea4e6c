//! Domain layer for the Popcorn plugin.
//!
//! Core types independent of Zellij APIs and of the OMDb wire format.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`movie`]: Search hits, full movie details, and the 1–10 rating type
//! - [`watched`]: Watched entries and the ordered watched collection

pub mod error;
pub mod movie;
pub mod watched;

pub use error::{FetchError, PopcornError, Result};
pub use movie::{MovieDetails, MovieSummary, Rating, MAX_RATING, MIN_RATING};
pub use watched::{WatchedCollection, WatchedEntry, WatchedSummary};
