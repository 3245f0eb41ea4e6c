//! Movie domain models.
//!
//! [`MovieSummary`] is one row of a search result, [`MovieDetails`] is the full
//! record shown in the details pane, and [`Rating`] is a validated 1–10 user
//! score. None of these carry local identity beyond the external IMDb id.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowest score the star rating accepts.
pub const MIN_RATING: u8 = 1;

/// Highest score the star rating accepts.
pub const MAX_RATING: u8 = 10;

/// One search hit, sourced fresh on every search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: String,
    pub title: String,
    pub year: String,
    pub poster_url: String,
}

/// Full record for a single title, fetched on demand per selection.
///
/// Numeric fields are `None` when the database reports them as unknown
/// (`"N/A"`), which is common for obscure or unreleased titles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetails {
    pub id: String,
    pub title: String,
    pub year: String,
    pub poster_url: String,
    pub runtime_minutes: Option<u32>,
    pub external_rating: Option<f32>,
    pub plot: String,
    pub release_date: String,
    pub cast: String,
    pub director: String,
    pub genre: String,
}

impl MovieDetails {
    /// Returns the runtime as it appears in the details header (`"148 min"`).
    #[must_use]
    pub fn runtime_label(&self) -> String {
        self.runtime_minutes
            .map_or_else(|| "N/A".to_string(), |minutes| format!("{minutes} min"))
    }
}

/// A user score between [`MIN_RATING`] and [`MAX_RATING`] inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    /// One star.
    pub const LOWEST: Self = Self(MIN_RATING);

    /// Ten stars.
    pub const HIGHEST: Self = Self(MAX_RATING);

    /// Creates a rating, returning `None` when `value` is outside 1–10.
    ///
    /// # Examples
    ///
    /// ```
    /// use popcorn::domain::Rating;
    ///
    /// assert_eq!(Rating::new(7).map(Rating::get), Some(7));
    /// assert!(Rating::new(0).is_none());
    /// assert!(Rating::new(11).is_none());
    /// ```
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value >= MIN_RATING && value <= MAX_RATING {
            Some(Self(value))
        } else {
            None
        }
    }

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// One star more, saturating at [`MAX_RATING`].
    #[must_use]
    pub const fn increment(self) -> Self {
        if self.0 >= MAX_RATING {
            self
        } else {
            Self(self.0 + 1)
        }
    }

    /// One star less, saturating at [`MIN_RATING`].
    #[must_use]
    pub const fn decrement(self) -> Self {
        if self.0 <= MIN_RATING {
            self
        } else {
            Self(self.0 - 1)
        }
    }
}

impl TryFrom<u8> for Rating {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("rating {value} is outside {MIN_RATING}-{MAX_RATING}"))
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
