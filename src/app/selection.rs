//! Selection and rating workflow.
//!
//! ```text
//!            select(id)                 select(other)
//! Browsing ─────────────▶ Viewing(id) ─────────────▶ Viewing(other)
//!    ▲                        │
//!    └── close / Escape / ────┘
//!        select(id) again /
//!        confirm
//! ```
//!
//! While viewing a title that is not yet watched, the user picks a pending
//! rating; every actual change of that value is counted, and the count is
//! frozen into the entry on confirm.

use crate::domain::{MovieDetails, Rating, WatchedCollection, WatchedEntry};

/// What [`Selection::select`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectOutcome {
    Opened,
    Switched,
    /// The same id was selected again and the details view closed.
    Closed,
}

/// Local state of the details view for one title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewing {
    movie_id: String,
    pending_rating: Option<Rating>,
    rating_revisions: u32,
}

impl Viewing {
    fn new(movie_id: &str) -> Self {
        Self {
            movie_id: movie_id.to_string(),
            pending_rating: None,
            rating_revisions: 0,
        }
    }

    #[must_use]
    pub fn movie_id(&self) -> &str {
        &self.movie_id
    }

    #[must_use]
    pub const fn pending_rating(&self) -> Option<Rating> {
        self.pending_rating
    }

    #[must_use]
    pub const fn rating_revisions(&self) -> u32 {
        self.rating_revisions
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    Browsing,
    Viewing(Viewing),
}

impl Selection {
    #[must_use]
    pub const fn viewing(&self) -> Option<&Viewing> {
        match self {
            Self::Browsing => None,
            Self::Viewing(viewing) => Some(viewing),
        }
    }

    #[must_use]
    pub fn selected_id(&self) -> Option<&str> {
        self.viewing().map(Viewing::movie_id)
    }

    #[must_use]
    pub const fn is_viewing(&self) -> bool {
        matches!(self, Self::Viewing(_))
    }

    /// Toggles or switches the selection to `movie_id`.
    ///
    /// # Examples
    ///
    /// ```
    /// use popcorn::app::selection::{SelectOutcome, Selection};
    ///
    /// let mut selection = Selection::default();
    /// assert_eq!(selection.select("tt1"), SelectOutcome::Opened);
    /// assert_eq!(selection.select("tt2"), SelectOutcome::Switched);
    /// assert_eq!(selection.select("tt2"), SelectOutcome::Closed);
    /// assert!(!selection.is_viewing());
    /// ```
    pub fn select(&mut self, movie_id: &str) -> SelectOutcome {
        let outcome = match self.selected_id() {
            Some(current) if current == movie_id => SelectOutcome::Closed,
            Some(_) => SelectOutcome::Switched,
            None => SelectOutcome::Opened,
        };

        *self = match outcome {
            SelectOutcome::Closed => Self::Browsing,
            SelectOutcome::Opened | SelectOutcome::Switched => Self::Viewing(Viewing::new(movie_id)),
        };

        outcome
    }

    /// Returns to browsing. Returns `false` if nothing was being viewed.
    pub fn close(&mut self) -> bool {
        let was_viewing = self.is_viewing();
        *self = Self::Browsing;
        was_viewing
    }

    /// Changes the pending rating. Returns `true` only if the value changed.
    pub fn set_pending_rating(&mut self, rating: Rating) -> bool {
        let Self::Viewing(viewing) = self else {
            return false;
        };

        if viewing.pending_rating == Some(rating) {
            return false;
        }

        viewing.pending_rating = Some(rating);
        viewing.rating_revisions += 1;
        true
    }

    /// Freezes the current title into a watched entry and returns to browsing.
    ///
    /// Returns `None` (and stays put) unless a rating was chosen, the loaded
    /// details belong to the selected id, and the title is not watched yet.
    pub fn confirm(&mut self, details: Option<&MovieDetails>, watched: &WatchedCollection) -> Option<WatchedEntry> {
        let viewing = self.viewing()?;
        let rating = viewing.pending_rating?;
        let details = details.filter(|details| details.id == viewing.movie_id)?;

        if watched.contains(&viewing.movie_id) {
            return None;
        }

        let entry = WatchedEntry::from_details(details, rating, viewing.rating_revisions);
        *self = Self::Browsing;
        Some(entry)
    }
}
