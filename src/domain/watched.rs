//! The user's watched collection.
//!
//! A [`WatchedEntry`] is a frozen snapshot of a [`MovieDetails`] plus the
//! user's rating, taken at the moment the rating is confirmed. The
//! [`WatchedCollection`] keeps entries in insertion order, which is also the
//! display order. It is append/remove only and does not deduplicate ids: adding
//! the same title twice keeps both entries.

use super::movie::{MovieDetails, Rating};
use serde::{Deserialize, Serialize};

/// A rated movie in the watched collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchedEntry {
    pub id: String,
    pub title: String,
    pub year: String,
    pub poster_url: String,
    pub runtime_minutes: Option<u32>,
    pub external_rating: Option<f32>,
    pub user_rating: Rating,
    /// How many times the pending rating changed before it was confirmed.
    #[serde(default)]
    pub rating_revision_count: u32,
}

impl WatchedEntry {
    /// Snapshots `details` together with the confirmed rating.
    ///
    /// # Examples
    ///
    /// ```
    /// use popcorn::domain::{MovieDetails, Rating, WatchedEntry};
    ///
    /// let details = MovieDetails {
    ///     id: "tt0133093".into(),
    ///     title: "The Matrix".into(),
    ///     year: "1999".into(),
    ///     poster_url: String::new(),
    ///     runtime_minutes: Some(136),
    ///     external_rating: Some(8.7),
    ///     plot: String::new(),
    ///     release_date: String::new(),
    ///     cast: String::new(),
    ///     director: String::new(),
    ///     genre: String::new(),
    /// };
    /// let entry = WatchedEntry::from_details(&details, Rating::new(9).unwrap(), 2);
    /// assert_eq!(entry.id, "tt0133093");
    /// assert_eq!(entry.rating_revision_count, 2);
    /// ```
    #[must_use]
    pub fn from_details(details: &MovieDetails, user_rating: Rating, rating_revision_count: u32) -> Self {
        Self {
            id: details.id.clone(),
            title: details.title.clone(),
            year: details.year.clone(),
            poster_url: details.poster_url.clone(),
            runtime_minutes: details.runtime_minutes,
            external_rating: details.external_rating,
            user_rating,
            rating_revision_count,
        }
    }
}

/// Aggregates shown above the watched list.
#[derive(Debug, Clone, PartialEq)]
pub struct WatchedSummary {
    pub count: usize,
    pub avg_external_rating: f32,
    pub avg_user_rating: f32,
    pub avg_runtime_minutes: f32,
}

/// Ordered list of watched entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WatchedCollection {
    entries: Vec<WatchedEntry>,
}

impl WatchedCollection {
    #[must_use]
    pub const fn new(entries: Vec<WatchedEntry>) -> Self {
        Self { entries }
    }

    #[must_use]
    pub fn entries(&self) -> &[WatchedEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&WatchedEntry> {
        self.entries.get(index)
    }

    /// Appends `entry` at the end of the collection.
    pub fn push(&mut self, entry: WatchedEntry) {
        self.entries.push(entry);
    }

    /// Appends every entry of `other`, keeping its order.
    pub fn extend(&mut self, other: Self) {
        self.entries.extend(other.entries);
    }

    /// Removes every entry with the given id, preserving the order of the rest.
    ///
    /// Returns how many entries were removed.
    pub fn remove_by_id(&mut self, id: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        before - self.entries.len()
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    /// Returns the first stored entry for `id`.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&WatchedEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Computes count and averages. Unknown ratings and runtimes are skipped.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn summary(&self) -> WatchedSummary {
        WatchedSummary {
            count: self.entries.len(),
            avg_external_rating: average(self.entries.iter().filter_map(|e| e.external_rating)),
            avg_user_rating: average(self.entries.iter().map(|e| f32::from(e.user_rating.get()))),
            avg_runtime_minutes: average(self.entries.iter().filter_map(|e| e.runtime_minutes.map(|m| m as f32))),
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn average(values: impl Iterator<Item = f32>) -> f32 {
    let (sum, count) = values.fold((0.0_f32, 0_usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, rating: u8, runtime: Option<u32>, external: Option<f32>) -> WatchedEntry {
        WatchedEntry {
            id: id.to_string(),
            title: format!("Title {id}"),
            year: "2000".to_string(),
            poster_url: String::new(),
            runtime_minutes: runtime,
            external_rating: external,
            user_rating: Rating::new(rating).unwrap(),
            rating_revision_count: 1,
        }
    }

    #[test]
    fn remove_by_id_drops_all_duplicates_and_keeps_order() {
        let mut watched = WatchedCollection::new(vec![
            entry("a", 5, None, None),
            entry("b", 6, None, None),
            entry("a", 7, None, None),
            entry("c", 8, None, None),
        ]);

        assert_eq!(watched.remove_by_id("a"), 2);

        let ids: Vec<&str> = watched.entries().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c"]);
    }

    #[test]
    fn remove_by_unknown_id_is_a_no_op() {
        let mut watched = WatchedCollection::new(vec![entry("a", 5, None, None)]);
        assert_eq!(watched.remove_by_id("zzz"), 0);
        assert_eq!(watched.len(), 1);
    }

    #[test]
    fn push_keeps_duplicate_ids() {
        let mut watched = WatchedCollection::default();
        watched.push(entry("a", 5, None, None));
        watched.push(entry("a", 9, None, None));
        assert_eq!(watched.len(), 2);
        assert_eq!(watched.find("a").map(|e| e.user_rating.get()), Some(5));
    }

    #[test]
    fn summary_skips_unknown_values() {
        let watched = WatchedCollection::new(vec![
            entry("a", 10, Some(148), Some(8.8)),
            entry("b", 8, None, Some(8.4)),
            entry("c", 6, Some(100), None),
        ]);

        let summary = watched.summary();
        assert_eq!(summary.count, 3);
        assert!((summary.avg_user_rating - 8.0).abs() < f32::EPSILON);
        assert!((summary.avg_runtime_minutes - 124.0).abs() < f32::EPSILON);
        assert!((summary.avg_external_rating - 8.6).abs() < 1e-4);
    }

    #[test]
    fn empty_summary_is_all_zero() {
        let summary = WatchedCollection::default().summary();
        assert_eq!(summary.count, 0);
        assert!(summary.avg_user_rating.abs() < f32::EPSILON);
    }

    #[test]
    fn serializes_as_plain_array() {
        let watched = WatchedCollection::new(vec![entry("a", 5, Some(90), None)]);
        let json = serde_json::to_string(&watched).unwrap();
        assert!(json.starts_with('['));
        let back: WatchedCollection = serde_json::from_str(&json).unwrap();
        assert_eq!(back, watched);
    }
}
