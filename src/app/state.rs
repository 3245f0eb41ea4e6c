//! Application state and view model computation.
//!
//! [`AppState`] is the single source of truth for everything on screen: the
//! query, both fetchers, the selection workflow, the watched collection, focus
//! and pane state, and the global key bindings. The event handler mutates it
//! through the methods below; the renderer reads it through
//! [`AppState::compute_viewmodel`].

use super::bindings::{BindingGuard, BindingOwner, Key, KeyBindings};
use super::handler::Event;
use super::modes::{BoxState, Focus, PaneBox};
use super::selection::{SelectOutcome, Selection};
use super::Action;
use crate::domain::{Rating, WatchedCollection, WatchedEntry};
use crate::fetch::{DetailsFetcher, SearchFetcher};
use crate::omdb::OmdbEndpoint;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    DetailsView, FooterInfo, ListWindow, NavBarInfo, RatingView, ResultItem, ResultsView, SidePaneView,
    UIViewModel, WatchedItem, WatchedSummaryInfo, WatchedView,
};
use crate::worker::WorkerMessage;
use fuzzy_matcher::skim::SkimMatcherV2;

/// Pane title while no details are shown.
pub const APP_TITLE: &str = "usePopcorn";

/// Rows taken by the nav bar, box borders, and footer.
const CHROME_ROWS: usize = 8;

/// Rows taken by the watched summary block above the watched list.
const SUMMARY_ROWS: usize = 3;

#[derive(Debug)]
pub struct AppState {
    /// Text of the search box.
    pub query: String,
    pub focus: Focus,
    pub boxes: BoxState,
    pub search: SearchFetcher,
    pub details: DetailsFetcher,
    pub selection: Selection,
    /// Watched entries. Before the stored list arrives this holds only entries added this session.
    pub watched: WatchedCollection,
    pub watched_loaded: bool,
    pub bindings: KeyBindings<Event>,
    /// Highlighted row in the result list.
    pub results_index: usize,
    /// Highlighted row in the watched list.
    pub watched_index: usize,
    pub theme: Theme,
    pub storage_key: String,
    pub visible: bool,
    /// Last storage failure reported by the worker, shown in the footer.
    pub status: Option<String>,
    /// Set when the host refused web access; no search is issued afterwards.
    pub web_access_denied: bool,
    pane_title: Option<String>,
}

impl AppState {
    /// Creates the initial state and mounts the search box's `Enter` binding.
    ///
    /// # Examples
    ///
    /// ```
    /// use popcorn::app::AppState;
    /// use popcorn::omdb::OmdbEndpoint;
    /// use popcorn::ui::Theme;
    ///
    /// let state = AppState::new(OmdbEndpoint::default(), "watchedList", Theme::default());
    /// assert!(state.query.is_empty());
    /// assert!(!state.watched_loaded);
    /// ```
    #[must_use]
    pub fn new(endpoint: OmdbEndpoint, storage_key: impl Into<String>, theme: Theme) -> Self {
        let mut bindings = KeyBindings::default();
        bindings.bind(BindingOwner::SearchBox, Key::Enter, BindingGuard::SearchUnfocused, Event::FocusSearch);

        Self {
            query: String::new(),
            focus: Focus::SearchInput,
            boxes: BoxState::default(),
            search: SearchFetcher::new(endpoint.clone()),
            details: DetailsFetcher::new(endpoint),
            selection: Selection::default(),
            watched: WatchedCollection::default(),
            watched_loaded: false,
            bindings,
            results_index: 0,
            watched_index: 0,
            theme,
            storage_key: storage_key.into(),
            visible: true,
            status: None,
            web_access_denied: false,
            pane_title: None,
        }
    }

    /// Actions to run once the host has granted permissions: load the stored
    /// list and (re)apply the pane title.
    #[must_use]
    pub fn startup_actions(&mut self) -> Vec<Action> {
        let title = self.desired_title();
        self.pane_title = Some(title.clone());
        vec![
            Action::PostToWorker(WorkerMessage::load_watched(self.storage_key.clone())),
            Action::SetPaneTitle(title),
        ]
    }

    /// Replaces the query and reacts to it. Any open details view closes.
    pub fn set_query(&mut self, query: String) -> Vec<Action> {
        self.query = query;
        self.results_index = 0;
        self.close_details();
        self.rerun_search()
    }

    /// Re-issues the search for the current query, keeping the selection.
    pub fn rerun_search(&mut self) -> Vec<Action> {
        if self.web_access_denied {
            tracing::debug!("web access denied, not searching");
            return vec![];
        }
        self.search
            .set_query(&self.query)
            .map(Action::WebRequest)
            .into_iter()
            .collect()
    }

    /// Drops the pending search and stops issuing new ones.
    pub fn deny_web_access(&mut self) {
        self.web_access_denied = true;
        self.search.cancel();
        self.status = Some("Permissions denied: web access is required".to_string());
    }

    /// Toggles or switches the details view to `movie_id`.
    pub fn select_movie(&mut self, movie_id: &str) -> Vec<Action> {
        match self.selection.select(movie_id) {
            SelectOutcome::Closed => {
                tracing::debug!(movie_id = %movie_id, "re-selected open title, closing details");
                self.close_details();
                vec![]
            }
            SelectOutcome::Opened | SelectOutcome::Switched => {
                self.bindings
                    .bind(BindingOwner::DetailsPane, Key::Escape, BindingGuard::Always, Event::CloseDetails);
                vec![Action::WebRequest(self.details.select(movie_id))]
            }
        }
    }

    /// Closes the details view and unmounts its bindings.
    pub fn close_details(&mut self) -> bool {
        self.bindings.release_owner(BindingOwner::DetailsPane);
        self.details.clear();
        self.selection.close()
    }

    /// Whether the selected title is already in the watched collection.
    #[must_use]
    pub fn selected_is_watched(&self) -> bool {
        self.selection
            .selected_id()
            .is_some_and(|id| self.watched.contains(id))
    }

    /// Changes the pending rating unless the selected title is already watched.
    pub fn set_pending_rating(&mut self, rating: Rating) -> bool {
        if self.selected_is_watched() {
            return false;
        }
        self.selection.set_pending_rating(rating)
    }

    /// Steps the pending rating by one star. An unset rating starts at the low end.
    pub fn step_pending_rating(&mut self, up: bool) -> bool {
        let Some(viewing) = self.selection.viewing() else {
            return false;
        };

        let next = match (viewing.pending_rating(), up) {
            (Some(current), true) => current.increment(),
            (Some(current), false) => current.decrement(),
            (None, _) => Rating::LOWEST,
        };

        self.set_pending_rating(next)
    }

    /// Confirms the pending rating and appends the entry.
    pub fn confirm_rating(&mut self) -> Vec<Action> {
        let Some(entry) = self.selection.confirm(self.details.details(), &self.watched) else {
            tracing::debug!("confirm ignored, rating or details missing");
            return vec![];
        };

        tracing::debug!(movie_id = %entry.id, rating = %entry.user_rating, revisions = entry.rating_revision_count, "adding watched entry");
        self.close_details();
        self.add_watched(entry)
    }

    /// Appends `entry`, saving the whole list once the stored list is known.
    pub fn add_watched(&mut self, entry: WatchedEntry) -> Vec<Action> {
        self.watched.push(entry);
        self.save_actions()
    }

    /// Removes all entries with `movie_id`.
    pub fn delete_watched(&mut self, movie_id: &str) -> Vec<Action> {
        if self.watched.remove_by_id(movie_id) == 0 {
            return vec![];
        }
        self.watched_index = clamp_index(self.watched_index, self.watched.len());
        self.save_actions()
    }

    /// Merges the stored list with entries added before it arrived.
    pub fn apply_loaded(&mut self, mut stored: WatchedCollection) -> Vec<Action> {
        let added_early = std::mem::take(&mut self.watched);
        let needs_save = !added_early.is_empty();

        stored.extend(added_early);
        self.watched = stored;
        self.watched_loaded = true;
        self.watched_index = clamp_index(self.watched_index, self.watched.len());

        if needs_save {
            tracing::debug!("entries were added before load, saving merged list");
            self.save_actions()
        } else {
            vec![]
        }
    }

    fn save_actions(&self) -> Vec<Action> {
        if !self.watched_loaded {
            tracing::debug!("stored list not loaded yet, deferring save");
            return vec![];
        }
        vec![Action::PostToWorker(WorkerMessage::save_watched(self.watched.clone()))]
    }

    pub fn move_down(&mut self) {
        match self.focus {
            Focus::Results if self.results_listed() => {
                self.results_index = wrap_next(self.results_index, self.search.results().len());
            }
            Focus::SidePane if !self.selection.is_viewing() => {
                self.watched_index = wrap_next(self.watched_index, self.watched.len());
            }
            _ => {}
        }
    }

    pub fn move_up(&mut self) {
        match self.focus {
            Focus::Results if self.results_listed() => {
                self.results_index = wrap_prev(self.results_index, self.search.results().len());
            }
            Focus::SidePane if !self.selection.is_viewing() => {
                self.watched_index = wrap_prev(self.watched_index, self.watched.len());
            }
            _ => {}
        }
    }

    /// False while a message or "Loading..." replaces the result list.
    #[must_use]
    pub fn results_listed(&self) -> bool {
        self.search.error().is_none() && !self.search.is_loading()
    }

    #[must_use]
    pub fn highlighted_result_id(&self) -> Option<String> {
        if !self.results_listed() {
            return None;
        }
        self.search.results().get(self.results_index).map(|movie| movie.id.clone())
    }

    #[must_use]
    pub fn highlighted_watched_id(&self) -> Option<String> {
        self.watched.get(self.watched_index).map(|entry| entry.id.clone())
    }

    /// Box that `t` toggles for the current focus.
    #[must_use]
    pub const fn focused_box(&self) -> Option<PaneBox> {
        match self.focus {
            Focus::SearchInput => None,
            Focus::Results => Some(PaneBox::Results),
            Focus::SidePane => Some(PaneBox::Side),
        }
    }

    /// Clamps the result cursor after the result list changed.
    pub fn clamp_results_index(&mut self) {
        self.results_index = clamp_index(self.results_index, self.search.results().len());
    }

    /// Pane title for the current state.
    #[must_use]
    pub fn desired_title(&self) -> String {
        match self.details.title() {
            Some(title) if self.visible && self.selection.is_viewing() => format!("Movie | {title}"),
            _ => APP_TITLE.to_string(),
        }
    }

    /// Returns a `SetPaneTitle` action if the title differs from the last one emitted.
    pub fn take_title_change(&mut self) -> Option<Action> {
        let desired = self.desired_title();
        if self.pane_title.as_deref() == Some(desired.as_str()) {
            return None;
        }
        self.pane_title = Some(desired.clone());
        Some(Action::SetPaneTitle(desired))
    }

    /// Computes the renderable view model for a `rows` x `cols` pane.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let list_rows = rows.saturating_sub(CHROME_ROWS);

        UIViewModel {
            nav: NavBarInfo {
                logo: format!("🍿 {APP_TITLE}"),
                query: self.query.clone(),
                search_focused: self.focus == Focus::SearchInput,
                result_count: self.search.results().len(),
            },
            results: self.compute_results_view(list_rows),
            side: self.compute_side_view(list_rows),
            results_open: self.boxes.results_open,
            side_open: self.boxes.side_open,
            focus: self.focus,
            footer: self.compute_footer(),
            cols,
            rows,
        }
    }

    fn compute_results_view(&self, list_rows: usize) -> ResultsView {
        if let Some(error) = self.search.error() {
            return ResultsView::Error(error.to_string());
        }
        if self.search.is_loading() {
            return ResultsView::Loading;
        }

        let results = self.search.results();
        let window = ListWindow::around(self.results_index, results.len(), list_rows);
        let matcher = (!self.query.is_empty()).then(SkimMatcherV2::default);
        let selected_id = self.selection.selected_id();

        let items = results[window.start..window.end]
            .iter()
            .enumerate()
            .map(|(offset, movie)| ResultItem {
                title: movie.title.clone(),
                year: movie.year.clone(),
                is_highlighted: window.start + offset == self.results_index && self.focus == Focus::Results,
                is_open: selected_id == Some(movie.id.as_str()),
                highlight_ranges: matcher
                    .as_ref()
                    .map_or_else(Vec::new, |m| compute_highlight_ranges(&movie.title, &self.query, m)),
            })
            .collect();

        ResultsView::Items(items)
    }

    fn compute_side_view(&self, list_rows: usize) -> SidePaneView {
        if self.selection.is_viewing() {
            return SidePaneView::Details(self.compute_details_view());
        }

        let summary = self.watched.summary();
        let window = ListWindow::around(self.watched_index, self.watched.len(), list_rows.saturating_sub(SUMMARY_ROWS));

        let items = self.watched.entries()[window.start..window.end]
            .iter()
            .enumerate()
            .map(|(offset, entry)| WatchedItem {
                title: entry.title.clone(),
                external_rating: format_rating(entry.external_rating),
                user_rating: entry.user_rating.to_string(),
                runtime: entry
                    .runtime_minutes
                    .map_or_else(|| "N/A".to_string(), |m| format!("{m} min")),
                is_highlighted: window.start + offset == self.watched_index && self.focus == Focus::SidePane,
            })
            .collect();

        SidePaneView::Watched(WatchedView {
            summary: WatchedSummaryInfo {
                count: summary.count,
                avg_external_rating: format!("{:.2}", summary.avg_external_rating),
                avg_user_rating: format!("{:.2}", summary.avg_user_rating),
                avg_runtime: format!("{:.0} min", summary.avg_runtime_minutes),
            },
            items,
            loaded: self.watched_loaded,
        })
    }

    fn compute_details_view(&self) -> DetailsView {
        if let Some(error) = self.details.error() {
            return DetailsView::Error(error.to_string());
        }

        let Some(details) = self.details.details() else {
            return DetailsView::Loading;
        };

        let rating = match self.selection.selected_id().and_then(|id| self.watched.find(id)) {
            Some(entry) => RatingView::ReadOnly(entry.user_rating.get()),
            None => {
                let pending = self.selection.viewing().and_then(|v| v.pending_rating());
                RatingView::Pending {
                    value: pending.map(Rating::get),
                    can_add: pending.is_some(),
                }
            }
        };

        DetailsView::Loaded {
            title: details.title.clone(),
            released_runtime: format!("{} • {}", details.release_date, details.runtime_label()),
            genre: details.genre.clone(),
            external_rating: format!("⭐ {} IMDb rating", format_rating(details.external_rating)),
            rating,
            plot: details.plot.clone(),
            cast: format!("Starring {}", details.cast),
            director: format!("Directed by {}", details.director),
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.focus {
            Focus::SearchInput => "Type to search  Tab/↓: results  Esc: leave search".to_string(),
            Focus::Results => "j/k: move  Space: open/close  Enter: new search  Tab: next  t: toggle box  q: quit".to_string(),
            Focus::SidePane if self.selection.is_viewing() => {
                if self.selected_is_watched() {
                    "Esc: back  Tab: next  t: toggle box  q: quit".to_string()
                } else {
                    "1-9,0: rate  h/l: -/+  a: add to list  Esc: back  q: quit".to_string()
                }
            }
            Focus::SidePane => "j/k: move  d: delete  Enter: new search  Tab: next  t: toggle box  q: quit".to_string(),
        };

        FooterInfo {
            keybindings,
            status: self.status.clone(),
        }
    }
}

fn format_rating(rating: Option<f32>) -> String {
    rating.map_or_else(|| "N/A".to_string(), |r| format!("{r:.1}"))
}

const fn wrap_next(index: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        (index + 1) % len
    }
}

const fn wrap_prev(index: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else if index == 0 {
        len - 1
    } else {
        index - 1
    }
}

const fn clamp_index(index: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else if index >= len {
        len - 1
    } else {
        index
    }
}

/// Character ranges of `text` matched by `query`, coalesced into runs.
///
/// Each range is `(start, end)` with an exclusive end, in character indices.
fn compute_highlight_ranges(text: &str, query: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
    use fuzzy_matcher::FuzzyMatcher;

    let Some((_score, indices)) = matcher.fuzzy_indices(text, query) else {
        return vec![];
    };

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::{FetchResponse, RequestKind};
    use crate::omdb::DEFAULT_API_URL;

    fn state() -> AppState {
        AppState::new(OmdbEndpoint::new(DEFAULT_API_URL, "k"), "watchedList", Theme::default())
    }

    fn entry(id: &str) -> WatchedEntry {
        WatchedEntry {
            id: id.to_string(),
            title: id.to_string(),
            year: "2000".to_string(),
            poster_url: String::new(),
            runtime_minutes: None,
            external_rating: None,
            user_rating: Rating::new(5).unwrap(),
            rating_revision_count: 1,
        }
    }

    #[test]
    fn highlight_ranges_coalesce_consecutive_matches() {
        let matcher = SkimMatcherV2::default();
        assert_eq!(compute_highlight_ranges("Inception", "incep", &matcher), vec![(0, 5)]);
        assert!(compute_highlight_ranges("Alien", "zzz", &matcher).is_empty());
    }

    #[test]
    fn entries_added_before_load_are_appended_after_stored_ones() {
        let mut state = state();
        assert!(state.add_watched(entry("new")).is_empty());

        let actions = state.apply_loaded(WatchedCollection::new(vec![entry("old")]));

        let ids: Vec<&str> = state.watched.entries().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["old", "new"]);
        assert!(matches!(
            actions.as_slice(),
            [Action::PostToWorker(WorkerMessage::SaveWatched { entries, .. })] if entries.len() == 2
        ));
    }

    #[test]
    fn loading_without_early_additions_saves_nothing() {
        let mut state = state();
        assert!(state.apply_loaded(WatchedCollection::new(vec![entry("old")])).is_empty());
        assert!(state.watched_loaded);
    }

    #[test]
    fn delete_saves_and_clamps_cursor() {
        let mut state = state();
        state.apply_loaded(WatchedCollection::new(vec![entry("a"), entry("b")]));
        state.watched_index = 1;

        let actions = state.delete_watched("b");
        assert_eq!(state.watched_index, 0);
        assert_eq!(actions.len(), 1);
        assert!(state.delete_watched("missing").is_empty());
    }

    #[test]
    fn title_follows_loaded_details_and_visibility() {
        let mut state = state();
        assert_eq!(state.take_title_change(), Some(Action::SetPaneTitle(APP_TITLE.to_string())));
        assert_eq!(state.take_title_change(), None);

        let request = match state.select_movie("tt1375666").pop() {
            Some(Action::WebRequest(request)) => request,
            other => panic!("expected details request, got {other:?}"),
        };
        assert_eq!(state.desired_title(), APP_TITLE);

        state.details.complete(&FetchResponse {
            id: request.id,
            kind: RequestKind::Details,
            status: 200,
            body: br#"{"imdbID":"tt1375666","Title":"Inception","Response":"True"}"#.to_vec(),
        });
        assert_eq!(state.desired_title(), "Movie | Inception");

        state.visible = false;
        assert_eq!(state.desired_title(), APP_TITLE);
    }

    #[test]
    fn escape_binding_lives_only_while_viewing() {
        let mut state = state();
        state.select_movie("tt1");
        assert!(state.bindings.is_bound(BindingOwner::DetailsPane, Key::Escape));

        state.close_details();
        assert!(!state.bindings.is_bound(BindingOwner::DetailsPane, Key::Escape));
        assert!(state.bindings.is_bound(BindingOwner::SearchBox, Key::Enter));
    }

    #[test]
    fn rating_steps_start_low_and_saturate() {
        let mut state = state();
        state.select_movie("tt1");
        assert!(state.step_pending_rating(true));
        assert_eq!(state.selection.viewing().and_then(|v| v.pending_rating()).map(Rating::get), Some(1));
        assert!(!state.step_pending_rating(false));
    }
}
