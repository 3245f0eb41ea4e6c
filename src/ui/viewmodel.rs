//! View model types representing renderable UI state.
//!
//! View models are computed by `AppState::compute_viewmodel()` and consumed by
//! the renderer. They hold display-ready strings and flags and no business
//! logic: formatting of ratings, runtimes, and averages happens before they
//! get here.

use crate::app::Focus;

/// Complete UI view model for one frame.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    pub nav: NavBarInfo,

    /// Left box: search results.
    pub results: ResultsView,

    /// Right box: details of the selected title or the watched list.
    pub side: SidePaneView,

    pub results_open: bool,
    pub side_open: bool,

    /// Area with keyboard focus, used to style box borders.
    pub focus: Focus,

    pub footer: FooterInfo,

    pub cols: usize,
    pub rows: usize,
}

/// Top bar: logo, search box, and result count.
#[derive(Debug, Clone)]
pub struct NavBarInfo {
    pub logo: String,
    pub query: String,
    /// Whether the search box has focus and shows a cursor.
    pub search_focused: bool,
    pub result_count: usize,
}

/// Contents of the results box.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultsView {
    Loading,
    /// User-facing error text, for example "Movies not found!".
    Error(String),
    Items(Vec<ResultItem>),
}

/// One visible row of the result list.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultItem {
    pub title: String,
    pub year: String,
    /// Cursor row while the result list has focus.
    pub is_highlighted: bool,
    /// Title currently shown in the details pane.
    pub is_open: bool,
    /// Character ranges of `title` matched by the query, exclusive end.
    pub highlight_ranges: Vec<(usize, usize)>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SidePaneView {
    Details(DetailsView),
    Watched(WatchedView),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailsView {
    Loading,
    Error(String),
    Loaded {
        title: String,
        /// "14 Jul 2010 • 148 min"
        released_runtime: String,
        genre: String,
        external_rating: String,
        rating: RatingView,
        plot: String,
        cast: String,
        director: String,
    },
}

/// Rating block of the details pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RatingView {
    /// Title not watched yet: star picker, plus the add hint once a value is chosen.
    Pending { value: Option<u8>, can_add: bool },
    /// Title already watched with this rating.
    ReadOnly(u8),
}

#[derive(Debug, Clone, PartialEq)]
pub struct WatchedView {
    pub summary: WatchedSummaryInfo,
    pub items: Vec<WatchedItem>,
    /// False until the stored list has been read.
    pub loaded: bool,
}

/// Pre-formatted aggregate line above the watched list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchedSummaryInfo {
    pub count: usize,
    pub avg_external_rating: String,
    pub avg_user_rating: String,
    pub avg_runtime: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchedItem {
    pub title: String,
    pub external_rating: String,
    pub user_rating: String,
    pub runtime: String,
    pub is_highlighted: bool,
}

/// Footer display information.
#[derive(Debug, Clone)]
pub struct FooterInfo {
    /// Keybinding hints for the focused area.
    pub keybindings: String,
    /// Last storage error, shown instead of hints while present.
    pub status: Option<String>,
}

/// Slice `[start, end)` of a list that fits into the available rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListWindow {
    pub start: usize,
    pub end: usize,
}

impl ListWindow {
    /// Centers the window on `selected`, shifting it back near the end of the
    /// list so that as many rows as possible are filled.
    ///
    /// # Examples
    ///
    /// ```
    /// use popcorn::ui::viewmodel::ListWindow;
    ///
    /// assert_eq!(ListWindow::around(0, 3, 10), ListWindow { start: 0, end: 3 });
    /// assert_eq!(ListWindow::around(9, 10, 4), ListWindow { start: 6, end: 10 });
    /// ```
    #[must_use]
    pub fn around(selected: usize, len: usize, rows: usize) -> Self {
        let mut start = selected.saturating_sub(rows / 2).min(len);
        let end = (start + rows).min(len);

        if end - start < rows {
            start = end.saturating_sub(rows);
        }

        Self { start, end }
    }
}
