//! Composable UI component renderers.
//!
//! # Components
//!
//! - [`navbar`]: Logo, search box, and result count
//! - [`frame`]: Rounded box borders with titles and collapse markers
//! - [`results`]: Search result list with fuzzy match highlighting
//! - [`details`]: Details of the selected title and the star rating picker
//! - [`watched`]: Watched summary and list
//! - [`message`]: Loader and error messages inside a box
//! - [`footer`]: Keybinding hints or the last storage error
//!
//! # Layout
//!
//! ```text
//! [blank line]
//! [Nav bar - 3 lines]
//! ╭─ Results ──────────╮╭─ Watched ──────────╮
//! │ result rows        ││ side pane rows      │
//! ╰────────────────────╯╰────────────────────╯
//! [Border]
//! [Footer]
//! ```

mod details;
mod footer;
mod frame;
mod message;
mod navbar;
mod results;
mod watched;

use crate::app::Focus;
use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{SidePaneView, UIViewModel};

use details::render_details;
use footer::render_footer;
use frame::render_frame;
use message::render_message;
use navbar::render_nav_bar;
use results::render_results;
use watched::render_watched;

/// Smallest pane that can hold the layout.
const MIN_ROWS: usize = 10;
const MIN_COLS: usize = 40;

/// Interior of a box: first row and column plus size, all 1-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxArea {
    pub top: usize,
    pub left: usize,
    pub width: usize,
    pub height: usize,
}

impl BoxArea {
    /// Screen row of interior line `line`.
    #[must_use]
    pub const fn row(&self, line: usize) -> usize {
        self.top + line
    }

    /// Blanks interior lines from `from` to the bottom.
    pub fn clear_from(&self, from: usize) {
        for line in from..self.height {
            position_cursor(self.row(line), self.left);
            print!("{}", " ".repeat(self.width));
        }
    }
}

/// Horizontal rule across the pane. Returns the next row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}{}{}", Theme::fg(color), "─".repeat(cols), Theme::reset());
    row + 1
}

/// Renders the whole two-column layout.
pub fn render_layout(vm: &UIViewModel, theme: &Theme) {
    let (rows, cols) = (vm.rows, vm.cols);

    if rows < MIN_ROWS || cols < MIN_COLS {
        let area = BoxArea { top: 1, left: 1, width: cols, height: rows };
        render_message(area, "Pane too small for usePopcorn", &theme.colors.text_dim);
        return;
    }

    let box_top = render_nav_bar(2, &vm.nav, theme, cols);

    let footer_row = rows;
    let border_row = rows - 1;
    let box_bottom = rows - 2;

    let left_width = cols / 2;
    let right_width = cols - left_width;
    let interior_height = box_bottom - box_top - 1;

    let results_area = BoxArea {
        top: box_top + 1,
        left: 2,
        width: left_width - 2,
        height: interior_height,
    };
    let side_area = BoxArea {
        top: box_top + 1,
        left: left_width + 2,
        width: right_width - 2,
        height: interior_height,
    };

    let side_title = match &vm.side {
        SidePaneView::Details(_) => "Details",
        SidePaneView::Watched(_) => "Watched",
    };

    render_frame(results_area, "Results", vm.focus == Focus::Results, vm.results_open, theme);
    render_frame(side_area, side_title, vm.focus == Focus::SidePane, vm.side_open, theme);

    if vm.results_open {
        render_results(results_area, &vm.results, theme);
    } else {
        results_area.clear_from(0);
    }

    if vm.side_open {
        match &vm.side {
            SidePaneView::Details(details) => render_details(side_area, details, theme),
            SidePaneView::Watched(watched) => render_watched(side_area, watched, theme),
        }
    } else {
        side_area.clear_from(0);
    }

    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_row, &vm.footer, theme, cols);
}
