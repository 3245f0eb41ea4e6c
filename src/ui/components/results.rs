//! Result list renderer.
//!
//! Each row is a marker column, the title with fuzzy match highlighting, and
//! the year right-aligned. The title open in the details pane gets a `▶`
//! marker; the cursor row is drawn in selection colors.

use super::message::render_message;
use super::BoxArea;
use crate::ui::helpers::{self, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ResultItem, ResultsView};

const MARKER_WIDTH: usize = 2;
const YEAR_WIDTH: usize = 11;

pub fn render_results(area: BoxArea, view: &ResultsView, theme: &Theme) {
    match view {
        ResultsView::Loading => render_message(area, "Loading...", &theme.colors.message_fg),
        ResultsView::Error(message) => render_message(area, &format!("⛔️ {message}"), &theme.colors.error_fg),
        ResultsView::Items(items) if items.is_empty() => {
            render_message(area, "Type at least 3 characters to search", &theme.colors.text_dim);
        }
        ResultsView::Items(items) => {
            for (line, item) in items.iter().take(area.height).enumerate() {
                render_result_row(area, line, item, theme);
            }
            area.clear_from(items.len().min(area.height));
        }
    }
}

fn render_result_row(area: BoxArea, line: usize, item: &ResultItem, theme: &Theme) {
    let base = if item.is_highlighted {
        format!("{}{}", Theme::fg(&theme.colors.selection_fg), Theme::bg(&theme.colors.selection_bg))
    } else {
        Theme::fg(&theme.colors.text_normal)
    };

    let title_width = area.width.saturating_sub(MARKER_WIDTH + YEAR_WIDTH);

    position_cursor(area.row(line), area.left);
    print!("{base}");

    if item.is_open {
        print!("{}▶ {base}", Theme::fg(&theme.colors.accent_fg));
    } else {
        print!("  ");
    }

    if item.is_highlighted {
        print!("{}", helpers::fit(&item.title, title_width));
    } else {
        helpers::render_highlighted_text(&item.title, &item.highlight_ranges, theme, &base, title_width);
    }

    if !item.is_highlighted {
        print!("{}", Theme::fg(&theme.colors.text_dim));
    }
    print!("{:>width$}", helpers::truncate(&item.year, YEAR_WIDTH - 1), width = YEAR_WIDTH - 1);
    print!(" {}", Theme::reset());
}
