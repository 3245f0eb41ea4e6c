//! Watched summary and list renderer.
//!
//! ```text
//! MOVIES YOU WATCHED
//! # 2 movies  ⭐ 8.15  🌟 7.50  ⏳ 139 min
//!
//! Inception                 ⭐ 8.8  🌟 9  ⏳ 148 min
//! ```

use super::message::render_message;
use super::BoxArea;
use crate::ui::helpers::{fit, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{WatchedItem, WatchedView};

/// Width of the rating and runtime columns on each row.
const STATS_WIDTH: usize = 28;

pub fn render_watched(area: BoxArea, view: &WatchedView, theme: &Theme) {
    if !view.loaded && view.items.is_empty() {
        render_message(area, "Loading watched list...", &theme.colors.message_fg);
        return;
    }

    let summary = &view.summary;
    let heading = "MOVIES YOU WATCHED";
    let stats = format!(
        "# {} movies  ⭐ {}  🌟 {}  ⏳ {}",
        summary.count, summary.avg_external_rating, summary.avg_user_rating, summary.avg_runtime
    );

    let header = [
        (heading.to_string(), format!("{}{}", Theme::bold(), Theme::fg(&theme.colors.header_fg))),
        (stats, Theme::fg(&theme.colors.text_normal)),
        (String::new(), String::new()),
    ];

    let mut line = 0;
    for (text, style) in header.iter().take(area.height) {
        position_cursor(area.row(line), area.left);
        print!("{style}{}{}", fit(text, area.width), Theme::reset());
        line += 1;
    }

    if view.items.is_empty() {
        if line < area.height {
            position_cursor(area.row(line), area.left);
            print!(
                "{}{}{}",
                Theme::fg(&theme.colors.text_dim),
                fit("Nothing here yet. Rate a movie to add it.", area.width),
                Theme::reset()
            );
            line += 1;
        }
        area.clear_from(line);
        return;
    }

    for item in &view.items {
        if line >= area.height {
            break;
        }
        render_watched_row(area, line, item, theme);
        line += 1;
    }
    area.clear_from(line);
}

fn render_watched_row(area: BoxArea, line: usize, item: &WatchedItem, theme: &Theme) {
    let style = if item.is_highlighted {
        format!("{}{}", Theme::fg(&theme.colors.selection_fg), Theme::bg(&theme.colors.selection_bg))
    } else {
        Theme::fg(&theme.colors.text_normal)
    };

    let stats = format!(
        "⭐ {}  🌟 {}  ⏳ {}",
        item.external_rating, item.user_rating, item.runtime
    );
    let title_width = area.width.saturating_sub(STATS_WIDTH);

    position_cursor(area.row(line), area.left);
    print!("{style}{}", fit(&item.title, title_width));
    print!("{:>width$}", truncate(&stats, STATS_WIDTH), width = STATS_WIDTH.min(area.width));
    print!("{}", Theme::reset());
}
