//! Nav bar renderer: logo on the left, search box in the middle, result
//! count on the right, all on three rows.

use crate::ui::helpers::{fit, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::NavBarInfo;

const LOGO_WIDTH: usize = 16;
const COUNT_WIDTH: usize = 20;
const PLACEHOLDER: &str = "Search movies...";

/// Renders the nav bar starting at `row`. Returns the next free row.
pub fn render_nav_bar(row: usize, nav: &NavBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_left = LOGO_WIDTH + 1;
    let box_width = cols.saturating_sub(LOGO_WIDTH + COUNT_WIDTH);
    let inner_width = box_width.saturating_sub(2);

    for offset in [0, 2] {
        position_cursor(row + offset, 1);
        print!("{}", " ".repeat(LOGO_WIDTH));
        let (left, right) = if offset == 0 { ('╭', '╮') } else { ('╰', '╯') };
        print!(
            "{}{left}{}{right}{}",
            Theme::fg(&theme.colors.search_bar_border),
            "─".repeat(inner_width),
            Theme::reset()
        );
        print!("{}", " ".repeat(COUNT_WIDTH));
    }

    position_cursor(row + 1, 1);
    print!("{}{}", Theme::bold(), Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }
    print!("{}", fit(&format!(" {}", nav.logo), LOGO_WIDTH.saturating_sub(1)));
    print!("{} ", Theme::reset());

    position_cursor(row + 1, box_left);
    print!("{}│{}", Theme::fg(&theme.colors.search_bar_border), Theme::reset());
    render_query(nav, theme, inner_width);
    print!("{}│{}", Theme::fg(&theme.colors.search_bar_border), Theme::reset());

    let count = format!("Found {} results", nav.result_count);
    print!(
        "{}{:>width$}{}",
        Theme::fg(&theme.colors.text_dim),
        truncate(&count, COUNT_WIDTH - 1),
        Theme::reset(),
        width = COUNT_WIDTH - 1
    );
    print!(" ");

    row + 3
}

/// Query text with a block cursor while focused, or a dimmed placeholder.
fn render_query(nav: &NavBarInfo, theme: &Theme, width: usize) {
    let text_width = width.saturating_sub(2);

    if nav.query.is_empty() && !nav.search_focused {
        print!(" {}{}{} ", Theme::fg(&theme.colors.text_dim), fit(PLACEHOLDER, text_width), Theme::reset());
        return;
    }

    let shown = if nav.search_focused { format!("{}█", nav.query) } else { nav.query.clone() };
    let len = shown.chars().count();
    let visible: String = if len > text_width {
        shown.chars().skip(len - text_width).collect()
    } else {
        shown
    };

    print!(" {}{}{} ", Theme::fg(&theme.colors.text_normal), fit(&visible, text_width), Theme::reset());
}
