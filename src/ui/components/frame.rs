//! Rounded box borders around the two columns.

use super::BoxArea;
use crate::ui::helpers::{position_cursor, truncate};
use crate::ui::theme::Theme;

/// Draws the border around `area`. The title carries `[–]` or `[+]` to show
/// whether the box is open.
pub fn render_frame(area: BoxArea, title: &str, focused: bool, open: bool, theme: &Theme) {
    let color = if focused {
        &theme.colors.border_focused
    } else {
        &theme.colors.border
    };
    let left = area.left - 1;
    let marker = if open { "[–]" } else { "[+]" };
    let label = truncate(&format!(" {title} {marker} "), area.width.saturating_sub(1));
    let label_len = label.chars().count();

    position_cursor(area.top - 1, left);
    print!("{}╭─", Theme::fg(color));
    if focused {
        print!("{}", Theme::bold());
    }
    print!("{}{label}{}{}", Theme::fg(&theme.colors.header_fg), Theme::reset(), Theme::fg(color));
    print!("{}╮{}", "─".repeat(area.width.saturating_sub(label_len + 1)), Theme::reset());

    for line in 0..area.height {
        let row = area.row(line);
        position_cursor(row, left);
        print!("{}│{}", Theme::fg(color), Theme::reset());
        position_cursor(row, area.left + area.width);
        print!("{}│{}", Theme::fg(color), Theme::reset());
    }

    position_cursor(area.top + area.height, left);
    print!("{}╰{}╯{}", Theme::fg(color), "─".repeat(area.width), Theme::reset());
}
