//! Single-line messages centered in a box: the loader and fetch errors.

use super::BoxArea;
use crate::ui::helpers::{position_cursor, truncate};
use crate::ui::theme::Theme;

/// Clears `area` and prints `text` centered on its first third.
pub fn render_message(area: BoxArea, text: &str, color: &str) {
    area.clear_from(0);
    if area.height == 0 {
        return;
    }

    let text = truncate(text, area.width);
    let len = text.chars().count();
    let padding = area.width.saturating_sub(len) / 2;

    position_cursor(area.row(area.height / 3), area.left + padding);
    print!("{}{}{text}{}", Theme::bold(), Theme::fg(color), Theme::reset());
}
