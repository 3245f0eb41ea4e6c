//! Footer renderer: keybinding hints, or the last storage error while one is pending.

use crate::ui::helpers::{position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Renders the footer centered at `row`. Returns the next row.
pub fn render_footer(row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    let (text, color) = match &footer.status {
        Some(status) => (format!("⚠ {status}"), &theme.colors.error_fg),
        None => (footer.keybindings.clone(), &theme.colors.text_dim),
    };

    let text = truncate(&text, cols);
    let text_len = text.chars().count();
    let padding = cols.saturating_sub(text_len) / 2;

    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}{text}", " ".repeat(padding));
    print!("{}", " ".repeat(cols.saturating_sub(padding + text_len)));
    print!("{}", Theme::reset());
    row + 1
}
