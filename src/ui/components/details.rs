//! Details pane renderer with the star rating picker.

use super::message::render_message;
use super::BoxArea;
use crate::domain::MAX_RATING;
use crate::ui::helpers::{fit, position_cursor, wrap_text};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DetailsView, RatingView};

pub fn render_details(area: BoxArea, view: &DetailsView, theme: &Theme) {
    let DetailsView::Loaded {
        title,
        released_runtime,
        genre,
        external_rating,
        rating,
        plot,
        cast,
        director,
    } = view
    else {
        match view {
            DetailsView::Error(message) => {
                render_message(area, &format!("⛔️ {message}"), &theme.colors.error_fg);
            }
            _ => render_message(area, "Loading...", &theme.colors.message_fg),
        }
        return;
    };

    let normal = Theme::fg(&theme.colors.text_normal);
    let dim = Theme::fg(&theme.colors.text_dim);
    let blank = || (String::new(), Theme::reset().to_string());

    let mut lines: Vec<(String, String)> = vec![
        (title.clone(), format!("{}{}", Theme::bold(), Theme::fg(&theme.colors.header_fg))),
        (released_runtime.clone(), dim.clone()),
        (genre.clone(), dim.clone()),
        (external_rating.clone(), normal.clone()),
        blank(),
    ];

    match rating {
        RatingView::Pending { value, can_add } => {
            let stars = star_bar(value.unwrap_or(0));
            let label = value.map_or_else(|| "rate: 1-9, 0".to_string(), |v| format!("{v}/{MAX_RATING}"));
            lines.push((format!("{stars}  {label}"), Theme::fg(&theme.colors.star_fg)));
            if *can_add {
                lines.push((
                    "a: + Add to list".to_string(),
                    format!("{}{}", Theme::bold(), Theme::fg(&theme.colors.accent_fg)),
                ));
            }
        }
        RatingView::ReadOnly(value) => {
            lines.push((format!("You rated this movie {value} ⭐"), Theme::fg(&theme.colors.star_fg)));
        }
    }
    lines.push(blank());

    // plot gets what is left after the blank line, cast, and director
    let plot_lines = area.height.saturating_sub(lines.len() + 3);
    lines.extend(wrap_text(plot, area.width, plot_lines).into_iter().map(|text| (text, normal.clone())));
    lines.push(blank());
    lines.push((cast.clone(), dim.clone()));
    lines.push((director.clone(), dim));

    for (line, (text, style)) in lines.iter().take(area.height).enumerate() {
        position_cursor(area.row(line), area.left);
        print!("{style}{}{}", fit(text, area.width), Theme::reset());
    }
    area.clear_from(lines.len().min(area.height));
}

/// Ten stars, the first `value` filled.
fn star_bar(value: u8) -> String {
    let filled = usize::from(value.min(MAX_RATING));
    format!("{}{}", "★".repeat(filled), "☆".repeat(usize::from(MAX_RATING) - filled))
}
