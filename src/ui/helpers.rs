//! Shared rendering utilities.
//!
//! Everything here works on character counts, not bytes, so titles with
//! accents or CJK characters are cut at character boundaries.

use crate::ui::theme::Theme;

/// Moves the cursor to a 1-indexed `row` and `col`.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Cuts `text` to at most `width` characters, marking a cut with `…`.
///
/// # Example
///
/// ```rust
/// use popcorn::ui::helpers::truncate;
///
/// assert_eq!(truncate("Inception", 20), "Inception");
/// assert_eq!(truncate("Inception", 5), "Ince…");
/// ```
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut cut: String = text.chars().take(width - 1).collect();
    cut.push('…');
    cut
}

/// Truncates and then right-pads `text` with spaces to exactly `width` characters.
#[must_use]
pub fn fit(text: &str, width: usize) -> String {
    let cut = truncate(text, width);
    let len = cut.chars().count();
    format!("{cut}{}", " ".repeat(width.saturating_sub(len)))
}

/// Greedy word wrap into lines of at most `width` characters.
///
/// Words longer than a line are truncated. At most `max_lines` lines are
/// returned; if text remains, the last line ends with `…`.
#[must_use]
pub fn wrap_text(text: &str, width: usize, max_lines: usize) -> Vec<String> {
    if width == 0 || max_lines == 0 {
        return vec![];
    }

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut overflow = false;

    for word in text.split_whitespace() {
        let word = truncate(word, width);
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };

        if needed <= width {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(&word);
            continue;
        }

        lines.push(std::mem::take(&mut current));
        current = word;
        if lines.len() == max_lines {
            overflow = true;
            break;
        }
    }

    if !overflow && !current.is_empty() {
        lines.push(current);
    }

    if overflow {
        if let Some(last) = lines.last_mut() {
            let keep = last.chars().count().min(width.saturating_sub(1));
            *last = last.chars().take(keep).collect::<String>() + "…";
        }
    }

    lines
}

/// Renders a `width`-wide line, highlighting matched character ranges.
///
/// `base` is the escape sequence for the surrounding text; it is restored
/// after every highlighted run so row backgrounds stay intact.
pub fn render_highlighted_text(text: &str, ranges: &[(usize, usize)], theme: &Theme, base: &str, width: usize) {
    let chars: Vec<char> = truncate(text, width).chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < current_pos || start >= end {
            continue;
        }

        let normal: String = chars[current_pos..start].iter().collect();
        let matched: String = chars[start..end].iter().collect();
        print!("{normal}");
        print!(
            "{}{}{matched}{}{base}",
            Theme::fg(&theme.colors.match_highlight_fg),
            Theme::bg(&theme.colors.match_highlight_bg),
            Theme::reset()
        );
        current_pos = end;
    }

    let remaining: String = chars[current_pos..].iter().collect();
    print!("{remaining}");
    print!("{}", " ".repeat(width.saturating_sub(chars.len())));
}
