//! Shared rendering utilities and helpers.
//!
//! Low-level text utilities used across the UI components and view model
//! computation. All positions are character indices, never byte indices, so
//! titles with non-ASCII characters are cut and highlighted correctly.

use crate::ui::theme::Theme;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

const ELLIPSIS: &str = "...";

/// Positions the cursor at a specific row and column.
///
/// Uses ANSI escape sequence `\u{1b}[{row};{col}H`. Coordinates are 1-indexed.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Number of characters in `text`.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Shortens `text` to at most `max` characters, ending in `...` when cut.
pub fn truncate(text: &str, max: usize) -> String {
    if char_len(text) <= max {
        return text.to_string();
    }
    if max <= ELLIPSIS.len() {
        return text.chars().take(max).collect();
    }
    let mut out: String = text.chars().take(max - ELLIPSIS.len()).collect();
    out.push_str(ELLIPSIS);
    out
}

/// Greedy word wrap to lines of at most `width` characters.
///
/// Words longer than `width` are split.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            lines.push(word.drain(..width).collect());
        }
        if word.is_empty() {
            continue;
        }

        let needed = if line.is_empty() { word.len() } else { word.len() + 1 };
        if char_len(&line) + needed > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.extend(word);
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Character ranges of `text` matched by a fuzzy `query`.
///
/// Consecutive matched indices are coalesced into `(start, end)` ranges with an
/// exclusive end. Returns no ranges when the query does not match.
pub fn fuzzy_ranges(text: &str, query: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
    let query = query.trim();
    if query.is_empty() {
        return vec![];
    }

    let Some((_score, indices)) = matcher.fuzzy_indices(text, query) else {
        return vec![];
    };

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}

/// Start of a window of `rows` items over `len` items that keeps `selected`
/// near the middle.
pub fn centered_window(selected: usize, len: usize, rows: usize) -> usize {
    if len <= rows {
        return 0;
    }
    selected.saturating_sub(rows / 2).min(len - rows)
}

/// Prints `text` centered on `row`, cut to the pane width and padded on both
/// sides so a background color spans the whole line.
///
/// Returns the next row.
pub fn render_centered(row: usize, text: &str, styles: &[&str], fg: &str, bg: Option<&str>, cols: usize) -> usize {
    let text = truncate(text, cols);
    let text_len = char_len(&text);
    let padding = cols.saturating_sub(text_len) / 2;

    position_cursor(row, 1);
    for style in styles {
        print!("{style}");
    }
    print!("{}", Theme::fg(fg));
    if let Some(bg) = bg {
        print!("{}", Theme::bg(bg));
    }
    print!("{}{text}{}", " ".repeat(padding), " ".repeat(cols.saturating_sub(padding + text_len)));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders text with highlighted character ranges for fuzzy matches.
///
/// Highlighting is skipped for selected rows so the selection colors stay
/// intact. `base_fg` is restored after every highlighted section.
pub fn render_highlighted_text(
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    base_fg: &str,
    is_selected: bool,
) {
    if ranges.is_empty() || is_selected {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < current_pos || start >= end {
            continue;
        }

        let normal_section: String = chars[current_pos..start].iter().collect();
        print!("{normal_section}");

        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        let highlighted_section: String = chars[start..end].iter().collect();
        print!("{highlighted_section}");
        print!("{}", Theme::reset());
        print!("{}", Theme::fg(base_fg));

        current_pos = end;
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        print!("{remaining}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate("Dune", 10), "Dune");
        assert_eq!(truncate("Der Wüstenplanet", 8), "Der W...");
        assert_eq!(truncate("Dune", 2), "Du");
    }

    #[test]
    fn wrap_breaks_on_words() {
        assert_eq!(
            wrap_text("the spice must flow", 10),
            vec!["the spice".to_string(), "must flow".to_string()]
        );
        assert_eq!(wrap_text("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert!(wrap_text("   ", 4).is_empty());
    }

    #[test]
    fn fuzzy_ranges_coalesce_runs() {
        let matcher = SkimMatcherV2::default();
        assert_eq!(fuzzy_ranges("Dune Messiah", "dune", &matcher), vec![(0, 4)]);
        assert!(fuzzy_ranges("Dune", "xyz", &matcher).is_empty());
        assert!(fuzzy_ranges("Dune", "  ", &matcher).is_empty());
    }

    #[test]
    fn window_keeps_selection_visible() {
        assert_eq!(centered_window(0, 5, 10), 0);
        assert_eq!(centered_window(10, 30, 10), 5);
        assert_eq!(centered_window(29, 30, 10), 20);
    }
}
