//! Search bar component renderer.
//!
//! Renders the query input as a bordered three-line box. The border uses the
//! accent color while the query has focus and the plain border color while
//! the results are being browsed.

use crate::ui::helpers::{char_len, position_cursor, truncate};
use crate::ui::icons;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Horizontal margin for the search box (spaces on left and right).
const SEARCH_BOX_MARGIN: usize = 2;

/// Hint shown while the query is empty.
const PLACEHOLDER: &str = "Book title or author";

/// Renders the search input box at `row`.
///
/// ```text
/// [margin] ╭──────────────────────╮ [margin]
/// [margin] │ ⌕ query_             │ [margin]
/// [margin] ╰──────────────────────╯ [margin]
/// ```
///
/// # Returns
///
/// The next available row position (row + 3)
pub fn render_search_bar(row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let border = if search.is_focused {
        &theme.colors.search_bar_border
    } else {
        &theme.colors.border
    };

    position_cursor(row, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border));
    print!("╭{}╮", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    let prefix = format!(" {} ", icons::glyph("magnify"));
    let field_width = inner_width.saturating_sub(char_len(&prefix) + 1);

    position_cursor(row + 1, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border));
    print!("│");
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{prefix}");

    let shown = if search.query.is_empty() {
        print!("{}", Theme::fg(&theme.colors.text_dim));
        truncate(PLACEHOLDER, field_width)
    } else {
        // Keep the end of a long query visible.
        let len = char_len(&search.query);
        search.query.chars().skip(len.saturating_sub(field_width)).collect()
    };
    print!("{shown}");

    let mut used = char_len(&prefix) + char_len(&shown);
    if search.is_focused && used < inner_width {
        print!("{}", Theme::fg(&theme.colors.search_bar_border));
        print!("▏");
        used += 1;
    }
    print!("{}", " ".repeat(inner_width.saturating_sub(used)));

    print!("{}", Theme::fg(border));
    print!("│");
    print!("{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border));
    print!("╰{}╯", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    row + 3
}
