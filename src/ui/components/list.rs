//! Book list component renderer.
//!
//! One row per book: a leading glyph, the title in the primary title color
//! with fuzzy query matches highlighted, and a dimmed "by {author}" line.

use crate::ui::helpers::{self, char_len, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DisplayItem;

/// Renders `items` starting at `row`, one row each.
///
/// # Returns
///
/// The next available row position (row + number of items)
pub fn render_list_rows(row: usize, items: &[DisplayItem], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for item in items {
        current_row = render_list_row(current_row, item, theme, cols);
    }
    current_row
}

/// Renders a single list row.
///
/// # Styling Precedence
///
/// 1. Selection colors (if `is_selected`)
/// 2. Fuzzy match highlights (unless selected)
/// 3. Title color, then dimmed byline
///
/// The row is padded to the pane width so the selection background spans the
/// whole line.
fn render_list_row(row: usize, item: &DisplayItem, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    let title_fg = if item.is_selected {
        print!("{}", Theme::bg(&theme.colors.selection_bg));
        &theme.colors.selection_fg
    } else {
        &theme.colors.title_fg
    };

    print!("{}", Theme::fg(title_fg));
    print!(" {} ", item.icon);
    helpers::render_highlighted_text(
        &item.title,
        &item.highlight_ranges,
        theme,
        title_fg,
        item.is_selected,
    );

    let mut line_len = 3 + char_len(&item.title);

    if let Some(byline) = &item.byline {
        let room = cols.saturating_sub(line_len + 2);
        if room > 0 {
            let byline = helpers::truncate(byline, room);
            if !item.is_selected {
                print!("{}", Theme::fg(&theme.colors.text_dim));
            }
            print!("  {byline}");
            line_len += 2 + char_len(&byline);
        }
    }

    print!("{}", " ".repeat(cols.saturating_sub(line_len)));
    print!("{}", Theme::reset());
    row + 1
}
