//! Book details card renderer.
//!
//! Layout, top to bottom; every block except the title is skipped when the
//! book does not have it:
//!
//! ```text
//!            ┌──────────┐
//!            │  cover   │
//!            └──────────┘
//!               Title
//!              Author
//!          Published in 1965
//!        ★★★⯪☆ 3.5 (12 reviews)
//! ─────────────────────────────────
//! About the author
//! ...
//! Overview
//! ...
//! ```

use crate::ui::helpers::{char_len, position_cursor, render_centered, truncate, wrap_text};
use crate::ui::icons;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{CoverView, DetailsView, RatingView};

/// Inner width of the cover placeholder box.
const COVER_WIDTH: usize = 24;

/// Left margin of the text sections.
const SECTION_MARGIN: usize = 2;

/// Renders the details card between `row` and `last_row` (inclusive).
///
/// Sections that do not fit are cut at `last_row`.
pub fn render_details(row: usize, last_row: usize, view: &DetailsView, theme: &Theme, cols: usize) {
    let mut current_row = row + 1;

    if let Some(cover) = &view.cover {
        current_row = render_cover(current_row, cover, theme, cols);
        current_row += 1;
    }

    current_row = render_centered(current_row, &view.title, &[Theme::bold()], &theme.colors.title_fg, None, cols);
    if let Some(author) = &view.author {
        current_row = render_centered(current_row, author, &[], &theme.colors.text_normal, None, cols);
    }
    if let Some(published) = &view.published {
        current_row = render_centered(current_row, published, &[Theme::dim()], &theme.colors.text_dim, None, cols);
    }
    if let Some(rating) = &view.rating {
        current_row = render_rating(current_row, rating, theme, cols);
    }

    current_row += 1;
    position_cursor(current_row, 1);
    print!("{}", Theme::fg(&theme.colors.border));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    current_row += 1;

    if let Some(bio) = &view.author_bio {
        current_row = render_section(current_row, last_row, "About the author", bio, theme, cols);
    }
    if let Some(summary) = &view.summary {
        if view.author_bio.is_some() {
            current_row += 1;
        }
        render_section(current_row, last_row, "Overview", summary, theme, cols);
    }
}

fn render_cover(row: usize, cover: &CoverView, theme: &Theme, cols: usize) -> usize {
    let left = cols.saturating_sub(COVER_WIDTH + 2) / 2;
    let (text, color) = match cover {
        CoverView::Loading => ("loading cover...".to_string(), &theme.colors.progress_fg),
        CoverView::Loaded(label) => (label.clone(), &theme.colors.text_normal),
        CoverView::Failed => (
            format!("{} r: retry", icons::glyph("reload")),
            &theme.colors.error_fg,
        ),
    };
    let text = truncate(&text, COVER_WIDTH);
    let text_len = char_len(&text);
    let pad_left = (COVER_WIDTH - text_len) / 2;

    position_cursor(row, 1);
    print!("{}", " ".repeat(left));
    print!("{}", Theme::fg(&theme.colors.border));
    print!("┌{}┐", "─".repeat(COVER_WIDTH));

    position_cursor(row + 1, 1);
    print!("{}", " ".repeat(left));
    print!("│{}", " ".repeat(pad_left));
    print!("{}", Theme::fg(color));
    print!("{text}");
    print!("{}", Theme::fg(&theme.colors.border));
    print!("{}│", " ".repeat(COVER_WIDTH - pad_left - text_len));

    position_cursor(row + 2, 1);
    print!("{}", " ".repeat(left));
    print!("└{}┘", "─".repeat(COVER_WIDTH));
    print!("{}", Theme::reset());

    row + 3
}

fn render_rating(row: usize, rating: &RatingView, theme: &Theme, cols: usize) -> usize {
    let stars: String = rating.stars.iter().map(|star| icons::glyph(star.icon())).collect();
    let line_len = char_len(&stars) + 1 + char_len(&rating.label);
    let padding = cols.saturating_sub(line_len) / 2;

    position_cursor(row, 1);
    print!("{}", " ".repeat(padding));
    print!("{}", Theme::fg(&theme.colors.rating_fg));
    print!("{stars}");
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!(" {}", rating.label);
    print!("{}", Theme::reset());
    row + 1
}

fn render_section(
    row: usize,
    last_row: usize,
    title: &str,
    body: &str,
    theme: &Theme,
    cols: usize,
) -> usize {
    if row > last_row {
        return row;
    }

    position_cursor(row, SECTION_MARGIN + 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!("{title}");
    print!("{}", Theme::reset());

    let mut current_row = row + 1;
    let width = cols.saturating_sub(SECTION_MARGIN * 2);
    for line in wrap_text(body, width) {
        if current_row > last_row {
            break;
        }
        position_cursor(current_row, SECTION_MARGIN + 1);
        print!("{}", Theme::fg(&theme.colors.text_normal));
        print!("{line}");
        print!("{}", Theme::reset());
        current_row += 1;
    }
    current_row
}
