//! Composable UI component renderers.
//!
//! # Components
//!
//! - [`header`]: Screen title bar
//! - [`footer`]: Keybinding hints
//! - [`search`]: Query input box
//! - [`list`]: Book list rows with match highlighting
//! - [`empty`]: Empty state message
//! - [`details`]: Book details card with cover and rating
//!
//! # Layouts
//!
//! One layout function per screen. Each fills the pane from row 2 down and
//! pins a border and the footer to the bottom two rows.

mod details;
mod empty;
mod footer;
mod header;
mod list;
mod search;

use crate::ui::helpers::{char_len, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DetailsView, ResultsView, SearchView, UIViewModel};

use details::render_details;
use empty::render_empty_state;
use footer::render_footer;
use header::render_header;
use list::render_list_rows;
use search::render_search_bar;

/// Renders a horizontal border line at `row`.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders a single status line (progress, error or caption) at `row`.
fn render_status_line(row: usize, text: &str, color: &str, cols: usize) -> usize {
    let text = truncate(text, cols.saturating_sub(2));
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("  {text}");
    print!("{}", " ".repeat(cols.saturating_sub(char_len(&text) + 2)));
    print!("{}", Theme::reset());
    row + 1
}

/// Indeterminate progress bar, one cell per column.
fn progress_bar(cols: usize) -> String {
    let width = cols.saturating_sub(4);
    let filled = width / 3;
    format!("{}{}", "━".repeat(filled), "─".repeat(width - filled))
}

fn render_chrome_bottom(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let footer_start = rows.saturating_sub(1);
    let border_row = footer_start.saturating_sub(1);

    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_start, &vm.footer, theme, cols);
}

/// Renders the search screen.
///
/// ```text
/// [blank line]
/// [Header]
/// [Border]
/// [Search Bar - 3 lines]
/// [Status: progress or error]
/// [Result rows | empty state]
/// [Border]
/// [Footer]
/// ```
pub fn render_search_screen(vm: &UIViewModel, view: &SearchView, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2;

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    current_row = render_search_bar(current_row, &view.search_bar, theme, cols);

    current_row = if let Some(error) = &view.error {
        render_status_line(current_row, error, &theme.colors.error_fg, cols)
    } else if view.loading {
        render_status_line(current_row, &progress_bar(cols), &theme.colors.progress_fg, cols)
    } else {
        current_row + 1
    };

    if let Some(empty) = &view.empty_state {
        render_empty_state(current_row + 1, empty, theme, cols);
    } else {
        render_list_rows(current_row, &view.display_items, theme, cols);
    }

    render_chrome_bottom(vm, theme, cols, rows);
}

/// Renders the results screen.
///
/// ```text
/// [blank line]
/// [Header]
/// [Border]
/// [Caption]
/// [Result rows | empty state]
/// [Progress or status line]
/// [Border]
/// [Footer]
/// ```
pub fn render_results_screen(vm: &UIViewModel, view: &ResultsView, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2;

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);

    print!("{}", Theme::bold());
    current_row = render_status_line(current_row, &view.caption, &theme.colors.text_normal, cols);

    if let Some(empty) = &view.empty_state {
        render_empty_state(current_row + 1, empty, theme, cols);
    } else {
        render_list_rows(current_row, &view.display_items, theme, cols);
    }

    let status_row = rows.saturating_sub(3);
    if view.loading {
        render_status_line(status_row, &progress_bar(cols), &theme.colors.progress_fg, cols);
    } else {
        render_status_line(status_row, &view.status, &theme.colors.text_dim, cols);
    }

    render_chrome_bottom(vm, theme, cols, rows);
}

/// Renders the details screen.
pub fn render_details_screen(vm: &UIViewModel, view: &DetailsView, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2;

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);

    render_details(current_row, rows.saturating_sub(3), view, theme, cols);

    render_chrome_bottom(vm, theme, cols, rows);
}
