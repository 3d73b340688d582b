//! Empty state component renderer.

use crate::ui::helpers::render_centered;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders the "no books" message and its dimmed hint, centered, from `row`.
pub fn render_empty_state(row: usize, empty: &EmptyState, theme: &Theme, cols: usize) -> usize {
    let row = render_centered(row, &empty.message, &[], &theme.colors.empty_state_fg, None, cols);
    render_centered(row, &empty.subtitle, &[Theme::dim()], &theme.colors.text_dim, None, cols)
}
