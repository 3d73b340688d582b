//! Header component renderer.

use crate::ui::helpers::render_centered;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the screen title bar at `row`, centered and bold.
///
/// On the details screen the title is the book title behind a back arrow, so
/// long titles are cut to the pane width.
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    render_centered(
        row,
        &header.title,
        &[Theme::bold()],
        &theme.colors.header_fg,
        theme.colors.header_bg.as_deref(),
        cols,
    )
}
