//! View model types representing renderable UI state.
//!
//! View models are computed from application state via
//! `AppState::compute_viewmodel()` and consumed by the renderer. They contain
//! no business logic, only display-ready data: truncated text, highlight
//! ranges, selection flags and resolved glyphs.

use crate::ui::rating::Star;

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct UIViewModel {
    /// Header information (screen title).
    pub header: HeaderInfo,

    /// Footer information (keybindings, help text).
    pub footer: FooterInfo,

    /// Content of the mounted screen.
    pub body: ScreenView,
}

/// Screen-specific content.
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenView {
    Search(SearchView),
    Results(ResultsView),
    Details(DetailsView),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchView {
    pub search_bar: SearchBarInfo,
    /// Show the progress line.
    pub loading: bool,
    pub error: Option<String>,
    pub empty_state: Option<EmptyState>,
    /// Visible window of the result list.
    pub display_items: Vec<DisplayItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultsView {
    /// "Showing results for …" line.
    pub caption: String,
    pub display_items: Vec<DisplayItem>,
    /// Show the progress line below the list.
    pub loading: bool,
    pub empty_state: Option<EmptyState>,
    /// Status hint shown next to the progress line.
    pub status: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailsView {
    /// `None` when the book has no cover.
    pub cover: Option<CoverView>,
    pub title: String,
    pub author: Option<String>,
    /// "Published in {year}".
    pub published: Option<String>,
    pub rating: Option<RatingView>,
    pub author_bio: Option<String>,
    pub summary: Option<String>,
}

/// Cover image region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoverView {
    Loading,
    /// Short description of the loaded image, e.g. "JPEG · 128×192 · 12.4 KiB".
    Loaded(String),
    /// Retry affordance.
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingView {
    pub stars: [Star; 5],
    pub label: String,
}

/// Display information for one listed book.
///
/// Represents one row in a result list. Contains pre-computed highlight ranges
/// for fuzzy match rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    /// List key (`{id}-{position}`).
    pub key: String,

    /// Leading glyph.
    pub icon: &'static str,

    /// Display title, truncated to fit.
    pub title: String,

    /// "by {author}" line, if known.
    pub byline: Option<String>,

    /// Whether this item is currently selected.
    pub is_selected: bool,

    /// Character ranges of `title` to highlight (for fuzzy query matches).
    ///
    /// Each tuple is `(start_index, end_index)` in character indices.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Title text to display in the header.
    pub title: String,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Keybinding help text (e.g., "Esc: back  q: quit").
    pub keybindings: String,
}

/// Empty state message display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Primary message (e.g., "No books found").
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}

/// Search bar display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    /// Current search query text.
    pub query: String,

    /// Whether key presses edit the query.
    pub is_focused: bool,
}
