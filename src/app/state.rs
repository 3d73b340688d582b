//! Application state management and view model computation.
//!
//! [`AppState`] is the single owner of everything the plugin knows: the
//! navigation shell with its mounted screen, the catalog client, the id
//! source for correlating host completions, the theme and the last known
//! pane size. View models are computed on demand from a state snapshot.

use super::details::{CoverState, DetailController};
use super::ids::IdSource;
use super::modes::{InputMode, SearchFocus};
use super::navigation::{Navigate, Screen, Shell};
use super::results::ResultsController;
use super::search::SearchController;
use super::Action;
use crate::catalog::CatalogClient;
use crate::domain::Book;
use crate::ui::helpers::{centered_window, fuzzy_ranges, truncate};
use crate::ui::icons;
use crate::ui::rating::{rating_label, stars};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    CoverView, DetailsView, DisplayItem, EmptyState, FooterInfo, HeaderInfo, RatingView,
    ResultsView, ScreenView, SearchBarInfo, SearchView, UIViewModel,
};
use fuzzy_matcher::skim::SkimMatcherV2;
use std::time::Duration;

/// Rows used by the search screen around its list: blank line, header,
/// border, search box (3), status line, border, footer, trailing blank line.
pub const SEARCH_CHROME_ROWS: usize = 10;

/// Rows used by the results screen around its list: blank line, header,
/// border, caption, progress line, border, footer, trailing blank line.
pub const RESULTS_CHROME_ROWS: usize = 8;

/// Width reserved for the icon column and margins in list rows.
const LIST_ROW_MARGIN: usize = 4;

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Screen selection and the data passed between screens.
    pub shell: Shell,

    /// Search client shared by the search and results screens.
    pub client: CatalogClient,

    /// Allocator for request ids and timer tickets.
    pub ids: IdSource,

    /// Color scheme for UI rendering.
    pub theme: Theme,

    /// Last known pane height in rows.
    pub rows: usize,

    /// Last known pane width in columns.
    pub cols: usize,
}

impl AppState {
    /// Creates application state with the search screen mounted.
    ///
    /// # Parameters
    ///
    /// * `client` - Catalog client used by the search and results screens
    /// * `theme` - Color scheme for UI rendering
    /// * `debounce` - Delay between the last keystroke and the search request
    ///
    /// # Returns
    ///
    /// A new `AppState` with no known pane size.
    pub fn new(client: CatalogClient, theme: Theme, debounce: Duration) -> Self {
        Self {
            shell: Shell::new(debounce),
            client,
            ids: IdSource::new(),
            theme,
            rows: 0,
            cols: 0,
        }
    }

    /// Input mode derived from the mounted screen.
    pub fn input_mode(&self) -> InputMode {
        match self.shell.screen() {
            Screen::Search(search) => InputMode::Search(search.focus()),
            Screen::Results(_) => InputMode::Results,
            Screen::Details(_) => InputMode::Details,
        }
    }

    /// Number of list rows the results screen shows at the current pane size.
    pub fn results_viewport(&self) -> usize {
        self.rows.saturating_sub(RESULTS_CHROME_ROWS)
    }

    /// Performs a navigation and lays out the newly mounted screen.
    ///
    /// Returns whether the screen changed and the actions to execute.
    pub fn navigate(&mut self, to: Navigate) -> (bool, Vec<Action>) {
        let viewport = self.results_viewport();
        let Some(mut actions) = self.shell.navigate(to, &mut self.ids) else {
            return (false, vec![]);
        };

        if let Screen::Results(results) = self.shell.screen_mut() {
            actions.extend(results.set_viewport(viewport, &self.client, &mut self.ids));
        }
        (true, actions)
    }

    /// Records a new pane size and re-lays out the results list.
    pub fn resize(&mut self, rows: usize, cols: usize) -> Vec<Action> {
        self.rows = rows;
        self.cols = cols;
        let viewport = self.results_viewport();
        match self.shell.screen_mut() {
            Screen::Results(results) if results.viewport_rows() != viewport => {
                results.set_viewport(viewport, &self.client, &mut self.ids)
            }
            _ => vec![],
        }
    }

    /// Computes a renderable UI view model.
    ///
    /// # Parameters
    ///
    /// * `rows` - Pane height in character cells
    /// * `cols` - Pane width in character cells
    ///
    /// # Returns
    ///
    /// A [`UIViewModel`](crate::ui::viewmodel::UIViewModel) with header and
    /// footer info plus the body of the mounted screen.
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let body = match self.shell.screen() {
            Screen::Search(search) => ScreenView::Search(Self::search_view(search, rows, cols)),
            Screen::Results(results) => ScreenView::Results(Self::results_view(results, cols)),
            Screen::Details(details) => ScreenView::Details(Self::details_view(details)),
        };

        UIViewModel {
            header: self.compute_header(cols),
            footer: self.compute_footer(),
            body,
        }
    }

    fn search_view(search: &SearchController, rows: usize, cols: usize) -> SearchView {
        let available_rows = rows.saturating_sub(SEARCH_CHROME_ROWS);
        let items = search.results();
        let browsing = search.focus() == SearchFocus::Browsing;

        let start = centered_window(search.selected_index(), items.len(), available_rows);
        let end = (start + available_rows).min(items.len());
        let matcher = SkimMatcherV2::default();

        let display_items = items[start..end]
            .iter()
            .enumerate()
            .map(|(offset, book)| {
                let position = start + offset;
                Self::display_item(
                    book,
                    position,
                    "book-open-page-variant",
                    browsing && position == search.selected_index(),
                    search.query(),
                    &matcher,
                    cols,
                )
            })
            .collect();

        let empty_state = search.shows_no_results().then(|| EmptyState {
            message: "No books found".to_string(),
            subtitle: "Try a different title or author".to_string(),
        });

        SearchView {
            search_bar: SearchBarInfo {
                query: search.query().to_string(),
                is_focused: !browsing,
            },
            loading: search.is_loading(),
            error: search.error().map(str::to_string),
            empty_state,
            display_items,
        }
    }

    fn results_view(results: &ResultsController, cols: usize) -> ResultsView {
        let items = results.items();
        let start = results.scroll_offset().min(items.len());
        let end = (start + results.viewport_rows()).min(items.len());
        let matcher = SkimMatcherV2::default();

        let display_items = items[start..end]
            .iter()
            .enumerate()
            .map(|(offset, book)| {
                let position = start + offset;
                Self::display_item(
                    book,
                    position,
                    "book",
                    position == results.selected_index(),
                    results.query(),
                    &matcher,
                    cols,
                )
            })
            .collect();

        let empty_state = results.shows_no_results().then(|| EmptyState {
            message: "No results found".to_string(),
            subtitle: "Esc to refine the search".to_string(),
        });

        let status = if results.is_loading() {
            "Loading more...".to_string()
        } else if results.has_more() {
            format!("{} loaded · m: load more", items.len())
        } else {
            format!("{} loaded · end of results", items.len())
        };

        ResultsView {
            caption: format!("Showing results for \u{201c}{}\u{201d}", results.query()),
            display_items,
            loading: results.is_loading(),
            empty_state,
            status,
        }
    }

    fn details_view(details: &DetailController) -> DetailsView {
        let book = details.book();

        let cover = details.cover().map(|state| match state {
            CoverState::Loading => CoverView::Loading,
            CoverState::Failed => CoverView::Failed,
            CoverState::Loaded(image) => {
                #[allow(clippy::cast_precision_loss)]
                let kib = image.byte_len as f64 / 1024.0;
                CoverView::Loaded(format!(
                    "{} · {}×{} · {kib:.1} KiB",
                    image.format_label(),
                    image.width,
                    image.height
                ))
            }
        });

        let rating = book.rating.map(|rating| RatingView {
            stars: stars(rating),
            label: rating_label(rating, book.reviews_count),
        });

        DetailsView {
            cover,
            title: book.title.clone(),
            author: book.author.clone(),
            published: book
                .year
                .as_ref()
                .filter(|year| !year.is_empty())
                .map(|year| format!("Published in {year}")),
            rating,
            author_bio: book.author_bio.clone(),
            summary: book.summary.clone(),
        }
    }

    fn display_item(
        book: &Book,
        position: usize,
        icon: &str,
        is_selected: bool,
        query: &str,
        matcher: &SkimMatcherV2,
        cols: usize,
    ) -> DisplayItem {
        let byline = book.byline();
        let byline_width = byline.as_ref().map_or(0, |b| b.chars().count() + 2);
        let title_width = cols
            .saturating_sub(LIST_ROW_MARGIN + byline_width)
            .max(cols.saturating_sub(LIST_ROW_MARGIN) / 2);

        let title = truncate(&book.title, title_width);
        let highlight_ranges = fuzzy_ranges(&title, query, matcher);

        DisplayItem {
            key: book.list_key(position),
            icon: icons::glyph(icon),
            title,
            byline,
            is_selected,
            highlight_ranges,
        }
    }

    fn compute_header(&self, cols: usize) -> HeaderInfo {
        let title = match self.shell.screen() {
            Screen::Search(_) => format!("{} Search Book", icons::glyph("magnify")),
            Screen::Results(results) => format!("Results ({})", results.items().len()),
            Screen::Details(details) => {
                let back = icons::glyph("arrow-left");
                truncate(&format!("{back} {}", details.book().title), cols.saturating_sub(2))
            }
        };
        HeaderInfo {
            title: format!(" {title} "),
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.input_mode() {
            InputMode::Search(SearchFocus::Typing) => {
                "Type to search  Enter: show results  Tab/↓: browse  Esc: close"
            }
            InputMode::Search(SearchFocus::Browsing) => {
                "j/k: navigate  Enter: open  Tab or /: edit query  q: quit"
            }
            InputMode::Results => "j/k: navigate  Enter: open  m: load more  Esc: back  q: quit",
            InputMode::Details => {
                if matches!(
                    self.shell.screen(),
                    Screen::Details(details) if details.has_error()
                ) {
                    "r: retry cover  Esc: back  q: quit"
                } else {
                    "Esc: back  q: quit"
                }
            }
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}
