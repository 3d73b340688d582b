//! Results screen controller.
//!
//! Holds a paginated list seeded from the search screen and extends it one
//! page at a time. Page requests are serialized by the `loading` flag, so
//! appends always happen in fetch order.
//!
//! The end-of-list trigger mirrors a native list's `onEndReached` with a
//! threshold of half a viewport: it fires when fewer than `viewport / 2` rows
//! remain below the visible window, and at most once per list length.

use super::actions::Action;
use super::ids::{IdSource, RequestId};
use crate::catalog::{CatalogClient, SearchPage, SearchPlan};
use crate::domain::error::Result;
use crate::domain::Book;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct ResultsController {
    query: String,
    seed: Arc<Vec<Book>>,
    items: Vec<Book>,
    loading: bool,
    has_more: bool,
    in_flight: Option<RequestId>,
    selected_index: usize,
    scroll_offset: usize,
    viewport_rows: usize,
    /// List length at which the end-of-list trigger last fired.
    end_reached_at: Option<usize>,
}

impl ResultsController {
    pub fn new(query: String, seed: Arc<Vec<Book>>) -> Self {
        let mut controller = Self {
            query: String::new(),
            seed: Arc::new(Vec::new()),
            items: Vec::new(),
            loading: false,
            has_more: true,
            in_flight: None,
            selected_index: 0,
            scroll_offset: 0,
            viewport_rows: 0,
            end_reached_at: None,
        };
        controller.reseed(query, seed);
        controller
    }

    /// Resets the list when the query or the seed sequence changes identity.
    ///
    /// Returns `true` if the list was reset. An outstanding page request is
    /// abandoned.
    pub fn reseed(&mut self, query: String, seed: Arc<Vec<Book>>) -> bool {
        if query == self.query && Arc::ptr_eq(&seed, &self.seed) {
            return false;
        }

        tracing::debug!(query = %query, seed_len = seed.len(), "results reseeded");
        self.items = seed.as_ref().clone();
        self.query = query;
        self.seed = seed;
        self.has_more = true;
        self.loading = false;
        self.in_flight = None;
        self.selected_index = 0;
        self.scroll_offset = 0;
        self.end_reached_at = None;
        true
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn items(&self) -> &[Book] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn viewport_rows(&self) -> usize {
        self.viewport_rows
    }

    pub fn awaits(&self, request_id: RequestId) -> bool {
        self.in_flight == Some(request_id)
    }

    /// Whether the "No results found" indicator applies.
    pub fn shows_no_results(&self) -> bool {
        self.items.is_empty() && !self.loading
    }

    pub fn selected_book(&self) -> Option<&Book> {
        self.items.get(self.selected_index)
    }

    /// Requests the next page.
    ///
    /// No-op while a page is loading or once the list is exhausted.
    ///
    /// # Parameters
    ///
    /// * `client` - Plans the request starting at the current list length
    /// * `ids` - Allocator for the request id
    ///
    /// # Returns
    ///
    /// The `FetchPage` action for the next page, or nothing.
    pub fn load_more(&mut self, client: &CatalogClient, ids: &mut IdSource) -> Vec<Action> {
        if self.loading || !self.has_more {
            tracing::trace!(loading = self.loading, has_more = self.has_more, "load more skipped");
            return vec![];
        }

        self.loading = true;
        let start_index = self.items.len();

        match client.search(&self.query, start_index) {
            SearchPlan::Ready(page) => {
                self.apply(Ok(page));
                vec![]
            }
            SearchPlan::Fetch(request) => {
                let request_id = ids.next_request();
                self.in_flight = Some(request_id);
                tracing::debug!(request_id = %request_id, start_index = start_index, "loading more results");
                vec![Action::FetchPage {
                    request_id,
                    url: request.url,
                }]
            }
        }
    }

    /// Applies a settled page request.
    ///
    /// Returns `false` if the response is not the one this screen is waiting for.
    pub fn on_page(&mut self, request_id: RequestId, result: Result<SearchPage>) -> bool {
        if !self.awaits(request_id) {
            tracing::debug!(request_id = %request_id, "dropping stale page response");
            return false;
        }
        self.in_flight = None;
        self.apply(result);
        true
    }

    fn apply(&mut self, result: Result<SearchPage>) {
        self.loading = false;
        match result {
            Ok(page) => {
                let fetched = page.items.len();
                if fetched == 0 || self.items.len() + fetched >= page.total_items {
                    self.has_more = false;
                }
                self.items.extend(page.items);
                tracing::debug!(
                    fetched = fetched,
                    total = self.items.len(),
                    has_more = self.has_more,
                    "page appended"
                );
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to load more books");
            }
        }
    }

    /// Whether the visible window is within half a viewport of the list end.
    pub fn is_near_end(&self) -> bool {
        if self.viewport_rows == 0 {
            return false;
        }
        let window_end = (self.scroll_offset + self.viewport_rows).min(self.items.len());
        let remaining = self.items.len() - window_end;
        remaining * 2 < self.viewport_rows
    }

    /// Fires `load_more` when the list end is near.
    pub fn end_reached(&mut self, client: &CatalogClient, ids: &mut IdSource) -> Vec<Action> {
        if !self.is_near_end() || self.end_reached_at == Some(self.items.len()) {
            return vec![];
        }
        self.end_reached_at = Some(self.items.len());
        self.load_more(client, ids)
    }

    /// Updates the number of list rows on screen.
    ///
    /// # Parameters
    ///
    /// * `rows` - List rows visible at the current pane size
    /// * `client` - Used if the resized window reaches the list end
    /// * `ids` - Allocator for a triggered page request
    ///
    /// # Returns
    ///
    /// The page request fired by the end-of-list trigger, if any.
    pub fn set_viewport(
        &mut self,
        rows: usize,
        client: &CatalogClient,
        ids: &mut IdSource,
    ) -> Vec<Action> {
        self.viewport_rows = rows;
        self.scroll_to_selection();
        self.end_reached(client, ids)
    }

    pub fn move_selection_down(&mut self, client: &CatalogClient, ids: &mut IdSource) -> Vec<Action> {
        if self.selected_index + 1 < self.items.len() {
            self.selected_index += 1;
        }
        self.scroll_to_selection();
        self.end_reached(client, ids)
    }

    pub fn move_selection_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
        self.scroll_to_selection();
    }

    fn scroll_to_selection(&mut self) {
        let rows = self.viewport_rows.max(1);
        if self.selected_index < self.scroll_offset {
            self.scroll_offset = self.selected_index;
        } else if self.selected_index >= self.scroll_offset + rows {
            self.scroll_offset = self.selected_index + 1 - rows;
        }
    }

    /// Abandons the outstanding page request.
    pub fn teardown(&mut self) {
        self.in_flight = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BookfinderError;

    fn client() -> CatalogClient {
        CatalogClient::new("https://catalog.example/books/v1", 10)
    }

    fn books(range: std::ops::Range<usize>) -> Vec<Book> {
        range.map(|i| Book::new(format!("id{i}"), format!("Book {i}"))).collect()
    }

    fn fetch(actions: &[Action]) -> (RequestId, &str) {
        match actions {
            [Action::FetchPage { request_id, url }] => (*request_id, url.as_str()),
            other => panic!("expected one fetch, got {other:?}"),
        }
    }

    #[test]
    fn dune_pages_until_total_is_reached() {
        let mut ids = IdSource::new();
        let mut results = ResultsController::new("dune".to_string(), Arc::new(books(0..10)));
        assert!(results.has_more());

        let actions = results.load_more(&client(), &mut ids);
        let (id, url) = fetch(&actions);
        assert!(url.contains("startIndex=10&"));
        assert!(results.on_page(id, Ok(SearchPage { items: books(10..20), total_items: 23 })));
        assert!(results.has_more());
        assert_eq!(results.items().len(), 20);

        let actions = results.load_more(&client(), &mut ids);
        let (id, url) = fetch(&actions);
        assert!(url.contains("startIndex=20&"));
        results.on_page(id, Ok(SearchPage { items: books(20..23), total_items: 23 }));

        assert!(!results.has_more());
        assert!(!results.is_loading());
        let ids_in_order: Vec<String> = results.items().iter().map(|b| b.id.clone()).collect();
        let expected: Vec<String> = (0..23).map(|i| format!("id{i}")).collect();
        assert_eq!(ids_in_order, expected);
    }

    #[test]
    fn exhausted_list_ignores_load_more() {
        let mut ids = IdSource::new();
        let mut results = ResultsController::new("dune".to_string(), Arc::new(books(0..3)));
        let actions = results.load_more(&client(), &mut ids);
        let (id, _) = fetch(&actions);
        results.on_page(id, Ok(SearchPage { items: vec![], total_items: 3 }));
        assert!(!results.has_more());

        for _ in 0..3 {
            assert!(results.load_more(&client(), &mut ids).is_empty());
        }
        assert_eq!(results.items().len(), 3);
    }

    #[test]
    fn load_more_is_rejected_while_loading() {
        let mut ids = IdSource::new();
        let mut results = ResultsController::new("dune".to_string(), Arc::new(books(0..10)));
        assert_eq!(results.load_more(&client(), &mut ids).len(), 1);
        assert!(results.load_more(&client(), &mut ids).is_empty());
        assert!(results.is_loading());
    }

    #[test]
    fn failed_page_keeps_existing_list() {
        let mut ids = IdSource::new();
        let mut results = ResultsController::new("dune".to_string(), Arc::new(books(0..10)));
        let actions = results.load_more(&client(), &mut ids);
        let (id, _) = fetch(&actions);

        let err = BookfinderError::Remote {
            status: 500,
            status_text: "Internal Server Error".to_string(),
        };
        assert!(results.on_page(id, Err(err)));
        assert_eq!(results.items().len(), 10);
        assert!(!results.is_loading());
        assert!(results.has_more());
    }

    #[test]
    fn empty_query_completes_without_request() {
        let mut ids = IdSource::new();
        let mut results = ResultsController::new(String::new(), Arc::new(Vec::new()));

        assert!(results.set_viewport(10, &client(), &mut ids).is_empty());
        assert!(results.items().is_empty());
        assert!(!results.has_more());
        assert!(results.shows_no_results());
    }

    #[test]
    fn short_list_triggers_on_first_layout() {
        let mut ids = IdSource::new();
        let mut results = ResultsController::new("dune".to_string(), Arc::new(books(0..4)));
        let actions = results.set_viewport(10, &client(), &mut ids);
        assert!(fetch(&actions).1.contains("startIndex=4&"));
    }

    #[test]
    fn trigger_waits_for_half_viewport_from_end() {
        let mut ids = IdSource::new();
        let mut results = ResultsController::new("dune".to_string(), Arc::new(books(0..20)));
        assert!(results.set_viewport(10, &client(), &mut ids).is_empty());

        // Window [5, 15) leaves 5 rows below: not yet under half a viewport.
        for _ in 0..14 {
            assert!(results.move_selection_down(&client(), &mut ids).is_empty());
        }
        assert_eq!(results.scroll_offset(), 5);

        let actions = results.move_selection_down(&client(), &mut ids);
        assert_eq!(results.scroll_offset(), 6);
        assert_eq!(actions.len(), 1);
    }

    #[test]
    fn failed_trigger_does_not_refire_for_same_length() {
        let mut ids = IdSource::new();
        let mut results = ResultsController::new("dune".to_string(), Arc::new(books(0..2)));
        let actions = results.set_viewport(10, &client(), &mut ids);
        let (id, _) = fetch(&actions);
        results.on_page(id, Err(BookfinderError::Transport("offline".to_string())));

        assert!(results.end_reached(&client(), &mut ids).is_empty());
        assert_eq!(results.load_more(&client(), &mut ids).len(), 1);
    }

    #[test]
    fn reseed_only_on_identity_change() {
        let seed = Arc::new(books(0..2));
        let mut results = ResultsController::new("dune".to_string(), Arc::clone(&seed));
        assert!(!results.reseed("dune".to_string(), Arc::clone(&seed)));
        assert!(results.reseed("dune".to_string(), Arc::new(books(0..2))));
        assert!(results.reseed("messiah".to_string(), Arc::clone(&seed)));
        assert!(results.has_more());
    }

    #[test]
    fn stale_response_after_reseed_is_dropped() {
        let mut ids = IdSource::new();
        let mut results = ResultsController::new("dune".to_string(), Arc::new(books(0..10)));
        let actions = results.load_more(&client(), &mut ids);
        let (id, _) = fetch(&actions);

        results.reseed("messiah".to_string(), Arc::new(books(0..1)));
        assert!(!results.on_page(id, Ok(SearchPage { items: books(10..20), total_items: 30 })));
        assert_eq!(results.items().len(), 1);
    }
}
