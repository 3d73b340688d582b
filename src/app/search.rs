//! Search screen controller.
//!
//! Owns the query text and the incremental result list. Every keystroke
//! cancels the pending debounce timer; queries of two or more characters
//! (after trimming) arm a new one, and only its firing issues a catalog
//! request. Only the response to the latest request is applied.

use super::actions::Action;
use super::debounce::Debouncer;
use super::ids::{IdSource, RequestId, TimerTicket};
use super::modes::SearchFocus;
use crate::catalog::{CatalogClient, SearchPage, SearchPlan};
use crate::domain::error::{Result, SEARCH_FAILED_MESSAGE};
use crate::domain::Book;
use std::sync::Arc;
use std::time::Duration;

/// Minimum trimmed query length that triggers a search.
pub const MIN_QUERY_CHARS: usize = 2;

#[derive(Debug, Clone)]
pub struct SearchController {
    query: String,
    results: Arc<Vec<Book>>,
    loading: bool,
    error: Option<String>,
    focus: SearchFocus,
    selected_index: usize,
    debouncer: Debouncer,
    in_flight: Option<RequestId>,
}

impl SearchController {
    pub fn new(debounce: Duration) -> Self {
        Self {
            query: String::new(),
            results: Arc::new(Vec::new()),
            loading: false,
            error: None,
            focus: SearchFocus::Typing,
            selected_index: 0,
            debouncer: Debouncer::new(debounce),
            in_flight: None,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &Arc<Vec<Book>> {
        &self.results
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn focus(&self) -> SearchFocus {
        self.focus
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    /// Returns `true` if `request_id` is the request this screen is waiting for.
    pub fn awaits(&self, request_id: RequestId) -> bool {
        self.in_flight == Some(request_id)
    }

    /// Whether the "No books found" indicator applies.
    pub fn shows_no_results(&self) -> bool {
        !self.loading
            && self.error.is_none()
            && self.query.chars().count() >= MIN_QUERY_CHARS
            && self.results.is_empty()
    }

    pub fn push_char(&mut self, c: char, ids: &mut IdSource) -> Vec<Action> {
        let mut text = self.query.clone();
        text.push(c);
        self.on_query_changed(text, ids)
    }

    pub fn pop_char(&mut self, ids: &mut IdSource) -> Vec<Action> {
        let mut text = self.query.clone();
        if text.pop().is_none() {
            return vec![];
        }
        self.on_query_changed(text, ids)
    }

    /// Applies a new query text.
    ///
    /// Cancels the pending timer and any outstanding request. Short queries
    /// clear the screen; longer ones start loading and arm the debounce timer.
    ///
    /// # Parameters
    ///
    /// * `text` - Full query text after the edit
    /// * `ids` - Allocator for the debounce timer ticket
    ///
    /// # Returns
    ///
    /// Timer actions for the runtime: a cancellation of the previous timer
    /// and, for a long enough query, the new schedule.
    pub fn on_query_changed(&mut self, text: String, ids: &mut IdSource) -> Vec<Action> {
        let mut actions = self.debouncer.cancel();
        self.in_flight = None;
        self.query = text;

        if self.query.trim().chars().count() < MIN_QUERY_CHARS {
            tracing::trace!(query = %self.query, "query too short, clearing results");
            self.results = Arc::new(Vec::new());
            self.loading = false;
            self.error = None;
            self.selected_index = 0;
            return actions;
        }

        self.loading = true;
        self.error = None;
        actions.extend(self.debouncer.arm(ids));
        actions
    }

    /// Handles a debounce timer firing.
    ///
    /// Issues the catalog request for the current query if `ticket` is the
    /// armed timer; stale tickets are ignored.
    ///
    /// # Returns
    ///
    /// A single `FetchPage` action, or nothing when the ticket is stale or the
    /// query was answered without a request.
    pub fn on_timer(
        &mut self,
        ticket: TimerTicket,
        client: &CatalogClient,
        ids: &mut IdSource,
    ) -> Vec<Action> {
        if !self.debouncer.fire(ticket) {
            tracing::debug!(ticket = %ticket, "ignoring stale debounce timer");
            return vec![];
        }

        match client.search(&self.query, 0) {
            SearchPlan::Ready(page) => {
                self.apply(Ok(page));
                vec![]
            }
            SearchPlan::Fetch(request) => {
                let request_id = ids.next_request();
                self.in_flight = Some(request_id);
                tracing::debug!(request_id = %request_id, query = %request.query, "issuing search");
                vec![Action::FetchPage {
                    request_id,
                    url: request.url,
                }]
            }
        }
    }

    /// Applies a settled search request.
    ///
    /// Returns `false` if the response belongs to a superseded request.
    pub fn on_page(&mut self, request_id: RequestId, result: Result<SearchPage>) -> bool {
        if !self.awaits(request_id) {
            tracing::debug!(request_id = %request_id, "dropping superseded search response");
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
                tracing::debug!(count = page.items.len(), "search results replaced");
                self.results = Arc::new(page.items);
                self.error = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, query = %self.query, "search failed");
                self.results = Arc::new(Vec::new());
                self.error = Some(SEARCH_FAILED_MESSAGE.to_string());
            }
        }

        if self.results.is_empty() {
            self.selected_index = 0;
            self.focus = SearchFocus::Typing;
        } else {
            self.selected_index = self.selected_index.min(self.results.len() - 1);
        }
    }

    pub fn focus_results(&mut self) -> bool {
        if self.results.is_empty() {
            return false;
        }
        self.focus = SearchFocus::Browsing;
        true
    }

    pub fn focus_query(&mut self) -> bool {
        let changed = self.focus != SearchFocus::Typing;
        self.focus = SearchFocus::Typing;
        changed
    }

    pub fn move_selection_down(&mut self) {
        if self.results.is_empty() {
            return;
        }
        self.selected_index = (self.selected_index + 1) % self.results.len();
    }

    pub fn move_selection_up(&mut self) {
        if self.results.is_empty() {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = self.results.len() - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    pub fn selected_book(&self) -> Option<&Book> {
        self.results.get(self.selected_index)
    }

    /// Hands the query and the currently held results to the results screen.
    pub fn submission(&self) -> (String, Arc<Vec<Book>>) {
        (self.query.clone(), Arc::clone(&self.results))
    }

    /// Releases the screen's timer; later completions are ignored.
    pub fn teardown(&mut self) -> Vec<Action> {
        self.in_flight = None;
        self.debouncer.cancel()
    }
}
