//! Navigation shell: exactly one mounted screen at a time.
//!
//! The screen is a tagged union whose variants own their controller, so a
//! details screen can not exist without a book and a results screen can not
//! exist without a query. The shell also remembers the last submitted query
//! and its results so the results screen can be remounted from details.
//!
//! Permitted transitions:
//!
//! ```text
//! SEARCH  --submit-->  RESULTS
//! SEARCH  --select-->  DETAILS
//! RESULTS --select-->  DETAILS
//! RESULTS --back---->  SEARCH
//! DETAILS --back---->  RESULTS (stored results non-empty) | SEARCH
//! ```

use super::actions::Action;
use super::details::DetailController;
use super::ids::IdSource;
use super::results::ResultsController;
use super::search::SearchController;
use crate::domain::Book;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone)]
pub enum Screen {
    Search(SearchController),
    Results(ResultsController),
    Details(DetailController),
}

impl Screen {
    pub fn kind(&self) -> ScreenKind {
        match self {
            Self::Search(_) => ScreenKind::Search,
            Self::Results(_) => ScreenKind::Results,
            Self::Details(_) => ScreenKind::Details,
        }
    }

    fn teardown(&mut self) -> Vec<Action> {
        match self {
            Self::Search(search) => search.teardown(),
            Self::Results(results) => {
                results.teardown();
                vec![]
            }
            Self::Details(details) => {
                details.teardown();
                vec![]
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenKind {
    Search,
    Results,
    Details,
}

impl fmt::Display for ScreenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Search => "SEARCH",
            Self::Results => "RESULTS",
            Self::Details => "DETAILS",
        };
        f.write_str(name)
    }
}

/// A navigation request raised by a screen.
#[derive(Debug, Clone)]
pub enum Navigate {
    /// Search submitted with its current results.
    ToResults {
        query: String,
        results: Arc<Vec<Book>>,
    },
    /// A listed book was selected.
    ToDetails(Book),
    Back,
}

#[derive(Debug, Clone)]
pub struct Shell {
    screen: Screen,
    query: String,
    results: Arc<Vec<Book>>,
    debounce: Duration,
}

impl Shell {
    pub fn new(debounce: Duration) -> Self {
        Self {
            screen: Screen::Search(SearchController::new(debounce)),
            query: String::new(),
            results: Arc::new(Vec::new()),
            debounce,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut Screen {
        &mut self.screen
    }

    pub fn kind(&self) -> ScreenKind {
        self.screen.kind()
    }

    /// Last submitted query.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Results handed over with the last submitted query.
    pub fn results(&self) -> &Arc<Vec<Book>> {
        &self.results
    }

    /// Performs a transition.
    ///
    /// The outgoing screen is torn down before the target screen mounts.
    ///
    /// # Parameters
    ///
    /// * `to` - Requested transition
    /// * `ids` - Allocator for requests issued by the mounted screen
    ///
    /// # Returns
    ///
    /// The teardown and mount actions, or `None` if the transition is not
    /// permitted from the current screen.
    pub fn navigate(&mut self, to: Navigate, ids: &mut IdSource) -> Option<Vec<Action>> {
        let from = self.kind();

        let (next, mut mount_actions) = match (from, to) {
            (ScreenKind::Search, Navigate::ToResults { query, results }) => {
                self.query.clone_from(&query);
                self.results = Arc::clone(&results);
                (Screen::Results(ResultsController::new(query, results)), vec![])
            }
            (ScreenKind::Search | ScreenKind::Results, Navigate::ToDetails(book)) => {
                let (details, actions) = DetailController::mount(book, ids);
                (Screen::Details(details), actions)
            }
            (ScreenKind::Results, Navigate::Back) => (self.fresh_search(), vec![]),
            (ScreenKind::Details, Navigate::Back) => {
                if self.results.is_empty() {
                    (self.fresh_search(), vec![])
                } else {
                    let results = ResultsController::new(self.query.clone(), Arc::clone(&self.results));
                    (Screen::Results(results), vec![])
                }
            }
            (from, to) => {
                tracing::debug!(from = %from, request = ?to, "navigation not permitted");
                return None;
            }
        };

        let mut actions = self.screen.teardown();
        self.screen = next;
        actions.append(&mut mount_actions);

        tracing::debug!(from = %from, to = %self.kind(), "navigated");
        Some(actions)
    }

    fn fresh_search(&self) -> Screen {
        Screen::Search(SearchController::new(self.debounce))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEBOUNCE: Duration = Duration::from_millis(500);

    fn dune() -> Book {
        Book::new("abc", "Dune")
    }

    #[test]
    fn starts_on_search() {
        let shell = Shell::new(DEBOUNCE);
        assert_eq!(shell.kind(), ScreenKind::Search);
    }

    #[test]
    fn submit_carries_query_and_results() {
        let mut ids = IdSource::new();
        let mut shell = Shell::new(DEBOUNCE);
        let results = Arc::new(vec![dune()]);

        shell.navigate(
            Navigate::ToResults {
                query: "dune".to_string(),
                results: Arc::clone(&results),
            },
            &mut ids,
        );

        let Screen::Results(controller) = shell.screen() else {
            panic!("expected results screen");
        };
        assert_eq!(controller.query(), "dune");
        assert_eq!(controller.items(), results.as_slice());
    }

    #[test]
    fn leaving_search_cancels_its_timer() {
        let mut ids = IdSource::new();
        let mut shell = Shell::new(DEBOUNCE);
        let Screen::Search(search) = shell.screen_mut() else {
            panic!("expected search screen");
        };
        let armed = search.on_query_changed("dune".to_string(), &mut ids);
        let Some(Action::ScheduleTimer { ticket, .. }) = armed.last().cloned() else {
            panic!("expected timer");
        };

        let actions = shell.navigate(Navigate::ToDetails(dune()), &mut ids).unwrap();
        assert_eq!(actions, vec![Action::CancelTimer { ticket }]);
        assert_eq!(shell.kind(), ScreenKind::Details);
    }

    #[test]
    fn back_from_details_depends_on_stored_results() {
        let mut ids = IdSource::new();
        let mut shell = Shell::new(DEBOUNCE);
        shell.navigate(Navigate::ToDetails(dune()), &mut ids);
        shell.navigate(Navigate::Back, &mut ids);
        assert_eq!(shell.kind(), ScreenKind::Search);

        shell.navigate(
            Navigate::ToResults {
                query: "dune".to_string(),
                results: Arc::new(vec![dune()]),
            },
            &mut ids,
        );
        shell.navigate(Navigate::ToDetails(dune()), &mut ids);
        shell.navigate(Navigate::Back, &mut ids);
        assert_eq!(shell.kind(), ScreenKind::Results);

        shell.navigate(Navigate::Back, &mut ids);
        assert_eq!(shell.kind(), ScreenKind::Search);
    }

    #[test]
    fn forbidden_transitions_are_rejected() {
        let mut ids = IdSource::new();
        let mut shell = Shell::new(DEBOUNCE);
        assert!(shell.navigate(Navigate::Back, &mut ids).is_none());

        shell.navigate(Navigate::ToDetails(dune()), &mut ids);
        assert!(shell
            .navigate(
                Navigate::ToResults {
                    query: "dune".to_string(),
                    results: Arc::new(vec![]),
                },
                &mut ids,
            )
            .is_none());
        assert!(shell.navigate(Navigate::ToDetails(dune()), &mut ids).is_none());
        assert_eq!(shell.kind(), ScreenKind::Details);
    }

    #[test]
    fn details_mount_requests_cover() {
        let mut ids = IdSource::new();
        let mut shell = Shell::new(DEBOUNCE);
        let book = Book {
            cover: Some("https://img.example/a".to_string()),
            ..dune()
        };
        let actions = shell.navigate(Navigate::ToDetails(book), &mut ids).unwrap();
        assert!(matches!(actions.as_slice(), [Action::FetchCover { .. }]));
    }
}
