//! Event handling and state transition logic.
//!
//! This module implements the core event handler that processes user input
//! and host completions, translating them into state changes and action
//! sequences. It serves as the primary control flow coordinator for the
//! application.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the plugin runtime
//! 2. [`handle_event`] routes the event to the mounted screen's controller
//! 3. Screens may request a navigation, which the shell performs
//! 4. Actions are collected and returned for execution
//!
//! # Event Types
//!
//! - **Navigation**: `KeyDown`, `KeyUp`, `Enter`, `Back`
//! - **Input**: `Char`, `Backspace`, `FocusSearchBar`, `FocusResults`
//! - **Screen commands**: `LoadMore`, `RetryCover`, `CloseFocus`
//! - **Host**: `Resize`, `TimerFired`, `PageFetched`, `CoverFetched`, `FetchFailed`,
//!   `PermissionsResult`
//!
//! Completions are routed by request id. A completion that the mounted screen
//! is not waiting for belongs to a torn-down or superseded request and is
//! dropped.

use super::details::CoverImage;
use super::ids::{RequestId, TimerTicket};
use super::modes::SearchFocus;
use super::navigation::{Navigate, Screen};
use crate::app::{Action, AppState};
use crate::domain::error::{BookfinderError, Result};

/// Events triggered by user input or host completions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Moves the selection down (enters browsing on the search screen).
    KeyDown,
    /// Moves the selection up.
    KeyUp,
    /// Closes the floating pane and hides the plugin UI.
    CloseFocus,
    /// Submits the query while typing, opens the selected book otherwise.
    Enter,
    /// Returns to the previous screen.
    Back,
    /// Focuses the query field (search screen).
    FocusSearchBar,
    /// Focuses the listed results (search screen).
    FocusResults,
    /// Appends a character to the query.
    Char(char),
    /// Removes the last character from the query.
    Backspace,
    /// Requests the next results page explicitly.
    LoadMore,
    /// Retries a cover that failed to load.
    RetryCover,

    /// Reports the plugin pane size.
    Resize {
        rows: usize,
        cols: usize,
    },

    /// A scheduled timer fired.
    TimerFired(TimerTicket),

    /// A catalog page request completed with an HTTP response.
    PageFetched {
        request_id: RequestId,
        status: u16,
        body: Vec<u8>,
    },

    /// A cover request completed with an HTTP response.
    CoverFetched {
        request_id: RequestId,
        status: u16,
        body: Vec<u8>,
    },

    /// A request failed before producing a response.
    FetchFailed {
        request_id: RequestId,
        reason: String,
    },

    /// Reports whether web access was granted.
    PermissionsResult {
        granted: bool,
    },
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Returns
///
/// A render flag and the actions to execute in sequence.
///
/// # Errors
///
/// Reserved for failures that can not be recovered at a screen boundary;
/// catalog and image failures are always absorbed by the screen that issued
/// the request.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?EventKind(event), screen = %state.shell.kind()).entered();

    match event {
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::KeyDown => match state.shell.screen_mut() {
            Screen::Search(search) => {
                if search.focus() == SearchFocus::Typing {
                    Ok((search.focus_results(), vec![]))
                } else {
                    search.move_selection_down();
                    Ok((true, vec![]))
                }
            }
            Screen::Results(results) => {
                let actions = results.move_selection_down(&state.client, &mut state.ids);
                Ok((true, actions))
            }
            Screen::Details(_) => Ok((false, vec![])),
        },
        Event::KeyUp => match state.shell.screen_mut() {
            Screen::Search(search) if search.focus() == SearchFocus::Browsing => {
                search.move_selection_up();
                Ok((true, vec![]))
            }
            Screen::Results(results) => {
                results.move_selection_up();
                Ok((true, vec![]))
            }
            _ => Ok((false, vec![])),
        },
        Event::Enter => {
            let target = match state.shell.screen() {
                Screen::Search(search) if search.focus() == SearchFocus::Typing => {
                    let (query, results) = search.submission();
                    tracing::debug!(query = %query, result_count = results.len(), "search submitted");
                    Some(Navigate::ToResults { query, results })
                }
                Screen::Search(search) => search.selected_book().cloned().map(Navigate::ToDetails),
                Screen::Results(results) => results.selected_book().cloned().map(Navigate::ToDetails),
                Screen::Details(_) => None,
            };

            match target {
                Some(to) => Ok(state.navigate(to)),
                None => Ok((false, vec![])),
            }
        }
        Event::Back => Ok(state.navigate(Navigate::Back)),
        Event::FocusSearchBar => match state.shell.screen_mut() {
            Screen::Search(search) => Ok((search.focus_query(), vec![])),
            _ => Ok((false, vec![])),
        },
        Event::FocusResults => match state.shell.screen_mut() {
            Screen::Search(search) => Ok((search.focus_results(), vec![])),
            _ => Ok((false, vec![])),
        },
        Event::Char(c) => match state.shell.screen_mut() {
            Screen::Search(search) if search.focus() == SearchFocus::Typing => {
                let actions = search.push_char(*c, &mut state.ids);
                tracing::trace!(query = %search.query(), "query updated");
                Ok((true, actions))
            }
            _ => Ok((false, vec![])),
        },
        Event::Backspace => match state.shell.screen_mut() {
            Screen::Search(search) => {
                search.focus_query();
                let actions = search.pop_char(&mut state.ids);
                Ok((true, actions))
            }
            _ => Ok((false, vec![])),
        },
        Event::LoadMore => match state.shell.screen_mut() {
            Screen::Results(results) => {
                let actions = results.load_more(&state.client, &mut state.ids);
                Ok((!actions.is_empty() || !results.has_more(), actions))
            }
            _ => Ok((false, vec![])),
        },
        Event::RetryCover => match state.shell.screen_mut() {
            Screen::Details(details) => {
                let actions = details.retry(&mut state.ids);
                Ok((!actions.is_empty(), actions))
            }
            _ => Ok((false, vec![])),
        },
        Event::Resize { rows, cols } => {
            if state.rows == *rows && state.cols == *cols {
                return Ok((false, vec![]));
            }
            tracing::debug!(rows = rows, cols = cols, "pane resized");
            let actions = state.resize(*rows, *cols);
            Ok((!actions.is_empty(), actions))
        }
        Event::TimerFired(ticket) => match state.shell.screen_mut() {
            Screen::Search(search) => {
                let actions = search.on_timer(*ticket, &state.client, &mut state.ids);
                Ok((!actions.is_empty() || !search.is_loading(), actions))
            }
            _ => {
                tracing::debug!(ticket = %ticket, "timer fired after its screen was torn down");
                Ok((false, vec![]))
            }
        },
        Event::PageFetched { request_id, status, body } => {
            let id = *request_id;
            let mut render = false;
            let mut actions = vec![];
            match state.shell.screen_mut() {
                Screen::Search(search) if search.awaits(id) => {
                    render = search.on_page(id, state.client.decode(*status, body));
                }
                Screen::Results(results) if results.awaits(id) => {
                    render = results.on_page(id, state.client.decode(*status, body));
                    actions = results.end_reached(&state.client, &mut state.ids);
                }
                _ => tracing::debug!(request_id = %id, status = status, "dropping page for unmounted screen"),
            }
            Ok((render, actions))
        }
        Event::CoverFetched { request_id, status, body } => match state.shell.screen_mut() {
            Screen::Details(details) if details.awaits(*request_id) => {
                let render = details.on_cover(*request_id, CoverImage::decode(*status, body));
                Ok((render, vec![]))
            }
            _ => {
                tracing::debug!(request_id = %request_id, "dropping cover for unmounted screen");
                Ok((false, vec![]))
            }
        },
        Event::FetchFailed { request_id, reason } => {
            let id = *request_id;
            let mut actions = vec![];
            let render = match state.shell.screen_mut() {
                Screen::Search(search) if search.awaits(id) => {
                    search.on_page(id, Err(BookfinderError::Transport(reason.clone())))
                }
                Screen::Results(results) if results.awaits(id) => {
                    let applied = results.on_page(id, Err(BookfinderError::Transport(reason.clone())));
                    actions = results.end_reached(&state.client, &mut state.ids);
                    applied
                }
                Screen::Details(details) if details.awaits(id) => {
                    details.on_cover(id, Err(BookfinderError::ImageLoad(reason.clone())))
                }
                _ => {
                    tracing::debug!(request_id = %id, reason = %reason, "dropping failure for unmounted screen");
                    false
                }
            };
            Ok((render, actions))
        }
        Event::PermissionsResult { granted } => {
            if *granted {
                tracing::debug!("web access granted");
            } else {
                tracing::warn!("web access denied - catalog requests will fail");
            }
            Ok((false, vec![]))
        }
    }
}

/// Event discriminant for span fields, without response bodies.
struct EventKind<'a>(&'a Event);

impl std::fmt::Debug for EventKind<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Event::PageFetched { request_id, status, body } => {
                write!(f, "PageFetched({request_id}, {status}, {} bytes)", body.len())
            }
            Event::CoverFetched { request_id, status, body } => {
                write!(f, "CoverFetched({request_id}, {status}, {} bytes)", body.len())
            }
            other => write!(f, "{other:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::navigation::ScreenKind;
    use crate::catalog::CatalogClient;
    use crate::ui::theme::Theme;
    use std::time::Duration;

    const DUNE_PAGE: &[u8] = br#"{"totalItems":2,"items":[
        {"id":"a","volumeInfo":{"title":"Dune","authors":["Frank Herbert"],
         "averageRating":3.5,"ratingsCount":12,
         "imageLinks":{"thumbnail":"http://books.example/a?id=a"}}},
        {"id":"b","volumeInfo":{"title":"Dune Messiah"}}
    ]}"#;

    fn state() -> AppState {
        let mut state = AppState::new(
            CatalogClient::new("https://catalog.example/books/v1", 10),
            Theme::default(),
            Duration::from_millis(500),
        );
        handle_event(&mut state, &Event::Resize { rows: 24, cols: 80 }).unwrap();
        state
    }

    fn send(state: &mut AppState, event: Event) -> Vec<Action> {
        handle_event(state, &event).unwrap().1
    }

    fn type_query(state: &mut AppState, text: &str) -> TimerTicket {
        let mut ticket = None;
        for c in text.chars() {
            for action in send(state, Event::Char(c)) {
                if let Action::ScheduleTimer { ticket: t, .. } = action {
                    ticket = Some(t);
                }
            }
        }
        ticket.expect("debounce timer")
    }

    fn single_fetch(actions: &[Action]) -> (RequestId, String) {
        match actions {
            [Action::FetchPage { request_id, url } | Action::FetchCover { request_id, url }] => {
                (*request_id, url.clone())
            }
            other => panic!("expected one fetch, got {other:?}"),
        }
    }

    fn searched(state: &mut AppState) {
        let ticket = type_query(state, "dune");
        let (id, _) = single_fetch(&send(state, Event::TimerFired(ticket)));
        send(state, Event::PageFetched { request_id: id, status: 200, body: DUNE_PAGE.to_vec() });
    }

    #[test]
    fn full_flow_search_results_details_and_back() {
        let mut state = state();
        searched(&mut state);

        send(&mut state, Event::Enter);
        assert_eq!(state.shell.kind(), ScreenKind::Results);

        let actions = send(&mut state, Event::Enter);
        assert_eq!(state.shell.kind(), ScreenKind::Details);
        let (_, url) = single_fetch(&actions);
        assert_eq!(url, "https://books.example/a?id=a&v=0");

        send(&mut state, Event::Back);
        assert_eq!(state.shell.kind(), ScreenKind::Results);
        send(&mut state, Event::Back);
        assert_eq!(state.shell.kind(), ScreenKind::Search);
    }

    #[test]
    fn stale_timer_does_not_fetch() {
        let mut state = state();
        let first = type_query(&mut state, "du");
        let second = type_query(&mut state, "ne");
        assert!(send(&mut state, Event::TimerFired(first)).is_empty());
        let (_, url) = single_fetch(&send(&mut state, Event::TimerFired(second)));
        assert!(url.contains("q=dune&startIndex=0&maxResults=10"));
    }

    #[test]
    fn page_for_torn_down_search_is_dropped() {
        let mut state = state();
        let ticket = type_query(&mut state, "dune");
        let (id, _) = single_fetch(&send(&mut state, Event::TimerFired(ticket)));

        send(&mut state, Event::Enter);
        assert_eq!(state.shell.kind(), ScreenKind::Results);
        let (render, _) = handle_event(
            &mut state,
            &Event::PageFetched { request_id: id, status: 200, body: DUNE_PAGE.to_vec() },
        )
        .unwrap();
        assert!(!render);
    }

    #[test]
    fn leaving_search_cancels_debounce() {
        let mut state = state();
        searched(&mut state);
        let ticket = type_query(&mut state, "s");
        let actions = send(&mut state, Event::Enter);
        assert!(actions.contains(&Action::CancelTimer { ticket }));
        assert_eq!(state.shell.kind(), ScreenKind::Results);
    }

    #[test]
    fn explicit_load_more_waits_for_auto_trigger() {
        let mut state = state();
        searched(&mut state);
        send(&mut state, Event::Enter);

        // Two seeded items fill less than half the list, so the next page is requested.
        let actions = send(&mut state, Event::LoadMore);
        let in_flight = match state.shell.screen() {
            Screen::Results(results) => results.is_loading(),
            _ => false,
        };
        assert!(actions.is_empty());
        assert!(in_flight);
    }

    #[test]
    fn results_failure_preserves_items_and_clears_loading() {
        let mut state = AppState::new(
            CatalogClient::new("https://catalog.example/books/v1", 10),
            Theme::default(),
            Duration::from_millis(500),
        );
        searched(&mut state);
        send(&mut state, Event::Enter);

        let (id, _) = single_fetch(&send(&mut state, Event::LoadMore));
        send(&mut state, Event::PageFetched { request_id: id, status: 500, body: vec![] });

        let Screen::Results(results) = state.shell.screen() else {
            panic!("expected results screen");
        };
        assert_eq!(results.items().len(), 2);
        assert!(!results.is_loading());
    }

    #[test]
    fn cover_retry_flow() {
        let mut state = state();
        searched(&mut state);
        send(&mut state, Event::KeyDown);
        let (id, _) = single_fetch(&send(&mut state, Event::Enter));
        assert_eq!(state.shell.kind(), ScreenKind::Details);

        assert!(send(&mut state, Event::RetryCover).is_empty());
        send(&mut state, Event::FetchFailed { request_id: id, reason: "timeout".to_string() });

        let (_, url) = single_fetch(&send(&mut state, Event::RetryCover));
        assert!(url.ends_with("&v=1"));
    }

    #[test]
    fn search_server_error_shows_message() {
        let mut state = state();
        let ticket = type_query(&mut state, "dune");
        let (id, _) = single_fetch(&send(&mut state, Event::TimerFired(ticket)));
        send(&mut state, Event::PageFetched { request_id: id, status: 500, body: vec![] });

        let Screen::Search(search) = state.shell.screen() else {
            panic!("expected search screen");
        };
        assert_eq!(search.error(), Some(crate::domain::error::SEARCH_FAILED_MESSAGE));
        assert!(search.results().is_empty());
        assert!(!search.is_loading());
    }

    #[test]
    fn back_on_search_is_ignored() {
        let mut state = state();
        let (render, actions) = handle_event(&mut state, &Event::Back).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
    }
}
