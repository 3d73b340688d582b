//! Zellij plugin wrapper and entry point.
//!
//! This module is the thin integration layer between the Bookfinder library
//! and the Zellij plugin system. It translates host events into library
//! events and executes the library's actions through the plugin API.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Permissions**: Request `WebAccess`; requests issued before the answer
//!    are held back and sent (or failed) once it arrives
//! 3. **Subscribe**: `Key`, `WebRequestResult`, `Timer`, `PermissionRequestResult`
//! 4. **Update**: Map events, run `handle_event`, execute actions
//! 5. **Render**: Report pane size changes, then draw
//!
//! # Host Correlation
//!
//! - Web requests carry `request_id` and `kind` (`page` or `cover`) in their
//!   context map, which comes back untouched with `WebRequestResult`.
//! - Host timers carry nothing and cannot be cancelled. Every timer is
//!   registered in a [`TimerQueue`]; each `Timer` event pops the oldest live
//!   ticket and cancelled tickets are swallowed.
//!
//! # Keybindings
//!
//! Global:
//! - `Ctrl+n` / `Down`: Move down
//! - `Ctrl+p` / `Up`: Move up
//! - `Enter`: Submit query (typing) or open the selected book
//!
//! Search screen, typing:
//! - Printable keys and `Backspace`: Edit query
//! - `Tab`: Browse results
//! - `Esc`: Close plugin
//!
//! Search screen, browsing:
//! - `j`/`k`: Navigate
//! - `Tab`, `/` or `Esc`: Edit query
//! - `q`: Close plugin
//!
//! Results screen:
//! - `j`/`k`: Navigate
//! - `m`: Load more
//! - `Esc`: Back to a fresh search
//! - `q`: Close plugin
//!
//! Details screen:
//! - `r`: Retry cover
//! - `Esc`: Back
//! - `q`: Close plugin

#![allow(clippy::multiple_crate_versions)]

use std::collections::{BTreeMap, VecDeque};
use zellij_tile::prelude::*;

use bookfinder::app::RequestId;
use bookfinder::{handle_event, Action, AppState, Config, Event, InputMode, SearchFocus, TimerQueue};

register_plugin!(State);

/// Context key carrying the request id of a web request.
const REQUEST_ID_KEY: &str = "request_id";

/// Context key carrying the request kind of a web request.
const KIND_KEY: &str = "kind";

const KIND_PAGE: &str = "page";
const KIND_COVER: &str = "cover";

/// Plugin state wrapper.
///
/// Wraps the library's `AppState` with host concerns: the timer queue, the
/// web access permission and the last rendered pane size.
struct State {
    /// Core application state from library layer.
    app: AppState,

    /// Host timers in scheduling order.
    timers: TimerQueue,

    /// `None` until the permission request is answered.
    web_access: Option<bool>,

    /// Requests issued before the permission answer arrived.
    deferred: Vec<Action>,

    /// Pane size last reported to the library.
    size: (usize, usize),
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: bookfinder::initialize(&Config::default()),
            timers: TimerQueue::new(),
            web_access: None,
            deferred: Vec::new(),
            size: (0, 0),
        }
    }
}

impl ZellijPlugin for State {
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        bookfinder::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(base_url = %config.base_url, page_size = config.page_size, "parsed configuration");
        self.app = bookfinder::initialize(&config);

        tracing::debug!("requesting permissions");
        request_permission(&[PermissionType::WebAccess]);

        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::Timer,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Handles incoming Zellij events. Returns `true` if the UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match Self::map_web_result(status, body, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::Timer(_elapsed) => match self.timers.fire() {
                Some(ticket) => Event::TimerFired(ticket),
                None => {
                    tracing::debug!("cancelled timer fired - ignoring");
                    return false;
                }
            },
            zellij_tile::prelude::Event::PermissionRequestResult(status) => {
                return self.handle_permission_result(status);
            }
            _ => return false,
        };

        self.dispatch(our_event)
    }

    fn render(&mut self, rows: usize, cols: usize) {
        if self.size != (rows, cols) {
            self.size = (rows, cols);
            self.dispatch(Event::Resize { rows, cols });
        }
        bookfinder::ui::render(&self.app, rows, cols);
    }
}

impl State {
    /// Runs `event` through the library and executes the resulting actions.
    ///
    /// Actions that complete synchronously (requests refused for lack of web
    /// access) feed their completion back into the same loop.
    fn dispatch(&mut self, event: Event) -> bool {
        let mut pending = VecDeque::from([event]);
        let mut should_render = false;

        while let Some(event) = pending.pop_front() {
            match handle_event(&mut self.app, &event) {
                Ok((render, actions)) => {
                    tracing::debug!(action_count = actions.len(), should_render = render, "event handled");
                    should_render |= render;
                    for action in actions {
                        pending.extend(self.execute_action(action));
                    }
                }
                Err(e) => {
                    tracing::error!(error = %e, "error handling event");
                }
            }
        }

        should_render
    }

    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                format!("WebRequestResult({status})")
            }
            zellij_tile::prelude::Event::Timer(..) => "Timer".to_string(),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, "key event");

        if key.bare_key == BareKey::Char('n') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::KeyDown);
        }
        if key.bare_key == BareKey::Char('p') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::KeyUp);
        }

        let mode = self.app.input_mode();
        let typing = mode.is_typing();

        Some(match key.bare_key {
            BareKey::Down => Event::KeyDown,
            BareKey::Up => Event::KeyUp,
            BareKey::Char('j') if !typing => Event::KeyDown,
            BareKey::Char('k') if !typing => Event::KeyUp,
            BareKey::Enter => Event::Enter,
            BareKey::Backspace => Event::Backspace,
            BareKey::Esc => match mode {
                InputMode::Search(SearchFocus::Typing) => Event::CloseFocus,
                InputMode::Search(SearchFocus::Browsing) => Event::FocusSearchBar,
                InputMode::Results | InputMode::Details => Event::Back,
            },
            BareKey::Tab => match mode {
                InputMode::Search(SearchFocus::Typing) => Event::FocusResults,
                InputMode::Search(SearchFocus::Browsing) => Event::FocusSearchBar,
                InputMode::Results | InputMode::Details => return None,
            },
            BareKey::Char('/') if mode == InputMode::Search(SearchFocus::Browsing) => {
                Event::FocusSearchBar
            }
            BareKey::Char('q') if !typing => Event::CloseFocus,
            BareKey::Char('m') if mode == InputMode::Results => Event::LoadMore,
            BareKey::Char('r') if mode == InputMode::Details => Event::RetryCover,
            BareKey::Char(c) if typing => Event::Char(c),
            _ => return None,
        })
    }

    /// Maps a web response back to the request that issued it.
    fn map_web_result(status: u16, body: Vec<u8>, context: &BTreeMap<String, String>) -> Option<Event> {
        let Some(request_id) = context
            .get(REQUEST_ID_KEY)
            .and_then(|id| id.parse::<u64>().ok())
            .map(RequestId)
        else {
            tracing::debug!("web response without request id - ignoring");
            return None;
        };

        tracing::debug!(request_id = %request_id, status, body_len = body.len(), "web response");

        match context.get(KIND_KEY).map(String::as_str) {
            Some(KIND_PAGE) => Some(Event::PageFetched {
                request_id,
                status,
                body,
            }),
            Some(KIND_COVER) => Some(Event::CoverFetched {
                request_id,
                status,
                body,
            }),
            kind => {
                tracing::debug!(kind = ?kind, "web response with unknown kind - ignoring");
                None
            }
        }
    }

    /// Records the permission answer and releases or fails held requests.
    fn handle_permission_result(&mut self, status: PermissionStatus) -> bool {
        let granted = matches!(status, PermissionStatus::Granted);
        self.web_access = Some(granted);

        let mut should_render = self.dispatch(Event::PermissionsResult { granted });
        for action in std::mem::take(&mut self.deferred) {
            for feedback in self.execute_action(action) {
                should_render |= self.dispatch(feedback);
            }
        }
        should_render
    }

    fn web_get(request_id: RequestId, url: &str, kind: &str) {
        let context = BTreeMap::from([
            (REQUEST_ID_KEY.to_string(), request_id.to_string()),
            (KIND_KEY.to_string(), kind.to_string()),
        ]);
        web_request(url, HttpVerb::Get, BTreeMap::new(), vec![], context);
    }

    /// Sends a fetch, holds it until permissions are answered, or fails it
    /// when web access was denied.
    fn fetch(&mut self, action: Action) -> Option<Event> {
        let (request_id, url, kind) = match &action {
            Action::FetchPage { request_id, url } => (*request_id, url.clone(), KIND_PAGE),
            Action::FetchCover { request_id, url } => (*request_id, url.clone(), KIND_COVER),
            _ => return None,
        };

        match self.web_access {
            Some(true) => {
                Self::web_get(request_id, &url, kind);
                None
            }
            Some(false) => {
                tracing::warn!(request_id = %request_id, "web access denied - failing request");
                Some(Event::FetchFailed {
                    request_id,
                    reason: "web access permission denied".to_string(),
                })
            }
            None => {
                tracing::debug!(request_id = %request_id, "holding request until permissions are answered");
                self.deferred.push(action);
                None
            }
        }
    }

    /// Executes an action returned from event handling.
    ///
    /// Returns the completion event when the action finishes immediately.
    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&mut self, action: Action) -> Option<Event> {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
                None
            }
            fetch @ (Action::FetchPage { .. } | Action::FetchCover { .. }) => self.fetch(fetch),
            Action::ScheduleTimer { ticket, delay } => {
                self.timers.schedule(ticket);
                set_timeout(delay.as_secs_f64());
                None
            }
            Action::CancelTimer { ticket } => {
                self.timers.cancel(ticket);
                None
            }
        }
    }
}
