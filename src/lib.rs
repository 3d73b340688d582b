//! Bookfinder: A Zellij plugin for searching a public book catalog.
//!
//! Bookfinder runs in a floating pane and provides:
//! - Debounced as-you-type search against the catalog's `/volumes` endpoint
//! - A paginated results list that loads the next page near its end
//! - A details card with cover status, half-star rating and descriptions

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! │  - web_request / set_timeout / hide_self            │
//! └─────────────────────────────────────────────────────┘
//!                        │ Events ↓   ↑ Actions
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Navigation shell (Search / Results / Details)    │
//! │  - Screen controllers                               │
//! │  - Debounce timer, request correlation              │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Catalog       │   │ Domain        │
//! │ (ui/)         │   │ (catalog/)    │   │ (domain/)     │
//! │ - Rendering   │   │ - Wire types  │   │ - Book        │
//! │ - Theming     │   │ - Mapper      │   │ - Errors      │
//! │ - Components  │   │ - Client      │   │               │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry spans as JSON lines                │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! The library never performs I/O on its own behalf. Every HTTP request and
//! timer is an [`Action`] executed by the plugin shim; the outcome comes back
//! as an [`Event`] carrying the request id or timer ticket it answers.
//!
//! # Configuration
//!
//! ```kdl
//! floating_panes {
//!     pane {
//!         plugin location="file:/path/to/bookfinder.wasm" {
//!             base_url "https://www.googleapis.com/books/v1"
//!             page_size "10"
//!             debounce_ms "500"
//!             theme "catppuccin-mocha"
//!             trace_level "info"
//!         }
//!     }
//! }
//! ```
//!
//! # Platform Support
//!
//! - **Target**: `wasm32-wasip1` (Zellij WASM runtime)
//! - **Permissions**: `WebAccess`

pub mod app;
pub mod catalog;
pub mod domain;
pub mod infrastructure;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, InputMode, SearchFocus, TimerQueue};
pub use catalog::CatalogClient;
pub use domain::{Book, BookfinderError, Result};
pub use ui::Theme;

use std::collections::BTreeMap;
use std::time::Duration;

/// Default catalog endpoint.
pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/books/v1";

/// Default number of results requested per page.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Largest page the catalog accepts.
pub const MAX_PAGE_SIZE: u32 = 40;

/// Default quiet period before a typed query is sent.
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Default built-in theme.
pub const DEFAULT_THEME: &str = "catppuccin-mocha";

/// Plugin configuration parsed from Zellij's configuration system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Catalog base URL, without a trailing `/`.
    pub base_url: String,

    /// Results per page, between 1 and [`MAX_PAGE_SIZE`].
    pub page_size: u32,

    /// Debounce delay for the search field, in milliseconds.
    pub debounce_ms: u64,

    /// Built-in theme name: `catppuccin-mocha` or `catppuccin-latte`.
    /// Ignored if `theme_file` is set.
    pub theme: String,

    /// Path to a custom TOML theme file. `~` refers to the host home.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for the span log, e.g. `info` or `bookfinder=debug`.
    pub trace_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            theme: DEFAULT_THEME.to_string(),
            theme_file: None,
            trace_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Unknown keys are ignored. Missing or invalid values fall back to their
    /// defaults; each invalid value is logged.
    ///
    /// # Parsing Rules
    ///
    /// - `base_url`: non-blank string, trailing `/` stripped
    /// - `page_size`: integer in `1..=40`
    /// - `debounce_ms`: non-negative integer
    /// - `theme`, `theme_file`, `trace_level`: non-blank strings
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let value = |key: &str| {
            config
                .get(key)
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
        };

        let base_url = value("base_url")
            .map(|s| s.trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.base_url);

        let page_size = value("page_size")
            .map(parse_page_size)
            .transpose()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, default = DEFAULT_PAGE_SIZE, "invalid page_size, using default");
                None
            })
            .unwrap_or(defaults.page_size);

        let debounce_ms = value("debounce_ms")
            .map(|s| {
                s.parse::<u64>().map_err(|e| {
                    BookfinderError::Config(format!("debounce_ms {s:?} is not a number: {e}"))
                })
            })
            .transpose()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, default = DEFAULT_DEBOUNCE_MS, "invalid debounce_ms, using default");
                None
            })
            .unwrap_or(defaults.debounce_ms);

        Self {
            base_url,
            page_size,
            debounce_ms,
            theme: value("theme").map_or(defaults.theme, String::from),
            theme_file: value("theme_file").map(String::from),
            trace_level: value("trace_level").map_or(defaults.trace_level, String::from),
        }
    }

    /// Debounce delay as a [`Duration`].
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

fn parse_page_size(raw: &str) -> Result<u32> {
    match raw.parse::<u32>() {
        Ok(size) if (1..=MAX_PAGE_SIZE).contains(&size) => Ok(size),
        Ok(size) => Err(BookfinderError::Config(format!(
            "page_size {size} is outside 1..={MAX_PAGE_SIZE}"
        ))),
        Err(e) => Err(BookfinderError::Config(format!(
            "page_size {raw:?} is not a number: {e}"
        ))),
    }
}

/// Resolves the theme: `theme_file` first, then the built-in `theme`, then
/// the default. Failures are logged and fall through.
fn load_theme(config: &Config) -> Theme {
    if let Some(theme_file) = &config.theme_file {
        let path = infrastructure::expand_tilde(theme_file);
        match Theme::from_file(&path) {
            Ok(theme) => return theme,
            Err(e) => {
                tracing::warn!(theme_file = %path, error = %e, "failed to load theme from file");
            }
        }
    }

    Theme::from_name(&config.theme).unwrap_or_else(|| {
        tracing::debug!(theme_name = %config.theme, "unknown theme, using default");
        Theme::default()
    })
}

/// Initializes the plugin with configuration.
///
/// Creates an `AppState` with the Search screen mounted, a catalog client
/// for `base_url` and `page_size`, and the resolved theme. Does not touch
/// the network.
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(
        base_url = %config.base_url,
        page_size = config.page_size,
        debounce_ms = config.debounce_ms,
        "initializing bookfinder plugin"
    );

    let client = CatalogClient::new(config.base_url.clone(), config.page_size);
    AppState::new(client, load_theme(config), config.debounce())
}
