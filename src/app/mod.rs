//! Application layer coordinating state, events, and actions.
//!
//! This module sits between the plugin runtime (main.rs) and the catalog and
//! domain layers. It never performs I/O: host completions come in as events
//! and side effects go out as actions.
//!
//! # Architecture
//!
//! ```text
//! User Input → Events → Event Handler → Screen Controllers → Actions → Side Effects
//!                            ↑                                            ↓
//!                            └─────────── Web Responses / Timers ─────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing and routing to the mounted screen
//! - [`navigation`]: Screen tagged union and permitted transitions
//! - [`search`], [`results`], [`details`]: Per-screen controllers
//! - [`debounce`], [`timers`], [`ids`]: Request and timer correlation
//! - [`modes`]: Input mode types
//! - [`state`]: Central application state container and view model computation

pub mod actions;
pub mod debounce;
pub mod details;
pub mod handler;
pub mod ids;
pub mod modes;
pub mod navigation;
pub mod results;
pub mod search;
pub mod state;
pub mod timers;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use ids::{RequestId, TimerTicket};
pub use modes::{InputMode, SearchFocus};
pub use navigation::{Navigate, Screen, ScreenKind, Shell};
pub use state::AppState;
pub use timers::TimerQueue;
