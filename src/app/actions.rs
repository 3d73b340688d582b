//! Actions representing side effects to be executed by the plugin runtime.
//!
//! This module defines the [`Action`] type, which represents imperative commands
//! produced by the event handler after processing user input or host events.
//! Actions bridge pure state transformations and effectful operations like
//! web requests, timers, and hiding the plugin pane.
//!
//! # Architecture
//!
//! The event handler returns a `Vec<Action>` after processing each event, allowing
//! multiple side effects to be queued atomically. The plugin runtime executes
//! these actions in order and reports their completions back as events.

use super::ids::{RequestId, TimerTicket};
use std::time::Duration;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Closes the focused floating pane, hiding the plugin UI.
    CloseFocus,

    /// Fetches one page of catalog search results.
    ///
    /// Completes with `Event::PageFetched` or `Event::FetchFailed` carrying the
    /// same `request_id`.
    FetchPage {
        request_id: RequestId,
        url: String,
    },

    /// Fetches a cover image.
    ///
    /// Completes with `Event::CoverFetched` or `Event::FetchFailed`.
    FetchCover {
        request_id: RequestId,
        url: String,
    },

    /// Starts a one-shot timer that reports back as `Event::TimerFired(ticket)`.
    ScheduleTimer {
        ticket: TimerTicket,
        delay: Duration,
    },

    /// Cancels a scheduled timer; its firing is swallowed by the runtime.
    CancelTimer {
        ticket: TimerTicket,
    },
}
