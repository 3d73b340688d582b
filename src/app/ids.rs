//! Identifiers correlating host completions with the state that requested them.
//!
//! Every outgoing web request carries a [`RequestId`] and every scheduled timer a
//! [`TimerTicket`]. Both come from one [`IdSource`] owned by the application
//! state and are never reused, so a completion for a torn-down screen can never
//! match the screen that replaced it.

use std::fmt;

/// Identifier of one outgoing web request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub u64);

/// Identifier of one scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerTicket(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for TimerTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonic allocator for request ids and timer tickets.
#[derive(Debug, Clone, Default)]
pub struct IdSource {
    next: u64,
}

impl IdSource {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn next_request(&mut self) -> RequestId {
        RequestId(self.bump())
    }

    pub fn next_ticket(&mut self) -> TimerTicket {
        TimerTicket(self.bump())
    }

    fn bump(&mut self) -> u64 {
        let id = self.next.max(1);
        self.next = id + 1;
        id
    }
}
