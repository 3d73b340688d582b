//! Runtime-side bookkeeping for cancellable timers.
//!
//! Zellij timers cannot be cancelled and report back without an identifier.
//! [`TimerQueue`] remembers scheduled tickets in order and turns each host timer
//! firing back into the ticket it belongs to, dropping the ones that were
//! cancelled in the meantime.

use super::ids::TimerTicket;
use std::collections::{HashSet, VecDeque};

/// Maps anonymous host timer firings to [`TimerTicket`]s.
///
/// Every timer in the plugin uses the same debounce delay, so the host fires
/// them in scheduling order.
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    pending: VecDeque<TimerTicket>,
    cancelled: HashSet<TimerTicket>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a timer the runtime just handed to the host.
    pub fn schedule(&mut self, ticket: TimerTicket) {
        self.pending.push_back(ticket);
    }

    /// Marks a scheduled timer as cancelled.
    ///
    /// Unknown or already-fired tickets are ignored.
    pub fn cancel(&mut self, ticket: TimerTicket) {
        if self.pending.contains(&ticket) {
            self.cancelled.insert(ticket);
        }
    }

    /// Consumes one host timer firing.
    ///
    /// Returns the ticket of the timer that fired, or `None` if it had been
    /// cancelled or nothing was scheduled.
    pub fn fire(&mut self) -> Option<TimerTicket> {
        let ticket = self.pending.pop_front()?;
        if self.cancelled.remove(&ticket) {
            tracing::trace!(ticket = %ticket, "swallowed cancelled timer");
            return None;
        }
        Some(ticket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_in_scheduling_order() {
        let mut queue = TimerQueue::new();
        queue.schedule(TimerTicket(1));
        queue.schedule(TimerTicket(2));

        assert_eq!(queue.fire(), Some(TimerTicket(1)));
        assert_eq!(queue.fire(), Some(TimerTicket(2)));
        assert_eq!(queue.fire(), None);
    }

    #[test]
    fn cancelled_timers_are_swallowed() {
        let mut queue = TimerQueue::new();
        queue.schedule(TimerTicket(1));
        queue.schedule(TimerTicket(2));
        queue.cancel(TimerTicket(1));

        assert_eq!(queue.fire(), None);
        assert_eq!(queue.fire(), Some(TimerTicket(2)));
        assert_eq!(queue.fire(), None);
    }

    #[test]
    fn cancelling_unknown_ticket_is_ignored() {
        let mut queue = TimerQueue::new();
        queue.cancel(TimerTicket(9));
        queue.schedule(TimerTicket(9));
        assert_eq!(queue.fire(), Some(TimerTicket(9)));
    }
}
