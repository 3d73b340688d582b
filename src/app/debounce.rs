//! Trailing-edge debounce timer owned by a single controller.
//!
//! At most one timer is armed at a time. Arming a new one cancels the previous
//! one, and only the armed ticket is accepted when a timer fires.

use super::actions::Action;
use super::ids::{IdSource, TimerTicket};
use std::time::Duration;

/// Default delay between the last keystroke and the search request.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    armed: Option<TimerTicket>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self { delay, armed: None }
    }

    /// Arms a fresh timer, cancelling the previous one.
    ///
    /// Returns the runtime actions: an optional cancellation followed by the
    /// new schedule.
    pub fn arm(&mut self, ids: &mut IdSource) -> Vec<Action> {
        let mut actions = self.cancel();
        let ticket = ids.next_ticket();
        self.armed = Some(ticket);
        actions.push(Action::ScheduleTimer {
            ticket,
            delay: self.delay,
        });
        actions
    }

    /// Disarms the pending timer, if any.
    pub fn cancel(&mut self) -> Vec<Action> {
        self.armed
            .take()
            .map(|ticket| vec![Action::CancelTimer { ticket }])
            .unwrap_or_default()
    }

    /// Accepts a timer firing.
    ///
    /// Returns `true` exactly when `ticket` is the armed timer, which is then
    /// consumed.
    pub fn fire(&mut self, ticket: TimerTicket) -> bool {
        if self.armed == Some(ticket) {
            self.armed = None;
            true
        } else {
            false
        }
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rearming_cancels_previous_timer() {
        let mut ids = IdSource::new();
        let mut debouncer = Debouncer::default();

        let first = debouncer.arm(&mut ids);
        let Action::ScheduleTimer { ticket: first_ticket, delay } = first[0] else {
            panic!("expected schedule");
        };
        assert_eq!(delay, DEFAULT_DEBOUNCE);

        let second = debouncer.arm(&mut ids);
        assert_eq!(second[0], Action::CancelTimer { ticket: first_ticket });
        let Action::ScheduleTimer { ticket: second_ticket, .. } = second[1] else {
            panic!("expected schedule");
        };

        assert!(!debouncer.fire(first_ticket));
        assert!(debouncer.fire(second_ticket));
        assert!(debouncer.cancel().is_empty());
    }

    #[test]
    fn cancel_without_timer_is_noop() {
        let mut debouncer = Debouncer::default();
        assert!(debouncer.cancel().is_empty());
    }
}
