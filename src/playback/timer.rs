//! Single-slot cancellable timer for auto-advance
//!
//! At most one [`ScheduledAdvance`] exists at a time. Every scheduled advance is
//! stamped with a fresh ticket; firing requires presenting the ticket of the
//! *pending* advance, so an advance that was cancelled or replaced can never
//! fire afterwards.

use std::time::Instant;

/// A pending advance and the ticket that identifies it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledAdvance {
    pub ticket: u64,
    pub due: Instant,
}

#[derive(Debug, Default)]
pub struct AdvanceTimer {
    last_ticket: u64,
    pending: Option<ScheduledAdvance>,
}

impl AdvanceTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule an advance at `due`, replacing any pending one
    pub fn schedule(&mut self, due: Instant) -> ScheduledAdvance {
        self.last_ticket += 1;
        let advance = ScheduledAdvance {
            ticket: self.last_ticket,
            due,
        };
        self.pending = Some(advance);
        advance
    }

    /// Drop the pending advance, if any
    pub fn cancel(&mut self) -> Option<ScheduledAdvance> {
        self.pending.take()
    }

    pub fn pending(&self) -> Option<ScheduledAdvance> {
        self.pending
    }

    /// Ticket of the pending advance if it is due at `now`
    pub fn due(&self, now: Instant) -> Option<u64> {
        self.pending
            .filter(|advance| advance.due <= now)
            .map(|advance| advance.ticket)
    }

    /// Consume the pending advance if `ticket` identifies it
    pub fn take(&mut self, ticket: u64) -> Option<ScheduledAdvance> {
        match self.pending {
            Some(advance) if advance.ticket == ticket => self.pending.take(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_schedule_replaces_pending() {
        let now = Instant::now();
        let mut timer = AdvanceTimer::new();
        let first = timer.schedule(now);
        let second = timer.schedule(now + Duration::from_secs(1));
        assert_ne!(first.ticket, second.ticket);
        assert_eq!(timer.pending(), Some(second));
        assert!(timer.take(first.ticket).is_none());
        assert_eq!(timer.take(second.ticket), Some(second));
        assert!(timer.pending().is_none());
    }

    #[test]
    fn test_due_respects_deadline() {
        let now = Instant::now();
        let mut timer = AdvanceTimer::new();
        let advance = timer.schedule(now + Duration::from_millis(500));
        assert_eq!(timer.due(now), None);
        assert_eq!(timer.due(now + Duration::from_millis(500)), Some(advance.ticket));
    }

    #[test]
    fn test_cancelled_ticket_never_fires() {
        let now = Instant::now();
        let mut timer = AdvanceTimer::new();
        let advance = timer.schedule(now);
        timer.cancel();
        assert!(timer.take(advance.ticket).is_none());
        // A later schedule gets a fresh ticket, not the cancelled one
        let next = timer.schedule(now);
        assert!(next.ticket > advance.ticket);
        assert!(timer.take(advance.ticket).is_none());
    }
}
