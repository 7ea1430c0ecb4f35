//! Two-phase like bookkeeping for the loaded song.
//!
//! A toggle applies a tentative value immediately and remembers what it
//! replaced. The backend answer either commits it or rolls it back. After a
//! commit the authoritative counter is fetched once the reconcile window has
//! passed; that fetch overwrites whatever the tentative math produced.

use std::time::Duration;

/// Delay between a confirmed toggle and the authoritative count refresh.
pub const LIKE_RECONCILE_WINDOW: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LikeTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LikeSnapshot {
    pub liked: bool,
    pub count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingToggle {
    ticket: LikeTicket,
    previous: LikeSnapshot,
}

/// What a toggle asks the backend to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeIntent {
    pub ticket: LikeTicket,
    pub like: bool,
}

#[derive(Debug, Clone, Default)]
pub struct LikeTracker {
    shown: LikeSnapshot,
    pending: Option<PendingToggle>,
    next_ticket: u64,
}

impl LikeTracker {
    /// Start tracking a newly loaded song with its row counter.
    pub fn reset(&mut self, count: u64) {
        self.shown = LikeSnapshot {
            liked: false,
            count,
        };
        self.pending = None;
    }

    pub fn snapshot(&self) -> LikeSnapshot {
        self.shown
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Apply the tentative flip. Returns `None` while a toggle is in flight.
    pub fn begin_toggle(&mut self) -> Option<LikeIntent> {
        if self.pending.is_some() {
            return None;
        }

        self.next_ticket += 1;
        let ticket = LikeTicket(self.next_ticket);
        let previous = self.shown;
        let like = !previous.liked;

        self.shown = LikeSnapshot {
            liked: like,
            count: if like {
                previous.count + 1
            } else {
                previous.count.saturating_sub(1)
            },
        };
        self.pending = Some(PendingToggle { ticket, previous });

        Some(LikeIntent { ticket, like })
    }

    /// Commit the tentative value. Stale tickets are ignored.
    pub fn confirm(&mut self, ticket: LikeTicket) -> bool {
        match self.pending {
            Some(pending) if pending.ticket == ticket => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    /// Restore the value the toggle replaced. Stale tickets are ignored.
    pub fn rollback(&mut self, ticket: LikeTicket) -> bool {
        match self.pending {
            Some(pending) if pending.ticket == ticket => {
                self.shown = pending.previous;
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    /// Authoritative counter from the backend; deferred while a toggle is open.
    pub fn apply_count(&mut self, count: u64) -> bool {
        if self.pending.is_some() {
            return false;
        }
        self.shown.count = count;
        true
    }

    /// Authoritative like relation for the current user.
    pub fn apply_liked(&mut self, liked: bool) -> bool {
        if self.pending.is_some() {
            return false;
        }
        self.shown.liked = liked;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_then_confirm_keeps_tentative_value() {
        let mut tracker = LikeTracker::default();
        tracker.reset(4);

        let intent = tracker.begin_toggle().unwrap();
        assert!(intent.like);
        assert_eq!(tracker.snapshot(), LikeSnapshot { liked: true, count: 5 });

        assert!(tracker.confirm(intent.ticket));
        assert!(!tracker.is_pending());
        assert_eq!(tracker.snapshot().count, 5);
    }

    #[test]
    fn unlike_never_goes_negative() {
        let mut tracker = LikeTracker::default();
        tracker.reset(0);
        tracker.apply_liked(true);

        let intent = tracker.begin_toggle().unwrap();
        assert!(!intent.like);
        assert_eq!(tracker.snapshot().count, 0);
    }

    #[test]
    fn rollback_restores_previous_snapshot() {
        let mut tracker = LikeTracker::default();
        tracker.reset(10);
        let intent = tracker.begin_toggle().unwrap();
        assert!(tracker.rollback(intent.ticket));
        assert_eq!(tracker.snapshot(), LikeSnapshot { liked: false, count: 10 });
    }

    #[test]
    fn second_toggle_waits_for_first() {
        let mut tracker = LikeTracker::default();
        tracker.reset(1);
        let first = tracker.begin_toggle().unwrap();
        assert!(tracker.begin_toggle().is_none());
        tracker.confirm(first.ticket);
        assert!(tracker.begin_toggle().is_some());
    }

    #[test]
    fn authoritative_count_is_held_back_while_pending() {
        let mut tracker = LikeTracker::default();
        tracker.reset(3);
        let intent = tracker.begin_toggle().unwrap();
        assert!(!tracker.apply_count(99));
        assert_eq!(tracker.snapshot().count, 4);

        tracker.confirm(intent.ticket);
        assert!(tracker.apply_count(7));
        assert_eq!(tracker.snapshot().count, 7);
    }

    #[test]
    fn stale_ticket_is_ignored_after_reset() {
        let mut tracker = LikeTracker::default();
        tracker.reset(2);
        let intent = tracker.begin_toggle().unwrap();
        tracker.reset(8);
        assert!(!tracker.confirm(intent.ticket));
        assert!(!tracker.rollback(intent.ticket));
        assert_eq!(tracker.snapshot().count, 8);
    }
}
