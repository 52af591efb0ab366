//! Virtual clock with a single cancellable pending advance.
//!
//! Real time only enters through [`AdvanceTimer::advance`], so playback is
//! deterministic under test: advancing by exactly the armed delay fires
//! exactly one advance.
//!
//! Each arming gets a fresh token from a monotonically increasing sequence.
//! Cancelling drops the pending advance, and a token that no longer matches
//! the pending one is stale and must be ignored by whoever holds it.

use std::time::Duration;

/// An advance scheduled to fire at `due`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingAdvance {
    /// Identifies this arming; never reused.
    pub token: u64,
    /// Virtual time at which the advance fires.
    pub due: Duration,
}

/// Virtual clock holding at most one pending advance.
#[derive(Debug, Clone, Default)]
pub struct AdvanceTimer {
    now: Duration,
    pending: Option<PendingAdvance>,
    next_token: u64,
}

impl AdvanceTimer {
    /// Create a timer at virtual time zero with nothing armed.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
            pending: None,
            next_token: 0,
        }
    }

    /// Current virtual time.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// The advance currently scheduled, if any.
    #[must_use]
    pub const fn pending(&self) -> Option<PendingAdvance> {
        self.pending
    }

    /// Whether an advance is scheduled.
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// Time left until the pending advance fires.
    #[must_use]
    pub fn remaining(&self) -> Option<Duration> {
        self.pending.map(|p| p.due.saturating_sub(self.now))
    }

    /// Schedule an advance `delay` from now, replacing any pending one.
    ///
    /// Returns the token of the new arming.
    pub fn arm(&mut self, delay: Duration) -> u64 {
        let token = self.next_token;
        self.next_token += 1;
        self.pending = Some(PendingAdvance {
            token,
            due: self.now + delay,
        });
        token
    }

    /// Drop the pending advance, returning it if one was armed.
    pub fn cancel(&mut self) -> Option<PendingAdvance> {
        self.pending.take()
    }

    /// Take the pending advance if it carries `token`.
    ///
    /// Returns `None` for stale tokens, leaving the current arming intact.
    pub fn take_if(&mut self, token: u64) -> Option<PendingAdvance> {
        match self.pending {
            Some(pending) if pending.token == token => {
                self.now = self.now.max(pending.due);
                self.pending = None;
                Some(pending)
            }
            _ => None,
        }
    }

    /// Move the clock forward by up to `elapsed`.
    ///
    /// If the pending advance falls due within that span the clock stops at
    /// its deadline, the advance is disarmed and returned together with the
    /// unused part of `elapsed`. Otherwise the whole span is consumed.
    pub fn advance(&mut self, elapsed: Duration) -> Option<(PendingAdvance, Duration)> {
        match self.pending {
            Some(pending) if self.now + elapsed >= pending.due => {
                let used = pending.due.saturating_sub(self.now);
                self.now = pending.due;
                self.pending = None;
                Some((pending, elapsed.saturating_sub(used)))
            }
            _ => {
                self.now += elapsed;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_100: Duration = Duration::from_millis(100);

    #[test]
    fn test_new_timer() {
        let timer = AdvanceTimer::new();
        assert_eq!(timer.now(), Duration::ZERO);
        assert!(!timer.is_armed());
        assert!(timer.remaining().is_none());
    }

    #[test]
    fn test_arm_and_fire() {
        let mut timer = AdvanceTimer::new();
        let token = timer.arm(MS_100);
        assert!(timer.is_armed());
        assert_eq!(timer.remaining(), Some(MS_100));

        assert!(timer.advance(Duration::from_millis(60)).is_none());
        assert_eq!(timer.remaining(), Some(Duration::from_millis(40)));

        let (fired, leftover) = timer.advance(Duration::from_millis(50)).expect("fires");
        assert_eq!(fired.token, token);
        assert_eq!(leftover, Duration::from_millis(10));
        assert_eq!(timer.now(), MS_100);
        assert!(!timer.is_armed());
    }

    #[test]
    fn test_exact_deadline_fires() {
        let mut timer = AdvanceTimer::new();
        timer.arm(MS_100);
        let (_, leftover) = timer.advance(MS_100).expect("fires");
        assert_eq!(leftover, Duration::ZERO);
    }

    #[test]
    fn test_tokens_are_unique() {
        let mut timer = AdvanceTimer::new();
        let a = timer.arm(MS_100);
        let b = timer.arm(MS_100);
        timer.cancel();
        let c = timer.arm(MS_100);
        assert!(a < b && b < c);
    }

    #[test]
    fn test_rearm_replaces_pending() {
        let mut timer = AdvanceTimer::new();
        timer.arm(MS_100);
        timer.advance(Duration::from_millis(90));
        let token = timer.arm(MS_100);
        assert!(timer.advance(Duration::from_millis(20)).is_none());
        let (fired, _) = timer.advance(Duration::from_millis(80)).expect("fires");
        assert_eq!(fired.token, token);
    }

    #[test]
    fn test_cancel_prevents_fire() {
        let mut timer = AdvanceTimer::new();
        timer.arm(MS_100);
        assert!(timer.cancel().is_some());
        assert!(timer.advance(Duration::from_secs(10)).is_none());
        assert!(timer.cancel().is_none());
    }

    #[test]
    fn test_take_if_rejects_stale_token() {
        let mut timer = AdvanceTimer::new();
        let stale = timer.arm(MS_100);
        let fresh = timer.arm(MS_100);
        assert!(timer.take_if(stale).is_none());
        assert!(timer.is_armed());
        assert_eq!(timer.take_if(fresh).map(|p| p.token), Some(fresh));
        assert_eq!(timer.now(), MS_100);
        assert!(!timer.is_armed());
    }
}
