//! Cancelable one-shot timers on a caller-driven clock.
//!
//! The host owns the event loop: it passes the current time into every
//! operation and calls `tick` to fire whatever came due. A `TimerSlot` holds
//! at most one deadline; arming it again supersedes the previous one, so a
//! stale deadline can never fire after it was replaced or cancelled.

use chrono::{DateTime, TimeDelta, Utc};

/// Handle identifying one arming of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

/// A deadline that came due: which arming it was and when it was due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired {
    pub token: TimerToken,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Deadline {
    at: DateTime<Utc>,
    token: TimerToken,
}

#[derive(Debug, Default)]
pub struct TimerSlot {
    pending: Option<Deadline>,
    armed_count: u64,
}

impl TimerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the slot to fire `delay` after `now`, superseding any pending
    /// deadline.
    pub fn arm(&mut self, now: DateTime<Utc>, delay: TimeDelta) -> TimerToken {
        self.armed_count += 1;
        let token = TimerToken(self.armed_count);
        self.pending = Some(Deadline {
            at: now + delay,
            token,
        });
        token
    }

    /// Drop the pending deadline. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    pub fn due_at(&self) -> Option<DateTime<Utc>> {
        self.pending.map(|d| d.at)
    }

    pub fn token(&self) -> Option<TimerToken> {
        self.pending.map(|d| d.token)
    }

    /// Fire the deadline if it has come due, disarming the slot. The
    /// reported time is the deadline itself, not `now`, so a late tick does
    /// not skew timestamps derived from it.
    pub fn fire(&mut self, now: DateTime<Utc>) -> Option<Fired> {
        match self.pending {
            Some(d) if d.at <= now => {
                self.pending = None;
                Some(Fired {
                    token: d.token,
                    at: d.at,
                })
            }
            _ => None,
        }
    }
}
