//! Virtual-time scheduler for delayed effects
//!
//! The host owns the clock and calls [`Timeline::advance`] (e.g. once per
//! frame); due effects are delivered to the host's [`EffectSink`] from inside
//! that call. Nothing here spawns threads or sleeps.

use crate::{reaction::DelayedEffect, EffectSink};
use std::fmt;
use std::time::Duration;
use tracing::debug;

/// Handle to one armed timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

impl TimerToken {
    /// Get the raw token value
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TimerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer:{}", self.0)
    }
}

#[derive(Debug, Clone)]
struct Scheduled {
    due: Duration,
    token: TimerToken,
    effect: DelayedEffect,
}

/// Pending delayed effects ordered by due time
#[derive(Debug, Default)]
pub struct Timeline {
    now: Duration,
    next_token: u64,
    /// Sorted by due time; ties keep arm order
    scheduled: Vec<Scheduled>,
}

impl Timeline {
    /// Create a timeline at time zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedule an effect `delay` from now
    pub fn arm(&mut self, delay: Duration, effect: DelayedEffect) -> TimerToken {
        let token = TimerToken(self.next_token);
        self.next_token += 1;
        let due = self.now.saturating_add(delay);
        debug!("armed {} due at {:?}", token, due);
        self.scheduled.push(Scheduled { due, token, effect });
        self.scheduled.sort_by_key(|s| s.due);
        token
    }

    /// Cancel a pending timer
    ///
    /// Returns false if the timer already fired or was cancelled.
    pub fn cancel(&mut self, token: TimerToken) -> bool {
        let before = self.scheduled.len();
        self.scheduled.retain(|s| s.token != token);
        let cancelled = self.scheduled.len() != before;
        if cancelled {
            debug!("cancelled {}", token);
        }
        cancelled
    }

    /// Check whether a timer is still waiting to fire
    pub fn is_pending(&self, token: TimerToken) -> bool {
        self.scheduled.iter().any(|s| s.token == token)
    }

    /// When a pending timer is due
    pub fn due_at(&self, token: TimerToken) -> Option<Duration> {
        self.scheduled
            .iter()
            .find(|s| s.token == token)
            .map(|s| s.due)
    }

    /// Number of pending timers
    pub fn pending(&self) -> usize {
        self.scheduled.len()
    }

    /// Move time forward by `dt`, firing everything that comes due
    ///
    /// Returns how many effects fired.
    pub fn advance(&mut self, dt: Duration, sink: &mut dyn EffectSink) -> usize {
        let target = self.now.saturating_add(dt);
        self.advance_to(target, sink)
    }

    /// Move time forward to `target`, firing everything due at or before it
    ///
    /// Effects fire in due order and `now` reads as each effect's due time
    /// while it is applied. A target in the past leaves the clock alone.
    pub fn advance_to(&mut self, target: Duration, sink: &mut dyn EffectSink) -> usize {
        let mut fired = 0;
        while let Some(next) = self.scheduled.first() {
            if next.due > target {
                break;
            }
            let entry = self.scheduled.remove(0);
            self.now = self.now.max(entry.due);
            debug!("fired {} at {:?}", entry.token, self.now);
            entry.effect.apply(sink);
            fired += 1;
        }
        self.now = self.now.max(target);
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AppliedEffect, EffectLog, TargetId};

    fn invoke(name: &str) -> DelayedEffect {
        DelayedEffect::Event {
            callback: Some(TargetId::new(name)),
        }
    }

    fn invoked(log: &EffectLog) -> Vec<&str> {
        log.applied
            .iter()
            .filter_map(|e| match e {
                AppliedEffect::Invoke { callback } => Some(callback.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_fires_at_due_time() {
        let mut timeline = Timeline::new();
        let mut log = EffectLog::new();
        let token = timeline.arm(Duration::from_secs(2), invoke("bell"));

        assert_eq!(timeline.advance(Duration::from_millis(1999), &mut log), 0);
        assert!(timeline.is_pending(token));

        assert_eq!(timeline.advance(Duration::from_millis(1), &mut log), 1);
        assert!(!timeline.is_pending(token));
        assert_eq!(invoked(&log), vec!["bell"]);
        assert_eq!(timeline.now(), Duration::from_secs(2));
    }

    #[test]
    fn test_fires_in_due_order() {
        let mut timeline = Timeline::new();
        let mut log = EffectLog::new();
        timeline.arm(Duration::from_secs(3), invoke("late"));
        timeline.arm(Duration::from_secs(1), invoke("early"));
        timeline.arm(Duration::from_secs(1), invoke("early_second"));

        timeline.advance(Duration::from_secs(5), &mut log);
        assert_eq!(invoked(&log), vec!["early", "early_second", "late"]);
    }

    #[test]
    fn test_cancelled_timer_never_fires() {
        let mut timeline = Timeline::new();
        let mut log = EffectLog::new();
        let token = timeline.arm(Duration::from_secs(1), invoke("bell"));

        assert!(timeline.cancel(token));
        assert!(!timeline.cancel(token));
        timeline.advance(Duration::from_secs(10), &mut log);
        assert!(log.is_empty());
    }

    #[test]
    fn test_fires_at_most_once() {
        let mut timeline = Timeline::new();
        let mut log = EffectLog::new();
        let token = timeline.arm(Duration::ZERO, invoke("bell"));

        timeline.advance(Duration::ZERO, &mut log);
        timeline.advance(Duration::from_secs(1), &mut log);
        assert_eq!(log.len(), 1);
        assert!(!timeline.cancel(token));
    }

    #[test]
    fn test_advance_to_past_keeps_clock() {
        let mut timeline = Timeline::new();
        let mut log = EffectLog::new();
        timeline.advance(Duration::from_secs(4), &mut log);
        timeline.advance_to(Duration::from_secs(1), &mut log);
        assert_eq!(timeline.now(), Duration::from_secs(4));
    }

    #[test]
    fn test_huge_durations_saturate() {
        let mut timeline = Timeline::new();
        let mut log = EffectLog::new();
        timeline.advance(Duration::from_secs(1), &mut log);

        let token = timeline.arm(Duration::MAX, invoke("far_future"));
        assert_eq!(timeline.due_at(token), Some(Duration::MAX));

        assert_eq!(timeline.advance(Duration::MAX, &mut log), 1);
        assert_eq!(timeline.now(), Duration::MAX);
        assert_eq!(timeline.advance(Duration::from_secs(1), &mut log), 0);
        assert_eq!(invoked(&log), vec!["far_future"]);
    }

    #[test]
    fn test_due_at_is_relative_to_arm_time() {
        let mut timeline = Timeline::new();
        let mut log = EffectLog::new();
        timeline.advance(Duration::from_secs(10), &mut log);
        let token = timeline.arm(Duration::from_millis(500), invoke("bell"));
        assert_eq!(timeline.due_at(token), Some(Duration::from_millis(10_500)));
        assert_eq!(timeline.pending(), 1);
    }
}
