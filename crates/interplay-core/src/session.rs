//! Session state shared by every interactable

use crate::{ConditionRegistry, EffectSink, Timeline};
use std::time::Duration;
use tracing::info;

/// Everything a trigger reads or writes besides the interactable itself
///
/// Created once per play session and passed by `&mut` wherever conditions are
/// read or reactions run, so access is serialized by the borrow checker.
#[derive(Debug, Default)]
pub struct Session {
    /// Authoritative conditions
    pub conditions: ConditionRegistry,
    /// Delayed effects waiting to fire
    pub timeline: Timeline,
}

impl Session {
    /// Create an empty session
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session around an existing registry
    pub fn with_conditions(conditions: ConditionRegistry) -> Self {
        Self {
            conditions,
            timeline: Timeline::new(),
        }
    }

    /// Session-start hook: restore every condition to its default
    ///
    /// Pending timers are left alone.
    pub fn reset(&mut self) {
        self.conditions.reset_all();
        info!("session reset ({} conditions)", self.conditions.len());
    }

    /// Advance virtual time, firing due delayed effects
    pub fn advance(&mut self, dt: Duration, sink: &mut dyn EffectSink) -> usize {
        self.timeline.advance(dt, sink)
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.timeline.now()
    }
}
