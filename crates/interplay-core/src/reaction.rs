//! Reaction types: the units of effect a chain runs
//!
//! Immediate reactions apply inside [`Reaction::apply`]. Delayed reactions
//! arm a timer on the session's [`Timeline`](crate::Timeline) and apply when
//! it fires; re-applying one cancels its previous timer first.

use crate::{ConditionId, EffectSink, Error, Result, Session, TargetId, TimerToken};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::{debug, warn};

/// A unit of effect owned by one chain
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Reaction {
    /// Set a condition in the registry
    Condition(ConditionReaction),
    /// Show a message
    Text(TextReaction),
    /// Apply an effect after a delay
    Delayed(DelayedReaction),
}

impl Reaction {
    /// Create a condition reaction
    pub fn set_condition(condition: impl Into<ConditionId>, satisfied: bool) -> Self {
        Reaction::Condition(ConditionReaction {
            condition: condition.into(),
            satisfied,
        })
    }

    /// Create a text reaction
    pub fn text(message: impl Into<String>, target: impl Into<TargetId>) -> Self {
        Reaction::Text(TextReaction {
            message: message.into(),
            target: Some(target.into()),
        })
    }

    /// Create a delayed reaction
    pub fn after(delay_seconds: f32, effect: DelayedEffect) -> Self {
        Reaction::Delayed(DelayedReaction::new(delay_seconds, effect))
    }

    /// Prepare the reaction for use
    pub fn init(&mut self) -> Result<()> {
        match self {
            Reaction::Delayed(delayed) => delayed.init(),
            _ => Ok(()),
        }
    }

    /// Apply the reaction
    ///
    /// Authoring mistakes (unknown condition, unset target, bad delay) are
    /// logged and turn the reaction into a no-op.
    pub fn apply(&mut self, session: &mut Session, sink: &mut dyn EffectSink) {
        match self {
            Reaction::Condition(reaction) => reaction.apply(session),
            Reaction::Text(reaction) => reaction.apply(sink),
            Reaction::Delayed(reaction) => reaction.apply(session),
        }
    }

    /// Whether this reaction completes later
    pub fn is_delayed(&self) -> bool {
        matches!(self, Reaction::Delayed(_))
    }
}

impl fmt::Display for Reaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reaction::Condition(r) => write!(f, "ConditionReaction({} = {})", r.condition, r.satisfied),
            Reaction::Text(r) => write!(f, "TextReaction({:?})", r.message),
            Reaction::Delayed(r) => write!(f, "{} after {}s", r.effect, r.delay_seconds),
        }
    }
}

/// Sets the authoritative state of one condition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionReaction {
    pub condition: ConditionId,
    pub satisfied: bool,
}

impl ConditionReaction {
    fn apply(&self, session: &mut Session) {
        match session.conditions.set(self.condition, self.satisfied) {
            Ok(()) => debug!("set {} to {}", self.condition, self.satisfied),
            Err(err) => warn!("condition reaction skipped: {}", err),
        }
    }
}

/// Writes a message to a text target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextReaction {
    pub message: String,
    #[serde(default)]
    pub target: Option<TargetId>,
}

impl TextReaction {
    fn apply(&self, sink: &mut dyn EffectSink) {
        match &self.target {
            Some(target) => sink.write_text(target, &self.message),
            None => warn!(
                "{}",
                Error::MissingSink {
                    reaction: format!("TextReaction({:?})", self.message),
                }
            ),
        }
    }
}

/// Payload of a delayed reaction, applied when its timer fires
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DelayedEffect {
    /// Invoke a host callback; no callback means nothing to do
    Event {
        #[serde(default)]
        callback: Option<TargetId>,
    },
    /// Activate or deactivate a host object
    ObjectToggle {
        #[serde(default)]
        target: Option<TargetId>,
        active: bool,
    },
}

impl DelayedEffect {
    /// Deliver the payload to the sink
    pub fn apply(&self, sink: &mut dyn EffectSink) {
        match self {
            DelayedEffect::Event { callback: Some(callback) } => sink.invoke(callback),
            DelayedEffect::Event { callback: None } => debug!("event reaction has no callback"),
            DelayedEffect::ObjectToggle {
                target: Some(target),
                active,
            } => sink.set_active(target, *active),
            DelayedEffect::ObjectToggle { target: None, .. } => warn!(
                "{}",
                Error::MissingSink {
                    reaction: self.to_string(),
                }
            ),
        }
    }
}

impl fmt::Display for DelayedEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DelayedEffect::Event { .. } => write!(f, "EventReaction"),
            DelayedEffect::ObjectToggle { active, .. } => {
                write!(f, "ObjectToggleReaction(active = {})", active)
            }
        }
    }
}

/// A reaction whose effect lands `delay_seconds` after it is applied
///
/// Holds at most one in-flight timer.
#[derive(Debug, Serialize, Deserialize)]
pub struct DelayedReaction {
    #[serde(default)]
    pub delay_seconds: f32,
    pub effect: DelayedEffect,
    /// Cached delay, set by `init`
    #[serde(skip)]
    wait: Option<Duration>,
    /// Timer armed by the last `apply`
    #[serde(skip)]
    timer: Option<TimerToken>,
}

impl DelayedReaction {
    /// Create a delayed reaction
    pub fn new(delay_seconds: f32, effect: DelayedEffect) -> Self {
        Self {
            delay_seconds,
            effect,
            wait: None,
            timer: None,
        }
    }

    /// Validate and cache the delay
    pub fn init(&mut self) -> Result<()> {
        let wait = Duration::try_from_secs_f32(self.delay_seconds).map_err(|_| {
            Error::InvalidDelay {
                seconds: self.delay_seconds,
            }
        })?;
        self.wait = Some(wait);
        Ok(())
    }

    /// Timer armed by the most recent apply, if any
    pub fn timer(&self) -> Option<TimerToken> {
        self.timer
    }

    /// Whether an armed timer is still waiting to fire
    pub fn is_pending(&self, session: &Session) -> bool {
        self.timer
            .map(|token| session.timeline.is_pending(token))
            .unwrap_or(false)
    }

    fn apply(&mut self, session: &mut Session) {
        let wait = match self.wait {
            Some(wait) => wait,
            None => {
                if let Err(err) = self.init() {
                    warn!("{} skipped: {}", self.effect, err);
                    return;
                }
                self.wait.unwrap_or_default()
            }
        };

        if let Some(previous) = self.timer.take() {
            session.timeline.cancel(previous);
        }
        self.timer = Some(session.timeline.arm(wait, self.effect.clone()));
    }
}

impl Clone for DelayedReaction {
    /// The clone starts without a timer so it can never cancel the original's
    fn clone(&self) -> Self {
        Self {
            delay_seconds: self.delay_seconds,
            effect: self.effect.clone(),
            wait: self.wait,
            timer: None,
        }
    }
}
