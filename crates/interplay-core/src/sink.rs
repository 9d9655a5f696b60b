//! Effect sinks: the host-side receivers reactions write to
//!
//! The core decides *when* a sink is called and *with what*; what the sink
//! does with it (draw text, enable an object, fire a callback) is up to the host.

use crate::TargetId;

/// Receiver for reaction output
pub trait EffectSink {
    /// Show a message in the named text target
    fn write_text(&mut self, target: &TargetId, message: &str);

    /// Activate or deactivate the named object
    fn set_active(&mut self, target: &TargetId, active: bool);

    /// Invoke the named callback
    fn invoke(&mut self, callback: &TargetId);

    /// A chain with the pause debug option is about to run
    fn request_pause(&mut self, _chain: &str) {}
}

/// One call made against an [`EffectLog`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppliedEffect {
    Text { target: TargetId, message: String },
    SetActive { target: TargetId, active: bool },
    Invoke { callback: TargetId },
    Pause { chain: String },
}

/// An [`EffectSink`] that records every call in order
#[derive(Debug, Clone, Default)]
pub struct EffectLog {
    pub applied: Vec<AppliedEffect>,
}

impl EffectLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the recorded effects, leaving the log empty
    pub fn drain(&mut self) -> Vec<AppliedEffect> {
        std::mem::take(&mut self.applied)
    }

    /// Number of recorded effects
    pub fn len(&self) -> usize {
        self.applied.len()
    }

    /// Check if nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.applied.is_empty()
    }

    /// Messages written to a text target, oldest first
    pub fn texts_for(&self, target: &str) -> Vec<&str> {
        self.applied
            .iter()
            .filter_map(|effect| match effect {
                AppliedEffect::Text { target: t, message } if t.as_str() == target => {
                    Some(message.as_str())
                }
                _ => None,
            })
            .collect()
    }
}

impl EffectSink for EffectLog {
    fn write_text(&mut self, target: &TargetId, message: &str) {
        self.applied.push(AppliedEffect::Text {
            target: target.clone(),
            message: message.to_string(),
        });
    }

    fn set_active(&mut self, target: &TargetId, active: bool) {
        self.applied.push(AppliedEffect::SetActive {
            target: target.clone(),
            active,
        });
    }

    fn invoke(&mut self, callback: &TargetId) {
        self.applied.push(AppliedEffect::Invoke {
            callback: callback.clone(),
        });
    }

    fn request_pause(&mut self, chain: &str) {
        self.applied.push(AppliedEffect::Pause {
            chain: chain.to_string(),
        });
    }
}
