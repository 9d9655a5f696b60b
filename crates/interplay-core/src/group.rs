//! Condition groups: a conjunction of expected condition states plus the
//! chain to run when all of them hold

use crate::{ConditionRef, ConditionRegistry, EffectSink, ReactionChain, Session};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// One possible outcome of triggering an interactable
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConditionGroup {
    #[serde(default)]
    pub description: String,
    /// Every one of these must match; an empty list always matches
    #[serde(default)]
    pub conditions: Vec<ConditionRef>,
    #[serde(default)]
    pub chain: Option<ReactionChain>,
}

impl ConditionGroup {
    /// Create a group with no conditions and no chain
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Self::default()
        }
    }

    /// Require a condition to have the given state
    pub fn require(mut self, condition_ref: ConditionRef) -> Self {
        self.conditions.push(condition_ref);
        self
    }

    /// Set the chain to run on a match
    pub fn with_chain(mut self, chain: ReactionChain) -> Self {
        self.chain = Some(chain);
        self
    }

    /// Check every reference against the registry, stopping at the first miss
    pub fn evaluate(&self, registry: &ConditionRegistry) -> bool {
        self.conditions.iter().all(|r| registry.matches(r))
    }

    /// Run the chain of a matched group
    ///
    /// Returns whether a chain actually ran.
    pub fn execute(&mut self, session: &mut Session, sink: &mut dyn EffectSink) -> bool {
        match &mut self.chain {
            Some(chain) => {
                chain.run(session, sink);
                true
            }
            None => {
                warn!("group {:?} matched but has no reaction chain", self.description);
                false
            }
        }
    }
}
