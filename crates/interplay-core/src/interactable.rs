//! Interactables: first-match-wins dispatch over condition groups

use crate::{ConditionGroup, EffectSink, Error, ReactionChain, Result, Session};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// What a trigger ended up running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The group at `index` matched; `reacted` is false if it had no chain
    Group { index: usize, reacted: bool },
    /// No group matched and the default chain ran
    Default,
}

/// Something the player can interact with
///
/// Groups are evaluated in declared order and the first match wins, so the
/// order of `groups` is part of the behavior.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Interactable {
    pub name: String,
    /// Where the host should bring the player before triggering; not read by the core
    #[serde(default)]
    pub interaction_point: Option<String>,
    #[serde(default)]
    pub groups: Vec<ConditionGroup>,
    /// Runs when no group matches; triggering without one fails
    #[serde(default)]
    pub default_chain: Option<ReactionChain>,
}

impl Interactable {
    /// Create an interactable with no groups and no default chain
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Append a condition group
    pub fn with_group(mut self, group: ConditionGroup) -> Self {
        self.groups.push(group);
        self
    }

    /// Set the default chain
    pub fn with_default(mut self, chain: ReactionChain) -> Self {
        self.default_chain = Some(chain);
        self
    }

    /// Initialize every chain owned by this interactable
    pub fn init(&mut self) -> Result<()> {
        let chains = self
            .groups
            .iter_mut()
            .filter_map(|g| g.chain.as_mut())
            .chain(self.default_chain.as_mut());
        let mut first_err = None;
        for chain in chains {
            if let Err(err) = chain.init() {
                first_err.get_or_insert(err);
            }
        }
        match first_err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Evaluate the groups and run the chain of the first match, or the default
    ///
    /// Fails with [`Error::NoApplicableReaction`] when nothing matches and no
    /// default chain is set; in that case no reaction has run.
    pub fn trigger(&mut self, session: &mut Session, sink: &mut dyn EffectSink) -> Result<Dispatch> {
        let matched = self
            .groups
            .iter()
            .position(|group| group.evaluate(&session.conditions));

        if let Some(index) = matched {
            debug!("{}: group {} matched", self.name, index);
            let reacted = self.groups[index].execute(session, sink);
            return Ok(Dispatch::Group { index, reacted });
        }

        match &mut self.default_chain {
            Some(chain) => {
                debug!("{}: no group matched, running default chain", self.name);
                chain.run(session, sink);
                Ok(Dispatch::Default)
            }
            None => {
                let err = Error::NoApplicableReaction {
                    interactable: self.name.clone(),
                };
                warn!("{}", err);
                Err(err)
            }
        }
    }
}
