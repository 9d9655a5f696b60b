//! Reaction chains: ordered lists of reactions run together

use crate::{EffectSink, Reaction, Result, Session};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Presentation-only switches for inspecting a chain while authoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DebugOptions {
    /// Master switch; the other flags do nothing without it
    #[serde(default)]
    pub enabled: bool,
    /// Ask the host to pause before the chain runs
    #[serde(default)]
    pub pause_on_run: bool,
    /// Log each run of the chain
    #[serde(default)]
    pub log_on_run: bool,
}

/// An ordered list of reactions
///
/// The chain exclusively owns its reactions, so each delayed reaction's
/// timer belongs to exactly one chain.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReactionChain {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub reactions: Vec<Reaction>,
    #[serde(default)]
    pub debug: DebugOptions,
    #[serde(skip)]
    initialized: bool,
}

impl ReactionChain {
    /// Create an empty chain
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Self::default()
        }
    }

    /// Append a reaction
    pub fn with(mut self, reaction: Reaction) -> Self {
        self.reactions.push(reaction);
        self
    }

    /// Set the debug options
    pub fn with_debug(mut self, debug: DebugOptions) -> Self {
        self.debug = debug;
        self
    }

    /// Initialize every reaction
    ///
    /// All reactions are visited even if one fails; the first failure is returned.
    pub fn init(&mut self) -> Result<()> {
        let mut first_err = None;
        for reaction in &mut self.reactions {
            if let Err(err) = reaction.init() {
                first_err.get_or_insert(err);
            }
        }
        self.initialized = true;
        match first_err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Run every reaction in declared order
    ///
    /// Immediate reactions have applied by the time this returns; delayed
    /// ones have only been armed.
    pub fn run(&mut self, session: &mut Session, sink: &mut dyn EffectSink) {
        if !self.initialized {
            if let Err(err) = self.init() {
                warn!("chain {:?} initialized with errors: {}", self.description, err);
            }
        }

        self.debug_actions(sink);

        for reaction in &mut self.reactions {
            reaction.apply(session, sink);
        }
    }

    fn debug_actions(&self, sink: &mut dyn EffectSink) {
        if !self.debug.enabled {
            return;
        }
        if self.debug.pause_on_run {
            info!("debug: pausing on chain {:?}", self.description);
            sink.request_pause(&self.description);
        }
        if self.debug.log_on_run {
            info!("debug: running chain {:?}", self.description);
        }
    }

    /// Number of reactions
    pub fn len(&self) -> usize {
        self.reactions.len()
    }

    /// Check if the chain has no reactions
    pub fn is_empty(&self) -> bool {
        self.reactions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AppliedEffect, Condition, ConditionRef, DelayedEffect, EffectLog, Error, TargetId};
    use std::time::Duration;

    #[test]
    fn test_immediate_reactions_run_in_order() {
        let mut session = Session::new();
        session.conditions.register(Condition::new(1, "seen", false)).unwrap();
        let mut log = EffectLog::new();

        let mut chain = ReactionChain::new("greet")
            .with(Reaction::text("one", "caption"))
            .with(Reaction::set_condition(1, true))
            .with(Reaction::text("two", "caption"));
        chain.run(&mut session, &mut log);

        assert_eq!(log.texts_for("caption"), vec!["one", "two"]);
        assert!(session.conditions.matches(&ConditionRef::satisfied(1)));
    }

    #[test]
    fn test_delayed_reactions_do_not_block() {
        let mut session = Session::new();
        let mut log = EffectLog::new();

        let mut chain = ReactionChain::new("open")
            .with(Reaction::after(
                1.0,
                DelayedEffect::ObjectToggle {
                    target: Some(TargetId::new("door")),
                    active: false,
                },
            ))
            .with(Reaction::text("Creak.", "caption"));
        chain.run(&mut session, &mut log);

        assert_eq!(
            log.drain(),
            vec![AppliedEffect::Text {
                target: TargetId::new("caption"),
                message: "Creak.".to_string()
            }]
        );

        session.advance(Duration::from_secs(1), &mut log);
        assert_eq!(
            log.drain(),
            vec![AppliedEffect::SetActive {
                target: TargetId::new("door"),
                active: false
            }]
        );
    }

    #[test]
    fn test_missing_sink_does_not_stop_chain() {
        let mut session = Session::new();
        session.conditions.register(Condition::new(1, "done", false)).unwrap();
        let mut log = EffectLog::new();

        let mut chain = ReactionChain::new("partial")
            .with(Reaction::Text(crate::TextReaction {
                message: "nowhere".to_string(),
                target: None,
            }))
            .with(Reaction::set_condition(99, true))
            .with(Reaction::set_condition(1, true));
        chain.run(&mut session, &mut log);

        assert!(session.conditions.matches(&ConditionRef::satisfied(1)));
    }

    #[test]
    fn test_rerun_rearms_delayed_reaction() {
        let mut session = Session::new();
        let mut log = EffectLog::new();
        let mut chain = ReactionChain::new("bell").with(Reaction::after(
            2.0,
            DelayedEffect::Event {
                callback: Some(TargetId::new("ring")),
            },
        ));

        chain.run(&mut session, &mut log);
        session.advance(Duration::from_millis(1500), &mut log);
        chain.run(&mut session, &mut log);

        session.advance(Duration::from_millis(1999), &mut log);
        assert!(log.is_empty());
        session.advance(Duration::from_millis(1), &mut log);
        assert_eq!(log.len(), 1);
        assert_eq!(session.now(), Duration::from_millis(3500));
    }

    #[test]
    fn test_init_reports_first_bad_delay() {
        let mut chain = ReactionChain::new("broken")
            .with(Reaction::after(-2.0, DelayedEffect::Event { callback: None }))
            .with(Reaction::after(-3.0, DelayedEffect::Event { callback: None }));
        assert_eq!(chain.init().unwrap_err(), Error::InvalidDelay { seconds: -2.0 });
    }

    #[test]
    fn test_debug_options() {
        let mut session = Session::new();
        let mut log = EffectLog::new();

        let mut quiet = ReactionChain::new("quiet").with_debug(DebugOptions {
            enabled: false,
            pause_on_run: true,
            log_on_run: true,
        });
        quiet.run(&mut session, &mut log);
        assert!(log.is_empty());

        let mut loud = ReactionChain::new("loud").with_debug(DebugOptions {
            enabled: true,
            pause_on_run: true,
            log_on_run: false,
        });
        loud.run(&mut session, &mut log);
        assert_eq!(
            log.applied,
            vec![AppliedEffect::Pause {
                chain: "loud".to_string()
            }]
        );
    }
}
