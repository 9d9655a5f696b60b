//! A built scene: one session plus the interactables that share it

use crate::error::{Error, Result};
use interplay_core::{Dispatch, EffectSink, Interactable, Session};
use std::collections::BTreeMap;
use std::time::Duration;

/// Loaded content ready to trigger
#[derive(Debug)]
pub struct Scene {
    pub session: Session,
    pub interactables: BTreeMap<String, Interactable>,
}

impl Scene {
    /// Create a scene
    pub fn new(session: Session, interactables: BTreeMap<String, Interactable>) -> Self {
        Self {
            session,
            interactables,
        }
    }

    /// Session-start hook: reset every condition to its default
    pub fn start(&mut self) {
        self.session.reset();
    }

    /// Trigger an interactable by name
    pub fn trigger(&mut self, name: &str, sink: &mut dyn EffectSink) -> Result<Dispatch> {
        let interactable = self
            .interactables
            .get_mut(name)
            .ok_or_else(|| Error::UnknownInteractable(name.to_string()))?;
        Ok(interactable.trigger(&mut self.session, sink)?)
    }

    /// Advance virtual time, firing due delayed effects
    pub fn advance(&mut self, dt: Duration, sink: &mut dyn EffectSink) -> usize {
        self.session.advance(dt, sink)
    }

    /// Names of all interactables
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.interactables.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use interplay_core::{EffectLog, ReactionChain};

    #[test]
    fn test_unknown_interactable() {
        let mut scene = Scene::new(Session::new(), BTreeMap::new());
        let mut log = EffectLog::new();
        assert!(matches!(
            scene.trigger("ghost", &mut log),
            Err(Error::UnknownInteractable(name)) if name == "ghost"
        ));
    }

    #[test]
    fn test_trigger_error_is_wrapped() {
        let mut interactables = BTreeMap::new();
        interactables.insert("bare".to_string(), Interactable::new("bare"));
        interactables.insert(
            "sign".to_string(),
            Interactable::new("sign").with_default(ReactionChain::new("read")),
        );
        let mut scene = Scene::new(Session::new(), interactables);
        let mut log = EffectLog::new();

        assert!(matches!(
            scene.trigger("bare", &mut log),
            Err(Error::Core(interplay_core::Error::NoApplicableReaction { .. }))
        ));
        assert_eq!(scene.trigger("sign", &mut log).unwrap(), Dispatch::Default);
        assert_eq!(scene.names().collect::<Vec<_>>(), vec!["bare", "sign"]);
    }
}
