//! Interplay Core - condition-gated reaction dispatcher
//!
//! This crate provides the engine behind interactable objects:
//! - Boolean conditions with stable identities (`Condition`, `ConditionId`)
//! - The authoritative condition store (`ConditionRegistry`)
//! - Conjunctive condition groups, first-match-wins dispatch (`ConditionGroup`, `Interactable`)
//! - Ordered reaction chains with immediate and delayed reactions (`ReactionChain`, `Reaction`)
//! - A virtual-time scheduler for delayed effects (`Timeline`)
//!
//! ## Flow
//!
//! ```text
//! Interactable::trigger
//!  ├── ConditionGroup::evaluate  (in declared order, first match wins)
//!  │    └── ConditionRegistry::matches
//!  ├── ConditionGroup::execute → ReactionChain::run
//!  └── otherwise default ReactionChain::run (or NoApplicableReaction)
//!
//! ReactionChain::run
//!  ├── immediate reactions apply now
//!  └── delayed reactions arm a Timer → Timeline::advance → EffectSink
//! ```
//!
//! All state a trigger touches lives in a [`Session`] passed by `&mut`; there
//! is no global registry.

mod chain;
mod condition;
mod error;
mod group;
mod identity;
mod interactable;
pub mod reaction;
mod registry;
mod session;
mod sink;
pub mod timeline;

pub use chain::{DebugOptions, ReactionChain};
pub use condition::{Condition, ConditionRef};
pub use error::{Error, Result};
pub use group::ConditionGroup;
pub use identity::{ConditionId, TargetId};
pub use interactable::{Dispatch, Interactable};
pub use reaction::{ConditionReaction, DelayedEffect, DelayedReaction, Reaction, TextReaction};
pub use registry::{ConditionRegistry, LevelGroup};
pub use session::Session;
pub use sink::{AppliedEffect, EffectLog, EffectSink};
pub use timeline::{Timeline, TimerToken};
