//! Error types for interplay-core

use crate::ConditionId;
use thiserror::Error;

/// Core error type
///
/// Only [`Error::NoApplicableReaction`] is ever returned from
/// [`Interactable::trigger`](crate::Interactable::trigger). The data-resolution
/// variants are built for diagnostics and recovered locally by the dispatch path.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Two conditions were registered with the same identity
    #[error("duplicate condition identity: {0}")]
    DuplicateIdentity(ConditionId),

    /// A condition reference or reaction target names no registered condition
    #[error("unresolved condition reference: {0}")]
    UnresolvedReference(ConditionId),

    /// No group matched and the interactable has no default chain
    #[error("no applicable reaction for interactable {interactable:?}: no group matched and no default chain is set")]
    NoApplicableReaction { interactable: String },

    /// A reaction's output target is unset
    #[error("reaction {reaction} has no output target")]
    MissingSink { reaction: String },

    /// A delayed reaction was configured with a negative or non-finite delay
    #[error("invalid reaction delay: {seconds} seconds")]
    InvalidDelay { seconds: f32 },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

// Fails to compile if Error stops being Send + Sync.
fn _assert_error_send_sync<T: Send + Sync>() {}
fn _error_is_send_sync() {
    _assert_error_send_sync::<Error>();
}
