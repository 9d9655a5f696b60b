//! Interactable definition schema
//!
//! Interactables are authored directly in the core types; this module only
//! describes the file wrapper.

use interplay_core::Interactable;
use serde::{Deserialize, Serialize};

/// Contents of an interactables file
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct InteractableDefs {
    pub interactables: Vec<Interactable>,
}
