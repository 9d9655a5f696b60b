//! Interplay Script - RON content loader and schema definitions
//!
//! Loads authored content from RON files:
//! - Condition definitions and level groups
//! - Interactables with their condition groups and reaction chains
//!
//! and builds them into a ready-to-trigger [`Scene`].

mod error;
mod loader;
mod scene;
mod schema;

pub use error::{Error, Result};
pub use loader::{Defs, Loader, UnresolvedRef};
pub use scene::Scene;
pub use schema::conditions::{ConditionDef, ConditionDefs};
pub use schema::interactables::InteractableDefs;
