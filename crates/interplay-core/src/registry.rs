//! Authoritative store of every condition in a session

use crate::{Condition, ConditionId, ConditionRef, Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// A titled, ordered list of conditions shown together (e.g. one per level)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelGroup {
    pub title: String,
    #[serde(default)]
    pub conditions: Vec<ConditionId>,
}

impl LevelGroup {
    /// Create a level group
    pub fn new(title: impl Into<String>, conditions: Vec<ConditionId>) -> Self {
        Self {
            title: title.into(),
            conditions,
        }
    }
}

/// Owner of the authoritative copy of every condition
///
/// Exactly one condition exists per [`ConditionId`]; uniqueness is enforced
/// when conditions are registered, never at lookup time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConditionRegistry {
    /// All conditions by ID, in registration order
    conditions: IndexMap<ConditionId, Condition>,
    /// Next ID handed out by `create`
    next_id: u64,
    /// Level groups by title
    level_groups: IndexMap<String, Vec<ConditionId>>,
}

impl ConditionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new condition with a fresh identity
    ///
    /// Fails with [`Error::DuplicateIdentity`] once the ID space is used up.
    pub fn create(
        &mut self,
        description: impl Into<String>,
        default_value: bool,
    ) -> Result<ConditionId> {
        let id = ConditionId::new(self.next_id);
        let condition = Condition::new(id, description, default_value);
        debug!("creating {} ({:?})", id, condition.description);
        self.register(condition)?;
        Ok(id)
    }

    /// Add a fully populated condition
    pub fn register(&mut self, condition: Condition) -> Result<()> {
        let id = condition.id;
        if self.conditions.contains_key(&id) {
            return Err(Error::DuplicateIdentity(id));
        }
        self.next_id = self.next_id.max(id.raw().saturating_add(1));
        self.conditions.insert(id, condition);
        Ok(())
    }

    /// Remove a condition
    ///
    /// References to it stay in place and simply stop matching.
    pub fn remove(&mut self, id: ConditionId) -> Option<Condition> {
        let removed = self.conditions.shift_remove(&id)?;
        for ids in self.level_groups.values_mut() {
            ids.retain(|&cid| cid != id);
        }
        Some(removed)
    }

    /// Look up the authoritative condition
    pub fn resolve(&self, id: ConditionId) -> Result<&Condition> {
        self.conditions
            .get(&id)
            .ok_or(Error::UnresolvedReference(id))
    }

    /// Get a condition by ID
    pub fn get(&self, id: ConditionId) -> Option<&Condition> {
        self.conditions.get(&id)
    }

    /// Set the current state of a condition
    pub fn set(&mut self, id: ConditionId, is_satisfied: bool) -> Result<()> {
        let condition = self
            .conditions
            .get_mut(&id)
            .ok_or(Error::UnresolvedReference(id))?;
        condition.is_satisfied = is_satisfied;
        Ok(())
    }

    /// Compare a reference against the authoritative state
    ///
    /// An unresolved reference never matches.
    pub fn matches(&self, condition_ref: &ConditionRef) -> bool {
        match self.resolve(condition_ref.id) {
            Ok(condition) => condition.is_satisfied == condition_ref.desired,
            Err(err) => {
                warn!("{}, treating as not matched", err);
                false
            }
        }
    }

    /// Restore every condition to its default state
    pub fn reset_all(&mut self) {
        for condition in self.conditions.values_mut() {
            condition.reset();
        }
        debug!("reset {} conditions to defaults", self.conditions.len());
    }

    /// Define (or replace) a level group
    pub fn define_level_group(&mut self, group: LevelGroup) {
        self.level_groups.insert(group.title, group.conditions);
    }

    /// Current conditions of a level group, skipping unknown IDs
    pub fn level_group(&self, title: &str) -> Option<Vec<&Condition>> {
        self.level_groups
            .get(title)
            .map(|ids| ids.iter().filter_map(|id| self.conditions.get(id)).collect())
    }

    /// Titles of all level groups, in definition order
    pub fn level_groups(&self) -> impl Iterator<Item = &str> {
        self.level_groups.keys().map(String::as_str)
    }

    /// Descriptions of all conditions, in registration order
    pub fn descriptions(&self) -> Vec<&str> {
        self.conditions
            .values()
            .map(|c| c.description.as_str())
            .collect()
    }

    /// Get all condition IDs
    pub fn ids(&self) -> impl Iterator<Item = ConditionId> + '_ {
        self.conditions.keys().copied()
    }

    /// Get all conditions
    pub fn iter(&self) -> impl Iterator<Item = &Condition> {
        self.conditions.values()
    }

    /// Get the number of conditions
    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}
