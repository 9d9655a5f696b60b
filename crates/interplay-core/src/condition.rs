//! Conditions and the references groups hold to them

use crate::ConditionId;
use serde::{Deserialize, Serialize};

/// A named boolean flag, the authoritative copy lives in the registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    /// Stable identity
    pub id: ConditionId,
    /// Human readable label, display only
    pub description: String,
    /// Current state
    #[serde(default)]
    pub is_satisfied: bool,
    /// State restored by a reset
    #[serde(default)]
    pub default_value: bool,
}

impl Condition {
    /// Create a condition whose current state starts at its default
    pub fn new(id: impl Into<ConditionId>, description: impl Into<String>, default_value: bool) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            is_satisfied: default_value,
            default_value,
        }
    }

    /// Set the current state
    pub fn with_satisfied(mut self, is_satisfied: bool) -> Self {
        self.is_satisfied = is_satisfied;
        self
    }

    /// Restore the default state
    pub fn reset(&mut self) {
        self.is_satisfied = self.default_value;
    }
}

/// A group's expectation about one condition
///
/// This is a comparison key plus an expected value. Changing it never touches
/// the authoritative condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionRef {
    pub id: ConditionId,
    #[serde(default = "default_desired")]
    pub desired: bool,
}

fn default_desired() -> bool {
    true
}

impl ConditionRef {
    /// Expect the condition to have the given state
    pub fn new(id: impl Into<ConditionId>, desired: bool) -> Self {
        Self {
            id: id.into(),
            desired,
        }
    }

    /// Expect the condition to be satisfied
    pub fn satisfied(id: impl Into<ConditionId>) -> Self {
        Self::new(id, true)
    }

    /// Expect the condition to be unsatisfied
    pub fn unsatisfied(id: impl Into<ConditionId>) -> Self {
        Self::new(id, false)
    }
}
