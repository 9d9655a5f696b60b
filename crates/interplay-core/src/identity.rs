//! Identity types for conditions and host-side targets

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identity of a condition
///
/// Assigned once when the condition is created and never derived from its
/// description, so renaming a condition keeps every reference to it intact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConditionId(pub u64);

impl ConditionId {
    /// Create a condition ID
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConditionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "condition:{}", self.0)
    }
}

impl From<u64> for ConditionId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Name of something the host owns: a text field, a scene object, a callback
///
/// The core treats these as opaque keys and hands them back to the
/// [`EffectSink`](crate::EffectSink) untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetId(pub String);

impl TargetId {
    /// Create a target ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TargetId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for TargetId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condition_id() {
        let id = ConditionId::new(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(format!("{}", id), "condition:42");
    }

    #[test]
    fn test_target_id() {
        let id = TargetId::new("door_label");
        assert_eq!(id.as_str(), "door_label");
        assert_eq!(format!("{}", id), "door_label");
    }

    #[test]
    fn test_condition_id_is_transparent_in_ron() {
        let id: ConditionId = ron::from_str("7").unwrap();
        assert_eq!(id, ConditionId::new(7));
    }
}
