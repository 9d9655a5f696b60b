//! Condition definition schema

use interplay_core::{Condition, ConditionId, LevelGroup};
use serde::{Deserialize, Serialize};

/// Authored form of a condition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionDef {
    /// Identity assigned when the condition was created
    pub id: ConditionId,
    /// Display label
    pub description: String,
    /// State restored on reset
    #[serde(default)]
    pub default_value: bool,
    /// Saved current state; starts at `default_value` when omitted
    #[serde(default)]
    pub is_satisfied: Option<bool>,
}

impl ConditionDef {
    /// Create a condition definition
    pub fn new(id: u64, description: impl Into<String>, default_value: bool) -> Self {
        Self {
            id: ConditionId::new(id),
            description: description.into(),
            default_value,
            is_satisfied: None,
        }
    }
}

impl From<ConditionDef> for Condition {
    fn from(def: ConditionDef) -> Self {
        let is_satisfied = def.is_satisfied.unwrap_or(def.default_value);
        Condition::new(def.id, def.description, def.default_value).with_satisfied(is_satisfied)
    }
}

/// Contents of a conditions file
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ConditionDefs {
    #[serde(default)]
    pub conditions: Vec<ConditionDef>,
    #[serde(default)]
    pub level_groups: Vec<LevelGroup>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ron_options;

    #[test]
    fn test_current_state_defaults_to_default_value() {
        let condition: Condition = ConditionDef::new(1, "lamp lit", true).into();
        assert!(condition.is_satisfied);

        let saved = ConditionDef {
            is_satisfied: Some(false),
            ..ConditionDef::new(1, "lamp lit", true)
        };
        let condition: Condition = saved.into();
        assert!(!condition.is_satisfied);
        assert!(condition.default_value);
    }

    #[test]
    fn test_parse_condition_defs() {
        let content = r#"
        (
            conditions: [
                (id: 1, description: "has key"),
                (id: 2, description: "lamp lit", default_value: true, is_satisfied: false),
            ],
            level_groups: [
                (title: "cellar", conditions: [1, 2]),
            ],
        )
        "#;
        let defs: ConditionDefs = ron_options().from_str(content).unwrap();
        assert_eq!(defs.conditions.len(), 2);
        assert_eq!(defs.conditions[1].is_satisfied, Some(false));
        assert_eq!(defs.level_groups[0].title, "cellar");
    }
}
