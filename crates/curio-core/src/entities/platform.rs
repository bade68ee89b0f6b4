use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A programming language or deployment platform.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Platform {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_tags: Vec<String>,
}

impl Platform {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            related_tags: Vec::new(),
        }
    }
}
