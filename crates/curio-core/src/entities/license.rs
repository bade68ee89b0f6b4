use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A license entry from one of the license list files.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct License {
    /// Short identifier referenced by software records (e.g. `AGPL-3.0`).
    pub identifier: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
}
