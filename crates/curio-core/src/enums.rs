//! Entity kinds and typed entity handles.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// EntityKind
// ---------------------------------------------------------------------------

/// The four kinds of file-backed records managed by Curio.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Software,
    Tag,
    Platform,
    License,
}

impl EntityKind {
    pub const ALL: [Self; 4] = [Self::Software, Self::Tag, Self::Platform, Self::License];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Software => "software",
            Self::Tag => "tag",
            Self::Platform => "platform",
            Self::License => "license",
        }
    }

    /// Data directory holding one file per record of this kind.
    ///
    /// Licenses are kept in flat list files instead, so they have none.
    #[must_use]
    pub const fn directory(self) -> Option<&'static str> {
        match self {
            Self::Software => Some("software"),
            Self::Tag => Some("tags"),
            Self::Platform => Some("platforms"),
            Self::License => None,
        }
    }

    /// Parse a kind from its string name (singular or directory form).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "software" => Some(Self::Software),
            "tag" | "tags" => Some(Self::Tag),
            "platform" | "platforms" => Some(Self::Platform),
            "license" | "licenses" => Some(Self::License),
            _ => None,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// EntityRef
// ---------------------------------------------------------------------------

/// A reference to a named entity of a given kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
pub struct EntityRef {
    pub kind: EntityKind,
    pub name: String,
}

impl EntityRef {
    pub fn new(kind: EntityKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.kind, self.name)
    }
}
