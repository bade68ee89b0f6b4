use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::is_external_url;

/// A category that software items are filed under.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Tag {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_tags: Vec<String>,
    /// Set when the tag is deprecated in favor of another tag or list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect: Option<Redirect>,
    /// External lists that take over this category.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub delegate: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub external_links: Vec<String>,
}

/// Redirect target(s) of a deprecated tag.
///
/// Accepts either a single string or a list; each entry is a tag name or an
/// external URL.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(untagged)]
pub enum Redirect {
    Single(String),
    List(Vec<String>),
}

impl Redirect {
    /// Non-empty redirect targets.
    pub fn targets(&self) -> impl Iterator<Item = &str> {
        let slice: &[String] = match self {
            Self::Single(target) => std::slice::from_ref(target),
            Self::List(targets) => targets,
        };
        slice
            .iter()
            .map(String::as_str)
            .filter(|target| !target.trim().is_empty())
    }
}

impl Tag {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            related_tags: Vec::new(),
            redirect: None,
            delegate: Vec::new(),
            external_links: Vec::new(),
        }
    }

    /// A tag redirects when it has at least one non-empty redirect target.
    #[must_use]
    pub fn is_redirect(&self) -> bool {
        self.redirect
            .as_ref()
            .is_some_and(|redirect| redirect.targets().next().is_some())
    }

    /// Redirect targets that name another tag rather than an external URL.
    pub fn redirect_tag_targets(&self) -> impl Iterator<Item = &str> {
        self.redirect
            .iter()
            .flat_map(|redirect| redirect.targets())
            .filter(|target| !is_external_url(target))
    }
}
