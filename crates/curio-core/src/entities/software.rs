use std::collections::BTreeMap;

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A software project listed in the catalog.
///
/// `name` is the only key that must be present for the record to load; every
/// other required field defaults to empty and is reported by the linter.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Software {
    pub name: String,
    #[serde(default)]
    pub website_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_code_url: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub licenses: Vec<String>,
    #[serde(default)]
    pub platforms: Vec<String>,
    /// Tag names; the first one decides where the project is rendered.
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_software_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depends_3rdparty: Option<bool>,
    /// Extra links in `[text](url)` form.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub external_links: Vec<String>,

    // Enrichment block, owned by the metadata step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stargazers_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_release: Option<Release>,
    /// Commit counts keyed by `YYYY-MM`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit_history: Option<BTreeMap<String, u64>>,
}

/// Latest upstream release, as recorded by external tooling.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Release {
    pub tag: String,
    pub published_at: String,
}

/// The remotely sourced fields of a [`Software`] record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Enrichment {
    pub stargazers_count: Option<u64>,
    pub updated_at: Option<NaiveDate>,
    pub archived: Option<bool>,
    pub current_release: Option<Release>,
}

impl Enrichment {
    /// Stars, activity date and archived flag are populated. A project may
    /// have no release, so `current_release` does not count.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.stargazers_count.is_some() && self.updated_at.is_some() && self.archived.is_some()
    }
}

impl Software {
    /// Minimal record with the given name and every other field empty.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            website_url: String::new(),
            source_code_url: None,
            description: String::new(),
            licenses: Vec::new(),
            platforms: Vec::new(),
            tags: Vec::new(),
            demo_url: None,
            related_software_url: None,
            depends_3rdparty: None,
            external_links: Vec::new(),
            stargazers_count: None,
            updated_at: None,
            archived: None,
            current_release: None,
            commit_history: None,
        }
    }

    #[must_use]
    pub fn enrichment(&self) -> Enrichment {
        Enrichment {
            stargazers_count: self.stargazers_count,
            updated_at: self.updated_at,
            archived: self.archived,
            current_release: self.current_release.clone(),
        }
    }

    /// Overwrite the enrichment block. Returns `true` if any field changed.
    pub fn apply_enrichment(&mut self, enrichment: Enrichment) -> bool {
        if self.enrichment() == enrichment {
            return false;
        }
        self.stargazers_count = enrichment.stargazers_count;
        self.updated_at = enrichment.updated_at;
        self.archived = enrichment.archived;
        self.current_release = enrichment.current_release;
        true
    }

    /// Link used as the main entry URL: the website, or the source code URL
    /// when no website is recorded.
    #[must_use]
    pub fn main_url(&self) -> Option<&str> {
        if self.website_url.is_empty() {
            self.source_code_url.as_deref()
        } else {
            Some(&self.website_url)
        }
    }

    /// Whether the record marks itself as archived upstream.
    #[must_use]
    pub fn is_archived(&self) -> bool {
        self.archived.unwrap_or(false)
    }
}
