//! Dead link check options.

use std::time::Duration;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Record fields that can hold a checkable URL. `url` is the license link.
pub const URL_KEYS: [&str; 5] = [
    "website_url",
    "source_code_url",
    "demo_url",
    "related_software_url",
    "url",
];

fn default_check_keys() -> Vec<String> {
    ["url", "source_code_url", "website_url", "demo_url"]
        .map(String::from)
        .to_vec()
}

const fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CheckUrlsConfig {
    /// Fields whose URLs are checked, from [`URL_KEYS`].
    #[serde(default = "default_check_keys")]
    pub check_keys: Vec<String>,

    /// URLs matching any of these patterns are skipped.
    #[serde(default)]
    pub exclude_regex: Vec<String>,

    /// A dead link fails the step (otherwise it is only reported).
    #[serde(default)]
    pub errors_are_fatal: bool,

    /// Timeout of a single check, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for CheckUrlsConfig {
    fn default() -> Self {
        Self {
            check_keys: default_check_keys(),
            exclude_regex: Vec::new(),
            errors_are_fatal: false,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl CheckUrlsConfig {
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The exclusion patterns, compiled.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a pattern that does not
    /// compile.
    pub fn exclude_patterns(&self) -> Result<Vec<Regex>, ConfigError> {
        self.exclude_regex
            .iter()
            .map(|pattern| {
                Regex::new(pattern)
                    .map_err(|e| ConfigError::invalid("check_urls.exclude_regex", e.to_string()))
            })
            .collect()
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a zero timeout, an unknown
    /// key or a pattern that does not compile.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::invalid("check_urls.timeout_secs", "must be at least 1"));
        }
        if let Some(key) = self.check_keys.iter().find(|key| !URL_KEYS.contains(&key.as_str())) {
            return Err(ConfigError::invalid(
                "check_urls.check_keys",
                format!("unknown key '{key}', expected one of {}", URL_KEYS.join(", ")),
            ));
        }
        self.exclude_patterns().map(drop)
    }
}
