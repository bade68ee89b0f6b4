//! Consistency checker policy options.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const fn default_min_items_per_tag() -> usize {
    3
}

const fn default_true() -> bool {
    true
}

const fn default_error_days() -> i64 {
    3650
}

const fn default_warn_days() -> i64 {
    365
}

/// About six months.
const fn default_info_days() -> i64 {
    186
}

fn default_licenses_files() -> Vec<String> {
    vec!["licenses.yml".to_string()]
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LintConfig {
    /// Minimum number of software items a non-redirecting tag must have.
    #[serde(default = "default_min_items_per_tag")]
    pub min_items_per_tag: usize,

    /// Software items using a redirecting tag fail the run (otherwise a warning).
    #[serde(default = "default_true")]
    pub items_in_redirect_fatal: bool,

    /// Age in days from which a project is reported as an error.
    #[serde(default = "default_error_days")]
    pub last_updated_error_days: i64,

    /// Age in days from which a project is reported as a warning.
    #[serde(default = "default_warn_days")]
    pub last_updated_warn_days: i64,

    /// Age in days from which a project is reported as info.
    #[serde(default = "default_info_days")]
    pub last_updated_info_days: i64,

    /// License list files, relative to the source directory, unioned in order.
    #[serde(default = "default_licenses_files")]
    pub licenses_files: Vec<String>,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            min_items_per_tag: default_min_items_per_tag(),
            items_in_redirect_fatal: default_true(),
            last_updated_error_days: default_error_days(),
            last_updated_warn_days: default_warn_days(),
            last_updated_info_days: default_info_days(),
            licenses_files: default_licenses_files(),
        }
    }
}

impl LintConfig {
    /// Check that freshness thresholds are positive. Their order is free; the
    /// checker reports the highest bucket an age reaches.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("lint.last_updated_info_days", self.last_updated_info_days),
            ("lint.last_updated_warn_days", self.last_updated_warn_days),
            ("lint.last_updated_error_days", self.last_updated_error_days),
        ] {
            if value <= 0 {
                return Err(ConfigError::invalid(field, "must be a positive number of days"));
            }
        }
        if self.licenses_files.is_empty() {
            return Err(ConfigError::invalid(
                "lint.licenses_files",
                "at least one license list file is required",
            ));
        }
        Ok(())
    }
}
