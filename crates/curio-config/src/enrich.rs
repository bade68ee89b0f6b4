//! Metadata enrichment options.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const fn default_request_delay_ms() -> u64 {
    1000
}

const fn default_timeout_secs() -> u64 {
    30
}

fn default_api_base_url() -> String {
    "https://api.github.com".to_string()
}

fn default_token_env() -> String {
    "GITHUB_TOKEN".to_string()
}

fn default_gitlab_api_base_url() -> String {
    "https://gitlab.com/api/v4".to_string()
}

fn default_gitlab_token_env() -> String {
    "GITLAB_TOKEN".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EnrichConfig {
    /// Skip items whose enrichment fields are all present.
    #[serde(default)]
    pub only_missing: bool,

    /// Pause between two consecutive API requests, in milliseconds.
    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,

    /// Timeout of a single API request, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Base URL of the GitHub REST API.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Environment variable holding the GitHub token.
    #[serde(default = "default_token_env")]
    pub token_env: String,

    /// Base URL of the GitLab REST API.
    #[serde(default = "default_gitlab_api_base_url")]
    pub gitlab_api_base_url: String,

    /// Environment variable holding the GitLab token. Only read when the
    /// catalog links at least one gitlab.com project.
    #[serde(default = "default_gitlab_token_env")]
    pub gitlab_token_env: String,
}

impl Default for EnrichConfig {
    fn default() -> Self {
        Self {
            only_missing: false,
            request_delay_ms: default_request_delay_ms(),
            timeout_secs: default_timeout_secs(),
            api_base_url: default_api_base_url(),
            token_env: default_token_env(),
            gitlab_api_base_url: default_gitlab_api_base_url(),
            gitlab_token_env: default_gitlab_token_env(),
        }
    }
}

impl EnrichConfig {
    #[must_use]
    pub const fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a zero timeout or an empty
    /// API base URL or token variable name.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::invalid("enrich.timeout_secs", "must be at least 1"));
        }
        let required = [
            ("enrich.api_base_url", &self.api_base_url),
            ("enrich.token_env", &self.token_env),
            ("enrich.gitlab_api_base_url", &self.gitlab_api_base_url),
            ("enrich.gitlab_token_env", &self.gitlab_token_env),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::invalid(field, "must not be empty"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = EnrichConfig::default();
        assert!(!config.only_missing);
        assert_eq!(config.request_delay(), Duration::from_secs(1));
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.api_base_url, "https://api.github.com");
        assert_eq!(config.token_env, "GITHUB_TOKEN");
        assert_eq!(config.gitlab_api_base_url, "https://gitlab.com/api/v4");
        assert_eq!(config.gitlab_token_env, "GITLAB_TOKEN");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let config = EnrichConfig {
            timeout_secs: 0,
            ..EnrichConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_gitlab_token_env_is_rejected() {
        let config = EnrichConfig {
            gitlab_token_env: " ".into(),
            ..EnrichConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
