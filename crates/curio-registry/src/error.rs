//! Registry error types.

use thiserror::Error;

/// Errors that can occur when querying a source-hosting API.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// HTTP transport error (connection refused, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the API.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// Failed to parse an API response.
    #[error("parse error: {0}")]
    Parse(String),

    /// The repository does not exist or is not visible to the token.
    #[error("not found: {0}")]
    NotFound(String),

    /// The API rejected the credential.
    #[error("unauthorized: the API rejected the access token")]
    Unauthorized,

    /// No client is configured for the repository's host.
    #[error("no API client configured for {0}")]
    Unsupported(String),

    /// The API quota is exhausted.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },
}

impl RegistryError {
    /// Whether the error must abort the whole batch rather than skip one item.
    ///
    /// Only a rejected credential is fatal; quota exhaustion is left to the
    /// next run like any other per-item failure.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_credential_errors_are_fatal() {
        assert!(RegistryError::Unauthorized.is_fatal());
        assert!(!RegistryError::RateLimited { retry_after_secs: 1 }.is_fatal());
        assert!(!RegistryError::NotFound("x".into()).is_fatal());
        assert!(!RegistryError::Parse("x".into()).is_fatal());
        assert!(
            !RegistryError::Api {
                status: 502,
                message: String::new()
            }
            .is_fatal()
        );
    }
}
