use std::fmt;

use crate::error::EnrichError;

/// API token read from the environment.
///
/// `Debug` never prints the token.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Read the token from the environment variable `var`.
    ///
    /// # Errors
    ///
    /// Returns [`EnrichError::MissingCredential`] if the variable is unset, or
    /// [`EnrichError::MalformedCredential`] if its value cannot be a token.
    pub fn from_env(var: &str) -> Result<Self, EnrichError> {
        match std::env::var(var) {
            Ok(value) => Self::parse(var, &value),
            Err(std::env::VarError::NotPresent) => Err(EnrichError::MissingCredential {
                var: var.to_string(),
            }),
            Err(std::env::VarError::NotUnicode(_)) => Err(EnrichError::MalformedCredential {
                var: var.to_string(),
                reason: "value is not valid unicode",
            }),
        }
    }

    /// Validate a raw token value.
    ///
    /// # Errors
    ///
    /// Returns [`EnrichError::MalformedCredential`] for an empty value or one
    /// containing whitespace or control characters.
    pub fn parse(var: &str, value: &str) -> Result<Self, EnrichError> {
        let malformed = |reason| EnrichError::MalformedCredential {
            var: var.to_string(),
            reason,
        };
        if value.is_empty() {
            return Err(malformed("value is empty"));
        }
        if value.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(malformed("value contains whitespace or control characters"));
        }
        Ok(Self(value.to_string()))
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}
