use curio_config::ConfigError;
use thiserror::Error;

/// Errors raised while setting up a link check.
#[derive(Debug, Error)]
pub enum LinkCheckError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}
