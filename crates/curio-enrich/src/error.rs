//! Enrichment error types.

use curio_registry::RegistryError;
use curio_store::StoreError;
use thiserror::Error;

/// Errors that abort an enrichment run.
///
/// Per-item fetch and write failures are not errors; they are collected in
/// the [`crate::EnrichReport`].
#[derive(Debug, Error)]
pub enum EnrichError {
    /// The token variable is not set.
    #[error("missing credential: environment variable {var} is not set")]
    MissingCredential { var: String },

    /// The token variable is set but cannot be a valid token.
    #[error("malformed credential in {var}: {reason}")]
    MalformedCredential { var: String, reason: &'static str },

    /// The API rejected the credential while processing an item.
    #[error("enrichment aborted at '{name}': {source}")]
    Aborted {
        name: String,
        #[source]
        source: RegistryError,
    },

    /// The API client could not be constructed.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Why a single item was skipped.
#[derive(Debug, Error)]
pub enum ItemError {
    /// The host could not provide the repository metadata.
    #[error(transparent)]
    Fetch(#[from] RegistryError),

    /// The updated record could not be rendered or written.
    #[error(transparent)]
    Write(#[from] StoreError),
}
