//! Cross-cutting error types for Curio.
//!
//! This module defines errors that can originate from any crate in the system.
//! Domain-specific errors (e.g., `StoreError`, `EnrichError`) are defined in
//! their respective crates. The binary converges them through `anyhow`.

use std::path::PathBuf;

use thiserror::Error;

use crate::enums::EntityKind;

/// Errors that can be raised by any Curio crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {kind} '{name}'")]
    NotFound { kind: EntityKind, name: String },

    /// Two records claim the same name.
    #[error("Duplicate name '{name}': defined as {first} and again as {second}")]
    DuplicateName {
        name: String,
        first: EntityKind,
        second: EntityKind,
    },

    /// A record file could not be parsed into its typed entity.
    #[error("Malformed record {}: {reason}", path.display())]
    MalformedRecord { path: PathBuf, reason: String },

    /// Data failed validation (schema, format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),
}

impl CoreError {
    pub fn malformed(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::MalformedRecord {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
