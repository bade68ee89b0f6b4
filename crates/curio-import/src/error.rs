//! Import error types.

use std::path::PathBuf;

use curio_store::StoreError;
use thiserror::Error;

/// Errors that stop an import. Nothing is written when parsing fails.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The markdown file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document has no `### ` section.
    #[error("no '### ' section found, nothing to import")]
    NoSections,

    /// A list item under a section does not have the expected layout.
    #[error("line {line}: malformed list item: {text}")]
    MalformedItem { line: usize, text: String },

    /// A line of the license list does not have the expected layout.
    #[error("line {line}: malformed license entry: {text}")]
    MalformedLicense { line: usize, text: String },

    /// Writing a record failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}
