//! # curio-import
//!
//! Builds a source directory of YAML records from an awesome-style markdown
//! list: one tag per `###` section, one software record per list item, one
//! platform per distinct platform name, and the license list.
//!
//! The whole document is parsed before anything is written. Existing record
//! files are never overwritten; they are listed in the [`ImportReport`].

mod error;
mod markdown;

pub use error::ImportError;
pub use markdown::{ImportedList, parse};

use std::path::{Path, PathBuf};

use curio_store::{Record, Store, StoreError};
use serde::Serialize;

/// Outcome of one import.
#[derive(Debug, Default, Serialize)]
pub struct ImportReport {
    pub software: usize,
    pub tags: usize,
    pub platforms: usize,
    pub licenses: usize,
    /// Files that already existed and were left alone.
    pub existing: Vec<PathBuf>,
}

/// Read the markdown file at `path` and import it into `store`.
///
/// # Errors
///
/// Returns [`ImportError::Read`] if the file cannot be read, otherwise the
/// same errors as [`import_markdown`].
pub fn import_file(path: &Path, store: &Store, licenses_file: &str) -> Result<ImportReport, ImportError> {
    let source = std::fs::read_to_string(path).map_err(|source| ImportError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), "importing markdown list");
    import_markdown(&source, store, licenses_file)
}

/// Import a markdown document into `store`, writing the license list to
/// `licenses_file` (relative to the store root).
///
/// # Errors
///
/// Returns a parse error before anything is written, or
/// [`ImportError::Store`] if a record cannot be written.
pub fn import_markdown(source: &str, store: &Store, licenses_file: &str) -> Result<ImportReport, ImportError> {
    let list = parse(source)?;
    let mut report = ImportReport::default();

    for tag in &list.tags {
        created(store.create_tag(tag), &mut report.tags, &mut report.existing)?;
    }
    for software in &list.software {
        created(store.create_software(software), &mut report.software, &mut report.existing)?;
    }
    for platform in &list.platforms() {
        created(store.create_platform(platform), &mut report.platforms, &mut report.existing)?;
    }
    if !list.licenses.is_empty() {
        match store.create_license_list(licenses_file, &list.licenses) {
            Ok(_) => report.licenses = list.licenses.len(),
            Err(StoreError::AlreadyExists(path)) => report.existing.push(path),
            Err(e) => return Err(e.into()),
        }
    }

    if !report.existing.is_empty() {
        tracing::warn!(count = report.existing.len(), "existing files were not overwritten");
    }
    tracing::info!(
        software = report.software,
        tags = report.tags,
        platforms = report.platforms,
        licenses = report.licenses,
        "import finished"
    );
    Ok(report)
}

fn created<T>(
    result: Result<Record<T>, StoreError>,
    count: &mut usize,
    existing: &mut Vec<PathBuf>,
) -> Result<(), ImportError> {
    match result {
        Ok(_) => *count += 1,
        Err(StoreError::AlreadyExists(path)) => {
            tracing::debug!(path = %path.display(), "record exists, skipping");
            existing.push(path);
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}
