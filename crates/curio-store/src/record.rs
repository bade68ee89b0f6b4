use std::path::{Path, PathBuf};

use curio_core::naming::record_file_name;

/// A typed entity together with the file it was loaded from.
///
/// The original document text is kept so that write-back can patch it instead
/// of re-serializing, and so an unmodified record is never rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record<T> {
    path: PathBuf,
    source: String,
    entity: T,
}

impl<T> Record<T> {
    #[must_use]
    pub const fn new(path: PathBuf, source: String, entity: T) -> Self {
        Self {
            path,
            source,
            entity,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Document text as it is currently on disk.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub const fn entity(&self) -> &T {
        &self.entity
    }

    pub fn entity_mut(&mut self) -> &mut T {
        &mut self.entity
    }

    pub(crate) fn set_source(&mut self, source: String) {
        self.source = source;
    }

    /// Whether the file name matches the kebab-case form of `name`.
    #[must_use]
    pub fn file_name_matches(&self, name: &str) -> bool {
        self.path
            .file_name()
            .and_then(|file| file.to_str())
            .is_some_and(|file| {
                let expected = record_file_name(name);
                file == expected
                    || file.strip_suffix(".yaml")
                        == expected.strip_suffix(".yml")
            })
    }
}
