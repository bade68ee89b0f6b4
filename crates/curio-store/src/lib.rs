//! # curio-store
//!
//! File-backed record store and the reference index built over it.
//!
//! Directory layout under the source directory:
//!
//! ```text
//! ├── software/          one .yml file per software project
//! ├── tags/              one .yml file per tag
//! ├── platforms/         one .yml file per platform
//! ├── licenses.yml       YAML list of licenses
//! └── licenses-nonfree.yml
//! ```
//!
//! The store is loaded fresh on every run and assumes it is the only writer of
//! the directory for the duration of the run.

mod error;
pub mod index;
mod patch;
mod record;

pub use error::StoreError;
pub use index::{Entity, ReferenceIndex};
pub use record::Record;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use curio_core::naming::record_file_name;
use curio_core::{CoreError, EntityKind, License, Platform, Software, Tag};
use serde::de::DeserializeOwned;

/// Everything loaded from one source directory.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub software: Vec<Record<Software>>,
    pub tags: Vec<Record<Tag>>,
    pub platforms: Vec<Record<Platform>>,
    /// Union of all license list files, in file order.
    pub licenses: Vec<License>,
}

impl Catalog {
    /// Total number of entities of all kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.software.len() + self.tags.len() + self.platforms.len() + self.licenses.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Handle on a source directory of YAML records.
#[derive(Debug, Clone)]
pub struct Store {
    root: PathBuf,
}

impl Store {
    /// Open the source directory at `root`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if `root` is not a readable directory.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        let metadata = fs::metadata(&root).map_err(|e| StoreError::io(&root, e))?;
        if !metadata.is_dir() {
            return Err(StoreError::io(
                &root,
                std::io::Error::new(std::io::ErrorKind::NotADirectory, "not a directory"),
            ));
        }
        Ok(Self { root })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding records of `kind`.
    #[must_use]
    pub fn kind_dir(&self, kind: EntityKind) -> Option<PathBuf> {
        kind.directory().map(|dir| self.root.join(dir))
    }

    /// Load every record, plus the union of the given license list files.
    ///
    /// # Errors
    ///
    /// Fails on the first unreadable file or malformed document.
    pub fn load(&self, licenses_files: &[String]) -> Result<Catalog, StoreError> {
        let catalog = Catalog {
            software: self.load_kind(EntityKind::Software)?,
            tags: self.load_kind(EntityKind::Tag)?,
            platforms: self.load_kind(EntityKind::Platform)?,
            licenses: self.load_licenses(licenses_files)?,
        };
        tracing::info!(
            software = catalog.software.len(),
            tags = catalog.tags.len(),
            platforms = catalog.platforms.len(),
            licenses = catalog.licenses.len(),
            root = %self.root.display(),
            "loaded catalog"
        );
        Ok(catalog)
    }

    fn load_kind<T: DeserializeOwned>(&self, kind: EntityKind) -> Result<Vec<Record<T>>, StoreError> {
        let Some(dir) = self.kind_dir(kind) else {
            return Ok(Vec::new());
        };
        let mut records = Vec::new();
        for path in list_record_files(&dir)? {
            tracing::debug!(path = %path.display(), %kind, "loading record");
            let source = fs::read_to_string(&path).map_err(|e| StoreError::io(&path, e))?;
            let entity = parse_document(&path, &source)?;
            records.push(Record::new(path, source, entity));
        }
        Ok(records)
    }

    fn load_licenses(&self, files: &[String]) -> Result<Vec<License>, StoreError> {
        let mut licenses = Vec::new();
        for file in files {
            let path = self.root.join(file.trim_start_matches('/'));
            tracing::debug!(path = %path.display(), "loading license list");
            let source = fs::read_to_string(&path).map_err(|e| StoreError::io(&path, e))?;
            let list: Vec<License> = parse_document(&path, &source)?;
            licenses.extend(list);
        }
        Ok(licenses)
    }

    /// Write a software record back to disk if it differs from its file.
    ///
    /// Returns `true` if the file was written. See [`Self::prepare_software`].
    ///
    /// # Errors
    ///
    /// Same as [`Self::prepare_software`] and [`Self::commit`].
    pub fn save_software(&self, record: &mut Record<Software>) -> Result<bool, StoreError> {
        match self.prepare_software(record)? {
            Some(pending) => {
                self.commit(record, pending)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Render the new text of a modified software record without writing it.
    ///
    /// Enrichment fields are patched into the original text so that every
    /// other byte is preserved. Any other modification falls back to a full
    /// canonical re-serialization. Returns `None` when the record matches its
    /// file.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MalformedRecord`] if the new document does not
    /// parse back to the in-memory entity.
    pub fn prepare_software(
        &self,
        record: &Record<Software>,
    ) -> Result<Option<PendingWrite>, StoreError> {
        let on_disk: Software = parse_document(record.path(), record.source())?;
        if &on_disk == record.entity() {
            return Ok(None);
        }

        let mut expected = on_disk;
        expected.apply_enrichment(record.entity().enrichment());
        let text = if &expected == record.entity() {
            patch_enrichment(record.source(), record.entity())?
        } else {
            tracing::debug!(
                path = %record.path().display(),
                "non-enrichment fields changed, re-serializing record"
            );
            to_yaml(record.entity())?
        };

        let reparsed: Software = parse_document(record.path(), &text)?;
        if &reparsed != record.entity() {
            return Err(CoreError::malformed(
                record.path(),
                "patched document does not match the updated record",
            )
            .into());
        }
        Ok(Some(PendingWrite {
            path: record.path().to_path_buf(),
            text,
        }))
    }

    /// Write a prepared document and make it the record's new source.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the file cannot be replaced.
    pub fn commit(&self, record: &mut Record<Software>, pending: PendingWrite) -> Result<(), StoreError> {
        write_atomic(&pending.path, &pending.text)?;
        tracing::debug!(path = %pending.path.display(), "wrote record");
        record.set_source(pending.text);
        Ok(())
    }

    /// Write a new software record to `software/<kebab-name>.yml`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::AlreadyExists`] if the target file exists.
    pub fn create_software(&self, software: &Software) -> Result<Record<Software>, StoreError> {
        self.create_record(EntityKind::Software, &software.name, software)
    }

    /// Write a new tag record to `tags/<kebab-name>.yml`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::AlreadyExists`] if the target file exists.
    pub fn create_tag(&self, tag: &Tag) -> Result<Record<Tag>, StoreError> {
        self.create_record(EntityKind::Tag, &tag.name, tag)
    }

    /// Write a new platform record to `platforms/<kebab-name>.yml`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::AlreadyExists`] if the target file exists.
    pub fn create_platform(&self, platform: &Platform) -> Result<Record<Platform>, StoreError> {
        self.create_record(EntityKind::Platform, &platform.name, platform)
    }

    /// Write a new license list file at `file`, relative to the root.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::AlreadyExists`] if the file exists.
    pub fn create_license_list(&self, file: &str, licenses: &[License]) -> Result<PathBuf, StoreError> {
        let path = self.root.join(file.trim_start_matches('/'));
        if path.exists() {
            return Err(StoreError::AlreadyExists(path));
        }
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|e| StoreError::io(dir, e))?;
        }
        write_atomic(&path, &to_yaml(&licenses)?)?;
        Ok(path)
    }

    fn create_record<T: serde::Serialize + Clone>(
        &self,
        kind: EntityKind,
        name: &str,
        entity: &T,
    ) -> Result<Record<T>, StoreError> {
        let dir = self.kind_dir(kind).unwrap_or_else(|| self.root.clone());
        fs::create_dir_all(&dir).map_err(|e| StoreError::io(&dir, e))?;
        let path = dir.join(record_file_name(name));
        if path.exists() {
            return Err(StoreError::AlreadyExists(path));
        }
        let text = to_yaml(entity)?;
        write_atomic(&path, &text)?;
        tracing::debug!(path = %path.display(), %kind, "created record");
        Ok(Record::new(path, text, entity.clone()))
    }
}

/// New text of a record file, validated but not yet written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingWrite {
    path: PathBuf,
    text: String,
}

impl PendingWrite {
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Sorted `.yml`/`.yaml` files directly inside `dir`.
fn list_record_files(dir: &Path) -> Result<Vec<PathBuf>, StoreError> {
    let entries = fs::read_dir(dir).map_err(|e| StoreError::io(dir, e))?;
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| StoreError::io(dir, e))?;
        let path = entry.path();
        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == "yml" || ext == "yaml");
        if is_yaml && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn parse_document<T: DeserializeOwned>(path: &Path, source: &str) -> Result<T, StoreError> {
    serde_yaml_ng::from_str(source).map_err(|e| CoreError::malformed(path, e).into())
}

fn to_yaml<T: serde::Serialize>(value: &T) -> Result<String, StoreError> {
    serde_yaml_ng::to_string(value).map_err(|e| StoreError::Serialize(e.to_string()))
}

fn patch_enrichment(source: &str, software: &Software) -> Result<String, StoreError> {
    let mut text = source.to_string();
    text = match software.stargazers_count {
        Some(stars) => patch::set_key(&text, "stargazers_count", &stars.to_string()),
        None => patch::remove_key(&text, "stargazers_count"),
    };
    text = match software.updated_at {
        Some(date) => patch::set_key(&text, "updated_at", &format_date(date)),
        None => patch::remove_key(&text, "updated_at"),
    };
    text = match software.archived {
        Some(archived) => patch::set_key(&text, "archived", &archived.to_string()),
        None => patch::remove_key(&text, "archived"),
    };
    Ok(match &software.current_release {
        Some(release) => patch::set_block(
            &text,
            "current_release",
            &[
                ("tag", yaml_scalar(&release.tag)?),
                ("published_at", yaml_scalar(&release.published_at)?),
            ],
        ),
        None => patch::remove_key(&text, "current_release"),
    })
}

/// A string as a single-line YAML scalar, quoted only when needed.
fn yaml_scalar(value: &str) -> Result<String, StoreError> {
    Ok(to_yaml(&value)?.trim_end().to_string())
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Replace `path` through a temporary file in the same directory.
fn write_atomic(path: &Path, text: &str) -> Result<(), StoreError> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut file = tempfile::NamedTempFile::new_in(dir).map_err(|e| StoreError::io(dir, e))?;
    if let Ok(metadata) = fs::metadata(path) {
        file.as_file()
            .set_permissions(metadata.permissions())
            .map_err(|e| StoreError::io(path, e))?;
    }
    file.write_all(text.as_bytes())
        .map_err(|e| StoreError::io(file.path(), e))?;
    file.persist(path)
        .map_err(|e| StoreError::io(path, e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn patch_enrichment_touches_only_enrichment_keys() {
        let source = "name: Foo\nwebsite_url: https://foo.org\nstargazers_count: 1\n";
        let mut software: Software = serde_yaml_ng::from_str(source).unwrap();
        software.stargazers_count = Some(5);
        software.updated_at = NaiveDate::from_ymd_opt(2024, 2, 29);
        software.archived = Some(true);

        let patched = patch_enrichment(source, &software).unwrap();
        assert_eq!(
            patched,
            "name: Foo\nwebsite_url: https://foo.org\nstargazers_count: 5\nupdated_at: 2024-02-29\narchived: true\n"
        );
        let reparsed: Software = serde_yaml_ng::from_str(&patched).unwrap();
        assert_eq!(reparsed, software);
    }

    #[test]
    fn patch_enrichment_removes_cleared_fields() {
        let source = "name: Foo\narchived: true\n";
        let software = Software::named("Foo");
        assert_eq!(patch_enrichment(source, &software).unwrap(), "name: Foo\n");
    }

    #[test]
    fn patch_enrichment_writes_current_release() {
        let source = "name: Foo\ncurrent_release:\n  tag: v1\n  published_at: 2023-01-01\ndescription: Foo.\n";
        let mut software: Software = serde_yaml_ng::from_str(source).unwrap();
        software.current_release = Some(curio_core::Release {
            tag: "1.10".into(),
            published_at: "2024-06-01".into(),
        });

        let patched = patch_enrichment(source, &software).unwrap();
        assert!(patched.starts_with("name: Foo\ncurrent_release:\n  tag: '1.10'\n  published_at: "));
        assert!(patched.ends_with("\ndescription: Foo.\n"));
        let reparsed: Software = serde_yaml_ng::from_str(&patched).unwrap();
        assert_eq!(reparsed, software);
    }
}
