//! Reference index over a loaded [`Catalog`].
//!
//! The index borrows the catalog, so it has to be rebuilt after the store
//! changes; it is never updated incrementally.

use std::collections::{BTreeMap, HashMap};

use curio_core::{CoreError, EntityKind, License, Platform, Software, Tag};

use crate::Catalog;

/// A resolved entity of any kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity<'a> {
    Software(&'a Software),
    Tag(&'a Tag),
    Platform(&'a Platform),
    License(&'a License),
}

impl Entity<'_> {
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        match self {
            Self::Software(_) => EntityKind::Software,
            Self::Tag(_) => EntityKind::Tag,
            Self::Platform(_) => EntityKind::Platform,
            Self::License(_) => EntityKind::License,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Software(software) => &software.name,
            Self::Tag(tag) => &tag.name,
            Self::Platform(platform) => &platform.name,
            Self::License(license) => &license.identifier,
        }
    }
}

/// Name lookups and reverse references over a catalog.
#[derive(Debug, Clone)]
pub struct ReferenceIndex<'a> {
    catalog: &'a Catalog,
    software: HashMap<&'a str, usize>,
    tags: HashMap<&'a str, usize>,
    platforms: HashMap<&'a str, usize>,
    licenses: HashMap<&'a str, usize>,
    /// Tag name -> software positions, in catalog order. Includes unknown tags.
    tag_users: BTreeMap<&'a str, Vec<usize>>,
    /// Platform name -> software positions, in catalog order. Includes unknown platforms.
    platform_users: BTreeMap<&'a str, Vec<usize>>,
}

impl<'a> ReferenceIndex<'a> {
    /// Build the index, failing on the first duplicate name.
    ///
    /// Software, tags and platforms share one namespace; license identifiers
    /// have their own.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::DuplicateName`] for the first conflict found.
    pub fn build(catalog: &'a Catalog) -> Result<Self, CoreError> {
        let (index, mut conflicts) = Self::build_lenient(catalog);
        if conflicts.is_empty() {
            Ok(index)
        } else {
            Err(conflicts.swap_remove(0))
        }
    }

    /// Build the index keeping the first entity of every duplicated name, and
    /// return all conflicts alongside it.
    #[must_use]
    pub fn build_lenient(catalog: &'a Catalog) -> (Self, Vec<CoreError>) {
        let mut conflicts = Vec::new();
        let mut namespace: HashMap<&'a str, EntityKind> = HashMap::new();

        let software = register(
            catalog.software.iter().map(|r| r.entity().name.as_str()),
            EntityKind::Software,
            &mut namespace,
            &mut conflicts,
        );
        let tags = register(
            catalog.tags.iter().map(|r| r.entity().name.as_str()),
            EntityKind::Tag,
            &mut namespace,
            &mut conflicts,
        );
        let platforms = register(
            catalog.platforms.iter().map(|r| r.entity().name.as_str()),
            EntityKind::Platform,
            &mut namespace,
            &mut conflicts,
        );
        let licenses = register(
            catalog.licenses.iter().map(|l| l.identifier.as_str()),
            EntityKind::License,
            &mut HashMap::new(),
            &mut conflicts,
        );

        let mut tag_users: BTreeMap<&'a str, Vec<usize>> = BTreeMap::new();
        let mut platform_users: BTreeMap<&'a str, Vec<usize>> = BTreeMap::new();
        for (position, record) in catalog.software.iter().enumerate() {
            let software = record.entity();
            for tag in &software.tags {
                push_unique(tag_users.entry(tag.as_str()).or_default(), position);
            }
            for platform in &software.platforms {
                push_unique(platform_users.entry(platform.as_str()).or_default(), position);
            }
        }

        let index = Self {
            catalog,
            software,
            tags,
            platforms,
            licenses,
            tag_users,
            platform_users,
        };
        (index, conflicts)
    }

    #[must_use]
    pub const fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    #[must_use]
    pub fn software(&self, name: &str) -> Option<&'a Software> {
        let catalog = self.catalog;
        self.software
            .get(name)
            .map(|&i| catalog.software[i].entity())
    }

    #[must_use]
    pub fn tag(&self, name: &str) -> Option<&'a Tag> {
        let catalog = self.catalog;
        self.tags.get(name).map(|&i| catalog.tags[i].entity())
    }

    #[must_use]
    pub fn platform(&self, name: &str) -> Option<&'a Platform> {
        let catalog = self.catalog;
        self.platforms
            .get(name)
            .map(|&i| catalog.platforms[i].entity())
    }

    #[must_use]
    pub fn license(&self, identifier: &str) -> Option<&'a License> {
        let catalog = self.catalog;
        self.licenses.get(identifier).map(|&i| &catalog.licenses[i])
    }

    /// Resolve `name` as an entity of `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NotFound`] if no entity of that kind has the name.
    pub fn resolve(&self, kind: EntityKind, name: &str) -> Result<Entity<'a>, CoreError> {
        let found = match kind {
            EntityKind::Software => self.software(name).map(Entity::Software),
            EntityKind::Tag => self.tag(name).map(Entity::Tag),
            EntityKind::Platform => self.platform(name).map(Entity::Platform),
            EntityKind::License => self.license(name).map(Entity::License),
        };
        found.ok_or_else(|| CoreError::NotFound {
            kind,
            name: name.to_string(),
        })
    }

    /// Software items listing `tag`, in catalog order.
    pub fn software_tagged(&self, tag: &str) -> impl Iterator<Item = &'a Software> + '_ {
        self.users(&self.tag_users, tag)
    }

    /// Number of software items listing `tag`.
    #[must_use]
    pub fn tag_usage(&self, tag: &str) -> usize {
        self.tag_users.get(tag).map_or(0, Vec::len)
    }

    /// Software items listing `platform`, in catalog order.
    pub fn software_on_platform(&self, platform: &str) -> impl Iterator<Item = &'a Software> + '_ {
        self.users(&self.platform_users, platform)
    }

    /// Every platform name cited by a software item, sorted, known or not.
    pub fn referenced_platforms(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.platform_users.keys().copied()
    }

    /// Tags deprecated in favor of another tag or list.
    pub fn redirecting_tags(&self) -> impl Iterator<Item = &'a Tag> + '_ {
        self.catalog
            .tags
            .iter()
            .map(crate::Record::entity)
            .filter(|tag| self.tag(&tag.name).is_some_and(|t| std::ptr::eq(t, *tag)))
            .filter(|tag| tag.is_redirect())
    }

    fn users<'s>(
        &'s self,
        map: &'s BTreeMap<&'a str, Vec<usize>>,
        name: &str,
    ) -> impl Iterator<Item = &'a Software> + 's {
        let catalog = self.catalog;
        map.get(name)
            .into_iter()
            .flatten()
            .map(move |&i| catalog.software[i].entity())
    }
}

fn register<'a>(
    names: impl Iterator<Item = &'a str>,
    kind: EntityKind,
    namespace: &mut HashMap<&'a str, EntityKind>,
    conflicts: &mut Vec<CoreError>,
) -> HashMap<&'a str, usize> {
    let mut positions = HashMap::new();
    for (position, name) in names.enumerate() {
        if let Some(&first) = namespace.get(name) {
            tracing::debug!(name, %first, second = %kind, "duplicate entity name");
            conflicts.push(CoreError::DuplicateName {
                name: name.to_string(),
                first,
                second: kind,
            });
            continue;
        }
        namespace.insert(name, kind);
        positions.insert(name, position);
    }
    positions
}

fn push_unique(positions: &mut Vec<usize>, position: usize) {
    if positions.last() != Some(&position) {
        positions.push(position);
    }
}
