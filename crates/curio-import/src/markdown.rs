//! Parser for awesome-style markdown lists.
//!
//! Each `### Title` section becomes a tag, and each `- ` line under it a
//! software item tagged with that title. Sections end at the next `##` or
//! `###` heading. A `## List of Licenses` section lists license entries.
//!
//! ```text
//! - [Name](https://site) `⚠` - Description. ([Demo](..), [Source Code](..)) `MIT/GPL-3.0` `Python/Docker`
//! - `MIT` - [MIT License](https://spdx.org/licenses/MIT.html)
//! ```

use std::collections::HashSet;
use std::sync::LazyLock;

use curio_core::{License, Platform, Software, Tag};
use regex::Regex;

use crate::error::ImportError;

static ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^- \[(?P<name>.*)\]\((?P<url>[^)]+)\) (?P<depends>`⚠` )?- (?P<description>.*\.) ",
        r"(?:\((?P<links>.*\))\) )?`(?P<licenses>.*)` `(?P<platforms>.*)`\s*$",
    ))
    .expect("valid list item regex")
});

static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(?P<text>[^\]]*)\]\((?P<url>[^)]*)\)").expect("valid link regex"));

static LICENSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^- `(?P<identifier>[^`]+)`(?: - \[(?P<name>[^\]]*)\]\((?P<url>[^)]*)\))?")
        .expect("valid license entry regex")
});

const LICENSES_HEADING: &str = "List of Licenses";

/// Everything found in one markdown list, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportedList {
    pub tags: Vec<Tag>,
    pub software: Vec<Software>,
    pub licenses: Vec<License>,
}

impl ImportedList {
    /// One platform per distinct name used by the software items, with an
    /// empty description, in first-use order.
    #[must_use]
    pub fn platforms(&self) -> Vec<Platform> {
        let mut seen = HashSet::new();
        self.software
            .iter()
            .flat_map(|software| &software.platforms)
            .filter(|name| seen.insert(name.as_str()))
            .map(|name| Platform::named(name.as_str()))
            .collect()
    }
}

enum Block {
    Outside,
    Section(usize),
    Licenses,
}

/// Parse a whole markdown document.
///
/// An item listed under several sections gets one tag per section, in
/// document order.
///
/// # Errors
///
/// Returns [`ImportError::NoSections`] for a document without `### `
/// headings, or the first malformed list item or license entry.
pub fn parse(source: &str) -> Result<ImportedList, ImportError> {
    let mut list = ImportedList::default();
    let mut block = Block::Outside;

    for (index, line) in source.lines().enumerate() {
        let number = index + 1;
        if let Some(title) = line.strip_prefix("### ") {
            list.tags.push(Tag::named(title.trim()));
            block = Block::Section(list.tags.len() - 1);
            continue;
        }
        if let Some(title) = line.strip_prefix("## ") {
            block = if title.trim() == LICENSES_HEADING {
                Block::Licenses
            } else {
                Block::Outside
            };
            continue;
        }
        match block {
            Block::Section(tag) => section_line(&mut list, tag, line, number)?,
            Block::Licenses if line.starts_with("- ") => {
                list.licenses.push(license(line, number)?);
            }
            Block::Licenses | Block::Outside => {}
        }
    }

    if list.tags.is_empty() {
        return Err(ImportError::NoSections);
    }
    tracing::debug!(
        tags = list.tags.len(),
        software = list.software.len(),
        licenses = list.licenses.len(),
        "parsed markdown list"
    );
    Ok(list)
}

fn section_line(list: &mut ImportedList, tag: usize, line: &str, number: usize) -> Result<(), ImportError> {
    let title = list.tags[tag].name.clone();
    if line.starts_with("- ") {
        let software = item(line, &title, number)?;
        match list.software.iter_mut().find(|known| known.name == software.name) {
            Some(known) if !known.tags.contains(&title) => known.tags.push(title),
            Some(_) => {}
            None => list.software.push(software),
        }
        return Ok(());
    }

    let tag = &mut list.tags[tag];
    if line.starts_with("_Related:") {
        tag.related_tags = LINK
            .captures_iter(line)
            .map(|link| link["text"].to_string())
            .collect();
    } else if line.starts_with("**Please visit") {
        tag.delegate = links(line);
    } else if line.starts_with("_See also") {
        tag.external_links = links(line);
    } else if !line.trim().is_empty() && !line.starts_with(['#', '*', '_', '-']) {
        if tag.description.is_empty() {
            tag.description = line.trim().to_string();
        } else {
            tracing::warn!(tag = %tag.name, line = number, "extra description line ignored");
        }
    }
    Ok(())
}

/// Every markdown link of `line`, as written.
fn links(line: &str) -> Vec<String> {
    LINK.find_iter(line).map(|link| link.as_str().to_string()).collect()
}

fn item(line: &str, tag: &str, number: usize) -> Result<Software, ImportError> {
    let malformed = || ImportError::MalformedItem {
        line: number,
        text: line.to_string(),
    };
    let captures = ITEM.captures(line).ok_or_else(malformed)?;

    let mut software = Software::named(captures["name"].trim());
    software.website_url = captures["url"].to_string();
    software.description = captures["description"].to_string();
    software.licenses = split_list(&captures["licenses"]);
    software.platforms = split_list(&captures["platforms"]);
    software.tags = vec![tag.to_string()];
    if captures.name("depends").is_some() {
        software.depends_3rdparty = Some(true);
    }
    if let Some(links) = captures.name("links") {
        for link in LINK.captures_iter(links.as_str()) {
            let url = Some(link["url"].to_string());
            match &link["text"] {
                "Source Code" => software.source_code_url = url,
                "Demo" => software.demo_url = url,
                "Clients" | "Related software" => software.related_software_url = url,
                other => tracing::debug!(name = %software.name, link = other, "unknown item link ignored"),
            }
        }
    }
    if software.name.is_empty() {
        return Err(malformed());
    }
    Ok(software)
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split('/')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(String::from)
        .collect()
}

fn license(line: &str, number: usize) -> Result<License, ImportError> {
    let captures = LICENSE
        .captures(line)
        .ok_or_else(|| ImportError::MalformedLicense {
            line: number,
            text: line.to_string(),
        })?;
    let field = |name| captures.name(name).map_or_else(String::new, |m| m.as_str().to_string());
    Ok(License {
        identifier: field("identifier"),
        name: field("name"),
        url: field("url"),
    })
}
