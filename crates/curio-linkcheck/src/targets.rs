//! URLs of a catalog, in the order they are checked.

use curio_core::EntityKind;
use curio_store::Catalog;

/// One URL field of one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target<'a> {
    pub kind: EntityKind,
    pub owner: &'a str,
    pub key: &'static str,
    pub url: &'a str,
}

/// Every non-empty URL held by one of `keys`: software fields first, in
/// catalog order, then license links.
pub fn collect<'a>(catalog: &'a Catalog, keys: &[String]) -> Vec<Target<'a>> {
    let wanted = |key: &str| keys.iter().any(|k| k == key);
    let mut targets = Vec::new();

    for record in &catalog.software {
        let software = record.entity();
        let fields = [
            ("website_url", Some(software.website_url.as_str())),
            ("source_code_url", software.source_code_url.as_deref()),
            ("demo_url", software.demo_url.as_deref()),
            ("related_software_url", software.related_software_url.as_deref()),
        ];
        for (key, url) in fields {
            if let Some(url) = url.map(str::trim).filter(|url| !url.is_empty() && wanted(key)) {
                targets.push(Target {
                    kind: EntityKind::Software,
                    owner: &software.name,
                    key,
                    url,
                });
            }
        }
    }
    if wanted("url") {
        for license in &catalog.licenses {
            let url = license.url.trim();
            if !url.is_empty() {
                targets.push(Target {
                    kind: EntityKind::License,
                    owner: &license.identifier,
                    key: "url",
                    url,
                });
            }
        }
    }
    targets
}
