//! File naming rules for records.
//!
//! Every software, tag and platform record lives in its own file whose name is
//! the kebab-case form of the entity name with a `.yml` extension.

/// Extension used for newly written record files.
pub const RECORD_EXTENSION: &str = "yml";

/// Convert an entity name to kebab-case.
///
/// Lowercases the name, turns spaces into `-` and drops `(`, `)`, `&`, `/`
/// and `,`.
#[must_use]
pub fn to_kebab_case(name: &str) -> String {
    name.chars()
        .filter_map(|c| match c {
            ' ' => Some('-'),
            '(' | ')' | '&' | '/' | ',' => None,
            other => Some(other),
        })
        .flat_map(char::to_lowercase)
        .collect()
}

/// File name expected for a record named `name`.
#[must_use]
pub fn record_file_name(name: &str) -> String {
    format!("{}.{RECORD_EXTENSION}", to_kebab_case(name))
}
