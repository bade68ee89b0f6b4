//! Entity structs for all Curio record kinds.
//!
//! Each struct mirrors the YAML document of one record file. Field order is the
//! canonical key order used when a new record is written. Unknown keys are
//! rejected at load time (`deny_unknown_fields`), so a typo in a record surfaces
//! as a malformed record instead of a silently ignored field.

mod license;
mod platform;
mod software;
mod tag;

pub use license::License;
pub use platform::Platform;
pub use software::{Enrichment, Release, Software};
pub use tag::{Redirect, Tag};

/// Whether a URL-ish reference points outside the catalog.
#[must_use]
pub fn is_external_url(value: &str) -> bool {
    value.contains("://")
}
