//! Check groups, run in a fixed order.

mod licenses;
mod platforms;
mod software;
mod tags;

use chrono::NaiveDate;
use curio_config::LintConfig;
use curio_core::{CoreError, EntityKind, EntityRef};
use curio_store::{Record, ReferenceIndex};

use crate::diagnostic::{Diagnostic, Rule};

pub use licenses::LicenseChecks;
pub use platforms::PlatformChecks;
pub use software::SoftwareChecks;
pub use tags::TagChecks;

/// Everything a check group may look at.
pub struct LintContext<'i, 'a> {
    pub index: &'i ReferenceIndex<'a>,
    pub conflicts: &'i [CoreError],
    pub config: &'i LintConfig,
    pub today: NaiveDate,
}

/// A group of related checks over one entity kind.
pub trait CheckGroup {
    fn name(&self) -> &'static str;
    fn check(&self, ctx: &LintContext<'_, '_>, out: &mut Vec<Diagnostic>);
}

/// Name conflicts found while building the index.
pub struct ConflictChecks;

impl CheckGroup for ConflictChecks {
    fn name(&self) -> &'static str {
        "conflicts"
    }

    fn check(&self, ctx: &LintContext<'_, '_>, out: &mut Vec<Diagnostic>) {
        for conflict in ctx.conflicts {
            if let CoreError::DuplicateName {
                name,
                first,
                second,
            } = conflict
            {
                out.push(Diagnostic::error(
                    Rule::DuplicateName,
                    EntityRef::new(*second, name.clone()),
                    format!("name is already used by a {first}"),
                ));
            }
        }
    }
}

/// Warn when a record's file is not named after its entity.
fn check_file_name<T>(record: &Record<T>, kind: EntityKind, name: &str, out: &mut Vec<Diagnostic>) {
    if record.file_name_matches(name) {
        return;
    }
    let actual = record
        .path()
        .file_name()
        .map(|file| file.to_string_lossy().into_owned())
        .unwrap_or_default();
    out.push(Diagnostic::warning(
        Rule::FileName,
        EntityRef::new(kind, name),
        format!(
            "file name {actual} does not match expected {}",
            curio_core::naming::record_file_name(name)
        ),
    ));
}

/// Error for each related tag name that is not a known tag.
fn check_related_tags(
    ctx: &LintContext<'_, '_>,
    subject: &EntityRef,
    related_tags: &[String],
    out: &mut Vec<Diagnostic>,
) {
    for related in related_tags {
        if ctx.index.tag(related).is_none() {
            out.push(Diagnostic::error(
                Rule::DanglingRelatedTag,
                subject.clone(),
                format!("related tag '{related}' does not exist"),
            ));
        }
    }
}
