use curio_core::{EntityKind, EntityRef};

use super::{CheckGroup, LintContext};
use crate::diagnostic::{Diagnostic, Rule};

pub struct LicenseChecks;

impl CheckGroup for LicenseChecks {
    fn name(&self) -> &'static str {
        "licenses"
    }

    fn check(&self, ctx: &LintContext<'_, '_>, out: &mut Vec<Diagnostic>) {
        for license in &ctx.index.catalog().licenses {
            let subject = EntityRef::new(EntityKind::License, license.identifier.clone());
            for (field, value) in [("name", &license.name), ("url", &license.url)] {
                if value.trim().is_empty() {
                    out.push(Diagnostic::error(
                        Rule::LicenseField,
                        subject.clone(),
                        format!("{field} is empty"),
                    ));
                }
            }
        }
    }
}
