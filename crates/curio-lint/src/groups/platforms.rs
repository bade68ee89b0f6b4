use curio_core::{EntityKind, EntityRef};

use super::{CheckGroup, LintContext, check_file_name, check_related_tags};
use crate::diagnostic::{Diagnostic, Rule};

/// Platform descriptions and platform references from software items.
pub struct PlatformChecks;

impl CheckGroup for PlatformChecks {
    fn name(&self) -> &'static str {
        "platforms"
    }

    fn check(&self, ctx: &LintContext<'_, '_>, out: &mut Vec<Diagnostic>) {
        for record in &ctx.index.catalog().platforms {
            let platform = record.entity();
            let subject = EntityRef::new(EntityKind::Platform, platform.name.clone());
            if platform.description.trim().is_empty() {
                out.push(Diagnostic::error(
                    Rule::PlatformDescription,
                    subject.clone(),
                    "description is empty",
                ));
            }
            check_related_tags(ctx, &subject, &platform.related_tags, out);
            check_file_name(record, EntityKind::Platform, &platform.name, out);
        }

        // One error per (software, platform) pair: by platform name, then
        // catalog order.
        for platform in ctx.index.referenced_platforms() {
            if platform.trim().is_empty() || ctx.index.platform(platform).is_some() {
                continue;
            }
            for software in ctx.index.software_on_platform(platform) {
                out.push(Diagnostic::error(
                    Rule::DanglingPlatform,
                    EntityRef::new(EntityKind::Software, software.name.clone()),
                    format!("platform '{platform}' does not exist"),
                ));
            }
        }
    }
}
