use curio_core::{EntityKind, EntityRef};

use super::{CheckGroup, LintContext, check_file_name, check_related_tags};
use crate::diagnostic::{Diagnostic, Rule, Severity};

/// Tag descriptions, minimum usage, redirects and related tags.
pub struct TagChecks;

impl CheckGroup for TagChecks {
    fn name(&self) -> &'static str {
        "tags"
    }

    fn check(&self, ctx: &LintContext<'_, '_>, out: &mut Vec<Diagnostic>) {
        let min_items = ctx.config.min_items_per_tag;

        for record in &ctx.index.catalog().tags {
            let tag = record.entity();
            let subject = EntityRef::new(EntityKind::Tag, tag.name.clone());

            if tag.description.trim().is_empty() {
                out.push(Diagnostic::error(
                    Rule::TagDescription,
                    subject.clone(),
                    "description is empty",
                ));
            }

            if !tag.is_redirect() {
                let count = ctx.index.tag_usage(&tag.name);
                if count < min_items {
                    out.push(Diagnostic::error(
                        Rule::TagMinItems,
                        subject.clone(),
                        format!("{count} items tagged, each tag must have at least {min_items}"),
                    ));
                }
            }

            for target in tag.redirect_tag_targets() {
                if ctx.index.tag(target).is_none() {
                    out.push(Diagnostic::error(
                        Rule::DanglingRedirect,
                        subject.clone(),
                        format!("redirect target '{target}' is neither a URL nor a known tag"),
                    ));
                }
            }

            check_related_tags(ctx, &subject, &tag.related_tags, out);
            check_file_name(record, EntityKind::Tag, &tag.name, out);
        }

        let severity = if ctx.config.items_in_redirect_fatal {
            Severity::Error
        } else {
            Severity::Warning
        };
        for tag in ctx.index.redirecting_tags() {
            let targets: Vec<&str> = tag.redirect.iter().flat_map(|r| r.targets()).collect();
            for software in ctx.index.software_tagged(&tag.name) {
                out.push(Diagnostic::new(
                    severity,
                    Rule::TagRedirectUsed,
                    EntityRef::new(EntityKind::Software, software.name.clone()),
                    format!(
                        "tag '{}' redirects to {}, use the target instead",
                        tag.name,
                        targets.join(", ")
                    ),
                ));
            }
        }
    }
}
