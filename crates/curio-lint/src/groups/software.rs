use std::sync::LazyLock;

use curio_core::{EntityKind, EntityRef, Software};
use regex::Regex;

use super::{CheckGroup, LintContext, check_file_name};
use crate::diagnostic::{Diagnostic, Rule, Severity};

const MAX_DESCRIPTION_CHARS: usize = 250;

static EXTERNAL_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[.+\]\(.+\)$").expect("valid external link regex"));

/// Per-item checks: required fields, description style, references,
/// freshness and archival status.
pub struct SoftwareChecks;

impl CheckGroup for SoftwareChecks {
    fn name(&self) -> &'static str {
        "software"
    }

    fn check(&self, ctx: &LintContext<'_, '_>, out: &mut Vec<Diagnostic>) {
        for record in &ctx.index.catalog().software {
            let software = record.entity();
            let subject = EntityRef::new(EntityKind::Software, software.name.clone());

            required_fields(software, &subject, out);
            description(&software.description, &subject, out);
            external_links(&software.external_links, &subject, out);
            references(ctx, software, &subject, out);
            freshness(ctx, software, &subject, out);

            if software.is_archived() {
                out.push(Diagnostic::warning(
                    Rule::Archived,
                    subject.clone(),
                    "project is archived upstream",
                ));
            }
            check_file_name(record, EntityKind::Software, &software.name, out);
        }
    }
}

fn required_fields(software: &Software, subject: &EntityRef, out: &mut Vec<Diagnostic>) {
    let scalars = [
        ("name", &software.name),
        ("website_url", &software.website_url),
        ("description", &software.description),
    ];
    for (field, value) in scalars {
        if value.trim().is_empty() {
            out.push(Diagnostic::error(
                Rule::RequiredField,
                subject.clone(),
                format!("{field} is empty"),
            ));
        }
    }

    let lists = [
        ("licenses", &software.licenses),
        ("tags", &software.tags),
        ("platforms", &software.platforms),
    ];
    for (field, values) in lists {
        if values.is_empty() {
            out.push(Diagnostic::error(
                Rule::RequiredField,
                subject.clone(),
                format!("{field} must list at least one entry"),
            ));
        } else if values.iter().any(|value| value.trim().is_empty()) {
            out.push(Diagnostic::error(
                Rule::RequiredField,
                subject.clone(),
                format!("{field} list contains an empty entry"),
            ));
        }
    }
}

/// Style of a present description. A blank one is already a required-field
/// error.
fn description(text: &str, subject: &EntityRef, out: &mut Vec<Diagnostic>) {
    if text.trim().is_empty() {
        return;
    }
    let length = text.chars().count();
    if length > MAX_DESCRIPTION_CHARS {
        out.push(Diagnostic::error(
            Rule::DescriptionLength,
            subject.clone(),
            format!("description is {length} characters long, the limit is {MAX_DESCRIPTION_CHARS}"),
        ));
    }
    if !text.chars().next().is_some_and(char::is_uppercase) {
        out.push(Diagnostic::warning(
            Rule::DescriptionCapital,
            subject.clone(),
            "description does not start with a capital letter",
        ));
    }
    if !text.ends_with('.') {
        out.push(Diagnostic::error(
            Rule::DescriptionPeriod,
            subject.clone(),
            "description does not end with a period",
        ));
    }
}

fn external_links(links: &[String], subject: &EntityRef, out: &mut Vec<Diagnostic>) {
    for link in links {
        if !EXTERNAL_LINK.is_match(link) {
            out.push(Diagnostic::error(
                Rule::ExternalLinkSyntax,
                subject.clone(),
                format!("external link '{link}' is not of the form [text](url)"),
            ));
        }
    }
}

/// Licenses and tags. Platforms are checked by the platform group.
fn references(
    ctx: &LintContext<'_, '_>,
    software: &Software,
    subject: &EntityRef,
    out: &mut Vec<Diagnostic>,
) {
    for license in distinct(&software.licenses) {
        if ctx.index.license(license).is_none() {
            out.push(Diagnostic::error(
                Rule::DanglingLicense,
                subject.clone(),
                format!("license '{license}' is not in any license list"),
            ));
        }
    }
    for tag in distinct(&software.tags) {
        if ctx.index.tag(tag).is_none() {
            out.push(Diagnostic::error(
                Rule::DanglingTag,
                subject.clone(),
                format!("tag '{tag}' does not exist"),
            ));
        }
    }
}

/// Non-empty names in first-seen order, without repeats.
fn distinct(names: &[String]) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::with_capacity(names.len());
    for name in names {
        if !name.trim().is_empty() && !seen.contains(&name.as_str()) {
            seen.push(name.as_str());
        }
    }
    seen
}

fn freshness(
    ctx: &LintContext<'_, '_>,
    software: &Software,
    subject: &EntityRef,
    out: &mut Vec<Diagnostic>,
) {
    let Some(updated_at) = software.updated_at else {
        return;
    };
    let age = (ctx.today - updated_at).num_days();
    let Some((severity, threshold)) = freshness_bucket(ctx.config, age) else {
        tracing::debug!(name = %software.name, age, "recently updated");
        return;
    };
    out.push(Diagnostic::new(
        severity,
        Rule::Stale,
        subject.clone(),
        format!("last updated {age} days ago ({updated_at}), threshold is {threshold} days"),
    ));
}

/// Highest bucket whose threshold `age` reaches. Thresholds are inclusive.
fn freshness_bucket(config: &curio_config::LintConfig, age: i64) -> Option<(Severity, i64)> {
    [
        (Severity::Error, config.last_updated_error_days),
        (Severity::Warning, config.last_updated_warn_days),
        (Severity::Info, config.last_updated_info_days),
    ]
    .into_iter()
    .find(|&(_, threshold)| age >= threshold)
}
