use std::path::PathBuf;

use chrono::{Days, NaiveDate};
use curio_config::LintConfig;
use curio_core::naming::record_file_name;
use curio_core::{EntityKind, License, Platform, Redirect, Software, Tag};
use curio_lint::{Checker, LintReport, Rule, Severity};
use curio_store::{Catalog, Record};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

fn record<T>(dir: &str, name: &str, entity: T) -> Record<T> {
    Record::new(
        PathBuf::from(dir).join(record_file_name(name)),
        String::new(),
        entity,
    )
}

fn software(name: &str, tags: &[&str]) -> Record<Software> {
    let mut software = Software::named(name);
    software.website_url = format!("https://{}.example.org", name.to_lowercase());
    software.description = format!("{name} does useful things.");
    software.licenses = vec!["MIT".into()];
    software.platforms = vec!["Python".into()];
    software.tags = tags.iter().map(ToString::to_string).collect();
    record("software", name, software)
}

fn tag(name: &str) -> Record<Tag> {
    let mut tag = Tag::named(name);
    tag.description = format!("{name} software.");
    record("tags", name, tag)
}

fn redirect_tag(name: &str, target: &str) -> Record<Tag> {
    let mut record = tag(name);
    record.entity_mut().redirect = Some(Redirect::Single(target.into()));
    record
}

fn platform(name: &str) -> Record<Platform> {
    let mut platform = Platform::named(name);
    platform.description = format!("{name} language.");
    record("platforms", name, platform)
}

fn mit() -> License {
    License {
        identifier: "MIT".into(),
        name: "MIT License".into(),
        url: "https://spdx.org/licenses/MIT.html".into(),
    }
}

/// Three items tagged `B`, every reference resolving.
fn clean_catalog() -> Catalog {
    Catalog {
        software: vec![
            software("Alpha", &["B"]),
            software("Beta", &["B"]),
            software("Gamma", &["B"]),
        ],
        tags: vec![tag("B")],
        platforms: vec![platform("Python")],
        licenses: vec![mit()],
    }
}

fn lint(catalog: &Catalog, config: &LintConfig) -> LintReport {
    Checker::new(config, today()).check_catalog(catalog)
}

fn rules(report: &LintReport, severity: Severity) -> Vec<(Rule, String)> {
    report
        .diagnostics()
        .iter()
        .filter(|d| d.severity == severity)
        .map(|d| (d.rule, d.subject.name.clone()))
        .collect()
}

#[test]
fn clean_catalog_passes() {
    let report = lint(&clean_catalog(), &LintConfig::default());
    assert_eq!(report.diagnostics(), &[]);
    assert!(!report.failed());
}

#[test]
fn dangling_tag_names_item_and_tag() {
    let mut catalog = clean_catalog();
    catalog.software.push(software("X", &["A", "B"]));

    let report = lint(&catalog, &LintConfig::default());
    assert!(report.failed());
    let dangling: Vec<_> = report.by_rule(Rule::DanglingTag).collect();
    assert_eq!(dangling.len(), 1);
    assert_eq!(dangling[0].subject.kind, EntityKind::Software);
    assert_eq!(dangling[0].subject.name, "X");
    assert!(dangling[0].message.contains("'A'"));
}

#[test]
fn redirected_tag_used_by_two_items_fails_twice() {
    let mut catalog = clean_catalog();
    catalog.tags.push(redirect_tag("A", "B"));
    catalog.software.push(software("X", &["A", "B"]));
    catalog.software.push(software("Y", &["A", "B"]));

    let report = lint(&catalog, &LintConfig::default());
    assert!(report.failed());
    assert_eq!(
        rules(&report, Severity::Error),
        vec![
            (Rule::TagRedirectUsed, "X".to_string()),
            (Rule::TagRedirectUsed, "Y".to_string()),
        ]
    );
}

#[test]
fn redirected_tag_use_is_a_warning_when_not_fatal() {
    let mut catalog = clean_catalog();
    catalog.tags.push(redirect_tag("A", "B"));
    catalog.software.push(software("X", &["A", "B"]));
    let config = LintConfig {
        items_in_redirect_fatal: false,
        ..LintConfig::default()
    };

    let report = lint(&catalog, &config);
    assert!(!report.failed());
    assert_eq!(
        rules(&report, Severity::Warning),
        vec![(Rule::TagRedirectUsed, "X".to_string())]
    );
}

#[test]
fn redirect_to_unknown_tag_is_dangling() {
    let mut catalog = clean_catalog();
    catalog.tags.push(redirect_tag("A", "Nowhere"));
    let mut external = redirect_tag("C", "https://example.org/awesome-list");
    external.entity_mut().redirect = Some(Redirect::List(vec![
        "https://example.org/awesome-list".into(),
        "B".into(),
    ]));
    catalog.tags.push(external);

    let report = lint(&catalog, &LintConfig::default());
    assert_eq!(
        rules(&report, Severity::Error),
        vec![(Rule::DanglingRedirect, "A".to_string())]
    );
}

#[rstest]
#[case(2, true)]
#[case(3, false)]
#[case(4, false)]
fn tag_minimum_usage(#[case] items: usize, #[case] fails: bool) {
    let mut catalog = clean_catalog();
    catalog.tags.push(tag("Small"));
    for i in 0..items {
        if i < 3 {
            catalog.software[i].entity_mut().tags.push("Small".into());
        } else {
            catalog.software.push(software(&format!("Extra{i}"), &["Small"]));
        }
    }

    let report = lint(&catalog, &LintConfig::default());
    let min_items: Vec<_> = report.by_rule(Rule::TagMinItems).collect();
    assert_eq!(!min_items.is_empty(), fails);
    assert_eq!(report.failed(), fails);
}

#[test]
fn redirecting_tag_is_exempt_from_minimum() {
    let mut catalog = clean_catalog();
    catalog.tags.push(redirect_tag("Old", "B"));
    let report = lint(&catalog, &LintConfig::default());
    assert!(!report.failed());
}

#[test]
fn minimum_is_configurable() {
    let config = LintConfig {
        min_items_per_tag: 4,
        ..LintConfig::default()
    };
    let report = lint(&clean_catalog(), &config);
    assert_eq!(
        rules(&report, Severity::Error),
        vec![(Rule::TagMinItems, "B".to_string())]
    );
}

#[test]
fn each_dangling_reference_is_reported_once() {
    let mut catalog = clean_catalog();
    let mut item = software("X", &["B", "Nope"]);
    item.entity_mut().licenses.push("WTFPL".into());
    item.entity_mut().platforms.push("Cobol".into());
    catalog.software.push(item);

    let report = lint(&catalog, &LintConfig::default());
    assert_eq!(report.by_rule(Rule::DanglingTag).count(), 1);
    assert_eq!(report.by_rule(Rule::DanglingLicense).count(), 1);
    assert_eq!(report.by_rule(Rule::DanglingPlatform).count(), 1);
    assert_eq!(report.errors().count(), 3);
}

#[test]
fn dangling_platforms_are_reported_per_item() {
    let mut catalog = clean_catalog();
    catalog.software[1].entity_mut().platforms = vec!["Cobol".into(), "Ada".into()];
    catalog.software[2].entity_mut().platforms = vec!["Cobol".into(), "Cobol".into()];

    let report = lint(&catalog, &LintConfig::default());
    let found: Vec<(String, String)> = report
        .by_rule(Rule::DanglingPlatform)
        .map(|d| (d.subject.name.clone(), d.message.clone()))
        .collect();
    assert_eq!(
        found,
        vec![
            ("Beta".to_string(), "platform 'Ada' does not exist".to_string()),
            ("Beta".to_string(), "platform 'Cobol' does not exist".to_string()),
            ("Gamma".to_string(), "platform 'Cobol' does not exist".to_string()),
        ]
    );
}

#[test]
fn dangling_references_do_not_duplicate_with_the_reverse_index() {
    let mut catalog = clean_catalog();
    catalog.software.push(software("X", &["B", "Nope"]));
    catalog.software.push(software("Y", &["B", "Nope"]));

    let report = lint(&catalog, &LintConfig::default());
    let subjects: Vec<&str> = report
        .by_rule(Rule::DanglingTag)
        .map(|d| d.subject.name.as_str())
        .collect();
    assert_eq!(subjects, vec!["X", "Y"]);
}

#[rstest]
#[case(185, None)]
#[case(186, Some(Severity::Info))]
#[case(365, Some(Severity::Warning))]
#[case(3650, Some(Severity::Error))]
#[case(4000, Some(Severity::Error))]
fn freshness_uses_the_highest_bucket_only(#[case] age: u64, #[case] expected: Option<Severity>) {
    let mut catalog = clean_catalog();
    catalog.software[0].entity_mut().updated_at = today().checked_sub_days(Days::new(age));

    let report = lint(&catalog, &LintConfig::default());
    let stale: Vec<Severity> = report.by_rule(Rule::Stale).map(|d| d.severity).collect();
    assert_eq!(stale, expected.into_iter().collect::<Vec<_>>());
}

#[test]
fn stale_warning_does_not_fail_the_run() {
    let mut catalog = clean_catalog();
    catalog.software[0].entity_mut().updated_at = today().checked_sub_days(Days::new(365));
    catalog.software[1].entity_mut().archived = Some(true);

    let report = lint(&catalog, &LintConfig::default());
    assert!(!report.failed());
    assert_eq!(
        rules(&report, Severity::Warning),
        vec![
            (Rule::Stale, "Alpha".to_string()),
            (Rule::Archived, "Beta".to_string()),
        ]
    );
}

#[test]
fn missing_required_fields() {
    let mut catalog = clean_catalog();
    let mut item = record("software", "Bare", Software::named("Bare"));
    item.entity_mut().tags = vec!["B".into(), String::new()];
    catalog.software.push(item);

    let report = lint(&catalog, &LintConfig::default());
    let messages: Vec<&str> = report
        .by_rule(Rule::RequiredField)
        .map(|d| d.message.as_str())
        .collect();
    assert_eq!(
        messages,
        vec![
            "website_url is empty",
            "description is empty",
            "licenses must list at least one entry",
            "tags list contains an empty entry",
            "platforms must list at least one entry",
        ]
    );
}

#[test]
fn description_and_link_style() {
    let mut catalog = clean_catalog();
    let software = catalog.software[0].entity_mut();
    software.description = "lowercase and no period".into();
    software.external_links = vec!["[Docs](https://docs.example.org)".into(), "docs".into()];

    let report = lint(&catalog, &LintConfig::default());
    assert_eq!(
        rules(&report, Severity::Error),
        vec![
            (Rule::DescriptionPeriod, "Alpha".to_string()),
            (Rule::ExternalLinkSyntax, "Alpha".to_string()),
        ]
    );
    assert_eq!(
        rules(&report, Severity::Warning),
        vec![(Rule::DescriptionCapital, "Alpha".to_string())]
    );
}

#[test]
fn duplicate_names_across_kinds_are_errors() {
    let mut catalog = clean_catalog();
    catalog.platforms.push(platform("B"));

    let report = lint(&catalog, &LintConfig::default());
    let duplicates: Vec<_> = report.by_rule(Rule::DuplicateName).collect();
    assert_eq!(duplicates.len(), 1);
    assert_eq!(duplicates[0].subject.kind, EntityKind::Platform);
    assert_eq!(report.diagnostics()[0].rule, Rule::DuplicateName);
}

#[test]
fn entity_descriptions_and_related_tags() {
    let mut catalog = clean_catalog();
    catalog.tags[0].entity_mut().description = String::new();
    catalog.tags[0].entity_mut().related_tags = vec!["Ghost".into()];
    catalog.platforms[0].entity_mut().description = " ".into();

    let report = lint(&catalog, &LintConfig::default());
    assert_eq!(
        rules(&report, Severity::Error),
        vec![
            (Rule::TagDescription, "B".to_string()),
            (Rule::DanglingRelatedTag, "B".to_string()),
            (Rule::PlatformDescription, "Python".to_string()),
        ]
    );
}

#[test]
fn license_fields_and_file_names() {
    let mut catalog = clean_catalog();
    catalog.licenses.push(License {
        identifier: "Custom".into(),
        name: String::new(),
        url: String::new(),
    });
    catalog.tags[0] = Record::new(
        PathBuf::from("tags/wrong-name.yml"),
        String::new(),
        catalog.tags[0].entity().clone(),
    );

    let report = lint(&catalog, &LintConfig::default());
    assert_eq!(report.by_rule(Rule::LicenseField).count(), 2);
    assert_eq!(
        rules(&report, Severity::Warning),
        vec![(Rule::FileName, "B".to_string())]
    );
}

#[test]
fn groups_run_in_order() {
    let mut catalog = clean_catalog();
    catalog.licenses[0].url = String::new();
    catalog.software[0].entity_mut().platforms = vec!["Cobol".into()];
    catalog.tags[0].entity_mut().description = String::new();

    let report = lint(&catalog, &LintConfig::default());
    let order: Vec<Rule> = report.errors().map(|d| d.rule).collect();
    assert_eq!(
        order,
        vec![Rule::TagDescription, Rule::DanglingPlatform, Rule::LicenseField]
    );
}
