use chrono::NaiveDate;
use curio_config::LintConfig;
use curio_core::CoreError;
use curio_store::{Catalog, ReferenceIndex};

use crate::diagnostic::{Diagnostic, LintReport, Severity};
use crate::groups::{
    CheckGroup, ConflictChecks, LicenseChecks, LintContext, PlatformChecks, SoftwareChecks,
    TagChecks,
};

/// Runs every check group over a catalog and collects the diagnostics.
pub struct Checker<'c> {
    config: &'c LintConfig,
    today: NaiveDate,
    groups: Vec<Box<dyn CheckGroup>>,
}

impl<'c> Checker<'c> {
    /// `today` is the reference date for freshness checks.
    #[must_use]
    pub fn new(config: &'c LintConfig, today: NaiveDate) -> Self {
        let groups: Vec<Box<dyn CheckGroup>> = vec![
            Box::new(ConflictChecks),
            Box::new(TagChecks),
            Box::new(PlatformChecks),
            Box::new(SoftwareChecks),
            Box::new(LicenseChecks),
        ];
        Self {
            config,
            today,
            groups,
        }
    }

    /// Build a lenient index over `catalog` and check it. Duplicate names are
    /// reported as diagnostics instead of aborting.
    #[must_use]
    pub fn check_catalog(&self, catalog: &Catalog) -> LintReport {
        let (index, conflicts) = ReferenceIndex::build_lenient(catalog);
        self.check(&index, &conflicts)
    }

    /// Run all groups in order. Every diagnostic is also logged.
    #[must_use]
    pub fn check(&self, index: &ReferenceIndex<'_>, conflicts: &[CoreError]) -> LintReport {
        let ctx = LintContext {
            index,
            conflicts,
            config: self.config,
            today: self.today,
        };

        let mut diagnostics = Vec::new();
        for group in &self.groups {
            let before = diagnostics.len();
            group.check(&ctx, &mut diagnostics);
            tracing::debug!(
                group = group.name(),
                found = diagnostics.len() - before,
                "check group finished"
            );
        }
        diagnostics.iter().for_each(log);

        let report = LintReport::new(diagnostics);
        let errors = report.errors().count();
        if report.failed() {
            tracing::error!(
                errors,
                warnings = report.warnings().count(),
                "there were errors during linting"
            );
        } else {
            tracing::info!(
                warnings = report.warnings().count(),
                infos = report.infos().count(),
                "lint passed"
            );
        }
        report
    }
}

fn log(diagnostic: &Diagnostic) {
    let rule = diagnostic.rule.code();
    let subject = &diagnostic.subject;
    match diagnostic.severity {
        Severity::Error => tracing::error!(rule, %subject, "{}", diagnostic.message),
        Severity::Warning => tracing::warn!(rule, %subject, "{}", diagnostic.message),
        Severity::Info => tracing::info!(rule, %subject, "{}", diagnostic.message),
    }
}
