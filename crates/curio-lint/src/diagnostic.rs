use std::fmt;

use curio_core::EntityRef;
use serde::Serialize;

/// Diagnostic severity. Only [`Severity::Error`] fails a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every check the linter runs, with a stable code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rule {
    DuplicateName,
    TagDescription,
    TagMinItems,
    TagRedirectUsed,
    DanglingRelatedTag,
    DanglingRedirect,
    FileName,
    PlatformDescription,
    DanglingPlatform,
    RequiredField,
    DescriptionLength,
    DescriptionCapital,
    DescriptionPeriod,
    ExternalLinkSyntax,
    DanglingLicense,
    DanglingTag,
    Stale,
    Archived,
    LicenseField,
}

impl Rule {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::DuplicateName => "duplicate-name",
            Self::TagDescription => "tag-description",
            Self::TagMinItems => "tag-min-items",
            Self::TagRedirectUsed => "tag-redirect-used",
            Self::DanglingRelatedTag => "dangling-related-tag",
            Self::DanglingRedirect => "dangling-redirect",
            Self::FileName => "file-name",
            Self::PlatformDescription => "platform-description",
            Self::DanglingPlatform => "dangling-platform",
            Self::RequiredField => "required-field",
            Self::DescriptionLength => "description-length",
            Self::DescriptionCapital => "description-capital",
            Self::DescriptionPeriod => "description-period",
            Self::ExternalLinkSyntax => "external-link-syntax",
            Self::DanglingLicense => "dangling-license",
            Self::DanglingTag => "dangling-tag",
            Self::Stale => "stale",
            Self::Archived => "archived",
            Self::LicenseField => "license-field",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One finding about one entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub rule: Rule,
    pub subject: EntityRef,
    pub message: String,
}

impl Diagnostic {
    pub fn new(severity: Severity, rule: Rule, subject: EntityRef, message: impl Into<String>) -> Self {
        Self {
            severity,
            rule,
            subject,
            message: message.into(),
        }
    }

    pub fn error(rule: Rule, subject: EntityRef, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, rule, subject, message)
    }

    pub fn warning(rule: Rule, subject: EntityRef, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, rule, subject, message)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] {}: {}",
            self.severity, self.rule, self.subject, self.message
        )
    }
}

/// All diagnostics of one run, in check order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LintReport {
    diagnostics: Vec<Diagnostic>,
}

impl LintReport {
    pub(crate) const fn new(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }

    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.with_severity(Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.with_severity(Severity::Warning)
    }

    pub fn infos(&self) -> impl Iterator<Item = &Diagnostic> {
        self.with_severity(Severity::Info)
    }

    /// Diagnostics produced by `rule`.
    pub fn by_rule(&self, rule: Rule) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.rule == rule)
    }

    /// A run fails iff at least one error was reported.
    #[must_use]
    pub fn failed(&self) -> bool {
        self.errors().next().is_some()
    }

    fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(move |d| d.severity == severity)
    }
}
