//! # curio-lint
//!
//! Consistency checker for the catalog.
//!
//! Checks run as a single pass in fixed groups: index conflicts, tags,
//! platforms, software, licenses. All diagnostics are collected; the run
//! fails iff at least one [`Severity::Error`] was produced.
//!
//! ```no_run
//! use chrono::Utc;
//! use curio_config::LintConfig;
//! use curio_lint::Checker;
//! # fn demo(catalog: &curio_store::Catalog) {
//! let config = LintConfig::default();
//! let report = Checker::new(&config, Utc::now().date_naive()).check_catalog(catalog);
//! if report.failed() {
//!     std::process::exit(1);
//! }
//! # }
//! ```

mod checker;
mod diagnostic;
mod groups;

pub use checker::Checker;
pub use diagnostic::{Diagnostic, LintReport, Rule, Severity};
