use anyhow::bail;
use chrono::Utc;
use curio_lint::Checker;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Handle `curio lint`.
pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let catalog = ctx.load_catalog()?;
    let report = Checker::new(&ctx.config.lint, Utc::now().date_naive()).check_catalog(&catalog);

    let errors = report.errors().count();
    let summary = format!(
        "{errors} errors, {} warnings, {} infos",
        report.warnings().count(),
        report.infos().count()
    );
    output(&report, &summary, flags.format)?;

    if report.failed() {
        bail!("lint failed with {errors} errors");
    }
    Ok(())
}
