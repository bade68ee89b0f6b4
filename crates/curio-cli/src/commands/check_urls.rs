use anyhow::bail;
use curio_linkcheck::UrlChecker;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Handle `curio check-urls`.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let config = &ctx.config.check_urls;
    let catalog = ctx.load_catalog()?;
    let report = UrlChecker::new(config)?.check_catalog(&catalog).await;

    let dead = report.dead.len();
    let text = format!("{} ok, {dead} dead, {} skipped", report.ok, report.skipped);
    output(&report, &text, flags.format)?;

    if dead > 0 && config.errors_are_fatal {
        bail!("{dead} dead links");
    }
    Ok(())
}
