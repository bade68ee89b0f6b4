use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::EnrichArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct EnrichSummary<'a> {
    eligible: usize,
    unsupported: usize,
    complete: usize,
    updated: usize,
    unchanged: usize,
    failed: Vec<&'a str>,
}

/// Handle `curio enrich`.
pub async fn handle(args: &EnrichArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let only_missing = args.only_missing || ctx.config.enrich.only_missing;
    let mut catalog = ctx.load_catalog()?;
    let mut enricher =
        curio_enrich::hosted_enricher(&ctx.config.enrich, &catalog)?.only_missing(only_missing);

    let report = enricher.run(&ctx.store, &mut catalog).await?;

    let summary = EnrichSummary {
        eligible: report.eligible,
        unsupported: report.unsupported,
        complete: report.complete,
        updated: report.updated,
        unchanged: report.unchanged,
        failed: report.failures.iter().map(|f| f.name.as_str()).collect(),
    };
    let text = format!(
        "{} updated, {} unchanged, {} failed, {} skipped",
        summary.updated,
        summary.unchanged,
        summary.failed.len(),
        summary.unsupported + summary.complete
    );
    output(&summary, &text, flags.format)
}
