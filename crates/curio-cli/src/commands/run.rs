use anyhow::Context;
use curio_config::Step;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{EnrichArgs, ExportArgs, ImportArgs};
use crate::context::AppContext;

/// Handle `curio run`: execute the configured steps in order, stopping at the
/// first one that fails.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    for step in &ctx.config.steps {
        tracing::info!(%step, "running step");
        let result = match step {
            Step::Import => super::import::handle(&ImportArgs::default(), ctx, flags),
            Step::Enrich => super::enrich::handle(&EnrichArgs::default(), ctx, flags).await,
            Step::CheckUrls => super::check_urls::handle(ctx, flags).await,
            Step::Lint => super::lint::handle(ctx, flags),
            Step::Export => super::export::handle(&ExportArgs::default(), ctx, flags),
        };
        result.with_context(|| format!("step '{step}' failed"))?;
    }
    Ok(())
}
