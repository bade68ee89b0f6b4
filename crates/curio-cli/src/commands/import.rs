use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ImportArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `curio import`. The license list goes to the first configured
/// licenses file.
pub fn handle(args: &ImportArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let source = ctx.project_path(args.source.as_ref().unwrap_or(&ctx.config.import.source_file));
    let licenses_file = ctx
        .config
        .lint
        .licenses_files
        .first()
        .context("lint.licenses_files is empty")?;

    let report = curio_import::import_file(&source, &ctx.store, licenses_file)
        .with_context(|| format!("failed to import {}", source.display()))?;

    let text = format!(
        "imported {} software, {} tags, {} platforms, {} licenses ({} existing files kept)",
        report.software,
        report.tags,
        report.platforms,
        report.licenses,
        report.existing.len()
    );
    output(&report, &text, flags.format)
}
