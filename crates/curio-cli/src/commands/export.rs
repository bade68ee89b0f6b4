use std::path::Path;

use anyhow::Context;
use curio_render::{MarkdownSinglePage, Renderer};
use curio_store::ReferenceIndex;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ExportArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `curio export`.
pub fn handle(args: &ExportArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let export = &ctx.config.export;
    let catalog = ctx.load_catalog()?;
    let index = ReferenceIndex::build(&catalog).context("cannot export a catalog with duplicate names")?;

    let mut renderer = MarkdownSinglePage::new();
    if let Some(header) = &export.header {
        renderer = renderer.with_header(read_text(&ctx.project_path(header))?);
    }
    if let Some(footer) = &export.footer {
        renderer = renderer.with_footer(read_text(&ctx.project_path(footer))?);
    }
    let page = renderer.render(&index)?;

    let target = ctx.project_path(args.output.as_ref().unwrap_or(&export.output));
    std::fs::write(&target, &page).with_context(|| format!("failed to write {}", target.display()))?;
    tracing::info!(path = %target.display(), bytes = page.len(), "wrote markdown export");

    output(
        &json!({ "output": target, "bytes": page.len() }),
        &format!("wrote {}", target.display()),
        flags.format,
    )
}

fn read_text(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
