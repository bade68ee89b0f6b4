use anyhow::Context;
use curio_core::EntityKind;
use curio_core::schema::record_schema;

use crate::cli::root_commands::SchemaArgs;

/// Handle `curio schema`.
pub fn handle(args: &SchemaArgs) -> anyhow::Result<()> {
    let kind = EntityKind::parse(&args.kind).with_context(|| {
        format!(
            "unknown record kind '{}' (expected software, tag, platform or license)",
            args.kind
        )
    })?;
    let schema = record_schema(kind)?;
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
